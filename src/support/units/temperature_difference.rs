use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin as abs_kelvin,
};

/// Extension trait for computing temperature differences.
///
/// [`uom`] does not subtract two [`ThermodynamicTemperature`] values into a
/// [`TemperatureInterval`], so this trait does it through kelvin.
/// See [#380](https://github.com/iliekturtles/uom/issues/380).
pub trait TemperatureDifference {
    /// Returns the temperature difference `self - other`.
    fn minus(self, other: Self) -> TemperatureInterval;
}

impl TemperatureDifference for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(
            self.get::<abs_kelvin>() - other.get::<abs_kelvin>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        temperature_interval::degree_celsius as delta_celsius,
        thermodynamic_temperature::{degree_celsius, degree_fahrenheit},
    };

    #[test]
    fn room_rise_over_inlet() {
        let inlet = ThermodynamicTemperature::new::<degree_celsius>(22.0);
        let room = ThermodynamicTemperature::new::<degree_celsius>(30.0);

        assert_relative_eq!(room.minus(inlet).get::<delta_celsius>(), 8.0, epsilon = 1e-9);
        assert_relative_eq!(inlet.minus(room).get::<delta_kelvin>(), -8.0, epsilon = 1e-9);
    }

    #[test]
    fn mixed_scales() {
        let t_in_c = ThermodynamicTemperature::new::<degree_celsius>(30.0);
        let t_in_f = ThermodynamicTemperature::new::<degree_fahrenheit>(86.0);
        assert_relative_eq!(
            t_in_f.minus(t_in_c).get::<delta_celsius>(),
            0.0,
            epsilon = 1e-9
        );
    }
}
