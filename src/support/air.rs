//! Standard air properties used by the room heat balance.
//!
//! The room model treats supply air as dry air at standard conditions with
//! constant properties. Humidity and altitude corrections are not applied.

use uom::{
    ConstZero,
    si::{
        f64::{
            MassDensity, MassRate, Power, SpecificHeatCapacity, TemperatureInterval, VolumeRate,
        },
        mass_density::kilogram_per_cubic_meter,
        specific_heat_capacity::joule_per_kilogram_kelvin,
    },
};

/// Density of standard air, kg/m³.
pub const DENSITY_KG_PER_M3: f64 = 1.184;

/// Specific heat capacity of air at constant pressure, J/(kg·K).
pub const CP_J_PER_KG_K: f64 = 1007.0;

/// Constant-property standard air.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StandardAir;

impl StandardAir {
    /// Returns the density of standard air.
    #[must_use]
    pub fn density() -> MassDensity {
        MassDensity::new::<kilogram_per_cubic_meter>(DENSITY_KG_PER_M3)
    }

    /// Returns the specific heat capacity of standard air.
    #[must_use]
    pub fn cp() -> SpecificHeatCapacity {
        SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(CP_J_PER_KG_K)
    }

    /// Mass flow carried by a volumetric airflow.
    #[must_use]
    pub fn mass_rate(flow: VolumeRate) -> MassRate {
        flow * Self::density()
    }

    /// Temperature rise of an air stream absorbing `q_dot`.
    ///
    /// Solves `Q = ṁ·cp·ΔT` for ΔT. Returns `None` when the stream has no
    /// mass flow, since the rise is then unbounded.
    #[must_use]
    pub fn temperature_rise(q_dot: Power, m_dot: MassRate) -> Option<TemperatureInterval> {
        if m_dot <= MassRate::ZERO {
            return None;
        }
        let rise: TemperatureInterval = q_dot / (m_dot * Self::cp());
        Some(rise)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        mass_rate::kilogram_per_second, power::kilowatt,
        temperature_interval::kelvin as delta_kelvin, volume_rate::cubic_meter_per_second,
    };

    #[test]
    fn mass_rate_from_volume_rate() {
        let m_dot = StandardAir::mass_rate(VolumeRate::new::<cubic_meter_per_second>(10.0));
        assert_relative_eq!(m_dot.get::<kilogram_per_second>(), 11.84, epsilon = 1e-12);
    }

    #[test]
    fn rise_follows_energy_balance() {
        let rise = StandardAir::temperature_rise(
            Power::new::<kilowatt>(100.7),
            MassRate::new::<kilogram_per_second>(10.0),
        )
        .unwrap();
        assert_relative_eq!(rise.get::<delta_kelvin>(), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn no_flow_has_no_finite_rise() {
        assert!(StandardAir::temperature_rise(Power::new::<kilowatt>(1.0), MassRate::ZERO).is_none());
    }
}
