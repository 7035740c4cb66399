use uom::si::{
    f64::{Energy, Ratio, ThermodynamicTemperature, Time, Volume},
    time::hour,
};

use crate::support::units::VolumetricPowerDensity;

use super::{
    airflow::{Airflow, RackExhaust, TemperatureRise},
    field::{HotSpots, TemperatureField},
    params::ParameterSet,
    pue::{Pue, PowerUsage},
    recommend::{Recommendation, RecommendationLimits},
    stages::HeatBalance,
};

/// Hours in a non-leap year of continuous operation.
pub const HOURS_PER_YEAR: f64 = 8760.0;

/// Everything the heat balance derives from one parameter set.
///
/// A result is recomputed in full on every run. The only second-pass field
/// is [`hot_spots`](Self::hot_spots), set by [`with_hot_spots`](Self::with_hot_spots)
/// once a temperature field exists.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalResult {
    pub heat: HeatBalance,
    /// Share of generated heat taken by liquid loops.
    pub liquid_cooling_fraction: Ratio,
    pub airflow: Airflow,
    pub delta_t: TemperatureRise,
    /// Supply temperature plus the air-side rise, clipped to the ceiling.
    pub room_temp: ThermodynamicTemperature,
    pub rack_exhaust: RackExhaust,
    pub room_volume: Volume,
    pub power_density: VolumetricPowerDensity,
    pub power: PowerUsage,
    pub recommendations: Vec<Recommendation>,
    pub hot_spots: Option<HotSpots>,
}

impl ThermalResult {
    #[must_use]
    pub fn pue(&self) -> Pue {
        self.power.pue
    }

    /// Share of grid cells above the alert threshold, once known.
    #[must_use]
    pub fn hot_spot_fraction(&self) -> Option<Ratio> {
        self.hot_spots.map(|spots| spots.fraction)
    }

    /// Heat carried off by liquid loops over a year of steady operation.
    #[must_use]
    pub fn annual_recoverable_energy(&self) -> Energy {
        self.heat.liquid_captured() * Time::new::<hour>(HOURS_PER_YEAR)
    }

    /// Records the hot-spot pass and rebuilds the recommendations.
    #[must_use]
    pub fn with_hot_spots(
        mut self,
        params: &ParameterSet,
        hot_spots: HotSpots,
        limits: &RecommendationLimits,
    ) -> Self {
        self.recommendations = Recommendation::evaluate(params, &self, Some(&hot_spots), limits);
        self.hot_spots = Some(hot_spots);
        self
    }
}

/// A finalized result together with the field it was checked against.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    pub result: ThermalResult,
    pub field: TemperatureField,
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{energy::kilowatt_hour, ratio::ratio};

    use crate::models::thermal::datacenter::core::{
        compute_thermal_balance,
        test_support::{baseline, celsius},
    };

    #[test]
    fn annual_energy_covers_every_liquid_stage() {
        let result = compute_thermal_balance(&baseline());
        assert_relative_eq!(
            result.annual_recoverable_energy().get::<kilowatt_hour>(),
            2208.0 * 8760.0,
            max_relative = 1e-9
        );
    }

    #[test]
    fn hot_spot_pass_replaces_recommendations() {
        let params = baseline();
        let result = compute_thermal_balance(&params);
        assert_eq!(result.hot_spot_fraction(), None);
        assert_eq!(result.recommendations.len(), 1);

        let spots = HotSpots {
            count: 4,
            fraction: Ratio::new::<ratio>(0.02),
            threshold: celsius(30.0),
        };
        let updated = result.with_hot_spots(&params, spots, &RecommendationLimits::default());

        assert_relative_eq!(updated.hot_spot_fraction().unwrap().get::<ratio>(), 0.02);
        assert!(
            updated
                .recommendations
                .contains(&Recommendation::AddAirHandler { current: 2 })
        );
        // Rebuilt, not appended: recovery advice appears once.
        assert_eq!(
            updated
                .recommendations
                .iter()
                .filter(|r| matches!(r, Recommendation::RecoverWasteHeat { .. }))
                .count(),
            1
        );
    }
}
