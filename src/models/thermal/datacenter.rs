//! Data center room thermal model.
//!
//! Estimates how much rack heat a room's liquid cooling captures, what the
//! air handlers must carry, the resulting room temperature and PUE, and a
//! synthetic temperature field for spotting hot zones.
//!
//! [`DataCenterRoom`] exposes the full calculation as a [`twine_core::Model`].
//! The individual passes are available as free functions such as
//! [`compute_thermal_balance`] and [`generate_temperature_field`].
//!
//! # Example
//!
//! ```
//! use dc_thermal_models::models::thermal::datacenter::{
//!     AirHandling, DataCenterRoom, HeatRecovery, LiquidCooling, ParameterSet, RackConfig,
//!     RoomGeometry, Temperatures,
//! };
//! use twine_core::Model;
//! use uom::si::{
//!     f64::{Length, Power, ThermodynamicTemperature},
//!     length::meter,
//!     power::kilowatt,
//!     thermodynamic_temperature::degree_celsius,
//! };
//!
//! let params = ParameterSet {
//!     room: RoomGeometry::new(
//!         Length::new::<meter>(15.0),
//!         Length::new::<meter>(10.0),
//!         Length::new::<meter>(3.0),
//!     )?,
//!     racks: RackConfig::in_rows(3, 20, Power::new::<kilowatt>(40.0))?,
//!     liquid: LiquidCooling::new(0.2, 0.9)?,
//!     recovery: HeatRecovery::none(),
//!     air: AirHandling::new(2, 155_000.0)?,
//!     temperatures: Temperatures::new(
//!         ThermodynamicTemperature::new::<degree_celsius>(23.3),
//!         ThermodynamicTemperature::new::<degree_celsius>(30.0),
//!     )?,
//! };
//!
//! let simulation = DataCenterRoom::default().call(&params)?;
//! let room = simulation.result.room_temp.get::<degree_celsius>();
//! assert!((room - 24.4).abs() < 0.2);
//! assert!(!simulation.field.hot_spots.any());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub(crate) mod core;

pub use self::core::{
    AirHandlerPlacement, AirHandling, Airflow, BASE_OVERHEAD_FRACTION, BalanceConfig,
    CaptureStage, DEFAULT_RACK_ROWS, Dimension, Effectiveness, FAN_WATTS_PER_CFM, FieldConfig,
    Grid, HOURS_PER_YEAR, HeatBalance, HeatRecovery, HotSpots, Layout, LayoutConfig,
    LiquidCooling, MAX_LIQUID_BENEFIT, ParameterError, ParameterSet, Position, PowerUsage, Pue,
    PueRating, PueThresholds, RackConfig, RackExhaust, RdhxSizing, Recommendation,
    RecommendationLimits, Resolution, RoomGeometry, Simulation, SimulationConfig, SizingConfig,
    SizingError, TemperatureField, TemperatureRise, Temperatures, ThermalResult, Wall,
    compute_thermal_balance, compute_thermal_balance_with, generate_temperature_field,
    generate_temperature_field_with, simulate, simulate_with, size_rdhx,
};

use std::convert::Infallible;

use twine_core::Model;

/// A data center room as a [`Model`].
///
/// Calling the model runs the heat balance and the temperature field for a
/// [`ParameterSet`] and returns the finalized [`Simulation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DataCenterRoom {
    config: SimulationConfig,
    resolution: Option<Resolution>,
}

impl DataCenterRoom {
    /// Creates a room model with custom settings.
    #[must_use]
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            resolution: None,
        }
    }

    /// Fixes the grid resolution instead of deriving it from room size.
    #[must_use]
    pub fn with_resolution(self, resolution: Resolution) -> Self {
        Self {
            resolution: Some(resolution),
            ..self
        }
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The resolution used for `params`.
    #[must_use]
    pub fn resolution_for(&self, params: &ParameterSet) -> Resolution {
        self.resolution
            .unwrap_or_else(|| Resolution::for_room(&params.room, &self.config.field))
    }
}

impl Model for DataCenterRoom {
    type Input = ParameterSet;
    type Output = Simulation;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(simulate_with(input, self.resolution_for(input), &self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::ratio::ratio;

    use super::core::test_support::{baseline, celsius};

    #[test]
    fn model_matches_free_functions() {
        let params = baseline();
        let model = DataCenterRoom::default();

        let from_model = model.call(&params).unwrap();
        let direct = simulate(&params, model.resolution_for(&params));
        assert_eq!(from_model, direct);
    }

    #[test]
    fn default_resolution_follows_room_size() {
        let params = baseline();
        let resolution = DataCenterRoom::default().resolution_for(&params);

        assert!(resolution.rows() >= 30);
        assert!(resolution.cols() >= 30);
        assert!(resolution.cols() > resolution.rows());
    }

    #[test]
    fn fixed_resolution_is_used() {
        let params = baseline();
        let model = DataCenterRoom::default().with_resolution(Resolution::new(8, 12).unwrap());

        let simulation = model.call(&params).unwrap();
        assert_eq!(simulation.field.grid.cells().len(), 96);
        assert_relative_eq!(
            simulation.result.hot_spot_fraction().unwrap().get::<ratio>(),
            simulation.field.hot_spots.fraction.get::<ratio>()
        );
    }

    #[test]
    fn custom_ceiling_flows_through() {
        let mut params = baseline();
        params.air = AirHandling::new(0, 155_000.0).unwrap();
        let config = SimulationConfig {
            balance: BalanceConfig {
                room_temp_ceiling: celsius(45.0),
                ..BalanceConfig::default()
            },
            ..SimulationConfig::default()
        };

        let simulation = DataCenterRoom::new(config)
            .with_resolution(Resolution::new(5, 5).unwrap())
            .call(&params)
            .unwrap();
        assert_eq!(simulation.result.room_temp, celsius(45.0));
        assert!(simulation.field.peak() <= celsius(45.0 + 1e-9));
    }
}
