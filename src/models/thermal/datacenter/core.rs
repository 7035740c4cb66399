//! Steady-state heat balance for a liquid-assisted data center room.
//!
//! A calculation runs in two passes over one validated [`ParameterSet`]:
//!
//! 1. [`compute_thermal_balance`] follows rack heat through the capture
//!    stages, sizes the air-side rise, and estimates facility power.
//! 2. [`generate_temperature_field`] lays a synthetic temperature grid over
//!    the floor plan and counts hot spots.
//!
//! [`simulate`] runs both and feeds the hot-spot count back into the
//! recommendations.

mod airflow;
mod field;
mod layout;
mod params;
mod pue;
mod recommend;
mod results;
mod sizing;
mod stages;

#[cfg(test)]
pub(crate) mod test_support;

pub use airflow::{Airflow, RackExhaust, TemperatureRise};
pub use field::{FieldConfig, Grid, HotSpots, Resolution, TemperatureField};
pub use layout::{AirHandlerPlacement, Layout, LayoutConfig, Position, Wall};
pub use params::{
    AirHandling, DEFAULT_RACK_ROWS, Dimension, Effectiveness, HeatRecovery, LiquidCooling,
    ParameterError, ParameterSet, RackConfig, RoomGeometry, Temperatures,
};
pub use pue::{
    BASE_OVERHEAD_FRACTION, FAN_WATTS_PER_CFM, MAX_LIQUID_BENEFIT, PowerUsage, Pue, PueRating,
    PueThresholds,
};
pub use recommend::{Recommendation, RecommendationLimits};
pub use results::{HOURS_PER_YEAR, Simulation, ThermalResult};
pub use sizing::{RdhxSizing, SizingConfig, SizingError, size_rdhx};
pub use stages::{CaptureStage, HeatBalance};

use tracing::debug;
use uom::si::{
    f64::{Ratio, ThermodynamicTemperature},
    power::kilowatt,
    ratio::ratio,
    thermodynamic_temperature::degree_celsius,
};

use crate::support::units::VolumetricPowerDensity;

/// Settings for the heat balance pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceConfig {
    /// Highest room temperature reported; a saturated rise lands here.
    pub room_temp_ceiling: ThermodynamicTemperature,
    /// Server fan airflow per kW of IT load, used for rack exhaust estimates.
    pub rack_cfm_per_kw: f64,
    pub limits: RecommendationLimits,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            room_temp_ceiling: ThermodynamicTemperature::new::<degree_celsius>(60.0),
            rack_cfm_per_kw: 250.0,
            limits: RecommendationLimits::default(),
        }
    }
}

/// Settings for both passes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimulationConfig {
    pub balance: BalanceConfig,
    pub field: FieldConfig,
}

/// Computes the heat balance with default settings.
///
/// The result's hot-spot summary is unset; see [`simulate`].
#[must_use]
pub fn compute_thermal_balance(params: &ParameterSet) -> ThermalResult {
    compute_thermal_balance_with(params, &BalanceConfig::default())
}

/// Computes the heat balance.
///
/// Room temperature is the supply temperature plus the air-side rise,
/// clipped to `[inlet, ceiling]`. A ceiling below the inlet is raised to it.
#[must_use]
pub fn compute_thermal_balance_with(
    params: &ParameterSet,
    config: &BalanceConfig,
) -> ThermalResult {
    let heat = HeatBalance::from_params(params);
    let airflow = Airflow::from_params(params);
    let delta_t = TemperatureRise::from_balance(heat.residual, &airflow);

    let inlet = params.temperatures.inlet();
    let ceiling = if config.room_temp_ceiling > inlet {
        config.room_temp_ceiling
    } else {
        inlet
    };
    let room_temp = match delta_t {
        TemperatureRise::Finite(rise) if inlet + rise < ceiling => inlet + rise,
        TemperatureRise::Finite(_) | TemperatureRise::Saturated => ceiling,
    };

    let rack_exhaust = RackExhaust::estimate(params, &heat, config.rack_cfm_per_kw);
    let liquid_cooling_fraction = heat.liquid_fraction();
    let power = PowerUsage::estimate(heat.generated, liquid_cooling_fraction, airflow.total);

    let room_volume = params.room_volume();
    let power_density: VolumetricPowerDensity = heat.generated / room_volume;

    let mut result = ThermalResult {
        heat,
        liquid_cooling_fraction,
        airflow,
        delta_t,
        room_temp,
        rack_exhaust,
        room_volume,
        power_density,
        power,
        recommendations: Vec::new(),
        hot_spots: None,
    };
    result.recommendations = Recommendation::evaluate(params, &result, None, &config.limits);

    debug!(
        it_kw = heat.generated.get::<kilowatt>(),
        residual_kw = heat.residual.get::<kilowatt>(),
        room_c = room_temp.get::<degree_celsius>(),
        pue = %power.pue,
        "computed heat balance"
    );

    result
}

/// Generates the temperature field with default settings.
#[must_use]
pub fn generate_temperature_field(
    params: &ParameterSet,
    room_temp: ThermodynamicTemperature,
    uncaptured_fraction: Ratio,
    resolution: Resolution,
) -> TemperatureField {
    generate_temperature_field_with(
        params,
        room_temp,
        uncaptured_fraction,
        resolution,
        &SimulationConfig::default(),
    )
}

/// Generates the temperature field.
///
/// `uncaptured_fraction` is clamped to [0, 1] before scaling the plumes.
#[must_use]
pub fn generate_temperature_field_with(
    params: &ParameterSet,
    room_temp: ThermodynamicTemperature,
    uncaptured_fraction: Ratio,
    resolution: Resolution,
    config: &SimulationConfig,
) -> TemperatureField {
    let uncaptured = uncaptured_fraction.get::<ratio>();
    let uncaptured = if uncaptured.is_nan() {
        0.0
    } else {
        uncaptured.clamp(0.0, 1.0)
    };

    TemperatureField::generate(
        params,
        room_temp,
        Ratio::new::<ratio>(uncaptured),
        resolution,
        &config.balance,
        &config.field,
    )
}

/// Runs both passes with default settings.
#[must_use]
pub fn simulate(params: &ParameterSet, resolution: Resolution) -> Simulation {
    simulate_with(params, resolution, &SimulationConfig::default())
}

/// Runs the heat balance, generates the field, and finalizes the result.
#[must_use]
pub fn simulate_with(
    params: &ParameterSet,
    resolution: Resolution,
    config: &SimulationConfig,
) -> Simulation {
    let result = compute_thermal_balance_with(params, &config.balance);
    let field = generate_temperature_field_with(
        params,
        result.room_temp,
        result.heat.uncaptured_fraction(),
        resolution,
        config,
    );
    let result = result.with_hot_spots(params, field.hot_spots, &config.balance.limits);

    Simulation { result, field }
}
