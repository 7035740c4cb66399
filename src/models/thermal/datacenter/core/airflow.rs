//! Air-side flow rates and temperature rises.

use tracing::warn;
use uom::{
    ConstZero,
    si::{
        f64::{MassRate, Power, TemperatureInterval, ThermodynamicTemperature, VolumeRate},
        power::kilowatt,
        volume::cubic_meter,
        volume_rate::cubic_meter_per_second,
    },
};

use crate::support::{air::StandardAir, units::Cfm};

use super::{params::ParameterSet, stages::HeatBalance};

/// Supply airflow delivered by the air handlers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Airflow {
    /// Combined rating of all handlers.
    pub total: Cfm,
    pub volume_rate: VolumeRate,
    pub mass_rate: MassRate,
    /// Room air volumes replaced per hour.
    pub air_changes_per_hour: f64,
}

impl Airflow {
    #[must_use]
    pub fn from_params(params: &ParameterSet) -> Self {
        let total = params.air.total_flow();
        let volume_rate = total.to_volume_rate();
        let mass_rate = StandardAir::mass_rate(volume_rate);

        // Room volume is strictly positive by construction.
        let air_changes_per_hour = volume_rate.get::<cubic_meter_per_second>() * 3600.0
            / params.room_volume().get::<cubic_meter>();

        Self {
            total,
            volume_rate,
            mass_rate,
            air_changes_per_hour,
        }
    }

    /// Whether any air is moving.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.mass_rate > MassRate::ZERO
    }
}

/// Temperature rise of room air over the supply temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TemperatureRise {
    /// A finite rise from `Q = ṁ·cp·ΔT`.
    Finite(TemperatureInterval),
    /// Heat reaches room air but no air is moving to carry it away.
    Saturated,
}

impl TemperatureRise {
    /// Solves the air-side energy balance for the residual heat.
    ///
    /// With no residual heat the rise is zero even without airflow.
    #[must_use]
    pub fn from_balance(residual: Power, airflow: &Airflow) -> Self {
        if residual <= Power::ZERO {
            return Self::Finite(TemperatureInterval::ZERO);
        }
        match StandardAir::temperature_rise(residual, airflow.mass_rate) {
            Some(rise) => Self::Finite(rise),
            None => {
                warn!(
                    residual_kw = residual.get::<kilowatt>(),
                    "no supply airflow, room temperature rise is saturated"
                );
                Self::Saturated
            }
        }
    }

    /// The rise, if finite.
    #[must_use]
    pub fn finite(&self) -> Option<TemperatureInterval> {
        match *self {
            Self::Finite(rise) => Some(rise),
            Self::Saturated => None,
        }
    }

    #[must_use]
    pub fn is_saturated(&self) -> bool {
        matches!(self, Self::Saturated)
    }
}

/// Rack exhaust temperatures before and after the rear door exchangers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RackExhaust {
    /// Exhaust leaving the servers, after cold plates but before the door.
    pub before_rdhx: ThermodynamicTemperature,
    /// Exhaust leaving the rear door into the room.
    pub after_rdhx: ThermodynamicTemperature,
}

impl RackExhaust {
    /// Estimates exhaust temperatures from server fan airflow.
    ///
    /// Server fans move `cfm_per_kw` for every kW of IT load. With no IT
    /// load, or no fan flow, both temperatures equal the inlet.
    #[must_use]
    pub fn estimate(params: &ParameterSet, heat: &HeatBalance, cfm_per_kw: f64) -> Self {
        let inlet = params.temperatures.inlet();
        let rack_flow =
            Cfm::new(cfm_per_kw * heat.generated.get::<kilowatt>()).unwrap_or_else(|_| Cfm::zero());
        let m_dot = StandardAir::mass_rate(rack_flow.to_volume_rate());

        let Some(rise) = StandardAir::temperature_rise(heat.after_dclc(), m_dot) else {
            return Self {
                before_rdhx: inlet,
                after_rdhx: inlet,
            };
        };

        Self {
            before_rdhx: inlet + rise,
            after_rdhx: inlet + rise * (1.0 - params.liquid.rdhx().fraction()),
        }
    }
}
