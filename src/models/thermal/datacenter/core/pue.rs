//! Power usage effectiveness.

use std::fmt;

use tracing::warn;
use uom::{
    ConstZero,
    si::{
        f64::{Power, Ratio},
        power::{kilowatt, watt},
        ratio::ratio,
    },
};

use crate::support::units::Cfm;

/// Cooling overhead of a purely air-cooled room, as a share of IT load.
pub const BASE_OVERHEAD_FRACTION: f64 = 0.5;

/// Overhead removed when every watt of heat goes to liquid.
pub const MAX_LIQUID_BENEFIT: f64 = 0.35;

/// Air handler fan power per CFM of rated flow.
pub const FAN_WATTS_PER_CFM: f64 = 0.75;

/// Ratio of total facility power to IT power.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pue {
    Defined(f64),
    /// There is no IT load to divide by.
    Undefined,
}

impl Pue {
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match *self {
            Self::Defined(value) => Some(value),
            Self::Undefined => None,
        }
    }

    /// Grades a defined PUE against `thresholds`.
    #[must_use]
    pub fn rating(&self, thresholds: &PueThresholds) -> Option<PueRating> {
        self.value().map(|pue| {
            if pue < thresholds.excellent {
                PueRating::Excellent
            } else if pue < thresholds.good {
                PueRating::Good
            } else {
                PueRating::CanImprove
            }
        })
    }
}

impl fmt::Display for Pue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defined(value) => write!(f, "{value:.2}"),
            Self::Undefined => f.write_str("undefined"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PueRating {
    Excellent,
    Good,
    CanImprove,
}

impl fmt::Display for PueRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::CanImprove => "can improve",
        })
    }
}

/// Upper bounds (exclusive) for each PUE grade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PueThresholds {
    pub excellent: f64,
    pub good: f64,
}

impl Default for PueThresholds {
    fn default() -> Self {
        Self {
            excellent: 1.3,
            good: 1.5,
        }
    }
}

/// Facility power split into IT, cooling, and fans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUsage {
    pub pue: Pue,
    pub fan_power: Power,
    /// Cooling plant overhead plus fan power.
    pub cooling_power: Power,
    pub total_facility_power: Power,
    /// Plant overhead as a share of IT load, after the liquid benefit.
    pub cooling_overhead_fraction: Ratio,
    /// Cooling power over IT power, undefined without IT load.
    pub total_overhead: Option<Ratio>,
}

impl PowerUsage {
    /// Estimates facility power from IT load, liquid share, and handler flow.
    ///
    /// Every share of heat moved to liquid trims the base overhead by up to
    /// [`MAX_LIQUID_BENEFIT`]; the overhead never drops below zero.
    #[must_use]
    pub fn estimate(it_power: Power, liquid_fraction: Ratio, handler_flow: Cfm) -> Self {
        let benefit = liquid_fraction.get::<ratio>() * MAX_LIQUID_BENEFIT;
        let overhead = (BASE_OVERHEAD_FRACTION - benefit).max(0.0);

        let fan_power = Power::new::<watt>(handler_flow.value() * FAN_WATTS_PER_CFM);
        let cooling_power = it_power * overhead + fan_power;
        let total_facility_power = it_power + cooling_power;

        let (pue, total_overhead) = if it_power > Power::ZERO {
            (
                Pue::Defined(total_facility_power.value / it_power.value),
                Some(Ratio::new::<ratio>(cooling_power.value / it_power.value)),
            )
        } else {
            warn!(
                fan_kw = fan_power.get::<kilowatt>(),
                "no IT load, PUE is undefined"
            );
            (Pue::Undefined, None)
        };

        Self {
            pue,
            fan_power,
            cooling_power,
            total_facility_power,
            cooling_overhead_fraction: Ratio::new::<ratio>(overhead),
            total_overhead,
        }
    }
}
