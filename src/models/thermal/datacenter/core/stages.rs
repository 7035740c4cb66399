//! Sequential heat capture.
//!
//! Rack heat passes through an ordered series of capture stages. Each stage
//! acts only on the heat the previous stages left behind:
//!
//! 1. [`CaptureStage::Dclc`] removes a fraction at the chip.
//! 2. [`CaptureStage::Rdhx`] removes a fraction of what reaches the rack exhaust.
//! 3. [`CaptureStage::HeatRecovery`] removes up to its nominal capacity.
//!
//! Whatever remains is the residual load carried by room air.
//! Reordering the stages changes the result.

use std::fmt;

use tracing::trace;
use uom::{
    ConstZero,
    si::{
        f64::{Power, Ratio},
        ratio::ratio,
    },
};

use super::params::{Effectiveness, ParameterSet};

/// A heat capture stage, listed in the order heat reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureStage {
    /// Direct contact liquid cooling (cold plates).
    Dclc,
    /// Rear door heat exchanger.
    Rdhx,
    /// Waste heat recovery exchangers.
    HeatRecovery,
}

impl CaptureStage {
    /// All stages in the order heat passes through them.
    pub const ORDER: [Self; 3] = [Self::Dclc, Self::Rdhx, Self::HeatRecovery];
}

impl fmt::Display for CaptureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dclc => "DCLC",
            Self::Rdhx => "RDHX",
            Self::HeatRecovery => "heat recovery",
        })
    }
}

/// How much a stage takes from the heat it receives.
#[derive(Debug, Clone, Copy)]
enum Capture {
    /// A fixed share of the incoming heat.
    Fraction(Effectiveness),
    /// Everything up to a capacity limit.
    UpTo(Power),
}

impl Capture {
    fn take_from(self, remaining: Power) -> Power {
        match self {
            Self::Fraction(effectiveness) => remaining * effectiveness.fraction(),
            Self::UpTo(capacity) if capacity < remaining => capacity,
            Self::UpTo(_) => remaining,
        }
    }
}

/// Heat captured by each stage and the residual left for room air.
///
/// `dclc + rdhx + recovery + residual == generated` holds to rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatBalance {
    /// Heat released by the racks (equal to the IT load).
    pub generated: Power,
    pub dclc: Power,
    pub rdhx: Power,
    /// Heat taken by recovery exchangers, capped at the heat that reached them.
    pub recovery: Power,
    /// Heat left for the air handlers.
    pub residual: Power,
}

impl HeatBalance {
    /// Runs the capture pipeline for a parameter set.
    #[must_use]
    pub fn from_params(params: &ParameterSet) -> Self {
        let pipeline = [
            (CaptureStage::Dclc, Capture::Fraction(params.liquid.dclc())),
            (CaptureStage::Rdhx, Capture::Fraction(params.liquid.rdhx())),
            (
                CaptureStage::HeatRecovery,
                Capture::UpTo(params.recovery.total_capacity()),
            ),
        ];

        let generated = params.total_it_power();
        let mut remaining = generated;
        let mut captured = [Power::ZERO; 3];

        for (slot, (stage, capture)) in captured.iter_mut().zip(pipeline) {
            let taken = capture.take_from(remaining);
            remaining -= taken;
            *slot = taken;
            trace!(
                %stage,
                captured_kw = taken.value / 1e3,
                remaining_kw = remaining.value / 1e3,
                "capture stage"
            );
        }

        let [dclc, rdhx, recovery] = captured;
        Self {
            generated,
            dclc,
            rdhx,
            recovery,
            residual: remaining,
        }
    }

    /// Heat captured by one stage.
    #[must_use]
    pub fn captured(&self, stage: CaptureStage) -> Power {
        match stage {
            CaptureStage::Dclc => self.dclc,
            CaptureStage::Rdhx => self.rdhx,
            CaptureStage::HeatRecovery => self.recovery,
        }
    }

    /// Heat that escapes the cold plates and reaches rack exhaust air.
    #[must_use]
    pub fn after_dclc(&self) -> Power {
        self.generated - self.dclc
    }

    /// Heat in room air before the recovery exchangers act on it.
    #[must_use]
    pub fn before_recovery(&self) -> Power {
        self.after_dclc() - self.rdhx
    }

    /// Heat removed by liquid loops, available for reuse.
    #[must_use]
    pub fn liquid_captured(&self) -> Power {
        self.dclc + self.rdhx + self.recovery
    }

    /// Share of generated heat captured by liquid loops (zero with no IT load).
    #[must_use]
    pub fn liquid_fraction(&self) -> Ratio {
        self.share_of_generated(self.liquid_captured())
    }

    /// Share of generated heat that reaches room air (zero with no IT load).
    #[must_use]
    pub fn uncaptured_fraction(&self) -> Ratio {
        self.share_of_generated(self.residual)
    }

    fn share_of_generated(&self, part: Power) -> Ratio {
        if self.generated > Power::ZERO {
            Ratio::new::<ratio>(part.value / self.generated.value)
        } else {
            Ratio::new::<ratio>(0.0)
        }
    }
}
