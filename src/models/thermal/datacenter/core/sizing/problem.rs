//! Problem formulation for RDHX sizing.

use std::convert::Infallible;

use tracing::trace;
use twine_core::{EquationProblem, Model};
use uom::si::{
    f64::ThermodynamicTemperature, temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use crate::support::{constraint::ConstraintError, units::TemperatureDifference};

use super::super::{
    SimulationConfig,
    field::{Resolution, TemperatureField},
    params::{Effectiveness, ParameterSet},
};

/// Field peak observed at one RDHX effectiveness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Probe {
    pub(super) rdhx: Effectiveness,
    pub(super) peak: ThermodynamicTemperature,
}

/// Model adapter that reruns the room with a trial RDHX effectiveness.
pub(super) struct RdhxModel<'a> {
    params: &'a ParameterSet,
    resolution: Resolution,
    config: &'a SimulationConfig,
}

impl<'a> RdhxModel<'a> {
    pub(super) fn new(
        params: &'a ParameterSet,
        resolution: Resolution,
        config: &'a SimulationConfig,
    ) -> Self {
        Self {
            params,
            resolution,
            config,
        }
    }

    /// Runs both passes and returns the hottest cell.
    pub(super) fn probe(&self, rdhx: Effectiveness) -> Probe {
        let params = self.params.with_rdhx(rdhx);
        let result = super::super::compute_thermal_balance_with(&params, &self.config.balance);
        let field = TemperatureField::generate(
            &params,
            result.room_temp,
            result.heat.uncaptured_fraction(),
            self.resolution,
            &self.config.balance,
            &self.config.field,
        );
        let peak = field.peak();

        trace!(
            rdhx = rdhx.fraction(),
            peak_c = peak.get::<degree_celsius>(),
            "rdhx sizing probe"
        );

        Probe { rdhx, peak }
    }
}

impl Model for RdhxModel<'_> {
    type Input = Effectiveness;
    type Output = Probe;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(self.probe(*input))
    }
}

/// Equation problem definition for RDHX sizing.
///
/// Computes the residual as `peak - threshold` in kelvin.
pub(super) struct RdhxProblem {
    threshold: ThermodynamicTemperature,
}

impl RdhxProblem {
    pub(super) fn new(threshold: ThermodynamicTemperature) -> Self {
        Self { threshold }
    }

    pub(super) fn residual(&self, probe: &Probe) -> f64 {
        probe.peak.minus(self.threshold).get::<delta_kelvin>()
    }
}

impl EquationProblem<1> for RdhxProblem {
    type Input = Effectiveness;
    type Output = Probe;
    type Error = ConstraintError;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Effectiveness::new(x[0])
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([self.residual(output)])
    }
}
