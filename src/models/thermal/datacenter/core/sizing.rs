//! Iterative sizing of the rear door heat exchangers.
//!
//! Finds the lowest RDHX effectiveness at which the hottest cell of the
//! temperature field just reaches the alert threshold, holding every other
//! parameter fixed.

mod config;
mod error;
mod problem;

pub use config::SizingConfig;
pub use error::SizingError;

use twine_solvers::equation::bisection;
use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
};

use super::{
    SimulationConfig,
    field::Resolution,
    params::{Effectiveness, ParameterSet},
};

use problem::{RdhxModel, RdhxProblem};

/// The RDHX effectiveness that brings the field peak to the alert threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RdhxSizing {
    pub rdhx: Effectiveness,
    /// Field peak at that effectiveness.
    pub peak: ThermodynamicTemperature,
    /// Bisection iterations performed; zero when no search was needed.
    pub iters: usize,
}

/// Sizes the RDHX so the field peak stays at or below the alert threshold.
///
/// Returns zero effectiveness if the room already stays below the threshold
/// without rear door capture.
///
/// # Errors
///
/// Returns [`SizingError::Unreachable`] if full RDHX capture still leaves the
/// peak above the threshold, or a solver error if bisection fails to converge.
pub fn size_rdhx(
    params: &ParameterSet,
    resolution: Resolution,
    config: &SimulationConfig,
    sizing: &SizingConfig,
) -> Result<RdhxSizing, SizingError> {
    let model = RdhxModel::new(params, resolution, config);
    let problem = RdhxProblem::new(params.temperatures.alert_threshold());

    let idle = model.probe(Effectiveness::none());
    if problem.residual(&idle) <= 0.0 {
        return Ok(RdhxSizing {
            rdhx: idle.rdhx,
            peak: idle.peak,
            iters: 0,
        });
    }

    let full = model.probe(Effectiveness::full());
    if problem.residual(&full) > 0.0 {
        return Err(SizingError::Unreachable { peak: full.peak });
    }

    let solution =
        bisection::solve_unobserved(&model, &problem, [0.0, 1.0], &sizing.bisection())?;

    if solution.status != bisection::Status::Converged {
        return Err(SizingError::MaxIters {
            residual: TemperatureInterval::new::<delta_kelvin>(solution.residual),
            iters: solution.iters,
        });
    }

    let probe = solution.snapshot.output;
    Ok(RdhxSizing {
        rdhx: probe.rdhx,
        peak: probe.peak,
        iters: solution.iters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::thermodynamic_temperature::degree_celsius;

    use crate::models::thermal::datacenter::core::{
        params::{LiquidCooling, Temperatures},
        simulate_with,
        test_support::{baseline, celsius},
    };

    fn coarse() -> Resolution {
        Resolution::new(25, 38).unwrap()
    }

    fn peak_at(params: &ParameterSet, rdhx: f64) -> f64 {
        let params = params.with_rdhx(Effectiveness::new(rdhx).unwrap());
        simulate_with(&params, coarse(), &SimulationConfig::default())
            .field
            .peak()
            .get::<degree_celsius>()
    }

    #[test]
    fn finds_effectiveness_that_meets_threshold() {
        let params = baseline();
        let sizing = size_rdhx(
            &params,
            coarse(),
            &SimulationConfig::default(),
            &SizingConfig::default(),
        )
        .expect("sizing should converge");

        let rdhx = sizing.rdhx.fraction();
        assert!(rdhx > 0.0 && rdhx < 1.0);
        assert!(sizing.iters > 0);
        assert_relative_eq!(sizing.peak.get::<degree_celsius>(), 30.0, epsilon = 1e-3);
        assert_relative_eq!(peak_at(&params, rdhx), 30.0, epsilon = 1e-3);
        assert!(peak_at(&params, rdhx - 0.01) > 30.0);
    }

    #[test]
    fn no_rdhx_needed_when_already_cool() {
        let mut params = baseline();
        params.liquid = LiquidCooling::new(1.0, 0.0).unwrap();

        let sizing = size_rdhx(
            &params,
            coarse(),
            &SimulationConfig::default(),
            &SizingConfig::default(),
        )
        .unwrap();

        assert_eq!(sizing.rdhx, Effectiveness::none());
        assert_eq!(sizing.iters, 0);
    }

    #[test]
    fn threshold_below_inlet_is_unreachable() {
        let mut params = baseline();
        params.temperatures = Temperatures::new(celsius(23.3), celsius(23.0)).unwrap();

        let err = size_rdhx(
            &params,
            coarse(),
            &SimulationConfig::default(),
            &SizingConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(err, SizingError::Unreachable { peak } if peak > celsius(23.0)));
    }

    #[test]
    fn iteration_limit_is_reported() {
        let sizing = SizingConfig {
            max_iters: 2,
            ..SizingConfig::default()
        };

        let err = size_rdhx(&baseline(), coarse(), &SimulationConfig::default(), &sizing)
            .unwrap_err();

        assert!(matches!(err, SizingError::MaxIters { iters: 2, .. }));
    }
}
