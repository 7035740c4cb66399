use thiserror::Error;
use twine_solvers::equation::bisection;
use uom::si::f64::{TemperatureInterval, ThermodynamicTemperature};

/// Errors that can occur while sizing the rear door exchangers.
#[derive(Debug, Error)]
pub enum SizingError {
    /// Even full RDHX capture leaves the field above the alert threshold.
    #[error("alert threshold unreachable: peak stays at {peak:?} with full RDHX capture")]
    Unreachable { peak: ThermodynamicTemperature },

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the iteration limit without converging.
    #[error("solver hit iteration limit: residual={residual:?}")]
    MaxIters {
        /// Best residual (peak - threshold) achieved.
        residual: TemperatureInterval,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}
