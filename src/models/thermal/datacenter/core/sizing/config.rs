use twine_solvers::equation::bisection;
use uom::si::{f64::TemperatureInterval, temperature_interval::kelvin as delta_kelvin};

/// Solver configuration for RDHX sizing.
#[derive(Debug, Clone, Copy)]
pub struct SizingConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance on the RDHX effectiveness fraction.
    pub effectiveness_tol: f64,

    /// Absolute tolerance for the residual (peak - threshold).
    pub temp_tol: TemperatureInterval,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            effectiveness_tol: 1e-9,
            temp_tol: TemperatureInterval::new::<delta_kelvin>(1e-9),
        }
    }
}

impl SizingConfig {
    /// Converts this configuration into a bisection solver configuration.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.effectiveness_tol,
            x_rel_tol: 0.0,
            residual_tol: self.temp_tol.get::<delta_kelvin>(),
        }
    }
}
