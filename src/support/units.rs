//! Extensions to [`uom`].
//!
//! Public quantities in this crate are [`uom`] types. This module fills the
//! few gaps the room model needs:
//!
//! - [`TemperatureDifference`] subtracts two absolute temperatures into a
//!   [`TemperatureInterval`](uom::si::f64::TemperatureInterval).
//! - [`VolumetricPowerDensity`] names the W/m³ quantity produced by
//!   dividing IT power by room volume.
//! - [`Cfm`] carries air-handler ratings in cubic feet per minute and
//!   converts them with the fixed factor used throughout the model.
//!
//! ```
//! use uom::si::f64::ThermodynamicTemperature;
//! use uom::si::thermodynamic_temperature::degree_celsius;
//! use uom::si::temperature_interval::kelvin;
//! use dc_thermal_models::support::units::TemperatureDifference;
//!
//! let room = ThermodynamicTemperature::new::<degree_celsius>(24.4);
//! let inlet = ThermodynamicTemperature::new::<degree_celsius>(23.3);
//! let rise = room.minus(inlet);
//! assert!((rise.get::<kelvin>() - 1.1).abs() < 1e-9);
//! ```

mod airflow;
mod quantities;
mod temperature_difference;

pub use airflow::{CFM_PER_CUBIC_METER_PER_SECOND, Cfm};
pub use quantities::VolumetricPowerDensity;
pub use temperature_difference::TemperatureDifference;
