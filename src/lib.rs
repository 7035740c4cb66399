//! # Data Center Thermal Models
//!
//! Steady-state thermal and efficiency models for liquid-cooled data center
//! rooms, built as [Twine](https://github.com/isentropic-dev/twine) models.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Code specific to one model stays in that model's internal `core` module
//! and only moves to [`support`] once another model needs it.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and never installs a subscriber.
//! Completed passes log at `debug`, per-stage captures and solver probes at
//! `trace`, and degenerate inputs (no airflow, no IT load) at `warn`.

pub mod models;
pub mod support;
