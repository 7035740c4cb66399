//! Thermal systems models.
//!
//! This module contains models for room-scale heat rejection: staged liquid
//! capture, air handling, and the resulting temperatures and facility power.

pub mod datacenter;
