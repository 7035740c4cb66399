//! Supporting utilities used by models.

pub mod air;
pub mod constraint;
pub mod units;
