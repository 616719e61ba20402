//! Per-attribute assessment and the device-level verdict.

pub mod assessment;
pub mod descriptions;
pub mod overall;
