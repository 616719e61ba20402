//! Single-value queries derived from the parsed output.

pub mod power;
pub mod temperature;
