//! smartctl output parsing and disk health assessment.
//!
//! A [`SmartDevice`] runs smartctl for one device, caches the output and
//! answers queries over it: the attribute table with per-attribute
//! verdicts, the information section, the self-test log, temperature,
//! power counters and mode, and an overall device verdict.

pub mod collectors;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod models;
pub mod parsers;
pub mod resolvers;
pub mod util;

pub use collectors::gate::ExecutionGate;
pub use collectors::runner::{CommandOutput, CommandRunner, SystemRunner};
pub use collectors::smart::SmartDevice;
pub use error::{Result, SmartError};
pub use models::device::DeviceHandle;
pub use models::smart::{
    AssessmentVerdict, AttributeRecord, InfoKind, InformationMap, PowerStats, SelfTestKind,
    SelfTestLogEntry,
};
