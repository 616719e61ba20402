use crate::models::smart::{AttributeRecord, InformationMap, PowerStats, UNKNOWN_COUNTER};
use crate::parsers::leading_int;
use once_cell::sync::Lazy;
use regex::Regex;

const POWER_ON_HOURS:    u32 = 9;
const POWER_CYCLE_COUNT: u32 = 12;

/// Returned when the underlying smartctl run failed.
pub const POWER_MODE_ERROR:   &str = "ERROR";
/// Returned when the output names no power mode.
pub const POWER_MODE_UNKNOWN: &str = "UNKNOWN";

/// Printed instead of the report when `-n <policy>` kept the disk asleep.
static STANDBY_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Device is in (\S+) mode, exit\((\d+)\)")
        .expect("power mode grammar is a valid regex")
});

/// Power-cycle count (attribute 12, else `powercycles`) and power-on hours
/// (attribute 9, else `poweronhours`).
pub fn power_stats(attributes: &[AttributeRecord], info: &InformationMap) -> PowerStats {
    PowerStats {
        power_cycles:   counter(attributes, POWER_CYCLE_COUNT, info, "powercycles"),
        power_on_hours: counter(attributes, POWER_ON_HOURS, info, "poweronhours"),
    }
}

fn counter(attributes: &[AttributeRecord], id: u32, info: &InformationMap, key: &str) -> i64 {
    attributes
        .iter()
        .find(|a| a.id == id)
        .and_then(|a| leading_int(&a.raw_value))
        .or_else(|| info.get(key).and_then(leading_int))
        .unwrap_or(UNKNOWN_COUNTER)
}

/// `Power mode is:` from the information section, else the mode named by a
/// trailing `Device is in <mode> mode, exit(<n>)` line.
pub fn power_mode<S: AsRef<str>>(info: &InformationMap, raw_lines: &[S]) -> String {
    if let Some(mode) = info.get("powermodeis") {
        return mode.to_string();
    }

    // Trailing blank lines are padding after smartctl's final message, not output.
    raw_lines
        .iter()
        .rev()
        .map(|l| l.as_ref())
        .find(|l| !l.trim().is_empty())
        .and_then(|last| STANDBY_LINE_RE.captures(last))
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| POWER_MODE_UNKNOWN.to_string())
}
