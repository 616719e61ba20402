use crate::models::smart::AttributeRecord;
use crate::parsers::leading_int;
use once_cell::sync::Lazy;
use regex::Regex;

/// Airflow_Temperature_Cel, Temperature_Celsius, Drive_Temperature; in priority order.
pub const TEMPERATURE_ATTRIBUTE_IDS: [u32; 3] = [190, 194, 231];

/// Readings outside this range (°C) are sensor garbage.
pub const MIN_SANE_CELSIUS: i64 = -15;
pub const MAX_SANE_CELSIUS: i64 = 100;

/// SAS/SCSI (`Current Drive Temperature:     32 C`) and NVMe
/// (`Temperature:                        38 Celsius`) temperature lines.
static TEMPERATURE_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:Current Drive Temperature|Current Temperature|Temperature):\s*(-?\d+)\s+(?:C|Celsius)\b")
        .expect("temperature grammar is a valid regex")
});

/// Temperature from the attribute table, falling back to the textual
/// temperature lines only when the device has no attribute table.
pub fn resolve<S: AsRef<str>>(attributes: &[AttributeRecord], raw_lines: &[S]) -> Option<i32> {
    if attributes.is_empty() {
        from_lines(raw_lines)
    } else {
        from_attributes(attributes)
    }
}

/// First sane reading, trying ids in `TEMPERATURE_ATTRIBUTE_IDS` order.
pub fn from_attributes(attributes: &[AttributeRecord]) -> Option<i32> {
    TEMPERATURE_ATTRIBUTE_IDS.iter().find_map(|&id| {
        attributes
            .iter()
            .filter(|a| a.id == id)
            .filter_map(|a| leading_int(&a.raw_value))
            .find(|t| (MIN_SANE_CELSIUS..=MAX_SANE_CELSIUS).contains(t))
            .map(|t| t as i32)
    })
}

/// First temperature line in the raw output.
pub fn from_lines<S: AsRef<str>>(raw_lines: &[S]) -> Option<i32> {
    raw_lines.iter().find_map(|line| {
        TEMPERATURE_LINE_RE
            .captures(line.as_ref())
            .and_then(|caps| caps[1].parse().ok())
    })
}
