use crate::health::{assessment, descriptions};
use crate::models::smart::{AssessmentVerdict, AttributeRecord};
use once_cell::sync::Lazy;
use regex::Regex;

/// `ID# ATTRIBUTE_NAME FLAGS VALUE WORST THRESH FAIL RAW_VALUE` as printed with `-f brief`.
static ATTRIBUTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(\d+)\s+(\S+)\s+((?i:[POSRCK-]+)\+?)\s+(\d+)\s+(\d+)\s+(\d+|---)\s+(\S+)\s+(.+?)\s*$",
    )
    .expect("attribute grammar is a valid regex")
});

/// Extract every attribute row from raw smartctl output, in encounter order.
/// Duplicated ids are kept; non-matching lines are skipped.
pub fn parse_attributes<S: AsRef<str>>(lines: &[S]) -> Vec<AttributeRecord> {
    lines
        .iter()
        .filter_map(|line| parse_attribute_line(line.as_ref()))
        .collect()
}

/// Parse one attribute table row and assess it.
pub fn parse_attribute_line(line: &str) -> Option<AttributeRecord> {
    let caps = ATTRIBUTE_RE.captures(line)?;

    let id: u32    = caps[1].parse().ok()?;
    let flags      = caps[3].to_string();
    let value: u32 = caps[4].parse().ok()?;
    let worst: u32 = caps[5].parse().ok()?;
    let threshold  = match &caps[6] {
        "---" => 0,
        t     => t.parse().ok()?,
    };
    let is_prefailure = flags.chars().any(|c| c.eq_ignore_ascii_case(&'P'));

    let mut record = AttributeRecord {
        id,
        name:          caps[2].to_string(),
        flags,
        value,
        worst,
        threshold,
        when_failed:   caps[7].to_string(),
        raw_value:     caps[8].to_string(),
        description:   descriptions::describe(id).to_string(),
        is_prefailure,
        verdict:       AssessmentVerdict::Good,
    };
    record.verdict = assessment::assess(&record);
    Some(record)
}
