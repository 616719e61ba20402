use crate::models::smart::{AssessmentVerdict, AttributeRecord};

/// Health lines printed by smartctl for devices without an attribute table
/// (SAS/SCSI and NVMe). Matched case-insensitively anywhere in a line.
const PASSING_HEALTH_LINES: &[&str] = &[
    "smart health status: ok",
    "smart overall-health self-assessment test result: passed",
];

/// Any health line at all, passing or not.
const HEALTH_LINE_PREFIXES: &[&str] = &[
    "smart health status:",
    "smart overall-health self-assessment test result:",
];

const REALLOCATED_SECTOR_CT:  u32 = 5;
const CURRENT_PENDING_SECTOR: u32 = 197;

/// Size-scaled allowance of reallocated + pending sectors:
/// `floor(ln(size_bytes / 512) * 1024)`.
///
/// `None` when the size is too small (or unknown) to give a positive
/// allowance; the many-sectors rule is skipped in that case.
pub fn sector_threshold(size_bytes: u64) -> Option<i64> {
    let sectors = size_bytes as f64 / 512.0;
    let threshold = (sectors.ln() * 1024.0).floor();
    if threshold.is_finite() && threshold > 0.0 {
        Some(threshold as i64)
    } else {
        None
    }
}

/// True if the output carries a health self-assessment line.
pub fn has_health_line<S: AsRef<str>>(raw_lines: &[S]) -> bool {
    raw_lines.iter().any(|line| {
        let line = line.as_ref().to_lowercase();
        HEALTH_LINE_PREFIXES.iter().any(|p| line.contains(p))
    })
}

/// Reallocated plus pending sector count; missing attributes count as 0.
pub fn bad_sector_count(attributes: &[AttributeRecord]) -> i64 {
    let raw_of = |id: u32| {
        attributes
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.raw_number())
            .unwrap_or(0)
    };
    raw_of(REALLOCATED_SECTOR_CT) + raw_of(CURRENT_PENDING_SECTOR)
}

/// Device-level verdict from the attribute table, or from the textual health
/// line when the device has no attribute table.
pub fn evaluate<S: AsRef<str>>(
    attributes: &[AttributeRecord],
    raw_lines:  &[S],
    size_bytes: u64,
) -> AssessmentVerdict {
    if attributes.is_empty() {
        let passed = raw_lines.iter().any(|line| {
            let line = line.as_ref().to_lowercase();
            PASSING_HEALTH_LINES.iter().any(|marker| line.contains(marker))
        });
        return if passed { AssessmentVerdict::Good } else { AssessmentVerdict::BadStatus };
    }

    let num_sectors = bad_sector_count(attributes);
    if let Some(threshold) = sector_threshold(size_bytes) {
        if num_sectors >= threshold {
            return AssessmentVerdict::BadSectorMany;
        }
    }

    // BadStatus on a single attribute is inconclusive, not a device failure.
    let flagged = attributes
        .iter()
        .map(|a| a.verdict)
        .find(|v| !matches!(v, AssessmentVerdict::Good | AssessmentVerdict::BadStatus));
    if let Some(verdict) = flagged {
        return verdict;
    }

    if num_sectors > 0 {
        AssessmentVerdict::BadSector
    } else {
        AssessmentVerdict::Good
    }
}
