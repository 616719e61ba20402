use crate::models::smart::{AssessmentVerdict, AttributeRecord};
use crate::parsers::leading_int;

/// Thresholds outside 1..=0xFD are the "always passing / always failing"
/// sentinels and carry no diagnostic meaning.
const THRESHOLD_MIN: u32 = 1;
const THRESHOLD_MAX: u32 = 0xFD;

const REALLOCATED_SECTOR_CT:  u32 = 5;
const REPORTED_UNCORRECT:     u32 = 187;
const CURRENT_PENDING_SECTOR: u32 = 197;

/// Classify one attribute row. First matching rule wins.
pub fn assess(attr: &AttributeRecord) -> AssessmentVerdict {
    assess_values(
        attr.is_prefailure,
        attr.id,
        attr.value,
        attr.worst,
        attr.threshold,
        &attr.raw_value,
    )
}

/// Same as [`assess`], on the bare tuple of inputs.
pub fn assess_values(
    is_prefailure: bool,
    id:            u32,
    value:         u32,
    worst:         u32,
    threshold:     u32,
    raw_value:     &str,
) -> AssessmentVerdict {
    let raw = leading_int(raw_value).unwrap_or(0);

    if !is_prefailure {
        if id == REPORTED_UNCORRECT && raw > 0 {
            return AssessmentVerdict::BadAttributeNow;
        }
        return AssessmentVerdict::Good;
    }

    if !(THRESHOLD_MIN..=THRESHOLD_MAX).contains(&threshold) {
        AssessmentVerdict::BadStatus
    } else if value <= threshold {
        AssessmentVerdict::BadAttributeNow
    } else if worst <= threshold {
        AssessmentVerdict::BadAttributeInThePast
    } else if (id == REALLOCATED_SECTOR_CT || id == CURRENT_PENDING_SECTOR) && raw >= 1 {
        AssessmentVerdict::BadSector
    } else {
        AssessmentVerdict::Good
    }
}
