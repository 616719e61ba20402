use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Health verdict for one attribute, or for the whole device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssessmentVerdict {
    Good,
    BadAttributeNow,
    BadAttributeInThePast,
    BadSector,
    /// Device-level only; never attached to an attribute.
    BadSectorMany,
    BadStatus,
}

impl AssessmentVerdict {
    pub fn label(&self) -> &'static str {
        match self {
            AssessmentVerdict::Good                  => "GOOD",
            AssessmentVerdict::BadAttributeNow       => "BAD_ATTRIBUTE_NOW",
            AssessmentVerdict::BadAttributeInThePast => "BAD_ATTRIBUTE_IN_THE_PAST",
            AssessmentVerdict::BadSector             => "BAD_SECTOR",
            AssessmentVerdict::BadSectorMany         => "BAD_SECTOR_MANY",
            AssessmentVerdict::BadStatus             => "BAD_STATUS",
        }
    }

    /// Verdicts that point at a failing (or failed) disk.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            AssessmentVerdict::BadAttributeNow
                | AssessmentVerdict::BadSector
                | AssessmentVerdict::BadSectorMany
        )
    }
}

impl std::fmt::Display for AssessmentVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the ATA SMART attribute table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeRecord {
    pub id:            u32,
    pub name:          String,
    pub flags:         String,
    pub value:         u32,
    pub worst:         u32,
    /// 0 when the tool printed `---`.
    pub threshold:     u32,
    pub when_failed:   String,
    pub raw_value:     String,
    pub description:   String,
    pub is_prefailure: bool,
    pub verdict:       AssessmentVerdict,
}

impl AttributeRecord {
    /// Leading integer of the raw value; 0 when the raw value does not start with one.
    pub fn raw_number(&self) -> i64 {
        crate::parsers::leading_int(&self.raw_value).unwrap_or(0)
    }
}

/// Which argument set produced a cached smartctl run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InfoKind {
    /// Attributes, brief format, info, health and self-test log.
    Default,
    /// Extended ("all") output, a superset of `Default`.
    All,
}

impl InfoKind {
    /// True if output fetched with `self` can answer a request for `requested`.
    pub fn covers(self, requested: InfoKind) -> bool {
        self == requested || self == InfoKind::All
    }
}

/// Insertion-ordered `key → value` map of the information section.
/// Keys are normalized (lowercase, spaces removed) before they get here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InformationMap {
    entries: Vec<(String, String)>,
}

impl InformationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Last write wins; an overwritten key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None       => self.entries.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for InformationMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Test types the self-test log grammar accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SelfTestKind {
    #[serde(rename = "Short offline")]
    ShortOffline,
    #[serde(rename = "Extended offline")]
    ExtendedOffline,
    #[serde(rename = "Short captive")]
    ShortCaptive,
    #[serde(rename = "Extended captive")]
    ExtendedCaptive,
}

impl SelfTestKind {
    pub const ALL: [SelfTestKind; 4] = [
        SelfTestKind::ShortOffline,
        SelfTestKind::ExtendedOffline,
        SelfTestKind::ShortCaptive,
        SelfTestKind::ExtendedCaptive,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SelfTestKind::ShortOffline    => "Short offline",
            SelfTestKind::ExtendedOffline => "Extended offline",
            SelfTestKind::ShortCaptive    => "Short captive",
            SelfTestKind::ExtendedCaptive => "Extended captive",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.label() == label)
    }
}

/// One entry of the device's self-test history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelfTestLogEntry {
    pub num:                u32,
    pub description:        SelfTestKind,
    pub status:             String,
    pub remaining_percent:  u8,
    pub lifetime_hours:     u64,
    /// Usually an LBA, but the tool prints `-` when there was no error.
    pub lba_of_first_error: String,
}

/// Sentinel used by the power counters when no source has a value.
pub const UNKNOWN_COUNTER: i64 = -1;

/// Power-cycle count and power-on hours; `UNKNOWN_COUNTER` when unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PowerStats {
    pub power_cycles:   i64,
    pub power_on_hours: i64,
}
