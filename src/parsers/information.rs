use crate::models::smart::InformationMap;

pub const INFORMATION_SECTION_START: &str = "=== START OF INFORMATION SECTION ===";

/// Either marker ends the information section.
pub const SMART_DATA_SECTION_STARTS: &[&str] = &[
    "=== START OF READ SMART DATA SECTION ===",
    "=== START OF SMART DATA SECTION ===",
];

/// `source → target`: NVMe devices report `Model Number:` where ATA devices
/// report `Device Model:`.
const KEY_ALIASES: &[(&str, &str)] = &[("modelnumber", "devicemodel")];

/// `"Device Model"` → `"devicemodel"`.
pub fn normalize_key(label: &str) -> String {
    label
        .chars()
        .filter(|c| *c != ' ')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Collect the `label: value` lines of the information section.
pub fn parse_information<S: AsRef<str>>(lines: &[S]) -> InformationMap {
    let mut map = InformationMap::new();
    let mut in_section = false;

    for line in lines {
        let line = line.as_ref();
        if !in_section {
            in_section = line.contains(INFORMATION_SECTION_START);
            continue;
        }
        if SMART_DATA_SECTION_STARTS.iter().any(|m| line.contains(m)) {
            break;
        }
        let Some((label, value)) = line.split_once(':') else { continue };
        let key = normalize_key(label.trim());
        if key.is_empty() {
            continue;
        }
        map.insert(key, value.trim());
    }

    promote_aliases(&mut map);
    map
}

/// Fill an older key from its newer alias when the older one is missing or empty.
fn promote_aliases(map: &mut InformationMap) {
    for (source, target) in KEY_ALIASES {
        let Some(value) = map.get(source).map(str::to_string) else { continue };
        if map.get(target).map_or(true, str::is_empty) {
            map.insert(*target, value);
        }
    }
}
