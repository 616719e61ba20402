//! Line grammars for smartctl's text output.
//!
//! These patterns are the compatibility surface with the external tool:
//! every accepted shape is covered by a test, and lines that do not match
//! are skipped rather than reported.

pub mod attributes;
pub mod information;

/// Leading integer of `s` after optional whitespace and sign.
///
/// Thousands separators inside the digit run are accepted (`"1,234"` → 1234)
/// since newer smartctl releases group NVMe counters that way.
pub fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _          => (false, s),
    };

    let bytes = rest.as_bytes();
    let mut digits = String::new();
    for (i, &b) in bytes.iter().enumerate() {
        if b.is_ascii_digit() {
            digits.push(b as char);
        } else if b == b',' && !digits.is_empty() && bytes.get(i + 1).is_some_and(u8::is_ascii_digit) {
            continue;
        } else {
            break;
        }
    }

    let n: i64 = digits.parse().ok()?;
    Some(if negative { -n } else { n })
}
