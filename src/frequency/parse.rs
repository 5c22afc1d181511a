//! Frequency spec parsing.
//!
//! A spec is a comma-separated list of segments, each one of:
//!
//! ```text
//! 2450 MHz            point frequency
//! 2400~2483.5 MHz     range
//! n78                 registered band name (exact match)
//! ```
//!
//! Segments that match none of these are dropped, so half-typed input from
//! the front-end never aborts a computation.

use lazy_static::lazy_static;
use regex::Regex;

use super::model::{Frequency, Resolved, Unit};
use super::registry::get_band;

lazy_static! {
    static ref POINT_RE: Regex = Regex::new(r"^(\d+\.?\d*)\s+([kMG]Hz)$").unwrap();
    static ref RANGE_RE: Regex = Regex::new(r"^(\d+\.?\d*)~(\d*\.?\d+)\s+([kMG]Hz)$").unwrap();
    static ref CUSTOM_CHARS_RE: Regex = Regex::new(r"^[0-9 .~,]*$").unwrap();
    static ref CUSTOM_POINT_RE: Regex = Regex::new(r"^\d+\.?\d*$").unwrap();
    static ref CUSTOM_RANGE_RE: Regex = Regex::new(r"^(\d+\.?\d*)\s*~\s*(\d+\.?\d*)$").unwrap();
}

/// Resolve a full spec into frequency entities, in segment order.
pub fn resolve(text: &str) -> Vec<Resolved> {
    text.split(',')
        .map(str::trim)
        .filter_map(|segment| {
            let resolved = resolve_segment(segment);
            if resolved.is_none() && !segment.is_empty() {
                log::warn!("Dropping unrecognised frequency segment '{segment}'");
            }
            resolved
        })
        .collect()
}

/// Classify one trimmed segment: point, then range, then band name.
pub fn resolve_segment(segment: &str) -> Option<Resolved> {
    if let Some(caps) = POINT_RE.captures(segment) {
        let value = caps[1].parse::<f64>().ok()?;
        let unit = caps[2].parse::<Unit>().ok()?;
        return Frequency::point(value, unit).map(Resolved::Literal);
    }
    if let Some(caps) = RANGE_RE.captures(segment) {
        let inf = caps[1].parse::<f64>().ok()?;
        let sup = caps[2].parse::<f64>().ok()?;
        let unit = caps[3].parse::<Unit>().ok()?;
        return Frequency::new(inf, sup, unit).map(Resolved::Literal);
    }
    get_band(segment).map(Resolved::Band)
}

/// Check free-typed MHz input of the form `1800, 2400~2500`.
pub fn validate_custom(text: &str) -> bool {
    if !CUSTOM_CHARS_RE.is_match(text) {
        return false;
    }
    text.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .all(|segment| CUSTOM_POINT_RE.is_match(segment) || CUSTOM_RANGE_RE.is_match(segment))
}

/// Turn validated free-typed input into spec segments with an explicit MHz
/// unit. Returns `None` when `text` does not validate.
pub fn custom_to_spec(text: &str) -> Option<Vec<String>> {
    if !validate_custom(text) {
        return None;
    }
    let segments = text
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| match CUSTOM_RANGE_RE.captures(segment) {
            Some(caps) => format!("{}~{} MHz", &caps[1], &caps[2]),
            None => format!("{segment} MHz"),
        })
        .collect();
    Some(segments)
}
