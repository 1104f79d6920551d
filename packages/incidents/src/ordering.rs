//! Feature identity and draw order.

use fire_feed_incidents_models::{AlertLevel, IncidentStatus};
use geojson::Feature;
use serde_json::Value;

/// Extracts the incident id from a feed `guid`.
///
/// The id is the trailing run of digits
/// (`https://incidents.rfs.nsw.gov.au/api/v1/incidents/388356` gives
/// `388356`). A guid without trailing digits is used whole.
#[must_use]
pub fn incident_id(guid: &str) -> &str {
    let prefix = guid.trim_end_matches(|c: char| c.is_ascii_digit());
    let digits = &guid[prefix.len()..];
    if digits.is_empty() { guid } else { digits }
}

fn property_str<'a>(feature: &'a Feature, key: &str) -> Option<&'a str> {
    feature
        .properties
        .as_ref()
        .and_then(|props| props.get(key))
        .and_then(Value::as_str)
}

fn sort_key(feature: &Feature) -> (u8, u8) {
    (
        IncidentStatus::sort_index(property_str(feature, "status")),
        AlertLevel::sort_index(property_str(feature, "alert-level")),
    )
}

/// Sorts features so the most important incidents come last and are drawn
/// on top: status index descending, then alert level index descending.
///
/// The sort is stable, so equally ranked features keep their feed order.
pub fn sort_features(features: &mut [Feature]) {
    features.sort_by(|a, b| sort_key(b).cmp(&sort_key(a)));
}
