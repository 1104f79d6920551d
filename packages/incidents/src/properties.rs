//! Simplifies the property schema of a feed feature.

use fire_feed_incidents_models::FeedWarning;
use serde_json::{Map, Value};

use crate::dates::{clean_pub_date, clean_updated_date};
use crate::description::unpack_description;

/// Link attached to every incident; carries no per-incident information.
pub const GENERIC_LINK: &str = "http://www.rfs.nsw.gov.au/fire-information/fires-near-me";

/// Cleans the properties of the feature at index `feature`.
///
/// * `pubDate` becomes `pub-date` in RFC 3339.
/// * `description` is unpacked into individual properties, converting
///   `updated` to RFC 3339.
/// * `category` replaces the unpacked `alert-level`, warning when the two
///   disagree.
/// * `fire` becomes a boolean; `guid_isPermaLink` and the generic `link`
///   are removed.
#[must_use]
pub fn clean_properties(
    mut props: Map<String, Value>,
    feature: usize,
    warnings: &mut Vec<FeedWarning>,
) -> Map<String, Value> {
    if let Some(pub_date) = props.remove("pubDate") {
        let cleaned = clean_date_value(pub_date, "pubDate", clean_pub_date, feature, warnings);
        props.insert("pub-date".to_string(), cleaned);
    }

    if let Some(Value::String(description)) = props.remove("description") {
        let mut fields = unpack_description(&description);
        if let Some(updated) = fields.remove("updated") {
            let cleaned = clean_date_value(updated, "updated", clean_updated_date, feature, warnings);
            fields.insert("updated".to_string(), cleaned);
        }
        props.extend(fields);
    }

    let alert_level = props.remove("alert-level");
    if let Some(category) = props.remove("category") {
        if let Some(alert_level) = alert_level.filter(|level| *level != category) {
            let category = value_text(&category);
            let alert_level = value_text(&alert_level);
            log::warn!(
                "Feature {feature}: category '{category}' differs from description alert level '{alert_level}'"
            );
            warnings.push(FeedWarning::AlertLevelMismatch {
                feature,
                category,
                alert_level,
            });
        }
        props.insert("alert-level".to_string(), category);
    }

    props.remove("guid_isPermaLink");

    if let Some(fire) = props.get_mut("fire")
        && let Value::String(text) = fire
    {
        *fire = Value::Bool(text.to_ascii_lowercase().contains("yes"));
    }

    if props.get("link").and_then(Value::as_str) == Some(GENERIC_LINK) {
        props.remove("link");
    }

    props
}

fn clean_date_value(
    value: Value,
    field: &str,
    clean: fn(&str) -> Option<String>,
    feature: usize,
    warnings: &mut Vec<FeedWarning>,
) -> Value {
    let Value::String(raw) = value else {
        return value;
    };

    if let Some(iso) = clean(&raw) {
        return Value::String(iso);
    }

    log::warn!("Feature {feature}: keeping unparseable {field} '{raw}'");
    warnings.push(FeedWarning::UnparseableDate {
        feature,
        field: field.to_string(),
        value: raw.clone(),
    });
    Value::String(raw)
}

fn value_text(value: &Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), ToString::to_string)
}
