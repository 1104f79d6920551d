//! Unpacks the overloaded `description` property.
//!
//! The feed packs most incident attributes into one HTML-ish string:
//!
//! ```text
//! ALERT LEVEL: Advice <br />LOCATION: Wollemi NP <br />STATUS: Under control
//! ```
//!
//! Each `<br>`-separated line is a `KEY: Value` pair. Keys are lowercased
//! and whitespace runs become `-`, so `ALERT LEVEL` becomes `alert-level`.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" *<br ?/?> *").unwrap_or_else(|_| unreachable!()));

/// Splits `description` into normalized key/value properties.
///
/// A line is split at its first `": "`, so keys may themselves contain a
/// colon (`MAJOR FIRE UPDATE AS AT 11:12PM: ...`). Lines without `": "`
/// fall back to their first `:`; lines without any colon are ignored.
/// Later duplicate keys overwrite earlier ones.
#[must_use]
pub fn unpack_description(description: &str) -> Map<String, Value> {
    let mut fields = Map::new();

    for line in LINE_BREAK.split(description) {
        let Some((key, value)) = line.split_once(": ").or_else(|| line.split_once(':')) else {
            continue;
        };

        let key = normalize_key(key);
        if key.is_empty() {
            continue;
        }

        fields.insert(key, Value::String(value.trim().to_string()));
    }

    fields
}

fn normalize_key(key: &str) -> String {
    key.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}
