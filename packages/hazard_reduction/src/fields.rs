//! Attribute cleaning for hazard reduction records.

use chrono::NaiveDate;
use serde_json::{Number, Value};

const TITLE_SUFFIX: &str = "HAZARD REDUCTION";
const SIZE_UNIT: &str = "ha";

/// Converts a size like `"1.2 ha"` to a number of hectares.
///
/// Numbers pass through; strings that are not a number once the unit is
/// removed become `null`.
#[must_use]
pub fn clean_size(size: Option<&Value>) -> Value {
    match size {
        Some(Value::String(text)) => strip_suffix_ignore_case(text.trim(), SIZE_UNIT)
            .unwrap_or_else(|| text.trim())
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number),
        Some(other) => other.clone(),
        None => Value::Null,
    }
}

/// Removes a trailing `HAZARD REDUCTION` (any case) from a location.
#[must_use]
pub fn clean_title(location: &str) -> String {
    strip_suffix_ignore_case(location.trim_end(), TITLE_SUFFIX)
        .map_or(location, str::trim_end)
        .to_string()
}

/// Converts a `d/MM/yyyy` date to `yyyy-MM-dd`.
#[must_use]
pub fn clean_date(date: Option<&str>) -> Option<String> {
    let date = NaiveDate::parse_from_str(date?.trim(), "%d/%m/%Y").ok()?;
    Some(date.format("%Y-%m-%d").to_string())
}

fn strip_suffix_ignore_case<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    let split = text.len().checked_sub(suffix.len())?;
    (text.is_char_boundary(split) && text[split..].eq_ignore_ascii_case(suffix))
        .then(|| &text[..split])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn size_in_hectares() {
        assert_eq!(clean_size(Some(&json!("1.2 ha"))), json!(1.2));
        assert_eq!(clean_size(Some(&json!("12HA "))), json!(12.0));
        assert_eq!(clean_size(Some(&json!("3"))), json!(3.0));
    }

    #[test]
    fn unparseable_size_is_null() {
        assert_eq!(clean_size(Some(&json!("about 5 ha"))), Value::Null);
        assert_eq!(clean_size(None), Value::Null);
    }

    #[test]
    fn numeric_size_passes_through() {
        assert_eq!(clean_size(Some(&json!(4.5))), json!(4.5));
    }

    #[test]
    fn strips_title_suffix() {
        assert_eq!(clean_title("Lane Cove NP HAZARD REDUCTION"), "Lane Cove NP");
        assert_eq!(clean_title("Lane Cove NP hazard reduction  "), "Lane Cove NP");
        assert_eq!(clean_title("Lane Cove NP"), "Lane Cove NP");
    }

    #[test]
    fn converts_dates() {
        assert_eq!(clean_date(Some("18/10/2020")).as_deref(), Some("2020-10-18"));
        assert_eq!(clean_date(Some("1/02/2021")).as_deref(), Some("2021-02-01"));
    }

    #[test]
    fn unparseable_date_is_none() {
        assert_eq!(clean_date(Some("soon")), None);
        assert_eq!(clean_date(Some("31/02/2021")), None);
        assert_eq!(clean_date(None), None);
    }
}
