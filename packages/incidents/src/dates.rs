//! Conversion of the feed's local date strings to RFC 3339.
//!
//! All feed times are wall-clock times in Sydney, so the offset switches
//! between `+11:00` (AEDT) and `+10:00` (AEST) with daylight saving.

use chrono::{NaiveDateTime, SecondsFormat, TimeZone};
use chrono_tz::Australia::Sydney;

/// Format of the `pubDate` property, e.g. `3/01/2018 5:20:00 AM`.
const PUB_DATE_FORMAT: &str = "%d/%m/%Y %I:%M:%S %p";

/// Format of the `UPDATED` description field, e.g. `3 Jan 2018 16:20`.
const UPDATED_FORMAT: &str = "%d %b %Y %H:%M";

/// Converts a `pubDate` value to RFC 3339.
#[must_use]
pub fn clean_pub_date(value: &str) -> Option<String> {
    sydney_to_rfc3339(value, PUB_DATE_FORMAT)
}

/// Converts an `UPDATED` description value to RFC 3339.
#[must_use]
pub fn clean_updated_date(value: &str) -> Option<String> {
    sydney_to_rfc3339(value, UPDATED_FORMAT)
}

fn sydney_to_rfc3339(value: &str, format: &str) -> Option<String> {
    let naive = NaiveDateTime::parse_from_str(value.trim(), format).ok()?;

    // Ambiguous times (the repeated hour when daylight saving ends)
    // resolve to the earlier instant.
    let local = Sydney.from_local_datetime(&naive).earliest()?;

    Some(local.to_rfc3339_opts(SecondsFormat::Secs, true))
}
