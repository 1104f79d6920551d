#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Records of the NSW RFS hazard reduction JSON feed.
//!
//! The feed is a flat `{ "results": [...] }` document. Attribute values
//! are loosely typed upstream (`size` is usually `"1.2 ha"` but may be a
//! number), so pass-through attributes stay as raw JSON values.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The whole hazard reduction feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardReductionFeed {
    /// One entry per planned burn.
    #[serde(default)]
    pub results: Vec<HazardReductionRecord>,
}

/// A single planned hazard reduction burn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HazardReductionRecord {
    /// Upstream reference, used as the feature id.
    pub guar_reference: Option<Value>,
    /// Agency running the burn.
    pub lead_agency: Option<Value>,
    /// Other agencies involved.
    pub supporting_agencies: Option<Value>,
    /// Area, usually formatted like `"1.2 ha"`.
    pub size: Option<Value>,
    /// Location text, usually ending in `HAZARD REDUCTION`.
    pub location: Option<String>,
    /// Land tenure.
    pub tenure: Option<Value>,
    /// Planned start, formatted `d/MM/yyyy`.
    pub start_date: Option<String>,
    /// Planned end, formatted `d/MM/yyyy`.
    pub end_date: Option<String>,
    /// Declared geometry type, `Polygon` or `MultiPolygon`.
    pub geometry_type: Option<String>,
    /// Outline of the burn area.
    pub polygons: Vec<PolygonRecord>,
}

/// One polygon outline of a burn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolygonRecord {
    /// Pipe separated `lat;lng` pairs, e.g. `-33.1;151.2|-33.2;151.3`.
    #[serde(default)]
    pub polygon: String,
}
