#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Converts the NSW RFS hazard reduction feed to `GeoJSON`.
//!
//! Every record becomes one feature with the burn outline as geometry, the
//! `guarReference` as id, and cleaned size, title and date attributes.

pub mod fields;
pub mod polygon;

use fire_feed_hazard_reduction_models::{HazardReductionFeed, HazardReductionRecord};
use geojson::{Feature, FeatureCollection, Geometry, feature::Id};
use serde_json::{Map, Value};

pub use fire_feed_hazard_reduction_models as models;

/// Errors that can occur while converting the hazard reduction feed.
#[derive(Debug, thiserror::Error)]
pub enum HazardReductionError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parses the feed from JSON text and converts it.
///
/// # Errors
///
/// * If `json` is not a valid hazard reduction feed
pub fn to_geojson_str(json: &str) -> Result<FeatureCollection, HazardReductionError> {
    let feed: HazardReductionFeed = serde_json::from_str(json)?;
    Ok(to_geojson(&feed))
}

/// Converts a parsed feed into a `FeatureCollection`.
#[must_use]
pub fn to_geojson(feed: &HazardReductionFeed) -> FeatureCollection {
    let features: Vec<Feature> = feed.results.iter().map(to_feature).collect();
    log::debug!("Converted {} hazard reduction records", features.len());

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn to_feature(record: &HazardReductionRecord) -> Feature {
    let mut polygons: Vec<_> = record
        .polygons
        .iter()
        .map(|p| polygon::parse_polygon(&p.polygon))
        .collect();

    let value = if record.geometry_type.as_deref() == Some("Polygon") && polygons.len() == 1 {
        geojson::Value::Polygon(polygons.remove(0))
    } else {
        geojson::Value::MultiPolygon(polygons)
    };

    let mut properties = Map::new();
    properties.insert("leadAgency".to_string(), or_null(record.lead_agency.as_ref()));
    properties.insert(
        "supportingAgencies".to_string(),
        or_null(record.supporting_agencies.as_ref()),
    );
    properties.insert("size".to_string(), fields::clean_size(record.size.as_ref()));
    properties.insert(
        "title".to_string(),
        record
            .location
            .as_deref()
            .map_or(Value::Null, |location| Value::String(fields::clean_title(location))),
    );
    properties.insert("tenure".to_string(), or_null(record.tenure.as_ref()));
    properties.insert(
        "startDate".to_string(),
        fields::clean_date(record.start_date.as_deref()).map_or(Value::Null, Value::String),
    );
    properties.insert(
        "endDate".to_string(),
        fields::clean_date(record.end_date.as_deref()).map_or(Value::Null, Value::String),
    );

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: record.guar_reference.as_ref().and_then(feature_id),
        properties: Some(properties),
        foreign_members: None,
    }
}

fn or_null(value: Option<&Value>) -> Value {
    value.cloned().unwrap_or(Value::Null)
}

fn feature_id(value: &Value) -> Option<Id> {
    match value {
        Value::String(id) => Some(Id::String(id.clone())),
        Value::Number(id) => Some(Id::Number(id.clone())),
        _ => None,
    }
}
