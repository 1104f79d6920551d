#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Cleaner for the NSW RFS major incidents `GeoJSON` feed.
//!
//! [`clean`] takes the upstream feed and returns a simpler, more
//! consistent `FeatureCollection`:
//!
//! * geometries are normalized by [`fire_feed_geometry`], optionally
//!   exploded into one feature per collection member
//! * the overloaded `description` is unpacked into real properties and
//!   dates are converted to RFC 3339
//! * features get an `id` derived from their `guid`
//! * features are sorted so the most important incidents are drawn last
//! * polygon winding follows RFC 7946, with optional coordinate rounding

pub mod config;
pub mod coordinates;
pub mod dates;
pub mod description;
pub mod ordering;
pub mod properties;

use std::collections::BTreeMap;

use fire_feed_geometry::normalize_geometry;
use fire_feed_geometry_models::GeometryFamily;
use geojson::{Feature, FeatureCollection, Geometry, feature::Id};
use rayon::prelude::*;
use serde_json::{Map, Value};

pub use config::{load_options, parse_options};
pub use fire_feed_incidents_models::{AlertLevel, CleanOptions, FeedWarning, IncidentStatus};

/// Errors that abort a whole cleaning run.
///
/// Problems confined to a single feature are reported as
/// [`FeedWarning`]s instead.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (file read/write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML configuration is invalid.
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// The document is not a feature collection.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}

/// Counts describing a cleaned feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedSummary {
    /// Number of output features.
    pub features: usize,
    /// Output features without a geometry.
    pub null_geometries: usize,
    /// Output features per top-level geometry family.
    pub families: BTreeMap<GeometryFamily, usize>,
}

impl FeedSummary {
    fn of(features: &[Feature]) -> Self {
        let mut summary = Self {
            features: features.len(),
            ..Self::default()
        };

        for feature in features {
            match &feature.geometry {
                Some(geometry) => {
                    *summary
                        .families
                        .entry(GeometryFamily::of(&geometry.value))
                        .or_default() += 1;
                }
                None => summary.null_geometries += 1,
            }
        }

        summary
    }
}

/// The result of a cleaning run.
#[derive(Debug, Clone)]
pub struct CleanedFeed {
    /// The cleaned feature collection.
    pub collection: FeatureCollection,
    /// Per-feature problems, ordered by input feature index.
    pub warnings: Vec<FeedWarning>,
    /// Counts describing `collection`.
    pub summary: FeedSummary,
}

/// Parses and cleans a feed given as JSON text.
///
/// # Errors
///
/// * If `json` is not valid JSON
/// * If the document has no `features` array
pub fn clean_str(json: &str, options: &CleanOptions) -> Result<CleanedFeed, FeedError> {
    let feed: Value = serde_json::from_str(json)?;
    clean(&feed, options)
}

/// Cleans the incidents feed `feed`.
///
/// Features are cleaned in parallel; input order is kept until the final
/// stable sort.
///
/// # Errors
///
/// * If `feed` has no `features` array
/// * If any feature is not a JSON object
pub fn clean(feed: &Value, options: &CleanOptions) -> Result<CleanedFeed, FeedError> {
    let features = feed
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| FeedError::Conversion {
            message: "Feed has no features array".to_string(),
        })?;

    log::debug!("Cleaning {} features", features.len());

    let cleaned = features
        .par_iter()
        .enumerate()
        .map(|(index, feature)| clean_feature(index, feature, options))
        .collect::<Result<Vec<_>, _>>()?;

    let mut output = Vec::with_capacity(cleaned.len());
    let mut warnings = vec![];
    for (exploded, feature_warnings) in cleaned {
        output.extend(exploded);
        warnings.extend(feature_warnings);
    }

    ordering::sort_features(&mut output);

    let summary = FeedSummary::of(&output);
    log::info!(
        "Cleaned {} input features into {} features ({} without geometry, {} warnings)",
        features.len(),
        summary.features,
        summary.null_geometries,
        warnings.len()
    );

    Ok(CleanedFeed {
        collection: FeatureCollection {
            bbox: None,
            features: output,
            foreign_members: None,
        },
        warnings,
        summary,
    })
}

fn clean_feature(
    index: usize,
    feature: &Value,
    options: &CleanOptions,
) -> Result<(Vec<Feature>, Vec<FeedWarning>), FeedError> {
    let object = feature.as_object().ok_or_else(|| FeedError::Conversion {
        message: format!("Feature {index} is not an object"),
    })?;

    let mut warnings = vec![];

    let normalized = normalize_geometry(object.get("geometry"), &options.geometry);
    warnings.extend(
        normalized
            .diagnostics
            .into_iter()
            .map(|diagnostic| FeedWarning::Geometry {
                feature: index,
                diagnostic,
            }),
    );

    let raw_properties = object
        .get("properties")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    let properties = properties::clean_properties(raw_properties, index, &mut warnings);

    let id = object
        .get("id")
        .and_then(feature_id)
        .or_else(|| guid_id(&properties));

    let mut geometry = normalized.geometry;
    if let Some(value) = &mut geometry {
        coordinates::rewind(value);
        if let Some(precision) = options.precision {
            coordinates::round_coordinates(value, precision);
        }
    }

    let features = match geometry {
        Some(geojson::Value::GeometryCollection(members)) if options.avoid_geometry_collections => {
            log::trace!("Exploding feature {index} into {} features", members.len());
            members
                .into_iter()
                .map(|member| build_feature(Some(member), properties.clone(), id.clone()))
                .collect()
        }
        geometry => vec![build_feature(geometry.map(Geometry::new), properties, id)],
    };

    Ok((features, warnings))
}

fn build_feature(geometry: Option<Geometry>, properties: Map<String, Value>, id: Option<Id>) -> Feature {
    Feature {
        bbox: None,
        geometry,
        id,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn feature_id(value: &Value) -> Option<Id> {
    match value {
        Value::String(id) => Some(Id::String(id.clone())),
        Value::Number(id) => Some(Id::Number(id.clone())),
        _ => None,
    }
}

fn guid_id(properties: &Map<String, Value>) -> Option<Id> {
    properties
        .get("guid")
        .and_then(Value::as_str)
        .map(|guid| Id::String(ordering::incident_id(guid).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fire_feed_geometry_models::GeometryDiagnostic;
    use serde_json::json;

    fn incident(
        guid: &str,
        category: &str,
        status: &str,
        geometry: &Value,
    ) -> Value {
        json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "title": guid,
                "category": category,
                "guid": format!("https://incidents.rfs.nsw.gov.au/api/v1/incidents/{guid}"),
                "description": format!("ALERT LEVEL: {category} <br />STATUS: {status} <br />FIRE: Yes")
            }
        })
    }

    fn feed(features: Vec<Value>) -> Value {
        json!({ "type": "FeatureCollection", "features": features })
    }

    fn point(x: f64, y: f64) -> Value {
        json!({ "type": "Point", "coordinates": [x, y] })
    }

    fn ids(cleaned: &CleanedFeed) -> Vec<Id> {
        cleaned
            .collection
            .features
            .iter()
            .map(|f| f.id.clone().unwrap())
            .collect()
    }

    fn string_id(id: &str) -> Id {
        Id::String(id.to_string())
    }

    #[test]
    fn rejects_documents_without_features() {
        let err = clean(&json!({ "type": "Feature" }), &CleanOptions::default()).unwrap_err();
        assert!(matches!(err, FeedError::Conversion { .. }));
    }

    #[test]
    fn rejects_invalid_json_text() {
        let err = clean_str("{ not json", &CleanOptions::default()).unwrap_err();
        assert!(matches!(err, FeedError::Json(_)));
    }

    #[test]
    fn empty_feed_is_empty_collection() {
        let cleaned = clean(&feed(vec![]), &CleanOptions::default()).unwrap();
        assert!(cleaned.collection.features.is_empty());
        assert!(cleaned.warnings.is_empty());
        assert_eq!(cleaned.summary, FeedSummary::default());
    }

    #[test]
    fn derives_ids_and_sorts_important_last() {
        let cleaned = clean(
            &feed(vec![
                incident("1", "Emergency Warning", "Out of control", &point(0.0, 0.0)),
                incident("2", "Advice", "Under control", &point(1.0, 1.0)),
                incident("3", "Watch and Act", "Being controlled", &point(2.0, 2.0)),
            ]),
            &CleanOptions::default(),
        )
        .unwrap();

        assert_eq!(
            ids(&cleaned),
            vec![string_id("2"), string_id("3"), string_id("1")]
        );
        assert!(cleaned.warnings.is_empty());

        let props = cleaned.collection.features[2].properties.as_ref().unwrap();
        assert_eq!(props["alert-level"], json!("Emergency Warning"));
        assert_eq!(props["status"], json!("Out of control"));
        assert_eq!(props["fire"], json!(true));
        assert!(!props.contains_key("description"));
        assert!(!props.contains_key("category"));
    }

    #[test]
    fn existing_id_wins_over_guid() {
        let mut feature = incident("7", "Advice", "Under control", &point(0.0, 0.0));
        feature["id"] = json!(42);

        let cleaned = clean(&feed(vec![feature]), &CleanOptions::default()).unwrap();
        assert_eq!(ids(&cleaned), vec![Id::Number(42.into())]);
    }

    #[test]
    fn null_geometry_feature_is_kept() {
        let cleaned = clean(
            &feed(vec![incident("1", "Advice", "Under control", &Value::Null)]),
            &CleanOptions::default(),
        )
        .unwrap();

        assert_eq!(cleaned.collection.features.len(), 1);
        assert!(cleaned.collection.features[0].geometry.is_none());
        assert_eq!(cleaned.summary.null_geometries, 1);

        let json = serde_json::to_value(&cleaned.collection).unwrap();
        assert_eq!(json["features"][0]["geometry"], Value::Null);
    }

    #[test]
    fn feature_without_properties_is_cleaned() {
        let cleaned = clean(
            &feed(vec![json!({ "type": "Feature", "geometry": point(1.0, 2.0) })]),
            &CleanOptions::default(),
        )
        .unwrap();

        let feature = &cleaned.collection.features[0];
        assert!(feature.id.is_none());
        assert_eq!(feature.properties, Some(Map::new()));
    }

    fn mixed_geometry() -> Value {
        json!({
            "type": "GeometryCollection",
            "geometries": [
                { "type": "Point", "coordinates": [150.0, -33.0] },
                {
                    "type": "Polygon",
                    "coordinates": [[[150.0, -34.0], [150.0, -33.9], [150.1, -33.9], [150.1, -34.0], [150.0, -34.0]]]
                }
            ]
        })
    }

    #[test]
    fn keeps_collections_by_default() {
        let cleaned = clean(
            &feed(vec![incident("1", "Advice", "Under control", &mixed_geometry())]),
            &CleanOptions::default(),
        )
        .unwrap();

        assert_eq!(cleaned.collection.features.len(), 1);
        assert_eq!(
            cleaned.summary.families.get(&GeometryFamily::Other),
            Some(&1)
        );
    }

    #[test]
    fn explodes_collections_when_requested() {
        let options = CleanOptions {
            avoid_geometry_collections: true,
            ..CleanOptions::default()
        };
        let cleaned = clean(
            &feed(vec![
                incident("1", "Advice", "Under control", &mixed_geometry()),
                incident("2", "Advice", "Under control", &point(0.0, 0.0)),
            ]),
            &options,
        )
        .unwrap();

        let features = &cleaned.collection.features;
        assert_eq!(features.len(), 3);
        assert_eq!(
            ids(&cleaned),
            vec![string_id("1"), string_id("1"), string_id("2")]
        );
        assert_eq!(features[0].properties, features[1].properties);
        assert!(matches!(
            features[0].geometry.as_ref().unwrap().value,
            geojson::Value::Point(_)
        ));
        assert!(matches!(
            features[1].geometry.as_ref().unwrap().value,
            geojson::Value::Polygon(_)
        ));
        assert_eq!(cleaned.summary.families.get(&GeometryFamily::Point), Some(&2));
        assert_eq!(cleaned.summary.families.get(&GeometryFamily::Polygon), Some(&1));
    }

    #[test]
    fn enforces_winding_order() {
        let clockwise = json!({
            "type": "Polygon",
            "coordinates": [[[150.0, -34.0], [150.0, -33.9], [150.1, -33.9], [150.1, -34.0], [150.0, -34.0]]]
        });
        let cleaned = clean(
            &feed(vec![incident("1", "Advice", "Under control", &clockwise)]),
            &CleanOptions::default(),
        )
        .unwrap();

        let geojson::Value::Polygon(rings) = &cleaned.collection.features[0].geometry.as_ref().unwrap().value
        else {
            panic!("expected Polygon");
        };
        assert_eq!(rings[0][1], vec![150.1, -34.0]);
    }

    #[test]
    fn rounds_when_precision_is_set() {
        let options = CleanOptions {
            precision: Some(2),
            ..CleanOptions::default()
        };
        let cleaned = clean(
            &feed(vec![incident("1", "Advice", "Under control", &point(150.123_4, -33.987_6))]),
            &options,
        )
        .unwrap();

        let geojson::Value::Point(position) = &cleaned.collection.features[0].geometry.as_ref().unwrap().value
        else {
            panic!("expected Point");
        };
        assert!((position[0] - 150.12).abs() < 1e-9);
        assert!((position[1] + 33.99).abs() < 1e-9);
    }

    #[test]
    fn collects_warnings_in_feature_order() {
        let malformed = json!({
            "type": "GeometryCollection",
            "geometries": [{ "geometries": [] }, { "type": "Point", "coordinates": [1, 1] }]
        });
        let mut mismatched = incident("2", "Advice", "Under control", &point(0.0, 0.0));
        mismatched["properties"]["description"] = json!("ALERT LEVEL: Watch and Act");

        let cleaned = clean(
            &feed(vec![
                incident("1", "Advice", "Under control", &malformed),
                mismatched,
            ]),
            &CleanOptions::default(),
        )
        .unwrap();

        assert_eq!(cleaned.warnings.len(), 2);
        assert!(matches!(
            &cleaned.warnings[0],
            FeedWarning::Geometry { feature: 0, diagnostic: GeometryDiagnostic::InputShape { .. } }
        ));
        assert!(matches!(
            &cleaned.warnings[1],
            FeedWarning::AlertLevelMismatch { feature: 1, .. }
        ));
    }

    #[test]
    fn rejects_non_object_feature() {
        let err = clean(&feed(vec![json!(42)]), &CleanOptions::default()).unwrap_err();
        assert!(matches!(err, FeedError::Conversion { .. }));
    }
}
