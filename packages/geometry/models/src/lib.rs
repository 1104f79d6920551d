#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared types for the geometry normalization engine.
//!
//! Holds the per-call [`NormalizeOptions`], the [`GeometryFamily`]
//! classification used when reducing mixed collections, and the
//! [`GeometryDiagnostic`] events reported for recoverable problems.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Default grow/shrink margin in meters used for sliver avoidance.
pub const DEFAULT_SLIVER_MARGIN_METERS: f64 = 25.0;

/// Options controlling a single `normalize_geometry` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct NormalizeOptions {
    /// Grow every polygon before union and shrink the result afterwards
    /// to close narrow gaps between near-coincident borders.
    pub avoid_slivers: bool,
    /// Grow/shrink distance in meters when `avoid_slivers` is set.
    pub sliver_margin_meters: f64,
    /// Maximum total number of polygon vertices handed to the union
    /// primitive. Inputs above the budget take the fallback path.
    pub union_vertex_budget: Option<usize>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            avoid_slivers: false,
            sliver_margin_meters: DEFAULT_SLIVER_MARGIN_METERS,
            union_vertex_budget: None,
        }
    }
}

/// Primitive geometry family used to group mixed collections.
///
/// Declaration order is the canonical member order of a reduced
/// `GeometryCollection`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GeometryFamily {
    /// `Point` and `MultiPoint`
    Point,
    /// `LineString` and `MultiLineString`
    LineString,
    /// `Polygon` and `MultiPolygon`
    Polygon,
    /// Anything that is not a primitive family (nested collections)
    Other,
}

impl GeometryFamily {
    /// Classifies a geometry value into its family.
    #[must_use]
    pub const fn of(value: &geojson::Value) -> Self {
        match value {
            geojson::Value::Point(_) | geojson::Value::MultiPoint(_) => Self::Point,
            geojson::Value::LineString(_) | geojson::Value::MultiLineString(_) => Self::LineString,
            geojson::Value::Polygon(_) | geojson::Value::MultiPolygon(_) => Self::Polygon,
            geojson::Value::GeometryCollection(_) => Self::Other,
        }
    }

    /// Returns all variants in canonical order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Point, Self::LineString, Self::Polygon, Self::Other]
    }
}

/// A recoverable problem found while normalizing one geometry.
///
/// None of these abort normalization; the affected part is dropped or
/// left unmerged and the event is handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryDiagnostic {
    /// A member of the geometry tree was malformed and was treated as
    /// empty.
    #[error("Malformed geometry at {path}: {message}")]
    InputShape {
        /// JSON path of the offending member (e.g. `geometries[1]`).
        path: String,
        /// Description of what was wrong.
        message: String,
    },

    /// The polygon union primitive failed; the polygons were kept
    /// separate.
    #[error("Union of {polygons} polygons failed: {message}")]
    UnionComputation {
        /// Number of polygons handed to the union.
        polygons: usize,
        /// Underlying cause.
        message: String,
    },

    /// The union input exceeded the configured vertex budget; the
    /// polygons were kept separate.
    #[error("Union input of {vertices} vertices exceeds budget of {budget}")]
    BudgetExceeded {
        /// Total vertex count of the union input.
        vertices: usize,
        /// Configured budget.
        budget: usize,
    },
}

impl GeometryDiagnostic {
    /// Returns `true` if the union fell back to unmerged polygons.
    #[must_use]
    pub const fn is_union_fallback(&self) -> bool {
        matches!(
            self,
            Self::UnionComputation { .. } | Self::BudgetExceeded { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_families() {
        assert_eq!(
            GeometryFamily::of(&geojson::Value::Point(vec![1.0, 2.0])),
            GeometryFamily::Point
        );
        assert_eq!(
            GeometryFamily::of(&geojson::Value::MultiLineString(vec![])),
            GeometryFamily::LineString
        );
        assert_eq!(
            GeometryFamily::of(&geojson::Value::MultiPolygon(vec![])),
            GeometryFamily::Polygon
        );
        assert_eq!(
            GeometryFamily::of(&geojson::Value::GeometryCollection(vec![])),
            GeometryFamily::Other
        );
    }

    #[test]
    fn family_order_is_canonical() {
        let mut families = vec![
            GeometryFamily::Other,
            GeometryFamily::Polygon,
            GeometryFamily::Point,
            GeometryFamily::LineString,
        ];
        families.sort();
        assert_eq!(families, GeometryFamily::all());
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: NormalizeOptions =
            serde_json::from_str(r#"{"avoid_slivers": true}"#).unwrap();
        assert!(options.avoid_slivers);
        assert!((options.sliver_margin_meters - DEFAULT_SLIVER_MARGIN_METERS).abs() < f64::EPSILON);
        assert_eq!(options.union_vertex_budget, None);
    }

    #[test]
    fn union_fallback_classification() {
        let d = GeometryDiagnostic::BudgetExceeded {
            vertices: 10,
            budget: 5,
        };
        assert!(d.is_union_fallback());
        assert_eq!(
            d.to_string(),
            "Union input of 10 vertices exceeds budget of 5"
        );
        let d = GeometryDiagnostic::InputShape {
            path: "geometries[0]".to_string(),
            message: "missing type".to_string(),
        };
        assert!(!d.is_union_fallback());
    }
}
