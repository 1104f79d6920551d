//! Per-feature orchestration of the normalization stages.

use fire_feed_geometry_models::{GeometryDiagnostic, NormalizeOptions};

use crate::{degenerate, flatten, reduce, unify};

/// The normalized geometry of one feature plus everything that went
/// wrong along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// The reduced geometry, or `None` when nothing usable remained.
    pub geometry: Option<geojson::Value>,
    /// Recoverable problems encountered while normalizing.
    pub diagnostics: Vec<GeometryDiagnostic>,
}

/// Normalizes one raw feature geometry.
///
/// `geometry` is `None` when the feature had no `geometry` member and
/// `Some(Value::Null)` when it was explicitly `null`; both normalize to
/// `None`.
#[must_use]
pub fn normalize_geometry(
    geometry: Option<&serde_json::Value>,
    options: &NormalizeOptions,
) -> Normalized {
    let mut diagnostics = vec![];

    let flat = flatten::flatten(geometry, &mut diagnostics);
    let mut entries: Vec<geojson::Value> = degenerate::drop_degenerate(flat)
        .into_iter()
        .flatten()
        .collect();

    if entries.len() <= 1 {
        return Normalized {
            geometry: entries.pop(),
            diagnostics,
        };
    }

    let (mut polygonal, mut unified): (Vec<_>, Vec<_>) = entries.into_iter().partition(|entry| {
        matches!(
            entry,
            geojson::Value::Polygon(_) | geojson::Value::MultiPolygon(_)
        )
    });

    // A lone polygonal entry is already a union result.
    if polygonal.len() == 1 {
        unified.append(&mut polygonal);
    } else if !polygonal.is_empty() {
        let polygons: Vec<geojson::PolygonType> = polygonal
            .into_iter()
            .flat_map(|entry| match entry {
                geojson::Value::Polygon(rings) => vec![rings],
                geojson::Value::MultiPolygon(parts) => parts,
                _ => vec![],
            })
            .collect();
        unified.extend(unify::unify(&polygons, options, &mut diagnostics));
    }

    Normalized {
        geometry: reduce::reduce(unified),
        diagnostics,
    }
}

/// Normalizes an already parsed geometry value.
#[must_use]
pub fn normalize_value(value: &geojson::Value, options: &NormalizeOptions) -> Normalized {
    let json = serde_json::Value::Object(geojson::JsonObject::from(&geojson::Geometry::new(
        value.clone(),
    )));
    normalize_geometry(Some(&json), options)
}
