//! Expands nested `GeometryCollection`s into a flat, ordered list.
//!
//! Works on the raw JSON so that a single malformed member only costs
//! that member instead of the whole feature. The output order is a
//! depth-first pre-order traversal of the input tree.

use fire_feed_geometry_models::GeometryDiagnostic;
use serde_json::Value;

/// Collections nested deeper than this are truncated.
pub const MAX_FLATTEN_DEPTH: usize = 64;

/// A flattened entry. `None` marks an explicit `null` geometry.
pub type FlatEntry = Option<geojson::Value>;

/// Flattens a feature geometry into its primitive leaves.
///
/// * `None` (the feed had no geometry) yields an empty list.
/// * An explicit JSON `null` yields a single `None` entry.
/// * A primitive geometry yields itself.
/// * A `GeometryCollection` yields the concatenated leaves of its members;
///   an empty or missing member list yields nothing.
///
/// Malformed members are skipped and reported in `diagnostics`.
#[must_use]
pub fn flatten(
    geometry: Option<&Value>,
    diagnostics: &mut Vec<GeometryDiagnostic>,
) -> Vec<FlatEntry> {
    let mut entries = Vec::new();
    if let Some(geometry) = geometry {
        flatten_into(geometry, "geometry", 0, &mut entries, diagnostics);
    }
    entries
}

fn flatten_into(
    value: &Value,
    path: &str,
    depth: usize,
    entries: &mut Vec<FlatEntry>,
    diagnostics: &mut Vec<GeometryDiagnostic>,
) {
    let object = match value {
        Value::Null => {
            entries.push(None);
            return;
        }
        Value::Object(object) => object,
        _ => {
            report(diagnostics, path, "not a geometry object".to_string());
            return;
        }
    };

    let Some(kind) = object.get("type").and_then(Value::as_str) else {
        report(diagnostics, path, "missing type".to_string());
        return;
    };

    if kind != "GeometryCollection" {
        match geojson::Geometry::from_json_value(value.clone()) {
            Ok(geometry) => entries.push(Some(geometry.value)),
            Err(e) => report(diagnostics, path, e.to_string()),
        }
        return;
    }

    if depth >= MAX_FLATTEN_DEPTH {
        report(
            diagnostics,
            path,
            format!("collection nested deeper than {MAX_FLATTEN_DEPTH} levels"),
        );
        return;
    }

    match object.get("geometries") {
        None | Some(Value::Null) => {}
        Some(Value::Array(members)) => {
            for (i, member) in members.iter().enumerate() {
                let member_path = format!("{path}.geometries[{i}]");
                flatten_into(member, &member_path, depth + 1, entries, diagnostics);
            }
        }
        Some(_) => report(diagnostics, path, "geometries is not an array".to_string()),
    }
}

fn report(diagnostics: &mut Vec<GeometryDiagnostic>, path: &str, message: String) {
    log::warn!("Skipping malformed geometry at {path}: {message}");
    diagnostics.push(GeometryDiagnostic::InputShape {
        path: path.to_string(),
        message,
    });
}
