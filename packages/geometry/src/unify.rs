//! Polygon union with optional sliver suppression.
//!
//! The feed splits single fire grounds into several polygons that share
//! artificial borders. This module merges them back with an exact planar
//! union. With sliver avoidance enabled every polygon is grown by a metric
//! margin before the union and the result is shrunk by the same margin,
//! closing hairline gaps between borders that almost, but not exactly,
//! coincide.
//!
//! A failing union never fails the feature: the input polygons are
//! returned unmerged and the failure is reported as a diagnostic.

use std::panic::{AssertUnwindSafe, catch_unwind};

use fire_feed_geometry_models::{GeometryDiagnostic, NormalizeOptions};
use geo::{Buffer, MultiPolygon, Polygon, unary_union};

use crate::coords::{polygon_to_rings, rings_to_polygon, vertex_count};
use crate::geodesic::{LocalProjection, ProjectionError, buffer_meters, buffer_multi_meters};

/// Unions `polygons` with [`geo::unary_union`].
///
/// Returns one entry (`Polygon` or `MultiPolygon`) on success, or one
/// `Polygon` entry per input polygon when the union fails or exceeds the
/// configured vertex budget.
#[must_use]
pub fn unify(
    polygons: &[geojson::PolygonType],
    options: &NormalizeOptions,
    diagnostics: &mut Vec<GeometryDiagnostic>,
) -> Vec<geojson::Value> {
    unify_with(polygons, options, diagnostics, |polygons| {
        unary_union(polygons)
    })
}

/// Same as [`unify`] but with a caller-supplied union primitive.
///
/// The primitive may panic; a panic is treated as a union failure, as is
/// a failure to project into the metric plane used for sliver avoidance.
pub fn unify_with<F>(
    polygons: &[geojson::PolygonType],
    options: &NormalizeOptions,
    diagnostics: &mut Vec<GeometryDiagnostic>,
    union: F,
) -> Vec<geojson::Value>
where
    F: Fn(&[Polygon<f64>]) -> MultiPolygon<f64>,
{
    if polygons.is_empty() {
        return vec![];
    }
    if polygons.len() == 1 {
        return vec![geojson::Value::Polygon(polygons[0].clone())];
    }

    let mut converted = Vec::with_capacity(polygons.len());
    let mut unconvertible = vec![];
    for rings in polygons {
        match rings_to_polygon(rings) {
            Some(polygon) => converted.push(polygon),
            None => unconvertible.push(geojson::Value::Polygon(rings.clone())),
        }
    }

    let vertices: usize = converted.iter().map(vertex_count).sum();
    if let Some(budget) = options.union_vertex_budget.filter(|budget| vertices > *budget) {
        log::warn!(
            "Union input of {vertices} vertices exceeds budget of {budget}, keeping polygons separate"
        );
        diagnostics.push(GeometryDiagnostic::BudgetExceeded { vertices, budget });
        return fallback(&converted, polygons, options, unconvertible);
    }

    let result = catch_unwind(AssertUnwindSafe(|| {
        if options.avoid_slivers {
            union_without_slivers(&converted, options.sliver_margin_meters, &union)
        } else {
            Ok(union(&converted))
        }
    }));

    let message = match result {
        Ok(Ok(unioned)) if !unioned.0.is_empty() => {
            let mut entries = vec![multi_polygon_to_value(unioned)];
            entries.extend(unconvertible);
            return entries;
        }
        Ok(Ok(_)) => "union produced no polygons".to_string(),
        Ok(Err(e)) => e.to_string(),
        Err(payload) => panic_message(payload.as_ref()),
    };

    log::warn!(
        "Failed to union {} polygons, keeping them separate: {message}",
        converted.len()
    );
    diagnostics.push(GeometryDiagnostic::UnionComputation {
        polygons: converted.len(),
        message,
    });

    fallback(&converted, polygons, options, unconvertible)
}

/// Grow, union, shrink, all in one shared metric projection so that the
/// grown polygons line up exactly where they meet.
fn union_without_slivers<F>(
    polygons: &[Polygon<f64>],
    margin_meters: f64,
    union: &F,
) -> Result<MultiPolygon<f64>, ProjectionError>
where
    F: Fn(&[Polygon<f64>]) -> MultiPolygon<f64>,
{
    let joint = MultiPolygon::new(polygons.to_vec());
    let Some(projection) = LocalProjection::for_polygons(&joint)? else {
        return Ok(MultiPolygon::new(vec![]));
    };

    let mut grown = Vec::with_capacity(polygons.len());
    for polygon in polygons {
        grown.extend(projection.project(polygon)?.buffer(margin_meters).0);
    }

    let unioned = union(&grown);
    projection.unproject(&unioned.buffer(-margin_meters))
}

/// Keeps every polygon as its own entry, individually grown and shrunk
/// when sliver avoidance is on.
fn fallback(
    converted: &[Polygon<f64>],
    original: &[geojson::PolygonType],
    options: &NormalizeOptions,
    unconvertible: Vec<geojson::Value>,
) -> Vec<geojson::Value> {
    let mut entries: Vec<geojson::Value> = if options.avoid_slivers {
        converted
            .iter()
            .flat_map(|polygon| {
                let margin = options.sliver_margin_meters;
                let corrected = catch_unwind(AssertUnwindSafe(|| {
                    buffer_meters(polygon, margin)
                        .and_then(|grown| buffer_multi_meters(&grown, -margin))
                }))
                .ok()
                .and_then(Result::ok)
                .filter(|corrected| !corrected.0.is_empty())
                .map_or_else(|| vec![polygon.clone()], |corrected| corrected.0);

                corrected
                    .into_iter()
                    .map(|p| geojson::Value::Polygon(polygon_to_rings(&p)))
            })
            .collect()
    } else {
        original
            .iter()
            .filter(|rings| rings_to_polygon(rings).is_some())
            .map(|rings| geojson::Value::Polygon(rings.clone()))
            .collect()
    };

    entries.extend(unconvertible);
    entries
}

fn multi_polygon_to_value(mut unioned: MultiPolygon<f64>) -> geojson::Value {
    if unioned.0.len() == 1 {
        let polygon = unioned.0.remove(0);
        geojson::Value::Polygon(polygon_to_rings(&polygon))
    } else {
        geojson::Value::MultiPolygon(unioned.0.iter().map(polygon_to_rings).collect())
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "union primitive panicked".to_string())
}
