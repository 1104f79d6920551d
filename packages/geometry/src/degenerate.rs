//! Drops zero-area polygons from a flattened geometry list.
//!
//! The upstream feed occasionally emits polygons whose vertices all
//! coincide. Those are rendering artifacts, not geography, and would
//! poison the union.

use geo::{Area, Polygon};

use crate::coords::ring_to_line_string;
use crate::flatten::FlatEntry;

/// Minimum number of positions in a closed ring.
pub const MIN_RING_POSITIONS: usize = 4;

/// Removes degenerate polygons from `entries`.
///
/// A `Polygon` is dropped when its exterior ring is invalid; invalid
/// interior rings are removed from otherwise valid polygons. All other
/// entries, including null markers, pass through unchanged.
#[must_use]
pub fn drop_degenerate(entries: Vec<FlatEntry>) -> Vec<FlatEntry> {
    let before = entries.len();

    let kept: Vec<FlatEntry> = entries
        .into_iter()
        .filter_map(|entry| match entry {
            Some(geojson::Value::Polygon(rings)) => {
                clean_polygon(rings).map(|rings| Some(geojson::Value::Polygon(rings)))
            }
            other => Some(other),
        })
        .collect();

    if kept.len() < before {
        log::debug!("Dropped {} degenerate polygon(s)", before - kept.len());
    }

    kept
}

/// Returns `true` if the polygon's exterior ring encloses no area or is
/// too short to be a closed ring.
#[must_use]
pub fn is_degenerate(rings: &[Vec<geojson::Position>]) -> bool {
    rings.first().is_none_or(|exterior| !is_valid_ring(exterior))
}

fn clean_polygon(mut rings: geojson::PolygonType) -> Option<geojson::PolygonType> {
    if is_degenerate(&rings) {
        return None;
    }

    let mut index = 0;
    rings.retain(|ring| {
        let keep = index == 0 || is_valid_ring(ring);
        index += 1;
        keep
    });

    Some(rings)
}

fn is_valid_ring(ring: &[geojson::Position]) -> bool {
    if ring.len() < MIN_RING_POSITIONS {
        return false;
    }

    ring_to_line_string(ring)
        .is_some_and(|line| Polygon::new(line, vec![]).unsigned_area() > 0.0)
}
