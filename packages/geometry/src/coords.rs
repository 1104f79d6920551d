//! Conversions between `GeoJSON` positions and `geo` types.
//!
//! Positions shorter than two ordinates make the containing ring
//! unusable; conversions return `None` instead of indexing out of bounds.

use geo::{Coord, LineString, Polygon};

/// Converts a `GeoJSON` ring into a `geo` [`LineString`].
pub(crate) fn ring_to_line_string(ring: &[geojson::Position]) -> Option<LineString<f64>> {
    ring.iter()
        .map(|position| match position.as_slice() {
            [x, y, ..] => Some(Coord { x: *x, y: *y }),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()
        .map(LineString::new)
}

/// Converts `GeoJSON` polygon rings into a `geo` [`Polygon`].
///
/// The first ring is the exterior; the rest are holes.
pub(crate) fn rings_to_polygon(rings: &[Vec<geojson::Position>]) -> Option<Polygon<f64>> {
    let (exterior, interiors) = rings.split_first()?;
    let exterior = ring_to_line_string(exterior)?;
    let interiors = interiors
        .iter()
        .map(|ring| ring_to_line_string(ring))
        .collect::<Option<Vec<_>>>()?;
    Some(Polygon::new(exterior, interiors))
}

/// Converts a `geo` [`Polygon`] back into `GeoJSON` rings.
pub(crate) fn polygon_to_rings(polygon: &Polygon<f64>) -> geojson::PolygonType {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(|ring| ring.coords().map(|c| vec![c.x, c.y]).collect())
        .collect()
}

/// Number of vertices across all rings.
pub(crate) fn vertex_count(polygon: &Polygon<f64>) -> usize {
    polygon.exterior().0.len() + polygon.interiors().iter().map(|r| r.0.len()).sum::<usize>()
}
