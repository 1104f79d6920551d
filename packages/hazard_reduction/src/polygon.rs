//! Parsing of the feed's `lat;lng|lat;lng` polygon strings.

use geojson::{PolygonType, Position};

/// Parses one polygon string into a single-ring `GeoJSON` polygon.
///
/// Pairs are separated by `|` and ordinates by `;`. Pieces shorter than
/// two characters are ignored and ordinates are swapped to `[lng, lat]`.
/// Pairs left with fewer than two numeric ordinates are dropped with a
/// warning.
#[must_use]
pub fn parse_polygon(polygon: &str) -> PolygonType {
    let ring: Vec<Position> = polygon
        .split('|')
        .filter_map(parse_pair)
        .collect();

    vec![ring]
}

fn parse_pair(pair: &str) -> Option<Position> {
    let mut position: Position = pair
        .split(';')
        .filter(|piece| piece.len() >= 2)
        .filter_map(|piece| {
            piece
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|ordinate| ordinate.is_finite())
                .or_else(|| {
                    log::warn!("Skipping non-numeric ordinate '{piece}'");
                    None
                })
        })
        .collect();

    if position.len() < 2 {
        if !pair.trim().is_empty() {
            log::warn!("Dropping position '{pair}' without both latitude and longitude");
        }
        return None;
    }

    position.reverse();
    Some(position)
}
