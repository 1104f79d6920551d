//! In-place coordinate fixes applied to cleaned geometries.

use geo::LineString;
use geo::winding_order::{Winding, WindingOrder};
use geojson::{PolygonType, Position, Value};

/// Enforces RFC 7946 winding order on every polygon ring of `value`:
/// exteriors counter-clockwise, holes clockwise.
///
/// Rings are reversed in place, so third ordinates survive. Open or
/// malformed rings have no winding order and are left alone.
pub fn rewind(value: &mut Value) {
    match value {
        Value::Polygon(rings) => rewind_polygon(rings),
        Value::MultiPolygon(polygons) => polygons.iter_mut().for_each(rewind_polygon),
        Value::GeometryCollection(members) => {
            for member in members {
                rewind(&mut member.value);
            }
        }
        Value::Point(_) | Value::MultiPoint(_) | Value::LineString(_) | Value::MultiLineString(_) => {}
    }
}

fn rewind_polygon(rings: &mut PolygonType) {
    for (index, ring) in rings.iter_mut().enumerate() {
        let wanted = if index == 0 {
            WindingOrder::CounterClockwise
        } else {
            WindingOrder::Clockwise
        };

        let line: Option<LineString<f64>> = ring
            .iter()
            .map(|position| match position.as_slice() {
                [x, y, ..] => Some((*x, *y)),
                _ => None,
            })
            .collect();

        if line
            .and_then(|line| line.winding_order())
            .is_some_and(|order| order != wanted)
        {
            ring.reverse();
        }
    }
}

/// Rounds every ordinate of `value` to `precision` decimal places.
pub fn round_coordinates(value: &mut Value, precision: u32) {
    let factor = 10_f64.powi(i32::try_from(precision).unwrap_or(i32::MAX));
    round_value(value, factor);
}

fn round_value(value: &mut Value, factor: f64) {
    match value {
        Value::Point(position) => round_position(position, factor),
        Value::MultiPoint(positions) | Value::LineString(positions) => {
            round_positions(positions, factor);
        }
        Value::MultiLineString(lines) | Value::Polygon(lines) => {
            for line in lines {
                round_positions(line, factor);
            }
        }
        Value::MultiPolygon(polygons) => {
            for ring in polygons.iter_mut().flatten() {
                round_positions(ring, factor);
            }
        }
        Value::GeometryCollection(members) => {
            for member in members {
                round_value(&mut member.value, factor);
            }
        }
    }
}

fn round_positions(positions: &mut [Position], factor: f64) {
    for position in positions {
        round_position(position, factor);
    }
}

fn round_position(position: &mut Position, factor: f64) {
    for ordinate in position.iter_mut() {
        let rounded = (*ordinate * factor).round() / factor;
        if rounded.is_finite() {
            *ordinate = rounded;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clockwise_square() -> Vec<Position> {
        vec![
            vec![0.0, 0.0, 5.0],
            vec![0.0, 4.0, 6.0],
            vec![4.0, 4.0, 7.0],
            vec![4.0, 0.0, 8.0],
            vec![0.0, 0.0, 5.0],
        ]
    }

    fn counter_clockwise_hole() -> Vec<Position> {
        vec![
            vec![1.0, 1.0],
            vec![2.0, 1.0],
            vec![2.0, 2.0],
            vec![1.0, 1.0],
        ]
    }

    #[test]
    fn reverses_clockwise_exterior_keeping_z() {
        let mut value = Value::Polygon(vec![clockwise_square()]);
        rewind(&mut value);

        let mut expected = clockwise_square();
        expected.reverse();
        assert_eq!(value, Value::Polygon(vec![expected]));
    }

    #[test]
    fn reverses_counter_clockwise_hole() {
        let mut exterior = clockwise_square();
        exterior.reverse();
        let mut value = Value::Polygon(vec![exterior.clone(), counter_clockwise_hole()]);
        rewind(&mut value);

        let mut hole = counter_clockwise_hole();
        hole.reverse();
        assert_eq!(value, Value::Polygon(vec![exterior, hole]));
    }

    #[test]
    fn correctly_wound_polygon_is_unchanged() {
        let mut exterior = clockwise_square();
        exterior.reverse();
        let mut hole = counter_clockwise_hole();
        hole.reverse();
        let original = Value::MultiPolygon(vec![vec![exterior, hole]]);

        let mut value = original.clone();
        rewind(&mut value);
        assert_eq!(value, original);
    }

    #[test]
    fn rewinds_inside_collections() {
        let mut value = Value::GeometryCollection(vec![
            geojson::Geometry::new(Value::Point(vec![1.0, 1.0])),
            geojson::Geometry::new(Value::Polygon(vec![clockwise_square()])),
        ]);
        rewind(&mut value);

        let Value::GeometryCollection(members) = value else {
            unreachable!();
        };
        let mut expected = clockwise_square();
        expected.reverse();
        assert_eq!(members[1].value, Value::Polygon(vec![expected]));
    }

    #[test]
    fn rounds_every_ordinate() {
        let mut value = Value::LineString(vec![
            vec![150.123_456_7, -33.987_654_3, 12.345_6],
            vec![151.0, -34.0],
        ]);
        round_coordinates(&mut value, 4);

        let Value::LineString(positions) = value else {
            unreachable!();
        };
        let expected = [vec![150.1235, -33.9877, 12.3456], vec![151.0, -34.0]];
        for (position, expected) in positions.iter().zip(&expected) {
            for (a, b) in position.iter().zip(expected) {
                assert!((a - b).abs() < 1e-9, "{a} != {b}");
            }
        }
    }

    #[test]
    fn zero_precision_rounds_to_integers() {
        let mut value = Value::Point(vec![1.6, -2.4]);
        round_coordinates(&mut value, 0);
        assert_eq!(value, Value::Point(vec![2.0, -2.0]));
    }
}
