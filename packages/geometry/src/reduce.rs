//! Reduces a list of geometries to the simplest single geometry.
//!
//! Entries of one family become one multi-part geometry. Mixed families
//! become a `GeometryCollection` holding at most one member per family, in
//! the fixed order Point, LineString, Polygon, followed by anything else.

use geojson::Value;

/// Accumulates the members of one family and their coordinate parts.
struct Bucket<T> {
    members: Vec<Value>,
    parts: Vec<T>,
}

impl<T> Bucket<T> {
    const fn new() -> Self {
        Self {
            members: vec![],
            parts: vec![],
        }
    }

    fn add(&mut self, parts: Vec<T>, member: Value) {
        self.parts.extend(parts);
        self.members.push(member);
    }

    /// A lone member is kept as-is; several are promoted with `multi`.
    fn finish(mut self, multi: impl FnOnce(Vec<T>) -> Value) -> Option<Value> {
        match self.members.len() {
            0 => None,
            1 => self.members.pop(),
            _ => Some(multi(self.parts)),
        }
    }
}

/// Reduces `entries` to a single geometry.
///
/// * No entries yields `None`.
/// * A single entry is returned verbatim.
/// * Entries that all belong to one family are promoted to that family's
///   multi-part type, concatenating coordinates in order.
/// * Otherwise a `GeometryCollection` is built from one (possibly
///   promoted) member per family, followed by non-family members in
///   their original order.
#[must_use]
pub fn reduce(mut entries: Vec<Value>) -> Option<Value> {
    if entries.len() <= 1 {
        return entries.pop();
    }

    let mut points = Bucket::new();
    let mut lines = Bucket::new();
    let mut polygons = Bucket::new();
    let mut others = vec![];

    for entry in entries {
        match entry {
            Value::Point(p) => points.add(vec![p.clone()], Value::Point(p)),
            Value::MultiPoint(ps) => points.add(ps.clone(), Value::MultiPoint(ps)),
            Value::LineString(l) => lines.add(vec![l.clone()], Value::LineString(l)),
            Value::MultiLineString(ls) => lines.add(ls.clone(), Value::MultiLineString(ls)),
            Value::Polygon(p) => polygons.add(vec![p.clone()], Value::Polygon(p)),
            Value::MultiPolygon(ps) => polygons.add(ps.clone(), Value::MultiPolygon(ps)),
            Value::GeometryCollection(_) => others.push(entry),
        }
    }

    let mut members: Vec<Value> = [
        points.finish(Value::MultiPoint),
        lines.finish(Value::MultiLineString),
        polygons.finish(Value::MultiPolygon),
    ]
    .into_iter()
    .flatten()
    .collect();

    if members.len() == 1 && others.is_empty() {
        return members.pop();
    }

    members.extend(others);
    Some(Value::GeometryCollection(
        members.into_iter().map(geojson::Geometry::new).collect(),
    ))
}
