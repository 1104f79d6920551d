//! Metric buffering of longitude/latitude polygons.
//!
//! `geo::Buffer` works in the units of its input, so polygons are first
//! projected with PROJ into a local azimuthal equidistant plane (meters)
//! centred on their centroid, buffered there, and projected back.
//! Distances from the centre are exact on the WGS 84 ellipsoid, which
//! keeps the margin meaningful at any latitude.

use geo::{BoundingRect, Buffer, Centroid, Coord, MultiPolygon, Polygon};
use proj::{Proj, ProjCreateError, ProjError, Transform};

const GEOGRAPHIC_CRS: &str = "EPSG:4326";

/// Errors that can occur while moving geometries in and out of the local
/// metric plane.
#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    /// PROJ rejected the projection definition.
    #[error("Failed to create projection: {0}")]
    Create(#[from] ProjCreateError),

    /// A coordinate could not be reprojected.
    #[error("Reprojection failed: {0}")]
    Transform(#[from] ProjError),
}

/// Azimuthal equidistant projection around a fixed origin.
pub struct LocalProjection {
    origin: Coord<f64>,
    forward: Proj,
    inverse: Proj,
}

impl LocalProjection {
    /// Creates a projection centred on `origin` (degrees).
    ///
    /// # Errors
    ///
    /// * If PROJ cannot build a transformation for `origin`
    pub fn centered_on(origin: Coord<f64>) -> Result<Self, ProjectionError> {
        let local = format!(
            "+proj=aeqd +lat_0={} +lon_0={} +x_0=0 +y_0=0 +datum=WGS84 +units=m +no_defs +type=crs",
            origin.y, origin.x
        );

        Ok(Self {
            origin,
            forward: Proj::new_known_crs(GEOGRAPHIC_CRS, &local, None)?,
            inverse: Proj::new_known_crs(&local, GEOGRAPHIC_CRS, None)?,
        })
    }

    /// Creates a projection centred on the joint centroid of `polygons`.
    ///
    /// Falls back to the bounding box centre when the centroid is
    /// undefined (all polygons degenerate). Returns `Ok(None)` for empty
    /// input.
    ///
    /// # Errors
    ///
    /// * If PROJ cannot build a transformation for the centre
    pub fn for_polygons(polygons: &MultiPolygon<f64>) -> Result<Option<Self>, ProjectionError> {
        polygons
            .centroid()
            .map(|p| p.0)
            .or_else(|| polygons.bounding_rect().map(|rect| rect.center()))
            .map(Self::centered_on)
            .transpose()
    }

    /// Longitude/latitude of the projection centre.
    #[must_use]
    pub const fn origin(&self) -> Coord<f64> {
        self.origin
    }

    /// Projects a longitude/latitude coordinate into meters.
    ///
    /// # Errors
    ///
    /// * If PROJ fails to transform the coordinate
    pub fn forward(&self, coord: Coord<f64>) -> Result<Coord<f64>, ProjectionError> {
        Ok(self.forward.convert(coord)?)
    }

    /// Projects a coordinate in meters back to longitude/latitude.
    ///
    /// # Errors
    ///
    /// * If PROJ fails to transform the coordinate
    pub fn inverse(&self, coord: Coord<f64>) -> Result<Coord<f64>, ProjectionError> {
        Ok(self.inverse.convert(coord)?)
    }

    /// Projects a geometry into the local metric plane.
    ///
    /// # Errors
    ///
    /// * If PROJ fails to transform any coordinate
    pub fn project<G>(&self, geometry: &G) -> Result<G::Output, ProjectionError>
    where
        G: Transform<f64>,
    {
        Ok(geometry.transformed(&self.forward)?)
    }

    /// Projects a geometry from the local metric plane back to
    /// longitude/latitude.
    ///
    /// # Errors
    ///
    /// * If PROJ fails to transform any coordinate
    pub fn unproject<G>(&self, geometry: &G) -> Result<G::Output, ProjectionError>
    where
        G: Transform<f64>,
    {
        Ok(geometry.transformed(&self.inverse)?)
    }
}

/// Buffers a longitude/latitude polygon by `meters`.
///
/// Positive distances grow the polygon, negative distances shrink it.
/// The result may be empty when shrinking removes the whole polygon.
///
/// # Errors
///
/// * If the polygon cannot be projected to or from the metric plane
pub fn buffer_meters(polygon: &Polygon<f64>, meters: f64) -> Result<MultiPolygon<f64>, ProjectionError> {
    buffer_multi_meters(&MultiPolygon::new(vec![polygon.clone()]), meters)
}

/// Buffers a longitude/latitude multi-polygon by `meters`.
///
/// # Errors
///
/// * If the polygons cannot be projected to or from the metric plane
pub fn buffer_multi_meters(
    polygons: &MultiPolygon<f64>,
    meters: f64,
) -> Result<MultiPolygon<f64>, ProjectionError> {
    let Some(projection) = LocalProjection::for_polygons(polygons)? else {
        return Ok(MultiPolygon::new(vec![]));
    };

    let projected = projection.project(polygons)?;
    projection.unproject(&projected.buffer(meters))
}
