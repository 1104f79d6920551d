#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geometry normalization and polygon union engine.
//!
//! Reduces an arbitrarily nested, possibly mixed-type feed geometry to the
//! simplest faithful representation:
//!
//! 1. [`flatten`] expands nested `GeometryCollection`s into a flat list.
//! 2. [`degenerate`] drops zero-area polygons.
//! 3. [`unify`] merges polygons split along artificial shared borders,
//!    optionally growing and shrinking them to close slivers.
//! 4. [`reduce`] promotes same-family entries to multi-part geometries and
//!    assembles a minimal `GeometryCollection` otherwise.
//!
//! [`normalize_geometry`] runs the stages in order for one feature.

mod coords;
pub mod degenerate;
pub mod flatten;
pub mod geodesic;
pub mod normalize;
pub mod reduce;
pub mod unify;

pub use fire_feed_geometry_models::{
    DEFAULT_SLIVER_MARGIN_METERS, GeometryDiagnostic, GeometryFamily, NormalizeOptions,
};
pub use normalize::{Normalized, normalize_geometry, normalize_value};
