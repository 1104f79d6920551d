#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Types shared by the incident feed cleaner and its callers.
//!
//! Defines the cleaner configuration ([`CleanOptions`], loadable from
//! TOML), the incident status and alert level vocabularies used for
//! sorting, and the per-feature [`FeedWarning`] events.

use fire_feed_geometry_models::{GeometryDiagnostic, NormalizeOptions};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Configuration for a feed cleaning run.
///
/// Every field has a default so partial TOML files are accepted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct CleanOptions {
    /// Emit one feature per member instead of `GeometryCollection`
    /// geometries. Properties are duplicated across the new features.
    pub avoid_geometry_collections: bool,
    /// Round every ordinate to this many decimal places.
    pub precision: Option<u32>,
    /// Geometry normalization settings.
    pub geometry: NormalizeOptions,
}

/// Incident status as published in the feed's `status` field.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum IncidentStatus {
    /// Fire is spreading without containment.
    #[strum(serialize = "Out of control")]
    #[serde(rename = "Out of control")]
    OutOfControl,
    /// Crews are actively containing the fire.
    #[strum(serialize = "Being controlled")]
    #[serde(rename = "Being controlled")]
    BeingControlled,
    /// Fire is contained.
    #[strum(serialize = "Under control")]
    #[serde(rename = "Under control")]
    UnderControl,
}

impl IncidentStatus {
    /// Sort index of a raw status value. Lower is more important;
    /// unknown values sort as least important.
    #[must_use]
    pub fn sort_index(value: Option<&str>) -> u8 {
        match value.and_then(|v| v.parse::<Self>().ok()) {
            Some(Self::OutOfControl) => 0,
            Some(Self::BeingControlled) => 1,
            Some(Self::UnderControl) => 3,
            None => 4,
        }
    }
}

/// Alert level as published in the feed's `category` field.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum AlertLevel {
    /// Highest warning level.
    #[strum(serialize = "Emergency Warning")]
    #[serde(rename = "Emergency Warning")]
    EmergencyWarning,
    /// Conditions are changing; prepare to act.
    #[strum(serialize = "Watch and Act")]
    #[serde(rename = "Watch and Act")]
    WatchAndAct,
    /// General information.
    Advice,
    /// No alert applies.
    #[strum(serialize = "Not Applicable")]
    #[serde(rename = "Not Applicable")]
    NotApplicable,
}

impl AlertLevel {
    /// Sort index of a raw alert level value. Lower is more important;
    /// unknown values sort as least important.
    #[must_use]
    pub fn sort_index(value: Option<&str>) -> u8 {
        match value.and_then(|v| v.parse::<Self>().ok()) {
            Some(Self::EmergencyWarning) => 0,
            Some(Self::WatchAndAct) => 1,
            Some(Self::Advice) => 2,
            Some(Self::NotApplicable) => 3,
            None => 4,
        }
    }
}

/// A recoverable problem found while cleaning one feature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedWarning {
    /// Geometry normalization reported a problem.
    #[error("Feature {feature}: {diagnostic}")]
    Geometry {
        /// Index of the feature in the input collection.
        feature: usize,
        /// The underlying diagnostic.
        diagnostic: GeometryDiagnostic,
    },

    /// The feed's `category` and the description's `ALERT LEVEL` differ.
    #[error("Feature {feature}: category '{category}' differs from alert level '{alert_level}'")]
    AlertLevelMismatch {
        /// Index of the feature in the input collection.
        feature: usize,
        /// Value of the `category` property.
        category: String,
        /// Value unpacked from the description.
        alert_level: String,
    },

    /// A date field could not be parsed and was kept verbatim.
    #[error("Feature {feature}: unparseable {field} '{value}'")]
    UnparseableDate {
        /// Index of the feature in the input collection.
        feature: usize,
        /// Property name.
        field: String,
        /// Raw value.
        value: String,
    },
}

impl FeedWarning {
    /// Index of the feature the warning belongs to.
    #[must_use]
    pub const fn feature(&self) -> usize {
        match self {
            Self::Geometry { feature, .. }
            | Self::AlertLevelMismatch { feature, .. }
            | Self::UnparseableDate { feature, .. } => *feature,
        }
    }
}
