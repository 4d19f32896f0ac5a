//! Shared types for the NDI gauge widget
//!
//! This crate contains the types passed between the data-manager, renderer
//! and integration crates: index and time identifiers, the layer-type
//! discriminator, the chart properties a polygon carries, and the GeoJSON
//! geometry posted to the summary service.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod data_types;
pub mod errors;

pub use data_types::{Geometry, Position};
pub use errors::{GaugeError, GaugeResult};

/// Normalized difference index requested from the summary service
///
/// The key doubles as the last path segment of the summary endpoint and as
/// the key of the polygon's statistics cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexId(String);

impl IndexId {
    pub const NDVI: &'static str = "ndvi";
    pub const NDWI: &'static str = "ndwi";

    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn ndvi() -> Self {
        Self::new(Self::NDVI)
    }

    pub fn ndwi() -> Self {
        Self::new(Self::NDWI)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for IndexId {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for IndexId {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Display for IndexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque time identifier understood by the summary service
///
/// Layers identify their time slices either by label ("2020-01") or by a
/// numeric id; both travel as query-string text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeId(String);

impl TimeId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TimeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TimeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for TimeId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for TimeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered pair of time identifiers
///
/// `primary` is always sent; `secondary` only in intra-layer difference mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Times {
    pub primary: TimeId,
    pub secondary: TimeId,
}

impl Times {
    pub fn new(primary: impl Into<TimeId>, secondary: impl Into<TimeId>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }
}

/// Layer-type discriminator supplied by the host application
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LayerType {
    /// Difference between two time slices of the same layer
    IntraLayerDiff,
    Other(String),
}

impl LayerType {
    pub const INTRA_LAYER_DIFF: &'static str = "intraLayerDiff";

    pub fn as_str(&self) -> &str {
        match self {
            LayerType::IntraLayerDiff => Self::INTRA_LAYER_DIFF,
            LayerType::Other(tag) => tag,
        }
    }

    pub fn is_intra_layer_diff(&self) -> bool {
        matches!(self, LayerType::IntraLayerDiff)
    }
}

impl From<&str> for LayerType {
    fn from(tag: &str) -> Self {
        if tag == Self::INTRA_LAYER_DIFF {
            LayerType::IntraLayerDiff
        } else {
            LayerType::Other(tag.to_string())
        }
    }
}

impl From<String> for LayerType {
    fn from(tag: String) -> Self {
        if tag == Self::INTRA_LAYER_DIFF {
            LayerType::IntraLayerDiff
        } else {
            LayerType::Other(tag)
        }
    }
}

impl From<LayerType> for String {
    fn from(layer_type: LayerType) -> Self {
        match layer_type {
            LayerType::IntraLayerDiff => LayerType::INTRA_LAYER_DIFF.to_string(),
            LayerType::Other(tag) => tag,
        }
    }
}

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service location carried by a drawn polygon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartProps {
    #[serde(rename = "rootURL")]
    pub root_url: String,
    #[serde(rename = "layerName")]
    pub layer_name: String,
}

impl ChartProps {
    pub fn new(root_url: impl Into<String>, layer_name: impl Into<String>) -> Self {
        Self {
            root_url: root_url.into(),
            layer_name: layer_name.into(),
        }
    }
}
