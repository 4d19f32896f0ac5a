//! Configuration system for the NDI gauge
//! Canvas geometry, palette, summary endpoint shape and fetch policy

use ndi_gauge_shared::{GaugeError, IndexId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

pub mod parser;
pub mod validation;

pub use parser::{ConfigFormat, ConfigParser};
pub use validation::ConfigValidator;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

impl From<ConfigError> for GaugeError {
    fn from(err: ConfigError) -> Self {
        GaugeError::InvalidConfig {
            message: err.to_string(),
            field: None,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeConfig {
    /// Placeholder shown while the summary is outstanding
    pub loading_text: String,
    pub canvas: CanvasConfig,
    pub bar: BarConfig,
    pub axis: AxisConfig,
    pub palette: PaletteConfig,
    pub endpoint: EndpointConfig,
    pub fetch: FetchConfig,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            loading_text: "Loading data...".to_string(),
            canvas: CanvasConfig::default(),
            bar: BarConfig::default(),
            axis: AxisConfig::default(),
            palette: PaletteConfig::default(),
            endpoint: EndpointConfig::default(),
            fetch: FetchConfig::default(),
        }
    }
}

impl GaugeConfig {
    /// Validate and return the configuration
    pub fn validated(self) -> Result<Self> {
        ConfigValidator::validate(&self)?;
        Ok(self)
    }
}

/// Fixed drawing surface dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 200.0,
        }
    }
}

impl CanvasConfig {
    /// Horizontal position of the zero line; also the length of a full-scale bar
    pub fn midpoint(&self) -> f64 {
        self.width / 2.0
    }
}

/// Vertical band occupied by the value bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarConfig {
    pub top: f64,
    pub height: f64,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            top: 50.0,
            height: 130.0,
        }
    }
}

/// Reference lines and their -1 / 0 / 1 labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    /// Top of the reference lines; they run to the canvas bottom
    pub line_top: f64,
    pub label_baseline: f64,
    /// Horizontal inset of the edge labels
    pub label_inset: f64,
    pub font: String,
    pub color: String,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            line_top: 40.0,
            label_baseline: 20.0,
            label_inset: 5.0,
            font: "15px Arial".to_string(),
            color: "#000000".to_string(),
        }
    }
}

/// Accent colors keyed by index identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub accents: BTreeMap<String, String>,
    pub fallback: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        let mut accents = BTreeMap::new();
        accents.insert(IndexId::NDVI.to_string(), "#64c59d".to_string());

        Self {
            accents,
            fallback: "#add8e6".to_string(),
        }
    }
}

impl PaletteConfig {
    pub fn accent_for(&self, index: &IndexId) -> &str {
        self.accents
            .get(index.as_str())
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }
}

/// Shape of the summary endpoint: `{root}/{summary_segment}/{layer}/{index}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub summary_segment: String,
    pub time_param: String,
    pub other_time_param: String,
    /// Response member holding the scalar
    pub value_field: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            summary_segment: "mean".to_string(),
            time_param: "time".to_string(),
            other_time_param: "otherTime".to_string(),
            value_field: "answer".to_string(),
        }
    }
}

/// What happens to a response that arrives after newer props were presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Drop superseded responses; a cached pair presented mid-fetch is drawn at once
    #[default]
    Ignore,
    /// Every response writes its own cache slot and draws, last one to resolve wins
    LastWriteWins,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub stale_responses: StalePolicy,
}
