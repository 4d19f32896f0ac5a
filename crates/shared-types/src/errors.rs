//! Common error types used across all NDI gauge crates

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base error type for all gauge operations
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum GaugeError {
    // Polygon collaborator errors
    #[error("Polygon geometry unavailable: {message}")]
    Geometry { message: String },

    #[error("Invalid summary endpoint: {message}")]
    Endpoint { message: String },

    // Network errors
    #[error("Network request failed: {message}")]
    Network { message: String },

    #[error("Summary service responded with HTTP {status} (URL: {url})")]
    HttpStatus { status: u16, url: String },

    #[error("Summary parse error: {message}")]
    SummaryParse { message: String },

    // Configuration errors
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        message: String,
        field: Option<String>,
    },

    // WASM-specific errors
    #[error("JavaScript interop error: {message}")]
    JsInterop { message: String },
}

/// Result type alias for gauge operations
pub type GaugeResult<T> = Result<T, GaugeError>;

impl From<serde_json::Error> for GaugeError {
    fn from(err: serde_json::Error) -> Self {
        GaugeError::SummaryParse {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for GaugeError {
    fn from(err: url::ParseError) -> Self {
        GaugeError::Endpoint {
            message: err.to_string(),
        }
    }
}

/// Helper macro for converting Results to GaugeResult
#[macro_export]
macro_rules! map_gauge_error {
    ($result:expr, $error_variant:ident, $message:expr) => {
        $result.map_err(|e| $crate::errors::GaugeError::$error_variant {
            message: format!("{}: {}", $message, e),
        })
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = GaugeError::HttpStatus {
            status: 502,
            url: "https://api.example.com/mean/landsat/ndvi".to_string(),
        };

        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("HttpStatus"));
        assert!(json.contains("502"));
    }

    #[test]
    fn test_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let gauge_err: GaugeError = parse_err.into();

        match gauge_err {
            GaugeError::SummaryParse { message } => {
                assert!(message.contains("line 1"));
            }
            _ => panic!("Wrong error variant"),
        }
    }

    #[test]
    fn test_map_gauge_error_macro() {
        let result: Result<(), &str> = Err("connection refused");
        let mapped = map_gauge_error!(result, Network, "POST failed");

        assert_eq!(
            mapped.unwrap_err().to_string(),
            "Network request failed: POST failed: connection refused"
        );
    }
}
