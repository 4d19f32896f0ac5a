//! Configuration validation utilities

use crate::{ConfigError, GaugeConfig, Result};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration
    pub fn validate(config: &GaugeConfig) -> Result<()> {
        Self::validate_canvas(config)?;
        Self::validate_axis(config)?;
        Self::validate_palette(config)?;
        Self::validate_endpoint(config)?;
        Ok(())
    }

    fn validate_canvas(config: &GaugeConfig) -> Result<()> {
        let canvas = &config.canvas;
        for (name, value) in [("width", canvas.width), ("height", canvas.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Validation(format!(
                    "Invalid canvas {}: {}. Must be a positive number",
                    name, value
                )));
            }
        }

        let bar = &config.bar;
        if !bar.top.is_finite() || !bar.height.is_finite() || bar.height <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "Invalid bar band: top {} height {}",
                bar.top, bar.height
            )));
        }

        if bar.top < 0.0 || bar.top + bar.height > canvas.height {
            return Err(ConfigError::Validation(format!(
                "Bar band [{}, {}] does not fit a canvas of height {}",
                bar.top,
                bar.top + bar.height,
                canvas.height
            )));
        }

        Ok(())
    }

    fn validate_axis(config: &GaugeConfig) -> Result<()> {
        let axis = &config.axis;

        if !axis.line_top.is_finite()
            || axis.line_top < 0.0
            || axis.line_top >= config.canvas.height
        {
            return Err(ConfigError::Validation(format!(
                "Invalid axis line top: {}. Must lie inside the canvas",
                axis.line_top
            )));
        }

        if !axis.label_inset.is_finite()
            || axis.label_inset < 0.0
            || axis.label_inset * 2.0 >= config.canvas.width
        {
            return Err(ConfigError::Validation(format!(
                "Invalid label inset: {}",
                axis.label_inset
            )));
        }

        if !axis.label_baseline.is_finite() {
            return Err(ConfigError::Validation(format!(
                "Invalid label baseline: {}",
                axis.label_baseline
            )));
        }

        if axis.font.trim().is_empty() {
            return Err(ConfigError::Validation("Axis font cannot be empty".to_string()));
        }

        if axis.color.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Axis color cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_palette(config: &GaugeConfig) -> Result<()> {
        let palette = &config.palette;

        if palette.fallback.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Fallback accent color cannot be empty".to_string(),
            ));
        }

        if let Some((index, _)) = palette
            .accents
            .iter()
            .find(|(index, color)| index.is_empty() || color.trim().is_empty())
        {
            return Err(ConfigError::Validation(format!(
                "Accent entry for index '{}' is incomplete",
                index
            )));
        }

        Ok(())
    }

    fn validate_endpoint(config: &GaugeConfig) -> Result<()> {
        let endpoint = &config.endpoint;

        if endpoint.summary_segment.is_empty() || endpoint.summary_segment.contains('/') {
            return Err(ConfigError::Validation(format!(
                "Invalid summary segment: '{}'. Must be a single path segment",
                endpoint.summary_segment
            )));
        }

        for (name, value) in [
            ("time_param", &endpoint.time_param),
            ("other_time_param", &endpoint.other_time_param),
            ("value_field", &endpoint.value_field),
        ] {
            if value.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "Missing required endpoint setting: {}",
                    name
                )));
            }
        }

        if endpoint.time_param == endpoint.other_time_param {
            return Err(ConfigError::Validation(format!(
                "time_param and other_time_param are both '{}'",
                endpoint.time_param
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&GaugeConfig::default()).is_ok());
    }

    #[test]
    fn test_rejects_bar_outside_canvas() {
        let mut config = GaugeConfig::default();
        config.bar.height = 160.0;

        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(err.to_string().contains("does not fit"));
    }

    #[test]
    fn test_rejects_non_positive_canvas() {
        let mut config = GaugeConfig::default();
        config.canvas.height = f64::NAN;
        assert!(ConfigValidator::validate(&config).is_err());

        config.canvas.height = 200.0;
        config.canvas.width = -1.0;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_rejects_non_finite_axis() {
        let mut config = GaugeConfig::default();
        config.axis.line_top = f64::NAN;
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(err.to_string().contains("axis line top"));

        let mut config = GaugeConfig::default();
        config.axis.label_inset = f64::NAN;
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(err.to_string().contains("label inset"));

        let mut config = GaugeConfig::default();
        config.axis.label_baseline = f64::INFINITY;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_rejects_bad_endpoint() {
        let mut config = GaugeConfig::default();
        config.endpoint.other_time_param = "time".to_string();
        assert!(ConfigValidator::validate(&config).is_err());

        let mut config = GaugeConfig::default();
        config.endpoint.summary_segment = "stats/mean".to_string();
        assert!(ConfigValidator::validate(&config).is_err());

        let mut config = GaugeConfig::default();
        config.endpoint.value_field.clear();
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(err.to_string().contains("value_field"));
    }

    #[test]
    fn test_rejects_empty_accent() {
        let mut config = GaugeConfig::default();
        config.palette.accents.insert("ndwi".to_string(), " ".to_string());

        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(err.to_string().contains("ndwi"));
    }
}
