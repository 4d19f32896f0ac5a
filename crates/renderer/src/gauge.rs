//! Diverging index gauge
//!
//! A bar grows right of the zero line for positive values and left of it
//! otherwise; a full-scale value (|v| = 1) reaches the canvas edge. Values are
//! not clamped, so anything beyond [-1, 1] runs off the surface.

use crate::surface::{DrawSurface, Rect, TextAlign};
use ndi_gauge_config::{AxisConfig, BarConfig, CanvasConfig, GaugeConfig, PaletteConfig};
use ndi_gauge_shared::IndexId;

/// Renders one index scalar as a gauge frame
#[derive(Debug, Clone)]
pub struct GaugeRenderer {
    canvas: CanvasConfig,
    bar: BarConfig,
    axis: AxisConfig,
    palette: PaletteConfig,
}

impl GaugeRenderer {
    pub fn new(config: &GaugeConfig) -> Self {
        Self {
            canvas: config.canvas.clone(),
            bar: config.bar.clone(),
            axis: config.axis.clone(),
            palette: config.palette.clone(),
        }
    }

    pub fn canvas_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.canvas.width, self.canvas.height)
    }

    pub fn accent_color(&self, index: &IndexId) -> &str {
        self.palette.accent_for(index)
    }

    /// Rectangle covering `value` on the gauge
    pub fn bar_rect(&self, value: f64) -> Rect {
        let mid = self.canvas.midpoint();
        if value > 0.0 {
            Rect::new(mid, self.bar.top, value * mid, self.bar.height)
        } else {
            Rect::new(mid + value * mid, self.bar.top, value.abs() * mid, self.bar.height)
        }
    }

    /// Draw a complete frame
    ///
    /// Every frame starts by clearing the whole surface, so drawing the same
    /// input twice leaves the same picture.
    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S, value: f64, index: &IndexId) {
        surface.clear_rect(self.canvas_rect());

        if value.is_finite() {
            surface.set_fill_style(self.accent_color(index));
            surface.fill_rect(self.bar_rect(value));
        } else {
            log::warn!("Skipping gauge bar for non-finite {} value {}", index, value);
        }

        self.draw_axis(surface);
        log::trace!("Rendered {} gauge at {}", index, value);
    }

    fn draw_axis<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        let width = self.canvas.width;
        let mid = self.canvas.midpoint();
        let inset = self.axis.label_inset;

        surface.set_fill_style(&self.axis.color);
        surface.set_font(&self.axis.font);

        let ticks = [
            ("-1", TextAlign::Start, inset, 0.0),
            ("0", TextAlign::Center, mid, mid),
            ("1", TextAlign::Right, width - inset, width),
        ];

        for (label, align, label_x, line_x) in ticks {
            surface.set_text_align(align);
            surface.fill_text(label, label_x, self.axis.label_baseline);
            surface.stroke_line(
                (line_x, self.axis.line_top),
                (line_x, self.canvas.height),
            );
        }
    }
}

impl Default for GaugeRenderer {
    fn default() -> Self {
        Self::new(&GaugeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_positive_value_grows_right() {
        let renderer = GaugeRenderer::default();
        let mut surface = RecordingSurface::new();

        renderer.render(&mut surface, 0.4, &IndexId::ndvi());

        let rects = surface.filled_rects();
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].0, "#64c59d");
        assert_eq!(rects[0].1, Rect::new(150.0, 50.0, 60.0, 130.0));
    }

    #[test]
    fn test_negative_value_grows_left() {
        let renderer = GaugeRenderer::default();
        let mut surface = RecordingSurface::new();

        renderer.render(&mut surface, -0.5, &IndexId::ndwi());

        let (color, rect) = surface.filled_rects().remove(0);
        assert_eq!(color, "#add8e6");
        assert_eq!(rect, Rect::new(75.0, 50.0, 75.0, 130.0));
        assert_eq!(rect.right(), 150.0);
    }

    #[test]
    fn test_bar_geometry_across_domain() {
        let renderer = GaugeRenderer::default();

        for step in -20..=20 {
            let value = step as f64 / 20.0;
            let rect = renderer.bar_rect(value);

            let expected_x = if value >= 0.0 { 150.0 } else { 150.0 + value * 150.0 };
            assert!((rect.x - expected_x).abs() < EPSILON, "x for {value}");
            assert!((rect.width - value.abs() * 150.0).abs() < EPSILON, "width for {value}");
            assert_eq!(rect.y, 50.0);
            assert_eq!(rect.bottom(), 180.0);
        }
    }

    #[test]
    fn test_zero_draws_empty_bar_at_midpoint() {
        let rect = GaugeRenderer::default().bar_rect(0.0);
        assert_eq!(rect, Rect::new(150.0, 50.0, 0.0, 130.0));
    }

    #[test]
    fn test_out_of_range_values_overflow() {
        let renderer = GaugeRenderer::default();

        assert_eq!(renderer.bar_rect(1.5).right(), 375.0);
        assert_eq!(renderer.bar_rect(-2.0).x, -150.0);
    }

    #[test]
    fn test_frame_layout() {
        let renderer = GaugeRenderer::default();
        let mut surface = RecordingSurface::new();

        renderer.render(&mut surface, 0.4, &IndexId::ndvi());

        let commands = surface.commands();
        assert_eq!(
            commands[0],
            DrawCommand::ClearRect(Rect::new(0.0, 0.0, 300.0, 200.0))
        );

        let expected_axis = vec![
            DrawCommand::SetFillStyle {
                color: "#000000".to_string(),
            },
            DrawCommand::SetFont {
                font: "15px Arial".to_string(),
            },
            DrawCommand::SetTextAlign {
                align: TextAlign::Start,
            },
            DrawCommand::FillText {
                text: "-1".to_string(),
                x: 5.0,
                y: 20.0,
            },
            DrawCommand::StrokeLine {
                from: (0.0, 40.0),
                to: (0.0, 200.0),
            },
            DrawCommand::SetTextAlign {
                align: TextAlign::Center,
            },
            DrawCommand::FillText {
                text: "0".to_string(),
                x: 150.0,
                y: 20.0,
            },
            DrawCommand::StrokeLine {
                from: (150.0, 40.0),
                to: (150.0, 200.0),
            },
            DrawCommand::SetTextAlign {
                align: TextAlign::Right,
            },
            DrawCommand::FillText {
                text: "1".to_string(),
                x: 295.0,
                y: 20.0,
            },
            DrawCommand::StrokeLine {
                from: (300.0, 40.0),
                to: (300.0, 200.0),
            },
        ];
        assert_eq!(&commands[3..], expected_axis.as_slice());
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let renderer = GaugeRenderer::default();
        let mut surface = RecordingSurface::new();

        renderer.render(&mut surface, -0.3, &IndexId::ndvi());
        let first = surface.take_commands();
        renderer.render(&mut surface, -0.3, &IndexId::ndvi());
        let second = surface.take_commands();

        assert_eq!(first, second);
        assert!(matches!(first[0], DrawCommand::ClearRect(_)));
    }

    #[test]
    fn test_non_finite_value_skips_bar() {
        let renderer = GaugeRenderer::default();
        let mut surface = RecordingSurface::new();

        renderer.render(&mut surface, f64::NAN, &IndexId::ndvi());

        assert!(surface.filled_rects().is_empty());
        assert_eq!(surface.clear_count(), 1);
        assert!(surface
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::FillText { text, .. } if text == "0")));
    }

    #[test]
    fn test_layout_follows_canvas_config() {
        let mut config = GaugeConfig::default();
        config.canvas.width = 400.0;
        let renderer = GaugeRenderer::new(&config);

        assert_eq!(renderer.bar_rect(0.5), Rect::new(200.0, 50.0, 100.0, 130.0));
        assert_eq!(renderer.bar_rect(-1.0).x, 0.0);
    }
}
