//! Drawing surface abstraction

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in surface units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Horizontal anchoring of text relative to its x coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Start,
    Center,
    Right,
}

impl TextAlign {
    /// Canvas `textAlign` keyword
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Start => "start",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// The subset of the canvas 2D API the gauge needs
///
/// Fill style, font and alignment are sticky state, as on a canvas context.
pub trait DrawSurface {
    fn clear_rect(&mut self, rect: Rect);

    fn set_fill_style(&mut self, color: &str);

    fn fill_rect(&mut self, rect: Rect);

    fn set_font(&mut self, font: &str);

    fn set_text_align(&mut self, align: TextAlign);

    fn fill_text(&mut self, text: &str, x: f64, y: f64);

    /// Stroke a single straight segment as its own path
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64));
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    ClearRect(Rect),
    SetFillStyle { color: String },
    FillRect(Rect),
    SetFont { font: String },
    SetTextAlign { align: TextAlign },
    FillText { text: String, x: f64, y: f64 },
    StrokeLine { from: (f64, f64), to: (f64, f64) },
}

/// Headless surface that records every call
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded calls
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Rectangles filled so far, paired with the fill style active at the time
    pub fn filled_rects(&self) -> Vec<(String, Rect)> {
        let mut fill = String::new();
        let mut rects = Vec::new();
        for command in &self.commands {
            match command {
                DrawCommand::SetFillStyle { color } => fill = color.clone(),
                DrawCommand::FillRect(rect) => rects.push((fill.clone(), *rect)),
                _ => {}
            }
        }
        rects
    }

    /// Number of completed frames, counted by full-surface clears
    pub fn clear_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::ClearRect(_)))
            .count()
    }
}

impl DrawSurface for RecordingSurface {
    fn clear_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::ClearRect(rect));
    }

    fn set_fill_style(&mut self, color: &str) {
        self.commands.push(DrawCommand::SetFillStyle {
            color: color.to_string(),
        });
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::FillRect(rect));
    }

    fn set_font(&mut self, font: &str) {
        self.commands.push(DrawCommand::SetFont {
            font: font.to_string(),
        });
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.commands.push(DrawCommand::SetTextAlign { align });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64)) {
        self.commands.push(DrawCommand::StrokeLine { from, to });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_rects_track_fill_style() {
        let mut surface = RecordingSurface::new();
        surface.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0));
        surface.set_fill_style("#ff0000");
        surface.fill_rect(Rect::new(1.0, 1.0, 2.0, 2.0));

        let rects = surface.filled_rects();
        assert_eq!(rects[0].0, "");
        assert_eq!(rects[1], ("#ff0000".to_string(), Rect::new(1.0, 1.0, 2.0, 2.0)));
    }

    #[test]
    fn test_take_commands_drains() {
        let mut surface = RecordingSurface::new();
        surface.clear_rect(Rect::new(0.0, 0.0, 300.0, 200.0));
        assert_eq!(surface.clear_count(), 1);

        assert_eq!(surface.take_commands().len(), 1);
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn test_command_serialization() {
        let json = serde_json::to_string(&DrawCommand::SetTextAlign {
            align: TextAlign::Center,
        })
        .unwrap();
        assert_eq!(json, r#"{"op":"set_text_align","align":"center"}"#);
    }
}
