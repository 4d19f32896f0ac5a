//! Browser canvas backend

use crate::surface::{DrawSurface, Rect, TextAlign};
use web_sys::CanvasRenderingContext2d;

impl DrawSurface for CanvasRenderingContext2d {
    fn clear_rect(&mut self, rect: Rect) {
        CanvasRenderingContext2d::clear_rect(self, rect.x, rect.y, rect.width, rect.height);
    }

    fn set_fill_style(&mut self, color: &str) {
        self.set_fill_style_str(color);
    }

    fn fill_rect(&mut self, rect: Rect) {
        CanvasRenderingContext2d::fill_rect(self, rect.x, rect.y, rect.width, rect.height);
    }

    fn set_font(&mut self, font: &str) {
        CanvasRenderingContext2d::set_font(self, font);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        CanvasRenderingContext2d::set_text_align(self, align.as_css());
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        if let Err(e) = CanvasRenderingContext2d::fill_text(self, text, x, y) {
            log::error!("fillText failed for {text:?}: {e:?}");
        }
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64)) {
        self.begin_path();
        self.move_to(from.0, from.1);
        self.line_to(to.0, to.1);
        self.stroke();
    }
}
