//! 2D gauge renderer
//!
//! Draws the diverging index bar and its -1 / 0 / 1 reference axis onto any
//! [`DrawSurface`]. The browser canvas context implements the trait on wasm32;
//! [`RecordingSurface`] captures draw calls everywhere else.

pub mod gauge;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub mod web_canvas;

pub use gauge::GaugeRenderer;
pub use surface::{DrawCommand, DrawSurface, RecordingSurface, Rect, TextAlign};
