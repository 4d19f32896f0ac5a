//! WASM bridge for the NDI gauge widget
//!
//! Binds a JavaScript map layer and a DOM canvas to the index comparison
//! widget. Everything here is browser-only; native builds get an empty crate.

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod polygon;
#[cfg(target_arch = "wasm32")]
mod widget;

#[cfg(target_arch = "wasm32")]
pub use polygon::{JsPolygon, JsStats};
#[cfg(target_arch = "wasm32")]
pub use widget::IndexComparisonWidget;
