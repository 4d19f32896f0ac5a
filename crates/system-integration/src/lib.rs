//! Index comparison widget
//!
//! Ties the summary fetcher, the gauge renderer and the polygon's statistics
//! cache together behind a mount / receive-props / unmount lifecycle.

pub mod lifecycle;
pub mod markup;
pub mod runtime;

pub use lifecycle::{IndexComparison, Props, Transition};
pub use markup::{CanvasElement, Markup};
