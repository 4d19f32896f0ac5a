//! What the host should display for the widget's current state

use ndi_gauge_config::CanvasConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasElement {
    pub width: f64,
    pub height: f64,
    pub hidden: bool,
}

/// Loading placeholder plus the gauge canvas
///
/// The canvas is always present so its drawing context stays valid; it is
/// only hidden while the summary is outstanding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Markup {
    pub loading_text: Option<String>,
    pub canvas: CanvasElement,
}

impl Markup {
    pub fn for_state(loaded: bool, loading_text: &str, canvas: &CanvasConfig) -> Self {
        Self {
            loading_text: (!loaded).then(|| loading_text.to_string()),
            canvas: CanvasElement {
                width: canvas.width,
                height: canvas.height,
                hidden: !loaded,
            },
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading_text.is_some()
    }
}
