//! `IndexComparisonWidget`, the JavaScript-facing widget

use crate::dom::apply_markup;
use crate::polygon::JsPolygon;
use ndi_gauge_config::{ConfigFormat, ConfigParser, GaugeConfig};
use ndi_gauge_data::HttpTransport;
use ndi_gauge_integration::{IndexComparison, Props, Transition};
use ndi_gauge_shared::{GaugeError, TimeId, Times};
use std::rc::Rc;
use std::sync::Once;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

static INIT: Once = Once::new();

fn init_runtime() {
    INIT.call_once(|| {
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));
        // Another bundle on the page may already own the logger
        let _ = console_log::init_with_level(log::Level::Info);
    });
}

fn to_js_error(error: GaugeError) -> JsValue {
    serde_wasm_bindgen::to_value(&error).unwrap_or_else(|_| JsValue::from_str(&error.to_string()))
}

/// Accept time ids given either as strings or as numbers
fn time_id(value: &JsValue) -> Result<TimeId, JsValue> {
    if let Some(label) = value.as_string() {
        return Ok(TimeId::from(label));
    }
    if let Some(number) = value.as_f64() {
        return Ok(TimeId::from(number.to_string()));
    }
    if value.is_undefined() || value.is_null() {
        return Ok(TimeId::from(""));
    }
    Err(JsValue::from_str("time must be a string or a number"))
}

fn transition_name(transition: Transition) -> &'static str {
    match transition {
        Transition::Drawn => "drawn",
        Transition::Fetching => "fetching",
        Transition::Stalled => "stalled",
        Transition::Unchanged => "unchanged",
    }
}

#[wasm_bindgen]
pub struct IndexComparisonWidget {
    inner: IndexComparison<HttpTransport, CanvasRenderingContext2d>,
}

#[wasm_bindgen]
impl IndexComparisonWidget {
    /// Build a widget drawing into `canvas`
    ///
    /// `config_json` overrides the default gauge configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        placeholder: Option<HtmlElement>,
        config_json: Option<String>,
    ) -> Result<IndexComparisonWidget, JsValue> {
        init_runtime();

        let config = match config_json {
            Some(json) => ConfigParser::parse_string(&json, ConfigFormat::Json),
            None => Ok(GaugeConfig::default()),
        }
        .and_then(GaugeConfig::validated)
        .map_err(|e| to_js_error(e.into()))?;

        canvas.set_width(config.canvas.width as u32);
        canvas.set_height(config.canvas.height as u32);

        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let inner = IndexComparison::new(config, HttpTransport::new(), context)
            .map_err(to_js_error)?;

        apply_markup(&canvas, placeholder.as_ref(), &inner.render());
        inner.on_markup_change(move |markup| apply_markup(&canvas, placeholder.as_ref(), markup));

        log::info!("Index comparison widget {} attached", inner.instance_id());
        Ok(Self { inner })
    }

    /// Returns the lifecycle transition taken: "drawn", "fetching", "stalled" or "unchanged"
    pub fn mount(
        &self,
        poly: JsValue,
        ndi: String,
        time: JsValue,
        other_time: JsValue,
        layer_type: String,
    ) -> Result<String, JsValue> {
        let props = Self::props(poly, ndi, &time, &other_time, layer_type)?;
        Ok(transition_name(self.inner.mount(props)).to_string())
    }

    #[wasm_bindgen(js_name = receiveProps)]
    pub fn receive_props(
        &self,
        poly: JsValue,
        ndi: String,
        time: JsValue,
        other_time: JsValue,
        layer_type: String,
    ) -> Result<String, JsValue> {
        let props = Self::props(poly, ndi, &time, &other_time, layer_type)?;
        Ok(transition_name(self.inner.receive_props(props)).to_string())
    }

    pub fn unmount(&self) {
        self.inner.unmount();
    }

    #[wasm_bindgen(js_name = isLoaded)]
    pub fn is_loaded(&self) -> bool {
        self.inner.is_loaded()
    }
}

impl IndexComparisonWidget {
    fn props(
        poly: JsValue,
        ndi: String,
        time: &JsValue,
        other_time: &JsValue,
        layer_type: String,
    ) -> Result<Props<JsPolygon>, JsValue> {
        let poly = JsPolygon::new(poly).map_err(to_js_error)?;
        let times = Times::new(time_id(time)?, time_id(other_time)?);

        Ok(Props::new(Rc::new(poly), ndi, times, layer_type))
    }
}
