//! Map-layer polygons seen through `js_sys::Reflect`

use js_sys::{Function, Object, Reflect};
use ndi_gauge_data::{PolygonSource, StatsCache};
use ndi_gauge_shared::{ChartProps, GaugeError, GaugeResult, Geometry, IndexId};
use wasm_bindgen::{JsCast, JsValue};

const STATS_KEY: &str = "stats";

fn property(target: &JsValue, key: &str) -> GaugeResult<JsValue> {
    Reflect::get(target, &JsValue::from_str(key)).map_err(|e| GaugeError::JsInterop {
        message: format!("Cannot read '{key}': {e:?}"),
    })
}

/// The layer's `stats` object, keyed by index name
pub struct JsStats {
    object: Object,
}

impl StatsCache for JsStats {
    fn get(&self, index: &IndexId) -> Option<f64> {
        Reflect::get(&self.object, &JsValue::from_str(index.as_str()))
            .ok()
            .and_then(|value| value.as_f64())
    }

    fn set(&self, index: &IndexId, value: f64) {
        let key = JsValue::from_str(index.as_str());
        if let Err(e) = Reflect::set(&self.object, &key, &JsValue::from_f64(value)) {
            log::warn!("Failed to cache {index} on polygon: {e:?}");
        }
    }
}

/// A drawn layer exposing `toGeoJSON()`, `chartProps` and `stats`
pub struct JsPolygon {
    layer: JsValue,
    stats: JsStats,
}

impl JsPolygon {
    /// Wrap `layer`, giving it an empty `stats` object if it has none
    pub fn new(layer: JsValue) -> GaugeResult<Self> {
        if !layer.is_object() {
            return Err(GaugeError::JsInterop {
                message: "polygon must be an object".to_string(),
            });
        }

        let existing = property(&layer, STATS_KEY)?;
        let object = if existing.is_object() {
            existing.unchecked_into::<Object>()
        } else {
            let fresh = Object::new();
            Reflect::set(&layer, &JsValue::from_str(STATS_KEY), &fresh).map_err(|e| {
                GaugeError::JsInterop {
                    message: format!("Cannot attach stats to polygon: {e:?}"),
                }
            })?;
            fresh
        };

        Ok(Self {
            layer,
            stats: JsStats { object },
        })
    }
}

impl PolygonSource for JsPolygon {
    fn geometry(&self) -> GaugeResult<Geometry> {
        let to_geojson = property(&self.layer, "toGeoJSON")?
            .dyn_into::<Function>()
            .map_err(|_| GaugeError::Geometry {
                message: "toGeoJSON is not a function".to_string(),
            })?;

        let feature = to_geojson
            .call0(&self.layer)
            .map_err(|e| GaugeError::Geometry {
                message: format!("toGeoJSON threw: {e:?}"),
            })?;

        serde_wasm_bindgen::from_value(property(&feature, "geometry")?).map_err(|e| {
            GaugeError::Geometry {
                message: e.to_string(),
            }
        })
    }

    fn chart_props(&self) -> GaugeResult<ChartProps> {
        serde_wasm_bindgen::from_value(property(&self.layer, "chartProps")?).map_err(|e| {
            GaugeError::JsInterop {
                message: format!("Invalid chartProps: {e}"),
            }
        })
    }

    fn stats(&self) -> &dyn StatsCache {
        &self.stats
    }

    /// Wrappers are rebuilt on every call, so compare the host layers
    fn same_polygon(&self, other: &Self) -> bool {
        Object::is(&self.layer, &other.layer)
    }
}
