//! The drawn-polygon collaborator

use crate::cache::{StatsCache, StatsStore};
use ndi_gauge_shared::{ChartProps, GaugeResult, Geometry};

/// A user-drawn shape the gauge summarizes
///
/// Supplied and owned by the host map; the widget only reads its geometry and
/// service location and writes into its statistics cache.
pub trait PolygonSource {
    /// GeoJSON geometry of the shape (not the enclosing feature)
    fn geometry(&self) -> GaugeResult<Geometry>;

    /// Root service URL and layer name used to build the summary endpoint
    fn chart_props(&self) -> GaugeResult<ChartProps>;

    fn stats(&self) -> &dyn StatsCache;

    /// Whether `other` refers to the same host shape
    ///
    /// Defaults to address identity. Wrappers that are rebuilt around one host
    /// object on every call compare the wrapped object instead.
    fn same_polygon(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        std::ptr::eq(self, other)
    }
}

/// In-memory polygon for native hosts
#[derive(Debug, Clone)]
pub struct DrawnPolygon {
    geometry: Geometry,
    chart_props: ChartProps,
    stats: StatsStore,
}

impl DrawnPolygon {
    pub fn new(geometry: Geometry, chart_props: ChartProps) -> Self {
        Self {
            geometry,
            chart_props,
            stats: StatsStore::new(),
        }
    }

    /// Attach an existing (possibly shared) statistics store
    pub fn with_stats(mut self, stats: StatsStore) -> Self {
        self.stats = stats;
        self
    }

    pub fn stats_store(&self) -> &StatsStore {
        &self.stats
    }
}

impl PolygonSource for DrawnPolygon {
    fn geometry(&self) -> GaugeResult<Geometry> {
        Ok(self.geometry.clone())
    }

    fn chart_props(&self) -> GaugeResult<ChartProps> {
        Ok(self.chart_props.clone())
    }

    fn stats(&self) -> &dyn StatsCache {
        &self.stats
    }
}
