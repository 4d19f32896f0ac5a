//! GeoJSON geometry posted to the summary service
//!
//! Only the geometry object travels over the wire, never the enclosing
//! feature, so this covers the coordinate-carrying geometry kinds.

use serde::{Deserialize, Serialize};

/// A GeoJSON position: `[longitude, latitude]` with optional altitude
pub type Position = Vec<f64>;

/// GeoJSON geometry object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Position),
    MultiPoint(Vec<Position>),
    LineString(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
    Polygon(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
}

impl Geometry {
    /// Build a single-ring polygon, closing the ring if the caller left it open
    pub fn polygon_from_ring(ring: &[[f64; 2]]) -> Self {
        let mut positions: Vec<Position> = ring.iter().map(|p| p.to_vec()).collect();
        let closing = match (positions.first(), positions.last()) {
            (Some(first), Some(last)) if first != last => Some(first.clone()),
            _ => None,
        };
        positions.extend(closing);
        Geometry::Polygon(vec![positions])
    }

    /// Name of the GeoJSON `type` member
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }

    pub fn to_json(&self) -> crate::GaugeResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
