//! Data layer for the NDI gauge
//! Polygon collaborator capabilities, summary endpoint construction and the
//! one-shot POST/JSON round trip that produces an index scalar

pub mod cache;
pub mod endpoint;
pub mod fetcher;
pub mod http_client;
pub mod polygon;

pub use cache::{StatsCache, StatsStore};
pub use endpoint::summary_url;
pub use fetcher::{parse_summary, SummaryFetcher, SummaryRequest, SummaryTransport};
pub use http_client::HttpTransport;
pub use polygon::{DrawnPolygon, PolygonSource};
