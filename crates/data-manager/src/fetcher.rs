//! Polygonal summary fetcher
//!
//! One POST per (polygon, index) pair: the body is the polygon's GeoJSON
//! geometry, the response a JSON object carrying the scalar.

use crate::endpoint::summary_url;
use crate::polygon::PolygonSource;
use async_trait::async_trait;
use ndi_gauge_config::EndpointConfig;
use ndi_gauge_shared::{GaugeError, GaugeResult, IndexId, LayerType, Times};
use url::Url;

/// Moves a JSON body to the summary service and hands back the raw response text
///
/// Futures are not required to be `Send` so browser transports can implement it.
#[async_trait(?Send)]
pub trait SummaryTransport {
    async fn post_json(&self, url: &Url, body: String) -> GaugeResult<String>;
}

/// A fully built summary request
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRequest {
    pub url: Url,
    /// Serialized GeoJSON geometry
    pub body: String,
}

/// Fetches index summaries for drawn polygons
pub struct SummaryFetcher<T> {
    transport: T,
    endpoint: EndpointConfig,
}

impl<T: SummaryTransport> SummaryFetcher<T> {
    pub fn new(transport: T, endpoint: EndpointConfig) -> Self {
        Self {
            transport,
            endpoint,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request for a polygon without sending it
    pub fn request_for<P: PolygonSource + ?Sized>(
        &self,
        polygon: &P,
        index: &IndexId,
        times: &Times,
        layer_type: &LayerType,
    ) -> GaugeResult<SummaryRequest> {
        let props = polygon.chart_props()?;
        let url = summary_url(&self.endpoint, &props, index, times, layer_type)?;
        let body = polygon.geometry()?.to_json()?;

        Ok(SummaryRequest { url, body })
    }

    /// Send a request and extract the scalar
    pub async fn fetch(&self, request: &SummaryRequest) -> GaugeResult<f64> {
        log::debug!("Requesting summary from {}", request.url);

        let body = self
            .transport
            .post_json(&request.url, request.body.clone())
            .await?;

        parse_summary(&body, &self.endpoint.value_field)
    }
}

/// Extract the numeric `field` member from a summary response body
pub fn parse_summary(body: &str, field: &str) -> GaugeResult<f64> {
    let summary: serde_json::Value = serde_json::from_str(body)?;

    summary
        .get(field)
        .and_then(serde_json::Value::as_f64)
        .ok_or_else(|| GaugeError::SummaryParse {
            message: format!("Response has no numeric '{}' member", field),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::DrawnPolygon;
    use ndi_gauge_shared::{ChartProps, Geometry};
    use std::cell::RefCell;

    /// Records requests and replays a canned response
    struct CannedTransport {
        response: GaugeResult<String>,
        seen: RefCell<Vec<(Url, String)>>,
    }

    #[async_trait(?Send)]
    impl SummaryTransport for CannedTransport {
        async fn post_json(&self, url: &Url, body: String) -> GaugeResult<String> {
            self.seen.borrow_mut().push((url.clone(), body));
            self.response.clone()
        }
    }

    fn polygon() -> DrawnPolygon {
        DrawnPolygon::new(
            Geometry::polygon_from_ring(&[[10.0, 45.0], [11.0, 45.0], [11.0, 46.0]]),
            ChartProps::new("http://localhost:8080", "landsat"),
        )
    }

    fn fetcher(response: GaugeResult<String>) -> SummaryFetcher<CannedTransport> {
        SummaryFetcher::new(
            CannedTransport {
                response,
                seen: RefCell::new(Vec::new()),
            },
            EndpointConfig::default(),
        )
    }

    #[test]
    fn test_parse_summary() {
        assert_eq!(parse_summary(r#"{"answer": -0.25}"#, "answer").unwrap(), -0.25);
        assert_eq!(parse_summary(r#"{"answer": 1}"#, "answer").unwrap(), 1.0);

        assert!(parse_summary(r#"{"answer": null}"#, "answer").is_err());
        assert!(parse_summary(r#"{"answer": "0.4"}"#, "answer").is_err());
        assert!(parse_summary(r#"{"mean": 0.4}"#, "answer").is_err());
        assert!(matches!(
            parse_summary("<html>", "answer"),
            Err(GaugeError::SummaryParse { .. })
        ));
    }

    #[test]
    fn test_request_body_is_bare_geometry() {
        let fetcher = fetcher(Ok(String::new()));
        let request = fetcher
            .request_for(
                &polygon(),
                &IndexId::ndvi(),
                &Times::new("2020-01", "2020-06"),
                &LayerType::from("single"),
            )
            .unwrap();

        let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(body["type"], "Polygon");
        assert!(body.get("geometry").is_none());
        assert_eq!(request.url.path(), "/mean/landsat/ndvi");
    }

    #[tokio::test]
    async fn test_fetch_posts_once_and_parses() {
        let fetcher = fetcher(Ok(r#"{"answer":0.4}"#.to_string()));
        let request = fetcher
            .request_for(
                &polygon(),
                &IndexId::ndvi(),
                &Times::new("2020-01", "2020-06"),
                &LayerType::IntraLayerDiff,
            )
            .unwrap();

        let value = fetcher.fetch(&request).await.unwrap();

        assert_eq!(value, 0.4);
        let seen = fetcher.transport().seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0.query(), Some("time=2020-01&otherTime=2020-06"));
        assert_eq!(seen[0].1, request.body);
    }

    #[tokio::test]
    async fn test_fetch_propagates_transport_errors() {
        let fetcher = fetcher(Err(GaugeError::HttpStatus {
            status: 500,
            url: "http://localhost:8080/mean/landsat/ndvi".to_string(),
        }));
        let request = fetcher
            .request_for(
                &polygon(),
                &IndexId::ndvi(),
                &Times::new("2020-01", "2020-06"),
                &LayerType::from("single"),
            )
            .unwrap();

        let err = fetcher.fetch(&request).await.unwrap_err();
        assert!(matches!(err, GaugeError::HttpStatus { status: 500, .. }));
    }
}
