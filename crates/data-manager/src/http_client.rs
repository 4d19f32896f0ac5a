//! reqwest-backed summary transport
//!
//! reqwest drives the browser `fetch` API on wasm32 and hyper natively, so the
//! same transport serves both hosts. No timeout and no retry are configured.

use crate::fetcher::SummaryTransport;
use async_trait::async_trait;
use ndi_gauge_shared::{map_gauge_error, GaugeError, GaugeResult};
use reqwest::header::CONTENT_TYPE;
use url::Url;

#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an application-wide client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl SummaryTransport for HttpTransport {
    async fn post_json(&self, url: &Url, body: String) -> GaugeResult<String> {
        let response = map_gauge_error!(
            self.client
                .post(url.clone())
                .header(CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await,
            Network,
            "Summary request failed"
        )?;

        let status = response.status();
        if !status.is_success() {
            return Err(GaugeError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        map_gauge_error!(response.text().await, Network, "Failed to read summary body")
    }
}
