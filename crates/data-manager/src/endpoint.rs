//! Summary endpoint construction
//!
//! `{rootURL}/{segment}/{layerName}/{index}?time={t0}[&otherTime={t1}]`

use ndi_gauge_config::EndpointConfig;
use ndi_gauge_shared::{ChartProps, GaugeError, GaugeResult, IndexId, LayerType, Times};
use url::Url;

/// Build the summary URL for one (polygon, index) pair
///
/// The secondary time is only sent for intra-layer differences. Path
/// segments and query values are percent-encoded.
pub fn summary_url(
    config: &EndpointConfig,
    props: &ChartProps,
    index: &IndexId,
    times: &Times,
    layer_type: &LayerType,
) -> GaugeResult<Url> {
    let mut url = Url::parse(&props.root_url)?;

    {
        let mut segments = url.path_segments_mut().map_err(|_| GaugeError::Endpoint {
            message: format!("Root URL cannot carry a path: {}", props.root_url),
        })?;
        segments
            .pop_if_empty()
            .push(&config.summary_segment)
            .push(&props.layer_name)
            .push(index.as_str());
    }

    {
        let mut query = url.query_pairs_mut();
        query.append_pair(&config.time_param, times.primary.as_str());
        if layer_type.is_intra_layer_diff() {
            query.append_pair(&config.other_time_param, times.secondary.as_str());
        }
    }

    Ok(url)
}
