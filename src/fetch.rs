use std::time::Duration;

use once_cell::sync::Lazy;

use crate::error::Result;

/// HTTP request timeout in seconds. Price lookup is best-effort, so a
/// single short attempt bounds the latency of item creation.
const FETCH_TIMEOUT_SECS: u64 = 10;

/// Browser-like identification; product pages routinely reject
/// obviously non-browser clients.
const USER_AGENT: &str = "Mozilla/5.0 (compatible; kago/0.1)";

/// Shared HTTP agent for connection pooling
static HTTP_AGENT: Lazy<ureq::Agent> = Lazy::new(|| {
    ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(FETCH_TIMEOUT_SECS)))
        .build()
        .into()
});

/// Fetch a product page as raw HTML.
///
/// Any network error, timeout, or non-2xx status is an `Err` here; the
/// price pipeline collapses all of them to "no price found". No retries:
/// a failed fetch is terminal for the query.
pub fn fetch_html(url: &str) -> Result<String> {
    // Reject anything that is not an absolute URL before going on the wire
    url::Url::parse(url)?;

    let response = HTTP_AGENT
        .get(url)
        .header("User-Agent", USER_AGENT)
        .call()?;

    let html = response.into_body().read_to_string()?;
    Ok(html)
}
