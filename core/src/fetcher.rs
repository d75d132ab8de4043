//! Blocking HTTP execution.
//!
//! # Design
//! `HttpFetcher` is the seam between the pipeline and the network. It
//! returns non-200 responses as data (with an empty body) and leaves status
//! interpretation to `check_status`, the same split `NewsClient::parse_search`
//! uses for host-executed requests. `UreqFetcher` is the production
//! implementation; tests swap in canned fetchers.

use std::time::Instant;

use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::Timeouts;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Status the search endpoint answers with on success.
pub const STATUS_OK: u16 = 200;

/// Executes one `HttpRequest`.
pub trait HttpFetcher {
    /// Perform the GET. Only transport failures are errors; any status is a
    /// valid `HttpResponse`.
    fn fetch(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<F: HttpFetcher + ?Sized> HttpFetcher for &F {
    fn fetch(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).fetch(request)
    }
}

/// Map any status other than 200 to `ApiError::HttpStatus`.
pub fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.status == STATUS_OK {
        Ok(())
    } else {
        Err(ApiError::HttpStatus(response.status))
    }
}

/// Fetch `request` and return its body, failing on any non-200 status.
pub fn fetch_body<F: HttpFetcher + ?Sized>(
    fetcher: &F,
    request: &HttpRequest,
) -> Result<String, ApiError> {
    let response = fetcher.fetch(request)?;
    check_status(&response)?;
    Ok(response.body)
}

/// `HttpFetcher` backed by a blocking `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqFetcher {
    agent: ureq::Agent,
}

impl UreqFetcher {
    pub fn new(timeouts: Timeouts) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_connect(Some(timeouts.connect))
            .timeout_recv_response(Some(timeouts.read))
            .timeout_recv_body(Some(timeouts.read))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqFetcher {
    fn default() -> Self {
        Self::new(Timeouts::default())
    }
}

impl HttpFetcher for UreqFetcher {
    #[instrument(level = "debug", skip_all, fields(url = %request.url))]
    fn fetch(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        validate_url(&request.url)?;

        let t0 = Instant::now();
        let mut call = self.agent.get(&request.url);
        for (name, value) in &request.headers {
            call = call.header(name.as_str(), value.as_str());
        }
        let mut response = call.call().map_err(|e| transport_error(&request.url, e))?;

        let status = response.status().as_u16();
        if status != STATUS_OK {
            warn!(status, elapsed_ms = t0.elapsed().as_millis() as u64, "non-success status");
            return Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body: String::new(),
            });
        }

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| transport_error(&request.url, e))?;

        debug!(
            status,
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "fetched response"
        );
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

/// Reject empty, unparsable, and non-HTTP URLs before opening a connection.
fn validate_url(raw: &str) -> Result<(), ApiError> {
    if raw.trim().is_empty() {
        return Err(ApiError::InvalidUrl("empty URL".to_string()));
    }
    let url = Url::parse(raw).map_err(|e| ApiError::InvalidUrl(format!("{raw:?}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ApiError::InvalidUrl(format!("{raw:?}: unsupported scheme {other:?}"))),
    }
}

fn transport_error(url: &str, err: ureq::Error) -> ApiError {
    let timed_out = matches!(err, ureq::Error::Timeout(_));
    warn!(%url, timed_out, error = %err, "request failed");
    match err {
        ureq::Error::BadUri(reason) => ApiError::InvalidUrl(reason),
        other => ApiError::Network(other.to_string()),
    }
}
