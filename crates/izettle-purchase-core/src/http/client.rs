use std::num::NonZeroU32;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::{header, StatusCode};
use tracing::{debug, trace};

use crate::error::{CoreError, HttpError};

use super::connection::resolve_access_token;
use super::types::{HttpResponse, QueryValue};
use super::IzettleHttp;

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// iZettle HTTP client over reqwest with bearer authentication.
///
/// Callers pass absolute URLs; the API host is owned by the API client
/// built on top (e.g. [`crate::PurchaseClient::with_base_url`]).
pub struct HttpIzettleClient {
    client: reqwest::Client,
    access_token: Option<String>,
    limiter: Option<DirectRateLimiter>,
}

impl HttpIzettleClient {
    /// Create a new client.
    ///
    /// Authentication precedence:
    /// 1. explicit `access_token`
    /// 2. first non-empty line of `token_file`
    /// 3. no auth
    ///
    /// If `requests_per_second` is set, each outbound request waits for the
    /// limiter before it is sent.
    pub fn new(
        access_token: Option<&str>,
        token_file: Option<&Path>,
        requests_per_second: Option<u32>,
    ) -> Result<Self, CoreError> {
        let access_token = resolve_access_token(access_token, token_file)?;

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(32)
            .tcp_nodelay(true)
            .build()
            .map_err(HttpError::Transport)?;

        let limiter = match requests_per_second {
            None => None,
            Some(limit) => {
                let limit = NonZeroU32::new(limit).ok_or_else(|| {
                    CoreError::InvalidConfig("requests_per_second must be at least 1".to_owned())
                })?;
                Some(RateLimiter::direct(Quota::per_second(limit)))
            }
        };

        Ok(Self {
            client,
            access_token,
            limiter,
        })
    }

    async fn wait_for_rate_limit(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }
}

#[async_trait]
impl IzettleHttp for HttpIzettleClient {
    async fn get(
        &self,
        url: &str,
        params: &[(String, QueryValue)],
    ) -> Result<HttpResponse, CoreError> {
        self.wait_for_rate_limit().await;
        debug!(http.url = %url, http.params = params.len(), "http get");

        let mut builder = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json");
        if !params.is_empty() {
            builder = builder.query(params);
        }
        if let Some(token) = &self.access_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(HttpError::Transport)?;
        let status = response.status();

        let body = response.text().await.map_err(HttpError::Transport)?;
        debug!(http.url = %url, %status, body_len = body.len(), "http response");
        trace!(http.url = %url, body = %body, "http response body");

        classify_response(url, status, body)
    }
}

// ==============================================================================
// Status Mapping
// ==============================================================================

/// Map a completed response onto success or a typed failure.
///
/// 404 becomes the generic [`CoreError::NotFound`] so API clients can turn
/// it into their own not-found variant.
fn classify_response(
    url: &str,
    status: StatusCode,
    body: String,
) -> Result<HttpResponse, CoreError> {
    if status.is_success() {
        return Ok(HttpResponse { status, body });
    }

    match status {
        StatusCode::NOT_FOUND => Err(CoreError::NotFound(not_found_message(url, &body))),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(HttpError::Unauthorized {
            status,
            message: error_message(&body).unwrap_or(body),
        }
        .into()),
        _ => Err(HttpError::Status { status, body }.into()),
    }
}

fn not_found_message(url: &str, body: &str) -> String {
    match error_message(body) {
        Some(message) => format!("{url}: {message}"),
        None if body.trim().is_empty() => url.to_owned(),
        None => format!("{url}: {}", body.trim()),
    }
}

/// Extract a human-readable message from an iZettle error body, which
/// carries either `developerMessage` or `error_description`.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["developerMessage", "error_description", "message"]
        .iter()
        .find_map(|key| value.get(key).and_then(serde_json::Value::as_str))
        .map(str::to_owned)
}
