//! Authenticated HTTP access to the iZettle APIs.
//!
//! Defines the [`IzettleHttp`] trait the purchase client talks to, and
//! provides a reqwest implementation ([`HttpIzettleClient`]) plus a test
//! mock (`mock::MockHttp`).

mod client;
mod connection;
#[cfg(test)]
pub mod mock;
pub mod types;

pub use client::HttpIzettleClient;
pub(crate) use connection::parse_base_url;
pub use types::{HttpResponse, QueryValue};

use async_trait::async_trait;

use crate::error::{CoreError, HttpError};

/// Minimal HTTP surface the API clients need.
///
/// Implementations handle authentication and connection management, and
/// must report a missing resource as [`CoreError::NotFound`] so callers can
/// translate it into a domain-specific error.
#[async_trait]
pub trait IzettleHttp: Send + Sync {
    /// Issue a GET against `url` with the given query parameters.
    async fn get(
        &self,
        url: &str,
        params: &[(String, QueryValue)],
    ) -> Result<HttpResponse, CoreError>;

    /// Parse a successful response body as JSON.
    fn get_json(&self, response: HttpResponse) -> Result<serde_json::Value, CoreError> {
        serde_json::from_str(&response.body).map_err(|e| {
            HttpError::InvalidResponse(format!(
                "decode JSON body: {e}; body_len={}, body={}",
                response.body.len(),
                body_excerpt(&response.body)
            ))
            .into()
        })
    }
}

/// Longest body prefix quoted in error messages.
const BODY_EXCERPT_MAX: usize = 512;

/// The first [`BODY_EXCERPT_MAX`] bytes of `body`, cut on a char boundary.
fn body_excerpt(body: &str) -> &str {
    if body.len() <= BODY_EXCERPT_MAX {
        return body;
    }
    let mut end = BODY_EXCERPT_MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
