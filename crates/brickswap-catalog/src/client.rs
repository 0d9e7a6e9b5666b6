//! HTTP client for the Rebrickable catalog API.
//!
//! Wraps `reqwest` with the catalog's key-based `Authorization` header and
//! typed status handling. One request per call: no retry, no backoff.

use std::time::{Duration, Instant};

use brickswap_core::{CatalogLookupKey, CatalogRecord};
use reqwest::{Client, Url};

use crate::error::CatalogError;
use crate::types::SetResponse;

/// Client for the Rebrickable REST API.
///
/// The base URL always comes from configuration, so tests point the same
/// constructor at a mock server.
pub struct CatalogClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CatalogError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so `join` appends below the base path
        // instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| CatalogError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches the set stored under `key` (first revision, `-1` suffix).
    ///
    /// Returns `Ok(None)` when the catalog answers 2xx but the payload has no
    /// usable name.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] on HTTP 404.
    /// - [`CatalogError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`CatalogError::Http`] on network failure.
    /// - [`CatalogError::Deserialize`] if the body is not the expected JSON.
    pub async fn fetch_set(
        &self,
        key: &CatalogLookupKey,
    ) -> Result<Option<CatalogRecord>, CatalogError> {
        let url = self.set_url(key)?;
        tracing::debug!(lookup_key = %key, url = %url, "requesting catalog set");

        let started = Instant::now();
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::AUTHORIZATION, format!("key {}", self.api_key))
            .send()
            .await?;
        let status = response.status();
        tracing::debug!(
            lookup_key = %key,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis(),
            "catalog request completed"
        );

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed =
            serde_json::from_str::<SetResponse>(&body).map_err(|e| CatalogError::Deserialize {
                context: format!("set {key}-1"),
                source: e,
            })?;

        Ok(parsed.into_record())
    }

    /// Builds `{base}/lego/sets/{key}-1/`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidBaseUrl`] if the joined path cannot be
    /// represented as a URL.
    fn set_url(&self, key: &CatalogLookupKey) -> Result<Url, CatalogError> {
        self.base_url
            .join(&format!("lego/sets/{key}-1/"))
            .map_err(|e| CatalogError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
