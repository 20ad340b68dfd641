//! Fastly Client
//!
//! Main client for the Fastly API, combining the API token, the base
//! endpoint and HTTP functionality. Immutable once built, so one client can
//! be cloned and shared across tasks.

use super::auth::ApiToken;
use super::http::FastlyHttpClient;
use crate::error::Result;
use serde::de::DeserializeOwned;
use url::Url;

/// Production API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.fastly.com";

/// Main Fastly client
#[derive(Clone)]
pub struct FastlyClient {
    token: ApiToken,
    http: FastlyHttpClient,
    endpoint: String,
}

impl std::fmt::Debug for FastlyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastlyClient")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token)
            .finish()
    }
}

impl FastlyClient {
    /// Create a client against the production endpoint
    pub fn new(token: ApiToken) -> Result<Self> {
        Self::with_endpoint(DEFAULT_ENDPOINT, token)
    }

    /// Create a client against a custom endpoint (staging, mock servers)
    pub fn with_endpoint(endpoint: &str, token: ApiToken) -> Result<Self> {
        // Validate once so URL building later only fails on bad segments
        Url::parse(endpoint)?;

        Ok(Self {
            token,
            http: FastlyHttpClient::new()?,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Make a GET request to the Fastly API
    pub async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        self.http.get(url, &self.token).await
    }

    /// Make a form-encoded POST request to the Fastly API
    pub async fn post_form<T: DeserializeOwned>(&self, url: Url, form: String) -> Result<T> {
        self.http.post_form(url, &self.token, form).await
    }

    /// Make a form-encoded PUT request to the Fastly API
    pub async fn put_form<T: DeserializeOwned>(&self, url: Url, form: String) -> Result<T> {
        self.http.put_form(url, &self.token, form).await
    }

    /// Make a DELETE request to the Fastly API
    pub async fn delete<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        self.http.delete(url, &self.token).await
    }

    // =========================================================================
    // Service configuration URL helpers
    // =========================================================================

    /// Build a URL under `/service/{id}/version/{version}/`.
    /// `segments` are percent-encoded individually.
    pub fn service_version_url(
        &self,
        service_id: &str,
        service_version: u32,
        segments: &[&str],
    ) -> Result<Url> {
        let mut url = format!(
            "{}/service/{}/version/{}",
            self.endpoint,
            urlencoding::encode(service_id),
            service_version
        );
        for segment in segments {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        Ok(Url::parse(&url)?)
    }
}
