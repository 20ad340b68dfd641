//! HTTP utilities for Fastly REST API calls

use super::auth::{ApiToken, AUTH_HEADER};
use crate::error::{Error, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Error body shape returned by the Fastly API
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

/// HTTP client wrapper for Fastly API calls
#[derive(Clone)]
pub struct FastlyHttpClient {
    client: Client,
}

impl FastlyHttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("fastly-syslog/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, url: Url, token: &ApiToken) -> Result<T> {
        tracing::debug!("GET {}", url);
        let request = self.client.get(url);
        self.send(request, token).await
    }

    /// Make a POST request with a form-encoded body
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        url: Url,
        token: &ApiToken,
        form: String,
    ) -> Result<T> {
        tracing::debug!("POST {}", url);
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(form);
        self.send(request, token).await
    }

    /// Make a PUT request with a form-encoded body
    pub async fn put_form<T: DeserializeOwned>(
        &self,
        url: Url,
        token: &ApiToken,
        form: String,
    ) -> Result<T> {
        tracing::debug!("PUT {}", url);
        let request = self
            .client
            .put(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(form);
        self.send(request, token).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, url: Url, token: &ApiToken) -> Result<T> {
        tracing::debug!("DELETE {}", url);
        let request = self.client.delete(url);
        self.send(request, token).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        token: &ApiToken,
    ) -> Result<T> {
        let response = request
            .header(AUTH_HEADER, token.header_value()?)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Only the sanitized body is logged; it may echo submitted fields
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            let parsed: ApiErrorBody = serde_json::from_str(&body).unwrap_or_default();
            let message = parsed
                .msg
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(Error::Api {
                status,
                message,
                detail: parsed.detail,
            });
        }

        serde_json::from_str(&body).map_err(|source| Error::Decode {
            what: std::any::type_name::<T>(),
            source,
        })
    }
}
