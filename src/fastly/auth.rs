//! Fastly Authentication
//!
//! API tokens are sent on every request in the `Fastly-Key` header.

use crate::error::{Error, Result};
use reqwest::header::HeaderValue;
use std::fmt;

/// Header carrying the API token
pub const AUTH_HEADER: &str = "Fastly-Key";

/// Environment variable holding the API token
pub const TOKEN_ENV: &str = "FASTLY_API_TOKEN";

/// Fastly API token. Never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(Error::MissingApiToken);
        }
        Ok(Self(token))
    }

    /// Read the token from `FASTLY_API_TOKEN`
    pub fn from_env() -> Option<Self> {
        std::env::var(TOKEN_ENV)
            .ok()
            .and_then(|v| Self::new(v).ok())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Header value marked sensitive so it stays out of reqwest's debug output
    pub(crate) fn header_value(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&self.0).map_err(|_| Error::MissingApiToken)?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(***)")
    }
}
