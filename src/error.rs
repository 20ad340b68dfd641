//! Error types
//!
//! One error enum covers local validation, the remote API, and the transport.

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Input envelope has an empty service ID
    #[error("missing required field 'ServiceID'")]
    MissingServiceId,

    /// Input envelope has a zero service version
    #[error("missing required field 'ServiceVersion'")]
    MissingServiceVersion,

    /// Input envelope has an empty resource name
    #[error("missing required field 'Name'")]
    MissingName,

    /// No API token in flags, environment, or config
    #[error("missing API token (set FASTLY_API_TOKEN or add api_token to the config file)")]
    MissingApiToken,

    /// Remote API answered with a non-2xx status
    #[error("API error {status}: {message}")]
    Api {
        status: StatusCode,
        message: String,
        detail: Option<String>,
    },

    /// Response body did not match the expected shape
    #[error("failed to decode {what}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A 2xx response without `"status": "ok"`
    #[error("API did not return an OK status")]
    NotOk,

    #[error("failed to encode form body")]
    Encode(#[from] serde_urlencoded::ser::Error),

    #[error("HTTP transport error")]
    Transport(#[from] reqwest::Error),

    #[error("invalid API endpoint")]
    InvalidEndpoint(#[from] url::ParseError),
}

impl Error {
    /// True for errors raised before any request is sent
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::MissingServiceId | Error::MissingServiceVersion | Error::MissingName
        )
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

/// Format an error for display on the terminal.
/// Keeps the message short and never echoes raw response bodies.
pub fn format_error(error: &Error) -> String {
    if error.is_validation() {
        return error.to_string();
    }

    match error.status().map(|s| s.as_u16()) {
        Some(401) => "Authentication failed. Check your Fastly API token.".to_string(),
        Some(403) => "Permission denied. The token lacks access to this service.".to_string(),
        Some(404) => "Resource not found.".to_string(),
        Some(409) => "Conflict. The endpoint may already exist or the version is locked.".to_string(),
        Some(429) => "Rate limit exceeded. Please try again later.".to_string(),
        Some(400) | Some(422) => match error {
            Error::Api { message, .. } => format!("Invalid request: {}", truncate(message, 80)),
            _ => "Invalid request. Check your parameters.".to_string(),
        },
        Some(code) if code >= 500 => {
            "Fastly API temporarily unavailable. Please try again.".to_string()
        }
        _ => truncate(&error.to_string(), 80),
    }
}

fn truncate(s: &str, max: usize) -> String {
    let sanitized: String = s
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(max)
        .collect();

    if sanitized.len() < s.len() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}
