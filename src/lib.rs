//! Client for Fastly syslog logging endpoints.
//!
//! Validates input envelopes locally, maps them onto the versioned service
//! configuration API, and decodes the loosely typed responses.

pub mod config;
pub mod error;
pub mod fastly;
pub mod resource;

pub use error::{format_error, Error, Result};
pub use fastly::auth::ApiToken;
pub use fastly::client::FastlyClient;
