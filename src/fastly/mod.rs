//! Fastly API interaction module
//!
//! Core plumbing for talking to the Fastly management API: token handling,
//! the HTTP transport and the client that ties them together.
//!
//! # Module Structure
//!
//! - [`auth`] - API token handling (`Fastly-Key` header)
//! - [`client`] - Main Fastly client and URL builders
//! - [`http`] - HTTP utilities for REST API calls
//!
//! # Example
//!
//! ```ignore
//! use fastly_syslog::fastly::{auth::ApiToken, client::FastlyClient};
//!
//! fn example() -> fastly_syslog::Result<()> {
//!     let client = FastlyClient::new(ApiToken::new("my-token")?)?;
//!     let url = client.service_version_url("SU1Z0isxPaozGVKXdv0eY", 1, &["logging", "syslog"])?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;
