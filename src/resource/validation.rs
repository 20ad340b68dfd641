//! Input validation
//!
//! Checks run before any request is built. Collection operations check the
//! service scope only. Item operations check the name first, then the scope.

use crate::error::{Error, Result};

/// Service ID, then service version
pub(crate) fn validate_scope(service_id: &str, service_version: u32) -> Result<()> {
    if service_id.is_empty() {
        return Err(Error::MissingServiceId);
    }
    if service_version == 0 {
        return Err(Error::MissingServiceVersion);
    }
    Ok(())
}

/// Name, then service ID, then service version
pub(crate) fn validate_item(name: &str, service_id: &str, service_version: u32) -> Result<()> {
    if name.is_empty() {
        return Err(Error::MissingName);
    }
    validate_scope(service_id, service_version)
}
