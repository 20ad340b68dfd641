//! Service configuration resources
//!
//! Typed clients for resources attached to a service version.
//!
//! # Architecture
//!
//! - [`syslog`] - Syslog logging endpoints (list, create, get, update, delete)
//! - `validation` - Required-field checks run before any request
//! - `wire` - Lenient decoding of the API's loosely typed scalars
//!
//! # Example
//!
//! ```ignore
//! use fastly_syslog::resource::{get_syslog, GetSyslogInput};
//!
//! async fn show(client: &FastlyClient) -> fastly_syslog::Result<()> {
//!     let syslog = get_syslog(client, &GetSyslogInput {
//!         service_id: "SU1Z0isxPaozGVKXdv0eY".to_string(),
//!         service_version: 1,
//!         name: "test-syslog".to_string(),
//!     }).await?;
//!     println!("{} -> {}:{}", syslog.name, syslog.address, syslog.port);
//!     Ok(())
//! }
//! ```

pub mod syslog;
mod validation;
mod wire;

pub use syslog::{
    create_syslog, delete_syslog, get_syslog, list_syslogs, update_syslog, CreateSyslogInput,
    DeleteSyslogInput, FormatVersion, GetSyslogInput, ListSyslogsInput, MessageType, Placement,
    Syslog, UpdateSyslogInput,
};
