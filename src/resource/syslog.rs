//! Syslog logging endpoints
//!
//! CRUD operations for `/service/{id}/version/{version}/logging/syslog`.
//! Every operation validates its input envelope before touching the network.

use super::validation::{validate_item, validate_scope};
use super::wire;
use crate::error::{Error, Result};
use crate::fastly::client::FastlyClient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

const COLLECTION: [&str; 2] = ["logging", "syslog"];

/// Log line template syntax version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatVersion {
    V1,
    V2,
}

impl FormatVersion {
    pub fn as_u8(self) -> u8 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
        }
    }
}

impl TryFrom<u64> for FormatVersion {
    type Error = String;

    fn try_from(n: u64) -> std::result::Result<Self, Self::Error> {
        match n {
            1 => Ok(Self::V1),
            2 => Ok(Self::V2),
            other => Err(format!("unsupported format_version {other}, expected 1 or 2")),
        }
    }
}

impl FromStr for FormatVersion {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let n: u64 = s
            .trim()
            .parse()
            .map_err(|_| format!("invalid format_version {s:?}, expected 1 or 2"))?;
        Self::try_from(n)
    }
}

impl Serialize for FormatVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Syslog message framing.
/// Values this client does not know are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MessageType {
    #[default]
    Classic,
    Loggly,
    Logplex,
    Blank,
    Other(String),
}

impl MessageType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Classic => "classic",
            Self::Loggly => "loggly",
            Self::Logplex => "logplex",
            Self::Blank => "blank",
            Self::Other(s) => s,
        }
    }
}

impl FromStr for MessageType {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "classic" => Self::Classic,
            "loggly" => Self::Loggly,
            "logplex" => Self::Logplex,
            "blank" => Self::Blank,
            _ => Self::Other(s.trim().to_string()),
        })
    }
}

impl Serialize for MessageType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where in the request pipeline the endpoint receives log lines.
/// An unset placement means the default stage for the format version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Not placed automatically; only logged to explicitly
    None,
    WafDebug,
    /// Placement this client does not know, kept verbatim
    Other(String),
}

impl Placement {
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "none",
            Self::WafDebug => "waf_debug",
            Self::Other(s) => s,
        }
    }
}

impl FromStr for Placement {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "none" => Self::None,
            "waf_debug" => Self::WafDebug,
            _ => Self::Other(s.trim().to_string()),
        })
    }
}

impl Serialize for Placement {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Null, empty and the literal `"null"` all leave the placement unset
fn unset_placement<'de, D>(deserializer: D) -> std::result::Result<Option<Placement>, D::Error>
where
    D: Deserializer<'de>,
{
    let placement: Option<Placement> = wire::empty_as_none(deserializer)?;
    Ok(placement.filter(|p| !p.as_str().eq_ignore_ascii_case("null")))
}

/// A syslog logging endpoint attached to one service version
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Syslog {
    #[serde(deserialize_with = "wire::null_as_empty")]
    pub service_id: String,
    #[serde(rename = "version", deserialize_with = "wire::lenient_number")]
    pub service_version: u32,

    #[serde(deserialize_with = "wire::null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "wire::null_as_empty")]
    pub address: String,
    #[serde(deserialize_with = "wire::null_as_empty")]
    pub hostname: String,
    #[serde(deserialize_with = "wire::lenient_number")]
    pub port: u16,
    #[serde(deserialize_with = "wire::lenient_bool")]
    pub use_tls: bool,
    #[serde(deserialize_with = "wire::null_as_empty")]
    pub ipv4: String,
    #[serde(deserialize_with = "wire::null_as_empty")]
    pub tls_ca_cert: String,
    #[serde(deserialize_with = "wire::null_as_empty")]
    pub tls_hostname: String,
    #[serde(deserialize_with = "wire::null_as_empty")]
    pub tls_client_cert: String,
    #[serde(deserialize_with = "wire::null_as_empty")]
    pub tls_client_key: String,
    #[serde(deserialize_with = "wire::null_as_empty")]
    pub token: String,
    #[serde(deserialize_with = "wire::null_as_empty")]
    pub format: String,
    /// Unset when the response omits it
    #[serde(deserialize_with = "wire::optional_number")]
    pub format_version: Option<FormatVersion>,
    #[serde(deserialize_with = "wire::empty_as_default")]
    pub message_type: MessageType,
    #[serde(deserialize_with = "wire::null_as_empty")]
    pub response_condition: String,
    #[serde(deserialize_with = "unset_placement")]
    pub placement: Option<Placement>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct ListSyslogsInput {
    pub service_id: String,
    pub service_version: u32,
}

impl ListSyslogsInput {
    pub fn validate(&self) -> Result<()> {
        validate_scope(&self.service_id, self.service_version)
    }
}

/// Fields left as `None` are not sent, and the API applies its defaults
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateSyslogInput {
    #[serde(skip)]
    pub service_id: String,
    #[serde(skip)]
    pub service_version: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(serialize_with = "wire::compat_bool", skip_serializing_if = "Option::is_none")]
    pub use_tls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_ca_cert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_client_cert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_client_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_version: Option<FormatVersion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_type: Option<MessageType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_condition: Option<String>,
}

impl CreateSyslogInput {
    pub fn validate(&self) -> Result<()> {
        validate_scope(&self.service_id, self.service_version)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetSyslogInput {
    pub service_id: String,
    pub service_version: u32,
    pub name: String,
}

impl GetSyslogInput {
    pub fn validate(&self) -> Result<()> {
        validate_item(&self.name, &self.service_id, self.service_version)
    }
}

/// Partial update: only fields set to `Some` are sent.
/// `name` selects the endpoint; `new_name` renames it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateSyslogInput {
    #[serde(skip)]
    pub service_id: String,
    #[serde(skip)]
    pub service_version: u32,
    #[serde(skip)]
    pub name: String,

    #[serde(rename = "name", skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(serialize_with = "wire::compat_bool", skip_serializing_if = "Option::is_none")]
    pub use_tls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_ca_cert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_client_cert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_client_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_version: Option<FormatVersion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_type: Option<MessageType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_condition: Option<String>,
}

impl UpdateSyslogInput {
    pub fn validate(&self) -> Result<()> {
        validate_item(&self.name, &self.service_id, self.service_version)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteSyslogInput {
    pub service_id: String,
    pub service_version: u32,
    pub name: String,
}

impl DeleteSyslogInput {
    pub fn validate(&self) -> Result<()> {
        validate_item(&self.name, &self.service_id, self.service_version)
    }
}

/// Body returned by delete calls
#[derive(Debug, Deserialize)]
struct StatusResponse {
    #[serde(default)]
    status: Option<String>,
}

/// List all syslog endpoints of a service version, sorted by name
pub async fn list_syslogs(client: &FastlyClient, input: &ListSyslogsInput) -> Result<Vec<Syslog>> {
    input.validate()?;

    let url = client.service_version_url(&input.service_id, input.service_version, &COLLECTION)?;
    let mut syslogs: Vec<Syslog> = client.get(url).await?;
    syslogs.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(syslogs)
}

/// Create a syslog endpoint
pub async fn create_syslog(client: &FastlyClient, input: &CreateSyslogInput) -> Result<Syslog> {
    input.validate()?;

    tracing::info!(
        "create_syslog: service={}, version={}, name={}",
        input.service_id,
        input.service_version,
        input.name.as_deref().unwrap_or("-")
    );

    let url = client.service_version_url(&input.service_id, input.service_version, &COLLECTION)?;
    let form = wire::encode_form(input)?;
    client.post_form(url, form).await
}

/// Get a single syslog endpoint by name
pub async fn get_syslog(client: &FastlyClient, input: &GetSyslogInput) -> Result<Syslog> {
    input.validate()?;

    let url = client.service_version_url(
        &input.service_id,
        input.service_version,
        &[COLLECTION[0], COLLECTION[1], input.name.as_str()],
    )?;
    client.get(url).await
}

/// Update the fields set on `input`, optionally renaming the endpoint
pub async fn update_syslog(client: &FastlyClient, input: &UpdateSyslogInput) -> Result<Syslog> {
    input.validate()?;

    tracing::info!(
        "update_syslog: service={}, version={}, name={}",
        input.service_id,
        input.service_version,
        input.name
    );

    let url = client.service_version_url(
        &input.service_id,
        input.service_version,
        &[COLLECTION[0], COLLECTION[1], input.name.as_str()],
    )?;
    let form = wire::encode_form(input)?;
    client.put_form(url, form).await
}

/// Delete a syslog endpoint
pub async fn delete_syslog(client: &FastlyClient, input: &DeleteSyslogInput) -> Result<()> {
    input.validate()?;

    tracing::info!(
        "delete_syslog: service={}, version={}, name={}",
        input.service_id,
        input.service_version,
        input.name
    );

    let url = client.service_version_url(
        &input.service_id,
        input.service_version,
        &[COLLECTION[0], COLLECTION[1], input.name.as_str()],
    )?;
    let response: StatusResponse = client.delete(url).await?;

    match response.status.as_deref() {
        Some("ok") => Ok(()),
        _ => Err(Error::NotOk),
    }
}
