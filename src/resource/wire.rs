//! Wire format helpers
//!
//! The API is loose about scalar types: booleans arrive as `"1"`, `"true"`
//! or `1`, numbers as `1234` or `"1234"`, and unset strings as `null`.
//! These helpers normalize all of that into native types.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolLike {
    Bool(bool),
    Int(u64),
    Str(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberLike {
    Int(u64),
    Str(String),
}

/// `true`, `1`, `"1"`, `"true"` and friends. Null is false.
pub(crate) fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<BoolLike>::deserialize(deserializer)? {
        None => Ok(false),
        Some(BoolLike::Bool(b)) => Ok(b),
        Some(BoolLike::Int(n)) => Ok(n != 0),
        Some(BoolLike::Str(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "t" | "yes" => Ok(true),
            "0" | "false" | "f" | "no" | "" => Ok(false),
            other => Err(de::Error::custom(format!("invalid boolean: {other:?}"))),
        },
    }
}

/// Integer or numeric string. Null and empty string give `None`.
pub(crate) fn optional_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + TryFrom<u64>,
{
    match Option::<NumberLike>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberLike::Int(n)) => T::try_from(n)
            .map(Some)
            .map_err(|_| de::Error::custom(format!("number out of range: {n}"))),
        Some(NumberLike::Str(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<T>()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("invalid number: {s:?}")))
        }
    }
}

/// Like [`optional_number`] but falls back to the type's default
pub(crate) fn lenient_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + TryFrom<u64> + Default,
{
    Ok(optional_number(deserializer)?.unwrap_or_default())
}

/// Null becomes the empty string
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Null or empty string becomes `None`, anything else goes through `FromStr`
pub(crate) fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) if !s.trim().is_empty() => s.trim().parse().map(Some).map_err(de::Error::custom),
        _ => Ok(None),
    }
}

/// Like [`empty_as_none`] but falls back to the type's default
pub(crate) fn empty_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
    T::Err: Display,
{
    Ok(empty_as_none(deserializer)?.unwrap_or_default())
}

/// Encode an optional boolean the way the API expects: `"1"` or `"0"`
pub(crate) fn compat_bool<S>(value: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(true) => serializer.serialize_str("1"),
        Some(false) => serializer.serialize_str("0"),
        None => serializer.serialize_none(),
    }
}

/// Form-encode an input envelope
pub(crate) fn encode_form<T: Serialize>(input: &T) -> crate::Result<String> {
    Ok(serde_urlencoded::to_string(input)?)
}
