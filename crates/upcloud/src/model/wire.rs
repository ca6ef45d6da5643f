//! Serde helpers for the API's number-as-string convention
//!
//! The API sends `"core_number": "1"` and `"position": "3"`, but accepts and
//! occasionally returns plain numbers as well. Unset fields often come back
//! as `""` instead of being left out.

use serde::{Deserialize, Deserializer, Serializer};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw {
    Int(u64),
    Str(String),
}

pub(crate) fn deserialize_opt_number<'de, D, N>(deserializer: D) -> Result<Option<N>, D::Error>
where
    D: Deserializer<'de>,
    N: FromStr + TryFrom<u64>,
    <N as FromStr>::Err: Display,
{
    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Int(n)) => N::try_from(n)
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("number out of range: {}", n))),
        Some(Raw::Str(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Str(s)) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
    }
}

pub(crate) fn serialize_opt_number_as_string<S, N>(
    value: &Option<N>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    N: Display,
{
    match value {
        Some(n) => serializer.collect_str(n),
        None => serializer.serialize_none(),
    }
}

/// Optional text field where `""` means unset
pub(crate) fn deserialize_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.trim().is_empty()))
}

/// Storage sizes and similar values sent as plain JSON numbers.
pub(crate) fn deserialize_opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_opt_number(deserializer)
}
