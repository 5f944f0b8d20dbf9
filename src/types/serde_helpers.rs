//! Custom serde helpers for Yobit's loosely typed JSON.
//!
//! Yobit reports flags such as `success` or account rights as either `0`/`1`
//! or `true`/`false`, depending on the endpoint.

use std::fmt;

use serde::{Deserializer, de};

/// Deserialize a flag given as a number (`0` is false) or a boolean.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use yobit_api_client::types::serde_helpers::int_or_bool;
///
/// #[derive(Deserialize)]
/// struct Envelope {
///     #[serde(deserialize_with = "int_or_bool::deserialize")]
///     success: bool,
/// }
///
/// let ok: Envelope = serde_json::from_str(r#"{"success":1}"#).unwrap();
/// assert!(ok.success);
/// let failed: Envelope = serde_json::from_str(r#"{"success":false}"#).unwrap();
/// assert!(!failed.success);
/// ```
pub mod int_or_bool {
    use super::*;

    /// Deserialize a `0`/`1`/`true`/`false` flag.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FlagVisitor;

        impl<'de> de::Visitor<'de> for FlagVisitor {
            type Value = bool;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a boolean or an integer flag")
            }

            fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(v)
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(v != 0)
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(v != 0)
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(v != 0.0)
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                match v {
                    "0" | "false" | "" => Ok(false),
                    "1" | "true" => Ok(true),
                    other => Err(de::Error::invalid_value(de::Unexpected::Str(other), &self)),
                }
            }
        }

        deserializer.deserialize_any(FlagVisitor)
    }

    /// Deserialize an optional flag; `null` is `None`.
    ///
    /// Combine with `#[serde(default)]` so a missing field is `None` too.
    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Flag(bool);

        impl<'de> serde::Deserialize<'de> for Flag {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserialize(deserializer).map(Flag)
            }
        }

        let flag: Option<Flag> = serde::Deserialize::deserialize(deserializer)?;
        Ok(flag.map(|f| f.0))
    }
}
