//! Serde adapters for rows coming back from the hosted backend and for
//! form-style payloads coming from the admin panel.

use serde::{Deserialize, Deserializer, Serializer};

/// Reads `null` as the type's default (`""`, `[]`, `false`).
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads `""` (what an untouched form field sends) as `None`.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Writes a blank string as `null` so NOT NULL columns reject it.
pub fn blank_as_null<S>(value: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.trim().is_empty() {
        serializer.serialize_none()
    } else {
        serializer.serialize_str(value)
    }
}
