pub mod message_admin;
pub mod profile_admin;
pub mod project_admin;
pub mod settings_admin;
pub mod testimonial_admin;

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::modules::admin::application::errors::MutationError;

pub(crate) fn to_row<T: Serialize>(value: &T) -> Result<Value, MutationError> {
    serde_json::to_value(value).map_err(|e| MutationError::Validation(e.to_string()))
}

/// Sets each column to the current UTC time.
pub(crate) fn stamp(row: &mut Value, columns: &[&str]) {
    if let Value::Object(map) = row {
        let now = Value::String(Utc::now().to_rfc3339());
        for column in columns {
            map.insert((*column).to_string(), now.clone());
        }
    }
}

pub(crate) fn decode<T: DeserializeOwned>(row: Value) -> Result<T, MutationError> {
    serde_json::from_value(row).map_err(|e| MutationError::Backend {
        message: format!("Unexpected response: {e}"),
        code: None,
    })
}

/// First returned row, or `NotFound(entity)` when the write matched nothing.
pub(crate) fn first_row<T: DeserializeOwned>(
    rows: Vec<Value>,
    entity: &str,
) -> Result<T, MutationError> {
    match rows.into_iter().next() {
        Some(row) => decode(row),
        None => Err(MutationError::NotFound(entity.to_string())),
    }
}

pub(crate) fn decode_all<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, MutationError> {
    rows.into_iter().map(decode).collect()
}
