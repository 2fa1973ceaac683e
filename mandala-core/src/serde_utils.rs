use crate::errors::{MandalaError, Result};

/// Serializes a value to pretty JSON with canonical error handling.
pub fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| MandalaError::SerializationError(err.to_string()))
}

/// Serializes a value to a single JSON line.
pub fn to_compact_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|err| MandalaError::SerializationError(err.to_string()))
}
