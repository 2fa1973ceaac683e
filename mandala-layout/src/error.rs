use mandala_core::MandalaError;
use thiserror::Error;

/// Errors raised while validating layout inputs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("{field} out of range: {value} (expected 0..{limit})")]
    InvalidTimeField {
        field: &'static str,
        value: u32,
        limit: u32,
    },
    #[error("invalid locale: {0}")]
    InvalidLocale(String),
}

impl From<LayoutError> for MandalaError {
    fn from(err: LayoutError) -> Self {
        MandalaError::LayoutError(err.to_string())
    }
}
