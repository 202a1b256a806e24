//! Catalog error types.

use thiserror::Error;

/// Errors raised when looking up or interpreting catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No record carries the given id or FDI code.
    #[error("unknown tooth: {0}")]
    UnknownTooth(String),

    /// A textual value could not be mapped onto one of the model enums.
    #[error("invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}
