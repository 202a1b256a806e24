//! Persistence error types.
//!
//! These never escape the study layer: [`crate::repository::StudyRepository`]
//! logs them and falls back to fresh state.

use thiserror::Error;

/// Errors from a [`crate::store::KeyValueStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O failed for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be mapped onto the backing store.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// The store refused the operation (quota, disabled storage).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
