//! Store-subsystem error type.

use thiserror::Error;

use gt_core::GtError;

/// Errors produced by `gt-store`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or refused the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("codec error: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// At the service boundary every store failure is a collaborator failure;
/// the distinction between transport and codec trouble stays in the message.
impl From<StoreError> for GtError {
    fn from(err: StoreError) -> Self {
        GtError::StoreUnavailable(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
