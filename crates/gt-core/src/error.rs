//! Service-wide error taxonomy.
//!
//! Sub-crates may define their own error enums and convert them into `GtError`
//! via `From` impls, or keep them separate and wrap `GtError` as one variant.
//! `gt-store` takes the first route: its `StoreError` collapses into
//! [`GtError::StoreUnavailable`] at the service boundary.

use thiserror::Error;

use crate::ids::TaskId;

/// The top-level error type shared by all `gt-*` crates.
///
/// The first three variants are validation errors: they are rejected
/// synchronously at the call boundary and never partially applied.
/// `NoPositionSet` is a normal outcome for a service queried before its
/// first position update, not a crash condition.
#[derive(Debug, Error)]
pub enum GtError {
    #[error("coordinate out of range: lat {lat}, lon {lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("radius must be positive, got {0} km")]
    InvalidRadius(f64),

    #[error("malformed task {id}: {reason}")]
    MalformedTask { id: TaskId, reason: &'static str },

    #[error("no courier position has been set")]
    NoPositionSet,

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Shorthand result type for all `gt-*` crates.
pub type GtResult<T> = Result<T, GtError>;
