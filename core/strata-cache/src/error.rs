//! Error types for the cache write path.
//!
//! Reads never fail: a miss is an absent value.

use strata_types::EntityKind;
use thiserror::Error;

/// Result type for cache write operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors that can occur while applying events to the cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The payload could not be built into a structure.
    #[error("model error: {0}")]
    Model(#[from] strata_model::ModelError),

    /// A field the event requires is missing or malformed.
    #[error("invalid {kind} payload: {reason}")]
    InvalidPayload { kind: EntityKind, reason: String },
}
