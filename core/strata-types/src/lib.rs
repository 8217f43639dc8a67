//! Core type definitions for Strata.
//!
//! This crate defines the fundamental types shared by every layer of the
//! client core:
//! - Snowflake identifiers
//! - Entity kinds and entity handles (what to resolve, and under which scope)
//! - Resolution modes (cache, rest, flow)
//! - Raw gateway dispatch envelopes and their event categories
//!
//! Rich domain structures live in `strata-model`; caching and resolution
//! live in `strata-cache` and `strata-client`.

mod event;
mod handle;
mod ids;
mod mode;

pub use event::{EventCategory, GatewayDispatch};
pub use handle::{EntityHandle, EntityKind};
pub use ids::{Snowflake, PLATFORM_EPOCH_MS};
pub use mode::ResolutionMode;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid snowflake: {0}")]
    InvalidSnowflake(String),

    #[error("unknown entity kind: {0}")]
    UnknownKind(String),

    #[error("unknown resolution mode: {0}")]
    UnknownMode(String),
}
