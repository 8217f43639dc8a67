//! Error types for the resolution layer.
//!
//! Cache misses are never errors. Transport failures travel as [`RestError`]
//! from the transport to the caller without being wrapped.

use strata_types::{EntityHandle, EntityKind, EventCategory, ResolutionMode};
use thiserror::Error;

/// Result type for network fetches.
pub type RestResult<T> = Result<T, RestError>;

/// Result type for dispatcher calls.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Result type for event normalization.
pub type NormalizeResult<T> = Result<T, NormalizeError>;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised by a [`crate::RestTransport`].
#[derive(Debug, Error)]
pub enum RestError {
    /// The platform answered with a non-success status.
    #[error("http {status}: {message}")]
    Http { status: u16, message: String },

    /// The entity does not exist remotely.
    #[error("not found: {0}")]
    NotFound(EntityHandle),

    /// The request never got an answer.
    #[error("network error: {0}")]
    Network(String),

    /// No transport is configured.
    #[error("rest transport unavailable")]
    Unavailable,

    /// The response could not be built into a structure.
    #[error("model error: {0}")]
    Model(#[from] strata_model::ModelError),
}

/// Errors raised by the dispatcher itself.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// A scope-requiring kind was resolved in `cache` or `rest` mode from a
    /// context that lacks the scope.
    #[error("{kind} cannot be resolved in {mode} mode without an owning scope")]
    MissingScope {
        kind: EntityKind,
        mode: ResolutionMode,
    },
}

/// Errors raised while normalizing a gateway event.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The event is not one the normalizer handles.
    #[error("unsupported event: {0}")]
    UnsupportedEvent(String),

    /// A field the event requires is missing or malformed.
    #[error("invalid {event} payload: {reason}")]
    InvalidPayload { event: EventCategory, reason: String },

    /// The payload could not be built into a structure.
    #[error("model error: {0}")]
    Model(#[from] strata_model::ModelError),
}

/// Errors raised while loading a [`crate::ClientConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
