//! Domain structures for Strata.
//!
//! Defines the types that turn raw wire records into values the rest of the
//! client consumes:
//! - [`Structure`]: a built domain object (kind, id, scope, camelCase data)
//! - [`StructureBuilder`]: constructs structures from raw payloads, with an
//!   optional post-build hook
//! - [`casing`]: wire (snake_case) to normalized (camelCase) field naming
//!
//! Building is pure: no cache access, no I/O.

pub mod casing;
mod builder;
mod structure;

pub use builder::{DefaultBuilder, StructureBuilder};
pub use casing::to_camel_case;
pub use structure::Structure;

use strata_types::EntityKind;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while building structures from raw payloads.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("{kind} payload has no id at {pointer}")]
    MissingId {
        kind: EntityKind,
        pointer: &'static str,
    },

    #[error("{kind} payload has an invalid id: {source}")]
    InvalidId {
        kind: EntityKind,
        #[source]
        source: strata_types::Error,
    },

    #[error("{kind} payload must be a JSON object")]
    NotAnObject { kind: EntityKind },
}
