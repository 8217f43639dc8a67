//! Resolution and enrichment layer for Strata.
//!
//! Answers "give me entity X" from the cache, from the network, or from
//! whichever the transport prefers, and turns raw gateway events into richer
//! values by cross-referencing the cache.
//!
//! # Architecture
//!
//! ## Components
//!
//! - **Rest**: the [`RestTransport`] port, plus a cache-first wrapper, an
//!   offline transport and a recording mock
//! - **Resolver**: the three-mode dispatcher shared by every accessor
//! - **Context**: per-interaction accessors (`channel`, `me`, `guild`, ...)
//!   built on the resolver
//! - **Normalize**: per-category gateway event normalization
//! - **Pipeline**: normalize, then keep the cache fresh
//!
//! ## Resolution modes
//!
//! 1. **cache**: local lookup only; a miss is absent, never an error
//! 2. **rest**: forced fetch, bypassing the cache; failures propagate as-is
//! 3. **flow** (default): fetch the transport may answer from cache; absent
//!    without any fetch when the context lacks the owning scope
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use strata_cache::{Cache, CacheConfig};
//! use strata_client::{Client, OfflineRest};
//! use strata_types::Snowflake;
//!
//! let cache = Cache::in_memory(CacheConfig::default());
//! let client = Client::new(Snowflake::new(1), cache, Arc::new(OfflineRest));
//! assert!(!client.cache().is_async());
//! ```

mod client;
mod config;
pub mod context;
mod error;
pub mod normalize;
mod pipeline;
pub mod resolve;
pub mod rest;

pub use client::Client;
pub use config::ClientConfig;
pub use context::{GuildContext, InteractionContext};
pub use error::{
    ConfigError, ConfigResult, NormalizeError, NormalizeResult, ResolveError, ResolveResult,
    RestError, RestResult,
};
pub use normalize::{normalize, BulkDelete, CachedOrId, DeletedMessage, MessageUpdate, NormalizedEvent};
pub use pipeline::EventPipeline;
pub use resolve::{Resolution, Resolver, Target};
pub use rest::{CacheFirstRest, FetchOptions, FetchQuery, OfflineRest, RestTransport};
