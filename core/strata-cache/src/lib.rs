//! Cache port for Strata.
//!
//! Provides the read path every resolver and normalizer goes through, and
//! the write path that keeps it fresh from gateway events.
//!
//! # Architecture
//!
//! - [`Bridged`] reconciles synchronous and asynchronous backends: a
//!   synchronous adapter answers with `Bridged::Ready` and callers pay no
//!   scheduling cost; an asynchronous adapter answers with `Bridged::Pending`.
//! - [`CacheAdapter`] is the backend contract (key-value get/set/remove plus
//!   the `is_async` capability flag).
//! - [`Cache`] partitions the backend into per-kind sections that can be
//!   disabled in [`CacheConfig`]; a disabled section is a miss, never an error.
//! - [`CacheApplicator`] writes gateway events into the cache.

mod adapter;
mod applicator;
mod bridge;
mod cache;
mod config;
mod error;
pub mod memory;

pub use adapter::CacheAdapter;
pub use applicator::CacheApplicator;
pub use bridge::{wrap, Bridged};
pub use cache::{Cache, CacheLookup, Section};
pub use config::CacheConfig;
pub use error::{CacheError, CacheResult};
pub use memory::{AsyncMemoryAdapter, MemoryAdapter};
