//! In-memory cache backends.
//!
//! [`MemoryAdapter`] is synchronous and answers every call immediately.
//! [`AsyncMemoryAdapter`] sits behind an async lock and always answers with
//! a pending value, which is how a remote store (Redis, a database) behaves.
//! Both count lookups so callers can observe whether the cache was consulted.

use crate::{Bridged, CacheAdapter};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};
use strata_model::Structure;
use strata_types::EntityHandle;

/// Synchronous in-memory backend.
#[derive(Debug, Default)]
pub struct MemoryAdapter {
    records: RwLock<HashMap<EntityHandle, Structure>>,
    lookups: AtomicUsize,
}

impl MemoryAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `get` calls served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheAdapter for MemoryAdapter {
    fn is_async(&self) -> bool {
        false
    }

    fn get(&self, handle: &EntityHandle) -> Bridged<'_, Option<Structure>> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Bridged::ready(records.get(handle).cloned())
    }

    fn set(&self, structure: Structure) -> Bridged<'_, ()> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        records.insert(structure.handle(), structure);
        Bridged::ready(())
    }

    fn remove(&self, handle: &EntityHandle) -> Bridged<'_, Option<Structure>> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        Bridged::ready(records.remove(handle))
    }
}

/// Asynchronous in-memory backend.
#[derive(Debug, Default)]
pub struct AsyncMemoryAdapter {
    records: tokio::sync::RwLock<HashMap<EntityHandle, Structure>>,
    lookups: AtomicUsize,
}

impl AsyncMemoryAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `get` calls served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

impl CacheAdapter for AsyncMemoryAdapter {
    fn is_async(&self) -> bool {
        true
    }

    fn get(&self, handle: &EntityHandle) -> Bridged<'_, Option<Structure>> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        let handle = *handle;
        Bridged::pending(async move { self.records.read().await.get(&handle).cloned() })
    }

    fn set(&self, structure: Structure) -> Bridged<'_, ()> {
        Bridged::pending(async move {
            self.records.write().await.insert(structure.handle(), structure);
        })
    }

    fn remove(&self, handle: &EntityHandle) -> Bridged<'_, Option<Structure>> {
        let handle = *handle;
        Bridged::pending(async move { self.records.write().await.remove(&handle) })
    }
}
