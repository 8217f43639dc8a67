use crate::Bridged;
use strata_model::Structure;
use strata_types::EntityHandle;

/// A cache backend.
///
/// Synchronous backends answer every call with [`Bridged::Ready`];
/// asynchronous ones may answer with [`Bridged::Pending`]. `is_async` is
/// fixed for the lifetime of a backend, but callers read it per call rather
/// than remembering it.
pub trait CacheAdapter: Send + Sync {
    /// Whether reads may require deferred completion.
    fn is_async(&self) -> bool;

    /// Looks up the record stored under `handle`.
    fn get(&self, handle: &EntityHandle) -> Bridged<'_, Option<Structure>>;

    /// Stores `structure` under its own handle, replacing any previous record.
    fn set(&self, structure: Structure) -> Bridged<'_, ()>;

    /// Removes the record stored under `handle`, returning it.
    fn remove(&self, handle: &EntityHandle) -> Bridged<'_, Option<Structure>>;
}
