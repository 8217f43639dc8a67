use crate::memory::{AsyncMemoryAdapter, MemoryAdapter};
use crate::{Bridged, CacheAdapter, CacheConfig};
use std::sync::Arc;
use strata_model::Structure;
use strata_types::{EntityHandle, EntityKind, Snowflake};

/// Outcome of a cache read, before it is collapsed to present/absent.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    Hit(Structure),
    Miss,
    /// The section for this kind is disabled.
    SectionNotConfigured,
}

impl CacheLookup {
    #[must_use]
    pub fn is_hit(&self) -> bool {
        matches!(self, CacheLookup::Hit(_))
    }

    pub fn into_option(self) -> Option<Structure> {
        match self {
            CacheLookup::Hit(structure) => Some(structure),
            CacheLookup::Miss | CacheLookup::SectionNotConfigured => None,
        }
    }
}

impl From<Option<Structure>> for CacheLookup {
    fn from(value: Option<Structure>) -> Self {
        value.map_or(CacheLookup::Miss, CacheLookup::Hit)
    }
}

/// A cache backend partitioned into per-kind sections.
#[derive(Clone)]
pub struct Cache {
    adapter: Arc<dyn CacheAdapter>,
    config: CacheConfig,
}

impl Cache {
    pub fn new(adapter: Arc<dyn CacheAdapter>, config: CacheConfig) -> Self {
        Self { adapter, config }
    }

    /// Builds an in-memory cache, synchronous or not per `config.asynchronous`.
    pub fn in_memory(config: CacheConfig) -> Self {
        let adapter: Arc<dyn CacheAdapter> = if config.asynchronous {
            Arc::new(AsyncMemoryAdapter::new())
        } else {
            Arc::new(MemoryAdapter::new())
        };
        Self::new(adapter, config)
    }

    pub fn adapter(&self) -> &Arc<dyn CacheAdapter> {
        &self.adapter
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Whether the backend needs deferred completion. Asked of the adapter
    /// on every call.
    pub fn is_async(&self) -> bool {
        self.adapter.is_async()
    }

    pub fn is_enabled(&self, kind: EntityKind) -> bool {
        self.config.is_enabled(kind)
    }

    /// Reads `handle`, keeping misses and disabled sections apart.
    pub fn lookup(&self, handle: &EntityHandle) -> Bridged<'_, CacheLookup> {
        if !self.is_enabled(handle.kind()) {
            return Bridged::ready(CacheLookup::SectionNotConfigured);
        }
        self.adapter.get(handle).map(CacheLookup::from)
    }

    /// Reads `handle`, collapsed to present/absent.
    pub fn get(&self, handle: &EntityHandle) -> Bridged<'_, Option<Structure>> {
        self.lookup(handle).map(CacheLookup::into_option)
    }

    /// Stores `structure`. Dropped when its section is disabled.
    pub fn set(&self, structure: Structure) -> Bridged<'_, ()> {
        if !self.is_enabled(structure.kind) {
            return Bridged::ready(());
        }
        self.adapter.set(structure)
    }

    pub fn remove(&self, handle: &EntityHandle) -> Bridged<'_, Option<Structure>> {
        if !self.is_enabled(handle.kind()) {
            return Bridged::ready(None);
        }
        self.adapter.remove(handle)
    }

    /// The section for `kind`, if enabled.
    pub fn section(&self, kind: EntityKind) -> Option<Section<'_>> {
        self.is_enabled(kind).then_some(Section { cache: self, kind })
    }

    pub fn messages(&self) -> Option<Section<'_>> {
        self.section(EntityKind::Message)
    }

    pub fn members(&self) -> Option<Section<'_>> {
        self.section(EntityKind::Member)
    }

    pub fn guilds(&self) -> Option<Section<'_>> {
        self.section(EntityKind::Guild)
    }

    pub fn channels(&self) -> Option<Section<'_>> {
        self.section(EntityKind::Channel)
    }

    pub fn users(&self) -> Option<Section<'_>> {
        self.section(EntityKind::User)
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("is_async", &self.is_async())
            .field("config", &self.config)
            .finish()
    }
}

/// One enabled kind of a [`Cache`].
#[derive(Debug, Clone, Copy)]
pub struct Section<'c> {
    cache: &'c Cache,
    kind: EntityKind,
}

impl<'c> Section<'c> {
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// `get(scope?, id)` for this section's kind.
    pub fn get(&self, scope: Option<Snowflake>, id: Snowflake) -> Bridged<'c, Option<Structure>> {
        self.cache.get(&EntityHandle::new(self.kind, scope, id))
    }
}
