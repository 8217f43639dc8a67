//! Cache applicator - writes gateway events into the cache.
//!
//! Creates and updates store a fresh structure, deletes remove it. Run this
//! after the normalizer has seen the event, otherwise deletes can no longer
//! be enriched from the cache.

use crate::{Cache, CacheError, CacheResult};
use std::sync::Arc;
use strata_model::{DefaultBuilder, Structure, StructureBuilder};
use strata_types::{EntityHandle, EntityKind, EventCategory, GatewayDispatch, Snowflake};
use tracing::{debug, trace};

/// Applies gateway dispatches to a [`Cache`].
pub struct CacheApplicator {
    builder: Arc<dyn StructureBuilder>,
}

impl Default for CacheApplicator {
    fn default() -> Self {
        Self::new(Arc::new(DefaultBuilder))
    }
}

impl CacheApplicator {
    /// Creates an applicator that builds records with `builder`.
    pub fn new(builder: Arc<dyn StructureBuilder>) -> Self {
        Self { builder }
    }

    /// Applies a single dispatch to the cache.
    /// Returns true if the cache was written to.
    pub async fn apply(&self, cache: &Cache, dispatch: &GatewayDispatch) -> CacheResult<bool> {
        let Some(category) = dispatch.category() else {
            trace!("Skipping uncached event {}", dispatch.t);
            return Ok(false);
        };

        match category {
            EventCategory::MessageCreate => self.apply_message_created(cache, &dispatch.d).await,
            EventCategory::MessageUpdate => self.apply_message_updated(cache, &dispatch.d).await,
            EventCategory::MessageDelete => {
                let id = snowflake_at(&dispatch.d, "/id")?;
                Ok(self.apply_message_deleted(cache, id).await)
            }
            EventCategory::MessageDeleteBulk => {
                let ids = snowflakes_at(&dispatch.d, "/ids")?;
                let mut removed = false;
                for id in ids {
                    removed |= self.apply_message_deleted(cache, id).await;
                }
                Ok(removed)
            }
            // Reactions and poll votes are not cached at this layer.
            _ => {
                trace!("Skipping non-entity event {}", category);
                Ok(false)
            }
        }
    }

    async fn apply_message_created(&self, cache: &Cache, raw: &serde_json::Value) -> CacheResult<bool> {
        if !cache.is_enabled(EntityKind::Message) {
            return Ok(false);
        }
        let message = self.builder.build(EntityKind::Message, raw)?;
        debug!("Caching message {}", message.id);
        cache.set(message).await;
        Ok(true)
    }

    /// Update payloads may be partial, so the fresh fields are laid over the
    /// cached record when there is one.
    async fn apply_message_updated(&self, cache: &Cache, raw: &serde_json::Value) -> CacheResult<bool> {
        if !cache.is_enabled(EntityKind::Message) {
            return Ok(false);
        }
        let fresh = self.builder.build(EntityKind::Message, raw)?;
        let merged = match cache.get(&fresh.handle()).await {
            Some(previous) => overlay(previous, fresh),
            None => fresh,
        };
        debug!("Updated cached message {}", merged.id);
        cache.set(merged).await;
        Ok(true)
    }

    async fn apply_message_deleted(&self, cache: &Cache, id: Snowflake) -> bool {
        let removed = cache.remove(&EntityHandle::message(id)).await.is_some();
        if removed {
            debug!("Evicted message {}", id);
        }
        removed
    }
}

fn overlay(previous: Structure, fresh: Structure) -> Structure {
    let (Some(old), Some(new)) = (previous.data.as_object(), fresh.data.as_object()) else {
        return fresh;
    };
    let mut data = old.clone();
    data.extend(new.clone());
    Structure {
        data: serde_json::Value::Object(data),
        ..fresh
    }
}

fn snowflake_at(raw: &serde_json::Value, pointer: &str) -> CacheResult<Snowflake> {
    let value = raw.pointer(pointer).ok_or_else(|| invalid(format!("missing {pointer}")))?;
    serde_json::from_value(value.clone()).map_err(|e| invalid(format!("{pointer}: {e}")))
}

/// Entries that are not snowflakes can never have been cached and are skipped.
fn snowflakes_at(raw: &serde_json::Value, pointer: &str) -> CacheResult<Vec<Snowflake>> {
    let value = raw.pointer(pointer).ok_or_else(|| invalid(format!("missing {pointer}")))?;
    let entries = value
        .as_array()
        .ok_or_else(|| invalid(format!("{pointer} is not an array")))?;
    Ok(entries
        .iter()
        .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
        .collect())
}

fn invalid(reason: String) -> CacheError {
    CacheError::InvalidPayload {
        kind: EntityKind::Message,
        reason,
    }
}
