//! Event pipeline: normalize first, then keep the cache fresh.
//!
//! Ordering matters: a delete must be normalized while the cache still holds
//! the message, and an update must read the previous copy before it is
//! overwritten.

use crate::error::NormalizeResult;
use crate::normalize::{normalize, NormalizedEvent};
use crate::Client;
use std::sync::Arc;
use strata_cache::CacheApplicator;
use strata_types::GatewayDispatch;
use tracing::{debug, warn};

/// Runs inbound dispatches through the normalizer and the cache applicator.
pub struct EventPipeline {
    client: Arc<Client>,
    applicator: CacheApplicator,
}

impl EventPipeline {
    /// Creates a pipeline whose applicator shares the client's builder.
    pub fn new(client: Arc<Client>) -> Self {
        let applicator = CacheApplicator::new(Arc::clone(client.builder()));
        Self { client, applicator }
    }

    pub fn client(&self) -> &Arc<Client> {
        &self.client
    }

    /// Normalizes `dispatch`, then writes it into the cache.
    ///
    /// Cache write failures are logged and swallowed: the cache is
    /// best-effort and the normalized event is still valid.
    pub async fn handle(&self, dispatch: GatewayDispatch) -> NormalizeResult<NormalizedEvent> {
        let name = dispatch.t.clone();
        let normalized = normalize(&self.client, dispatch.clone()).await?;
        debug!("Normalized {}", name);

        if let Err(e) = self.applicator.apply(self.client.cache(), &dispatch).await {
            warn!("Failed to apply {} to cache: {}", name, e);
        }
        Ok(normalized)
    }

    /// Handles dispatches one after another, in order.
    pub async fn handle_all(
        &self,
        dispatches: impl IntoIterator<Item = GatewayDispatch>,
    ) -> Vec<NormalizeResult<NormalizedEvent>> {
        let mut results = Vec::new();
        for dispatch in dispatches {
            results.push(self.handle(dispatch).await);
        }
        results
    }
}
