//! Network transport abstraction.
//!
//! Defines the fetch contract the resolver depends on, allowing it to work
//! with any HTTP client. Retries, rate limits and authentication belong to
//! implementations, never to the resolver.

use crate::error::{RestError, RestResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strata_cache::Cache;
use strata_model::Structure;
use strata_types::EntityHandle;
use tracing::{debug, trace};

/// Auxiliary query parameters for a fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchQuery {
    /// Ask for approximate member and presence counts (guilds only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_counts: Option<bool>,
}

impl FetchQuery {
    #[must_use]
    pub fn with_counts(with_counts: bool) -> Self {
        Self {
            with_counts: Some(with_counts),
        }
    }
}

/// How a fetch should be performed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Bypass any cache the transport keeps and always hit the network.
    pub force: bool,
    pub query: Option<FetchQuery>,
}

/// A transport that can fetch entities from the platform.
#[async_trait]
pub trait RestTransport: Send + Sync {
    /// Fetches the entity located by `handle`.
    ///
    /// Scoped handles always carry their scope here; the resolver never
    /// issues a fetch for a handle that lacks one.
    async fn fetch(&self, handle: &EntityHandle, options: FetchOptions) -> RestResult<Structure>;
}

#[async_trait]
impl<T: RestTransport + ?Sized> RestTransport for Arc<T> {
    async fn fetch(&self, handle: &EntityHandle, options: FetchOptions) -> RestResult<Structure> {
        (**self).fetch(handle, options).await
    }
}

/// A transport with no network behind it. Every fetch fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineRest;

#[async_trait]
impl RestTransport for OfflineRest {
    async fn fetch(&self, _handle: &EntityHandle, _options: FetchOptions) -> RestResult<Structure> {
        Err(RestError::Unavailable)
    }
}

/// Wraps a transport with the cache: unforced fetches are answered from the
/// cache on a hit, and every successful fetch is written back.
pub struct CacheFirstRest<R> {
    inner: R,
    cache: Cache,
}

impl<R: RestTransport> CacheFirstRest<R> {
    pub fn new(inner: R, cache: Cache) -> Self {
        Self { inner, cache }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

#[async_trait]
impl<R: RestTransport> RestTransport for CacheFirstRest<R> {
    async fn fetch(&self, handle: &EntityHandle, options: FetchOptions) -> RestResult<Structure> {
        // A query asks for fields the cached record does not carry.
        if !options.force && options.query.is_none() {
            if let Some(hit) = self.cache.get(handle).await {
                trace!("Answered {} from cache", handle);
                return Ok(hit);
            }
        }

        let mut fetched = self.inner.fetch(handle, options).await?;
        if let (Some(scope), None) = (handle.scope(), fetched.scope) {
            fetched = fetched.with_scope(scope);
        }
        self.cache.set(fetched.clone()).await;
        debug!("Fetched and cached {}", handle);
        Ok(fetched)
    }
}

/// A recording transport for testing.
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, PoisonError};

    /// A fetch observed by [`MockRest`].
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct FetchCall {
        pub handle: EntityHandle,
        pub options: FetchOptions,
    }

    #[derive(Debug, Clone)]
    enum MockResponse {
        Found(Structure),
        Fail { status: u16, message: String },
    }

    /// Answers fetches from canned responses and records every call.
    /// Handles without a canned response fail with [`RestError::NotFound`].
    #[derive(Debug, Default)]
    pub struct MockRest {
        responses: Mutex<HashMap<EntityHandle, MockResponse>>,
        calls: Mutex<Vec<FetchCall>>,
    }

    impl MockRest {
        pub fn new() -> Self {
            Self::default()
        }

        /// Serves `structure` for its own handle.
        pub fn respond_with(&self, structure: Structure) -> &Self {
            self.respond_at(structure.handle(), structure)
        }

        /// Serves `structure` for `handle`.
        pub fn respond_at(&self, handle: EntityHandle, structure: Structure) -> &Self {
            self.responses
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(handle, MockResponse::Found(structure));
            self
        }

        /// Fails fetches of `handle` with an HTTP error.
        pub fn fail(&self, handle: EntityHandle, status: u16, message: impl Into<String>) -> &Self {
            self.responses
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(
                    handle,
                    MockResponse::Fail {
                        status,
                        message: message.into(),
                    },
                );
            self
        }

        /// Every fetch issued so far, in order.
        pub fn calls(&self) -> Vec<FetchCall> {
            self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
        }
    }

    #[async_trait]
    impl RestTransport for MockRest {
        async fn fetch(&self, handle: &EntityHandle, options: FetchOptions) -> RestResult<Structure> {
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(FetchCall {
                    handle: *handle,
                    options,
                });

            let response = self
                .responses
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .get(handle)
                .cloned();

            match response {
                Some(MockResponse::Found(structure)) => Ok(structure),
                Some(MockResponse::Fail { status, message }) => Err(RestError::Http { status, message }),
                None => Err(RestError::NotFound(*handle)),
            }
        }
    }
}
