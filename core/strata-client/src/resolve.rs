//! Three-mode resolution dispatcher.
//!
//! Every accessor (`channel`, `me`, `guild`, ...) funnels into one
//! [`Resolver`], so the cache/rest/flow semantics live in a single place:
//!
//! | mode  | scope present                        | scope missing          |
//! |-------|--------------------------------------|------------------------|
//! | cache | cache lookup, bridged; miss is `None` | `MissingScope` error   |
//! | rest  | one forced fetch                      | `MissingScope` error   |
//! | flow  | one unforced fetch                    | `None`, no fetch       |
//!
//! The cache and rest failure for a missing scope is deliberate: only flow
//! degrades gracefully.

use crate::error::{ResolveError, ResolveResult, RestResult};
use crate::rest::{FetchOptions, FetchQuery};
use crate::Client;
use futures::future::{self, BoxFuture, Either};
use std::fmt;
use std::future::{IntoFuture, Ready};
use strata_cache::Bridged;
use strata_model::Structure;
use strata_types::{EntityHandle, EntityKind, ResolutionMode};

/// What an accessor asks for: a complete handle, or only the kind when the
/// context lacks the scope the handle would be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Handle(EntityHandle),
    MissingScope(EntityKind),
}

impl Target {
    pub fn kind(&self) -> EntityKind {
        match self {
            Target::Handle(handle) => handle.kind(),
            Target::MissingScope(kind) => *kind,
        }
    }

    /// `Handle` when `handle` is present, `MissingScope(kind)` otherwise.
    pub fn from_option(kind: EntityKind, handle: Option<EntityHandle>) -> Self {
        handle.map_or(Target::MissingScope(kind), Target::from)
    }
}

impl From<EntityHandle> for Target {
    fn from(handle: EntityHandle) -> Self {
        if handle.is_missing_scope() {
            Target::MissingScope(handle.kind())
        } else {
            Target::Handle(handle)
        }
    }
}

/// The result of a dispatch. The variant is decided by the mode alone:
/// `cache` always yields `Cached`, `rest` and `flow` always yield `Fetched`.
pub enum Resolution<'a> {
    /// Cache-shaped: possibly absent, ready immediately on a synchronous
    /// backend.
    Cached(Bridged<'a, Option<Structure>>),
    /// Network-shaped: always deferred; failures come straight from the
    /// transport.
    Fetched(BoxFuture<'a, RestResult<Option<Structure>>>),
}

impl<'a> Resolution<'a> {
    #[must_use]
    pub fn is_cached(&self) -> bool {
        matches!(self, Resolution::Cached(_))
    }

    pub fn into_cached(self) -> Option<Bridged<'a, Option<Structure>>> {
        match self {
            Resolution::Cached(bridged) => Some(bridged),
            Resolution::Fetched(_) => None,
        }
    }

    pub fn into_fetched(self) -> Option<BoxFuture<'a, RestResult<Option<Structure>>>> {
        match self {
            Resolution::Fetched(fetch) => Some(fetch),
            Resolution::Cached(_) => None,
        }
    }
}

/// Awaiting a resolution gives the value whatever its shape; a cache lookup
/// never fails.
impl<'a> IntoFuture for Resolution<'a> {
    type Output = RestResult<Option<Structure>>;
    type IntoFuture = Either<
        futures::future::Map<
            Either<Ready<Option<Structure>>, BoxFuture<'a, Option<Structure>>>,
            fn(Option<Structure>) -> RestResult<Option<Structure>>,
        >,
        BoxFuture<'a, RestResult<Option<Structure>>>,
    >;

    fn into_future(self) -> Self::IntoFuture {
        use futures::FutureExt;
        match self {
            Resolution::Cached(bridged) => Either::Left(
                bridged
                    .into_future()
                    .map(Ok as fn(Option<Structure>) -> RestResult<Option<Structure>>),
            ),
            Resolution::Fetched(fetch) => Either::Right(fetch),
        }
    }
}

impl fmt::Debug for Resolution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Cached(bridged) => f.debug_tuple("Cached").field(bridged).finish(),
            Resolution::Fetched(_) => f.write_str("Fetched(..)"),
        }
    }
}

/// Dispatches reads against a [`Client`]'s cache and transport.
///
/// Stateless: each call reads the cache or issues a fetch and keeps nothing.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    client: &'a Client,
}

impl<'a> Resolver<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Resolves `target` in `mode`.
    pub fn resolve(
        &self,
        target: impl Into<Target>,
        mode: ResolutionMode,
        query: Option<FetchQuery>,
    ) -> ResolveResult<Resolution<'a>> {
        match target.into() {
            Target::Handle(handle) => Ok(self.resolve_handle(handle, mode, query)),
            Target::MissingScope(kind) => match mode {
                ResolutionMode::Flow => Ok(Resolution::Fetched(Box::pin(future::ready(Ok(None))))),
                ResolutionMode::Cache | ResolutionMode::Rest => {
                    Err(ResolveError::MissingScope { kind, mode })
                }
            },
        }
    }

    /// Resolves a handle whose scope is known to be present.
    pub fn resolve_handle(
        &self,
        handle: EntityHandle,
        mode: ResolutionMode,
        query: Option<FetchQuery>,
    ) -> Resolution<'a> {
        match mode {
            ResolutionMode::Cache => Resolution::Cached(self.cached(handle)),
            ResolutionMode::Rest | ResolutionMode::Flow => {
                let fetch = self.fetch(handle, mode.forces_fetch(), query);
                Resolution::Fetched(Box::pin(async move { fetch.await.map(Some) }))
            }
        }
    }

    /// `cache` mode: local lookup only.
    pub fn resolve_from_cache(
        &self,
        target: impl Into<Target>,
    ) -> ResolveResult<Bridged<'a, Option<Structure>>> {
        match target.into() {
            Target::Handle(handle) => Ok(self.cached(handle)),
            Target::MissingScope(kind) => Err(ResolveError::MissingScope {
                kind,
                mode: ResolutionMode::Cache,
            }),
        }
    }

    /// `rest` mode: exactly one forced fetch. Yields a concrete structure or
    /// the transport's failure.
    pub fn resolve_from_network(
        &self,
        target: impl Into<Target>,
        query: Option<FetchQuery>,
    ) -> ResolveResult<BoxFuture<'a, RestResult<Structure>>> {
        match target.into() {
            Target::Handle(handle) => Ok(self.fetch(handle, true, query)),
            Target::MissingScope(kind) => Err(ResolveError::MissingScope {
                kind,
                mode: ResolutionMode::Rest,
            }),
        }
    }

    /// `flow` mode: an unforced fetch, or `None` without fetching when the
    /// scope is missing. Never fails before the transport is reached.
    pub fn resolve_auto(
        &self,
        target: impl Into<Target>,
        query: Option<FetchQuery>,
    ) -> BoxFuture<'a, RestResult<Option<Structure>>> {
        match target.into() {
            Target::Handle(handle) => {
                let fetch = self.fetch(handle, false, query);
                Box::pin(async move { fetch.await.map(Some) })
            }
            Target::MissingScope(_) => Box::pin(future::ready(Ok(None))),
        }
    }

    /// Issues one fetch. Shared by every network-shaped path.
    pub fn fetch(
        &self,
        handle: EntityHandle,
        force: bool,
        query: Option<FetchQuery>,
    ) -> BoxFuture<'a, RestResult<Structure>> {
        let rest = self.client.rest();
        Box::pin(async move { rest.fetch(&handle, FetchOptions { force, query }).await })
    }

    /// Asynchronous backends answer pending on every path, disabled sections
    /// included, so callers see one shape per backend.
    fn cached(&self, handle: EntityHandle) -> Bridged<'a, Option<Structure>> {
        let cache = self.client.cache();
        let lookup = cache.get(&handle);
        if !cache.is_async() {
            return lookup;
        }
        match lookup.try_ready() {
            Ok(value) => Bridged::pending(future::ready(value)),
            Err(pending) => pending,
        }
    }
}
