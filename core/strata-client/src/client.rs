use crate::config::ClientConfig;
use crate::resolve::Resolver;
use crate::rest::RestTransport;
use std::sync::Arc;
use strata_cache::Cache;
use strata_model::{DefaultBuilder, StructureBuilder};
use strata_types::Snowflake;

/// Everything the resolver and normalizer need: the cache, the network
/// transport, the structure builder, and who the bot is.
#[derive(Clone)]
pub struct Client {
    bot_id: Snowflake,
    cache: Cache,
    rest: Arc<dyn RestTransport>,
    builder: Arc<dyn StructureBuilder>,
}

impl Client {
    /// Creates a client with the default structure builder.
    pub fn new(bot_id: Snowflake, cache: Cache, rest: Arc<dyn RestTransport>) -> Self {
        Self {
            bot_id,
            cache,
            rest,
            builder: Arc::new(DefaultBuilder),
        }
    }

    /// Creates a client with an in-memory cache shaped by `config`.
    pub fn from_config(config: &ClientConfig, rest: Arc<dyn RestTransport>) -> Self {
        Self::new(config.bot_id, Cache::in_memory(config.cache.clone()), rest)
    }

    /// Replaces the structure builder.
    #[must_use]
    pub fn with_builder(mut self, builder: Arc<dyn StructureBuilder>) -> Self {
        self.builder = builder;
        self
    }

    pub fn bot_id(&self) -> Snowflake {
        self.bot_id
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn rest(&self) -> &Arc<dyn RestTransport> {
        &self.rest
    }

    pub fn builder(&self) -> &Arc<dyn StructureBuilder> {
        &self.builder
    }

    /// The three-mode dispatcher over this client's cache and transport.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(self)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("bot_id", &self.bot_id)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
