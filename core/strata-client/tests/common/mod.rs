#![allow(dead_code)]

use serde_json::json;
use std::sync::Arc;
use strata_cache::{Cache, CacheConfig, MemoryAdapter};
use strata_client::rest::mock::MockRest;
use strata_client::{Client, RestTransport};
use strata_model::Structure;
use strata_types::{EntityKind, Snowflake};

pub const BOT_ID: u64 = 1000;
pub const GUILD_ID: u64 = 500;
pub const CHANNEL_ID: u64 = 77;

/// A client over a synchronous in-memory cache and a recording transport.
pub struct Harness {
    pub client: Arc<Client>,
    pub adapter: Arc<MemoryAdapter>,
    pub rest: Arc<MockRest>,
}

pub fn harness(config: CacheConfig) -> Harness {
    let adapter = Arc::new(MemoryAdapter::new());
    let rest = Arc::new(MockRest::new());
    let cache = Cache::new(adapter.clone(), config);
    let client = Client::new(sf(BOT_ID), cache, rest.clone() as Arc<dyn RestTransport>);
    Harness {
        client: Arc::new(client),
        adapter,
        rest,
    }
}

pub fn sf(n: u64) -> Snowflake {
    Snowflake::new(n)
}

pub fn message(id: &str, content: &str) -> Structure {
    Structure::from_raw(
        EntityKind::Message,
        &json!({"id": id, "channel_id": CHANNEL_ID.to_string(), "content": content}),
    )
    .unwrap()
}

pub fn member(guild: u64, user: u64) -> Structure {
    Structure::from_raw(
        EntityKind::Member,
        &json!({"guild_id": guild.to_string(), "user": {"id": user.to_string()}, "nick": "bot"}),
    )
    .unwrap()
}

pub fn guild(id: u64) -> Structure {
    Structure::from_raw(EntityKind::Guild, &json!({"id": id.to_string(), "name": "home"})).unwrap()
}

pub fn channel(id: u64) -> Structure {
    Structure::from_raw(EntityKind::Channel, &json!({"id": id.to_string(), "name": "general"})).unwrap()
}

pub fn user(id: u64) -> Structure {
    Structure::from_raw(EntityKind::User, &json!({"id": id.to_string(), "username": "someone"})).unwrap()
}
