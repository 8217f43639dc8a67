mod common;

use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use strata_cache::CacheConfig;
use strata_client::{FetchOptions, FetchQuery, InteractionContext, ResolveError};
use strata_model::ModelError;
use strata_types::{EntityHandle, EntityKind, ResolutionMode};

fn guild_interaction() -> serde_json::Value {
    json!({
        "guild_id": GUILD_ID.to_string(),
        "channel_id": CHANNEL_ID.to_string(),
        "member": {
            "user": {"id": "10", "username": "caller"},
            "nick": "boss",
        },
    })
}

fn dm_interaction() -> serde_json::Value {
    json!({
        "channel": {"id": CHANNEL_ID.to_string()},
        "user": {"id": "10", "username": "caller"},
    })
}

// ── Construction ─────────────────────────────────────────────────

#[test]
fn guild_interaction_carries_scope_and_member() {
    let h = harness(CacheConfig::default());
    let ctx = InteractionContext::from_interaction(h.client.clone(), &guild_interaction()).unwrap();

    assert_eq!(ctx.guild_id(), Some(sf(GUILD_ID)));
    assert_eq!(ctx.channel_id(), sf(CHANNEL_ID));
    assert_eq!(ctx.author().id, sf(10));
    assert_eq!(ctx.author().get_str("/username"), Some("caller"));

    let member = ctx.member().unwrap();
    assert_eq!(member.handle(), EntityHandle::member(sf(GUILD_ID), sf(10)));
    assert_eq!(member.get_str("/nick"), Some("boss"));
    assert_eq!(ctx.in_guild().unwrap().guild_id(), sf(GUILD_ID));
}

#[test]
fn dm_interaction_has_no_guild() {
    let h = harness(CacheConfig::default());
    let ctx = InteractionContext::from_interaction(h.client.clone(), &dm_interaction()).unwrap();

    assert_eq!(ctx.guild_id(), None);
    assert_eq!(ctx.channel_id(), sf(CHANNEL_ID));
    assert_eq!(ctx.author().id, sf(10));
    assert!(ctx.member().is_none());
    assert!(ctx.in_guild().is_none());
}

#[test]
fn interaction_without_channel_is_rejected() {
    let h = harness(CacheConfig::default());
    let err = InteractionContext::from_interaction(h.client.clone(), &json!({"user": {"id": "1"}}))
        .unwrap_err();
    assert!(matches!(
        err,
        ModelError::MissingId {
            kind: EntityKind::Channel,
            ..
        }
    ));
}

// ── Accessors outside a guild ────────────────────────────────────

#[tokio::test]
async fn me_in_flow_mode_outside_guild_is_absent_without_fetch() {
    let h = harness(CacheConfig::default());
    let ctx = InteractionContext::new(h.client.clone(), None, sf(CHANNEL_ID), user(10));

    let me = ctx.me(ResolutionMode::Flow).unwrap().await.unwrap();
    assert_eq!(me, None);

    let guild = ctx.guild(ResolutionMode::Flow, None).unwrap().await.unwrap();
    assert_eq!(guild, None);
    assert_eq!(h.rest.call_count(), 0);
}

#[test]
fn me_in_cache_or_rest_mode_outside_guild_fails() {
    let h = harness(CacheConfig::default());
    let ctx = InteractionContext::new(h.client.clone(), None, sf(CHANNEL_ID), user(10));

    for mode in [ResolutionMode::Cache, ResolutionMode::Rest] {
        let err = ctx.me(mode).unwrap_err();
        assert_eq!(
            err,
            ResolveError::MissingScope {
                kind: EntityKind::Member,
                mode
            }
        );
    }
    assert_eq!(h.rest.call_count(), 0);
}

#[tokio::test]
async fn channel_and_user_resolve_without_scope() {
    let h = harness(CacheConfig::default());
    h.client.cache().set(channel(CHANNEL_ID)).await;
    h.rest.respond_with(user(10));
    let ctx = InteractionContext::new(h.client.clone(), None, sf(CHANNEL_ID), user(10));

    let channel_value = ctx.channel(ResolutionMode::Cache).unwrap().await.unwrap();
    assert_eq!(channel_value, Some(channel(CHANNEL_ID)));

    let user_value = ctx.user(sf(10), ResolutionMode::Rest).unwrap().await.unwrap();
    assert_eq!(user_value, Some(user(10)));
    assert_eq!(h.rest.call_count(), 1);
}

// ── Guild context ────────────────────────────────────────────────

#[tokio::test]
async fn guild_context_me_in_rest_mode_forces_one_fetch() {
    let h = harness(CacheConfig::default());
    h.rest.respond_with(member(GUILD_ID, BOT_ID));
    let ctx = InteractionContext::from_interaction(h.client.clone(), &guild_interaction()).unwrap();
    let guild_ctx = ctx.in_guild().unwrap();

    let me = guild_ctx.me(ResolutionMode::Rest).await.unwrap();
    assert_eq!(me, Some(member(GUILD_ID, BOT_ID)));

    let calls = h.rest.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].handle, EntityHandle::member(sf(GUILD_ID), sf(BOT_ID)));
    assert!(calls[0].options.force);
}

#[tokio::test]
async fn guild_context_guild_forwards_query() {
    let h = harness(CacheConfig::default());
    h.rest.respond_with(guild(GUILD_ID));
    let ctx = InteractionContext::from_interaction(h.client.clone(), &guild_interaction()).unwrap();
    let guild_ctx = ctx.in_guild().unwrap();

    let fetched = guild_ctx
        .guild(ResolutionMode::Flow, Some(FetchQuery::with_counts(true)))
        .await
        .unwrap();
    assert_eq!(fetched, Some(guild(GUILD_ID)));
    assert_eq!(
        h.rest.calls()[0].options,
        FetchOptions {
            force: false,
            query: Some(FetchQuery::with_counts(true)),
        }
    );
}

#[tokio::test]
async fn guild_context_cache_mode_is_bridged() {
    let h = harness(CacheConfig::default());
    h.client.cache().set(member(GUILD_ID, BOT_ID)).await;
    let ctx = InteractionContext::from_interaction(h.client.clone(), &guild_interaction()).unwrap();
    let guild_ctx = ctx.in_guild().unwrap();

    let cached = guild_ctx.me(ResolutionMode::Cache).into_cached().unwrap();
    assert!(cached.is_ready());
    assert_eq!(cached.into_ready().flatten(), Some(member(GUILD_ID, BOT_ID)));
    assert_eq!(h.rest.call_count(), 0);
}

#[tokio::test]
async fn guild_context_fetches_are_concrete() {
    let h = harness(CacheConfig::default());
    h.rest.respond_with(guild(GUILD_ID));
    h.rest.respond_with(member(GUILD_ID, BOT_ID));
    let ctx = InteractionContext::from_interaction(h.client.clone(), &guild_interaction()).unwrap();
    let guild_ctx = ctx.in_guild().unwrap();

    let fetched_guild = guild_ctx.fetch_guild(true, None).await.unwrap();
    assert_eq!(fetched_guild.get_str("/name"), Some("home"));

    let me = guild_ctx.fetch_me(false).await.unwrap();
    assert_eq!(me.handle(), EntityHandle::member(sf(GUILD_ID), sf(BOT_ID)));
    assert_eq!(h.rest.call_count(), 2);
}

#[tokio::test]
async fn member_of_uses_interaction_guild() {
    let h = harness(CacheConfig::default());
    h.rest.respond_with(member(GUILD_ID, 10));
    let ctx = InteractionContext::from_interaction(h.client.clone(), &guild_interaction()).unwrap();

    let found = ctx.member_of(sf(10), ResolutionMode::Flow).unwrap().await.unwrap();
    assert_eq!(found, Some(member(GUILD_ID, 10)));
}
