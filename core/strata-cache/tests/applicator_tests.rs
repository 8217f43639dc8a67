use pretty_assertions::assert_eq;
use serde_json::json;
use strata_cache::{Cache, CacheApplicator, CacheConfig, CacheError};
use strata_types::{EntityHandle, GatewayDispatch, Snowflake};

fn sf(n: u64) -> Snowflake {
    Snowflake::new(n)
}

fn dispatch(name: &str, data: serde_json::Value) -> GatewayDispatch {
    GatewayDispatch::new(name, data)
}

// ── Create / Update ──────────────────────────────────────────────

#[tokio::test]
async fn create_caches_message() {
    let cache = Cache::in_memory(CacheConfig::default());
    let applicator = CacheApplicator::default();

    let wrote = applicator
        .apply(&cache, &dispatch("MESSAGE_CREATE", json!({"id": "1", "content": "hi"})))
        .await
        .unwrap();

    assert!(wrote);
    let cached = cache.get(&EntityHandle::message(sf(1))).await.unwrap();
    assert_eq!(cached.get_str("/content"), Some("hi"));
}

#[tokio::test]
async fn update_overlays_partial_payload() {
    let cache = Cache::in_memory(CacheConfig::default().with_asynchronous(true));
    let applicator = CacheApplicator::default();

    applicator
        .apply(
            &cache,
            &dispatch("MESSAGE_CREATE", json!({"id": "1", "content": "old", "channel_id": "5"})),
        )
        .await
        .unwrap();
    applicator
        .apply(&cache, &dispatch("MESSAGE_UPDATE", json!({"id": "1", "content": "new"})))
        .await
        .unwrap();

    let cached = cache.get(&EntityHandle::message(sf(1))).await.unwrap();
    assert_eq!(cached.data, json!({"id": "1", "content": "new", "channelId": "5"}));
}

#[tokio::test]
async fn update_without_previous_stores_payload() {
    let cache = Cache::in_memory(CacheConfig::default());
    let applicator = CacheApplicator::default();

    applicator
        .apply(&cache, &dispatch("MESSAGE_UPDATE", json!({"id": "2", "content": "x"})))
        .await
        .unwrap();

    assert!(cache.get(&EntityHandle::message(sf(2))).await.is_some());
}

#[tokio::test]
async fn disabled_section_is_not_written() {
    let cache = Cache::in_memory(CacheConfig::disabled());
    let applicator = CacheApplicator::default();

    let wrote = applicator
        .apply(&cache, &dispatch("MESSAGE_CREATE", json!({"id": "1"})))
        .await
        .unwrap();
    assert!(!wrote);
}

// ── Delete ───────────────────────────────────────────────────────

#[tokio::test]
async fn delete_evicts_message() {
    let cache = Cache::in_memory(CacheConfig::default());
    let applicator = CacheApplicator::default();
    applicator
        .apply(&cache, &dispatch("MESSAGE_CREATE", json!({"id": "42"})))
        .await
        .unwrap();

    let removed = applicator
        .apply(&cache, &dispatch("MESSAGE_DELETE", json!({"id": "42", "channel_id": "1"})))
        .await
        .unwrap();

    assert!(removed);
    assert!(cache.get(&EntityHandle::message(sf(42))).await.is_none());
}

#[tokio::test]
async fn delete_of_uncached_message_is_noop() {
    let cache = Cache::in_memory(CacheConfig::default());
    let removed = CacheApplicator::default()
        .apply(&cache, &dispatch("MESSAGE_DELETE", json!({"id": "42"})))
        .await
        .unwrap();
    assert!(!removed);
}

#[tokio::test]
async fn bulk_delete_evicts_every_id() {
    let cache = Cache::in_memory(CacheConfig::default());
    let applicator = CacheApplicator::default();
    for id in ["1", "2", "3"] {
        applicator
            .apply(&cache, &dispatch("MESSAGE_CREATE", json!({"id": id})))
            .await
            .unwrap();
    }

    applicator
        .apply(&cache, &dispatch("MESSAGE_DELETE_BULK", json!({"ids": ["1", "3"], "channel_id": "9"})))
        .await
        .unwrap();

    assert!(cache.get(&EntityHandle::message(sf(1))).await.is_none());
    assert!(cache.get(&EntityHandle::message(sf(2))).await.is_some());
    assert!(cache.get(&EntityHandle::message(sf(3))).await.is_none());
}

#[tokio::test]
async fn bulk_delete_skips_unusable_ids() {
    let cache = Cache::in_memory(CacheConfig::default());
    let applicator = CacheApplicator::default();
    applicator
        .apply(&cache, &dispatch("MESSAGE_CREATE", json!({"id": "4"})))
        .await
        .unwrap();

    let removed = applicator
        .apply(&cache, &dispatch("MESSAGE_DELETE_BULK", json!({"ids": ["abc", "4"]})))
        .await
        .unwrap();

    assert!(removed);
    assert!(cache.get(&EntityHandle::message(sf(4))).await.is_none());
}

#[tokio::test]
async fn delete_without_id_is_invalid() {
    let cache = Cache::in_memory(CacheConfig::default());
    let err = CacheApplicator::default()
        .apply(&cache, &dispatch("MESSAGE_DELETE", json!({"channel_id": "1"})))
        .await
        .unwrap_err();
    assert!(matches!(err, CacheError::InvalidPayload { .. }));
}

// ── Skipped events ───────────────────────────────────────────────

#[tokio::test]
async fn reactions_and_unknown_events_are_skipped() {
    let cache = Cache::in_memory(CacheConfig::default());
    let applicator = CacheApplicator::default();

    for name in ["MESSAGE_REACTION_ADD", "MESSAGE_POLL_VOTE_ADD", "TYPING_START"] {
        let wrote = applicator
            .apply(&cache, &dispatch(name, json!({"message_id": "1"})))
            .await
            .unwrap();
        assert!(!wrote, "{name} should not write");
    }
}
