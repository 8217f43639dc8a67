use strata_types::{EntityHandle, EntityKind, ResolutionMode, Snowflake};
use std::str::FromStr;

fn sf(n: u64) -> Snowflake {
    Snowflake::new(n)
}

// ── EntityKind ───────────────────────────────────────────────────

#[test]
fn only_members_require_scope() {
    for kind in EntityKind::ALL {
        assert_eq!(kind.requires_scope(), kind == EntityKind::Member);
    }
}

#[test]
fn member_ids_live_under_user() {
    assert_eq!(EntityKind::Member.id_pointer(), "/user/id");
    assert_eq!(EntityKind::Member.scope_pointer(), Some("/guild_id"));
    assert_eq!(EntityKind::Message.id_pointer(), "/id");
    assert_eq!(EntityKind::Message.scope_pointer(), None);
}

#[test]
fn kind_parse_and_display() {
    for kind in EntityKind::ALL {
        assert_eq!(EntityKind::from_str(kind.as_str()).unwrap(), kind);
    }
    assert!(EntityKind::from_str("emoji").is_err());
}

// ── EntityHandle ─────────────────────────────────────────────────

#[test]
fn member_handle_carries_scope() {
    let handle = EntityHandle::member(sf(10), sf(20));
    assert_eq!(handle.kind(), EntityKind::Member);
    assert_eq!(handle.scope(), Some(sf(10)));
    assert_eq!(handle.id(), sf(20));
    assert!(!handle.is_missing_scope());
}

#[test]
fn unscoped_member_handle_is_detected() {
    let handle = EntityHandle::new(EntityKind::Member, None, sf(20));
    assert!(handle.is_missing_scope());
}

#[test]
fn unscoped_kinds_never_miss_scope() {
    assert!(!EntityHandle::channel(sf(1)).is_missing_scope());
    assert!(!EntityHandle::guild(sf(1)).is_missing_scope());
    assert!(!EntityHandle::message(sf(1)).is_missing_scope());
    assert!(!EntityHandle::user(sf(1)).is_missing_scope());
}

#[test]
fn handle_display() {
    assert_eq!(EntityHandle::member(sf(1), sf(2)).to_string(), "member:1/2");
    assert_eq!(EntityHandle::channel(sf(3)).to_string(), "channel:3");
}

#[test]
fn handle_serde_skips_absent_scope() {
    let json = serde_json::to_value(EntityHandle::guild(sf(5))).unwrap();
    assert_eq!(json, serde_json::json!({"kind": "guild", "id": "5"}));
    let back: EntityHandle = serde_json::from_value(json).unwrap();
    assert_eq!(back, EntityHandle::guild(sf(5)));
}

// ── ResolutionMode ───────────────────────────────────────────────

#[test]
fn mode_defaults_to_flow() {
    assert_eq!(ResolutionMode::default(), ResolutionMode::Flow);
}

#[test]
fn mode_parse_and_display() {
    for mode in [ResolutionMode::Cache, ResolutionMode::Rest, ResolutionMode::Flow] {
        assert_eq!(ResolutionMode::from_str(&mode.to_string()).unwrap(), mode);
    }
    assert!(ResolutionMode::from_str("auto").is_err());
}

#[test]
fn only_rest_forces_fetch() {
    assert!(ResolutionMode::Rest.forces_fetch());
    assert!(!ResolutionMode::Flow.forces_fetch());
    assert!(!ResolutionMode::Cache.forces_fetch());
}

#[test]
fn mode_serde_is_lowercase() {
    let json = serde_json::to_string(&ResolutionMode::Rest).unwrap();
    assert_eq!(json, r#""rest""#);
}
