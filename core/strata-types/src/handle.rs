//! Entity kinds and handles.
//!
//! A handle locates an entity; it never owns the entity's data. Kinds that
//! live inside a guild (members) carry the guild id as their scope.

use crate::{Error, Snowflake};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kinds of entity the core knows how to cache and resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Message,
    Member,
    Guild,
    Channel,
    User,
}

impl EntityKind {
    /// All kinds, in a stable order.
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Message,
        EntityKind::Member,
        EntityKind::Guild,
        EntityKind::Channel,
        EntityKind::User,
    ];

    /// Whether a handle of this kind is meaningless without an owning scope.
    #[must_use]
    pub const fn requires_scope(&self) -> bool {
        matches!(self, EntityKind::Member)
    }

    /// JSON pointer to the id inside a raw wire payload of this kind.
    #[must_use]
    pub const fn id_pointer(&self) -> &'static str {
        match self {
            EntityKind::Member => "/user/id",
            _ => "/id",
        }
    }

    /// JSON pointer to the owning scope inside a raw wire payload, if any.
    #[must_use]
    pub const fn scope_pointer(&self) -> Option<&'static str> {
        match self {
            EntityKind::Member => Some("/guild_id"),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Message => "message",
            EntityKind::Member => "member",
            EntityKind::Guild => "guild",
            EntityKind::Channel => "channel",
            EntityKind::User => "user",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownKind(s.to_string()))
    }
}

/// Locates a single entity: `(kind, scope?, id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityHandle {
    kind: EntityKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scope: Option<Snowflake>,
    id: Snowflake,
}

impl EntityHandle {
    /// Creates a handle. Scope-requiring kinds must be given a scope; use the
    /// per-kind constructors where possible.
    #[must_use]
    pub const fn new(kind: EntityKind, scope: Option<Snowflake>, id: Snowflake) -> Self {
        Self { kind, scope, id }
    }

    #[must_use]
    pub const fn member(guild_id: Snowflake, user_id: Snowflake) -> Self {
        Self::new(EntityKind::Member, Some(guild_id), user_id)
    }

    #[must_use]
    pub const fn guild(id: Snowflake) -> Self {
        Self::new(EntityKind::Guild, None, id)
    }

    #[must_use]
    pub const fn channel(id: Snowflake) -> Self {
        Self::new(EntityKind::Channel, None, id)
    }

    #[must_use]
    pub const fn message(id: Snowflake) -> Self {
        Self::new(EntityKind::Message, None, id)
    }

    #[must_use]
    pub const fn user(id: Snowflake) -> Self {
        Self::new(EntityKind::User, None, id)
    }

    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    #[must_use]
    pub const fn scope(&self) -> Option<Snowflake> {
        self.scope
    }

    #[must_use]
    pub const fn id(&self) -> Snowflake {
        self.id
    }

    /// True when the kind needs a scope and this handle has none.
    #[must_use]
    pub const fn is_missing_scope(&self) -> bool {
        self.kind.requires_scope() && self.scope.is_none()
    }
}

impl fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scope {
            Some(scope) => write!(f, "{}:{}/{}", self.kind, scope, self.id),
            None => write!(f, "{}:{}", self.kind, self.id),
        }
    }
}
