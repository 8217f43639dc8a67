//! Raw gateway dispatch envelopes.
//!
//! A dispatch carries the event name (`t`) and its payload (`d`) exactly as
//! the gateway sent them, wire casing included. Envelopes are transient: the
//! normalizer consumes each one once.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw inbound gateway event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayDispatch {
    /// Event name, e.g. `MESSAGE_DELETE`.
    pub t: String,

    /// Event payload in wire casing.
    pub d: serde_json::Value,

    /// Sequence number, when the dispatch came off a live session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s: Option<u64>,
}

impl GatewayDispatch {
    /// Creates a dispatch without a sequence number.
    #[must_use]
    pub fn new(name: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            t: name.into(),
            d: data,
            s: None,
        }
    }

    /// The mutation category of this event, if it is one the core normalizes.
    #[must_use]
    pub fn category(&self) -> Option<EventCategory> {
        EventCategory::from_name(&self.t)
    }
}

/// Message event categories handled by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    MessageCreate,
    MessageUpdate,
    MessageDelete,
    MessageDeleteBulk,
    ReactionAdd,
    ReactionRemove,
    ReactionRemoveAll,
    ReactionRemoveEmoji,
    PollVoteAdd,
    PollVoteRemove,
}

impl EventCategory {
    pub const ALL: [EventCategory; 10] = [
        EventCategory::MessageCreate,
        EventCategory::MessageUpdate,
        EventCategory::MessageDelete,
        EventCategory::MessageDeleteBulk,
        EventCategory::ReactionAdd,
        EventCategory::ReactionRemove,
        EventCategory::ReactionRemoveAll,
        EventCategory::ReactionRemoveEmoji,
        EventCategory::PollVoteAdd,
        EventCategory::PollVoteRemove,
    ];

    /// Maps a wire event name to its category.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// The wire event name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            EventCategory::MessageCreate => "MESSAGE_CREATE",
            EventCategory::MessageUpdate => "MESSAGE_UPDATE",
            EventCategory::MessageDelete => "MESSAGE_DELETE",
            EventCategory::MessageDeleteBulk => "MESSAGE_DELETE_BULK",
            EventCategory::ReactionAdd => "MESSAGE_REACTION_ADD",
            EventCategory::ReactionRemove => "MESSAGE_REACTION_REMOVE",
            EventCategory::ReactionRemoveAll => "MESSAGE_REACTION_REMOVE_ALL",
            EventCategory::ReactionRemoveEmoji => "MESSAGE_REACTION_REMOVE_EMOJI",
            EventCategory::PollVoteAdd => "MESSAGE_POLL_VOTE_ADD",
            EventCategory::PollVoteRemove => "MESSAGE_POLL_VOTE_REMOVE",
        }
    }

    /// Whether normalizing this category reads the cache.
    ///
    /// Only deletes and updates do: the source of truth has already lost (or
    /// is about to overwrite) the data the cache still holds.
    #[must_use]
    pub const fn reads_cache(&self) -> bool {
        matches!(
            self,
            EventCategory::MessageUpdate
                | EventCategory::MessageDelete
                | EventCategory::MessageDeleteBulk
        )
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
