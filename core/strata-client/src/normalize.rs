//! Gateway event normalization.
//!
//! Turns raw message dispatches into the values the rest of the client
//! consumes. Only update and delete events read the cache: a deleted
//! message's content exists nowhere else once the platform drops it, and an
//! update overwrites what the cache still remembers. Creates, reactions and
//! poll votes are complete on the wire and skip the cache entirely.

use crate::error::{NormalizeError, NormalizeResult};
use crate::Client;
use futures::future::{self, join_all, Either};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::future::IntoFuture;
use strata_model::{to_camel_case, Structure};
use strata_types::{EntityHandle, EntityKind, EventCategory, GatewayDispatch, Snowflake};

/// A gateway event after normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizedEvent {
    Message(Structure),
    MessageDelete(DeletedMessage),
    MessageDeleteBulk(BulkDelete),
    MessageUpdate(MessageUpdate),
    /// Field-renamed payload; nothing to enrich.
    Passthrough(Value),
}

/// A deleted message: the cached structure when the cache still had it,
/// otherwise the camelCased payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DeletedMessage {
    Cached(Structure),
    Raw(Value),
}

/// One entry of a bulk delete: the cached structure, or the bare id on a miss.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CachedOrId {
    Cached(Structure),
    Id(Snowflake),
    /// An id that is not a snowflake; it can never be cached, so it is
    /// passed through as received.
    Unparsed(Value),
}

/// A bulk delete payload as received, plus one entry per deleted id in the
/// order the ids arrived.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkDelete {
    #[serde(flatten)]
    pub payload: Map<String, Value>,
    pub messages: Vec<CachedOrId>,
}

/// The message after the update, and what the cache held before it.
/// The two are never merged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageUpdate {
    pub message: Structure,
    pub old: Option<Structure>,
}

/// Normalizes any supported dispatch.
pub async fn normalize(client: &Client, dispatch: GatewayDispatch) -> NormalizeResult<NormalizedEvent> {
    let category = dispatch
        .category()
        .ok_or_else(|| NormalizeError::UnsupportedEvent(dispatch.t.clone()))?;
    let data = dispatch.d;

    Ok(match category {
        EventCategory::MessageCreate => NormalizedEvent::Message(message_create(client, &data)?),
        EventCategory::MessageUpdate => NormalizedEvent::MessageUpdate(message_update(client, &data).await?),
        EventCategory::MessageDelete => NormalizedEvent::MessageDelete(message_delete(client, data).await?),
        EventCategory::MessageDeleteBulk => {
            NormalizedEvent::MessageDeleteBulk(message_delete_bulk(client, data).await?)
        }
        EventCategory::ReactionAdd
        | EventCategory::ReactionRemove
        | EventCategory::ReactionRemoveAll
        | EventCategory::ReactionRemoveEmoji => NormalizedEvent::Passthrough(message_reaction(client, data)),
        EventCategory::PollVoteAdd | EventCategory::PollVoteRemove => {
            NormalizedEvent::Passthrough(message_poll_vote(client, data))
        }
    })
}

/// `MESSAGE_CREATE`: built straight from the payload.
pub fn message_create(client: &Client, data: &Value) -> NormalizeResult<Structure> {
    Ok(client.builder().build(EntityKind::Message, data)?)
}

/// `MESSAGE_UPDATE`: the new message, built exactly as a create would be,
/// plus the cached one if any.
pub async fn message_update(client: &Client, data: &Value) -> NormalizeResult<MessageUpdate> {
    let message = message_create(client, data)?;
    let old = client.cache().get(&message.handle()).await;
    Ok(MessageUpdate { message, old })
}

/// `MESSAGE_DELETE`: the cached message on a hit, the camelCased payload on
/// a miss. A missing or malformed id is a miss.
pub async fn message_delete(client: &Client, data: Value) -> NormalizeResult<DeletedMessage> {
    let cached = match data.get("id").and_then(parse_snowflake) {
        Some(id) => client.cache().get(&EntityHandle::message(id)).await,
        None => None,
    };
    Ok(match cached {
        Some(cached) => DeletedMessage::Cached(cached),
        None => DeletedMessage::Raw(to_camel_case(data)),
    })
}

/// `MESSAGE_DELETE_BULK`: every id is looked up independently and
/// concurrently; the output keeps input order.
pub async fn message_delete_bulk(client: &Client, data: Value) -> NormalizeResult<BulkDelete> {
    let event = EventCategory::MessageDeleteBulk;
    let ids = match data.get("ids") {
        Some(Value::Array(ids)) => ids.clone(),
        Some(_) => return Err(invalid(event, "/ids is not an array".into())),
        None => return Err(invalid(event, "missing /ids".into())),
    };

    let cache = client.cache();
    let lookups = ids.into_iter().map(|raw| match parse_snowflake(&raw) {
        Some(id) => Either::Left(
            cache
                .get(&EntityHandle::message(id))
                .map(move |hit| hit.map_or(CachedOrId::Id(id), CachedOrId::Cached))
                .into_future(),
        ),
        None => Either::Right(future::ready(CachedOrId::Unparsed(raw))),
    });
    let messages = join_all(lookups).await;

    let Value::Object(mut payload) = data else {
        return Err(invalid(event, "payload is not an object".into()));
    };
    payload.remove("messages");
    Ok(BulkDelete { payload, messages })
}

/// Reaction add/remove/remove-all/remove-emoji: field renaming only.
pub fn message_reaction(_client: &Client, data: Value) -> Value {
    to_camel_case(data)
}

/// Poll vote add/remove: field renaming only.
pub fn message_poll_vote(_client: &Client, data: Value) -> Value {
    to_camel_case(data)
}

fn parse_snowflake(raw: &Value) -> Option<Snowflake> {
    Snowflake::deserialize(raw).ok()
}

fn invalid(event: EventCategory, reason: String) -> NormalizeError {
    NormalizeError::InvalidPayload { event, reason }
}
