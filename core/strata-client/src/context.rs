//! Per-interaction accessors.
//!
//! An [`InteractionContext`] knows where a command was invoked (guild,
//! channel, author) and exposes `channel`, `me`, `guild`, `member` and `user`
//! accessors that all go through the [`Resolver`]. Inside a guild,
//! [`InteractionContext::in_guild`] hands out a [`GuildContext`] whose guild
//! accessors can no longer hit a missing scope.

use crate::error::{ResolveResult, RestResult};
use crate::resolve::{Resolution, Resolver, Target};
use crate::rest::FetchQuery;
use crate::Client;
use futures::future::BoxFuture;
use std::sync::Arc;
use strata_model::{ModelError, ModelResult, Structure};
use strata_types::{EntityHandle, EntityKind, ResolutionMode, Snowflake};

/// Where an interaction happened, plus the client to resolve against.
#[derive(Debug, Clone)]
pub struct InteractionContext {
    client: Arc<Client>,
    guild_id: Option<Snowflake>,
    channel_id: Snowflake,
    author: Structure,
    member: Option<Structure>,
}

impl InteractionContext {
    pub fn new(
        client: Arc<Client>,
        guild_id: Option<Snowflake>,
        channel_id: Snowflake,
        author: Structure,
    ) -> Self {
        Self {
            client,
            guild_id,
            channel_id,
            author,
            member: None,
        }
    }

    /// Attaches the invoking member (present for guild interactions).
    #[must_use]
    pub fn with_member(mut self, member: Structure) -> Self {
        self.member = Some(member);
        self
    }

    /// Builds a context from a raw interaction payload.
    ///
    /// Guild interactions carry the invoking user under `member.user`; direct
    /// messages carry it under `user`.
    pub fn from_interaction(client: Arc<Client>, raw: &serde_json::Value) -> ModelResult<Self> {
        let builder = Arc::clone(client.builder());

        let guild_id = match raw.get("guild_id") {
            Some(v) if !v.is_null() => Some(snowflake(EntityKind::Guild, v)?),
            _ => None,
        };
        let channel_id = raw
            .pointer("/channel/id")
            .or_else(|| raw.get("channel_id"))
            .ok_or(ModelError::MissingId {
                kind: EntityKind::Channel,
                pointer: "/channel_id",
            })
            .and_then(|v| snowflake(EntityKind::Channel, v))?;

        let member = match (raw.get("member"), guild_id) {
            (Some(m), Some(guild)) if m.is_object() => {
                Some(builder.build(EntityKind::Member, m)?.with_scope(guild))
            }
            _ => None,
        };
        let author = match raw.pointer("/member/user").or_else(|| raw.get("user")) {
            Some(user) => builder.build(EntityKind::User, user)?,
            None => {
                return Err(ModelError::MissingId {
                    kind: EntityKind::User,
                    pointer: "/user/id",
                })
            }
        };

        Ok(Self {
            client,
            guild_id,
            channel_id,
            author,
            member,
        })
    }

    pub fn client(&self) -> &Arc<Client> {
        &self.client
    }

    pub fn guild_id(&self) -> Option<Snowflake> {
        self.guild_id
    }

    pub fn channel_id(&self) -> Snowflake {
        self.channel_id
    }

    pub fn author(&self) -> &Structure {
        &self.author
    }

    pub fn member(&self) -> Option<&Structure> {
        self.member.as_ref()
    }

    pub fn resolver(&self) -> Resolver<'_> {
        self.client.resolver()
    }

    /// Narrows to a guild context when the interaction happened in a guild.
    pub fn in_guild(&self) -> Option<GuildContext<'_>> {
        self.guild_id.map(|guild_id| GuildContext { ctx: self, guild_id })
    }

    /// The channel the interaction happened in.
    pub fn channel(&self, mode: ResolutionMode) -> ResolveResult<Resolution<'_>> {
        self.resolver()
            .resolve(EntityHandle::channel(self.channel_id), mode, None)
    }

    /// The bot's own member in the interaction's guild.
    pub fn me(&self, mode: ResolutionMode) -> ResolveResult<Resolution<'_>> {
        self.member_target(self.client.bot_id(), mode)
    }

    /// The interaction's guild.
    pub fn guild(&self, mode: ResolutionMode, query: Option<FetchQuery>) -> ResolveResult<Resolution<'_>> {
        let target = Target::from_option(EntityKind::Guild, self.guild_id.map(EntityHandle::guild));
        self.resolver().resolve(target, mode, query)
    }

    /// Any member of the interaction's guild.
    pub fn member_of(&self, user_id: Snowflake, mode: ResolutionMode) -> ResolveResult<Resolution<'_>> {
        self.member_target(user_id, mode)
    }

    /// Any user.
    pub fn user(&self, user_id: Snowflake, mode: ResolutionMode) -> ResolveResult<Resolution<'_>> {
        self.resolver().resolve(EntityHandle::user(user_id), mode, None)
    }

    fn member_target(&self, user_id: Snowflake, mode: ResolutionMode) -> ResolveResult<Resolution<'_>> {
        let handle = self.guild_id.map(|guild| EntityHandle::member(guild, user_id));
        self.resolver()
            .resolve(Target::from_option(EntityKind::Member, handle), mode, None)
    }
}

/// An [`InteractionContext`] known to be inside a guild.
#[derive(Debug, Clone, Copy)]
pub struct GuildContext<'c> {
    ctx: &'c InteractionContext,
    guild_id: Snowflake,
}

impl<'c> GuildContext<'c> {
    pub fn guild_id(&self) -> Snowflake {
        self.guild_id
    }

    pub fn context(&self) -> &'c InteractionContext {
        self.ctx
    }

    /// The interaction's guild. Cannot fail: the scope is present.
    pub fn guild(&self, mode: ResolutionMode, query: Option<FetchQuery>) -> Resolution<'c> {
        self.resolver()
            .resolve_handle(EntityHandle::guild(self.guild_id), mode, query)
    }

    /// The bot's own member. Cannot fail: the scope is present.
    pub fn me(&self, mode: ResolutionMode) -> Resolution<'c> {
        self.resolver().resolve_handle(self.me_handle(), mode, None)
    }

    /// Fetches the guild; network-shaped, so the result is concrete.
    pub fn fetch_guild(&self, force: bool, query: Option<FetchQuery>) -> BoxFuture<'c, RestResult<Structure>> {
        self.resolver()
            .fetch(EntityHandle::guild(self.guild_id), force, query)
    }

    /// Fetches the bot's own member; network-shaped, so the result is concrete.
    pub fn fetch_me(&self, force: bool) -> BoxFuture<'c, RestResult<Structure>> {
        self.resolver().fetch(self.me_handle(), force, None)
    }

    fn me_handle(&self) -> EntityHandle {
        EntityHandle::member(self.guild_id, self.ctx.client.bot_id())
    }

    fn resolver(&self) -> Resolver<'c> {
        self.ctx.resolver()
    }
}

fn snowflake(kind: EntityKind, value: &serde_json::Value) -> ModelResult<Snowflake> {
    serde_json::from_value(value.clone()).map_err(|e| ModelError::InvalidId {
        kind,
        source: strata_types::Error::Serialization(e),
    })
}
