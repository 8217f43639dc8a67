use serde::{Deserialize, Serialize};
use strata_types::EntityKind;

/// Which cache sections are enabled, and which backend flavour to use.
///
/// Every section defaults to enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub messages: bool,
    pub members: bool,
    pub guilds: bool,
    pub channels: bool,
    pub users: bool,
    /// Back the cache with the asynchronous in-memory adapter.
    pub asynchronous: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            messages: true,
            members: true,
            guilds: true,
            channels: true,
            users: true,
            asynchronous: false,
        }
    }
}

impl CacheConfig {
    /// A config with every section disabled.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            messages: false,
            members: false,
            guilds: false,
            channels: false,
            users: false,
            asynchronous: false,
        }
    }

    #[must_use]
    pub fn is_enabled(&self, kind: EntityKind) -> bool {
        match kind {
            EntityKind::Message => self.messages,
            EntityKind::Member => self.members,
            EntityKind::Guild => self.guilds,
            EntityKind::Channel => self.channels,
            EntityKind::User => self.users,
        }
    }

    /// Returns a copy with the section for `kind` toggled.
    #[must_use]
    pub fn with_section(mut self, kind: EntityKind, enabled: bool) -> Self {
        let slot = match kind {
            EntityKind::Message => &mut self.messages,
            EntityKind::Member => &mut self.members,
            EntityKind::Guild => &mut self.guilds,
            EntityKind::Channel => &mut self.channels,
            EntityKind::User => &mut self.users,
        };
        *slot = enabled;
        self
    }

    #[must_use]
    pub fn with_asynchronous(mut self, asynchronous: bool) -> Self {
        self.asynchronous = asynchronous;
        self
    }
}
