use crate::error::ConfigResult;
use serde::{Deserialize, Serialize};
use std::path::Path;
use strata_cache::CacheConfig;
use strata_types::Snowflake;

/// Client configuration, usually read from a TOML file:
///
/// ```toml
/// bot_id = "175928847299117063"
///
/// [cache]
/// members = false
/// asynchronous = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// The bot's own user id, used by `me` accessors.
    pub bot_id: Snowflake,

    #[serde(default)]
    pub cache: CacheConfig,
}

impl ClientConfig {
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
