//! Resolution modes.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How an accessor should produce its value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionMode {
    /// Local lookup only. Never touches the network; a miss is absent.
    Cache,
    /// Forced network fetch, bypassing the cache.
    Rest,
    /// Network fetch that the transport may answer from cache. Resolves to
    /// absent without fetching when the owning scope is missing.
    #[default]
    Flow,
}

impl ResolutionMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ResolutionMode::Cache => "cache",
            ResolutionMode::Rest => "rest",
            ResolutionMode::Flow => "flow",
        }
    }

    /// Whether a network fetch issued in this mode must bypass the cache.
    #[must_use]
    pub const fn forces_fetch(&self) -> bool {
        matches!(self, ResolutionMode::Rest)
    }
}

impl fmt::Display for ResolutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolutionMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cache" => Ok(ResolutionMode::Cache),
            "rest" => Ok(ResolutionMode::Rest),
            "flow" => Ok(ResolutionMode::Flow),
            other => Err(Error::UnknownMode(other.to_string())),
        }
    }
}
