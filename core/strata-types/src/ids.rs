//! Snowflake identifiers.
//!
//! Every platform object is addressed by a 64-bit snowflake whose upper bits
//! encode its creation time. On the wire snowflakes travel as decimal strings;
//! numeric input is accepted as well.

use crate::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Milliseconds between the Unix epoch and the platform epoch (2015-01-01T00:00:00Z).
pub const PLATFORM_EPOCH_MS: u64 = 1_420_070_400_000;

/// Unique identifier for a platform object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "WireSnowflake", into = "String")]
pub struct Snowflake(u64);

impl Snowflake {
    /// Creates a snowflake from its raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw 64-bit value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Parses a snowflake from its decimal string form.
    pub fn parse(s: &str) -> Result<Self, Error> {
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| Error::InvalidSnowflake(s.to_string()))
    }

    /// Milliseconds since the Unix epoch at which this id was minted.
    #[must_use]
    pub const fn timestamp_ms(&self) -> u64 {
        (self.0 >> 22) + PLATFORM_EPOCH_MS
    }

    /// Creation time encoded in the id.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(i64::try_from(self.timestamp_ms()).ok()?)
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Snowflake {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<u64> for Snowflake {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<Snowflake> for String {
    fn from(id: Snowflake) -> Self {
        id.to_string()
    }
}

/// Accepted wire shapes for a snowflake.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireSnowflake {
    Text(String),
    Number(u64),
}

impl TryFrom<WireSnowflake> for Snowflake {
    type Error = Error;

    fn try_from(value: WireSnowflake) -> Result<Self, Self::Error> {
        match value {
            WireSnowflake::Text(s) => Self::parse(&s),
            WireSnowflake::Number(n) => Ok(Self(n)),
        }
    }
}
