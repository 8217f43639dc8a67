use crate::{casing, ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use strata_types::{EntityHandle, EntityKind, Snowflake};

/// A domain object built from a raw wire record.
///
/// `data` holds the full record with keys in camelCase. The id and scope are
/// lifted out of the payload so the structure can be keyed without parsing
/// `data` again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub kind: EntityKind,
    pub id: Snowflake,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Snowflake>,
    pub data: serde_json::Value,
}

impl Structure {
    /// Builds a structure from a wire-cased payload.
    ///
    /// The id is read from the kind's id pointer; the scope, for scoped kinds,
    /// from the kind's scope pointer when the payload carries it.
    pub fn from_raw(kind: EntityKind, raw: &serde_json::Value) -> ModelResult<Self> {
        if !raw.is_object() {
            return Err(ModelError::NotAnObject { kind });
        }

        let pointer = kind.id_pointer();
        let id = raw
            .pointer(pointer)
            .ok_or(ModelError::MissingId { kind, pointer })
            .and_then(|v| parse_snowflake(kind, v))?;

        let scope = match kind.scope_pointer().and_then(|p| raw.pointer(p)) {
            Some(v) if !v.is_null() => Some(parse_snowflake(kind, v)?),
            _ => None,
        };

        Ok(Self {
            kind,
            id,
            scope,
            data: casing::to_camel_case(raw.clone()),
        })
    }

    /// Sets the owning scope, for records whose payload does not carry it
    /// (e.g. a member fetched from a guild-specific endpoint).
    #[must_use]
    pub fn with_scope(mut self, scope: Snowflake) -> Self {
        self.scope = Some(scope);
        self
    }

    /// The handle this structure is cached under.
    #[must_use]
    pub fn handle(&self) -> EntityHandle {
        EntityHandle::new(self.kind, self.scope, self.id)
    }

    /// Extract a string value from `data` using a JSON pointer (e.g., "/content").
    pub fn get_str(&self, pointer: &str) -> Option<&str> {
        self.data.pointer(pointer).and_then(|v| v.as_str())
    }

    /// Extract a boolean value from `data` using a JSON pointer.
    pub fn get_bool(&self, pointer: &str) -> Option<bool> {
        self.data.pointer(pointer).and_then(|v| v.as_bool())
    }

    /// Extract a numeric value from `data` using a JSON pointer.
    pub fn get_number(&self, pointer: &str) -> Option<f64> {
        self.data.pointer(pointer).and_then(|v| v.as_f64())
    }

    /// Extract a snowflake from `data` using a JSON pointer.
    pub fn get_snowflake(&self, pointer: &str) -> Option<Snowflake> {
        self.get_str(pointer).and_then(|s| Snowflake::parse(s).ok())
    }
}

fn parse_snowflake(kind: EntityKind, value: &serde_json::Value) -> ModelResult<Snowflake> {
    serde_json::from_value(value.clone()).map_err(|e| ModelError::InvalidId {
        kind,
        source: strata_types::Error::Serialization(e),
    })
}
