use crate::{ModelResult, Structure};
use strata_types::EntityKind;

/// Constructs domain structures from raw wire payloads.
///
/// The provided `build` covers every kind the core caches. Implement this
/// trait only to enrich structures after they are built (computed fields,
/// defaults the wire omits); override `build` itself only when a kind needs
/// an entirely different construction.
pub trait StructureBuilder: Send + Sync {
    /// Build a structure of `kind` from a wire-cased payload.
    fn build(&self, kind: EntityKind, raw: &serde_json::Value) -> ModelResult<Structure> {
        let mut structure = Structure::from_raw(kind, raw)?;
        self.on_after_build(&mut structure);
        Ok(structure)
    }

    /// Called after a structure is built, before it is returned.
    fn on_after_build(&self, structure: &mut Structure) {
        let _ = structure;
    }
}

/// Builder with no post-build hook.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBuilder;

impl StructureBuilder for DefaultBuilder {}
