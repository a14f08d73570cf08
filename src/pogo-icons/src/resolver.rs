//! Variant token resolution
//!
//! The game master names forms and temporary evolutions symbolically
//! (`PONYTA_GALARIAN`, `TEMP_EVOLUTION_MEGA`). Canonical names use the stable
//! enum values from the game protos instead.

use std::collections::HashMap;

use serde::Deserialize;

use crate::{Error, Result};

/// Maps feed tokens to the ids used in canonical names.
///
/// `None` means the token is not part of the current schema; the extractor
/// skips such variants.
pub trait VariantResolver {
    fn resolve_form(&self, token: &str) -> Option<String>;
    fn resolve_evolution(&self, token: &str) -> Option<String>;
}

/// PokemonEvolution values used when the enum file carries none.
pub const BUILTIN_EVOLUTIONS: &[(&str, i64)] = &[
    ("EVOLUTION_MEGA", 1),
    ("EVOLUTION_MEGA_X", 2),
    ("EVOLUTION_MEGA_Y", 3),
    ("EVOLUTION_PRIMAL", 4),
];

/// Enum tables keyed by value name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnumTable {
    #[serde(rename = "Form", default)]
    forms: HashMap<String, i64>,
    #[serde(rename = "PokemonEvolution", default)]
    evolutions: HashMap<String, i64>,
}

impl EnumTable {
    /// Parse `{ "Form": { NAME: id }, "PokemonEvolution": { NAME: id } }`.
    pub fn from_json(text: &str) -> Result<Self> {
        let mut table: EnumTable =
            serde_json::from_str(text).map_err(|e| Error::Enums(e.to_string()))?;
        if table.evolutions.is_empty() {
            table.evolutions = builtin_evolutions();
        }
        Ok(table)
    }

    /// Table with only the built-in evolutions.
    pub fn builtin() -> Self {
        Self {
            forms: HashMap::new(),
            evolutions: builtin_evolutions(),
        }
    }

    pub fn with_form(mut self, name: impl Into<String>, id: i64) -> Self {
        self.forms.insert(name.into(), id);
        self
    }

    pub fn form_count(&self) -> usize {
        self.forms.len()
    }
}

fn builtin_evolutions() -> HashMap<String, i64> {
    BUILTIN_EVOLUTIONS
        .iter()
        .map(|(name, id)| (name.to_string(), *id))
        .collect()
}

/// Normalize a temporary evolution token to its `EVOLUTION_<NAME>` enum name.
///
/// Accepts `TEMP_EVOLUTION_MEGA` as well as older obfuscated tokens of the
/// form `<RANDOM>_TEMP_EVOLUTION_MEGA`.
pub fn evolution_enum_name(token: &str) -> Option<&str> {
    if let Some((_, rest)) = token.split_once("_TEMP_") {
        return Some(rest);
    }
    token.strip_prefix("TEMP_")
}

impl VariantResolver for EnumTable {
    fn resolve_form(&self, token: &str) -> Option<String> {
        self.forms.get(token).map(i64::to_string)
    }

    fn resolve_evolution(&self, token: &str) -> Option<String> {
        let name = evolution_enum_name(token)?;
        self.evolutions.get(name).map(i64::to_string)
    }
}
