//! Fallback table for known game master gaps
//!
//! The table is a versioned TOML document. The built-in copy is embedded at
//! compile time from `data/fallbacks.toml`; a replacement can be loaded from
//! disk without rebuilding.

use serde::Deserialize;

use crate::registry::{SuffixRegistry, TargetRecord};
use crate::Result;

const BUILTIN_FALLBACKS_TOML: &str = include_str!("../data/fallbacks.toml");

/// One manually maintained registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FallbackEntry {
    pub suffix: String,
    pub targets: Vec<String>,
    /// Dropped when the game master registers the same suffix
    #[serde(default = "default_supersedable")]
    pub supersedable: bool,
}

fn default_supersedable() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FallbackTable {
    pub version: String,
    /// Suffix with art known to be missing upstream
    #[serde(default)]
    pub known_gap: Option<String>,
    #[serde(default, rename = "fallback")]
    pub entries: Vec<FallbackEntry>,
}

impl FallbackTable {
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN_FALLBACKS_TOML)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Install every entry into a registry.
    pub fn seed(&self, registry: &mut SuffixRegistry) {
        for entry in &self.entries {
            registry.seed(
                entry.suffix.clone(),
                TargetRecord::fallback(entry.targets.clone(), entry.supersedable),
            );
        }
    }
}
