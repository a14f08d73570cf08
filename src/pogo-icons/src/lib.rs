//! # pogo-icons
//!
//! Resolves raw Pokemon GO icon assets to canonical species/form/gender names.
//!
//! Raw icons are named `pokemon_icon_<suffix><extra>.png`, where the suffix is
//! an asset-bundle code that only makes sense together with the game master.
//! This library:
//! - Builds a suffix registry from the game master form and temporary
//!   evolution templates, seeded with a versioned fallback table
//! - Rejects registries where one suffix is a prefix of another
//! - Classifies raw icon filenames against the frozen registry
//! - Trims the first output of each asset and copies it to every other target
//! - Reports registry entries that never matched any asset
//!
//! ## Example
//!
//! ```no_run
//! use pogo_icons::{build_registry, EnumTable, FallbackTable, GameMaster};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let feed = GameMaster::from_json(&std::fs::read_to_string("latest.json")?)?;
//! let enums = EnumTable::from_json(&std::fs::read_to_string("enums.json")?)?;
//! let fallbacks = FallbackTable::builtin()?;
//!
//! let registry = build_registry(&feed, &enums, &fallbacks)?;
//! println!("{} suffixes", registry.len());
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod coverage;
pub mod emit;
pub mod extract;
pub mod fallback;
pub mod feed;
pub mod pipeline;
pub mod registry;
pub mod resolver;

use std::path::PathBuf;

#[doc(inline)]
pub use classify::{Classified, Classifier, ICON_PREFIX};
#[doc(inline)]
pub use coverage::{CoverageReport, KnownGap};
#[doc(inline)]
pub use emit::{CommandTrimmer, EmitStats, Emitter, Trimmer, INDEX_FILE};
#[doc(inline)]
pub use extract::{extract_form_targets, Separator};
#[doc(inline)]
pub use fallback::{FallbackEntry, FallbackTable};
#[doc(inline)]
pub use feed::{AssetBundleValue, GameMaster, Template, TemplateKind, VariantEntry};
#[doc(inline)]
pub use pipeline::{build_registry, list_icons, run, RunOptions, RunSummary};
#[doc(inline)]
pub use registry::{FrozenRegistry, SuffixRegistry, TargetRecord};
#[doc(inline)]
pub use resolver::{EnumTable, VariantResolver};

/// Errors from registry building and asset emission
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Ambiguous suffixes: '{shorter}' is a prefix of '{longer}'")]
    AmbiguousSuffix { shorter: String, longer: String },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid fallback table: {0}")]
    Fallbacks(#[from] toml::de::Error),

    #[error("Invalid enum table: {0}")]
    Enums(String),

    #[error("Trim failed for {path}: {reason}")]
    Trim { path: PathBuf, reason: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
