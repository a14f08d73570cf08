//! End-of-run coverage report
//!
//! Flags registry entries that no raw asset matched. Female-split entries are
//! exempt since most species have no separate female art.

use std::collections::BTreeSet;

use tracing::{info, warn};

use crate::registry::FrozenRegistry;

/// State of the suffix whose art is known to be missing upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KnownGap {
    /// Registered but still without art
    Pending(String),
    /// An asset now matches it
    Resolved(String),
    /// The game master no longer registers it
    NotRegistered(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoverageReport {
    /// Suffixes with no matching asset, in suffix order
    pub missing: Vec<String>,
    pub known_gap: Option<KnownGap>,
}

impl CoverageReport {
    pub fn build(
        registry: &FrozenRegistry,
        used: &BTreeSet<&str>,
        known_gap: Option<&str>,
    ) -> Self {
        let mut report = CoverageReport::default();

        for (suffix, record) in registry.iter() {
            if used.contains(suffix.as_str()) || record.is_female_split {
                continue;
            }
            if Some(suffix.as_str()) != known_gap {
                report.missing.push(suffix.clone());
            }
        }

        report.known_gap = known_gap.map(|gap| {
            if used.contains(gap) {
                KnownGap::Resolved(gap.to_string())
            } else if registry.get(gap).is_some() {
                KnownGap::Pending(gap.to_string())
            } else {
                KnownGap::NotRegistered(gap.to_string())
            }
        });

        report
    }

    /// Log one warning per missing suffix and one note for the known gap.
    pub fn log(&self, registry: &FrozenRegistry) {
        for suffix in &self.missing {
            let targets = registry
                .get(suffix)
                .map(|r| r.targets.join(","))
                .unwrap_or_default();
            warn!(%suffix, %targets, "Found form/temporary evolution with no matching assets");
        }

        match &self.known_gap {
            Some(KnownGap::Pending(suffix)) => {
                info!(%suffix, "Known missing asset is still missing upstream")
            }
            Some(KnownGap::Resolved(suffix)) => {
                info!(%suffix, "Known missing asset has been added, the fallback can go")
            }
            Some(KnownGap::NotRegistered(suffix)) => {
                info!(%suffix, "Known missing asset is no longer in the game master")
            }
            None => {}
        }
    }
}
