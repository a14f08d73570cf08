//! Raw asset classification

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::registry::FrozenRegistry;

/// Marker every raw icon filename starts with.
pub const ICON_PREFIX: &str = "pokemon_icon_";

/// A raw asset matched to a registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified<'r> {
    /// Registry suffix the asset matched
    pub suffix: &'r str,
    /// Canonical names to emit, in order
    pub targets: &'r [String],
    /// Rest of the filename after the suffix, e.g. `_shiny.png`
    pub extension: String,
}

/// Matches raw icon filenames against a frozen registry and remembers which
/// suffixes were hit.
#[derive(Debug)]
pub struct Classifier<'r> {
    registry: &'r FrozenRegistry,
    used: BTreeSet<&'r str>,
}

impl<'r> Classifier<'r> {
    pub fn new(registry: &'r FrozenRegistry) -> Self {
        Self {
            registry,
            used: BTreeSet::new(),
        }
    }

    pub fn is_icon(filename: &str) -> bool {
        filename.starts_with(ICON_PREFIX)
    }

    /// Classify one raw filename.
    ///
    /// Returns `None` for names without the icon marker and for icons whose
    /// suffix is not registered; the latter are logged.
    pub fn classify(&mut self, filename: &str) -> Option<Classified<'r>> {
        let name = filename.strip_prefix(ICON_PREFIX)?;
        let Some((suffix, record)) = self.registry.match_prefix(name) else {
            warn!(filename, "Unrecognized/unused asset");
            return None;
        };

        self.used.insert(suffix);
        let extension = name[suffix.len()..].to_string();
        debug!(filename, suffix, targets = record.targets.len(), "Classified asset");

        Some(Classified {
            suffix,
            targets: &record.targets,
            extension,
        })
    }

    /// Suffixes matched by at least one asset so far.
    pub fn used(&self) -> &BTreeSet<&'r str> {
        &self.used
    }

    pub fn was_used(&self, suffix: &str) -> bool {
        self.used.contains(suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SuffixRegistry;

    fn registry() -> FrozenRegistry {
        let mut registry = SuffixRegistry::new();
        for (suffix, targets) in [
            ("001_00", vec!["001_00"]),
            ("001_01", vec!["001_00_female"]),
            ("025_00_pgo_fall2019", vec!["025_2668", "025_2669"]),
        ] {
            let record = registry.get_or_create(suffix);
            record
                .targets
                .extend(targets.into_iter().map(String::from));
        }
        registry.freeze().unwrap()
    }

    #[test]
    fn test_classify_extracts_extension() {
        let registry = registry();
        let mut classifier = Classifier::new(&registry);

        let classified = classifier.classify("pokemon_icon_001_00_shiny.png").unwrap();
        assert_eq!(classified.suffix, "001_00");
        assert_eq!(classified.targets, ["001_00"]);
        assert_eq!(classified.extension, "_shiny.png");

        let classified = classifier
            .classify("pokemon_icon_025_00_pgo_fall2019.png")
            .unwrap();
        assert_eq!(classified.targets.len(), 2);
        assert_eq!(classified.extension, ".png");
    }

    #[test]
    fn test_classify_tracks_usage() {
        let registry = registry();
        let mut classifier = Classifier::new(&registry);

        classifier.classify("pokemon_icon_001_01.png");
        assert!(classifier.was_used("001_01"));
        assert!(!classifier.was_used("001_00"));
        assert_eq!(classifier.used().len(), 1);
    }

    #[test]
    fn test_unrecognized_assets() {
        let registry = registry();
        let mut classifier = Classifier::new(&registry);

        assert!(classifier.classify("pokemon_icon_002_00.png").is_none());
        assert!(classifier.classify("item_0001.png").is_none());
        assert!(classifier.used().is_empty());

        assert!(Classifier::is_icon("pokemon_icon_001_00.png"));
        assert!(!Classifier::is_icon("item_0001.png"));
    }
}
