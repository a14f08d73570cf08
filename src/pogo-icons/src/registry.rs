//! Suffix registry
//!
//! Maps raw asset suffixes (the part of an icon filename after
//! `pokemon_icon_`) to the canonical names they should be emitted as.
//!
//! The registry is built in two stages. [`SuffixRegistry`] is the mutable
//! builder owned by the extraction phase. [`SuffixRegistry::freeze`] checks
//! that no suffix is a prefix of another and hands back a read-only
//! [`FrozenRegistry`] for classification.

use std::collections::btree_map::{self, Entry};
use std::collections::BTreeMap;
use std::ops::Bound;

use tracing::{debug, warn};

use crate::{Error, Result};

/// Canonical targets registered for one suffix.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TargetRecord {
    /// Canonical names in emission order
    pub targets: Vec<String>,
    /// Only holds female variants; no male art is expected under this suffix
    pub is_female_split: bool,
    /// Seeded from the fallback table rather than derived from the game master
    pub is_fallback: bool,
}

impl TargetRecord {
    /// A fresh record. It counts as female-split until a non-female target
    /// claims it.
    pub fn pending() -> Self {
        Self {
            targets: Vec::new(),
            is_female_split: true,
            is_fallback: false,
        }
    }

    /// A record seeded from the fallback table.
    pub fn fallback(targets: Vec<String>, supersedable: bool) -> Self {
        Self {
            targets,
            is_female_split: false,
            is_fallback: supersedable,
        }
    }
}

/// Mutable registry used while extracting targets from the game master.
#[derive(Debug, Default)]
pub struct SuffixRegistry {
    records: BTreeMap<String, TargetRecord>,
}

impl SuffixRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a record as-is, replacing anything already registered.
    pub fn seed(&mut self, suffix: impl Into<String>, record: TargetRecord) {
        self.records.insert(suffix.into(), record);
    }

    /// Return the record for `suffix`, creating it if needed.
    ///
    /// A fallback record is superseded: it is replaced by a fresh record and a
    /// warning notes that the fallback entry is no longer needed. Any other
    /// existing record is returned unchanged so the caller can fan a new
    /// target into it.
    pub fn get_or_create(&mut self, suffix: &str) -> &mut TargetRecord {
        match self.records.entry(suffix.to_string()) {
            Entry::Occupied(entry) => {
                let record = entry.into_mut();
                if record.is_fallback {
                    warn!(
                        suffix,
                        "Found suffix in the game master, fallback entry will be deactivated"
                    );
                    *record = TargetRecord::pending();
                } else {
                    warn!(suffix, "Multiple targets found for asset");
                }
                record
            }
            Entry::Vacant(entry) => {
                debug!(suffix, "New suffix");
                entry.insert(TargetRecord::pending())
            }
        }
    }

    pub fn get(&self, suffix: &str) -> Option<&TargetRecord> {
        self.records.get(suffix)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find a pair of suffixes where the first is a proper prefix of the second.
    ///
    /// In sorted order every key sharing a prefix with some shorter key sits
    /// directly after it, so comparing neighbours covers all pairs.
    pub fn find_collision(&self) -> Option<(&str, &str)> {
        let mut keys = self.records.keys();
        let mut prev = keys.next()?;
        for key in keys {
            if key.starts_with(prev.as_str()) {
                return Some((prev.as_str(), key.as_str()));
            }
            prev = key;
        }
        None
    }

    /// Validate the registry and make it read-only.
    pub fn freeze(self) -> Result<FrozenRegistry> {
        if let Some((shorter, longer)) = self.find_collision() {
            return Err(Error::AmbiguousSuffix {
                shorter: shorter.to_string(),
                longer: longer.to_string(),
            });
        }
        Ok(FrozenRegistry {
            records: self.records,
        })
    }
}

/// Read-only registry with no suffix being a prefix of another.
#[derive(Debug, Clone)]
pub struct FrozenRegistry {
    records: BTreeMap<String, TargetRecord>,
}

impl FrozenRegistry {
    pub fn get(&self, suffix: &str) -> Option<&TargetRecord> {
        self.records.get(suffix)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, TargetRecord> {
        self.records.iter()
    }

    /// Find the registered suffix that `name` starts with.
    ///
    /// Any matching suffix sorts at or before `name`, and with no suffix being
    /// a prefix of another the closest such key is the only candidate.
    pub fn match_prefix(&self, name: &str) -> Option<(&str, &TargetRecord)> {
        let (suffix, record) = self
            .records
            .range::<str, _>((Bound::Unbounded, Bound::Included(name)))
            .next_back()?;
        name.starts_with(suffix.as_str())
            .then_some((suffix.as_str(), record))
    }
}
