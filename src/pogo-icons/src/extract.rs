//! Form target extraction
//!
//! Turns one species' form or temporary evolution list into registry entries.
//!
//! The game master says "this form uses the art of form N" by giving both
//! forms the same asset bundle value. For forms, only the first variant in
//! feed order gets the default target `<id>_00`; later variants with the same
//! value are skipped because the client falls back to the default art on its
//! own. Temporary evolutions are always distinct and each gets a target.

use tracing::{debug, warn};

use crate::feed::{AssetBundleValue, VariantEntry};
use crate::registry::SuffixRegistry;

/// Separator between species id and variant id in a canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// `<id>_<form>`
    Form,
    /// `<id>_v<evolution>`
    TemporaryEvolution,
}

impl Separator {
    pub fn as_str(self) -> &'static str {
        match self {
            Separator::Form => "_",
            Separator::TemporaryEvolution => "_v",
        }
    }
}

/// Zero-padded species id used in suffixes and canonical names.
pub fn species_code(species_id: u16) -> String {
    format!("{species_id:03}")
}

/// Register a female variant. The record stays female-split unless a
/// non-female target also claims the suffix.
fn register_female(registry: &mut SuffixRegistry, suffix: &str, target: &str) {
    registry
        .get_or_create(suffix)
        .targets
        .push(format!("{target}_female"));
}

fn register(registry: &mut SuffixRegistry, suffix: &str, target: String) {
    let record = registry.get_or_create(suffix);
    record.targets.push(target);
    record.is_female_split = false;
}

/// Extract the targets of one species into `registry`.
///
/// `variants` is `None` when the template carries no list at all, in which
/// case the species gets its default art at `<id>_00` and a female icon at
/// `<id>_01`. `resolve` maps a feed token to the id used in canonical names.
pub fn extract_form_targets<F>(
    registry: &mut SuffixRegistry,
    species_id: u16,
    variants: Option<&[VariantEntry]>,
    resolve: F,
    separator: Separator,
) where
    F: Fn(&str) -> Option<String>,
{
    let id = species_code(species_id);

    let Some(variants) = variants else {
        let default_target = format!("{id}_00");
        register_female(registry, &format!("{id}_01"), &default_target);
        register(registry, &format!("{id}_00"), default_target);
        return;
    };

    let is_form = separator == Separator::Form;
    let mut default_value: Option<&AssetBundleValue> = None;

    for variant in variants {
        let Some(variant_id) = resolve(&variant.token) else {
            warn!(
                species = species_id,
                token = %variant.token,
                "Unrecognized form/temporary evolution"
            );
            continue;
        };

        if is_form && default_value == Some(&variant.value) {
            debug!(
                species = species_id,
                token = %variant.token,
                "Shares default art, relying on client fallback"
            );
            continue;
        }

        let target = if is_form && default_value.is_none() {
            // The game uses the first form for Pokedex images
            default_value = Some(&variant.value);
            format!("{id}_00")
        } else {
            format!("{id}{}{variant_id}", separator.as_str())
        };

        let suffix = match &variant.value {
            AssetBundleValue::Index(index) => {
                if *index == 0 {
                    register_female(registry, &format!("{id}_01"), &target);
                }
                format!("{id}_{index:02}")
            }
            AssetBundleValue::Suffix(suffix) => {
                if suffix.contains("_00_") {
                    register_female(registry, &suffix.replacen("_00_", "_01_", 1), &target);
                }
                suffix.clone()
            }
        };

        register(registry, &suffix, target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TargetRecord;
    use crate::Error;

    fn form_ids(token: &str) -> Option<String> {
        match token {
            "NORMAL" => Some("1".into()),
            "ALOLA" => Some("2".into()),
            "GALARIAN" => Some("3".into()),
            "COSTUME" => Some("4".into()),
            "EVOLUTION_MEGA_X" => Some("2".into()),
            "EVOLUTION_MEGA_Y" => Some("3".into()),
            _ => None,
        }
    }

    fn index(token: &str, value: u32) -> VariantEntry {
        VariantEntry::new(token, AssetBundleValue::Index(value))
    }

    fn suffix(token: &str, value: &str) -> VariantEntry {
        VariantEntry::new(token, AssetBundleValue::Suffix(value.into()))
    }

    fn targets<'a>(registry: &'a SuffixRegistry, suffix: &str) -> Vec<&'a str> {
        registry
            .get(suffix)
            .map(|r| r.targets.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_no_variant_list_registers_default_and_female() {
        let mut registry = SuffixRegistry::new();
        extract_form_targets(&mut registry, 10, None, form_ids, Separator::Form);

        assert_eq!(registry.len(), 2);

        let male = registry.get("010_00").unwrap();
        assert_eq!(male.targets, vec!["010_00"]);
        assert!(!male.is_female_split);

        let female = registry.get("010_01").unwrap();
        assert_eq!(female.targets, vec!["010_00_female"]);
        assert!(female.is_female_split);
    }

    #[test]
    fn test_shared_default_value_is_skipped() {
        let mut registry = SuffixRegistry::new();
        let variants = [index("NORMAL", 11), index("ALOLA", 11), index("GALARIAN", 11)];
        extract_form_targets(&mut registry, 19, Some(&variants), form_ids, Separator::Form);

        assert_eq!(registry.len(), 1);
        assert_eq!(targets(&registry, "019_11"), vec!["019_00"]);
    }

    #[test]
    fn test_distinct_values_get_form_targets() {
        let mut registry = SuffixRegistry::new();
        let variants = [
            index("NORMAL", 11),
            index("ALOLA", 61),
            index("GALARIAN", 61),
            index("COSTUME", 11),
        ];
        extract_form_targets(&mut registry, 52, Some(&variants), form_ids, Separator::Form);

        assert_eq!(registry.len(), 2);
        assert_eq!(targets(&registry, "052_11"), vec!["052_00"]);
        // Only the default value is deduplicated; other shared values fan in
        assert_eq!(targets(&registry, "052_61"), vec!["052_2", "052_3"]);
    }

    #[test]
    fn test_temporary_evolutions_are_never_deduplicated() {
        let mut registry = SuffixRegistry::new();
        let variants = [index("EVOLUTION_MEGA_X", 51), index("EVOLUTION_MEGA_Y", 51)];
        extract_form_targets(
            &mut registry,
            6,
            Some(&variants),
            form_ids,
            Separator::TemporaryEvolution,
        );

        assert_eq!(registry.len(), 1);
        assert_eq!(targets(&registry, "006_51"), vec!["006_v2", "006_v3"]);
    }

    #[test]
    fn test_zero_index_adds_female_variant() {
        let mut registry = SuffixRegistry::new();
        let variants = [index("NORMAL", 0), index("ALOLA", 61)];
        extract_form_targets(&mut registry, 20, Some(&variants), form_ids, Separator::Form);

        assert_eq!(targets(&registry, "020_00"), vec!["020_00"]);
        assert_eq!(targets(&registry, "020_01"), vec!["020_00_female"]);
        assert!(registry.get("020_01").unwrap().is_female_split);
        assert!(!registry.get("020_00").unwrap().is_female_split);
        assert_eq!(targets(&registry, "020_61"), vec!["020_2"]);
    }

    #[test]
    fn test_qualified_suffix_adds_female_variant() {
        let mut registry = SuffixRegistry::new();
        let variants = [index("NORMAL", 11), suffix("COSTUME", "025_00_pgo_fall2019")];
        extract_form_targets(&mut registry, 25, Some(&variants), form_ids, Separator::Form);

        assert_eq!(targets(&registry, "025_11"), vec!["025_00"]);
        assert_eq!(targets(&registry, "025_00_pgo_fall2019"), vec!["025_4"]);
        assert_eq!(targets(&registry, "025_01_pgo_fall2019"), vec!["025_4_female"]);
        assert!(registry.get("025_01_pgo_fall2019").unwrap().is_female_split);
    }

    #[test]
    fn test_unrecognized_token_is_skipped() {
        let mut registry = SuffixRegistry::new();
        let variants = [index("SHADOW", 11), index("NORMAL", 12), index("ALOLA", 61)];
        extract_form_targets(&mut registry, 26, Some(&variants), form_ids, Separator::Form);

        // The first recognized variant becomes the default
        assert_eq!(registry.len(), 2);
        assert!(registry.get("026_11").is_none());
        assert_eq!(targets(&registry, "026_12"), vec!["026_00"]);
        assert_eq!(targets(&registry, "026_61"), vec!["026_2"]);
    }

    #[test]
    fn test_empty_variant_list_registers_nothing() {
        let mut registry = SuffixRegistry::new();
        extract_form_targets(&mut registry, 1, Some(&[]), form_ids, Separator::Form);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_extraction_supersedes_fallback() {
        let mut registry = SuffixRegistry::new();
        registry.seed("018_51", TargetRecord::fallback(vec!["018_v1".into()], true));

        let variants = [index("EVOLUTION_MEGA_X", 51)];
        extract_form_targets(
            &mut registry,
            18,
            Some(&variants),
            form_ids,
            Separator::TemporaryEvolution,
        );

        let record = registry.get("018_51").unwrap();
        assert_eq!(record.targets, vec!["018_v2"]);
        assert!(!record.is_fallback);
    }

    #[test]
    fn test_engineered_collision_is_fatal() {
        let mut registry = SuffixRegistry::new();
        let variants = [index("NORMAL", 11), suffix("ALOLA", "027_1")];
        extract_form_targets(&mut registry, 27, Some(&variants), form_ids, Separator::Form);

        assert!(matches!(
            registry.freeze(),
            Err(Error::AmbiguousSuffix { .. })
        ));
    }
}
