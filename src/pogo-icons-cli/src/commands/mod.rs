//! Command handlers

pub mod check;
pub mod configure;
pub mod run;

use anyhow::{Context, Result};
use pogo_icons::{
    build_registry, CommandTrimmer, EnumTable, FallbackTable, FrozenRegistry, GameMaster,
};
use tracing::{error, info};

use crate::cli::SourceArgs;
use crate::config::Config;
use crate::feed_source;

/// Load config, game master, enum table and fallbacks, then build the
/// validated registry.
pub async fn load_registry(
    source: &SourceArgs,
    config: &Config,
) -> Result<(FrozenRegistry, FallbackTable)> {
    let enums_path = source
        .enums
        .as_ref()
        .or(config.enums.as_ref())
        .context("No enum table configured; pass --enums or run `pogo-icons configure --enums`")?;
    let enums_text = tokio::fs::read_to_string(enums_path)
        .await
        .with_context(|| format!("Failed to read enum table {}", enums_path.display()))?;
    let enums = EnumTable::from_json(&enums_text).context("Failed to parse enum table")?;

    let fallbacks = match source.fallbacks.as_ref().or(config.fallbacks.as_ref()) {
        Some(path) => {
            let text = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read fallbacks {}", path.display()))?;
            FallbackTable::from_toml(&text).context("Failed to parse fallback table")?
        }
        None => FallbackTable::builtin().context("Built-in fallback table is invalid")?,
    };
    info!(version = %fallbacks.version, entries = fallbacks.entries.len(), "Fallback table");

    let game_master_source = source
        .game_master
        .as_deref()
        .unwrap_or_else(|| config.game_master_source());
    info!(source = game_master_source, "Reading game master...");
    let text = feed_source::load_text(game_master_source).await?;
    let feed = GameMaster::from_json(&text).context("Failed to parse game master")?;

    let registry = match build_registry(&feed, &enums, &fallbacks) {
        Ok(registry) => registry,
        Err(e) => {
            error!(error = %e, "Illegal combinations found");
            return Err(e).context("Illegal combinations found");
        }
    };
    Ok((registry, fallbacks))
}

/// Configured trim command, with `program` replacing only the program name.
pub fn trimmer(config: &Config, program: Option<String>) -> CommandTrimmer {
    let mut trimmer = config.trimmer();
    if let Some(program) = program {
        trimmer.program = program;
    }
    trimmer
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    const FEED: &str = r#"[
        {
            "templateId": "FORMS_V0019_POKEMON_RATTATA",
            "data": {
                "formSettings": {
                    "pokemon": "RATTATA",
                    "forms": [
                        { "form": "RATTATA_NORMAL", "assetBundleValue": 0 },
                        { "form": "RATTATA_ALOLA", "assetBundleValue": 61 }
                    ]
                }
            }
        }
    ]"#;

    const COLLIDING_FEED: &str = r#"[
        {
            "templateId": "FORMS_V0001_POKEMON_BULBASAUR",
            "data": { "formSettings": { "forms": [
                { "form": "RATTATA_NORMAL", "assetBundleValue": 11 },
                { "form": "RATTATA_ALOLA", "assetBundleSuffix": "001_11_costume" }
            ] } }
        }
    ]"#;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn enums(dir: &Path, name: &str, alola: u32) -> PathBuf {
        write(
            dir,
            name,
            &format!(r#"{{ "Form": {{ "RATTATA_NORMAL": 45, "RATTATA_ALOLA": {alola} }} }}"#),
        )
    }

    fn fallbacks(dir: &Path, name: &str, known_gap: &str) -> PathBuf {
        write(
            dir,
            name,
            &format!("version = \"{name}\"\nknown_gap = \"{known_gap}\"\n"),
        )
    }

    fn source_path(path: &Path) -> Option<String> {
        Some(path.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_flags_override_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path();
        let feed = write(dir, "latest.json", FEED);

        let config = Config {
            game_master: Some(dir.join("absent.json").to_str().unwrap().to_string()),
            enums: Some(enums(dir, "config_enums.json", 46)),
            fallbacks: Some(fallbacks(dir, "config_fallbacks.toml", "151_11")),
            ..Config::default()
        };
        let source = SourceArgs {
            game_master: source_path(&feed),
            enums: Some(enums(dir, "flag_enums.json", 99)),
            fallbacks: Some(fallbacks(dir, "flag_fallbacks.toml", "251_11")),
            ..SourceArgs::default()
        };

        let (registry, table) = load_registry(&source, &config).await.unwrap();
        assert_eq!(registry.get("019_61").unwrap().targets, vec!["019_99"]);
        assert_eq!(table.version, "flag_fallbacks.toml");
        assert_eq!(table.known_gap.as_deref(), Some("251_11"));
    }

    #[tokio::test]
    async fn test_config_values_used_without_flags() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path();
        let feed = write(dir, "latest.json", FEED);

        let config = Config {
            game_master: source_path(&feed),
            enums: Some(enums(dir, "enums.json", 46)),
            fallbacks: Some(fallbacks(dir, "fallbacks.toml", "151_11")),
            ..Config::default()
        };

        let (registry, table) = load_registry(&SourceArgs::default(), &config).await.unwrap();
        assert_eq!(registry.get("019_61").unwrap().targets, vec!["019_46"]);
        assert_eq!(table.known_gap.as_deref(), Some("151_11"));
        // The replacement table seeds nothing
        assert!(registry.get("000").is_none());
    }

    #[tokio::test]
    async fn test_builtin_fallbacks_by_default() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path();
        let source = SourceArgs {
            game_master: source_path(&write(dir, "latest.json", FEED)),
            enums: Some(enums(dir, "enums.json", 46)),
            ..SourceArgs::default()
        };

        let (registry, table) = load_registry(&source, &Config::default()).await.unwrap();
        assert_eq!(table.known_gap.as_deref(), Some("493_11"));
        assert!(registry.get("000").unwrap().is_fallback);
    }

    #[tokio::test]
    async fn test_missing_enum_table() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = SourceArgs {
            game_master: source_path(&write(temp_dir.path(), "latest.json", FEED)),
            ..SourceArgs::default()
        };

        let err = load_registry(&source, &Config::default()).await.unwrap_err();
        assert!(err.to_string().contains("No enum table configured"));
    }

    #[tokio::test]
    async fn test_colliding_feed_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path();
        let source = SourceArgs {
            game_master: source_path(&write(dir, "latest.json", COLLIDING_FEED)),
            enums: Some(enums(dir, "enums.json", 46)),
            ..SourceArgs::default()
        };

        let err = load_registry(&source, &Config::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Illegal combinations found");
        assert!(matches!(
            err.downcast_ref::<pogo_icons::Error>(),
            Some(pogo_icons::Error::AmbiguousSuffix { .. })
        ));
    }

    #[test]
    fn test_trim_program_flag_keeps_configured_args() {
        let config = Config {
            trim_program: Some("magick".into()),
            trim_args: Some(vec!["-trim".into()]),
            ..Config::default()
        };

        assert_eq!(
            trimmer(&config, Some("gm".into())),
            CommandTrimmer::new("gm", vec!["-trim".into()])
        );
        assert_eq!(
            trimmer(&config, None),
            CommandTrimmer::new("magick", vec!["-trim".into()])
        );
    }
}
