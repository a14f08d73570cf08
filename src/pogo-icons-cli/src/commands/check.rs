//! Check command handler

use anyhow::Result;
use serde_json::json;

use crate::cli::SourceArgs;
use crate::config::Config;

pub async fn handle(source: SourceArgs, dump: bool) -> Result<()> {
    let config = Config::resolve(source.config.as_deref())?;
    let (registry, _) = super::load_registry(&source, &config).await?;

    if dump {
        let records: serde_json::Map<String, serde_json::Value> = registry
            .iter()
            .map(|(suffix, record)| {
                let value = json!({
                    "targets": record.targets,
                    "female": record.is_female_split,
                    "fallback": record.is_fallback,
                });
                (suffix.clone(), value)
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        println!("Registry OK: {} suffixes", registry.len());
    }

    Ok(())
}
