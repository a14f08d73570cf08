//! Run command handler
//!
//! Classifies every raw icon once, trims/copies it to its canonical names and
//! reports coverage.

use anyhow::Result;
use pogo_icons::RunOptions;
use std::path::PathBuf;
use tracing::info;

use crate::cli::SourceArgs;
use crate::config::Config;

pub async fn handle(
    input: PathBuf,
    output: Option<PathBuf>,
    source: SourceArgs,
    trim_program: Option<String>,
) -> Result<()> {
    let config = Config::resolve(source.config.as_deref())?;
    let (registry, fallbacks) = super::load_registry(&source, &config).await?;

    let trimmer = super::trimmer(&config, trim_program);

    if output.is_none() {
        info!("No output directory given, dry run");
    }
    let options = RunOptions {
        input_dir: input,
        output_dir: output,
        known_gap: fallbacks.known_gap.clone(),
    };
    let summary = pogo_icons::run(&registry, &options, trimmer).await?;

    info!(
        assets = summary.assets,
        unrecognized = summary.unrecognized,
        names = summary.index.len(),
        written = summary.stats.files_written(),
        trim_failures = summary.stats.trim_failures,
        copy_failures = summary.stats.copy_failures,
        missing = summary.coverage.missing.len(),
        "Done"
    );
    if let Some(path) = &summary.index_path {
        info!(path = %path.display(), "Wrote index");
    }

    Ok(())
}
