//! Registry building and the single-pass asset run

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::classify::Classifier;
use crate::coverage::CoverageReport;
use crate::emit::{EmitStats, Emitter, Trimmer};
use crate::extract::extract_form_targets;
use crate::fallback::FallbackTable;
use crate::feed::{GameMaster, TemplateKind};
use crate::registry::{FrozenRegistry, SuffixRegistry};
use crate::resolver::VariantResolver;
use crate::{Error, Result};

/// Seed the fallbacks, extract every form and temporary evolution template,
/// then validate and freeze the registry.
///
/// Fails only when two suffixes are ambiguous.
pub fn build_registry<R>(
    feed: &GameMaster,
    resolver: &R,
    fallbacks: &FallbackTable,
) -> Result<FrozenRegistry>
where
    R: VariantResolver + ?Sized,
{
    let mut registry = SuffixRegistry::new();
    fallbacks.seed(&mut registry);

    let mut species = 0usize;
    for template in &feed.templates {
        let Some(kind) = template.kind() else {
            continue;
        };
        let Some(species_id) = template.species_id() else {
            warn!(template_id = %template.template_id, "Unrecognized templateId");
            continue;
        };

        let variants = template.variants();
        match kind {
            TemplateKind::Forms => extract_form_targets(
                &mut registry,
                species_id,
                variants.as_deref(),
                |token| resolver.resolve_form(token),
                kind.separator(),
            ),
            TemplateKind::TemporaryEvolution => extract_form_targets(
                &mut registry,
                species_id,
                variants.as_deref(),
                |token| resolver.resolve_evolution(token),
                kind.separator(),
            ),
        }
        species += 1;
    }

    info!(templates = species, suffixes = registry.len(), "Registry built");
    registry.freeze()
}

/// Inputs of one asset run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub input_dir: PathBuf,
    /// `None` for a dry run
    pub output_dir: Option<PathBuf>,
    /// Suffix reported as a known gap instead of a missing asset
    pub known_gap: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Icon files found in the input directory
    pub assets: usize,
    /// Icon files with no registered suffix
    pub unrecognized: usize,
    pub stats: EmitStats,
    /// Logical names in processing order
    pub index: Vec<String>,
    pub index_path: Option<PathBuf>,
    pub coverage: CoverageReport,
}

/// List icon filenames in `dir`, sorted.
pub async fn list_icons(dir: &Path) -> Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| Error::io(dir, e))?;

    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| Error::io(dir, e))? {
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if !Classifier::is_icon(&name) {
            continue;
        }
        // Follows symlinks
        let is_file = tokio::fs::metadata(entry.path())
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if is_file {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

/// Classify and emit every icon in the input directory, one at a time.
pub async fn run<T: Trimmer>(
    registry: &FrozenRegistry,
    options: &RunOptions,
    trimmer: T,
) -> Result<RunSummary> {
    if let Some(dir) = &options.output_dir {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| Error::io(dir, e))?;
    }

    let filenames = list_icons(&options.input_dir).await?;
    info!(count = filenames.len(), dir = %options.input_dir.display(), "Processing icons");

    let mut classifier = Classifier::new(registry);
    let mut emitter = Emitter::new(options.output_dir.clone(), trimmer);
    let mut unrecognized = 0usize;

    for filename in &filenames {
        let Some(classified) = classifier.classify(filename) else {
            unrecognized += 1;
            continue;
        };
        emitter
            .emit(&options.input_dir.join(filename), &classified)
            .await;
    }

    let index_path = emitter.write_index().await?;

    let coverage = CoverageReport::build(registry, classifier.used(), options.known_gap.as_deref());
    coverage.log(registry);

    let (index, stats) = emitter.finish();
    Ok(RunSummary {
        assets: filenames.len(),
        unrecognized,
        stats,
        index,
        index_path,
        coverage,
    })
}
