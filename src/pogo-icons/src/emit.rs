//! Asset emission
//!
//! Each classified asset is trimmed once into its first target; every other
//! target is a byte copy of that first output. When no output directory is
//! configured the emitter only builds the index (dry run).

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error};

use crate::classify::{Classified, ICON_PREFIX};
use crate::{Error, Result};

/// Name of the index written next to the emitted icons.
pub const INDEX_FILE: &str = "index.json";

/// External trim operation.
#[async_trait]
pub trait Trimmer: Send + Sync {
    /// Trim `source` into `dest`.
    async fn trim(&self, source: &Path, dest: &Path) -> Result<()>;
}

/// Runs an external program as `<program> <args...> <source> <dest>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTrimmer {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandTrimmer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl Default for CommandTrimmer {
    /// ImageMagick `convert -trim -fuzz 1%`
    fn default() -> Self {
        Self::new(
            "convert",
            ["-trim", "-fuzz", "1%"].map(String::from).to_vec(),
        )
    }
}

#[async_trait]
impl Trimmer for CommandTrimmer {
    async fn trim(&self, source: &Path, dest: &Path) -> Result<()> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(source)
            .arg(dest)
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|e| Error::Trim {
                path: source.to_path_buf(),
                reason: format!("failed to run {}: {e}", self.program),
            })?;

        if !status.success() {
            return Err(Error::Trim {
                path: source.to_path_buf(),
                reason: format!("{} exited with {status}", self.program),
            });
        }
        Ok(())
    }
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmitStats {
    pub trimmed: usize,
    pub copied: usize,
    pub trim_failures: usize,
    pub copy_failures: usize,
}

impl EmitStats {
    pub fn files_written(&self) -> usize {
        self.trimmed + self.copied
    }
}

/// Where the first target of the current asset stands.
enum FirstOutput {
    Pending,
    Written(PathBuf),
    Failed,
}

/// Produces output files and the logical name index.
pub struct Emitter<T> {
    output_dir: Option<PathBuf>,
    trimmer: T,
    index: Vec<String>,
    stats: EmitStats,
}

impl<T: Trimmer> Emitter<T> {
    pub fn new(output_dir: Option<PathBuf>, trimmer: T) -> Self {
        Self {
            output_dir,
            trimmer,
            index: Vec::new(),
            stats: EmitStats::default(),
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.output_dir.is_none()
    }

    /// Emit every target of one classified asset.
    ///
    /// Failures are logged and counted. A failed trim leaves the remaining
    /// targets of that asset unwritten, but they stay in the index.
    pub async fn emit(&mut self, source: &Path, classified: &Classified<'_>) {
        let logical_extension = classified
            .extension
            .strip_suffix(".png")
            .unwrap_or(&classified.extension);
        let mut first = FirstOutput::Pending;

        for target in classified.targets {
            self.index.push(format!("{target}{logical_extension}"));

            let Some(dir) = self.output_dir.as_deref() else {
                continue;
            };
            let dest = dir.join(format!("{ICON_PREFIX}{target}{}", classified.extension));

            first = match first {
                FirstOutput::Pending => match self.trimmer.trim(source, &dest).await {
                    Ok(()) => {
                        debug!(source = %source.display(), dest = %dest.display(), "Trimmed");
                        self.stats.trimmed += 1;
                        FirstOutput::Written(dest)
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to convert");
                        self.stats.trim_failures += 1;
                        FirstOutput::Failed
                    }
                },
                FirstOutput::Written(first_path) => {
                    match tokio::fs::copy(&first_path, &dest).await {
                        Ok(_) => {
                            debug!(dest = %dest.display(), "Copied");
                            self.stats.copied += 1;
                        }
                        Err(e) => {
                            error!(
                                error = %e,
                                from = %first_path.display(),
                                to = %dest.display(),
                                "Failed to copy"
                            );
                            self.stats.copy_failures += 1;
                        }
                    }
                    FirstOutput::Written(first_path)
                }
                FirstOutput::Failed => {
                    debug!(dest = %dest.display(), "Skipped, first output failed");
                    FirstOutput::Failed
                }
            };
        }
    }

    /// Logical names emitted so far, in processing order.
    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn stats(&self) -> EmitStats {
        self.stats
    }

    /// Write `index.json` into the output directory. Does nothing on a dry run.
    pub async fn write_index(&self) -> Result<Option<PathBuf>> {
        let Some(dir) = self.output_dir.as_deref() else {
            return Ok(None);
        };
        let path = dir.join(INDEX_FILE);
        let json = serde_json::to_string(&self.index)?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| Error::io(&path, e))?;
        Ok(Some(path))
    }

    pub fn finish(self) -> (Vec<String>, EmitStats) {
        (self.index, self.stats)
    }
}
