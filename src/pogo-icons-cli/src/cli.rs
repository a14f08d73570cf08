//! CLI argument definitions for pogo-icons

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pogo-icons")]
#[command(about = "Rename and trim Pokemon GO icon assets", long_about = None)]
pub struct Cli {
    /// Log debug detail (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the game master, enum table and fallbacks come from
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Config file (defaults to <config dir>/pogo-icons/config.toml)
    #[arg(long, env = "POGO_ICONS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Game master path or http(s) URL
    #[arg(short, long)]
    pub game_master: Option<String>,

    /// Enum table JSON mapping Form/PokemonEvolution names to ids
    #[arg(short, long)]
    pub enums: Option<PathBuf>,

    /// Fallback table TOML replacing the built-in one
    #[arg(long)]
    pub fallbacks: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify raw icons and write renamed, trimmed copies
    #[command(visible_alias = "r")]
    Run {
        /// Directory of pokemon_icon_*.png files
        input: PathBuf,

        /// Output directory; omit for a dry run
        output: Option<PathBuf>,

        #[command(flatten)]
        source: SourceArgs,

        /// Trim program (default: convert)
        #[arg(long)]
        trim_program: Option<String>,
    },

    /// Build and validate the suffix registry without touching any assets
    #[command(visible_alias = "k")]
    Check {
        #[command(flatten)]
        source: SourceArgs,

        /// Print the registry as JSON
        #[arg(long)]
        dump: bool,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set default game master path or URL
        #[arg(long)]
        game_master: Option<String>,

        /// Set default enum table path
        #[arg(long)]
        enums: Option<PathBuf>,

        /// Set default fallback table path
        #[arg(long)]
        fallbacks: Option<PathBuf>,

        /// Set default trim program
        #[arg(long)]
        trim_program: Option<String>,

        /// Set default trim arguments, space separated (e.g. "-trim -fuzz 1%")
        #[arg(long, allow_hyphen_values = true)]
        trim_args: Option<String>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
