//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting pogo-icons defaults.

use crate::config::Config;
use anyhow::Result;
use std::path::PathBuf;

/// Handle the configure command
pub fn handle(
    game_master: Option<String>,
    enums: Option<PathBuf>,
    fallbacks: Option<PathBuf>,
    trim_program: Option<String>,
    trim_args: Option<String>,
    show: bool,
) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    let changed = apply(
        &mut config,
        game_master,
        enums,
        fallbacks,
        trim_program,
        trim_args,
    );
    if !changed {
        show_usage();
        return Ok(());
    }
    config.save()?;

    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

/// Set every given value. Returns false when nothing was given.
fn apply(
    config: &mut Config,
    game_master: Option<String>,
    enums: Option<PathBuf>,
    fallbacks: Option<PathBuf>,
    trim_program: Option<String>,
    trim_args: Option<String>,
) -> bool {
    let mut changed = false;

    if game_master.is_some() {
        config.game_master = game_master;
        changed = true;
    }
    if enums.is_some() {
        config.enums = enums;
        changed = true;
    }
    if fallbacks.is_some() {
        config.fallbacks = fallbacks;
        changed = true;
    }
    if trim_program.is_some() {
        config.trim_program = trim_program;
        changed = true;
    }
    if let Some(args) = trim_args {
        config.trim_args = Some(args.split_whitespace().map(String::from).collect());
        changed = true;
    }

    changed
}

/// Display current configuration
fn show_config(config: &Config) {
    println!("Game master: {}", config.game_master_source());
    match &config.enums {
        Some(path) => println!("Enum table: {}", path.display()),
        None => println!("No enum table configured"),
    }
    if let Some(path) = &config.fallbacks {
        println!("Fallbacks: {}", path.display());
    }
    let trimmer = config.trimmer();
    println!("Trim command: {} {}", trimmer.program, trimmer.args.join(" "));

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: pogo-icons configure [--game-master SRC] [--enums PATH] [--fallbacks PATH]");
    println!("                            [--trim-program PROGRAM] [--trim-args ARGS]");
    println!("       pogo-icons configure --show");
}
