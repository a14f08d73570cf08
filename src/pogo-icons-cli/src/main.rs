mod cli;
mod commands;
mod config;
mod feed_source;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "pogo_icons=debug"
    } else {
        "pogo_icons=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            input,
            output,
            source,
            trim_program,
        } => {
            commands::run::handle(input, output, source, trim_program).await?;
        }

        Commands::Check { source, dump } => {
            commands::check::handle(source, dump).await?;
        }

        Commands::Configure {
            game_master,
            enums,
            fallbacks,
            trim_program,
            trim_args,
            show,
        } => {
            commands::configure::handle(
                game_master,
                enums,
                fallbacks,
                trim_program,
                trim_args,
                show,
            )?;
        }
    }

    Ok(())
}
