use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod domain;
mod services;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log))
        .with_writer(std::io::stderr)
        .init();

    let config = services::config::load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Build { .. } => commands::handle_build(&cli, config),
        _ => commands::handle_inspect_commands(&cli, &config),
    }
}
