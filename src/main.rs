// src/main.rs

use anyhow::Result;
use clap::Parser;
use tracing::debug;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging; stdout is reserved for manifest text
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render {
            input,
            output,
            format,
        }) => {
            debug!("Render command: input={}", input.display());
            commands::cmd_render(&input, output.as_deref(), format.as_deref())
        }
        Some(Commands::Layout { format }) => commands::cmd_layout(&format),
        Some(Commands::Formats) => commands::cmd_formats(),
        None => {
            // No command provided, show help
            println!("swupd-manifest v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'swupd-manifest --help' for usage information");
            Ok(())
        }
    }
}
