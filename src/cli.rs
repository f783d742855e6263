// src/cli.rs
//! CLI definitions for swupd-manifest
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "swupd-manifest")]
#[command(author, version, about = "Render software update manifests in their versioned text format", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a manifest description (JSON or TOML) to manifest text
    Render {
        /// Path to the manifest description
        input: PathBuf,

        /// Write the manifest here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the format number from the description
        #[arg(short, long, allow_hyphen_values = true)]
        format: Option<String>,
    },

    /// Show which layout a format number uses
    Layout {
        /// Format number
        #[arg(allow_hyphen_values = true)]
        format: String,
    },

    /// List known format ranges and their layouts
    Formats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_negative_format_reaches_resolver() {
        let cli = Cli::try_parse_from(["swupd-manifest", "layout", "-3"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Layout { ref format }) if format == "-3"));

        let cli =
            Cli::try_parse_from(["swupd-manifest", "render", "m.json", "--format", "-1"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Render { format: Some(ref f), .. }) if f == "-1"
        ));
    }
}
