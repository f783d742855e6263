// src/commands.rs
//! Command handlers for the swupd-manifest CLI

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use swupd_manifest::{FormatRegistry, Manifest, ManifestRenderer};
use tracing::info;

/// Manifest description formats we accept as input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Toml,
}

/// Detect the description format from the file extension, falling back to content
pub fn detect_input_format(path: &Path, content: &str) -> InputFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => return InputFormat::Json,
        Some("toml") => return InputFormat::Toml,
        _ => {}
    }

    // JSON descriptions are always objects
    if content.trim_start().starts_with('{') {
        InputFormat::Json
    } else {
        InputFormat::Toml
    }
}

/// Load a manifest description from disk
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest description {}", path.display()))?;

    let format = detect_input_format(path, &content);
    info!("Loading {:?} manifest description from {}", format, path.display());

    let manifest = match format {
        InputFormat::Json => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON in {}", path.display()))?,
        InputFormat::Toml => toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML in {}", path.display()))?,
    };
    Ok(manifest)
}

/// Parse a format override, rejecting formats without a layout
pub fn parse_format(text: &str) -> Result<u32> {
    FormatRegistry::builtin().resolve_str(text)?;
    // resolve_str only accepts values that fit in u32
    Ok(text.trim().parse::<u32>()?)
}

/// Render a manifest description to a file or stdout
pub fn cmd_render(input: &Path, output: Option<&Path>, format: Option<&str>) -> Result<()> {
    let mut manifest = load_manifest(input)?;

    if let Some(format) = format {
        let format = parse_format(format)?;
        info!(
            "Overriding format {} with {}",
            manifest.header.format, format
        );
        manifest.header.format = format;
    }

    let renderer = ManifestRenderer::new();
    let layout = renderer.layout_for(&manifest)?;
    info!(
        "Rendering manifest {} in the {} layout ({} files)",
        manifest.header.version,
        layout,
        manifest.files.len()
    );

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            renderer.render(&manifest, &mut writer)?;
            writer.flush()?;
            info!("Wrote manifest to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            renderer.render(&manifest, &mut writer)?;
            writer.flush()?;
        }
    }
    Ok(())
}

/// Print the layout a format resolves to
pub fn cmd_layout(format: &str) -> Result<()> {
    let layout = FormatRegistry::builtin().resolve_str(format)?;
    println!("{}", layout);
    Ok(())
}

/// Print the format range table
pub fn cmd_formats() -> Result<()> {
    for line in format_table() {
        println!("{}", line);
    }
    Ok(())
}

fn format_table() -> Vec<String> {
    FormatRegistry::builtin()
        .ranges()
        .iter()
        .map(|range| match range.max {
            Some(max) => format!("{}-{}\t{}", range.min, max, range.layout),
            None => format!("{}-\t{}", range.min, range.layout),
        })
        .collect()
}
