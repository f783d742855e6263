// src/render.rs

//! Manifest text rendering
//!
//! Both layouts share one line structure:
//!
//! ```text
//! MANIFEST\t<format>
//! version:\t<version>
//! previous:\t<previous>
//! minversion:\t<min_version>      (current layout, non-zero only)
//! filecount:\t<file_count>
//! timestamp:\t<epoch seconds>
//! contentsize:\t<content_size>
//! includes:\t<name>               (one per include)
//!
//! <flags>\t<hash>\t<version>\t<name>   (one per file record)
//! ```
//!
//! Every line, including the blank separator and the last file record, ends
//! with `\n`. Update clients parse this byte for byte, so field order, tabs
//! and the presence of conditional lines must not change for an existing
//! layout.

use crate::error::{Error, Result};
use crate::format::{FormatRegistry, Layout};
use crate::manifest::{FileRecord, Manifest, ManifestHeader};
use std::io::{self, Write};
use tracing::{debug, trace, warn};

/// Renders manifests in the layout selected by their format
#[derive(Debug, Clone, Copy)]
pub struct ManifestRenderer {
    registry: &'static FormatRegistry,
}

impl Default for ManifestRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestRenderer {
    /// Create a renderer backed by the builtin format registry
    pub fn new() -> Self {
        Self {
            registry: FormatRegistry::builtin(),
        }
    }

    /// Resolve the layout for a manifest's format
    pub fn layout_for(&self, manifest: &Manifest) -> Result<Layout> {
        self.registry.resolve(manifest.header.format)
    }

    /// Render `manifest` into `out`
    ///
    /// Fails with `UnsupportedFormat` before writing anything when the header
    /// format has no layout.
    pub fn render<W: Write>(&self, manifest: &Manifest, out: &mut W) -> Result<()> {
        let layout = self.layout_for(manifest)?;
        write_manifest(layout, manifest, out)
    }

    /// Render `manifest` into an owned string
    pub fn render_to_string(&self, manifest: &Manifest) -> Result<String> {
        let mut buf = Vec::with_capacity(estimated_len(manifest));
        self.render(manifest, &mut buf)?;
        let text =
            String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(text)
    }
}

/// Render `manifest` in an already resolved layout
///
/// The header's `format` must resolve to `layout`. A format with no layout,
/// or one that belongs to a different layout, fails with `UnsupportedFormat`
/// before anything is written.
pub fn render_layout<W: Write>(layout: Layout, manifest: &Manifest, out: &mut W) -> Result<()> {
    let format = manifest.header.format;
    let resolved = FormatRegistry::builtin().resolve(format)?;
    if resolved != layout {
        debug!(
            "Format {} uses the {} layout, refusing to write it as {}",
            format, resolved, layout
        );
        return Err(Error::UnsupportedFormat(format.to_string()));
    }
    write_manifest(layout, manifest, out)
}

fn write_manifest<W: Write>(layout: Layout, manifest: &Manifest, out: &mut W) -> Result<()> {
    let header = &manifest.header;

    if !manifest.file_count_matches() {
        warn!(
            "Manifest {} declares filecount {} but has {} file records",
            header.version,
            header.file_count,
            manifest.files.len()
        );
    }

    match layout {
        Layout::Legacy => write_legacy_header(header, out)?,
        Layout::Current => write_current_header(header, out)?,
    }

    writeln!(out)?;
    for file in &manifest.files {
        write_file_record(file, out)?;
    }

    trace!(
        "Rendered manifest {} (format {}, {} layout): {} includes, {} files",
        header.version,
        header.format,
        layout,
        header.includes.len(),
        manifest.files.len()
    );
    Ok(())
}

fn write_legacy_header<W: Write>(header: &ManifestHeader, out: &mut W) -> Result<()> {
    write_version_lines(header, out)?;
    write_content_lines(header, out)
}

fn write_current_header<W: Write>(header: &ManifestHeader, out: &mut W) -> Result<()> {
    write_version_lines(header, out)?;
    if header.min_version != 0 {
        writeln!(out, "minversion:\t{}", header.min_version)?;
    }
    write_content_lines(header, out)
}

/// `MANIFEST`, `version:` and `previous:` lines
fn write_version_lines<W: Write>(header: &ManifestHeader, out: &mut W) -> Result<()> {
    writeln!(out, "MANIFEST\t{}", header.format)?;
    writeln!(out, "version:\t{}", header.version)?;
    writeln!(out, "previous:\t{}", header.previous)?;
    Ok(())
}

/// `filecount:` through the last `includes:` line
fn write_content_lines<W: Write>(header: &ManifestHeader, out: &mut W) -> Result<()> {
    writeln!(out, "filecount:\t{}", header.file_count)?;
    writeln!(out, "timestamp:\t{}", header.timestamp.timestamp())?;
    writeln!(out, "contentsize:\t{}", header.content_size)?;
    for include in &header.includes {
        writeln!(out, "includes:\t{}", include)?;
    }
    Ok(())
}

fn write_file_record<W: Write>(file: &FileRecord, out: &mut W) -> Result<()> {
    writeln!(out, "{}\t{}\t{}\t{}", file.flags, file.hash, file.version, file.name)?;
    Ok(())
}

/// Rough output size, used to presize string buffers
fn estimated_len(manifest: &Manifest) -> usize {
    let includes: usize = manifest.header.includes.iter().map(|i| i.len() + 11).sum();
    let files: usize = manifest
        .files
        .iter()
        .map(|f| f.flags.as_str().len() + f.hash.len() + f.name.len() + 14)
        .sum();
    160 + includes + files
}
