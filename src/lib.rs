// src/lib.rs

//! swupd manifest rendering
//!
//! Writes software update manifests in the line-oriented text format read by
//! update clients and servers.
//!
//! # Architecture
//!
//! - Format registry: constant table mapping format numbers to layouts
//! - Renderer: writes a populated manifest in its layout, byte for byte
//! - Data model: header and file records, built by the caller
//!
//! Hashing, file list construction, parsing and storage live elsewhere; this
//! crate only turns a manifest value into bytes.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use swupd_manifest::{FileRecord, Manifest, ManifestHeader, ManifestRenderer};
//!
//! let header = ManifestHeader {
//!     format: 26,
//!     version: 100,
//!     previous: 90,
//!     min_version: 0,
//!     file_count: 1,
//!     timestamp: Utc.timestamp_opt(1_000_000_000, 0).unwrap(),
//!     content_size: 4096,
//!     includes: vec!["os-core".to_string()],
//! };
//! let manifest = Manifest::new(header, vec![FileRecord::new("F...", "abc123", 100, "/usr/bin/foo")]);
//!
//! let text = ManifestRenderer::new().render_to_string(&manifest).unwrap();
//! assert!(text.starts_with("MANIFEST\t26\n"));
//! assert!(text.ends_with("F...\tabc123\t100\t/usr/bin/foo\n"));
//! ```

mod error;
pub mod format;
pub mod manifest;
pub mod render;

pub use error::{Error, Result};
pub use format::{FormatRange, FormatRegistry, Layout, LAST_LEGACY_FORMAT};
pub use manifest::{
    FileFlags, FileModifier, FileRecord, FileRename, FileStatus, FileType, FlagString, Manifest,
    ManifestHeader,
};
pub use render::{render_layout, ManifestRenderer};
