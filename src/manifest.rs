// src/manifest.rs

//! Manifest data model
//!
//! A manifest is a header followed by an ordered list of file records.
//! Values here are built by whatever produces the update content (hashing,
//! file list construction, flag assignment) and then handed to the renderer
//! as-is. Nothing in this module checks hashes or names.
//!
//! Input descriptions can be deserialized with serde. Timestamps are read and
//! written as epoch seconds to match the rendered `timestamp:` line.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Manifest header fields, in rendering order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestHeader {
    /// Format version, selects the layout
    pub format: u32,

    /// Version this manifest describes
    pub version: u32,

    /// Version of the prior manifest (0 if none)
    #[serde(default)]
    pub previous: u32,

    /// Minimum version clients must be at to update (0 means absent)
    #[serde(default)]
    pub min_version: u32,

    /// Number of file records; expected to equal `Manifest::files.len()`
    pub file_count: u32,

    /// Creation time
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,

    /// Total size in bytes of all referenced content
    #[serde(default)]
    pub content_size: u64,

    /// Names of included sub-manifests, in order
    #[serde(default)]
    pub includes: Vec<String>,
}

/// A pre-formatted flag token
///
/// The renderer writes this verbatim. Use [`FileFlags`] to build the standard
/// four-character encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagString(String);

impl FlagString {
    /// Wrap an already formatted flag token
    pub fn new(flags: impl Into<String>) -> Self {
        Self(flags.into())
    }

    /// The token as written into the manifest
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlagString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FlagString {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FlagString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One file entry in a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Flag token (type, status, modifier, rename)
    pub flags: FlagString,

    /// Content hash
    pub hash: String,

    /// Version in which this entry last changed
    pub version: u32,

    /// File path
    pub name: String,
}

impl FileRecord {
    /// Create a new file record
    pub fn new(
        flags: impl Into<FlagString>,
        hash: impl Into<String>,
        version: u32,
        name: impl Into<String>,
    ) -> Self {
        Self {
            flags: flags.into(),
            hash: hash.into(),
            version,
            name: name.into(),
        }
    }
}

/// A complete manifest: header plus file records in rendering order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub header: ManifestHeader,

    #[serde(default)]
    pub files: Vec<FileRecord>,
}

impl Manifest {
    /// Create a manifest from its parts without touching `file_count`
    pub fn new(header: ManifestHeader, files: Vec<FileRecord>) -> Self {
        Self { header, files }
    }

    /// Whether `header.file_count` agrees with the file list
    pub fn file_count_matches(&self) -> bool {
        usize::try_from(self.header.file_count).is_ok_and(|count| count == self.files.len())
    }

    /// Set `header.file_count` from the file list
    ///
    /// For producers assembling a manifest. Rendering never calls this.
    pub fn sync_file_count(&mut self) {
        self.header.file_count = u32::try_from(self.files.len()).unwrap_or(u32::MAX);
    }
}

/// File type flag (first flag character)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    #[default]
    Unset,
    File,
    Directory,
    Link,
    Manifest,
    IncludedManifest,
}

impl FileType {
    const fn flag(&self) -> char {
        match self {
            Self::Unset => '.',
            Self::File => 'F',
            Self::Directory => 'D',
            Self::Link => 'L',
            Self::Manifest => 'M',
            Self::IncludedManifest => 'I',
        }
    }
}

/// File status flag (second flag character)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    #[default]
    Unset,
    Deleted,
    Ghosted,
}

impl FileStatus {
    const fn flag(&self) -> char {
        match self {
            Self::Unset => '.',
            Self::Deleted => 'd',
            Self::Ghosted => 'g',
        }
    }
}

/// File modifier flag (third flag character)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileModifier {
    #[default]
    Unset,
    Config,
    State,
    Boot,
}

impl FileModifier {
    const fn flag(&self) -> char {
        match self {
            Self::Unset => '.',
            Self::Config => 'C',
            Self::State => 's',
            Self::Boot => 'b',
        }
    }
}

/// Rename flag (fourth flag character)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileRename {
    #[default]
    Unset,
    Renamed,
}

impl FileRename {
    const fn flag(&self) -> char {
        match self {
            Self::Unset => '.',
            Self::Renamed => 'r',
        }
    }
}

/// Structured flag bits for a file record
///
/// Encodes to a fixed four-character token, `.` standing in for each unset
/// field: a plain config file is `F.C.`, a deleted file is `.d..`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FileFlags {
    #[serde(default)]
    pub file_type: FileType,
    #[serde(default)]
    pub status: FileStatus,
    #[serde(default)]
    pub modifier: FileModifier,
    #[serde(default)]
    pub rename: FileRename,
}

impl FileFlags {
    /// Flags for a regular file
    pub fn file() -> Self {
        Self {
            file_type: FileType::File,
            ..Self::default()
        }
    }

    /// Flags for a directory
    pub fn directory() -> Self {
        Self {
            file_type: FileType::Directory,
            ..Self::default()
        }
    }

    /// Flags for a symlink
    pub fn link() -> Self {
        Self {
            file_type: FileType::Link,
            ..Self::default()
        }
    }

    /// Whether every flag field is unset
    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }

    /// Encode as the four-character flag token
    ///
    /// `name` is only used in the error when every field is unset.
    pub fn encode(&self, name: &str) -> Result<FlagString> {
        if self.is_unset() {
            return Err(Error::NoFlagsSet(name.to_string()));
        }

        let token: String = [
            self.file_type.flag(),
            self.status.flag(),
            self.modifier.flag(),
            self.rename.flag(),
        ]
        .iter()
        .collect();

        Ok(FlagString(token))
    }
}
