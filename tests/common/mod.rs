// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

use chrono::{TimeZone, Utc};
use swupd_manifest::{FileFlags, FileRecord, Manifest, ManifestHeader};

pub const FOO_BIN_HASH: &str = "8931e1696d178eb508d13fbaf6eba1a0f7a8252212b6ccb7eed51f5e7bde6586";
pub const FOO_SHARE_HASH: &str = "b54017d271f0a032b7991e7e7d454c1299e0a3bc4c16477ea3241938b27c2600";

/// Build the reference header: version 100 on top of 90, requiring 50.
pub fn fixture_header(format: u32) -> ManifestHeader {
    ManifestHeader {
        format,
        version: 100,
        previous: 90,
        min_version: 50,
        file_count: 2,
        timestamp: Utc.timestamp_opt(1_000_000_000, 0).unwrap(),
        content_size: 2048,
        includes: vec!["os-core".to_string()],
    }
}

/// Build the reference manifest: a binary and its data directory.
pub fn fixture_manifest(format: u32) -> Manifest {
    let files = vec![
        FileRecord::new(
            FileFlags::file().encode("/usr/bin/foo").unwrap(),
            FOO_BIN_HASH,
            100,
            "/usr/bin/foo",
        ),
        FileRecord::new(
            FileFlags::directory().encode("/usr/share/foo").unwrap(),
            FOO_SHARE_HASH,
            90,
            "/usr/share/foo",
        ),
    ];
    Manifest::new(fixture_header(format), files)
}
