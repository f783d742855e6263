// src/format.rs

//! Manifest format versions and the layouts they select
//!
//! Every manifest carries a numeric format version in its `MANIFEST` line.
//! The format decides which text layout the manifest is written in:
//!
//! | Formats | Layout  | Difference                              |
//! |---------|---------|-----------------------------------------|
//! | 1-25    | legacy  | initial layout                          |
//! | 26+     | current | adds an optional `minversion:` line     |
//!
//! # Adding a layout
//!
//! The range table is append-only. When a future format needs a new layout,
//! give the open-ended current range an upper bound and append a new range
//! after it. Existing ranges must keep classifying exactly as they do today;
//! clients in the field depend on it. The new layout does not have to start
//! at 27, since format bumps can also come from content changes that leave
//! the manifest layout untouched.

use crate::error::{Error, Result};
use strum_macros::{Display, EnumString, IntoStaticStr};
use tracing::debug;

/// Last format written in the legacy layout
pub const LAST_LEGACY_FORMAT: u32 = 25;

/// Text layout of a manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Layout {
    /// Formats 1 through 25
    Legacy,
    /// Formats 26 and newer
    Current,
}

impl Layout {
    /// First format number written in this layout
    pub const fn first_format(&self) -> u32 {
        match self {
            Self::Legacy => 1,
            Self::Current => LAST_LEGACY_FORMAT + 1,
        }
    }

    /// Whether this layout has a `minversion:` header line
    pub const fn renders_min_version(&self) -> bool {
        match self {
            Self::Legacy => false,
            Self::Current => true,
        }
    }

    /// Get the layout name as a string
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// An inclusive range of format numbers sharing one layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatRange {
    /// Lowest format in the range
    pub min: u32,
    /// Highest format in the range, `None` when open-ended
    pub max: Option<u32>,
    /// Layout used by every format in the range
    pub layout: Layout,
}

impl FormatRange {
    /// Check whether `format` falls inside this range
    #[inline]
    pub const fn contains(&self, format: u32) -> bool {
        if format < self.min {
            return false;
        }
        match self.max {
            Some(max) => format <= max,
            None => true,
        }
    }
}

/// Known format ranges, ordered by `min`
const FORMAT_RANGES: [FormatRange; 2] = [
    FormatRange {
        min: 1,
        max: Some(LAST_LEGACY_FORMAT),
        layout: Layout::Legacy,
    },
    FormatRange {
        min: LAST_LEGACY_FORMAT + 1,
        max: None,
        layout: Layout::Current,
    },
];

static BUILTIN: FormatRegistry = FormatRegistry {
    ranges: &FORMAT_RANGES,
};

/// Maps format numbers to layouts
///
/// The registry is plain constant data: sharing it between threads needs no
/// locking, and resolving a format never allocates.
#[derive(Debug, Clone, Copy)]
pub struct FormatRegistry {
    ranges: &'static [FormatRange],
}

impl FormatRegistry {
    /// The registry of every layout this crate can write
    pub fn builtin() -> &'static FormatRegistry {
        &BUILTIN
    }

    /// The range table, ordered by lowest format
    pub fn ranges(&self) -> &'static [FormatRange] {
        self.ranges
    }

    /// Resolve a format number to its layout
    ///
    /// First matching range wins. Format 0 is never valid.
    pub fn resolve(&self, format: u32) -> Result<Layout> {
        match self.ranges.iter().find(|range| range.contains(format)) {
            Some(range) => {
                debug!("Format {} uses the {} layout", format, range.layout);
                Ok(range.layout)
            }
            None => Err(Error::UnsupportedFormat(format.to_string())),
        }
    }

    /// Resolve a signed format number
    ///
    /// Negative values and values beyond `u32::MAX` are unsupported.
    pub fn resolve_signed(&self, format: i64) -> Result<Layout> {
        let format =
            u32::try_from(format).map_err(|_| Error::UnsupportedFormat(format.to_string()))?;
        self.resolve(format)
    }

    /// Parse a textual format number (an optional sign is accepted) and resolve it
    ///
    /// Text that is not an integer is as unsupported as format 0.
    pub fn resolve_str(&self, s: &str) -> Result<Layout> {
        match s.trim().parse::<i64>() {
            Ok(format) => self.resolve_signed(format),
            Err(_) => Err(Error::UnsupportedFormat(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> &'static FormatRegistry {
        FormatRegistry::builtin()
    }

    #[test]
    fn test_legacy_range() {
        for f in 1..=LAST_LEGACY_FORMAT {
            assert_eq!(registry().resolve(f).unwrap(), Layout::Legacy, "format {}", f);
        }
    }

    #[test]
    fn test_current_range() {
        for f in 26..=10_000_000u32 {
            assert_eq!(registry().resolve(f).unwrap(), Layout::Current);
        }
        assert_eq!(registry().resolve(u32::MAX).unwrap(), Layout::Current);
    }

    #[test]
    fn test_boundary() {
        assert_eq!(registry().resolve(25).unwrap(), Layout::Legacy);
        assert_eq!(registry().resolve(26).unwrap(), Layout::Current);
    }

    #[test]
    fn test_format_zero_unsupported() {
        let err = registry().resolve(0).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(ref v) if v == "0"));
        assert_eq!(err.to_string(), "unsupported format 0");
    }

    #[test]
    fn test_negative_unsupported() {
        for f in [-1i64, -25, -26, i64::MIN] {
            let err = registry().resolve_signed(f).unwrap_err();
            assert!(matches!(err, Error::UnsupportedFormat(ref v) if *v == f.to_string()));
        }
    }

    #[test]
    fn test_signed_out_of_range() {
        let too_big = i64::from(u32::MAX) + 1;
        assert!(matches!(
            registry().resolve_signed(too_big),
            Err(Error::UnsupportedFormat(v)) if v == too_big.to_string()
        ));
        assert_eq!(registry().resolve_signed(30).unwrap(), Layout::Current);
    }

    #[test]
    fn test_resolve_str() {
        assert_eq!(registry().resolve_str("7").unwrap(), Layout::Legacy);
        assert_eq!(registry().resolve_str(" 26 ").unwrap(), Layout::Current);
        assert_eq!(registry().resolve_str("+40").unwrap(), Layout::Current);
        for text in ["-3", "0", "twenty", "", "2.5"] {
            assert!(
                matches!(
                    registry().resolve_str(text),
                    Err(Error::UnsupportedFormat(ref v)) if v == text
                ),
                "format text {:?}",
                text
            );
        }
    }

    #[test]
    fn test_ranges_are_contiguous() {
        let ranges = registry().ranges();
        assert_eq!(ranges.first().unwrap().min, 1);

        for pair in ranges.windows(2) {
            let max = pair[0].max.expect("only the last range may be open-ended");
            assert!(pair[0].min <= max);
            assert_eq!(pair[1].min, max + 1);
        }
        assert!(ranges.last().unwrap().max.is_none());
    }

    #[test]
    fn test_first_format_matches_table() {
        for range in registry().ranges() {
            assert_eq!(range.layout.first_format(), range.min);
        }
    }

    #[test]
    fn test_layout_names() {
        assert_eq!(Layout::Legacy.to_string(), "legacy");
        assert_eq!(Layout::Current.name(), "current");
        assert_eq!("current".parse::<Layout>().unwrap(), Layout::Current);
        assert!("modern".parse::<Layout>().is_err());
    }

    #[test]
    fn test_min_version_support() {
        assert!(!Layout::Legacy.renders_min_version());
        assert!(Layout::Current.renders_min_version());
    }

    #[test]
    fn test_registry_shared_across_threads() {
        let handles: Vec<_> = (1..=8u32)
            .map(|i| std::thread::spawn(move || FormatRegistry::builtin().resolve(i * 5).unwrap()))
            .collect();
        let layouts: Vec<Layout> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(layouts[..5], [Layout::Legacy; 5]);
        assert_eq!(layouts[5..], [Layout::Current; 3]);
    }
}
