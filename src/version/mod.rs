//! Dotted numeric version identifiers and versioned path segments.
//!
//! Documentation trees route per-version content through directory names
//! of the form `version-1`, `version-1.1`, or `version-123.456.789`: the
//! literal prefix `version-` followed by one or more dot-separated runs
//! of ASCII digits. The grammar is strict on purpose: suffixed names
//! like `version-1.2-dev` or `version-1.2rc3` are NOT versioned segments
//! and never participate in substitution.
//!
//! Version identifiers here are deliberately not semver: there is no
//! upper bound on the number of dot-separated parts and no
//! prerelease/build syntax. [`DottedVersion`] preserves the identifier
//! exactly as written (including leading zeros) while comparing
//! numerically, part by part.
//!
//! # Examples
//!
//! ```
//! use docstamp::version::{DottedVersion, extract_versions};
//!
//! let versions = extract_versions("/docs/version-2.0.1/intro.md");
//! assert_eq!(versions.len(), 1);
//! assert_eq!(versions[0].as_str(), "2.0.1");
//!
//! let a: DottedVersion = "1.2".parse().unwrap();
//! let b: DottedVersion = "1.10".parse().unwrap();
//! assert!(a < b);
//! ```

use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;

use crate::constants::VERSION_SEGMENT_PREFIX;
use crate::core::DocstampError;

/// Matches an entire path component that encodes a version, capturing the
/// dotted digit sequence. Anchored on both ends so digit/dot structure is
/// strict: no trailing dot, no non-digit suffix.
static SEGMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{VERSION_SEGMENT_PREFIX}([0-9]+(?:\.[0-9]+)*)$")).unwrap()
});

/// Matches a bare dotted digit sequence (the grammar without the
/// `version-` prefix), used to validate configured default versions.
static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(?:\.[0-9]+)*$").unwrap());

/// A dot-separated sequence of non-negative integers, e.g. `1`, `1.1`,
/// or `123.456.789`.
///
/// The original spelling is preserved: `Display` and [`as_str`] return
/// the identifier exactly as it appeared in the path, so `01.2` stamps
/// into content as `01.2`. Comparison is numeric per part (so
/// `1.10 > 1.9` and `01.2 == 1.2`), with a shorter sequence ordering
/// before a longer one on prefix ties (`1.2 < 1.2.0`).
///
/// [`as_str`]: DottedVersion::as_str
#[derive(Debug, Clone)]
pub struct DottedVersion {
    raw: String,
}

impl DottedVersion {
    /// The version identifier exactly as written in the path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The dot-separated parts, in order.
    pub fn parts(&self) -> impl Iterator<Item = &str> {
        self.raw.split('.')
    }
}

/// Compare two digit runs numerically without parsing to an integer, so
/// arbitrarily long parts cannot overflow.
fn cmp_digit_run(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

impl PartialEq for DottedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DottedVersion {}

impl PartialOrd for DottedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DottedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut a = self.parts();
        let mut b = other.parts();
        loop {
            match (a.next(), b.next()) {
                (Some(x), Some(y)) => match cmp_digit_run(x, y) {
                    Ordering::Equal => {}
                    ord => return ord,
                },
                (Some(_), None) => return Ordering::Greater,
                (None, Some(_)) => return Ordering::Less,
                (None, None) => return Ordering::Equal,
            }
        }
    }
}

impl Hash for DottedVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Consistent with Eq: leading zeros are not significant.
        for part in self.parts() {
            let trimmed = part.trim_start_matches('0');
            trimmed.hash(state);
        }
    }
}

impl fmt::Display for DottedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for DottedVersion {
    type Err = DocstampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if VERSION_RE.is_match(s) {
            Ok(Self {
                raw: s.to_string(),
            })
        } else {
            Err(DocstampError::InvalidVersionSegment {
                segment: s.to_string(),
            })
        }
    }
}

impl serde::Serialize for DottedVersion {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// Extract every versioned segment from a path, left to right.
///
/// A component only counts when it is bounded by path separators on both
/// sides, so `/docs/version-1.2/intro.md` yields `1.2` while a terminal
/// `/docs/version-1.2` yields nothing. Backslash separators are
/// normalized first, making the convention separator-agnostic.
///
/// Paths with more than one versioned segment are unusual; callers decide
/// whether that is first-wins or an input-validation error (see
/// [`crate::rewriter`]).
///
/// # Examples
///
/// ```
/// use docstamp::version::extract_versions;
///
/// assert_eq!(extract_versions("/docs/version-1/a.md")[0].as_str(), "1");
/// assert!(extract_versions("/docs/version-1.2-dev/a.md").is_empty());
/// assert!(extract_versions("/docs/intro.md").is_empty());
/// ```
#[must_use]
pub fn extract_versions(path: &str) -> Vec<DottedVersion> {
    let normalized = path.replace('\\', "/");
    let components: Vec<&str> = normalized.split('/').collect();
    if components.len() < 3 {
        // Fewer than two separators means no component is bounded on both sides.
        return Vec::new();
    }

    components[1..components.len() - 1]
        .iter()
        .filter_map(|component| {
            SEGMENT_RE.captures(component).map(|caps| DottedVersion {
                raw: caps[1].to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_versions() {
        for raw in ["1", "1.1", "123.456.789", "1.2.3.4.5.6", "0", "01.2"] {
            let version: DottedVersion = raw.parse().unwrap();
            assert_eq!(version.as_str(), raw, "round-trips verbatim");
        }
    }

    #[test]
    fn test_parse_rejects_malformed_versions() {
        for raw in ["", ".", "1.", ".1", "1..2", "1.2-dev", "1.2rc3", "v1.2", "1.2 ", "a"] {
            assert!(raw.parse::<DottedVersion>().is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn test_numeric_ordering() {
        let parse = |s: &str| s.parse::<DottedVersion>().unwrap();
        assert!(parse("1.9") < parse("1.10"));
        assert!(parse("2") > parse("1.999.999"));
        assert!(parse("1.2") < parse("1.2.0"));
        assert_eq!(parse("01.2"), parse("1.2"));
        assert_eq!(parse("1.2.3"), parse("1.2.3"));
    }

    #[test]
    fn test_ordering_ignores_leading_zeros() {
        let parse = |s: &str| s.parse::<DottedVersion>().unwrap();
        assert!(parse("09") < parse("10"));
        assert!(parse("010") > parse("9"));
    }

    #[test]
    fn test_extract_single_segment() {
        let versions = extract_versions("/docs/version-2.0.1/intro.md");
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].as_str(), "2.0.1");
    }

    #[test]
    fn test_extract_single_integer_segment() {
        let versions = extract_versions("/docs/version-1/intro.md");
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].as_str(), "1");
    }

    #[test]
    fn test_extract_long_segment() {
        let versions = extract_versions("/version-1.2.3.4.5.6/page.md");
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].as_str(), "1.2.3.4.5.6");
    }

    #[test]
    fn test_extract_rejects_malformed_segments() {
        assert!(extract_versions("/docs/version-1.2-dev/intro.md").is_empty());
        assert!(extract_versions("/docs/version-1.2rc3/intro.md").is_empty());
        assert!(extract_versions("/docs/version-/intro.md").is_empty());
        assert!(extract_versions("/docs/version-1./intro.md").is_empty());
        assert!(extract_versions("/docs/version-.1/intro.md").is_empty());
    }

    #[test]
    fn test_extract_requires_separator_on_both_sides() {
        // Terminal component has no trailing separator.
        assert!(extract_versions("/docs/version-1.2").is_empty());
        // Leading component of a relative path has no leading separator.
        assert!(extract_versions("version-1.2/intro.md").is_empty());
        // No separators at all.
        assert!(extract_versions("version-1.2").is_empty());
    }

    #[test]
    fn test_extract_multiple_segments_left_to_right() {
        let versions = extract_versions("/a/version-1.0/b/version-2.0/c.md");
        let raw: Vec<&str> = versions.iter().map(DottedVersion::as_str).collect();
        assert_eq!(raw, vec!["1.0", "2.0"]);
    }

    #[test]
    fn test_extract_adjacent_segments() {
        // Consecutive versioned directories share a separator; both count.
        let versions = extract_versions("/version-1/version-2/c.md");
        let raw: Vec<&str> = versions.iter().map(DottedVersion::as_str).collect();
        assert_eq!(raw, vec!["1", "2"]);
    }

    #[test]
    fn test_extract_normalizes_backslashes() {
        let versions = extract_versions(r"C:\docs\version-1.7\intro.md");
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].as_str(), "1.7");
    }

    #[test]
    fn test_extract_requires_exact_prefix() {
        assert!(extract_versions("/docs/Version-1.2/intro.md").is_empty());
        assert!(extract_versions("/docs/myversion-1.2/intro.md").is_empty());
        assert!(extract_versions("/docs/version_1.2/intro.md").is_empty());
    }

}
