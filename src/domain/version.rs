//! Numeric version comparison and framework version handling

use semver::Version;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Extracts the numeric parts of a version string.
///
/// Each dot-separated segment contributes its leading digit run. A segment
/// without leading digits ends the sequence (`2.0.1.Final` -> `[2, 0, 1]`),
/// unless it is the first one, in which case the version is unparseable.
pub fn numeric_parts(version: &str) -> Option<Vec<u64>> {
    let s = version.trim();
    let s = s.strip_prefix('v').unwrap_or(s);

    let mut parts = Vec::new();
    for segment in s.split('.') {
        let digits: String = segment.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            break;
        }
        parts.push(digits.parse().ok()?);
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts)
    }
}

/// Compares two versions numerically, padding the shorter one with zeros.
///
/// Returns None if either side cannot be parsed.
pub fn compare_versions(a: &str, b: &str) -> Option<Ordering> {
    let mut parts_a = numeric_parts(a)?;
    let mut parts_b = numeric_parts(b)?;

    let len = parts_a.len().max(parts_b.len());
    parts_a.resize(len, 0);
    parts_b.resize(len, 0);

    Some(parts_a.cmp(&parts_b))
}

/// Returns true only if `current` is known to precede `required`
pub fn is_outdated(current: &str, required: &str) -> bool {
    compare_versions(current, required) == Some(Ordering::Less)
}

/// A detected or caller-supplied framework (Spring Boot) version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkVersion {
    /// The version text as declared
    pub raw: String,
    /// Normalized major.minor.patch
    pub version: Version,
}

impl FrameworkVersion {
    /// Parses a framework version leniently (`3.2`, `2.7.18.RELEASE`, `3.5.5-SNAPSHOT`)
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = numeric_parts(raw)?;
        parts.resize(3, 0);
        Some(Self {
            raw: raw.trim().to_string(),
            version: Version::new(parts[0], parts[1], parts[2]),
        })
    }

    /// Major version
    pub fn major(&self) -> u64 {
        self.version.major
    }

    /// Returns true for the Jakarta EE era (3.x and later)
    pub fn is_modern(&self) -> bool {
        self.version.major >= 3
    }

    /// Minimum Java level for this framework generation
    pub fn java_floor(&self) -> u32 {
        if self.is_modern() {
            17
        } else {
            8
        }
    }

    /// Matches a lookup-table prefix such as `2.` or `3.1` on a segment boundary
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        let normalized = self.version.to_string();
        match normalized.strip_prefix(prefix) {
            Some(rest) => prefix.ends_with('.') || rest.is_empty() || rest.starts_with('.'),
            None => false,
        }
    }
}

impl fmt::Display for FrameworkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl Serialize for FrameworkVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}
