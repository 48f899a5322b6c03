//! Library coordinates: the version-independent `(group, artifact)` key

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a library regardless of version
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DependencyCoordinate {
    /// Maven groupId / Gradle group
    pub group: String,
    /// Maven artifactId / Gradle name
    pub artifact: String,
}

impl DependencyCoordinate {
    /// Creates a new coordinate
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
        }
    }

    /// Parses `group:artifact` (any trailing `:version` is ignored)
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.trim().splitn(3, ':');
        let group = parts.next()?.trim();
        let artifact = parts.next()?.trim();
        if group.is_empty() || artifact.is_empty() {
            return None;
        }
        Some(Self::new(group, artifact))
    }

    /// Returns true if the group starts with the given prefix
    pub fn group_starts_with(&self, prefix: &str) -> bool {
        self.group.starts_with(prefix)
    }
}

impl fmt::Display for DependencyCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let c = DependencyCoordinate::parse("org.mybatis:mybatis").unwrap();
        assert_eq!(c.group, "org.mybatis");
        assert_eq!(c.artifact, "mybatis");

        let c = DependencyCoordinate::parse("com.mysql:mysql-connector-j:8.4.0").unwrap();
        assert_eq!(c.artifact, "mysql-connector-j");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(DependencyCoordinate::parse("lombok").is_none());
        assert!(DependencyCoordinate::parse(":artifact").is_none());
    }

    #[test]
    fn test_display() {
        let c = DependencyCoordinate::new("org.projectlombok", "lombok");
        assert_eq!(c.to_string(), "org.projectlombok:lombok");
    }
}
