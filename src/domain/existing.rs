//! Dependencies declared in a manifest

use super::{DependencyCoordinate, Scope};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dependency extracted from a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingDependency {
    /// Library coordinate
    pub coordinate: DependencyCoordinate,
    /// Declared version (after property/variable resolution, if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Declared scope
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    /// 1-based line number of the declaration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl ExistingDependency {
    /// Creates a new existing dependency without version or scope
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            coordinate: DependencyCoordinate::new(group, artifact),
            version: None,
            scope: None,
            line: None,
        }
    }

    /// Sets the version (builder pattern)
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the scope (builder pattern)
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Sets the line number (builder pattern)
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for ExistingDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{}:{}", self.coordinate, v),
            None => write!(f, "{}", self.coordinate),
        }
    }
}
