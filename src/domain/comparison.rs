//! Requirement/manifest comparison results

use super::{DependencyRequirement, ExistingDependency};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of one requirement against the manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonStatus {
    /// No declaration shares the coordinate
    Missing,
    /// Declared and current
    Exists,
    /// Declared with a numerically older version
    Outdated,
    /// A deprecated coordinate
    Deprecated,
}

impl fmt::Display for ComparisonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComparisonStatus::Missing => "missing",
            ComparisonStatus::Exists => "exists",
            ComparisonStatus::Outdated => "outdated",
            ComparisonStatus::Deprecated => "deprecated",
        };
        write!(f, "{}", s)
    }
}

/// One requirement joined with zero-or-one existing declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyComparison {
    /// The catalog requirement
    pub requirement: DependencyRequirement,
    /// The matching declaration, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing: Option<ExistingDependency>,
    /// Classification
    pub status: ComparisonStatus,
    /// Human-readable recommendation
    pub recommendation: String,
    /// Ready-to-insert declaration in the manifest's syntax
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl DependencyComparison {
    /// Returns true if the requirement needs attention
    pub fn needs_action(&self) -> bool {
        self.status != ComparisonStatus::Exists
    }

    /// The version currently declared, if any
    pub fn current_version(&self) -> Option<&str> {
        self.existing.as_ref().and_then(|e| e.version.as_deref())
    }
}
