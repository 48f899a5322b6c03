//! Catalog requirement types

use super::DependencyCoordinate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dependency scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Compile,
    Provided,
    Test,
    Runtime,
}

impl Scope {
    /// Parses a Maven `<scope>` value; unknown scopes (e.g. `system`, `import`) yield None
    pub fn from_maven(value: &str) -> Option<Scope> {
        match value.trim() {
            "compile" => Some(Scope::Compile),
            "provided" => Some(Scope::Provided),
            "test" => Some(Scope::Test),
            "runtime" => Some(Scope::Runtime),
            _ => None,
        }
    }

    /// Maps a Gradle configuration name to a scope
    pub fn from_gradle_configuration(configuration: &str) -> Scope {
        match configuration {
            c if c.starts_with("test") => Scope::Test,
            "compileOnly" | "annotationProcessor" | "kapt" => Scope::Provided,
            "runtimeOnly" | "runtime" => Scope::Runtime,
            _ => Scope::Compile,
        }
    }

    /// The idiomatic Gradle configuration keyword for this scope
    pub fn gradle_keyword(&self) -> &'static str {
        match self {
            Scope::Compile => "implementation",
            Scope::Provided => "compileOnly",
            Scope::Test => "testImplementation",
            Scope::Runtime => "runtimeOnly",
        }
    }

    /// The Maven `<scope>` value
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Compile => "compile",
            Scope::Provided => "provided",
            Scope::Test => "test",
            Scope::Runtime => "runtime",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How strongly the catalog wants a requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementStatus {
    Required,
    Optional,
    Recommended,
    Deprecated,
}

impl fmt::Display for RequirementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RequirementStatus::Required => "required",
            RequirementStatus::Optional => "optional",
            RequirementStatus::Recommended => "recommended",
            RequirementStatus::Deprecated => "deprecated",
        };
        write!(f, "{}", s)
    }
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRequirement {
    /// Library coordinate
    pub coordinate: DependencyCoordinate,
    /// Target version
    pub version: String,
    /// Scope the dependency should be declared with
    pub scope: Scope,
    /// Requirement status
    pub status: RequirementStatus,
    /// Human description
    pub description: String,
    /// Why the dependency is needed
    pub reason: String,
    /// Replacement for a deprecated entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migration_target: Option<Box<DependencyRequirement>>,
}

impl DependencyRequirement {
    /// Creates a new requirement with compile scope and an empty reason
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
        status: RequirementStatus,
        description: impl Into<String>,
    ) -> Self {
        Self {
            coordinate: DependencyCoordinate::new(group, artifact),
            version: version.into(),
            scope: Scope::Compile,
            status,
            description: description.into(),
            reason: String::new(),
            migration_target: None,
        }
    }

    /// Sets the scope (builder pattern)
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Sets the reason (builder pattern)
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Sets the migration target (builder pattern)
    pub fn with_migration_target(mut self, target: DependencyRequirement) -> Self {
        self.migration_target = Some(Box::new(target));
        self
    }

    /// Returns true if this requirement is tagged deprecated
    pub fn is_deprecated(&self) -> bool {
        self.status == RequirementStatus::Deprecated
    }

    /// `group:artifact:version`
    pub fn gav(&self) -> String {
        format!("{}:{}", self.coordinate, self.version)
    }
}

impl fmt::Display for DependencyRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.gav(), self.status)
    }
}
