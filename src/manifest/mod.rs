//! Build manifest detection, parsing and mutation
//!
//! This module provides functionality to:
//! - Locate the Maven or Gradle manifest of a project
//! - Parse declared dependencies and the Spring Boot version
//! - Detect and repair common pom.xml malformations
//! - Insert and migrate dependencies with backup and atomic write

mod detector;
mod gradle;
mod maven;
mod repair;
mod snippet;
mod writer;
mod xml_check;

pub use detector::{detect_manifests, locate_manifest, ManifestInfo};
pub use gradle::{find_dependencies_block, GradleParser};
pub use maven::MavenParser;
pub use repair::{detect as detect_malformations, diagnose, repair, Malformation, RepairOutcome};
pub use snippet::{SnippetStyle, MARKER};
pub use writer::{backup_path_for, read_manifest, ManifestWriter, WriteResult};
pub use xml_check::{check_well_formed, XmlIssue};

use crate::domain::{
    BuildTool, DependencyCoordinate, DependencyRequirement, ExistingDependency, ParseWarning,
};
use crate::error::ManifestError;
use std::path::Path;

/// Declared state extracted from one manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedManifest {
    /// Dependencies in declaration order
    pub dependencies: Vec<ExistingDependency>,
    /// Spring Boot version as written, if declared
    pub framework_version: Option<String>,
    /// Declarations that were skipped
    pub warnings: Vec<ParseWarning>,
}

/// Trait for reading and editing one manifest dialect
pub trait ManifestParser {
    /// Parse declared dependencies; malformed entries become warnings
    fn parse(&self, content: &str) -> ParsedManifest;

    /// Returns the build tool this parser handles
    fn build_tool(&self) -> BuildTool;

    /// Insert declarations for the given requirements into the manifest content
    fn insert_dependencies(
        &self,
        path: &Path,
        content: &str,
        additions: &[DependencyRequirement],
    ) -> Result<String, ManifestError>;

    /// Rewrite every declaration of `from` to `to`, keeping version and scope.
    /// Returns the new content and the number of declarations changed.
    fn replace_coordinate(
        &self,
        content: &str,
        from: &DependencyCoordinate,
        to: &DependencyCoordinate,
    ) -> (String, usize);
}

/// Get a manifest parser for the detected manifest
pub fn get_parser(info: &ManifestInfo) -> Box<dyn ManifestParser + Send + Sync> {
    match (info.build_tool, info.kotlin_dsl) {
        (BuildTool::Maven, _) => Box::new(MavenParser),
        (BuildTool::Gradle, false) => Box::new(GradleParser::groovy()),
        (BuildTool::Gradle, true) => Box::new(GradleParser::kotlin()),
    }
}
