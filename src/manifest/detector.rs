//! Build manifest detection for Java projects
//!
//! Features:
//! - Detects pom.xml, build.gradle and build.gradle.kts
//! - Maven takes precedence over Gradle when both are present
//! - Marks Kotlin DSL scripts so edits use Kotlin call syntax

use crate::domain::{is_kotlin_script, BuildTool};
use std::path::{Path, PathBuf};

/// Information about a detected manifest file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestInfo {
    /// Path to the manifest file
    pub path: PathBuf,
    /// Build tool owning the manifest
    pub build_tool: BuildTool,
    /// Whether this is a Kotlin DSL build script
    pub kotlin_dsl: bool,
}

impl ManifestInfo {
    /// Create a new ManifestInfo; Kotlin DSL is inferred from the extension
    pub fn new(path: impl Into<PathBuf>, build_tool: BuildTool) -> Self {
        let path = path.into();
        let kotlin_dsl = build_tool == BuildTool::Gradle && is_kotlin_script(&path);
        Self {
            path,
            build_tool,
            kotlin_dsl,
        }
    }
}

/// Detect every manifest file in the given directory, in lookup order
///
/// Lookup order is pom.xml, build.gradle, build.gradle.kts.
pub fn detect_manifests(dir: &Path) -> Vec<ManifestInfo> {
    let mut manifests = Vec::new();

    for build_tool in BuildTool::all() {
        for name in build_tool.manifest_filenames() {
            let manifest_path = dir.join(name);
            if manifest_path.is_file() {
                manifests.push(ManifestInfo::new(&manifest_path, *build_tool));
            }
        }
    }

    manifests
}

/// Locate the manifest that governs the project, if any
pub fn locate_manifest(dir: &Path) -> Option<ManifestInfo> {
    let found = detect_manifests(dir);
    if found.len() > 1 {
        tracing::debug!(
            dir = %dir.display(),
            chosen = %found[0].path.display(),
            "multiple manifests found"
        );
    }
    found.into_iter().next()
}
