//! Build tool type definitions for supported Java manifest formats

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Supported build tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildTool {
    /// Maven (pom.xml)
    Maven,
    /// Gradle (build.gradle / build.gradle.kts)
    Gradle,
}

impl BuildTool {
    /// Returns the manifest filenames for this build tool, in lookup order
    pub fn manifest_filenames(&self) -> &'static [&'static str] {
        match self {
            BuildTool::Maven => &["pom.xml"],
            BuildTool::Gradle => &["build.gradle", "build.gradle.kts"],
        }
    }

    /// Returns the display name for this build tool
    pub fn display_name(&self) -> &'static str {
        match self {
            BuildTool::Maven => "Maven",
            BuildTool::Gradle => "Gradle",
        }
    }

    /// Returns all supported build tools in detection order
    pub fn all() -> &'static [BuildTool] {
        &[BuildTool::Maven, BuildTool::Gradle]
    }

    /// Infers the build tool from a manifest file name
    pub fn from_manifest_path(path: &Path) -> Option<BuildTool> {
        let name = path.file_name()?.to_str()?;
        BuildTool::all()
            .iter()
            .copied()
            .find(|tool| tool.manifest_filenames().contains(&name))
    }
}

impl fmt::Display for BuildTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Returns true if the path is a Kotlin DSL build script
pub fn is_kotlin_script(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "kts")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_filenames() {
        assert_eq!(BuildTool::Maven.manifest_filenames(), &["pom.xml"]);
        assert_eq!(
            BuildTool::Gradle.manifest_filenames(),
            &["build.gradle", "build.gradle.kts"]
        );
    }

    #[test]
    fn test_from_manifest_path() {
        assert_eq!(
            BuildTool::from_manifest_path(Path::new("/p/pom.xml")),
            Some(BuildTool::Maven)
        );
        assert_eq!(
            BuildTool::from_manifest_path(Path::new("build.gradle.kts")),
            Some(BuildTool::Gradle)
        );
        assert_eq!(BuildTool::from_manifest_path(Path::new("Cargo.toml")), None);
    }

    #[test]
    fn test_is_kotlin_script() {
        assert!(is_kotlin_script(Path::new("build.gradle.kts")));
        assert!(!is_kotlin_script(Path::new("build.gradle")));
    }

    #[test]
    fn test_display_and_serde() {
        assert_eq!(format!("{}", BuildTool::Gradle), "Gradle");
        assert_eq!(serde_json::to_string(&BuildTool::Maven).unwrap(), "\"maven\"");
    }
}
