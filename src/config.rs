//! `depmend.toml` profile file
//!
//! Read from the project root (or an explicit `--config` path):
//!
//! ```toml
//! [profile]
//! template = "MybatisPlus-Mixed"
//! database = "postgresql"
//! lombok = true
//! mapstruct = false
//! docs = true
//! framework_version = "3.2.4"
//!
//! [write]
//! backup = true
//! report_absent_deprecated = false
//! ```
//!
//! Every key is optional and unknown keys are ignored. Values set here are
//! overridden by command-line flags.

use crate::analysis::DeprecatedReporting;
use crate::domain::{DatabaseKind, Profile, TemplateCategory};
use crate::error::ConfigError;
use crate::orchestrator::ReconcileOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the project root
pub const CONFIG_FILE_NAME: &str = "depmend.toml";

/// `[profile]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProfileSection {
    pub template: Option<String>,
    pub database: Option<String>,
    pub lombok: Option<bool>,
    pub mapstruct: Option<bool>,
    pub docs: Option<bool>,
    pub framework_version: Option<String>,
}

/// `[write]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WriteSection {
    pub backup: Option<bool>,
    pub report_absent_deprecated: Option<bool>,
}

/// Parsed configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub profile: ProfileSection,
    pub write: WriteSection,
}

impl ConfigFile {
    /// Parses TOML text; `path` is only used for error reporting
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::toml_parse_error(path, e.to_string()))
    }

    /// Reads and parses a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = Self::parse(&content, path)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Loads `depmend.toml` from a project root, if present
    pub fn discover(dir: &Path) -> Result<Option<Self>, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(None);
        }
        Self::load(&path).map(Some)
    }

    /// Applies file values on top of a profile
    pub fn apply_profile(&self, profile: &mut Profile) {
        let section = &self.profile;
        if let Some(ref template) = section.template {
            profile.category = TemplateCategory::parse(template);
        }
        if let Some(ref database) = section.database {
            profile.database = DatabaseKind::parse(database);
        }
        if let Some(lombok) = section.lombok {
            profile.flags.lombok = lombok;
        }
        if let Some(mapstruct) = section.mapstruct {
            profile.flags.mapstruct = mapstruct;
        }
        if let Some(docs) = section.docs {
            profile.flags.docs = docs;
        }
    }

    /// Applies file values on top of reconciliation options
    pub fn apply_options(&self, options: &mut ReconcileOptions) {
        if let Some(ref version) = self.profile.framework_version {
            options.framework_override = Some(version.clone());
        }
        if let Some(backup) = self.write.backup {
            options.create_backup = backup;
        }
        if let Some(always) = self.write.report_absent_deprecated {
            options.deprecated_reporting = if always {
                DeprecatedReporting::Always
            } else {
                DeprecatedReporting::PresentOnly
            };
        }
    }
}

/// Resolves the configuration file for a run: an explicit path must exist,
/// otherwise `depmend.toml` is looked up in the first project root
pub fn resolve(explicit: Option<&Path>, first_root: &Path) -> Result<Option<ConfigFile>, ConfigError> {
    match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(ConfigError::InvalidPath {
                    path: PathBuf::from(path),
                    message: "config file does not exist".to_string(),
                });
            }
            ConfigFile::load(path).map(Some)
        }
        None => ConfigFile::discover(first_root),
    }
}
