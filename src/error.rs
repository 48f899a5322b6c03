//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: Issues with locating, reading, repairing or writing a build manifest
//! - ConfigError: Issues with CLI options or the `depmend.toml` profile file
//! - AppError: Failures of the binary's settings step

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Neither a Maven nor a Gradle manifest exists in the project root
    #[error("no pom.xml, build.gradle or build.gradle.kts found in {path}")]
    BuildToolNotDetected { path: PathBuf },

    /// Manifest file not found
    #[error("manifest file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write manifest file (the original file is left untouched)
    #[error("failed to write manifest file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create the pre-write backup copy
    #[error("failed to back up {path} to {backup}: {source}")]
    BackupError {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Structural defect that automatic repair could not fix
    #[error("manifest {path} is corrupt ({heuristic}): {message}")]
    Corrupt {
        path: PathBuf,
        heuristic: String,
        message: String,
    },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error in the profile file
    #[error("failed to parse TOML in {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },

    /// Invalid path
    #[error("invalid path '{path}': {message}")]
    InvalidPath { path: PathBuf, message: String },

    /// Conflicting options
    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },
}

impl ManifestError {
    /// Creates a new BuildToolNotDetected error
    pub fn not_detected(path: impl Into<PathBuf>) -> Self {
        ManifestError::BuildToolNotDetected { path: path.into() }
    }

    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new BackupError
    pub fn backup_error(
        path: impl Into<PathBuf>,
        backup: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        ManifestError::BackupError {
            path: path.into(),
            backup: backup.into(),
            source,
        }
    }

    /// Creates a new Corrupt error naming the heuristic that failed
    pub fn corrupt(
        path: impl Into<PathBuf>,
        heuristic: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ManifestError::Corrupt {
            path: path.into(),
            heuristic: heuristic.into(),
            message: message.into(),
        }
    }
}

impl ConfigError {
    /// Creates a new TomlParseError
    pub fn toml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::TomlParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}
