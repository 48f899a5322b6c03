//! Safe manifest mutation
//!
//! This module provides:
//! - ManifestWriter for inserting missing dependencies and migrating deprecated ones
//! - Duplicate suppression against the declared state (repeat runs add nothing)
//! - Bounded repair of malformed pom.xml files before insertion
//! - Well-formedness validation of the final buffer
//! - Timestamped backups and atomic temp-file-then-rename writes
//! - Dry-run mode (new content computed, filesystem untouched)

use super::repair::{repair, Malformation};
use super::xml_check::check_well_formed;
use super::{get_parser, ManifestInfo};
use crate::domain::{BuildTool, DependencyCoordinate, DependencyRequirement};
use crate::error::ManifestError;
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writer that applies approved requirements to a manifest file
pub struct ManifestWriter {
    /// Whether to run in dry-run mode (no file modifications)
    dry_run: bool,
    /// Whether to copy the original aside before writing
    create_backup: bool,
}

/// Result of applying changes to a manifest file
#[derive(Debug, Clone)]
pub struct WriteResult {
    /// Path to the manifest file
    pub path: PathBuf,
    /// Coordinates inserted (or, in dry-run, that would be inserted)
    pub added: Vec<DependencyCoordinate>,
    /// Approved coordinates that were already declared
    pub skipped: Vec<DependencyCoordinate>,
    /// Deprecated coordinates rewritten, with their replacement
    pub migrated: Vec<(DependencyCoordinate, DependencyCoordinate)>,
    /// Malformations fixed by the repair pass
    pub repairs: Vec<Malformation>,
    /// Backup copy of the original, when one was taken
    pub backup_path: Option<PathBuf>,
    /// Whether the file was actually written
    pub file_modified: bool,
    /// Content before the change
    pub original: String,
    /// Content after the change
    pub updated: String,
}

impl WriteResult {
    fn new(path: impl Into<PathBuf>, original: String) -> Self {
        Self {
            path: path.into(),
            added: Vec::new(),
            skipped: Vec::new(),
            migrated: Vec::new(),
            repairs: Vec::new(),
            backup_path: None,
            file_modified: false,
            updated: original.clone(),
            original,
        }
    }

    /// Returns true if the new content differs from the original
    pub fn has_changes(&self) -> bool {
        self.original != self.updated
    }
}

impl ManifestWriter {
    /// Create a new ManifestWriter; backups are on by default
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            create_backup: true,
        }
    }

    /// Create a ManifestWriter in dry-run mode
    pub fn dry_run() -> Self {
        Self::new(true)
    }

    /// Enable or disable the pre-write backup
    pub fn with_backup(mut self, create_backup: bool) -> Self {
        self.create_backup = create_backup;
        self
    }

    /// Check if this writer is in dry-run mode
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Insert `additions` and rewrite deprecated coordinates to their targets.
    ///
    /// Additions already declared are skipped. A migration is skipped when its
    /// target is already declared. Nothing is written unless the content changes.
    pub fn apply(
        &self,
        info: &ManifestInfo,
        additions: &[DependencyRequirement],
        migrations: &[(DependencyCoordinate, DependencyRequirement)],
    ) -> Result<WriteResult, ManifestError> {
        let path = &info.path;
        let content = read_manifest(path)?;
        let parser = get_parser(info);
        let parsed = parser.parse(&content);
        let mut result = WriteResult::new(path, content.clone());

        let declared: HashSet<&DependencyCoordinate> =
            parsed.dependencies.iter().map(|d| &d.coordinate).collect();

        let mut seen = HashSet::new();
        let mut to_insert = Vec::new();
        for requirement in additions {
            if declared.contains(&requirement.coordinate) {
                result.skipped.push(requirement.coordinate.clone());
            } else if seen.insert(requirement.coordinate.clone()) {
                to_insert.push(requirement.clone());
            }
        }

        let pending_migrations: Vec<_> = migrations
            .iter()
            .filter(|(from, target)| {
                if !declared.contains(from) {
                    return false;
                }
                if declared.contains(&target.coordinate) {
                    tracing::debug!(from = %from, to = %target.coordinate, "migration target already declared");
                    return false;
                }
                true
            })
            .collect();

        // a migrated coordinate becomes its target; never add the target twice
        to_insert.retain(|r| {
            !pending_migrations
                .iter()
                .any(|(_, target)| target.coordinate == r.coordinate)
        });

        if to_insert.is_empty() && pending_migrations.is_empty() {
            return Ok(result);
        }

        let mut text = content.clone();

        if info.build_tool == BuildTool::Maven {
            let outcome = repair(&text);
            for fixed in &outcome.repaired {
                tracing::warn!(path = %path.display(), heuristic = fixed.heuristic(), "{}", fixed);
            }
            result.repairs = outcome.repaired;
            text = outcome.content;

            if let Some(defect) = outcome.remaining.first() {
                return Err(ManifestError::corrupt(
                    path,
                    defect.heuristic(),
                    defect.to_string(),
                ));
            }
        }

        for (from, target) in pending_migrations {
            let (replaced, count) = parser.replace_coordinate(&text, from, &target.coordinate);
            if count > 0 {
                text = replaced;
                result.migrated.push((from.clone(), target.coordinate.clone()));
            }
        }

        text = parser.insert_dependencies(path, &text, &to_insert)?;
        result.added = to_insert.into_iter().map(|r| r.coordinate).collect();

        if info.build_tool == BuildTool::Maven {
            check_well_formed(&text).map_err(|issue| {
                ManifestError::corrupt(path, "not-well-formed", issue.to_string())
            })?;
        }

        result.updated = text;

        if self.dry_run || !result.has_changes() {
            return Ok(result);
        }

        if self.create_backup {
            let backup = create_backup(path)?;
            tracing::info!(path = %path.display(), backup = %backup.display(), "backup created");
            result.backup_path = Some(backup);
        }

        write_atomic(path, &result.updated)?;
        result.file_modified = true;
        tracing::info!(
            path = %path.display(),
            added = result.added.len(),
            migrated = result.migrated.len(),
            "manifest written"
        );

        Ok(result)
    }
}

/// Read a manifest file content safely
pub fn read_manifest(path: &Path) -> Result<String, ManifestError> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ManifestError::not_found(path)
        } else {
            ManifestError::read_error(path, e)
        }
    })
}

/// Backup path for a manifest: `<name>_backup_<stamp><ext>` next to it.
///
/// The extension is everything after the first dot, so `build.gradle.kts`
/// becomes `build_backup_<stamp>.gradle.kts`.
pub fn backup_path_for(path: &Path, stamp: &str) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (name, ext) = match file_name.find('.') {
        Some(idx) if idx > 0 => file_name.split_at(idx),
        _ => (file_name.as_str(), ""),
    };
    path.with_file_name(format!("{}_backup_{}{}", name, stamp, ext))
}

/// Copy the manifest aside, never overwriting an earlier backup
fn create_backup(path: &Path) -> Result<PathBuf, ManifestError> {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    let mut candidate = backup_path_for(path, &stamp);
    let mut n = 1;
    while candidate.exists() {
        candidate = backup_path_for(path, &format!("{}_{}", stamp, n));
        n += 1;
    }

    fs::copy(path, &candidate).map_err(|e| ManifestError::backup_error(path, &candidate, e))?;
    Ok(candidate)
}

/// Write through a temp file in the same directory, then rename over the original
fn write_atomic(path: &Path, content: &str) -> Result<(), ManifestError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp =
        tempfile::NamedTempFile::new_in(dir).map_err(|e| ManifestError::write_error(path, e))?;
    temp.write_all(content.as_bytes())
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| ManifestError::write_error(path, e))?;

    if let Ok(metadata) = fs::metadata(path) {
        // keep the original file mode
        let _ = fs::set_permissions(temp.path(), metadata.permissions());
    }

    temp.persist(path)
        .map_err(|e| ManifestError::write_error(path, e.error))?;
    Ok(())
}
