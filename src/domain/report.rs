//! Reconciliation, health and migration result types
//!
//! Provides:
//! - ReconciliationResult: everything one `reconcile` call produced
//! - HealthReport: read-only pre-flight gate for code generation
//! - MigrationGuide: deprecated coordinates and their replacements
//! - Recommendations / SnippetSet: bucketed guidance and ready-to-insert text

use super::{
    BuildTool, ComparisonStatus, DependencyComparison, DependencyCoordinate,
    DependencyRequirement, FrameworkVersion, Profile, RequirementStatus, TechnologyStack,
};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Computes `max(0, 100 - 10*missing - 5*outdated - 5*deprecated)`
pub fn health_score(missing: usize, outdated: usize, deprecated: usize) -> u8 {
    let penalty = missing
        .saturating_mul(10)
        .saturating_add(outdated.saturating_mul(5))
        .saturating_add(deprecated.saturating_mul(5));
    100usize.saturating_sub(penalty) as u8
}

/// Counts comparisons per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub missing: usize,
    pub exists: usize,
    pub outdated: usize,
    pub deprecated: usize,
    /// Missing entries whose requirement status is `required`
    pub missing_required: usize,
}

impl StatusCounts {
    /// Tallies a comparison list
    pub fn from_comparisons(comparisons: &[DependencyComparison]) -> Self {
        let mut counts = Self::default();
        for c in comparisons {
            match c.status {
                ComparisonStatus::Missing => {
                    counts.missing += 1;
                    if c.requirement.status == RequirementStatus::Required {
                        counts.missing_required += 1;
                    }
                }
                ComparisonStatus::Exists => counts.exists += 1,
                ComparisonStatus::Outdated => counts.outdated += 1,
                ComparisonStatus::Deprecated => counts.deprecated += 1,
            }
        }
        counts
    }

    /// Health score for these counts
    pub fn score(&self) -> u8 {
        health_score(self.missing, self.outdated, self.deprecated)
    }
}

/// Tiered human-readable guidance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Recommendations {
    /// Missing required dependencies
    pub critical: Vec<String>,
    /// Missing recommended dependencies and outdated versions
    pub important: Vec<String>,
    /// Missing optional dependencies
    pub optional: Vec<String>,
    /// Deprecated dependencies and framework upgrades
    pub migration: Vec<String>,
}

impl Recommendations {
    /// Returns true if no bucket has any entry
    pub fn is_empty(&self) -> bool {
        self.critical.is_empty()
            && self.important.is_empty()
            && self.optional.is_empty()
            && self.migration.is_empty()
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.critical.len() + self.important.len() + self.optional.len() + self.migration.len()
    }
}

/// One ready-to-insert declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snippet {
    /// Coordinate the snippet declares
    pub coordinate: DependencyCoordinate,
    /// Requirement description
    pub description: String,
    /// Declaration text in the manifest's syntax
    pub text: String,
}

/// Snippets grouped by the action they serve
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SnippetSet {
    pub missing_dependencies: Vec<Snippet>,
    pub upgrade_dependencies: Vec<Snippet>,
    pub migration_dependencies: Vec<Snippet>,
}

impl SnippetSet {
    /// Returns true if there is nothing to insert
    pub fn is_empty(&self) -> bool {
        self.missing_dependencies.is_empty()
            && self.upgrade_dependencies.is_empty()
            && self.migration_dependencies.is_empty()
    }
}

/// A malformed single entry skipped by the parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
    /// 1-based line number, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// What was wrong
    pub message: String,
}

impl ParseWarning {
    /// Creates a new warning
    pub fn new(line: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: {}", line, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Why the stack-consistency filter held a requirement back
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum FilterReason {
    /// ORM starter next to a mapper-based profile
    OrmWithMapperProfile,
    /// Mapper core implied by a mapper starter
    ImpliedByStarter(String),
    /// Modern docs library on a legacy docs project
    LegacyDocsInUse,
    /// Legacy docs library on a modern project
    ModernDocsInUse,
    /// Jakarta-only artifact on a pre-3 framework
    RequiresModernFramework,
    /// Annotation API provided transitively by a framework starter
    ProvidedTransitively(String),
}

impl fmt::Display for FilterReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterReason::OrmWithMapperProfile => {
                write!(f, "ORM starter conflicts with mapper-based templates")
            }
            FilterReason::ImpliedByStarter(starter) => write!(f, "already implied by {}", starter),
            FilterReason::LegacyDocsInUse => write!(f, "project uses the legacy Swagger stack"),
            FilterReason::ModernDocsInUse => write!(f, "project uses the modern springdoc stack"),
            FilterReason::RequiresModernFramework => {
                write!(f, "requires Spring Boot 3 (jakarta.*)")
            }
            FilterReason::ProvidedTransitively(starter) => {
                write!(f, "provided transitively by {}", starter)
            }
        }
    }
}

/// A requirement held back from insertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilteredRequirement {
    /// The requirement that was not applied
    pub coordinate: DependencyCoordinate,
    /// Why
    pub reason: FilterReason,
}

/// Errors collected during a reconciliation; never raised past the orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReconcileError {
    /// Neither manifest form found
    BuildToolNotDetected { path: PathBuf },
    /// The manifest disappeared or could not be read
    ManifestMissing { path: PathBuf, message: String },
    /// Repair could not make the document well-formed
    ManifestCorrupt {
        path: PathBuf,
        heuristic: String,
        message: String,
    },
    /// I/O failure on the write path
    WriteFailed { path: PathBuf, message: String },
}

impl ReconcileError {
    /// Returns true for failures of the mutation step
    pub fn is_write_path(&self) -> bool {
        matches!(
            self,
            ReconcileError::ManifestCorrupt { .. } | ReconcileError::WriteFailed { .. }
        )
    }
}

impl fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileError::BuildToolNotDetected { path } => {
                write!(f, "No Maven or Gradle manifest found in {}", path.display())
            }
            ReconcileError::ManifestMissing { path, message } => {
                write!(f, "Manifest {} unavailable: {}", path.display(), message)
            }
            ReconcileError::ManifestCorrupt {
                path,
                heuristic,
                message,
            } => write!(
                f,
                "Manifest {} is corrupt ({}): {}",
                path.display(),
                heuristic,
                message
            ),
            ReconcileError::WriteFailed { path, message } => {
                write!(f, "Failed to write {}: {}", path.display(), message)
            }
        }
    }
}

/// Before/after text of a manifest touched (or, in dry-run, planned) by the mutator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestChange {
    pub path: PathBuf,
    pub original: String,
    pub updated: String,
}

/// Everything one reconciliation produced
#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationResult {
    /// Project root that was analyzed
    pub project_root: PathBuf,
    /// Detected build tool
    pub build_tool: Option<BuildTool>,
    /// Manifest that was analyzed
    pub manifest_path: Option<PathBuf>,
    /// Profile the requirements were built for
    pub profile: Profile,
    /// Framework version used to parameterize the catalog
    pub framework_version: Option<FrameworkVersion>,
    /// Minimum Java level implied by the framework version
    pub java_floor: Option<u32>,
    /// Technology stack flags
    pub stack: TechnologyStack,
    /// One comparison per catalog requirement
    pub comparisons: Vec<DependencyComparison>,
    /// Bucketed guidance
    pub recommendations: Recommendations,
    /// Ready-to-insert declarations
    pub snippets: SnippetSet,
    /// Requirements the stack-consistency filter held back
    pub filtered_out: Vec<FilteredRequirement>,
    /// Dependencies added (or, in dry-run, that would be added)
    pub dependencies_added: usize,
    /// Approved dependencies skipped because they were already declared
    pub dependencies_skipped: usize,
    /// Deprecated coordinates rewritten to their migration targets
    pub deprecated_fixed: usize,
    /// Backup copy taken before writing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<PathBuf>,
    /// Whether the manifest was written
    pub file_modified: bool,
    /// Whether this was a dry run
    pub dry_run: bool,
    /// 0-100 heuristic
    pub health_score: u8,
    /// Informational version/compatibility observations
    pub compatibility_warnings: Vec<String>,
    /// Skipped malformed entries
    pub warnings: Vec<ParseWarning>,
    /// Collected errors
    pub errors: Vec<ReconcileError>,
    /// Text before/after the mutation, for diff rendering
    #[serde(skip)]
    pub change: Option<ManifestChange>,
}

impl ReconciliationResult {
    /// Creates an empty result for a project
    pub fn empty(project_root: impl Into<PathBuf>, profile: Profile, dry_run: bool) -> Self {
        Self {
            project_root: project_root.into(),
            build_tool: None,
            manifest_path: None,
            profile,
            framework_version: None,
            java_floor: None,
            stack: TechnologyStack::detect(&[]),
            comparisons: Vec::new(),
            recommendations: Recommendations::default(),
            snippets: SnippetSet::default(),
            filtered_out: Vec::new(),
            dependencies_added: 0,
            dependencies_skipped: 0,
            deprecated_fixed: 0,
            backup_path: None,
            file_modified: false,
            dry_run,
            health_score: 0,
            compatibility_warnings: Vec::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
            change: None,
        }
    }

    /// Status tallies of the comparisons
    pub fn counts(&self) -> StatusCounts {
        StatusCounts::from_comparisons(&self.comparisons)
    }

    /// Returns true if any error was collected
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Comparisons with a given status
    pub fn with_status(&self, status: ComparisonStatus) -> impl Iterator<Item = &DependencyComparison> {
        self.comparisons.iter().filter(move |c| c.status == status)
    }

    /// Textual summary of the run
    pub fn summary(&self) -> String {
        let Some(build_tool) = self.build_tool else {
            return match self.errors.first() {
                Some(err) => format!("{}: {}", self.project_root.display(), err),
                None => format!("{}: nothing to reconcile", self.project_root.display()),
            };
        };

        let counts = self.counts();
        let verb = if self.dry_run { "would add" } else { "added" };
        let fix_verb = if self.dry_run { "would fix" } else { "fixed" };
        let mut text = format!(
            "{} ({}): health {}/100, {} missing, {} outdated, {} deprecated; {} {}, {} {}",
            self.project_root.display(),
            build_tool,
            self.health_score,
            counts.missing,
            counts.outdated,
            counts.deprecated,
            verb,
            self.dependencies_added,
            fix_verb,
            self.deprecated_fixed,
        );
        if !self.errors.is_empty() {
            text.push_str(&format!("; {} error(s)", self.errors.len()));
        }
        text
    }
}

/// State of the manifest as seen by the pre-flight gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ManifestStatus {
    /// No malformation detected
    Healthy,
    /// Malformations found that the mutator repairs automatically
    Repairable { heuristics: Vec<String> },
    /// Malformations that cannot be repaired
    Corrupt { heuristic: String, message: String },
    /// No manifest found or readable
    Missing,
}

/// Read-only health summary for the code-generation gate
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub project_root: PathBuf,
    pub build_tool: Option<BuildTool>,
    pub manifest_path: Option<PathBuf>,
    pub framework_version: Option<FrameworkVersion>,
    pub manifest_status: ManifestStatus,
    /// Number of catalog requirements compared
    pub total: usize,
    /// Requirements already declared (current or outdated)
    pub found: usize,
    pub missing: usize,
    pub missing_required: usize,
    pub outdated: usize,
    pub deprecated: usize,
    /// 0-100 heuristic
    pub score: u8,
    /// Human-readable issues, most severe first
    pub issues: Vec<String>,
    pub warnings: Vec<ParseWarning>,
}

impl HealthReport {
    /// Returns true when code generation must not proceed
    pub fn blocks_generation(&self) -> bool {
        matches!(
            self.manifest_status,
            ManifestStatus::Missing | ManifestStatus::Corrupt { .. }
        )
    }
}

/// Migration urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationPriority {
    High,
    Medium,
}

impl fmt::Display for MigrationPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrationPriority::High => write!(f, "high"),
            MigrationPriority::Medium => write!(f, "medium"),
        }
    }
}

/// One deprecated coordinate found in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationItem {
    /// Deprecated coordinate present in the manifest
    pub coordinate: DependencyCoordinate,
    /// Version currently declared
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_version: Option<String>,
    /// Replacement
    pub target: DependencyRequirement,
    /// Why the migration is needed
    pub reason: String,
    pub priority: MigrationPriority,
    /// Declaration of the replacement
    pub snippet: String,
}

/// Deprecated coordinates and their replacements
#[derive(Debug, Clone, Serialize)]
pub struct MigrationGuide {
    pub project_root: PathBuf,
    pub build_tool: Option<BuildTool>,
    pub manifest_path: Option<PathBuf>,
    pub items: Vec<MigrationItem>,
    pub errors: Vec<ReconcileError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExistingDependency;

    fn comparison(status: ComparisonStatus, req_status: RequirementStatus) -> DependencyComparison {
        DependencyComparison {
            requirement: DependencyRequirement::new("g", "a", "1.0", req_status, "d"),
            existing: None::<ExistingDependency>,
            status,
            recommendation: String::new(),
            snippet: None,
        }
    }

    #[test]
    fn test_health_score_formula() {
        assert_eq!(health_score(2, 1, 0), 75);
        assert_eq!(health_score(0, 0, 0), 100);
        assert_eq!(health_score(0, 1, 1), 90);
    }

    #[test]
    fn test_health_score_floors_at_zero() {
        assert_eq!(health_score(11, 0, 0), 0);
        assert_eq!(health_score(usize::MAX, usize::MAX, 1), 0);
    }

    #[test]
    fn test_status_counts() {
        let comparisons = vec![
            comparison(ComparisonStatus::Missing, RequirementStatus::Required),
            comparison(ComparisonStatus::Missing, RequirementStatus::Optional),
            comparison(ComparisonStatus::Outdated, RequirementStatus::Required),
            comparison(ComparisonStatus::Exists, RequirementStatus::Required),
        ];
        let counts = StatusCounts::from_comparisons(&comparisons);
        assert_eq!(counts.missing, 2);
        assert_eq!(counts.missing_required, 1);
        assert_eq!(counts.outdated, 1);
        assert_eq!(counts.exists, 1);
        assert_eq!(counts.score(), 75);
    }

    #[test]
    fn test_blocks_generation() {
        let mut report = HealthReport {
            project_root: PathBuf::from("/p"),
            build_tool: None,
            manifest_path: None,
            framework_version: None,
            manifest_status: ManifestStatus::Missing,
            total: 0,
            found: 0,
            missing: 0,
            missing_required: 0,
            outdated: 0,
            deprecated: 0,
            score: 0,
            issues: Vec::new(),
            warnings: Vec::new(),
        };
        assert!(report.blocks_generation());

        report.manifest_status = ManifestStatus::Repairable {
            heuristics: vec!["dangling-close-tag".to_string()],
        };
        assert!(!report.blocks_generation());
    }

    #[test]
    fn test_summary_without_build_tool() {
        let mut result = ReconciliationResult::empty("/p", Profile::default(), false);
        result.errors.push(ReconcileError::BuildToolNotDetected {
            path: PathBuf::from("/p"),
        });
        assert!(result.summary().contains("No Maven or Gradle manifest"));
    }
}
