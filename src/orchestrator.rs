//! Reconciliation orchestrator
//!
//! This module provides:
//! - Workflow coordination: locate → parse → build requirements → compare → filter → write
//! - Health reports for the pre-generation gate (read-only)
//! - Migration guides for deprecated coordinates
//! - Concurrent reconciliation of independent projects
//! - Error collection: no operation fails past this boundary

use crate::analysis::{
    compare, compatibility_warnings, recommendations, snippet_set, DeprecatedReporting,
    StackFilter,
};
use crate::catalog::{build_requirements, find_deprecated, migration_pairs, RequirementSet};
use crate::domain::{
    ComparisonStatus, DependencyComparison, FrameworkVersion, HealthReport, ManifestChange,
    ManifestStatus, MigrationGuide, MigrationItem, MigrationPriority, ParseWarning, Profile,
    ReconcileError, ReconciliationResult, StatusCounts, TechnologyStack,
};
use crate::error::ManifestError;
use crate::manifest::{
    diagnose, get_parser, locate_manifest, read_manifest, ManifestInfo, ManifestWriter,
    ParsedManifest, SnippetStyle,
};
use crate::progress::Progress;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Options for one reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Compute changes without touching the filesystem
    pub dry_run: bool,
    /// Copy the manifest aside before writing
    pub create_backup: bool,
    /// Framework version to use instead of the detected one
    pub framework_override: Option<String>,
    /// Reporting of deprecated requirements with no declaration
    pub deprecated_reporting: DeprecatedReporting,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            create_backup: true,
            framework_override: None,
            deprecated_reporting: DeprecatedReporting::default(),
        }
    }
}

impl ReconcileOptions {
    /// Set dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Set whether a backup is taken before writing
    pub fn with_backup(mut self, create_backup: bool) -> Self {
        self.create_backup = create_backup;
        self
    }

    /// Override the detected framework version
    pub fn with_framework_version(mut self, version: impl Into<String>) -> Self {
        self.framework_override = Some(version.into());
        self
    }

    /// Set deprecated reporting
    pub fn with_deprecated_reporting(mut self, reporting: DeprecatedReporting) -> Self {
        self.deprecated_reporting = reporting;
        self
    }
}

/// Read-only analysis of one manifest's content
struct Analysis {
    parsed: ParsedManifest,
    framework: Option<FrameworkVersion>,
    requirements: RequirementSet,
    stack: TechnologyStack,
    comparisons: Vec<DependencyComparison>,
    notes: Vec<String>,
}

fn analyze(
    info: &ManifestInfo,
    content: &str,
    profile: &Profile,
    framework_override: Option<&str>,
    reporting: DeprecatedReporting,
) -> Analysis {
    let parsed = get_parser(info).parse(content);
    let mut notes = Vec::new();

    let raw_framework = framework_override.or(parsed.framework_version.as_deref());
    let framework = raw_framework.and_then(|raw| {
        let version = FrameworkVersion::parse(raw);
        if version.is_none() {
            notes.push(format!(
                "Spring Boot version '{}' could not be interpreted; using current catalog versions",
                raw
            ));
        }
        version
    });

    let requirements = build_requirements(profile, framework.as_ref());
    let stack = TechnologyStack::detect(&parsed.dependencies);
    let style = SnippetStyle::for_build_tool(info.build_tool, info.kotlin_dsl);
    let comparisons = compare(&requirements, &parsed.dependencies, style, reporting);

    tracing::debug!(
        manifest = %info.path.display(),
        declared = parsed.dependencies.len(),
        requirements = requirements.len(),
        framework = ?framework.as_ref().map(|f| f.raw.as_str()),
        "analyzed"
    );

    Analysis {
        parsed,
        framework,
        requirements,
        stack,
        comparisons,
        notes,
    }
}

impl Analysis {
    /// Copies the analysis into a result and derives recommendations and score
    fn fill(self, info: &ManifestInfo, result: &mut ReconciliationResult) {
        let style = SnippetStyle::for_build_tool(info.build_tool, info.kotlin_dsl);

        result.java_floor = self.framework.as_ref().map(|f| f.java_floor());
        result.recommendations = recommendations(&self.comparisons, self.framework.as_ref());
        result.snippets = snippet_set(&self.comparisons, style);
        result.compatibility_warnings =
            compatibility_warnings(&self.parsed.dependencies, self.framework.as_ref());
        result.compatibility_warnings.extend(self.notes);
        result.warnings = self.parsed.warnings;
        result.health_score = StatusCounts::from_comparisons(&self.comparisons).score();
        result.stack = self.stack;
        result.comparisons = self.comparisons;
        result.framework_version = self.framework;
    }
}

fn reconcile_error(err: ManifestError) -> ReconcileError {
    match err {
        ManifestError::BuildToolNotDetected { path } => ReconcileError::BuildToolNotDetected { path },
        ManifestError::NotFound { ref path } | ManifestError::ReadError { ref path, .. } => {
            ReconcileError::ManifestMissing {
                path: path.clone(),
                message: err.to_string(),
            }
        }
        ManifestError::Corrupt {
            path,
            heuristic,
            message,
        } => ReconcileError::ManifestCorrupt {
            path,
            heuristic,
            message,
        },
        ManifestError::WriteError { ref path, .. } | ManifestError::BackupError { ref path, .. } => {
            ReconcileError::WriteFailed {
                path: path.clone(),
                message: err.to_string(),
            }
        }
    }
}

/// Locates and reads the manifest, recording failures on `errors`
fn load(root: &Path, errors: &mut Vec<ReconcileError>) -> Option<(ManifestInfo, String)> {
    let Some(info) = locate_manifest(root) else {
        tracing::warn!(root = %root.display(), "no build manifest found");
        errors.push(reconcile_error(ManifestError::not_detected(root)));
        return None;
    };

    match read_manifest(&info.path) {
        Ok(content) => Some((info, content)),
        Err(e) => {
            errors.push(reconcile_error(e));
            None
        }
    }
}

/// Detects, compares, auto-adds and auto-fixes one project.
///
/// Never fails: problems are collected on the result's `errors`.
pub fn reconcile(root: &Path, profile: &Profile, options: &ReconcileOptions) -> ReconciliationResult {
    let mut result = ReconciliationResult::empty(root, profile.clone(), options.dry_run);

    let Some((info, content)) = load(root, &mut result.errors) else {
        return result;
    };
    result.build_tool = Some(info.build_tool);
    result.manifest_path = Some(info.path.clone());

    let analysis = analyze(
        &info,
        &content,
        profile,
        options.framework_override.as_deref(),
        options.deprecated_reporting,
    );

    // Missing, non-deprecated requirements are insertion candidates
    let candidates: Vec<_> = analysis
        .comparisons
        .iter()
        .filter(|c| c.status == ComparisonStatus::Missing && !c.requirement.is_deprecated())
        .map(|c| c.requirement.clone())
        .collect();
    let declared = analysis
        .parsed
        .dependencies
        .iter()
        .map(|d| d.coordinate.clone());
    let filter = StackFilter::new(analysis.stack)
        .with_category(profile.category)
        .with_declared(declared)
        .with_framework(analysis.framework.clone());
    let (additions, filtered_out) = filter.apply(candidates);
    result.filtered_out = filtered_out;

    // jakarta.* targets need Spring Boot 3
    let migrations = match analysis.framework.as_ref() {
        Some(framework) if framework.major() == 2 => {
            tracing::info!(framework = %framework, "skipping deprecated auto-fix on Spring Boot 2");
            Vec::new()
        }
        _ => migration_pairs()
            .into_iter()
            .filter(|(from, _)| analysis.requirements.contains(from))
            .collect(),
    };

    let writer = ManifestWriter::new(options.dry_run).with_backup(options.create_backup);
    let mut final_analysis = analysis;

    match writer.apply(&info, &additions, &migrations) {
        Ok(write) => {
            result.dependencies_added = write.added.len();
            result.dependencies_skipped = write.skipped.len();
            result.deprecated_fixed = write.migrated.len();
            result.backup_path = write.backup_path.clone();
            result.file_modified = write.file_modified;
            for repair in &write.repairs {
                result
                    .warnings
                    .push(ParseWarning::new(Some(repair.line()), format!("repaired: {}", repair)));
            }

            if write.file_modified {
                final_analysis = analyze(
                    &info,
                    &write.updated,
                    profile,
                    options.framework_override.as_deref(),
                    options.deprecated_reporting,
                );
            }
            if write.has_changes() {
                result.change = Some(ManifestChange {
                    path: write.path,
                    original: write.original,
                    updated: write.updated,
                });
            }
        }
        Err(e) => {
            tracing::warn!(manifest = %info.path.display(), error = %e, "mutation aborted");
            result.errors.push(reconcile_error(e));
        }
    }

    let repair_warnings = std::mem::take(&mut result.warnings);
    final_analysis.fill(&info, &mut result);
    result.warnings.extend(repair_warnings);

    tracing::info!("{}", result.summary());
    result
}

/// Detection and comparison only, for the pre-generation gate
pub fn health_report(root: &Path, profile: &Profile) -> HealthReport {
    let mut errors = Vec::new();
    let mut report = HealthReport {
        project_root: root.to_path_buf(),
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

    let Some((info, content)) = load(root, &mut errors) else {
        report.issues = errors.iter().map(|e| e.to_string()).collect();
        return report;
    };
    report.build_tool = Some(info.build_tool);
    report.manifest_path = Some(info.path.clone());
    report.manifest_status = match info.build_tool {
        crate::domain::BuildTool::Maven => diagnose(&content),
        crate::domain::BuildTool::Gradle => ManifestStatus::Healthy,
    };

    let analysis = analyze(&info, &content, profile, None, DeprecatedReporting::PresentOnly);
    let counts = StatusCounts::from_comparisons(&analysis.comparisons);

    match &report.manifest_status {
        ManifestStatus::Corrupt { heuristic, message } => report
            .issues
            .push(format!("Manifest is corrupt ({}): {}", heuristic, message)),
        ManifestStatus::Repairable { heuristics } => report.issues.push(format!(
            "Manifest has repairable defects: {}",
            heuristics.join(", ")
        )),
        ManifestStatus::Healthy | ManifestStatus::Missing => {}
    }
    let by_severity = [
        (ComparisonStatus::Missing, true, "Missing required dependency"),
        (ComparisonStatus::Deprecated, false, "Deprecated dependency"),
        (ComparisonStatus::Outdated, false, "Outdated dependency"),
        (ComparisonStatus::Missing, false, "Missing dependency"),
    ];
    for (status, required_only, label) in by_severity {
        for c in analysis.comparisons.iter().filter(|c| c.status == status) {
            let is_required = c.requirement.status == crate::domain::RequirementStatus::Required;
            if status == ComparisonStatus::Missing && is_required != required_only {
                continue;
            }
            report
                .issues
                .push(format!("{} {}: {}", label, c.requirement.coordinate, c.recommendation));
        }
    }

    report.total = analysis.comparisons.len();
    report.found = analysis
        .comparisons
        .iter()
        .filter(|c| c.existing.is_some())
        .count();
    report.missing = counts.missing;
    report.missing_required = counts.missing_required;
    report.outdated = counts.outdated;
    report.deprecated = counts.deprecated;
    report.score = counts.score();
    report.framework_version = analysis.framework;
    report.warnings = analysis.parsed.warnings;
    report
}

/// Deprecated coordinates present in the manifest, with their replacements
pub fn migration_guide(root: &Path) -> MigrationGuide {
    let mut guide = MigrationGuide {
        project_root: root.to_path_buf(),
        build_tool: None,
        manifest_path: None,
        items: Vec::new(),
        errors: Vec::new(),
    };

    let Some((info, content)) = load(root, &mut guide.errors) else {
        return guide;
    };
    guide.build_tool = Some(info.build_tool);
    guide.manifest_path = Some(info.path.clone());

    let parsed = get_parser(&info).parse(&content);
    let style = SnippetStyle::for_build_tool(info.build_tool, info.kotlin_dsl);
    let mut seen = HashSet::new();

    for dep in &parsed.dependencies {
        if !seen.insert(dep.coordinate.clone()) {
            continue;
        }
        let Some(entry) = find_deprecated(&dep.coordinate) else {
            continue;
        };
        let Some(target) = entry.migration_target else {
            continue;
        };
        let priority = if dep.coordinate.group_starts_with("javax.") {
            MigrationPriority::High
        } else {
            MigrationPriority::Medium
        };
        guide.items.push(MigrationItem {
            coordinate: dep.coordinate.clone(),
            current_version: dep.version.clone(),
            snippet: style.render(&target),
            target: *target,
            reason: entry.reason,
            priority,
        });
    }

    guide.items.sort_by_key(|item| item.priority);
    guide
}

/// Reconciles independent projects concurrently; results follow input order
pub async fn reconcile_all(
    paths: &[PathBuf],
    profile: &Profile,
    options: &ReconcileOptions,
) -> Vec<ReconciliationResult> {
    let handles: Vec<_> = paths
        .iter()
        .map(|path| {
            let path = path.clone();
            let profile = profile.clone();
            let options = options.clone();
            tokio::task::spawn_blocking(move || reconcile(&path, &profile, &options))
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for (path, handle) in paths.iter().zip(handles) {
        match handle.await {
            Ok(result) => results.push(result),
            Err(e) => {
                tracing::error!(root = %path.display(), error = %e, "reconciliation task failed");
                let mut result = ReconciliationResult::empty(path, profile.clone(), options.dry_run);
                result.errors.push(ReconcileError::ManifestMissing {
                    path: path.clone(),
                    message: format!("reconciliation task failed: {}", e),
                });
                results.push(result);
            }
        }
    }
    results
}

/// Orchestrator for running one command over several projects
pub struct Orchestrator {
    /// Generation profile
    profile: Profile,
    /// Reconciliation options
    options: ReconcileOptions,
}

/// Result of running the orchestrator
pub enum OrchestratorResult {
    /// `fix`
    Reconciled(Vec<ReconciliationResult>),
    /// `check`
    Health(Vec<HealthReport>),
    /// `migrate`
    Migration(Vec<MigrationGuide>),
}

impl OrchestratorResult {
    /// Returns true if any project produced an error or cannot be generated against
    pub fn has_errors(&self) -> bool {
        match self {
            OrchestratorResult::Reconciled(results) => results.iter().any(|r| r.has_errors()),
            OrchestratorResult::Health(reports) => reports.iter().any(|r| r.blocks_generation()),
            OrchestratorResult::Migration(guides) => guides.iter().any(|g| !g.errors.is_empty()),
        }
    }
}

impl Orchestrator {
    /// Create a new orchestrator
    pub fn new(profile: Profile, options: ReconcileOptions) -> Self {
        Self { profile, options }
    }

    /// The profile requirements are built for
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Reconcile every project
    pub async fn fix(&self, paths: &[PathBuf], show_progress: bool) -> OrchestratorResult {
        let mut progress = Progress::new(show_progress);
        let verb = if self.options.dry_run { "Planning" } else { "Reconciling" };
        progress.spinner(&format!("{} {} project(s)...", verb, paths.len()));
        let results = reconcile_all(paths, &self.profile, &self.options).await;
        progress.finish_and_clear();
        OrchestratorResult::Reconciled(results)
    }

    /// Health report for every project
    pub fn check(&self, paths: &[PathBuf], show_progress: bool) -> OrchestratorResult {
        let mut progress = Progress::new(show_progress);
        progress.start(paths.len() as u64, "Checking manifests");
        let reports = paths
            .iter()
            .map(|path| {
                progress.set_message(&format!("Checking {}", path.display()));
                let report = health_report(path, &self.profile);
                progress.inc();
                report
            })
            .collect();
        progress.finish_and_clear();
        OrchestratorResult::Health(reports)
    }

    /// Migration guide for every project
    pub fn migrate(&self, paths: &[PathBuf], show_progress: bool) -> OrchestratorResult {
        let mut progress = Progress::new(show_progress);
        progress.start(paths.len() as u64, "Scanning for deprecated dependencies");
        let guides = paths
            .iter()
            .map(|path| {
                let guide = migration_guide(path);
                progress.inc();
                guide
            })
            .collect();
        progress.finish_and_clear();
        OrchestratorResult::Migration(guides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BuildTool, DatabaseKind, FeatureFlags, FilterReason, TemplateCategory};
    use std::fs;
    use tempfile::TempDir;

    const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project>
    <parent>
        <groupId>org.springframework.boot</groupId>
        <artifactId>spring-boot-starter-parent</artifactId>
        <version>3.2.4</version>
    </parent>
    <dependencies>
        <dependency>
            <groupId>com.google.guava</groupId>
            <artifactId>guava</artifactId>
            <version>33.0.0-jre</version>
        </dependency>
    </dependencies>
</project>
"#;

    fn project(manifest: &str, content: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(manifest), content).unwrap();
        dir
    }

    fn no_backup() -> ReconcileOptions {
        ReconcileOptions::default().with_backup(false)
    }

    #[test]
    fn test_reconcile_options_default() {
        let options = ReconcileOptions::default();
        assert!(!options.dry_run);
        assert!(options.create_backup);
        assert!(options.framework_override.is_none());
        assert_eq!(options.deprecated_reporting, DeprecatedReporting::PresentOnly);
    }

    #[test]
    fn test_reconcile_without_manifest() {
        let dir = TempDir::new().unwrap();
        let result = reconcile(dir.path(), &Profile::default(), &ReconcileOptions::default());
        assert!(result.build_tool.is_none());
        assert!(result.comparisons.is_empty());
        assert!(matches!(
            result.errors[0],
            ReconcileError::BuildToolNotDetected { .. }
        ));
    }

    #[test]
    fn test_reconcile_dry_run_counts_without_writing() {
        let dir = project("pom.xml", POM);
        let options = ReconcileOptions::default().with_dry_run(true);
        let result = reconcile(dir.path(), &Profile::default(), &options);

        assert_eq!(result.build_tool, Some(BuildTool::Maven));
        assert!(result.dependencies_added > 0);
        assert!(!result.file_modified);
        assert!(result.change.is_some());
        assert_eq!(fs::read_to_string(dir.path().join("pom.xml")).unwrap(), POM);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let dir = project("pom.xml", POM);
        let first = reconcile(dir.path(), &Profile::default(), &no_backup());
        assert!(first.file_modified);
        assert!(first.dependencies_added > 0);

        let second = reconcile(dir.path(), &Profile::default(), &no_backup());
        assert_eq!(second.dependencies_added, 0);
        assert!(!second.file_modified);
        assert_eq!(first.health_score, second.health_score);
    }

    #[test]
    fn test_reconcile_uses_framework_pins() {
        let dir = project("pom.xml", POM);
        let options = no_backup().with_dry_run(true);
        let result = reconcile(dir.path(), &Profile::default(), &options);

        assert_eq!(result.framework_version.as_ref().unwrap().raw, "3.2.4");
        assert_eq!(result.java_floor, Some(17));
        let plus = result
            .comparisons
            .iter()
            .find(|c| c.requirement.coordinate.group == "com.baomidou")
            .unwrap();
        assert_eq!(plus.requirement.version, "3.5.5");
    }

    #[test]
    fn test_reconcile_skips_deprecated_fix_on_boot_2() {
        let pom = POM.replace("3.2.4", "2.7.18").replace(
            "<groupId>com.google.guava</groupId>\n            <artifactId>guava</artifactId>",
            "<groupId>javax.validation</groupId>\n            <artifactId>validation-api</artifactId>",
        );
        let dir = project("pom.xml", &pom);
        let result = reconcile(dir.path(), &Profile::default(), &no_backup());

        assert_eq!(result.deprecated_fixed, 0);
        let written = fs::read_to_string(dir.path().join("pom.xml")).unwrap();
        assert!(written.contains("<groupId>javax.validation</groupId>"));
    }

    #[test]
    fn test_reconcile_holds_back_springdoc_on_boot_2() {
        let dir = project("pom.xml", &POM.replace("3.2.4", "2.7.18"));
        let result = reconcile(dir.path(), &Profile::default(), &no_backup());

        assert!(result.file_modified);
        let written = fs::read_to_string(dir.path().join("pom.xml")).unwrap();
        assert!(!written.contains("org.springdoc"));
        assert!(result.filtered_out.iter().any(|f| {
            f.coordinate.group == "org.springdoc"
                && f.reason == FilterReason::RequiresModernFramework
        }));
    }

    #[test]
    fn test_reconcile_fixes_deprecated_on_boot_3() {
        let pom = POM.replace(
            "<groupId>com.google.guava</groupId>\n            <artifactId>guava</artifactId>",
            "<groupId>javax.validation</groupId>\n            <artifactId>validation-api</artifactId>",
        );
        let dir = project("pom.xml", &pom);
        let result = reconcile(dir.path(), &Profile::default(), &no_backup());

        assert_eq!(result.deprecated_fixed, 1);
        assert!(result
            .comparisons
            .iter()
            .all(|c| c.status != ComparisonStatus::Deprecated));
    }

    #[test]
    fn test_reconcile_reports_corrupt_but_keeps_analysis() {
        let pom = "<project>\n    <dependencies>\n        < groupId\n    </dependencies>\n</project>\n";
        let dir = project("pom.xml", pom);
        let result = reconcile(dir.path(), &Profile::default(), &no_backup());

        assert!(matches!(
            result.errors[0],
            ReconcileError::ManifestCorrupt { ref heuristic, .. } if heuristic == "incomplete-tag"
        ));
        assert!(!result.comparisons.is_empty());
        assert_eq!(fs::read_to_string(dir.path().join("pom.xml")).unwrap(), pom);
    }

    #[test]
    fn test_health_report_counts() {
        let dir = project("pom.xml", POM);
        let profile = Profile::new(TemplateCategory::Default, DatabaseKind::Mysql).with_flags(
            FeatureFlags {
                lombok: false,
                mapstruct: false,
                docs: false,
            },
        );
        let report = health_report(dir.path(), &profile);

        assert_eq!(report.manifest_status, ManifestStatus::Healthy);
        assert!(!report.blocks_generation());
        assert_eq!(report.found, 0);
        assert_eq!(report.total, report.missing);
        assert_eq!(report.missing_required, 6);
        assert!(report.issues[0].starts_with("Missing required dependency"));
        assert_eq!(report.score, StatusCounts { missing: report.missing, ..Default::default() }.score());
    }

    #[test]
    fn test_byte_order_mark_pom() {
        let pom = format!("\u{feff}{}", POM);
        let dir = project("pom.xml", &pom);
        let report = health_report(dir.path(), &Profile::default());
        assert_eq!(report.manifest_status, ManifestStatus::Healthy);
        assert!(!report.blocks_generation());

        let result = reconcile(dir.path(), &Profile::default(), &no_backup());
        assert!(result.errors.is_empty(), "{:?}", result.errors);
        assert!(result.file_modified);
        let written = fs::read_to_string(dir.path().join("pom.xml")).unwrap();
        assert!(written.starts_with('\u{feff}'));
        assert!(written.contains("DBJavaGenix auto-added dependency"));
    }

    #[test]
    fn test_health_report_missing_manifest_blocks() {
        let dir = TempDir::new().unwrap();
        let report = health_report(dir.path(), &Profile::default());
        assert_eq!(report.manifest_status, ManifestStatus::Missing);
        assert!(report.blocks_generation());
        assert_eq!(report.issues.len(), 1);
    }

    #[test]
    fn test_migration_guide() {
        let gradle = "dependencies {\n    implementation 'io.swagger:swagger-annotations:1.6.2'\n    implementation 'javax.annotation:javax.annotation-api:1.3.2'\n}\n";
        let dir = project("build.gradle", gradle);
        let guide = migration_guide(dir.path());

        assert_eq!(guide.items.len(), 2);
        assert_eq!(guide.items[0].priority, MigrationPriority::High);
        assert_eq!(
            guide.items[0].target.coordinate.to_string(),
            "jakarta.annotation:jakarta.annotation-api"
        );
        assert!(guide.items[0].snippet.contains("implementation 'jakarta.annotation:"));
        assert_eq!(guide.items[1].priority, MigrationPriority::Medium);
    }

    #[tokio::test]
    async fn test_reconcile_all_keeps_order() {
        let maven = project("pom.xml", POM);
        let empty = TempDir::new().unwrap();
        let paths = vec![empty.path().to_path_buf(), maven.path().to_path_buf()];

        let options = ReconcileOptions::default().with_dry_run(true);
        let results = reconcile_all(&paths, &Profile::default(), &options).await;
        assert_eq!(results.len(), 2);
        assert!(results[0].build_tool.is_none());
        assert_eq!(results[1].build_tool, Some(BuildTool::Maven));
    }
}
