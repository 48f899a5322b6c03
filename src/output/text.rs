//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Reconciliation results with bucketed recommendations
//! - Health scores coloured by band (green ≥ 80, yellow ≥ 60, red below)
//! - Migration guides ordered by priority
//! - Verbose detail: per-requirement comparisons, snippets and parse warnings

use crate::domain::{
    ComparisonStatus, HealthReport, ManifestStatus, MigrationGuide, MigrationPriority,
    ReconcileError, ReconciliationResult, Snippet,
};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;
use std::path::Path;

/// Colour band of a health score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    /// Band for a 0-100 score
    pub fn of(score: u8) -> Self {
        match score {
            80.. => ScoreBand::Good,
            60..=79 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether this is a dry-run
    dry_run: bool,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity, dry_run: bool) -> Self {
        Self::with_color(verbosity, dry_run, true)
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, dry_run: bool, color: bool) -> Self {
        Self {
            verbosity,
            dry_run,
            color,
        }
    }

    /// Get the dry-run prefix if applicable
    fn dry_run_prefix(&self) -> String {
        if !self.dry_run {
            String::new()
        } else if self.color {
            format!("{} ", "(dry-run)".cyan())
        } else {
            "(dry-run) ".to_string()
        }
    }

    /// `health NN/100`, coloured by band
    fn score(&self, score: u8) -> String {
        let text = format!("health {}/100", score);
        if !self.color {
            return text;
        }
        match ScoreBand::of(score) {
            ScoreBand::Good => text.green().bold().to_string(),
            ScoreBand::Fair => text.yellow().bold().to_string(),
            ScoreBand::Poor => text.red().bold().to_string(),
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn header(&self, path: &Path, tool: Option<&str>, writer: &mut dyn Write) -> std::io::Result<()> {
        let path = self.bold(&path.display().to_string());
        match tool {
            Some(tool) => {
                let tool = self.dim(&format!("({})", tool));
                write!(writer, "{}{} {}", self.dry_run_prefix(), path, tool)
            }
            None => write!(writer, "{}{}", self.dry_run_prefix(), path),
        }
    }

    /// A titled list, omitted when empty
    fn section(&self, title: &str, lines: &[String], writer: &mut dyn Write) -> std::io::Result<()> {
        if lines.is_empty() {
            return Ok(());
        }
        writeln!(writer, "  {}:", self.bold(title))?;
        for line in lines {
            writeln!(writer, "    - {}", line)?;
        }
        Ok(())
    }

    fn errors(&self, errors: &[ReconcileError], writer: &mut dyn Write) -> std::io::Result<()> {
        if errors.is_empty() {
            return Ok(());
        }
        if self.color {
            writeln!(writer, "  {}:", "Errors".red().bold())?;
        } else {
            writeln!(writer, "  Errors:")?;
        }
        for error in errors {
            if self.color {
                writeln!(writer, "    {} {}", "✗".red(), error)?;
            } else {
                writeln!(writer, "    - {}", error)?;
            }
        }
        Ok(())
    }

    fn snippets(&self, title: &str, snippets: &[Snippet], writer: &mut dyn Write) -> std::io::Result<()> {
        if snippets.is_empty() {
            return Ok(());
        }
        writeln!(writer, "  {}:", self.bold(title))?;
        for snippet in snippets {
            for line in snippet.text.lines() {
                writeln!(writer, "    {}", line)?;
            }
        }
        Ok(())
    }

    fn comparison_status(&self, status: ComparisonStatus) -> String {
        let label = format!("{:<10}", status.to_string());
        if !self.color {
            return label;
        }
        match status {
            ComparisonStatus::Exists => label.green().to_string(),
            ComparisonStatus::Outdated => label.yellow().to_string(),
            ComparisonStatus::Missing => label.red().to_string(),
            ComparisonStatus::Deprecated => label.magenta().to_string(),
        }
    }
}

fn manifest_status_label(status: &ManifestStatus) -> String {
    match status {
        ManifestStatus::Healthy => "healthy".to_string(),
        ManifestStatus::Repairable { heuristics } => {
            format!("repairable ({})", heuristics.join(", "))
        }
        ManifestStatus::Corrupt { heuristic, message } => {
            format!("corrupt ({}): {}", heuristic, message)
        }
        ManifestStatus::Missing => "missing".to_string(),
    }
}

fn count(n: usize, one: &str, many: &str) -> String {
    format!("{} {}", n, if n == 1 { one } else { many })
}

impl OutputFormatter for TextFormatter {
    fn format_reconciliation(
        &self,
        result: &ReconciliationResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            return writeln!(writer, "{}{}", self.dry_run_prefix(), result.summary());
        }

        let shown = result.manifest_path.as_deref().unwrap_or(&result.project_root);
        let tool = result.build_tool.map(|t| t.display_name());
        self.header(shown, tool, writer)?;
        if result.build_tool.is_some() {
            writeln!(writer, " {}", self.score(result.health_score))?;
        } else {
            writeln!(writer)?;
        }

        if let Some(ref framework) = result.framework_version {
            writeln!(
                writer,
                "  Spring Boot {} (Java {}+)",
                framework,
                framework.java_floor()
            )?;
        }

        if result.build_tool.is_some() {
            let (added, fixed) = if result.dry_run {
                ("Would add", "would fix")
            } else {
                ("Added", "fixed")
            };
            writeln!(
                writer,
                "  {} {}, {} {}, skipped {} already declared",
                added,
                count(result.dependencies_added, "dependency", "dependencies"),
                fixed,
                count(result.deprecated_fixed, "deprecated coordinate", "deprecated coordinates"),
                result.dependencies_skipped
            )?;
        }
        if let Some(ref backup) = result.backup_path {
            writeln!(writer, "  Backup: {}", self.dim(&backup.display().to_string()))?;
        }

        let held_back: Vec<String> = result
            .filtered_out
            .iter()
            .map(|f| format!("{} ({})", f.coordinate, f.reason))
            .collect();
        self.section("Held back", &held_back, writer)?;

        let recs = &result.recommendations;
        self.section("Critical", &recs.critical, writer)?;
        self.section("Important", &recs.important, writer)?;
        self.section("Optional", &recs.optional, writer)?;
        self.section("Migration", &recs.migration, writer)?;
        self.section("Compatibility", &result.compatibility_warnings, writer)?;

        if self.verbosity == Verbosity::Verbose {
            if !result.comparisons.is_empty() {
                writeln!(writer, "  {}:", self.bold("Comparisons"))?;
                for c in &result.comparisons {
                    let declared = c.current_version().unwrap_or("-");
                    writeln!(
                        writer,
                        "    {} {} {} -> {}",
                        self.comparison_status(c.status),
                        c.requirement.coordinate,
                        self.dim(declared),
                        c.requirement.version
                    )?;
                }
            }
            self.snippets("Missing snippets", &result.snippets.missing_dependencies, writer)?;
            self.snippets("Upgrade snippets", &result.snippets.upgrade_dependencies, writer)?;
            self.snippets("Migration snippets", &result.snippets.migration_dependencies, writer)?;

            let warnings: Vec<String> = result.warnings.iter().map(|w| w.to_string()).collect();
            self.section("Warnings", &warnings, writer)?;
        }

        self.errors(&result.errors, writer)
    }

    fn format_health(&self, report: &HealthReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let tool = report.build_tool.map(|t| t.display_name());
        if self.verbosity == Verbosity::Quiet {
            return writeln!(
                writer,
                "{}: {} ({})",
                report.project_root.display(),
                self.score(report.score),
                manifest_status_label(&report.manifest_status)
            );
        }

        let shown = report.manifest_path.as_deref().unwrap_or(&report.project_root);
        self.header(shown, tool, writer)?;
        writeln!(writer, " {}", self.score(report.score))?;
        writeln!(
            writer,
            "  Manifest: {}",
            manifest_status_label(&report.manifest_status)
        )?;
        if let Some(ref framework) = report.framework_version {
            writeln!(writer, "  Spring Boot {}", framework)?;
        }
        writeln!(
            writer,
            "  Requirements: {} total, {} found, {} missing ({} required), {} outdated, {} deprecated",
            report.total,
            report.found,
            report.missing,
            report.missing_required,
            report.outdated,
            report.deprecated
        )?;
        self.section("Issues", &report.issues, writer)?;

        if self.verbosity == Verbosity::Verbose {
            let warnings: Vec<String> = report.warnings.iter().map(|w| w.to_string()).collect();
            self.section("Warnings", &warnings, writer)?;
        }

        if report.blocks_generation() {
            if self.color {
                writeln!(writer, "  {}", "Code generation blocked".red().bold())?;
            } else {
                writeln!(writer, "  Code generation blocked")?;
            }
        }
        Ok(())
    }

    fn format_migration(
        &self,
        guide: &MigrationGuide,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let shown = guide.manifest_path.as_deref().unwrap_or(&guide.project_root);
        let tool = guide.build_tool.map(|t| t.display_name());
        self.header(shown, tool, writer)?;
        writeln!(
            writer,
            ": {}",
            count(guide.items.len(), "deprecated dependency", "deprecated dependencies")
        )?;

        if self.verbosity != Verbosity::Quiet {
            for item in &guide.items {
                let priority = format!("[{}]", item.priority);
                let priority = match (self.color, item.priority) {
                    (false, _) => priority,
                    (true, MigrationPriority::High) => priority.red().bold().to_string(),
                    (true, MigrationPriority::Medium) => priority.yellow().to_string(),
                };
                let current = item
                    .current_version
                    .as_deref()
                    .map(|v| format!(" {}", v))
                    .unwrap_or_default();
                writeln!(
                    writer,
                    "  {} {}{} -> {}",
                    priority,
                    item.coordinate,
                    current,
                    item.target.gav()
                )?;
                writeln!(writer, "      {}", self.dim(&item.reason))?;
                if self.verbosity == Verbosity::Verbose {
                    for line in item.snippet.lines() {
                        writeln!(writer, "      {}", line)?;
                    }
                }
            }
        }

        self.errors(&guide.errors, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::entries;
    use crate::domain::{
        BuildTool, DependencyCoordinate, FrameworkVersion, MigrationItem, Profile,
    };
    use std::path::PathBuf;

    fn plain(verbosity: Verbosity, dry_run: bool) -> TextFormatter {
        TextFormatter::with_color(verbosity, dry_run, false)
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> std::io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn sample_result(dry_run: bool) -> ReconciliationResult {
        let mut result = ReconciliationResult::empty("/proj", Profile::default(), dry_run);
        result.build_tool = Some(BuildTool::Maven);
        result.manifest_path = Some(PathBuf::from("/proj/pom.xml"));
        result.framework_version = FrameworkVersion::parse("3.2.4");
        result.health_score = 70;
        result.dependencies_added = 3;
        result.recommendations.critical.push("Add Spring Web".to_string());
        result
    }

    fn health(score: u8, status: ManifestStatus) -> HealthReport {
        HealthReport {
            project_root: PathBuf::from("/proj"),
            build_tool: Some(BuildTool::Gradle),
            manifest_path: Some(PathBuf::from("/proj/build.gradle")),
            framework_version: None,
            manifest_status: status,
            total: 8,
            found: 2,
            missing: 6,
            missing_required: 4,
            outdated: 0,
            deprecated: 0,
            score,
            issues: vec!["Missing required dependency x:y".to_string()],
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::of(100), ScoreBand::Good);
        assert_eq!(ScoreBand::of(80), ScoreBand::Good);
        assert_eq!(ScoreBand::of(79), ScoreBand::Fair);
        assert_eq!(ScoreBand::of(60), ScoreBand::Fair);
        assert_eq!(ScoreBand::of(59), ScoreBand::Poor);
        assert_eq!(ScoreBand::of(0), ScoreBand::Poor);
    }

    #[test]
    fn test_reconciliation_text() {
        let formatter = plain(Verbosity::Normal, false);
        let out = render(|w| formatter.format_reconciliation(&sample_result(false), w));
        assert!(out.starts_with("/proj/pom.xml (Maven) health 70/100"));
        assert!(out.contains("Spring Boot 3.2.4 (Java 17+)"));
        assert!(out.contains("Added 3 dependencies"));
        assert!(out.contains("Critical:\n    - Add Spring Web"));
        assert!(!out.contains("Comparisons"));
    }

    #[test]
    fn test_reconciliation_dry_run() {
        let formatter = plain(Verbosity::Normal, true);
        let out = render(|w| formatter.format_reconciliation(&sample_result(true), w));
        assert!(out.starts_with("(dry-run) "));
        assert!(out.contains("Would add 3 dependencies"));
    }

    #[test]
    fn test_reconciliation_quiet_uses_summary() {
        let formatter = plain(Verbosity::Quiet, false);
        let result = sample_result(false);
        let out = render(|w| formatter.format_reconciliation(&result, w));
        assert_eq!(out.trim_end(), result.summary());
    }

    #[test]
    fn test_reconciliation_error_only() {
        let mut result = ReconciliationResult::empty("/empty", Profile::default(), false);
        result.errors.push(ReconcileError::BuildToolNotDetected {
            path: PathBuf::from("/empty"),
        });
        let out = render(|w| plain(Verbosity::Normal, false).format_reconciliation(&result, w));
        assert!(out.starts_with("/empty\n"));
        assert!(out.contains("Errors:\n    - No Maven or Gradle manifest found in /empty"));
    }

    #[test]
    fn test_health_text() {
        let formatter = plain(Verbosity::Normal, false);
        let out = render(|w| formatter.format_health(&health(60, ManifestStatus::Healthy), w));
        assert!(out.contains("/proj/build.gradle (Gradle) health 60/100"));
        assert!(out.contains("Manifest: healthy"));
        assert!(out.contains("8 total, 2 found, 6 missing (4 required)"));
        assert!(!out.contains("blocked"));

        let corrupt = ManifestStatus::Corrupt {
            heuristic: "incomplete-tag".to_string(),
            message: "line 3".to_string(),
        };
        let out = render(|w| formatter.format_health(&health(0, corrupt), w));
        assert!(out.contains("corrupt (incomplete-tag): line 3"));
        assert!(out.contains("Code generation blocked"));
    }

    #[test]
    fn test_migration_text() {
        let target = entries::jakarta_annotation();
        let guide = MigrationGuide {
            project_root: PathBuf::from("/proj"),
            build_tool: Some(BuildTool::Maven),
            manifest_path: Some(PathBuf::from("/proj/pom.xml")),
            items: vec![MigrationItem {
                coordinate: DependencyCoordinate::new("javax.annotation", "javax.annotation-api"),
                current_version: Some("1.3.2".to_string()),
                snippet: String::new(),
                reason: "javax.* APIs moved to jakarta.*".to_string(),
                priority: MigrationPriority::High,
                target,
            }],
            errors: Vec::new(),
        };
        let out = render(|w| plain(Verbosity::Normal, false).format_migration(&guide, w));
        assert!(out.contains("/proj/pom.xml (Maven): 1 deprecated dependency"));
        assert!(out.contains(
            "[high] javax.annotation:javax.annotation-api 1.3.2 -> jakarta.annotation:jakarta.annotation-api:2.1.1"
        ));
    }
}
