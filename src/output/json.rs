//! JSON output formatter for machine processing
//!
//! This module provides:
//! - Pretty-printed JSON of reconciliation, health and migration results
//! - A run-level summary (project and error counts)
//! - Verbosity-dependent detail (snippets only in verbose mode, no per-requirement
//!   comparisons in quiet mode)

use crate::domain::{HealthReport, MigrationGuide, ReconciliationResult};
use crate::orchestrator::OrchestratorResult;
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use serde_json::Value;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

/// JSON representation of a whole run
#[derive(Serialize)]
struct JsonOutput {
    /// `fix`, `check` or `migrate`
    command: &'static str,
    /// Run-level counts
    summary: JsonSummary,
    /// One entry per project, in input order
    projects: Vec<Value>,
}

/// JSON representation of run-level counts
#[derive(Serialize)]
struct JsonSummary {
    projects: usize,
    /// Projects with at least one collected error
    with_errors: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    dependencies_added: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deprecated_fixed: Option<usize>,
    /// Projects whose manifest blocks code generation
    #[serde(skip_serializing_if = "Option::is_none")]
    blocked: Option<usize>,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    fn reconciliation_value(&self, result: &ReconciliationResult) -> std::io::Result<Value> {
        let mut value = serde_json::to_value(result).map_err(std::io::Error::other)?;
        if let Value::Object(ref mut map) = value {
            map.insert("summary".to_string(), Value::String(result.summary()));
            if self.verbosity != Verbosity::Verbose {
                map.remove("snippets");
            }
            if self.verbosity == Verbosity::Quiet {
                map.remove("comparisons");
            }
        }
        Ok(value)
    }

    fn health_value(&self, report: &HealthReport) -> std::io::Result<Value> {
        let mut value = serde_json::to_value(report).map_err(std::io::Error::other)?;
        if let Value::Object(ref mut map) = value {
            map.insert(
                "blocks_generation".to_string(),
                Value::Bool(report.blocks_generation()),
            );
        }
        Ok(value)
    }

    fn migration_value(&self, guide: &MigrationGuide) -> std::io::Result<Value> {
        let mut value = serde_json::to_value(guide).map_err(std::io::Error::other)?;
        if self.verbosity != Verbosity::Verbose {
            if let Some(Value::Array(items)) = value.get_mut("items") {
                for item in items.iter_mut().filter_map(Value::as_object_mut) {
                    item.remove("snippet");
                }
            }
        }
        Ok(value)
    }

    fn write_value(&self, value: &impl Serialize, writer: &mut dyn Write) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = match result {
            OrchestratorResult::Reconciled(results) => JsonOutput {
                command: "fix",
                summary: JsonSummary {
                    projects: results.len(),
                    with_errors: results.iter().filter(|r| r.has_errors()).count(),
                    dependencies_added: Some(results.iter().map(|r| r.dependencies_added).sum()),
                    deprecated_fixed: Some(results.iter().map(|r| r.deprecated_fixed).sum()),
                    blocked: None,
                },
                projects: results
                    .iter()
                    .map(|r| self.reconciliation_value(r))
                    .collect::<std::io::Result<_>>()?,
            },
            OrchestratorResult::Health(reports) => JsonOutput {
                command: "check",
                summary: JsonSummary {
                    projects: reports.len(),
                    with_errors: reports.iter().filter(|r| r.build_tool.is_none()).count(),
                    dependencies_added: None,
                    deprecated_fixed: None,
                    blocked: Some(reports.iter().filter(|r| r.blocks_generation()).count()),
                },
                projects: reports
                    .iter()
                    .map(|r| self.health_value(r))
                    .collect::<std::io::Result<_>>()?,
            },
            OrchestratorResult::Migration(guides) => JsonOutput {
                command: "migrate",
                summary: JsonSummary {
                    projects: guides.len(),
                    with_errors: guides.iter().filter(|g| !g.errors.is_empty()).count(),
                    dependencies_added: None,
                    deprecated_fixed: None,
                    blocked: None,
                },
                projects: guides
                    .iter()
                    .map(|g| self.migration_value(g))
                    .collect::<std::io::Result<_>>()?,
            },
        };

        self.write_value(&output, writer)
    }

    fn format_reconciliation(
        &self,
        result: &ReconciliationResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let value = self.reconciliation_value(result)?;
        self.write_value(&value, writer)
    }

    fn format_health(&self, report: &HealthReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let value = self.health_value(report)?;
        self.write_value(&value, writer)
    }

    fn format_migration(
        &self,
        guide: &MigrationGuide,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let value = self.migration_value(guide)?;
        self.write_value(&value, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{compare, snippet_set, DeprecatedReporting};
    use crate::catalog::build_requirements;
    use crate::domain::{BuildTool, ManifestStatus, Profile, ReconcileError};
    use crate::manifest::SnippetStyle;
    use std::path::PathBuf;

    fn sample_result() -> ReconciliationResult {
        let profile = Profile::default();
        let mut result = ReconciliationResult::empty("/proj", profile.clone(), true);
        result.build_tool = Some(BuildTool::Maven);
        result.manifest_path = Some(PathBuf::from("/proj/pom.xml"));
        let set = build_requirements(&profile, None);
        result.comparisons =
            compare(&set, &[], SnippetStyle::Maven, DeprecatedReporting::PresentOnly);
        result.snippets = snippet_set(&result.comparisons, SnippetStyle::Maven);
        result.dependencies_added = 4;
        result
    }

    fn run(formatter: &JsonFormatter, result: &OrchestratorResult) -> Value {
        let mut output = Vec::new();
        formatter.format(result, &mut output).unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn test_format_reconciled() {
        let formatter = JsonFormatter::new(Verbosity::Normal);
        let parsed = run(&formatter, &OrchestratorResult::Reconciled(vec![sample_result()]));

        assert_eq!(parsed["command"], "fix");
        assert_eq!(parsed["summary"]["projects"], 1);
        assert_eq!(parsed["summary"]["dependencies_added"], 4);
        let project = &parsed["projects"][0];
        assert_eq!(project["build_tool"], "maven");
        assert_eq!(project["dry_run"], true);
        assert!(project["summary"].as_str().unwrap().contains("would add 4"));
        assert!(project["comparisons"].as_array().unwrap().len() > 5);
        assert!(project.get("snippets").is_none());
    }

    #[test]
    fn test_format_verbose_and_quiet() {
        let result = OrchestratorResult::Reconciled(vec![sample_result()]);

        let parsed = run(&JsonFormatter::new(Verbosity::Verbose), &result);
        assert!(!parsed["projects"][0]["snippets"]["missing_dependencies"]
            .as_array()
            .unwrap()
            .is_empty());

        let parsed = run(&JsonFormatter::new(Verbosity::Quiet), &result);
        assert!(parsed["projects"][0].get("comparisons").is_none());
    }

    #[test]
    fn test_format_errors_tagged() {
        let mut result = ReconciliationResult::empty("/none", Profile::default(), false);
        result.errors.push(ReconcileError::BuildToolNotDetected {
            path: PathBuf::from("/none"),
        });
        let parsed = run(
            &JsonFormatter::new(Verbosity::Normal),
            &OrchestratorResult::Reconciled(vec![result]),
        );
        assert_eq!(parsed["summary"]["with_errors"], 1);
        assert_eq!(parsed["projects"][0]["errors"][0]["kind"], "build_tool_not_detected");
    }

    #[test]
    fn test_format_health() {
        let report = HealthReport {
            project_root: PathBuf::from("/proj"),
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
            issues: vec!["No Maven or Gradle manifest found in /proj".to_string()],
            warnings: Vec::new(),
        };
        let parsed = run(
            &JsonFormatter::new(Verbosity::Normal),
            &OrchestratorResult::Health(vec![report]),
        );
        assert_eq!(parsed["command"], "check");
        assert_eq!(parsed["summary"]["blocked"], 1);
        assert_eq!(parsed["projects"][0]["manifest_status"]["state"], "missing");
        assert_eq!(parsed["projects"][0]["blocks_generation"], true);
    }
}
