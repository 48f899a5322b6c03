//! End-to-end tests for depmend CLI
//!
//! These tests verify:
//! - Dry-run mode leaves files unchanged
//! - CLI produces correct JSON output schema
//! - Exit codes are correct for various scenarios
//! - Backups, diff output and the configuration file

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <modelVersion>4.0.0</modelVersion>
    <groupId>com.example</groupId>
    <artifactId>demo</artifactId>
    <version>0.0.1-SNAPSHOT</version>
    <dependencies>
        <dependency>
            <groupId>javax.annotation</groupId>
            <artifactId>javax.annotation-api</artifactId>
            <version>1.3.2</version>
        </dependency>
    </dependencies>
</project>
"#;

/// Binary under test
fn depmend() -> Command {
    Command::cargo_bin("depmend").expect("binary should be built")
}

/// Create a test directory with a sample pom.xml
fn create_test_project() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    fs::write(temp_dir.path().join("pom.xml"), POM).unwrap();
    temp_dir
}

fn path_arg(dir: &TempDir) -> &str {
    dir.path().to_str().unwrap()
}

fn backup_count(dir: &Path) -> usize {
    fs::read_dir(dir)
        .unwrap()
        .flatten()
        .filter(|e| e.file_name().to_string_lossy().starts_with("pom_backup_"))
        .count()
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Output should be valid JSON")
}

mod dry_run_tests {
    use super::*;

    /// Test that dry-run mode does not modify any files
    #[test]
    fn test_dry_run_leaves_files_unchanged() {
        let temp_dir = create_test_project();

        depmend()
            .args(["fix", "--dry-run", path_arg(&temp_dir)])
            .assert()
            .success()
            .stdout(predicate::str::contains("Would add"));

        let after = fs::read_to_string(temp_dir.path().join("pom.xml")).unwrap();
        assert_eq!(after, POM, "pom.xml should not be modified in dry-run mode");
        assert_eq!(backup_count(temp_dir.path()), 0);
    }

    /// Test dry-run diff shows the planned insertion
    #[test]
    fn test_dry_run_diff() {
        let temp_dir = create_test_project();

        let output = depmend()
            .args(["fix", "-n", "--diff", path_arg(&temp_dir)])
            .output()
            .unwrap();
        assert!(output.status.success());

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("--- a/"));
        assert!(stdout.contains("+++ b/"));
        assert!(stdout.contains("@@ -"));
        assert!(stdout
            .lines()
            .any(|l| l.starts_with('+') && l.contains("<artifactId>mybatis-plus-spring-boot3-starter</artifactId>")));
        assert!(stdout
            .lines()
            .any(|l| l.starts_with('-') && l.contains("<groupId>javax.annotation</groupId>")));
        assert!(stdout.contains("(dry-run) # "));
        assert_eq!(fs::read_to_string(temp_dir.path().join("pom.xml")).unwrap(), POM);
    }

    /// Test quiet mode prints one summary line per project
    #[test]
    fn test_dry_run_with_quiet_mode() {
        let temp_dir = create_test_project();

        let output = depmend()
            .args(["fix", "--dry-run", "-q", path_arg(&temp_dir)])
            .output()
            .unwrap();
        assert!(output.status.success());

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert_eq!(stdout.trim().lines().count(), 1);
        assert!(stdout.contains("would add"));
    }
}

mod json_output_tests {
    use super::*;

    /// Test JSON output structure
    #[test]
    fn test_json_output_schema() {
        let temp_dir = create_test_project();

        let output = depmend()
            .args(["fix", "--dry-run", "--json", path_arg(&temp_dir)])
            .output()
            .unwrap();
        assert!(output.status.success());

        let json = stdout_json(&output);
        assert_eq!(json["command"], "fix");
        assert_eq!(json["summary"]["projects"], 1);
        assert_eq!(json["summary"]["with_errors"], 0);
        assert!(json["summary"]["dependencies_added"].as_u64().unwrap() > 0);
        assert_eq!(json["summary"]["deprecated_fixed"], 1);

        let project = &json["projects"][0];
        assert_eq!(project["dry_run"], true);
        assert_eq!(project["file_modified"], false);
        assert!(project["comparisons"].is_array());
        assert!(project["summary"].is_string());
        assert!(project.get("snippets").is_none(), "snippets only in verbose mode");
    }

    /// Test JSON output for check on an empty directory
    #[test]
    fn test_json_output_empty_directory() {
        let temp_dir = tempfile::tempdir().unwrap();

        let output = depmend()
            .args(["check", "--json", path_arg(&temp_dir)])
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(2));

        let json = stdout_json(&output);
        assert_eq!(json["command"], "check");
        assert_eq!(json["summary"]["blocked"], 1);
        assert_eq!(json["projects"][0]["blocks_generation"], true);
        assert_eq!(json["projects"][0]["manifest_status"]["state"], "missing");
    }

    /// Test JSON migration guide
    #[test]
    fn test_json_migrate() {
        let temp_dir = create_test_project();

        let output = depmend()
            .args(["migrate", "--json", path_arg(&temp_dir)])
            .output()
            .unwrap();
        assert!(output.status.success());

        let json = stdout_json(&output);
        assert_eq!(json["command"], "migrate");
        let items = json["projects"][0]["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["priority"], "high");
        assert_eq!(items[0]["current_version"], "1.3.2");
    }
}

mod exit_code_tests {
    use super::*;

    /// Test exit code with help flag
    #[test]
    fn test_exit_code_help() {
        depmend()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("check"))
            .stdout(predicate::str::contains("fix"))
            .stdout(predicate::str::contains("migrate"));
    }

    /// Test exit code with version flag
    #[test]
    fn test_exit_code_version() {
        depmend()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("depmend "));
    }

    /// Test that a directory without a manifest is reported as an error
    #[test]
    fn test_exit_code_no_manifest() {
        let temp_dir = tempfile::tempdir().unwrap();

        depmend()
            .args(["check", path_arg(&temp_dir)])
            .assert()
            .code(2)
            .stdout(predicate::str::contains("No Maven or Gradle manifest"));
    }

    /// Test exit code with conflicting output flags
    #[test]
    fn test_exit_code_conflicting_options() {
        let temp_dir = create_test_project();

        depmend()
            .args(["fix", "--json", "--diff", path_arg(&temp_dir)])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("cannot be used together"));
        assert_eq!(fs::read_to_string(temp_dir.path().join("pom.xml")).unwrap(), POM);
    }

    /// Test that a partial failure still processes the healthy project
    #[test]
    fn test_exit_code_partial_failure() {
        let good = create_test_project();
        let empty = tempfile::tempdir().unwrap();

        let output = depmend()
            .args(["fix", "--no-backup", path_arg(&good), path_arg(&empty)])
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(2));
        assert_ne!(fs::read_to_string(good.path().join("pom.xml")).unwrap(), POM);
    }
}

mod cli_options_tests {
    use super::*;

    /// Test that fix writes the manifest and a backup
    #[test]
    fn test_fix_writes_with_backup() {
        let temp_dir = create_test_project();

        depmend()
            .args(["fix", path_arg(&temp_dir)])
            .assert()
            .success()
            .stdout(predicate::str::contains("Added"));

        let written = fs::read_to_string(temp_dir.path().join("pom.xml")).unwrap();
        assert!(written.contains("<groupId>jakarta.annotation</groupId>"));
        assert!(!written.contains("<groupId>javax.annotation</groupId>"));
        assert!(written.contains("DBJavaGenix auto-added dependency"));
        assert_eq!(backup_count(temp_dir.path()), 1);
    }

    /// Test that --no-backup skips the backup copy
    #[test]
    fn test_fix_no_backup() {
        let temp_dir = create_test_project();

        depmend()
            .args(["fix", "--no-backup", path_arg(&temp_dir)])
            .assert()
            .success();

        assert_ne!(fs::read_to_string(temp_dir.path().join("pom.xml")).unwrap(), POM);
        assert_eq!(backup_count(temp_dir.path()), 0);
    }

    /// Test check is read-only
    #[test]
    fn test_check_read_only() {
        let temp_dir = create_test_project();

        depmend()
            .args(["check", path_arg(&temp_dir)])
            .assert()
            .success()
            .stdout(predicate::str::contains("(Maven)"));
        assert_eq!(fs::read_to_string(temp_dir.path().join("pom.xml")).unwrap(), POM);
    }

    /// Test text migration guide
    #[test]
    fn test_migrate_text() {
        let temp_dir = create_test_project();

        depmend()
            .args(["migrate", path_arg(&temp_dir)])
            .assert()
            .success()
            .stdout(predicate::str::contains("[high]"))
            .stdout(predicate::str::contains("jakarta.annotation:jakarta.annotation-api"));
    }

    /// Test that depmend.toml in the project is honored
    #[test]
    fn test_config_file_discovered() {
        let temp_dir = create_test_project();
        fs::write(
            temp_dir.path().join("depmend.toml"),
            "[profile]\ndatabase = \"postgresql\"\n",
        )
        .unwrap();

        let output = depmend()
            .args(["check", "--json", path_arg(&temp_dir)])
            .output()
            .unwrap();
        let json = stdout_json(&output);
        let issues = json["projects"][0]["issues"].to_string();
        assert!(issues.contains("org.postgresql:postgresql"));
        assert!(!issues.contains("mysql"));
    }

    /// Test that flags win over the configuration file
    #[test]
    fn test_flags_override_config_file() {
        let temp_dir = create_test_project();
        let config = temp_dir.path().join("custom.toml");
        fs::write(&config, "[profile]\ndatabase = \"postgresql\"\n").unwrap();

        let output = depmend()
            .args([
                "check",
                "--json",
                "--config",
                config.to_str().unwrap(),
                "--database",
                "sqlite",
                path_arg(&temp_dir),
            ])
            .output()
            .unwrap();
        let issues = stdout_json(&output)["projects"][0]["issues"].to_string();
        assert!(issues.contains("org.xerial:sqlite-jdbc"));
        assert!(!issues.contains("org.postgresql"));
    }

    /// Test that a missing explicit config file is a fatal error
    #[test]
    fn test_missing_config_file() {
        let temp_dir = create_test_project();

        depmend()
            .args(["check", "--config", "/nonexistent/depmend.toml", path_arg(&temp_dir)])
            .assert()
            .code(1);
    }
}
