//! depmend - Maven/Gradle dependency reconciliation library
//!
//! This library checks a Spring Boot project's build manifest against the
//! dependencies DBJavaGenix code generation needs, and repairs it:
//! - Maven (pom.xml)
//! - Gradle (build.gradle, build.gradle.kts)
//!
//! Entry points live in [`orchestrator`]: `reconcile`, `health_report`,
//! `migration_guide` and `reconcile_all`.

pub mod analysis;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod progress;
