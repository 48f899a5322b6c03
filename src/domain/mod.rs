//! Core domain models for depmend
//!
//! This module contains the fundamental types used throughout the application:
//! - Build tool and library coordinate types
//! - Catalog requirements and declared dependencies
//! - Comparison results and technology stack flags
//! - Generation profile
//! - Version comparison helpers
//! - Reconciliation, health and migration reports

mod build_tool;
mod comparison;
mod coordinate;
mod existing;
mod profile;
mod report;
mod requirement;
mod stack;
mod version;

pub use build_tool::{is_kotlin_script, BuildTool};
pub use comparison::{ComparisonStatus, DependencyComparison};
pub use coordinate::DependencyCoordinate;
pub use existing::ExistingDependency;
pub use profile::{DatabaseKind, FeatureFlags, Profile, TemplateCategory};
pub use report::{
    health_score, FilterReason, FilteredRequirement, HealthReport, ManifestChange,
    ManifestStatus, MigrationGuide, MigrationItem, MigrationPriority, ParseWarning,
    ReconcileError, ReconciliationResult, Recommendations, Snippet, SnippetSet, StatusCounts,
};
pub use requirement::{DependencyRequirement, RequirementStatus, Scope};
pub use stack::TechnologyStack;
pub use version::{compare_versions, is_outdated, numeric_parts, FrameworkVersion};
