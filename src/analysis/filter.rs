//! Stack-consistency filter
//!
//! This module provides the StackFilter struct that decides which missing
//! requirements may be inserted without mixing technology generations.

use crate::domain::{
    DependencyCoordinate, DependencyRequirement, FilterReason, FilteredRequirement,
    FrameworkVersion, TechnologyStack, TemplateCategory,
};
use std::collections::HashSet;

/// Artifacts that pull in the bare `org.mybatis:mybatis` core
const MAPPER_STARTERS: &[(&str, &str)] = &[
    ("org.mybatis.spring.boot", "mybatis-spring-boot-starter"),
    ("com.baomidou", "mybatis-plus-boot-starter"),
    ("com.baomidou", "mybatis-plus-spring-boot3-starter"),
];

/// Annotation-API artifacts and the framework starters that provide them
const TRANSITIVE_APIS: &[((&str, &str), (&str, &str))] = &[
    (
        ("jakarta.annotation", "jakarta.annotation-api"),
        ("org.springframework.boot", "spring-boot-starter"),
    ),
    (
        ("jakarta.validation", "jakarta.validation-api"),
        ("org.springframework.boot", "spring-boot-starter-validation"),
    ),
];

/// Filter configuration for insertion
#[derive(Debug, Clone)]
pub struct StackFilter {
    /// Template category of the profile
    pub category: TemplateCategory,
    /// Technology stack of the project
    pub stack: TechnologyStack,
    /// Coordinates already declared in the manifest
    pub declared: HashSet<DependencyCoordinate>,
    /// Detected or pinned framework version
    pub framework: Option<FrameworkVersion>,
}

impl StackFilter {
    /// Create a new StackFilter for a stack, with nothing declared
    pub fn new(stack: TechnologyStack) -> Self {
        Self {
            category: TemplateCategory::MybatisPlusMixed,
            stack,
            declared: HashSet::new(),
            framework: None,
        }
    }

    /// Set the template category
    pub fn with_category(mut self, category: TemplateCategory) -> Self {
        self.category = category;
        self
    }

    /// Set the coordinates already declared
    pub fn with_declared(mut self, declared: impl IntoIterator<Item = DependencyCoordinate>) -> Self {
        self.declared = declared.into_iter().collect();
        self
    }

    /// Set the framework version
    pub fn with_framework(mut self, framework: Option<FrameworkVersion>) -> Self {
        self.framework = framework;
        self
    }

    /// Returns why a requirement must not be inserted, if it must not.
    ///
    /// `planned` holds every coordinate that is declared or about to be inserted.
    pub fn check(
        &self,
        requirement: &DependencyRequirement,
        planned: &HashSet<DependencyCoordinate>,
    ) -> Option<FilterReason> {
        let c = &requirement.coordinate;

        if self.category.is_mapper_based()
            && (c.group_starts_with("org.springframework.data")
                || c.artifact == "spring-boot-starter-data-jpa")
        {
            return Some(FilterReason::OrmWithMapperProfile);
        }

        if c.group == "org.mybatis" && c.artifact == "mybatis" {
            if let Some(starter) = first_planned(MAPPER_STARTERS, planned) {
                return Some(FilterReason::ImpliedByStarter(starter));
            }
        }

        if c.group == "org.springdoc" && self.stack.has_legacy_docs {
            return Some(FilterReason::LegacyDocsInUse);
        }
        // springdoc 2.x starters are built on jakarta.*
        if c.group == "org.springdoc"
            && c.artifact.starts_with("springdoc-openapi-starter-")
            && self.framework.as_ref().is_some_and(|f| !f.is_modern())
        {
            return Some(FilterReason::RequiresModernFramework);
        }
        if (c.group_starts_with("io.swagger") || c.group == "io.springfox")
            && self.stack.has_modern_docs
        {
            return Some(FilterReason::ModernDocsInUse);
        }

        for ((group, artifact), provider) in TRANSITIVE_APIS {
            if c.group == *group && c.artifact == *artifact {
                if let Some(starter) = first_planned(&[*provider], planned) {
                    return Some(FilterReason::ProvidedTransitively(starter));
                }
            }
        }

        None
    }

    /// Splits candidates into those to insert and those held back
    pub fn apply(
        &self,
        candidates: Vec<DependencyRequirement>,
    ) -> (Vec<DependencyRequirement>, Vec<FilteredRequirement>) {
        let planned: HashSet<DependencyCoordinate> = self
            .declared
            .iter()
            .cloned()
            .chain(candidates.iter().map(|r| r.coordinate.clone()))
            .collect();

        let mut kept = Vec::new();
        let mut filtered = Vec::new();
        for requirement in candidates {
            match self.check(&requirement, &planned) {
                Some(reason) => {
                    tracing::debug!(requirement = %requirement.coordinate, %reason, "held back");
                    filtered.push(FilteredRequirement {
                        coordinate: requirement.coordinate,
                        reason,
                    });
                }
                None => kept.push(requirement),
            }
        }

        (kept, filtered)
    }
}

fn first_planned(
    candidates: &[(&str, &str)],
    planned: &HashSet<DependencyCoordinate>,
) -> Option<String> {
    candidates
        .iter()
        .map(|(g, a)| DependencyCoordinate::new(*g, *a))
        .find(|c| planned.contains(c))
        .map(|c| c.to_string())
}
