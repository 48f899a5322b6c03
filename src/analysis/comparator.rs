//! Requirement classification against declared dependencies

use crate::catalog::RequirementSet;
use crate::domain::{
    is_outdated, ComparisonStatus, DependencyComparison, DependencyCoordinate,
    DependencyRequirement, ExistingDependency,
};
use crate::manifest::SnippetStyle;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How deprecated requirements without a matching declaration are reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeprecatedReporting {
    /// Only deprecated coordinates actually declared produce a comparison
    #[default]
    PresentOnly,
    /// Every deprecated catalog entry produces a `deprecated` comparison
    Always,
}

/// Classifies one requirement given its matching declaration
pub fn classify(
    requirement: &DependencyRequirement,
    existing: Option<&ExistingDependency>,
) -> ComparisonStatus {
    let Some(existing) = existing else {
        return ComparisonStatus::Missing;
    };

    if requirement.is_deprecated() {
        return ComparisonStatus::Deprecated;
    }

    match existing.version.as_deref() {
        Some(current) if is_outdated(current, &requirement.version) => ComparisonStatus::Outdated,
        _ => ComparisonStatus::Exists,
    }
}

/// Human-readable recommendation for a classified requirement
pub fn recommendation_for(
    requirement: &DependencyRequirement,
    existing: Option<&ExistingDependency>,
    status: ComparisonStatus,
) -> String {
    let coordinate = &requirement.coordinate;
    match status {
        ComparisonStatus::Missing => format!("Add {}", requirement.description),
        ComparisonStatus::Deprecated => match &requirement.migration_target {
            Some(target) => format!("Migrate {} to {}", coordinate, target.coordinate),
            None => format!("Remove deprecated {}", coordinate),
        },
        ComparisonStatus::Outdated => format!(
            "Upgrade {} {} -> {}",
            coordinate,
            existing.and_then(|e| e.version.as_deref()).unwrap_or("?"),
            requirement.version
        ),
        ComparisonStatus::Exists => format!("{} is up to date", coordinate),
    }
}

/// Produces one comparison per requirement, in catalog order.
///
/// The first declaration of a coordinate wins when a manifest declares it
/// more than once (e.g. in dependencyManagement and dependencies).
pub fn compare(
    requirements: &RequirementSet,
    existing: &[ExistingDependency],
    style: SnippetStyle,
    reporting: DeprecatedReporting,
) -> Vec<DependencyComparison> {
    let mut lookup: HashMap<&DependencyCoordinate, &ExistingDependency> = HashMap::new();
    for dep in existing {
        lookup.entry(&dep.coordinate).or_insert(dep);
    }

    requirements
        .iter()
        .filter_map(|requirement| {
            let found = lookup.get(&requirement.coordinate).copied();

            let status = match (classify(requirement, found), requirement.is_deprecated()) {
                (ComparisonStatus::Missing, true) => match reporting {
                    DeprecatedReporting::PresentOnly => return None,
                    DeprecatedReporting::Always => ComparisonStatus::Deprecated,
                },
                (status, _) => status,
            };

            let snippet = match status {
                ComparisonStatus::Missing | ComparisonStatus::Outdated => {
                    Some(style.render(requirement))
                }
                _ => None,
            };

            tracing::debug!(requirement = %requirement.coordinate, %status, "classified");

            Some(DependencyComparison {
                requirement: requirement.clone(),
                existing: found.cloned(),
                status,
                recommendation: recommendation_for(requirement, found, status),
                snippet,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_requirements;
    use crate::domain::{DatabaseKind, Profile, RequirementStatus, TemplateCategory};

    fn required(version: &str) -> DependencyRequirement {
        DependencyRequirement::new("g", "a", version, RequirementStatus::Required, "Thing")
    }

    fn existing(version: Option<&str>) -> ExistingDependency {
        let dep = ExistingDependency::new("g", "a");
        match version {
            Some(v) => dep.with_version(v),
            None => dep,
        }
    }

    fn status_of(comparisons: &[DependencyComparison], coord: &str) -> Option<ComparisonStatus> {
        comparisons
            .iter()
            .find(|c| c.requirement.coordinate.to_string() == coord)
            .map(|c| c.status)
    }

    #[test]
    fn test_classify_numeric_ordering() {
        let dep = existing(Some("1.2.3"));
        assert_eq!(classify(&required("1.10.0"), Some(&dep)), ComparisonStatus::Outdated);
        assert_eq!(classify(&required("1.2.3"), Some(&dep)), ComparisonStatus::Exists);
        assert_eq!(classify(&required("1.2"), Some(&dep)), ComparisonStatus::Exists);
    }

    #[test]
    fn test_classify_unparseable_is_not_outdated() {
        let dep = existing(Some("${mybatis.version}"));
        assert_eq!(classify(&required("3.5.16"), Some(&dep)), ComparisonStatus::Exists);
        let dep = existing(None);
        assert_eq!(classify(&required("3.5.16"), Some(&dep)), ComparisonStatus::Exists);
    }

    #[test]
    fn test_classify_missing() {
        assert_eq!(classify(&required("1.0"), None), ComparisonStatus::Missing);
    }

    #[test]
    fn test_classify_deprecated_regardless_of_version() {
        let req = DependencyRequirement::new("g", "a", "1.0", RequirementStatus::Deprecated, "Old");
        let dep = existing(Some("9.9"));
        assert_eq!(classify(&req, Some(&dep)), ComparisonStatus::Deprecated);
    }

    #[test]
    fn test_recommendation_strings() {
        let req = required("1.10.0");
        let dep = existing(Some("1.2.3"));
        assert_eq!(
            recommendation_for(&req, Some(&dep), ComparisonStatus::Outdated),
            "Upgrade g:a 1.2.3 -> 1.10.0"
        );
        assert_eq!(
            recommendation_for(&req, None, ComparisonStatus::Missing),
            "Add Thing"
        );
        assert_eq!(
            recommendation_for(&req, Some(&dep), ComparisonStatus::Exists),
            "g:a is up to date"
        );
    }

    #[test]
    fn test_compare_one_per_requirement() {
        let profile = Profile::new(TemplateCategory::Default, DatabaseKind::Mysql);
        let set = build_requirements(&profile, None);
        let comparisons = compare(&set, &[], SnippetStyle::Maven, DeprecatedReporting::Always);
        assert_eq!(comparisons.len(), set.len());

        let missing: Vec<_> = comparisons
            .iter()
            .filter(|c| c.status == ComparisonStatus::Missing)
            .collect();
        assert_eq!(missing.len(), set.len() - set.deprecated.len());
        assert!(missing.iter().all(|c| c.snippet.is_some()));
    }

    #[test]
    fn test_compare_present_only_omits_absent_deprecated() {
        let set = build_requirements(&Profile::default(), None);
        let javax = ExistingDependency::new("javax.validation", "validation-api")
            .with_version("2.0.1.Final");

        let comparisons = compare(
            &set,
            &[javax],
            SnippetStyle::Maven,
            DeprecatedReporting::PresentOnly,
        );
        assert_eq!(
            status_of(&comparisons, "javax.validation:validation-api"),
            Some(ComparisonStatus::Deprecated)
        );
        assert_eq!(status_of(&comparisons, "javax.annotation:javax.annotation-api"), None);
        assert_eq!(status_of(&comparisons, "io.swagger:swagger-annotations"), None);

        let deprecated = comparisons
            .iter()
            .find(|c| c.status == ComparisonStatus::Deprecated)
            .unwrap();
        assert_eq!(
            deprecated.recommendation,
            "Migrate javax.validation:validation-api to jakarta.validation:jakarta.validation-api"
        );
        assert!(deprecated.snippet.is_none());
    }

    #[test]
    fn test_compare_first_declaration_wins() {
        let set = build_requirements(&Profile::default(), None);
        let deps = vec![
            ExistingDependency::new("org.projectlombok", "lombok").with_version("1.18.10"),
            ExistingDependency::new("org.projectlombok", "lombok"),
        ];
        let comparisons = compare(&set, &deps, SnippetStyle::Maven, DeprecatedReporting::PresentOnly);
        assert_eq!(
            status_of(&comparisons, "org.projectlombok:lombok"),
            Some(ComparisonStatus::Outdated)
        );
    }
}
