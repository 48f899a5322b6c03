//! Tiered recommendations and snippet grouping

use crate::domain::{
    ComparisonStatus, DependencyComparison, FrameworkVersion, Recommendations, RequirementStatus,
    Snippet, SnippetSet,
};
use crate::manifest::SnippetStyle;

/// Buckets comparisons into critical, important, optional and migration guidance.
///
/// When a framework version is known, one tier observation is appended to
/// the migration bucket.
pub fn recommendations(
    comparisons: &[DependencyComparison],
    framework: Option<&FrameworkVersion>,
) -> Recommendations {
    let mut recs = Recommendations::default();

    for c in comparisons {
        let req = &c.requirement;
        let line = if req.reason.is_empty() {
            format!("{} ({})", c.recommendation, req.gav())
        } else {
            format!("{} ({}): {}", c.recommendation, req.gav(), req.reason)
        };

        match (c.status, req.status) {
            (ComparisonStatus::Missing, RequirementStatus::Required) => recs.critical.push(line),
            (ComparisonStatus::Missing, RequirementStatus::Recommended)
            | (ComparisonStatus::Outdated, _) => recs.important.push(line),
            (ComparisonStatus::Missing, RequirementStatus::Optional) => recs.optional.push(line),
            (ComparisonStatus::Deprecated, _) | (ComparisonStatus::Missing, RequirementStatus::Deprecated) => {
                recs.migration.push(format!("{}: {}", c.recommendation, req.reason))
            }
            (ComparisonStatus::Exists, _) => {}
        }
    }

    if let Some(framework) = framework {
        recs.migration.push(framework_observation(framework));
    }

    recs
}

/// One-line observation about the framework version tier
pub fn framework_observation(framework: &FrameworkVersion) -> String {
    if framework.is_modern() {
        format!(
            "Spring Boot {} is already on the modern 3.x line (Java {}+)",
            framework, framework.java_floor()
        )
    } else {
        format!(
            "Spring Boot {} (major version {}) is below the modern 3.x floor; upgrade recommended (requires Java 17+ and jakarta.*)",
            framework,
            framework.major()
        )
    }
}

/// Groups ready-to-insert declarations by the action they serve
pub fn snippet_set(comparisons: &[DependencyComparison], style: SnippetStyle) -> SnippetSet {
    let mut set = SnippetSet::default();

    for c in comparisons {
        let req = &c.requirement;
        match c.status {
            ComparisonStatus::Missing => set.missing_dependencies.push(Snippet {
                coordinate: req.coordinate.clone(),
                description: req.description.clone(),
                text: c.snippet.clone().unwrap_or_else(|| style.render(req)),
            }),
            ComparisonStatus::Outdated => set.upgrade_dependencies.push(Snippet {
                coordinate: req.coordinate.clone(),
                description: req.description.clone(),
                text: style.render(req),
            }),
            ComparisonStatus::Deprecated => {
                if let Some(target) = &req.migration_target {
                    set.migration_dependencies.push(Snippet {
                        coordinate: target.coordinate.clone(),
                        description: target.description.clone(),
                        text: style.render(target),
                    });
                }
            }
            ComparisonStatus::Exists => {}
        }
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{compare, DeprecatedReporting};
    use crate::catalog::build_requirements;
    use crate::domain::{ExistingDependency, Profile};

    fn analyzed(existing: &[ExistingDependency]) -> Vec<DependencyComparison> {
        let set = build_requirements(&Profile::default(), None);
        compare(&set, existing, SnippetStyle::Maven, DeprecatedReporting::PresentOnly)
    }

    #[test]
    fn test_buckets() {
        let comparisons = analyzed(&[
            ExistingDependency::new("org.projectlombok", "lombok").with_version("1.18.10"),
            ExistingDependency::new("javax.annotation", "javax.annotation-api"),
        ]);
        let recs = recommendations(&comparisons, None);

        assert!(recs.critical.iter().any(|l| l.contains("spring-boot-starter-web")));
        assert!(recs.important.iter().any(|l| l.starts_with("Upgrade org.projectlombok:lombok 1.18.10 -> ")));
        assert!(recs.important.iter().any(|l| l.contains("springdoc")));
        assert!(recs.optional.iter().any(|l| l.contains("mapstruct-processor")));
        assert_eq!(recs.migration.len(), 1);
        assert!(recs.migration[0].starts_with("Migrate javax.annotation:javax.annotation-api to jakarta.annotation"));
    }

    #[test]
    fn test_framework_observation_tiers() {
        let legacy = FrameworkVersion::parse("2.7.18").unwrap();
        assert!(framework_observation(&legacy).contains("below the modern 3.x floor"));

        let modern = FrameworkVersion::parse("3.2.4").unwrap();
        assert!(framework_observation(&modern).contains("already on the modern"));

        let recs = recommendations(&[], Some(&legacy));
        assert_eq!(recs.migration.len(), 1);
    }

    #[test]
    fn test_snippet_set_groups() {
        let comparisons = analyzed(&[
            ExistingDependency::new("org.projectlombok", "lombok").with_version("1.18.10"),
            ExistingDependency::new("javax.validation", "validation-api"),
        ]);
        let snippets = snippet_set(&comparisons, SnippetStyle::Maven);

        assert!(!snippets.missing_dependencies.is_empty());
        assert_eq!(snippets.upgrade_dependencies.len(), 1);
        assert!(snippets.upgrade_dependencies[0].text.contains("<version>1.18.36</version>"));
        assert_eq!(snippets.migration_dependencies.len(), 1);
        assert_eq!(
            snippets.migration_dependencies[0].coordinate.to_string(),
            "jakarta.validation:jakarta.validation-api"
        );
    }
}
