//! Informational version and generation warnings

use crate::catalog::DEPRECATED_GROUP_PREFIXES;
use crate::domain::{compare_versions, ExistingDependency, FrameworkVersion};
use std::cmp::Ordering;

const BOOT_GROUP: &str = "org.springframework.boot";

/// Warnings about Spring Boot version drift and deprecated technology groups.
///
/// These never change classification or scoring.
pub fn compatibility_warnings(
    existing: &[ExistingDependency],
    framework: Option<&FrameworkVersion>,
) -> Vec<String> {
    let mut warnings = Vec::new();

    for dep in existing {
        let c = &dep.coordinate;

        if let (Some(framework), Some(version)) = (framework, dep.version.as_deref()) {
            // skip the parent/BOM entry that defines the framework version itself
            let is_platform = c.artifact == "spring-boot-dependencies"
                || c.artifact == "spring-boot-starter-parent";
            if c.group == BOOT_GROUP
                && !is_platform
                && compare_versions(version, &framework.raw).is_some_and(|o| o != Ordering::Equal)
            {
                warnings.push(format!(
                    "{} declares version {} but the project uses Spring Boot {}",
                    c, version, framework
                ));
            }
        }

        if let Some(prefix) = DEPRECATED_GROUP_PREFIXES
            .iter()
            .find(|p| c.group_starts_with(p))
        {
            let hint = if prefix.starts_with("javax") {
                "migrate to the jakarta.* equivalent"
            } else {
                "migrate to springdoc OpenAPI"
            };
            warnings.push(format!("{} belongs to a deprecated group ({}): {}", c, prefix, hint));
        }
    }

    warnings
}
