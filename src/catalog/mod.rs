//! Requirement catalog
//!
//! This module provides:
//! - `build_requirements`: the profile-driven requirement set, rebuilt per call
//! - Framework-version pins for mapper and driver artifacts
//! - The deprecated/migration-target pairs used by the auto-fix pass

pub mod compat;
pub mod entries;

use crate::domain::{
    DependencyCoordinate, DependencyRequirement, FrameworkVersion, Profile, TemplateCategory,
};
use serde::Serialize;
use std::collections::HashSet;

pub use compat::{pins_for, FrameworkPins};
pub use entries::{find_deprecated, migration_pairs, DEPRECATED_GROUP_PREFIXES, SPRING_BOOT_VERSION};

/// Requirements bucketed by status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequirementSet {
    pub required: Vec<DependencyRequirement>,
    pub optional: Vec<DependencyRequirement>,
    pub recommended: Vec<DependencyRequirement>,
    pub deprecated: Vec<DependencyRequirement>,
}

impl RequirementSet {
    /// All requirements in bucket order: required, optional, recommended, deprecated
    pub fn iter(&self) -> impl Iterator<Item = &DependencyRequirement> {
        self.required
            .iter()
            .chain(&self.optional)
            .chain(&self.recommended)
            .chain(&self.deprecated)
    }

    /// Total number of requirements
    pub fn len(&self) -> usize {
        self.required.len() + self.optional.len() + self.recommended.len() + self.deprecated.len()
    }

    /// Returns true if the set has no requirement
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if any bucket holds the coordinate
    pub fn contains(&self, coordinate: &DependencyCoordinate) -> bool {
        self.iter().any(|r| &r.coordinate == coordinate)
    }

    /// Removes later duplicates of a coordinate, keeping the first in bucket order
    fn dedup(&mut self) {
        let mut seen = HashSet::new();
        for bucket in [
            &mut self.required,
            &mut self.optional,
            &mut self.recommended,
            &mut self.deprecated,
        ] {
            bucket.retain(|r| seen.insert(r.coordinate.clone()));
        }
    }
}

/// Builds the requirement set for a profile.
///
/// Pure: the same profile and framework version always produce the same
/// requirements in the same order.
pub fn build_requirements(
    profile: &Profile,
    framework: Option<&FrameworkVersion>,
) -> RequirementSet {
    let pins = pins_for(framework);
    let boot_version = framework
        .map(|f| f.raw.as_str())
        .unwrap_or(SPRING_BOOT_VERSION);

    let mut set = RequirementSet::default();

    set.required.push(entries::spring_boot_starter(boot_version));

    if profile.category != TemplateCategory::Unknown {
        set.required.push(entries::spring_boot_web(boot_version));
        set.required.push(entries::spring_boot_validation(boot_version));
    }

    if let Some(driver) = entries::database_driver(profile.database, &pins) {
        set.required.push(driver);
    }

    match profile.category {
        TemplateCategory::Default => {
            set.required.push(entries::mybatis_core(&pins));
            set.required.push(entries::mybatis_starter(&pins));
        }
        TemplateCategory::MybatisPlus | TemplateCategory::MybatisPlusMixed => {
            set.required.push(entries::mybatis_plus_starter(&pins));
        }
        TemplateCategory::Unknown => {}
    }

    if profile.flags.lombok {
        set.optional.push(entries::lombok());
    }
    if profile.flags.mapstruct {
        set.optional.push(entries::mapstruct());
        set.optional.push(entries::mapstruct_processor());
    }

    if profile.flags.docs {
        set.recommended.push(entries::springdoc());
        set.deprecated.push(entries::swagger_annotations());
    }

    set.recommended.push(entries::jakarta_annotation());
    set.recommended.push(entries::jakarta_validation());
    set.deprecated.push(entries::javax_annotation());
    set.deprecated.push(entries::javax_validation());

    set.dedup();
    set
}
