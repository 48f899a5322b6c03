//! Technology stack flags derived from the declared dependencies

use super::ExistingDependency;
use serde::Serialize;

/// Read-only summary of which technology generations a project uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TechnologyStack {
    /// javax.* annotation or validation APIs present
    pub has_javax: bool,
    /// jakarta.* annotation or validation APIs present
    pub has_jakarta: bool,
    /// Spring Data / JPA style data access present
    pub has_orm: bool,
    /// MyBatis / MyBatis-Plus mapper data access present
    pub has_mapper: bool,
    /// Swagger 2 / springfox annotations present
    pub has_legacy_docs: bool,
    /// springdoc OpenAPI present
    pub has_modern_docs: bool,
    /// No legacy technology detected
    pub is_modern_stack: bool,
}

impl TechnologyStack {
    /// Derives the stack flags from the full dependency list
    pub fn detect(dependencies: &[ExistingDependency]) -> Self {
        let mut stack = Self {
            has_javax: false,
            has_jakarta: false,
            has_orm: false,
            has_mapper: false,
            has_legacy_docs: false,
            has_modern_docs: false,
            is_modern_stack: true,
        };

        for dep in dependencies {
            let c = &dep.coordinate;
            if c.group_starts_with("javax.") {
                stack.has_javax = true;
            } else if c.group_starts_with("jakarta.") {
                stack.has_jakarta = true;
            } else if c.group_starts_with("org.springframework.data")
                || c.artifact == "spring-boot-starter-data-jpa"
            {
                stack.has_orm = true;
            } else if c.group_starts_with("org.mybatis") || c.group == "com.baomidou" {
                stack.has_mapper = true;
            } else if c.group_starts_with("io.swagger") || c.group == "io.springfox" {
                stack.has_legacy_docs = true;
            } else if c.group == "org.springdoc" {
                stack.has_modern_docs = true;
            }
        }

        let detected_any = stack.has_javax
            || stack.has_jakarta
            || stack.has_orm
            || stack.has_mapper
            || stack.has_legacy_docs
            || stack.has_modern_docs;

        if !detected_any {
            // Nothing to go on: assume the stack the generator targets
            stack.has_jakarta = true;
            stack.has_mapper = true;
            stack.has_modern_docs = true;
            return stack;
        }

        stack.is_modern_stack = !(stack.has_javax || stack.has_orm || stack.has_legacy_docs);
        stack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_defaults_to_modern() {
        let stack = TechnologyStack::detect(&[]);
        assert!(stack.is_modern_stack);
        assert!(stack.has_jakarta && stack.has_mapper && stack.has_modern_docs);
        assert!(!stack.has_javax);
    }

    #[test]
    fn test_legacy_flags() {
        let deps = vec![
            ExistingDependency::new("javax.validation", "validation-api"),
            ExistingDependency::new("io.springfox", "springfox-swagger2"),
            ExistingDependency::new("org.mybatis.spring.boot", "mybatis-spring-boot-starter"),
        ];
        let stack = TechnologyStack::detect(&deps);
        assert!(stack.has_javax);
        assert!(stack.has_legacy_docs);
        assert!(stack.has_mapper);
        assert!(!stack.is_modern_stack);
    }

    #[test]
    fn test_orm_is_not_modern() {
        let deps = vec![ExistingDependency::new(
            "org.springframework.boot",
            "spring-boot-starter-data-jpa",
        )];
        let stack = TechnologyStack::detect(&deps);
        assert!(stack.has_orm);
        assert!(!stack.is_modern_stack);
    }
}
