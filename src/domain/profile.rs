//! Code-generation profile: template category, database kind and feature flags

use serde::{Deserialize, Serialize};
use std::fmt;

/// Template category used for code generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TemplateCategory {
    /// Classic MyBatis mappers
    Default,
    /// MyBatis-Plus service/mapper style
    MybatisPlus,
    /// MyBatis-Plus plus classic mapper XML
    MybatisPlusMixed,
    /// Unrecognized category: only the minimal required set applies
    Unknown,
}

impl TemplateCategory {
    /// Parses a category name; unrecognized names yield `Unknown`
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "default" => TemplateCategory::Default,
            "mybatisplus" | "mybatis-plus" => TemplateCategory::MybatisPlus,
            "mybatisplus-mixed" | "mybatis-plus-mixed" => TemplateCategory::MybatisPlusMixed,
            _ => TemplateCategory::Unknown,
        }
    }

    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            TemplateCategory::Default => "Default",
            TemplateCategory::MybatisPlus => "MybatisPlus",
            TemplateCategory::MybatisPlusMixed => "MybatisPlus-Mixed",
            TemplateCategory::Unknown => "Unknown",
        }
    }

    /// Returns true if data access goes through SQL mappers
    pub fn is_mapper_based(&self) -> bool {
        !matches!(self, TemplateCategory::Unknown)
    }

    /// Returns true if the category uses MyBatis-Plus
    pub fn uses_mybatis_plus(&self) -> bool {
        matches!(
            self,
            TemplateCategory::MybatisPlus | TemplateCategory::MybatisPlusMixed
        )
    }
}

impl From<String> for TemplateCategory {
    fn from(s: String) -> Self {
        TemplateCategory::parse(&s)
    }
}

impl From<TemplateCategory> for String {
    fn from(c: TemplateCategory) -> Self {
        c.name().to_string()
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Target database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DatabaseKind {
    Mysql,
    Postgresql,
    Sqlite,
    /// Unrecognized database: no driver requirement
    Unknown,
}

impl DatabaseKind {
    /// Parses a database name; unrecognized names yield `Unknown`
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "mysql" => DatabaseKind::Mysql,
            "postgresql" | "postgres" | "pg" => DatabaseKind::Postgresql,
            "sqlite" | "sqlite3" => DatabaseKind::Sqlite,
            _ => DatabaseKind::Unknown,
        }
    }

    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            DatabaseKind::Mysql => "mysql",
            DatabaseKind::Postgresql => "postgresql",
            DatabaseKind::Sqlite => "sqlite",
            DatabaseKind::Unknown => "unknown",
        }
    }
}

impl From<String> for DatabaseKind {
    fn from(s: String) -> Self {
        DatabaseKind::parse(&s)
    }
}

impl From<DatabaseKind> for String {
    fn from(d: DatabaseKind) -> Self {
        d.name().to_string()
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Optional tooling switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    /// Lombok boilerplate elision
    pub lombok: bool,
    /// MapStruct mapping-code generation
    pub mapstruct: bool,
    /// API-doc annotations
    pub docs: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            lombok: true,
            mapstruct: true,
            docs: true,
        }
    }
}

/// Generation profile driving the requirement catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Template category
    pub category: TemplateCategory,
    /// Database kind
    pub database: DatabaseKind,
    /// Feature flags
    pub flags: FeatureFlags,
}

impl Profile {
    /// Creates a profile with all feature flags enabled
    pub fn new(category: TemplateCategory, database: DatabaseKind) -> Self {
        Self {
            category,
            database,
            flags: FeatureFlags::default(),
        }
    }

    /// Sets the feature flags (builder pattern)
    pub fn with_flags(mut self, flags: FeatureFlags) -> Self {
        self.flags = flags;
        self
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::new(TemplateCategory::MybatisPlusMixed, DatabaseKind::Mysql)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.category, self.database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_category_parse() {
        assert_eq!(TemplateCategory::parse("Default"), TemplateCategory::Default);
        assert_eq!(
            TemplateCategory::parse("MybatisPlus"),
            TemplateCategory::MybatisPlus
        );
        assert_eq!(
            TemplateCategory::parse("MybatisPlus-Mixed"),
            TemplateCategory::MybatisPlusMixed
        );
        assert_eq!(TemplateCategory::parse("jpa"), TemplateCategory::Unknown);
    }

    #[test]
    fn test_database_parse() {
        assert_eq!(DatabaseKind::parse("MySQL"), DatabaseKind::Mysql);
        assert_eq!(DatabaseKind::parse("postgres"), DatabaseKind::Postgresql);
        assert_eq!(DatabaseKind::parse("oracle"), DatabaseKind::Unknown);
    }

    #[test]
    fn test_default_profile() {
        let p = Profile::default();
        assert_eq!(p.category, TemplateCategory::MybatisPlusMixed);
        assert_eq!(p.database, DatabaseKind::Mysql);
        assert!(p.flags.lombok && p.flags.mapstruct && p.flags.docs);
    }

    #[test]
    fn test_serde_uses_names() {
        let p = Profile::default();
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"MybatisPlus-Mixed\""));
        assert!(json.contains("\"mysql\""));

        let back: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
