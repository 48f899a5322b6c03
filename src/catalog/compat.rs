//! Framework-version pin table
//!
//! Older Spring Boot generations need older mapper and driver releases (and,
//! for 2.x, different artifact ids). The table is keyed by version prefix and
//! consulted in order; the last row is the default.

use crate::domain::FrameworkVersion;

/// Versions pinned for one framework generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameworkPins {
    /// org.mybatis:mybatis
    pub mybatis: &'static str,
    /// org.mybatis.spring.boot:mybatis-spring-boot-starter
    pub mybatis_starter: &'static str,
    /// com.baomidou artifact id for the MyBatis-Plus starter
    pub mybatis_plus_artifact: &'static str,
    /// MyBatis-Plus starter version
    pub mybatis_plus: &'static str,
    /// MySQL connector version
    pub mysql: &'static str,
}

const LEGACY: FrameworkPins = FrameworkPins {
    mybatis: "3.4.6",
    mybatis_starter: "2.3.2",
    mybatis_plus_artifact: "mybatis-plus-boot-starter",
    mybatis_plus: "3.4.3",
    mysql: "8.0.33",
};

const EARLY_3: FrameworkPins = FrameworkPins {
    mybatis: "3.5.10",
    mybatis_starter: "3.0.4",
    mybatis_plus_artifact: "mybatis-plus-spring-boot3-starter",
    mybatis_plus: "3.5.3",
    mysql: "8.3.0",
};

const MID_3: FrameworkPins = FrameworkPins {
    mybatis: "3.5.14",
    mybatis_starter: "3.0.4",
    mybatis_plus_artifact: "mybatis-plus-spring-boot3-starter",
    mybatis_plus: "3.5.5",
    mysql: "8.3.0",
};

/// Pins used when no framework version is known
pub const CURRENT: FrameworkPins = FrameworkPins {
    mybatis: "3.5.16",
    mybatis_starter: "3.0.4",
    mybatis_plus_artifact: "mybatis-plus-spring-boot3-starter",
    mybatis_plus: "3.5.7",
    mysql: "8.4.0",
};

static PIN_TABLE: &[(&[&str], FrameworkPins)] = &[
    (&["2."], LEGACY),
    (&["3.0", "3.1"], EARLY_3),
    (&["3.2", "3.3"], MID_3),
    (&["3.4", "3.5"], CURRENT),
];

/// Looks up the pins for a framework version
pub fn pins_for(framework: Option<&FrameworkVersion>) -> FrameworkPins {
    let Some(version) = framework else {
        return CURRENT;
    };

    PIN_TABLE
        .iter()
        .find(|(prefixes, _)| prefixes.iter().any(|p| version.matches_prefix(p)))
        .map(|(_, pins)| *pins)
        .unwrap_or(CURRENT)
}

/// MySQL driver coordinate for a connector version
///
/// Connector/J moved to `com.mysql:mysql-connector-j`; only the 8.4 line is
/// pinned under the new coordinate.
pub fn mysql_coordinate(connector_version: &str) -> (&'static str, &'static str) {
    if connector_version.starts_with("8.4") {
        ("com.mysql", "mysql-connector-j")
    } else {
        ("mysql", "mysql-connector-java")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pins(v: &str) -> FrameworkPins {
        pins_for(FrameworkVersion::parse(v).as_ref())
    }

    #[test]
    fn test_no_version_uses_current() {
        assert_eq!(pins_for(None), CURRENT);
    }

    #[test]
    fn test_legacy_generation() {
        let p = pins("2.7.18");
        assert_eq!(p.mybatis, "3.4.6");
        assert_eq!(p.mybatis_plus_artifact, "mybatis-plus-boot-starter");
        assert_eq!(p.mysql, "8.0.33");
    }

    #[test]
    fn test_three_x_rows() {
        assert_eq!(pins("3.1.2").mybatis, "3.5.10");
        assert_eq!(pins("3.3.0").mybatis_plus, "3.5.5");
        assert_eq!(pins("3.5.5").mysql, "8.4.0");
    }

    #[test]
    fn test_unlisted_version_falls_back() {
        assert_eq!(pins("4.0.0"), CURRENT);
        assert_eq!(pins("3.10.1"), CURRENT);
    }

    #[test]
    fn test_mysql_coordinate() {
        assert_eq!(mysql_coordinate("8.4.0"), ("com.mysql", "mysql-connector-j"));
        assert_eq!(mysql_coordinate("8.3.0"), ("mysql", "mysql-connector-java"));
        assert_eq!(mysql_coordinate("8.0.33"), ("mysql", "mysql-connector-java"));
    }
}
