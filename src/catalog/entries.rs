//! Known library coordinates with their default versions

use crate::domain::{
    DatabaseKind, DependencyCoordinate, DependencyRequirement, RequirementStatus, Scope,
};

use super::compat::{mysql_coordinate, FrameworkPins};

use RequirementStatus::{Deprecated, Optional, Recommended, Required};

/// Spring Boot version the starters default to
pub const SPRING_BOOT_VERSION: &str = "3.5.5";

const BOOT_GROUP: &str = "org.springframework.boot";

/// Spring Boot starter pinned to a framework version
pub fn boot_starter(artifact: &str, version: &str, description: &str) -> DependencyRequirement {
    DependencyRequirement::new(BOOT_GROUP, artifact, version, Required, description)
        .with_reason("Spring Boot application support")
}

pub fn spring_boot_starter(version: &str) -> DependencyRequirement {
    boot_starter("spring-boot-starter", version, "Spring Boot core starter")
}

pub fn spring_boot_web(version: &str) -> DependencyRequirement {
    boot_starter("spring-boot-starter-web", version, "Spring Boot web starter")
        .with_reason("generated controllers need Spring MVC")
}

pub fn spring_boot_validation(version: &str) -> DependencyRequirement {
    boot_starter(
        "spring-boot-starter-validation",
        version,
        "Spring Boot validation starter",
    )
    .with_reason("generated DTOs carry bean-validation annotations")
}

/// JPA starter; known for detection and filtering, never selected
pub fn spring_boot_data_jpa(version: &str) -> DependencyRequirement {
    DependencyRequirement::new(
        BOOT_GROUP,
        "spring-boot-starter-data-jpa",
        version,
        Optional,
        "Spring Data JPA starter",
    )
    .with_reason("ORM-style data access")
}

/// JDBC driver for a database, if the database is known
pub fn database_driver(database: DatabaseKind, pins: &FrameworkPins) -> Option<DependencyRequirement> {
    let driver = match database {
        DatabaseKind::Mysql => {
            let (group, artifact) = mysql_coordinate(pins.mysql);
            DependencyRequirement::new(group, artifact, pins.mysql, Required, "MySQL JDBC driver")
        }
        DatabaseKind::Postgresql => DependencyRequirement::new(
            "org.postgresql",
            "postgresql",
            "42.7.4",
            Required,
            "PostgreSQL JDBC driver",
        ),
        DatabaseKind::Sqlite => DependencyRequirement::new(
            "org.xerial",
            "sqlite-jdbc",
            "3.46.1.3",
            Required,
            "SQLite JDBC driver",
        ),
        DatabaseKind::Unknown => return None,
    };
    Some(driver.with_reason(format!("connects to {}", database)))
}

pub fn mybatis_core(pins: &FrameworkPins) -> DependencyRequirement {
    DependencyRequirement::new("org.mybatis", "mybatis", pins.mybatis, Required, "MyBatis core")
        .with_reason("SQL mapper runtime")
}

pub fn mybatis_starter(pins: &FrameworkPins) -> DependencyRequirement {
    DependencyRequirement::new(
        "org.mybatis.spring.boot",
        "mybatis-spring-boot-starter",
        pins.mybatis_starter,
        Required,
        "MyBatis Spring Boot starter",
    )
    .with_reason("wires generated mappers into Spring")
}

pub fn mybatis_plus_starter(pins: &FrameworkPins) -> DependencyRequirement {
    DependencyRequirement::new(
        "com.baomidou",
        pins.mybatis_plus_artifact,
        pins.mybatis_plus,
        Required,
        "MyBatis-Plus Spring Boot starter",
    )
    .with_reason("generated services extend MyBatis-Plus base classes")
}

pub fn lombok() -> DependencyRequirement {
    DependencyRequirement::new("org.projectlombok", "lombok", "1.18.36", Optional, "Lombok")
        .with_reason("generated entities use Lombok annotations")
}

pub fn mapstruct() -> DependencyRequirement {
    DependencyRequirement::new("org.mapstruct", "mapstruct", "1.6.3", Optional, "MapStruct")
        .with_reason("generated converters are MapStruct interfaces")
}

pub fn mapstruct_processor() -> DependencyRequirement {
    DependencyRequirement::new(
        "org.mapstruct",
        "mapstruct-processor",
        "1.6.3",
        Optional,
        "MapStruct annotation processor",
    )
    .with_scope(Scope::Provided)
    .with_reason("generates converter implementations at compile time")
}

pub fn springdoc() -> DependencyRequirement {
    DependencyRequirement::new(
        "org.springdoc",
        "springdoc-openapi-starter-webmvc-ui",
        "2.7.0",
        Recommended,
        "springdoc OpenAPI UI",
    )
    .with_reason("OpenAPI 3 documentation for generated controllers")
}

pub fn swagger_annotations() -> DependencyRequirement {
    DependencyRequirement::new(
        "io.swagger",
        "swagger-annotations",
        "1.6.14",
        Deprecated,
        "Swagger 2 annotations",
    )
    .with_reason("Swagger 2 is superseded by springdoc OpenAPI 3")
    .with_migration_target(springdoc())
}

pub fn jakarta_annotation() -> DependencyRequirement {
    DependencyRequirement::new(
        "jakarta.annotation",
        "jakarta.annotation-api",
        "2.1.1",
        Recommended,
        "Jakarta annotations API",
    )
    .with_reason("Jakarta EE common annotations")
}

pub fn jakarta_validation() -> DependencyRequirement {
    DependencyRequirement::new(
        "jakarta.validation",
        "jakarta.validation-api",
        "3.0.2",
        Recommended,
        "Jakarta validation API",
    )
    .with_reason("Jakarta bean validation")
}

pub fn javax_annotation() -> DependencyRequirement {
    DependencyRequirement::new(
        "javax.annotation",
        "javax.annotation-api",
        "1.3.2",
        Deprecated,
        "javax annotations API",
    )
    .with_reason("javax.* APIs moved to jakarta.* in Jakarta EE 9")
    .with_migration_target(jakarta_annotation())
}

pub fn javax_validation() -> DependencyRequirement {
    DependencyRequirement::new(
        "javax.validation",
        "validation-api",
        "2.0.1.Final",
        Deprecated,
        "javax validation API",
    )
    .with_reason("javax.* APIs moved to jakarta.* in Jakarta EE 9")
    .with_migration_target(jakarta_validation())
}

/// Every deprecated entry the catalog knows, with its migration target
pub fn deprecated_entries() -> Vec<DependencyRequirement> {
    vec![javax_annotation(), javax_validation(), swagger_annotations()]
}

/// Deprecated coordinate to migration-target pairs
pub fn migration_pairs() -> Vec<(DependencyCoordinate, DependencyRequirement)> {
    deprecated_entries()
        .into_iter()
        .filter_map(|entry| {
            let target = entry.migration_target?;
            Some((entry.coordinate, *target))
        })
        .collect()
}

/// Looks up the deprecated catalog entry for a coordinate
pub fn find_deprecated(coordinate: &DependencyCoordinate) -> Option<DependencyRequirement> {
    deprecated_entries()
        .into_iter()
        .find(|entry| &entry.coordinate == coordinate)
}

/// Group prefixes that mark a deprecated technology generation
pub const DEPRECATED_GROUP_PREFIXES: &[&str] = &["javax.", "io.swagger", "io.springfox"];
