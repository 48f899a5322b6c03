//! Maven manifest parser for pom.xml
//!
//! Handles:
//! - `<dependency>` blocks in `<dependencies>` and `<dependencyManagement>`
//! - Namespace-prefixed elements (`<pom:groupId>`)
//! - `${property}` versions resolved from `<properties>` and the project version
//! - Spring Boot version from the parent block, properties or the BOM import
//! - Marker-commented insertion and groupId/artifactId replacement

use super::repair::{document_newline, expand_empty_list, line_indent, line_start, scan_layout};
use super::snippet::{maven_entry, MARKER, XML_INDENT};
use super::xml_check::{blank_comments, line_of};
use super::{ManifestParser, ParsedManifest};
use crate::domain::{
    BuildTool, DependencyCoordinate, DependencyRequirement, ExistingDependency, ParseWarning,
    Scope,
};
use crate::error::ManifestError;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

/// Parser for pom.xml files
pub struct MavenParser;

// Optional namespace prefix on element names
const NS: &str = r"(?:[A-Za-z_][\w.\-]*:)?";

static DEPENDENCY_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?s)<{NS}dependency(?:\s[^>]*)?>(.*?)</{NS}dependency\s*>")).unwrap()
});

static EXCLUSIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?s)<{NS}exclusions\s*>.*?</{NS}exclusions\s*>")).unwrap()
});

static PLUGINS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?s)<{NS}plugins\s*>.*?</{NS}plugins\s*>")).unwrap()
});

static PARENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?s)<{NS}parent\s*>(.*?)</{NS}parent\s*>")).unwrap()
});

static PROPERTIES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?s)<{NS}properties\s*>(.*?)</{NS}properties\s*>")).unwrap()
});

static PROPERTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([A-Za-z_][\w.\-]*)\s*>\s*([^<]*?)\s*</([A-Za-z_][\w.\-]*)\s*>").unwrap()
});

static PROPERTY_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

static SECTION_WITH_VERSIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?s)<{NS}(parent|dependencies|dependencyManagement|build|profiles|reporting)\s*>.*?</{NS}(parent|dependencies|dependencyManagement|build|profiles|reporting)\s*>"
    ))
    .unwrap()
});

const BOOT_GROUP: &str = "org.springframework.boot";

/// Text of the first `<name>` child element, namespace-tolerant
fn element_text(block: &str, name: &str) -> Option<String> {
    let pattern = format!(
        r"(?s)<{NS}{name}\s*>\s*([^<]*?)\s*</{NS}{name}\s*>",
        name = regex::escape(name)
    );
    let re = Regex::new(&pattern).ok()?;
    let text = re.captures(block)?.get(1)?.as_str().trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Replaces the matched region with spaces (keeping newlines) so offsets survive
fn blank_matches(content: &str, re: &Regex) -> String {
    re.replace_all(content, |caps: &regex::Captures| {
        caps[0]
            .chars()
            .map(|c| if c == '\n' { "\n".to_string() } else { " ".repeat(c.len_utf8()) })
            .collect::<String>()
    })
    .into_owned()
}

impl MavenParser {
    /// Collects `<properties>` plus `project.version` / `project.parent.version`
    fn extract_properties(&self, content: &str) -> HashMap<String, String> {
        let mut properties = HashMap::new();

        if let Some(caps) = PROPERTIES.captures(content) {
            for prop in PROPERTY.captures_iter(&caps[1]) {
                if prop[1] == prop[3] {
                    properties.insert(prop[1].to_string(), prop[2].to_string());
                }
            }
        }

        if let Some(parent) = PARENT.captures(content) {
            if let Some(version) = element_text(&parent[1], "version") {
                properties.insert("project.parent.version".to_string(), version);
            }
        }

        let without_plugins = PLUGINS.replace_all(content, "");
        let top_level = SECTION_WITH_VERSIONS.replace_all(&without_plugins, "");
        if let Some(version) = element_text(&top_level, "version") {
            properties.insert("project.version".to_string(), version);
        }

        properties
    }

    /// Resolves `${name}` references; unknown references are kept verbatim
    fn resolve(&self, value: &str, properties: &HashMap<String, String>) -> String {
        PROPERTY_REF
            .replace_all(value, |caps: &regex::Captures| {
                properties
                    .get(&caps[1])
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// Spring Boot version: parent block, then properties, then the BOM import
    fn framework_version(
        &self,
        content: &str,
        properties: &HashMap<String, String>,
        dependencies: &[ExistingDependency],
    ) -> Option<String> {
        if let Some(parent) = PARENT.captures(content) {
            if element_text(&parent[1], "groupId").as_deref() == Some(BOOT_GROUP) {
                if let Some(version) = element_text(&parent[1], "version") {
                    return Some(self.resolve(&version, properties));
                }
            }
        }

        for key in ["spring.boot.version", "spring-boot.version", "springboot.version"] {
            if let Some(version) = properties.get(key) {
                return Some(version.clone());
            }
        }

        dependencies
            .iter()
            .find(|d| {
                d.coordinate.group == BOOT_GROUP
                    && d.coordinate.artifact == "spring-boot-dependencies"
            })
            .and_then(|d| d.version.clone())
    }
}

impl ManifestParser for MavenParser {
    fn parse(&self, content: &str) -> ParsedManifest {
        let uncommented = blank_comments(content);
        let properties = self.extract_properties(&uncommented);

        // Plugin dependencies and exclusions never declare project dependencies
        let scrubbed = blank_matches(&uncommented, &PLUGINS);
        let scrubbed = blank_matches(&scrubbed, &EXCLUSIONS);

        let mut dependencies = Vec::new();
        let mut warnings = Vec::new();

        for caps in DEPENDENCY_BLOCK.captures_iter(&scrubbed) {
            let Some(block) = caps.get(1) else { continue };
            let line = line_of(content, caps.get(0).map(|m| m.start()).unwrap_or(0));

            let group = element_text(block.as_str(), "groupId");
            let artifact = element_text(block.as_str(), "artifactId");
            let (Some(group), Some(artifact)) = (group, artifact) else {
                tracing::warn!(line, "skipping <dependency> without groupId/artifactId");
                warnings.push(ParseWarning::new(
                    Some(line),
                    "<dependency> without groupId or artifactId skipped",
                ));
                continue;
            };

            let group = self.resolve(&group, &properties);
            let artifact = self.resolve(&artifact, &properties);
            let mut dep = ExistingDependency::new(group, artifact).with_line(line);

            if let Some(version) = element_text(block.as_str(), "version") {
                dep = dep.with_version(self.resolve(&version, &properties));
            }

            let scope = match element_text(block.as_str(), "scope") {
                None => Some(Scope::Compile),
                Some(raw) => {
                    let parsed = Scope::from_maven(&raw);
                    if parsed.is_none() {
                        tracing::debug!(line, scope = %raw, "scope outside compile/provided/test/runtime");
                    }
                    parsed
                }
            };
            if let Some(scope) = scope {
                dep = dep.with_scope(scope);
            }

            tracing::debug!(line, dependency = %dep, "maven dependency");
            dependencies.push(dep);
        }

        let framework_version = self.framework_version(&uncommented, &properties, &dependencies);

        ParsedManifest {
            dependencies,
            framework_version,
            warnings,
        }
    }

    fn build_tool(&self) -> BuildTool {
        BuildTool::Maven
    }

    fn insert_dependencies(
        &self,
        path: &Path,
        content: &str,
        additions: &[DependencyRequirement],
    ) -> Result<String, ManifestError> {
        if additions.is_empty() {
            return Ok(content.to_string());
        }

        let newline = document_newline(content);
        let expanded = expand_empty_list(content);
        let content = expanded.as_str();
        let layout = scan_layout(content);
        let has_marker = content.contains(MARKER);

        let render = |indent: &str| -> String {
            let mut lines = Vec::new();
            if !has_marker {
                lines.push(format!("{}<!-- {} -->", indent, MARKER));
            }
            for requirement in additions {
                lines.push(maven_entry(requirement, indent));
            }
            lines.join("\n").replace('\n', newline)
        };

        let mut text = content.to_string();

        match layout.primary.and_then(|p| p.close_start.map(|c| (p, c))) {
            Some((list, close_start)) => {
                let indent = format!("{}{}", line_indent(content, list.open_start), XML_INDENT);
                let at = line_start(content, close_start);
                if content[at..close_start].trim().is_empty() {
                    text.insert_str(at, &format!("{}{}", render(&indent), newline));
                } else {
                    // closer shares its line with other content
                    let closer_indent = line_indent(content, list.open_start).to_string();
                    text.insert_str(
                        close_start,
                        &format!("{nl}{}{nl}{}", render(&indent), closer_indent, nl = newline),
                    );
                }
            }
            None => {
                let Some(project_close) = layout.project_close else {
                    return Err(ManifestError::corrupt(
                        path,
                        "missing-project-root",
                        "no </project> closing tag to anchor a <dependencies> list",
                    ));
                };
                let entry_indent = format!("{}{}", XML_INDENT, XML_INDENT);
                let block = format!(
                    "{i}<dependencies>{nl}{}{nl}{i}</dependencies>{nl}",
                    render(&entry_indent),
                    i = XML_INDENT,
                    nl = newline
                );
                let at = line_start(content, project_close);
                if content[at..project_close].trim().is_empty() {
                    text.insert_str(at, &block);
                } else {
                    text.insert_str(project_close, &format!("{}{}", newline, block));
                }
            }
        }

        Ok(text)
    }

    fn replace_coordinate(
        &self,
        content: &str,
        from: &DependencyCoordinate,
        to: &DependencyCoordinate,
    ) -> (String, usize) {
        let pattern = format!(
            r"(<{NS}groupId\s*>\s*){}(\s*</{NS}groupId\s*>\s*<{NS}artifactId\s*>\s*){}(\s*</{NS}artifactId\s*>)",
            regex::escape(&from.group),
            regex::escape(&from.artifact),
        );
        let Ok(re) = Regex::new(&pattern) else {
            return (content.to_string(), 0);
        };

        let count = re.find_iter(content).count();
        if count == 0 {
            return (content.to_string(), 0);
        }

        let replacement = format!(
            "${{1}}{}${{2}}{}${{3}}",
            to.group.replace('$', "$$"),
            to.artifact.replace('$', "$$")
        );
        (re.replace_all(content, replacement.as_str()).into_owned(), count)
    }
}
