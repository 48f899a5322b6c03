//! Gradle manifest parser for Java projects
//!
//! Handles:
//! - build.gradle (Groovy DSL)
//! - build.gradle.kts (Kotlin DSL)
//! - Variable definitions (def, val, ext block)
//! - String notation: 'group:name:version' and 'group:name'
//! - Map notation: group: 'x', name: 'y', version: 'z'
//! - Spring Boot version from the plugin block or a springBootVersion variable
//! - Insertion into the top-level dependencies block by brace matching

use super::snippet::{gradle_entry, GRADLE_INDENT};
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

/// Parser for build.gradle and build.gradle.kts files
pub struct GradleParser {
    /// Kotlin DSL syntax for inserted lines
    kotlin: bool,
}

// Variable definition (Groovy): def springBootVersion = '3.2.0' or "3.2.0"
static VAR_DEF_GROOVY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*def\s+(\w+)\s*=\s*['"]([^'"]+)['"]"#).unwrap());

// Variable definition (Kotlin): val springBootVersion = "3.2.0"
static VAR_DEF_KOTLIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*val\s+(\w+)\s*(?::\s*String\s*)?=\s*"([^"]+)""#).unwrap());

// ext block variable: springBootVersion = '3.2.0', or ext.springBootVersion = '3.2.0'
static EXT_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*(?:ext\.)?(\w+)\s*=\s*['"]([^'"]+)['"]"#).unwrap());

// Kotlin extra property: extra["springBootVersion"] = "3.2.0"
static EXTRA_VAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*extra\s*\[\s*"(\w+)"\s*\]\s*=\s*"([^"]+)""#).unwrap()
});

static EXT_BLOCK_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*ext\s*\{").unwrap());

// Map notation: implementation group: 'x', name: 'y', version: 'z' (Kotlin: group = "x", ...)
static DEP_MAP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^\s*(\w+)\s*[\(\s]\s*group\s*[:=]\s*['"]([^'"]+)['"]\s*,\s*name\s*[:=]\s*['"]([^'"]+)['"](?:\s*,\s*version\s*[:=]\s*['"]([^'"]+)['"])?"#,
    )
    .unwrap()
});

// String notation with version: implementation 'group:name:version[:classifier][@ext]'
static DEP_STRING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^\s*(\w+)\s*[\(\s]\s*(?:(?:platform|enforcedPlatform)\s*\(\s*)?['"]([^:'"\s]+):([^:'"\s]+):([^:'"@\s]+)(?:[:@][^'"]*)?['"]"#,
    )
    .unwrap()
});

// String notation without version: implementation 'group:name'
static DEP_STRING_NO_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*(\w+)\s*[\(\s]\s*['"]([^:'"\s]+):([^:'"\s]+)['"]"#).unwrap()
});

static VERSION_VAR_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$\{?(?:project\.|rootProject\.)?(\w+)\}?$").unwrap());

static FRAMEWORK_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"id\s*\(?\s*['"]org\.springframework\.boot['"]\s*\)?\s*version\s*\(?\s*['"]([^'"]+)['"]"#,
        r#"spring-boot['"]\s*\)?\s*version\s*['"]([\d.]+[^'"]*)['"]"#,
        r#"org\.springframework\.boot:spring-boot-gradle-plugin:([^'"\s)]+)"#,
        r#"springBootVersion['"]?\s*\]?\s*=\s*['"]([^'"]+)['"]"#,
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Gradle configurations that declare dependencies
const CONFIGURATIONS: &[&str] = &[
    "implementation",
    "api",
    "compile",
    "compileOnly",
    "runtimeOnly",
    "runtime",
    "annotationProcessor",
    "kapt",
    "developmentOnly",
    "testImplementation",
    "testCompileOnly",
    "testRuntimeOnly",
    "testAnnotationProcessor",
    "testCompile",
];

/// A declaration recognized on one line
#[derive(Debug, Clone, PartialEq, Eq)]
struct Declaration {
    configuration: String,
    group: String,
    artifact: String,
    version: Option<String>,
}

type LineMatcher = fn(&str) -> Option<Declaration>;

fn match_map_notation(line: &str) -> Option<Declaration> {
    let caps = DEP_MAP.captures(line)?;
    Some(Declaration {
        configuration: caps[1].to_string(),
        group: caps[2].to_string(),
        artifact: caps[3].to_string(),
        version: caps.get(4).map(|m| m.as_str().to_string()),
    })
}

fn match_string_notation(line: &str) -> Option<Declaration> {
    let caps = DEP_STRING.captures(line)?;
    Some(Declaration {
        configuration: caps[1].to_string(),
        group: caps[2].to_string(),
        artifact: caps[3].to_string(),
        version: Some(caps[4].to_string()),
    })
}

fn match_unversioned_notation(line: &str) -> Option<Declaration> {
    let caps = DEP_STRING_NO_VERSION.captures(line)?;
    Some(Declaration {
        configuration: caps[1].to_string(),
        group: caps[2].to_string(),
        artifact: caps[3].to_string(),
        version: None,
    })
}

/// Matchers tried in order; the first hit wins for a line
const LINE_MATCHERS: &[(&str, LineMatcher)] = &[
    ("map", match_map_notation),
    ("string", match_string_notation),
    ("string-unversioned", match_unversioned_notation),
];

/// Strips a trailing `//` comment that is not inside a string
fn strip_line_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut prev = '\0';
    for (idx, c) in line.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '\'' || c == '"' => quote = Some(c),
            None if c == '/' && prev == '/' => return &line[..idx - 1],
            None => {}
        }
        prev = c;
    }
    line
}

impl GradleParser {
    /// Parser for Groovy build scripts
    pub fn groovy() -> Self {
        Self { kotlin: false }
    }

    /// Parser for Kotlin build scripts
    pub fn kotlin() -> Self {
        Self { kotlin: true }
    }

    /// Returns true for the Kotlin DSL
    pub fn is_kotlin(&self) -> bool {
        self.kotlin
    }

    /// Extract string variable definitions from content
    fn extract_variables(&self, content: &str) -> HashMap<String, String> {
        let mut variables = HashMap::new();
        let mut in_ext_block = false;
        let mut brace_depth = 0usize;

        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with("//") {
                continue;
            }

            if EXT_BLOCK_START.is_match(trimmed) {
                in_ext_block = !trimmed.contains('}');
                brace_depth = usize::from(in_ext_block);
                continue;
            }

            if in_ext_block {
                brace_depth += trimmed.matches('{').count();
                brace_depth = brace_depth.saturating_sub(trimmed.matches('}').count());
                if brace_depth == 0 {
                    in_ext_block = false;
                    continue;
                }
            }

            let caps = VAR_DEF_GROOVY
                .captures(line)
                .or_else(|| VAR_DEF_KOTLIN.captures(line))
                .or_else(|| EXTRA_VAR.captures(line))
                .or_else(|| {
                    if in_ext_block || trimmed.starts_with("ext.") {
                        EXT_VAR.captures(line)
                    } else {
                        None
                    }
                });

            if let Some(caps) = caps {
                variables.insert(caps[1].to_string(), caps[2].to_string());
            }
        }

        variables
    }

    /// Resolves `$var`, `${var}` and `${project.var}` versions
    fn resolve_version(&self, raw: &str, variables: &HashMap<String, String>) -> String {
        VERSION_VAR_REF
            .captures(raw)
            .and_then(|caps| variables.get(&caps[1]).cloned())
            .unwrap_or_else(|| raw.to_string())
    }

    /// Spring Boot version from the plugin declaration or a version variable
    fn framework_version(&self, content: &str, variables: &HashMap<String, String>) -> Option<String> {
        for line in content.lines() {
            let code = strip_line_comment(line);
            for pattern in FRAMEWORK_PATTERNS.iter() {
                if let Some(caps) = pattern.captures(code) {
                    return Some(self.resolve_version(&caps[1], variables));
                }
            }
        }
        None
    }
}

impl ManifestParser for GradleParser {
    fn parse(&self, content: &str) -> ParsedManifest {
        let variables = self.extract_variables(content);
        let mut dependencies = Vec::new();
        let mut warnings = Vec::new();
        let mut in_block_comment = false;

        for (idx, raw_line) in content.lines().enumerate() {
            let line_number = idx + 1;

            if in_block_comment {
                if raw_line.contains("*/") {
                    in_block_comment = false;
                }
                continue;
            }
            let trimmed = raw_line.trim_start();
            if trimmed.starts_with("/*") {
                in_block_comment = !trimmed.contains("*/");
                continue;
            }

            let line = strip_line_comment(raw_line);
            let keyword = line
                .trim_start()
                .split(|c: char| !c.is_alphanumeric())
                .next()
                .unwrap_or("");
            if !CONFIGURATIONS.contains(&keyword) {
                continue;
            }

            let matched = LINE_MATCHERS
                .iter()
                .find_map(|(name, matcher)| matcher(line).map(|decl| (*name, decl)));

            match matched {
                Some((matcher, decl)) if CONFIGURATIONS.contains(&decl.configuration.as_str()) => {
                    let mut dep = ExistingDependency::new(decl.group, decl.artifact)
                        .with_scope(Scope::from_gradle_configuration(&decl.configuration))
                        .with_line(line_number);
                    if let Some(version) = decl.version {
                        dep = dep.with_version(self.resolve_version(&version, &variables));
                    }
                    tracing::debug!(line = line_number, matcher, dependency = %dep, "gradle dependency");
                    dependencies.push(dep);
                }
                Some(_) => {}
                None => {
                    // project(':x'), files(...), libs.* catalog aliases are not coordinates
                    let quoted = line.contains('\'') || line.contains('"');
                    let non_coordinate = ["project(", "files(", "fileTree(", "libs."]
                        .iter()
                        .any(|p| line.contains(p));
                    if quoted && !non_coordinate {
                        tracing::warn!(line = line_number, "unrecognized dependency declaration");
                        warnings.push(ParseWarning::new(
                            Some(line_number),
                            format!("unrecognized declaration skipped: {}", line.trim()),
                        ));
                    }
                }
            }
        }

        let framework_version = self.framework_version(content, &variables);

        ParsedManifest {
            dependencies,
            framework_version,
            warnings,
        }
    }

    fn build_tool(&self) -> BuildTool {
        BuildTool::Gradle
    }

    fn insert_dependencies(
        &self,
        _path: &Path,
        content: &str,
        additions: &[DependencyRequirement],
    ) -> Result<String, ManifestError> {
        if additions.is_empty() {
            return Ok(content.to_string());
        }

        let newline = if content.contains("\r\n") { "\r\n" } else { "\n" };
        let lines = additions
            .iter()
            .map(|r| gradle_entry(r, GRADLE_INDENT, self.kotlin))
            .collect::<Vec<_>>()
            .join("\n")
            .replace('\n', newline);

        let mut text = content.to_string();

        match find_dependencies_block(content) {
            Some((_, close)) => {
                let at = content[..close].rfind('\n').map(|p| p + 1).unwrap_or(0);
                if content[at..close].trim().is_empty() {
                    text.insert_str(at, &format!("{}{}", lines, newline));
                } else {
                    // `dependencies { ... }` on one line
                    text.insert_str(close, &format!("{nl}{}{nl}", lines, nl = newline));
                }
            }
            None => {
                if !text.is_empty() && !text.ends_with('\n') {
                    text.push_str(newline);
                }
                text.push_str(&format!(
                    "{nl}dependencies {{{nl}{}{nl}}}{nl}",
                    lines,
                    nl = newline
                ));
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
        let string_form = format!(
            r#"(['"]){}:{}([:'"@])"#,
            regex::escape(&from.group),
            regex::escape(&from.artifact)
        );
        let map_form = format!(
            r#"(group\s*[:=]\s*['"]){}(['"]\s*,\s*name\s*[:=]\s*['"]){}(['"])"#,
            regex::escape(&from.group),
            regex::escape(&from.artifact)
        );

        let mut text = content.to_string();
        let mut count = 0;

        if let Ok(re) = Regex::new(&string_form) {
            count += re.find_iter(&text).count();
            let replacement = format!(
                "${{1}}{}:{}${{2}}",
                to.group.replace('$', "$$"),
                to.artifact.replace('$', "$$")
            );
            text = re.replace_all(&text, replacement.as_str()).into_owned();
        }
        if let Ok(re) = Regex::new(&map_form) {
            count += re.find_iter(&text).count();
            let replacement = format!(
                "${{1}}{}${{2}}{}${{3}}",
                to.group.replace('$', "$$"),
                to.artifact.replace('$', "$$")
            );
            text = re.replace_all(&text, replacement.as_str()).into_owned();
        }

        (text, count)
    }
}

/// Finds the top-level `dependencies { ... }` block.
///
/// Returns the byte offsets of its `{` and matching `}`. Blocks nested in
/// `buildscript`, `subprojects` and the like are ignored; braces inside
/// strings and comments are skipped.
pub fn find_dependencies_block(content: &str) -> Option<(usize, usize)> {
    static BLOCK_START: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\bdependencies\s*\{").unwrap());

    let bytes = content.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;
    let mut open: Option<(usize, usize)> = None; // (brace offset, depth inside)

    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = content[i..].find('\n').map(|p| i + p).unwrap_or(bytes.len());
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = content[i + 2..].find("*/").map(|p| i + 2 + p + 2).unwrap_or(bytes.len());
                continue;
            }
            b'"' | b'\'' => {
                let mut j = i + 1;
                while j < bytes.len() && bytes[j] != b {
                    if bytes[j] == b'\\' {
                        j += 1;
                    }
                    j += 1;
                }
                i = j + 1;
                continue;
            }
            b'{' => {
                if depth == 0 && open.is_none() {
                    let line_begin = content[..i].rfind('\n').map(|p| p + 1).unwrap_or(0);
                    let head = &content[line_begin..=i];
                    if BLOCK_START
                        .find(head)
                        .is_some_and(|m| m.end() == head.len())
                    {
                        open = Some((i, depth + 1));
                    }
                }
                depth += 1;
            }
            b'}' => {
                if let Some((brace, inner_depth)) = open {
                    if depth == inner_depth {
                        return Some((brace, i));
                    }
                }
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
        i += 1;
    }

    None
}
