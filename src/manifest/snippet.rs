//! Declaration text for catalog requirements in each manifest syntax

use crate::domain::{BuildTool, DependencyRequirement, Scope};

/// Marker identifying engine-authored regions in a pom.xml
pub const MARKER: &str = "DBJavaGenix auto-added dependency";

/// One indentation level in pom.xml
pub const XML_INDENT: &str = "    ";

/// Indentation of inserted Gradle lines
pub const GRADLE_INDENT: &str = "  ";

/// Declaration syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetStyle {
    Maven,
    GradleGroovy,
    GradleKotlin,
}

impl SnippetStyle {
    /// Style for a build tool; Kotlin DSL must be asked for explicitly
    pub fn for_build_tool(tool: BuildTool, kotlin_dsl: bool) -> Self {
        match (tool, kotlin_dsl) {
            (BuildTool::Maven, _) => SnippetStyle::Maven,
            (BuildTool::Gradle, false) => SnippetStyle::GradleGroovy,
            (BuildTool::Gradle, true) => SnippetStyle::GradleKotlin,
        }
    }

    /// Renders a standalone snippet; Maven blocks sit one list level deep
    pub fn render(&self, requirement: &DependencyRequirement) -> String {
        match self {
            SnippetStyle::Maven => maven_entry(requirement, XML_INDENT),
            SnippetStyle::GradleGroovy => gradle_entry(requirement, "", false),
            SnippetStyle::GradleKotlin => gradle_entry(requirement, "", true),
        }
    }
}

/// The `description: reason` text used in entry comments
fn comment_text(requirement: &DependencyRequirement) -> String {
    if requirement.reason.is_empty() {
        requirement.description.clone()
    } else {
        format!("{}: {}", requirement.description, requirement.reason)
    }
}

/// A commented `<dependency>` block, every line prefixed with `indent`
pub fn maven_entry(requirement: &DependencyRequirement, indent: &str) -> String {
    let inner = format!("{}{}", indent, XML_INDENT);
    let mut lines = vec![
        format!("{}<!-- {} -->", indent, comment_text(requirement)),
        format!("{}<dependency>", indent),
        format!("{}<groupId>{}</groupId>", inner, requirement.coordinate.group),
        format!("{}<artifactId>{}</artifactId>", inner, requirement.coordinate.artifact),
        format!("{}<version>{}</version>", inner, requirement.version),
    ];
    if requirement.scope != Scope::Compile {
        lines.push(format!("{}<scope>{}</scope>", inner, requirement.scope));
    }
    lines.push(format!("{}</dependency>", indent));
    lines.join("\n")
}

/// A `//` comment line plus the declaration line
pub fn gradle_entry(requirement: &DependencyRequirement, indent: &str, kotlin: bool) -> String {
    let keyword = requirement.scope.gradle_keyword();
    let declaration = if kotlin {
        format!("{}(\"{}\")", keyword, requirement.gav())
    } else {
        format!("{} '{}'", keyword, requirement.gav())
    };
    format!(
        "{}// {}\n{}{}",
        indent,
        comment_text(requirement),
        indent,
        declaration
    )
}
