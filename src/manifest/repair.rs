//! pom.xml malformation heuristics and bounded repair
//!
//! Handles:
//! - Dangling `<` / `</` fragments left on their own line
//! - Incomplete tags (`< groupId` without a closing `>`)
//! - A `<dependencies>` list that is opened but never closed
//! - `<dependency>` blocks outside any `<dependencies>` list
//! - Repeated engine marker comments

use super::snippet::{MARKER, XML_INDENT};
use super::xml_check::{blank_comments, check_well_formed, line_of, TagKind, XmlIssue};
use crate::domain::ManifestStatus;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static LAYOUT_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"<(/?)(?:[A-Za-z_][\w.\-]*:)?(project|dependencies|dependency|dependencyManagement|build|plugins|plugin|profiles|profile|reporting)(\s[^<>]*)?/?>",
    )
    .unwrap()
});

static INCOMPLETE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<\s+[^>]*$|</\s+$").unwrap());

static DUPLICATE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    let marker = format!(r"[ \t]*<!--\s*{}\s*-->[ \t]*\r?\n", regex::escape(MARKER));
    Regex::new(&format!(r"(?m)^({m})(?:{m})+", m = marker)).unwrap()
});

/// A detected structural defect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Malformation {
    /// A line holding only `<`
    DanglingOpenTag { line: usize },
    /// A line holding only `</`
    DanglingCloseTag { line: usize },
    /// A tag that never reaches its `>`
    IncompleteTag { line: usize },
    /// `<dependencies>` without `</dependencies>`
    UnclosedDependencies { line: usize },
    /// `<dependency>` outside any list
    OrphanedDependency { line: usize },
}

impl Malformation {
    /// Name of the heuristic that found the defect
    pub fn heuristic(&self) -> &'static str {
        match self {
            Malformation::DanglingOpenTag { .. } => "dangling-open-tag",
            Malformation::DanglingCloseTag { .. } => "dangling-close-tag",
            Malformation::IncompleteTag { .. } => "incomplete-tag",
            Malformation::UnclosedDependencies { .. } => "unclosed-dependencies",
            Malformation::OrphanedDependency { .. } => "orphaned-dependency",
        }
    }

    /// Line the defect was found on
    pub fn line(&self) -> usize {
        match self {
            Malformation::DanglingOpenTag { line }
            | Malformation::DanglingCloseTag { line }
            | Malformation::IncompleteTag { line }
            | Malformation::UnclosedDependencies { line }
            | Malformation::OrphanedDependency { line } => *line,
        }
    }

    /// Returns true if the repair pass knows how to fix this defect
    pub fn is_repairable(&self) -> bool {
        !matches!(self, Malformation::IncompleteTag { .. })
    }
}

impl fmt::Display for Malformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}", self.heuristic(), self.line())
    }
}

/// A `<dependencies>` list located in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSpan {
    /// Offset of `<dependencies`
    pub open_start: usize,
    /// Offset just past the opening tag
    pub open_end: usize,
    /// Offset of `</dependencies>`, if the list is closed
    pub close_start: Option<usize>,
    /// Written as `<dependencies/>`
    pub self_closing: bool,
}

/// Where the dependency-relevant elements of a pom.xml are
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PomLayout {
    /// The project-level `<dependencies>` list
    pub primary: Option<ListSpan>,
    /// Offset of `</project>`
    pub project_close: Option<usize>,
    /// Lists that are never closed
    pub unclosed: Vec<ListSpan>,
    /// `(start, end)` of `<dependency>` blocks outside any list
    pub orphans: Vec<(usize, usize)>,
}

#[derive(Debug)]
struct LayoutEvent {
    kind: TagKind,
    name: String,
    start: usize,
    end: usize,
}

struct Frame {
    name: String,
    list: Option<usize>,
    orphan_start: Option<usize>,
}

fn layout_events(content: &str) -> Vec<LayoutEvent> {
    let blanked = blank_comments(content);
    LAYOUT_TAG
        .captures_iter(&blanked)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let kind = if !caps[1].is_empty() {
                TagKind::Close
            } else if whole.as_str().ends_with("/>") {
                TagKind::SelfClosing
            } else {
                TagKind::Open
            };
            Some(LayoutEvent {
                kind,
                name: caps[2].to_string(),
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}

/// Locates dependency lists, orphans and the root closer; tolerant of malformed input
pub fn scan_layout(content: &str) -> PomLayout {
    let events = layout_events(content);
    let mut lists: Vec<ListSpan> = Vec::new();
    let mut layout = PomLayout::default();
    let mut stack: Vec<Frame> = Vec::new();

    for event in &events {
        match event.kind {
            TagKind::SelfClosing => {
                let parent_is_project = stack.last().is_some_and(|f| f.name == "project");
                if event.name == "dependencies" && parent_is_project && layout.primary.is_none() {
                    layout.primary = Some(ListSpan {
                        open_start: event.start,
                        open_end: event.end,
                        close_start: None,
                        self_closing: true,
                    });
                }
            }
            TagKind::Open => {
                let mut frame = Frame {
                    name: event.name.clone(),
                    list: None,
                    orphan_start: None,
                };
                if event.name == "dependencies" {
                    let parent_is_project = stack.last().is_some_and(|f| f.name == "project");
                    lists.push(ListSpan {
                        open_start: event.start,
                        open_end: event.end,
                        close_start: None,
                        self_closing: false,
                    });
                    frame.list = Some(lists.len() - 1);
                    if parent_is_project && layout.primary.is_none() {
                        layout.primary = Some(lists[lists.len() - 1]);
                    }
                } else if event.name == "dependency"
                    && !stack.iter().any(|f| f.name == "dependencies")
                {
                    frame.orphan_start = Some(event.start);
                }
                stack.push(frame);
            }
            TagKind::Close => {
                let Some(pos) = stack.iter().rposition(|f| f.name == event.name) else {
                    continue;
                };
                // Anything opened above the matching frame was never closed
                for frame in stack.drain(pos + 1..) {
                    if let Some(idx) = frame.list {
                        layout.unclosed.push(lists[idx]);
                    }
                }
                if let Some(frame) = stack.pop() {
                    if let Some(idx) = frame.list {
                        lists[idx].close_start = Some(event.start);
                        if layout.primary.is_some_and(|p| p.open_start == lists[idx].open_start) {
                            layout.primary = Some(lists[idx]);
                        }
                    }
                    if let Some(start) = frame.orphan_start {
                        layout.orphans.push((start, event.end));
                    }
                }
                if event.name == "project" {
                    layout.project_close = Some(event.start);
                }
            }
        }
    }

    for frame in stack {
        if let Some(idx) = frame.list {
            layout.unclosed.push(lists[idx]);
        }
    }
    if layout
        .primary
        .is_some_and(|p| layout.unclosed.iter().any(|u| u.open_start == p.open_start))
    {
        layout.primary = None;
    }
    layout.unclosed.sort_by_key(|span| span.open_start);

    layout
}

/// Runs every heuristic against a document
pub fn detect(content: &str) -> Vec<Malformation> {
    let mut found = Vec::new();
    let blanked = blank_comments(content);

    for (idx, line) in blanked.lines().enumerate() {
        let line_no = idx + 1;
        match line.trim() {
            "<" => found.push(Malformation::DanglingOpenTag { line: line_no }),
            "</" => found.push(Malformation::DanglingCloseTag { line: line_no }),
            _ if INCOMPLETE_TAG.is_match(line) => {
                found.push(Malformation::IncompleteTag { line: line_no })
            }
            _ => {}
        }
    }

    let layout = scan_layout(content);
    for span in &layout.unclosed {
        found.push(Malformation::UnclosedDependencies {
            line: line_of(content, span.open_start),
        });
    }
    for (start, _) in &layout.orphans {
        found.push(Malformation::OrphanedDependency {
            line: line_of(content, *start),
        });
    }

    found
}

/// Result of the repair pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairOutcome {
    /// Repaired document
    pub content: String,
    /// Defects that were fixed
    pub repaired: Vec<Malformation>,
    /// Defects left in place
    pub remaining: Vec<Malformation>,
}

/// Applies the bounded repair: strips dangling fragments, closes open lists,
/// moves orphaned entries into the project-level list, collapses repeated markers
pub fn repair(content: &str) -> RepairOutcome {
    let detected = detect(content);
    let (fixable, remaining): (Vec<_>, Vec<_>) =
        detected.into_iter().partition(|m| m.is_repairable());

    let mut text = strip_dangling_lines(content);
    text = DUPLICATE_MARKER.replace_all(&text, "$1").into_owned();
    text = close_unclosed_lists(&text);
    text = merge_orphans(&text);

    RepairOutcome {
        content: text,
        repaired: fixable,
        remaining,
    }
}

/// Classifies a document for the pre-generation gate
pub fn diagnose(content: &str) -> ManifestStatus {
    let detected = detect(content);
    if detected.is_empty() {
        return match check_well_formed(content) {
            Ok(()) => ManifestStatus::Healthy,
            Err(issue) => corrupt_status("not-well-formed", &issue),
        };
    }

    let outcome = repair(content);
    if let Some(first) = outcome.remaining.first() {
        return ManifestStatus::Corrupt {
            heuristic: first.heuristic().to_string(),
            message: first.to_string(),
        };
    }
    match check_well_formed(&outcome.content) {
        Ok(()) => ManifestStatus::Repairable {
            heuristics: outcome
                .repaired
                .iter()
                .map(|m| m.heuristic().to_string())
                .collect(),
        },
        Err(issue) => corrupt_status("not-well-formed", &issue),
    }
}

fn corrupt_status(heuristic: &str, issue: &XmlIssue) -> ManifestStatus {
    ManifestStatus::Corrupt {
        heuristic: heuristic.to_string(),
        message: issue.to_string(),
    }
}

fn strip_dangling_lines(content: &str) -> String {
    content
        .split_inclusive('\n')
        .filter(|line| !matches!(line.trim(), "<" | "</"))
        .collect()
}

/// Line ending used by the document
pub fn document_newline(content: &str) -> &'static str {
    if content.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

/// Offset of the first character of the line containing `offset`
pub fn line_start(content: &str, offset: usize) -> usize {
    content[..offset].rfind('\n').map(|p| p + 1).unwrap_or(0)
}

/// Leading whitespace of the line containing `offset`
pub fn line_indent(content: &str, offset: usize) -> &str {
    let start = line_start(content, offset);
    let line = &content[start..];
    let width = line.len() - line.trim_start_matches([' ', '\t']).len();
    &line[..width]
}

/// Rewrites a project-level `<dependencies/>` as an empty open/close pair
pub fn expand_empty_list(content: &str) -> String {
    let Some(list) = scan_layout(content).primary.filter(|p| p.self_closing) else {
        return content.to_string();
    };

    let tag = &content[list.open_start..list.open_end];
    let name_end = tag[1..]
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .map(|p| p + 1)
        .unwrap_or(tag.len());
    let name = &tag[1..name_end];
    let open = tag.trim_end_matches('>').trim_end_matches('/').trim_end();
    let indent = line_indent(content, list.open_start);

    let mut text = content.to_string();
    text.replace_range(
        list.open_start..list.open_end,
        &format!("{}>{}{}</{}>", open, document_newline(content), indent, name),
    );
    text
}

fn close_unclosed_lists(content: &str) -> String {
    let layout = scan_layout(content);
    if layout.unclosed.is_empty() {
        return content.to_string();
    }

    let newline = document_newline(content);
    let events = layout_events(content);
    let mut text = content.to_string();

    // Back to front so earlier offsets stay valid
    for span in layout.unclosed.iter().rev() {
        let bound = events
            .iter()
            .filter(|e| e.start >= span.open_end && e.name != "dependency")
            .map(|e| e.start)
            .next()
            .unwrap_or(content.len());

        let insert_at = events
            .iter()
            .filter(|e| {
                e.kind == TagKind::Close
                    && e.name == "dependency"
                    && e.start >= span.open_end
                    && e.end <= bound
            })
            .map(|e| e.end)
            .last()
            .unwrap_or(span.open_end);

        let indent = line_indent(content, span.open_start).to_string();
        tracing::warn!(
            line = line_of(content, span.open_start),
            "closing unterminated <dependencies> list"
        );
        text.insert_str(insert_at, &format!("{}{}</dependencies>", newline, indent));
    }

    text
}

/// Re-indents a block so its least-indented line starts at `indent`
pub fn reindent(block: &str, indent: &str) -> String {
    let min = block
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    block
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| format!("{}{}", indent, &l[min.min(l.len() - l.trim_start().len())..]))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extends an orphan's span back over its line indentation and a directly
/// preceding comment
fn orphan_span(content: &str, start: usize, end: usize) -> (usize, usize) {
    let mut from = line_start(content, start);
    if !content[from..start].trim().is_empty() {
        from = start;
    }

    let before = content[..from].trim_end();
    if before.ends_with("-->") {
        if let Some(comment_start) = before.rfind("<!--") {
            let comment_line = line_start(content, comment_start);
            if content[comment_line..comment_start].trim().is_empty() {
                from = comment_line;
            }
        }
    }

    let mut to = end;
    let rest = &content[end..];
    let trailing = rest.len() - rest.trim_start_matches([' ', '\t', '\r']).len();
    if rest[trailing..].starts_with('\n') {
        to = end + trailing + 1;
    }

    (from, to)
}

fn merge_orphans(content: &str) -> String {
    let layout = scan_layout(content);
    if layout.orphans.is_empty() {
        return content.to_string();
    }

    let newline = document_newline(content);
    let mut text = content.to_string();
    let mut blocks = Vec::new();
    for &(start, end) in layout.orphans.iter().rev() {
        let (from, to) = orphan_span(content, start, end);
        blocks.push(content[from..to].to_string());
        text.replace_range(from..to, "");
    }
    blocks.reverse();
    tracing::warn!(count = blocks.len(), "moving orphaned <dependency> blocks into <dependencies>");

    text = expand_empty_list(&text);
    let layout = scan_layout(&text);
    match layout.primary.and_then(|p| p.close_start.map(|c| (p, c))) {
        Some((list, close_start)) => {
            let indent = format!("{}{}", line_indent(&text, list.open_start), XML_INDENT);
            let body: Vec<String> = blocks.iter().map(|b| reindent(b, &indent)).collect();
            let body = body.join("\n").replace('\n', newline);
            let at = line_start(&text, close_start);
            if text[at..close_start].trim().is_empty() {
                text.insert_str(at, &format!("{}{}", body, newline));
            } else {
                text.insert_str(close_start, &format!("{nl}{}{nl}", body, nl = newline));
            }
        }
        None => {
            let Some(project_close) = layout.project_close else {
                return content.to_string();
            };
            let entry_indent = format!("{}{}", XML_INDENT, XML_INDENT);
            let body: Vec<String> = blocks.iter().map(|b| reindent(b, &entry_indent)).collect();
            let list = format!(
                "{i}<dependencies>\n{}\n{i}</dependencies>\n",
                body.join("\n"),
                i = XML_INDENT
            )
            .replace('\n', newline);
            let at = line_start(&text, project_close);
            text.insert_str(at, &list);
        }
    }

    text
}
