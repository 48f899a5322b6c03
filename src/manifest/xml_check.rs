//! Lightweight XML tokenizer and well-formedness check
//!
//! Only what pom.xml editing needs: element open/close/self-closing tags with
//! byte offsets, skipping comments, CDATA, processing instructions and
//! DOCTYPE declarations. No entity or namespace resolution.

use regex::Regex;
use std::sync::LazyLock;

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.\-]*(?::[A-Za-z_][A-Za-z0-9_.\-]*)?$").unwrap());

/// Kind of element tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Open,
    Close,
    SelfClosing,
}

/// One element tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub kind: TagKind,
    /// Qualified name as written (may carry a namespace prefix)
    pub name: String,
    /// Byte offset of `<`
    pub start: usize,
    /// Byte offset just past `>`
    pub end: usize,
}

/// First problem found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlIssue {
    /// 1-based line
    pub line: usize,
    pub message: String,
}

impl std::fmt::Display for XmlIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Replaces comments with spaces, keeping byte offsets and line breaks intact
pub fn blank_comments(content: &str) -> String {
    static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
    COMMENT
        .replace_all(content, |caps: &regex::Captures| {
            let mut blank = String::with_capacity(caps[0].len());
            for c in caps[0].chars() {
                if c == '\n' {
                    blank.push('\n');
                } else {
                    // keep the byte length for multi-byte characters
                    blank.push_str(&" ".repeat(c.len_utf8()));
                }
            }
            blank
        })
        .into_owned()
}

/// Returns the 1-based line number of a byte offset
pub fn line_of(content: &str, offset: usize) -> usize {
    content[..offset.min(content.len())].matches('\n').count() + 1
}

/// Tokenizes element tags, failing on the first lexical problem
pub fn tokenize(content: &str) -> Result<Vec<Tag>, XmlIssue> {
    let bytes = content.as_bytes();
    let mut tags = Vec::new();
    let mut i = 0;

    let issue = |offset: usize, message: String| XmlIssue {
        line: line_of(content, offset),
        message,
    };

    while let Some(rel) = content[i..].find('<') {
        let start = i + rel;
        let rest = &content[start..];

        let skip_to = |terminator: &str, what: &str| -> Result<usize, XmlIssue> {
            rest.find(terminator)
                .map(|p| start + p + terminator.len())
                .ok_or_else(|| issue(start, format!("unterminated {}", what)))
        };

        if rest.starts_with("<!--") {
            i = skip_to("-->", "comment")?;
            continue;
        }
        if rest.starts_with("<![CDATA[") {
            i = skip_to("]]>", "CDATA section")?;
            continue;
        }
        if rest.starts_with("<?") {
            i = skip_to("?>", "processing instruction")?;
            continue;
        }
        if rest.starts_with("<!") {
            i = skip_to(">", "declaration")?;
            continue;
        }

        // Find the closing '>' outside quoted attribute values
        let mut quote: Option<u8> = None;
        let mut end = None;
        for (offset, &b) in bytes[start + 1..].iter().enumerate() {
            match (quote, b) {
                (Some(q), _) if b == q => quote = None,
                (Some(_), _) => {}
                (None, b'"') | (None, b'\'') => quote = Some(b),
                (None, b'>') => {
                    end = Some(start + 1 + offset);
                    break;
                }
                (None, b'<') => {
                    return Err(issue(start, "incomplete tag".to_string()));
                }
                _ => {}
            }
        }
        let end = end.ok_or_else(|| issue(start, "unterminated tag".to_string()))?;

        let inner = &content[start + 1..end];
        let (kind, body) = if let Some(body) = inner.strip_prefix('/') {
            (TagKind::Close, body)
        } else if let Some(body) = inner.strip_suffix('/') {
            (TagKind::SelfClosing, body)
        } else {
            (TagKind::Open, inner)
        };

        let name = body.split_whitespace().next().unwrap_or("");
        if body.starts_with(char::is_whitespace) || !NAME.is_match(name) {
            return Err(issue(start, format!("invalid tag <{}>", inner.trim())));
        }
        if kind == TagKind::Close && body.trim() != name {
            return Err(issue(start, format!("invalid closing tag </{}>", body.trim())));
        }

        tags.push(Tag {
            kind,
            name: name.to_string(),
            start,
            end: end + 1,
        });
        i = end + 1;
    }

    Ok(tags)
}

/// Checks that a document has one root and properly nested elements
pub fn check_well_formed(content: &str) -> Result<(), XmlIssue> {
    let tags = tokenize(content)?;
    let issue = |offset: usize, message: String| XmlIssue {
        line: line_of(content, offset),
        message,
    };

    let mut stack: Vec<&Tag> = Vec::new();
    let mut root_closed = false;
    let mut seen_root = false;

    for tag in &tags {
        if root_closed {
            return Err(issue(tag.start, format!("content after root element: <{}>", tag.name)));
        }
        match tag.kind {
            TagKind::Open => {
                seen_root = true;
                stack.push(tag);
            }
            TagKind::SelfClosing => {
                if stack.is_empty() {
                    if seen_root {
                        return Err(issue(tag.start, "multiple root elements".to_string()));
                    }
                    seen_root = true;
                    root_closed = true;
                }
            }
            TagKind::Close => match stack.pop() {
                Some(open) if open.name == tag.name => {
                    if stack.is_empty() {
                        root_closed = true;
                    }
                }
                Some(open) => {
                    return Err(issue(
                        tag.start,
                        format!("</{}> closes <{}> (line {})", tag.name, open.name, line_of(content, open.start)),
                    ));
                }
                None => {
                    return Err(issue(tag.start, format!("unexpected </{}>", tag.name)));
                }
            },
        }
    }

    if let Some(open) = stack.last() {
        return Err(issue(open.start, format!("<{}> is never closed", open.name)));
    }
    if !seen_root {
        return Err(XmlIssue {
            line: 1,
            message: "no root element".to_string(),
        });
    }

    // Text outside the root element; a leading byte-order mark is not text
    let first = tags.first().map(|t| t.start).unwrap_or(0);
    let last = tags.last().map(|t| t.end).unwrap_or(0);
    let prolog = &content[..first];
    let prolog = prolog.strip_prefix('\u{feff}').unwrap_or(prolog);
    let outside = strip_markup(prolog) + &strip_markup(&content[last..]);
    if !outside.trim().is_empty() {
        return Err(issue(last, "text outside the root element".to_string()));
    }

    Ok(())
}

/// Removes comments, PIs and declarations from prolog/epilog text
fn strip_markup(text: &str) -> String {
    static MARKUP: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->|<\?.*?\?>|<![^>]*>").unwrap());
    MARKUP.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- header -->
<project xmlns="http://maven.apache.org/POM/4.0.0" attr="a>b">
    <dependencies>
        <dependency>
            <groupId>g</groupId>
            <artifactId>a</artifactId>
            <optional/>
        </dependency>
    </dependencies>
    <description><![CDATA[ <not a tag> ]]></description>
</project>
"#;

    #[test]
    fn test_well_formed_pom() {
        assert_eq!(check_well_formed(POM), Ok(()));
    }

    #[test]
    fn test_tokenize_offsets_and_kinds() {
        let tags = tokenize(POM).unwrap();
        assert_eq!(tags[0].name, "project");
        assert_eq!(tags[0].kind, TagKind::Open);
        assert!(tags.iter().any(|t| t.kind == TagKind::SelfClosing && t.name == "optional"));
        let dep = tags.iter().find(|t| t.name == "dependency").unwrap();
        assert_eq!(&POM[dep.start..dep.end], "<dependency>");
    }

    #[test]
    fn test_missing_close_is_reported() {
        let xml = "<project>\n  <dependencies>\n    <dependency></dependency>\n</project>\n";
        let err = check_well_formed(xml).unwrap_err();
        assert!(err.message.contains("</project> closes <dependencies>"));
        assert_eq!(err.line, 4);
    }

    #[test]
    fn test_dangling_fragment_is_reported() {
        let xml = "<project>\n    </\n</project>\n";
        assert!(check_well_formed(xml).is_err());
        let xml = "<project>\n    <\n</project>\n";
        assert!(check_well_formed(xml).is_err());
    }

    #[test]
    fn test_multiple_roots() {
        assert!(check_well_formed("<a></a><b></b>").is_err());
    }

    #[test]
    fn test_text_after_root() {
        assert!(check_well_formed("<a></a>trailing").is_err());
        assert!(check_well_formed("<a></a>\n<!-- ok -->\n").is_ok());
    }

    #[test]
    fn test_blank_comments_keeps_offsets() {
        let xml = "<a><!-- x\ny 依赖 --><b/></a>";
        let blanked = blank_comments(xml);
        assert_eq!(blanked.len(), xml.len());
        assert_eq!(blanked.find("<b/>"), xml.find("<b/>"));
        assert!(!blanked.contains("x"));
        assert_eq!(blanked.matches('\n').count(), 1);
    }

    #[test]
    fn test_byte_order_mark_before_prolog() {
        let with_bom = format!("\u{feff}{}", POM);
        assert_eq!(check_well_formed(&with_bom), Ok(()));
        assert!(check_well_formed("\u{feff}<a></a>").is_ok());
        // only a leading mark is tolerated
        assert!(check_well_formed("<a></a>\u{feff}").is_err());
    }
}
