//! Diff output formatter for showing changes
//!
//! This module provides:
//! - Unified diff of each manifest's before/after text (written or, in
//!   dry-run, planned)
//! - `#` comment lines for runs that have nothing to diff

use crate::domain::{HealthReport, MigrationGuide, ReconciliationResult};
use crate::output::OutputFormatter;
use std::io::Write;

/// Unchanged lines shown around each change
const CONTEXT: usize = 2;

/// Diff formatter for showing manifest changes
pub struct DiffFormatter {
    /// Whether this is a dry-run
    dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op<'a> {
    Keep(&'a str),
    Remove(&'a str),
    Add(&'a str),
}

impl DiffFormatter {
    /// Create a new diff formatter
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Get the dry-run prefix if applicable
    fn dry_run_prefix(&self) -> &'static str {
        if self.dry_run {
            "(dry-run) "
        } else {
            ""
        }
    }
}

/// Line diff: common prefix and suffix are trimmed, the middle aligned by LCS
fn diff_lines<'a>(old: &[&'a str], new: &[&'a str]) -> Vec<Op<'a>> {
    let prefix = old.iter().zip(new).take_while(|(a, b)| a == b).count();
    let suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();
    let a = &old[prefix..old.len() - suffix];
    let b = &new[prefix..new.len() - suffix];

    let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for i in (0..a.len()).rev() {
        for j in (0..b.len()).rev() {
            table[i][j] = if a[i] == b[j] {
                table[i + 1][j + 1] + 1
            } else {
                table[i + 1][j].max(table[i][j + 1])
            };
        }
    }

    let mut ops: Vec<Op<'a>> = old[..prefix].iter().map(|l| Op::Keep(l)).collect();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            ops.push(Op::Keep(a[i]));
            i += 1;
            j += 1;
        } else if table[i + 1][j] >= table[i][j + 1] {
            ops.push(Op::Remove(a[i]));
            i += 1;
        } else {
            ops.push(Op::Add(b[j]));
            j += 1;
        }
    }
    ops.extend(a[i..].iter().map(|l| Op::Remove(l)));
    ops.extend(b[j..].iter().map(|l| Op::Add(l)));
    ops.extend(old[old.len() - suffix..].iter().map(|l| Op::Keep(l)));
    ops
}

/// Unified-diff hunks for two texts
fn unified_hunks(original: &str, updated: &str) -> Vec<String> {
    let old: Vec<&str> = original.lines().collect();
    let new: Vec<&str> = updated.lines().collect();
    let ops = diff_lines(&old, &new);

    // line positions before each op
    let mut positions = Vec::with_capacity(ops.len() + 1);
    let (mut o, mut n) = (0usize, 0usize);
    for op in &ops {
        positions.push((o, n));
        match op {
            Op::Keep(_) => {
                o += 1;
                n += 1;
            }
            Op::Remove(_) => o += 1,
            Op::Add(_) => n += 1,
        }
    }
    positions.push((o, n));

    let changes: Vec<usize> = ops
        .iter()
        .enumerate()
        .filter(|(_, op)| !matches!(op, Op::Keep(_)))
        .map(|(i, _)| i)
        .collect();

    let mut groups: Vec<(usize, usize)> = Vec::new();
    for &idx in &changes {
        match groups.last_mut() {
            Some((_, last)) if idx - *last <= 2 * CONTEXT + 1 => *last = idx,
            _ => groups.push((idx, idx)),
        }
    }

    groups
        .into_iter()
        .map(|(first, last)| {
            let start = first.saturating_sub(CONTEXT);
            let end = (last + CONTEXT + 1).min(ops.len());
            let (old_start, new_start) = positions[start];
            let (old_end, new_end) = positions[end];

            let mut hunk = format!(
                "@@ -{},{} +{},{} @@",
                old_start + 1,
                old_end - old_start,
                new_start + 1,
                new_end - new_start
            );
            for op in &ops[start..end] {
                hunk.push('\n');
                match op {
                    Op::Keep(line) => hunk.push_str(&format!(" {}", line)),
                    Op::Remove(line) => hunk.push_str(&format!("-{}", line)),
                    Op::Add(line) => hunk.push_str(&format!("+{}", line)),
                }
            }
            hunk
        })
        .collect()
}

impl OutputFormatter for DiffFormatter {
    fn format_reconciliation(
        &self,
        result: &ReconciliationResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let prefix = self.dry_run_prefix();

        if let Some(ref change) = result.change {
            writeln!(writer, "--- a/{}", change.path.display())?;
            writeln!(writer, "+++ b/{}", change.path.display())?;
            for hunk in unified_hunks(&change.original, &change.updated) {
                writeln!(writer, "{}", hunk)?;
            }
        }

        let verb = if self.dry_run { "would be" } else { "were" };
        writeln!(
            writer,
            "{}# {}: {} dependency(ies) {} added, {} deprecated coordinate(s) {} fixed",
            prefix,
            result.project_root.display(),
            result.dependencies_added,
            verb,
            result.deprecated_fixed,
            verb
        )?;
        for error in &result.errors {
            writeln!(writer, "# error: {}", error)?;
        }
        Ok(())
    }

    fn format_health(&self, report: &HealthReport, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(
            writer,
            "# {}: health {}/100, {} missing, {} outdated, {} deprecated",
            report.project_root.display(),
            report.score,
            report.missing,
            report.outdated,
            report.deprecated
        )
    }

    fn format_migration(
        &self,
        guide: &MigrationGuide,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        for item in &guide.items {
            writeln!(writer, "# [{}] {} -> {}", item.priority, item.coordinate, item.target.gav())?;
        }
        writeln!(
            writer,
            "# {}: {} deprecated dependency(ies)",
            guide.project_root.display(),
            guide.items.len()
        )
    }
}
