//! Line diff between an expected and an actual rendering.
//!
//! Uses the `similar` crate with its LCS algorithm and groups changes into
//! hunks carrying three lines of context.

use similar::{Algorithm, ChangeTag, TextDiff};

const CONTEXT_LINES: usize = 3;
const HEADER: &str = "--- Expected\n+++ Actual\n";
const HUNK_MARKER: &str = "@@ @@\n";

/// The result of diffing two renderings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineDiff {
    pub hunks: Vec<DiffHunk>,
    /// Total number of lines in the expected text.
    pub old_lines: usize,
    /// Total number of lines in the actual text.
    pub new_lines: usize,
}

impl LineDiff {
    /// Returns `true` if the two texts are identical.
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    pub fn additions(&self) -> usize {
        self.lines()
            .filter(|l| matches!(l, DiffLine::Added(_)))
            .count()
    }

    pub fn deletions(&self) -> usize {
        self.lines()
            .filter(|l| matches!(l, DiffLine::Removed(_)))
            .count()
    }

    pub fn stats(&self) -> DiffStats {
        DiffStats {
            added: self.additions(),
            removed: self.deletions(),
        }
    }

    /// Render as unified text. Empty when there are no hunks.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let mut out = String::from(HEADER);
        for hunk in &self.hunks {
            out.push_str(HUNK_MARKER);
            for line in &hunk.lines {
                let (prefix, text) = match line {
                    DiffLine::Context(text) => (' ', text),
                    DiffLine::Added(text) => ('+', text),
                    DiffLine::Removed(text) => ('-', text),
                };
                out.push(prefix);
                out.push_str(text);
                out.push('\n');
            }
        }
        out
    }

    fn lines(&self) -> impl Iterator<Item = &DiffLine> {
        self.hunks.iter().flat_map(|h| &h.lines)
    }
}

/// Added and removed line counts of a diff.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
}

/// A contiguous region of changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffHunk {
    /// 1-based start line in the expected text.
    pub old_start: usize,
    pub old_count: usize,
    /// 1-based start line in the actual text.
    pub new_start: usize,
    pub new_count: usize,
    pub lines: Vec<DiffLine>,
}

/// A single line in a hunk, without its trailing newline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffLine {
    Context(String),
    Added(String),
    Removed(String),
}

/// Compute the line diff of `expected` against `actual`.
pub fn diff_lines(expected: &str, actual: &str) -> LineDiff {
    let old_lines = expected.lines().count();
    let new_lines = actual.lines().count();

    if expected == actual {
        return LineDiff {
            hunks: Vec::new(),
            old_lines,
            new_lines,
        };
    }

    let text_diff = TextDiff::configure()
        .algorithm(Algorithm::Lcs)
        .diff_lines(expected, actual);

    let mut hunks = Vec::new();
    for group in text_diff.grouped_ops(CONTEXT_LINES) {
        let Some(first) = group.first() else {
            continue;
        };
        let mut hunk = DiffHunk {
            old_start: first.old_range().start + 1,
            old_count: 0,
            new_start: first.new_range().start + 1,
            new_count: 0,
            lines: Vec::new(),
        };

        for op in &group {
            for change in text_diff.iter_changes(op) {
                let text = change
                    .value()
                    .trim_end_matches('\n')
                    .trim_end_matches('\r')
                    .to_string();
                match change.tag() {
                    ChangeTag::Equal => {
                        hunk.lines.push(DiffLine::Context(text));
                        hunk.old_count += 1;
                        hunk.new_count += 1;
                    }
                    ChangeTag::Delete => {
                        hunk.lines.push(DiffLine::Removed(text));
                        hunk.old_count += 1;
                    }
                    ChangeTag::Insert => {
                        hunk.lines.push(DiffLine::Added(text));
                        hunk.new_count += 1;
                    }
                }
            }
        }
        hunks.push(hunk);
    }

    LineDiff {
        hunks,
        old_lines,
        new_lines,
    }
}

/// Unified diff text of `expected` against `actual`; empty when identical.
pub fn unified_diff(expected: &str, actual: &str) -> String {
    diff_lines(expected, actual).render()
}
