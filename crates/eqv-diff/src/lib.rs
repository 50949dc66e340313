//! String differ for eqv.
//!
//! Renders the line-based diff shown under a failed comparison, and trims
//! overlong common prefixes and suffixes so that the point of difference
//! stays visible in long strings.
//!
//! # Key Types
//!
//! - [`LineDiff`] / [`DiffHunk`] / [`DiffLine`] -- Structured line diff
//! - [`DiffStats`] -- Added / removed line counts
//! - [`unified_diff`] -- `--- Expected` / `+++ Actual` text rendering

pub mod elide;
pub mod unified;

pub use elide::{
    remove_overlong_common_prefix, remove_overlong_common_prefix_and_suffix, KEEP_CONTEXT_CHARS,
    OVERLONG_THRESHOLD,
};
pub use unified::{diff_lines, unified_diff, DiffHunk, DiffLine, DiffStats, LineDiff};
