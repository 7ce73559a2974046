//! Line-diff engine
//!
//! Computes the shortest edit script between two line sequences (Myers'
//! algorithm) and groups consecutive edits into hunks: 0-indexed
//! (deleted-run start, deleted-run length, inserted-run start, inserted-run
//! length) plus the affected lines. Consumed by the diff presentation layer;
//! a `None` side represents an absent file.

pub mod hunk;
pub mod myers;

use crate::artifacts::diff::hunk::Hunk;
use crate::artifacts::diff::myers::MyersDiff;

/// Diff two optional file contents into hunks of changed lines
pub fn diff_hunks(a: Option<&str>, b: Option<&str>) -> Vec<Hunk> {
    let a_lines = a.map(|content| content.lines().collect::<Vec<_>>()).unwrap_or_default();
    let b_lines = b.map(|content| content.lines().collect::<Vec<_>>()).unwrap_or_default();

    if a_lines.is_empty() && b_lines.is_empty() {
        return Vec::new();
    }

    let edits = MyersDiff::new(&a_lines, &b_lines).diff();
    Hunk::group(edits)
}
