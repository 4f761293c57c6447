//! Edit engine for stylefix proposals.
//!
//! Responsibilities:
//! - Locate a proposal's `current_text` in a document (exact, with a whitespace-normalized
//!   near-miss diagnostic).
//! - Apply a batch of proposals to a working copy, skipping anything unsafe.
//! - Flag low-quality proposals without blocking them.
//! - Generate a unified diff preview of a whole run.
//!
//! Nothing in here does I/O and nothing in here fails: every problem becomes a warning.

mod apply;
mod locate;
mod validate;

pub use apply::{ApplyOutcome, apply_fixes};
pub use locate::{Located, locate, normalize_whitespace};
pub use validate::{COMMENTARY_MARKERS, SHORT_TEXT_THRESHOLD, validate_fix_quality};

use diffy::PatchFormatter;

/// Render a git-style unified diff between two versions of one document.
///
/// Returns an empty string when nothing changed.
pub fn render_patch(path: &str, before: &str, after: &str) -> String {
    if before == after {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(&format!("diff --git a/{0} b/{0}\n", path));
    out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", path));

    let patch = diffy::create_patch(before, after);
    let formatter = PatchFormatter::new();
    let body = formatter.fmt_patch(&patch).to_string();
    // diffy repeats the ---/+++ header; keep only the hunks.
    let hunks = body
        .split_once("\n@@")
        .map(|(_, rest)| format!("@@{}", rest))
        .unwrap_or(body);
    out.push_str(&hunks);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_patch_is_empty_when_unchanged() {
        assert_eq!(render_patch("lecture.md", "same\n", "same\n"), "");
    }

    #[test]
    fn render_patch_has_single_header_and_hunk() {
        let patch = render_patch("lecture.md", "Alpha\nBeta\n", "α\nBeta\n");
        assert!(patch.starts_with("diff --git a/lecture.md b/lecture.md\n"));
        assert_eq!(patch.matches("--- a/lecture.md").count(), 1);
        assert!(patch.contains("@@"));
        assert!(patch.contains("-Alpha\n"));
        assert!(patch.contains("+α\n"));
    }
}
