//! Clap-free settings for the check pipeline.

use camino::{Utf8Path, Utf8PathBuf};
use stylefix_rules::CheckCategory;

/// How rule-units are driven.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    /// One unit at a time; each sees the fixes of the units before it.
    #[default]
    Sequential,
    /// Units evaluate concurrently against the original document.
    Parallel,
}

impl RunMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RunMode::Sequential => "sequential",
            RunMode::Parallel => "parallel",
        }
    }
}

/// Settings for the check pipeline.
#[derive(Debug, Clone)]
pub struct CheckSettings {
    pub document: Utf8PathBuf,
    pub rules_db: Utf8PathBuf,
    pub responses_dir: Utf8PathBuf,
    pub out_dir: Utf8PathBuf,

    /// Empty means every category.
    pub categories: Vec<CheckCategory>,

    /// Overwrite the document when the run changed it.
    pub fix: bool,
    pub mode: RunMode,
    pub check_quality: bool,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            document: Utf8PathBuf::from("lecture.md"),
            rules_db: Utf8PathBuf::from("style-guide-database.md"),
            responses_dir: Utf8PathBuf::from("responses"),
            out_dir: Utf8PathBuf::from("artifacts/stylefix"),
            categories: Vec::new(),
            fix: false,
            mode: RunMode::default(),
            check_quality: true,
        }
    }
}

impl CheckSettings {
    pub fn for_document(document: impl Into<Utf8PathBuf>) -> Self {
        let document = document.into();
        Self {
            out_dir: default_out_dir(&document),
            document,
            ..Self::default()
        }
    }
}

/// `<document dir>/artifacts/stylefix`.
pub fn default_out_dir(document: &Utf8Path) -> Utf8PathBuf {
    document
        .parent()
        .filter(|p| !p.as_str().is_empty())
        .map(|p| p.join("artifacts").join("stylefix"))
        .unwrap_or_else(|| Utf8PathBuf::from("artifacts/stylefix"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_dir_sits_next_to_document() {
        assert_eq!(
            default_out_dir(Utf8Path::new("lectures/intro.md")),
            Utf8PathBuf::from("lectures/artifacts/stylefix")
        );
        assert_eq!(
            default_out_dir(Utf8Path::new("intro.md")),
            Utf8PathBuf::from("artifacts/stylefix")
        );
    }

    #[test]
    fn for_document_keeps_defaults() {
        let s = CheckSettings::for_document("book/ch1.md");
        assert_eq!(s.out_dir, Utf8PathBuf::from("book/artifacts/stylefix"));
        assert_eq!(s.mode, RunMode::Sequential);
        assert!(s.check_quality);
        assert!(s.categories.is_empty());
    }
}
