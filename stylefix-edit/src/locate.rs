/// Where a snippet sits in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Located {
    /// Byte offset of the first exact occurrence.
    Exact(usize),
    /// Only a whitespace-normalized form matched. Never eligible for replacement.
    NearMiss,
    NotFound,
}

impl Located {
    pub fn offset(self) -> Option<usize> {
        match self {
            Located::Exact(offset) => Some(offset),
            Located::NearMiss | Located::NotFound => None,
        }
    }
}

/// Find `snippet` in `document`.
///
/// Exact substring search first. If that fails, both sides are whitespace-normalized and
/// searched again; a hit there is reported as [`Located::NearMiss`] for diagnostics only.
/// An empty (or all-whitespace) snippet is never searched.
pub fn locate(document: &str, snippet: &str) -> Located {
    if snippet.trim().is_empty() {
        return Located::NotFound;
    }
    if let Some(offset) = document.find(snippet) {
        return Located::Exact(offset);
    }
    if normalize_whitespace(document).contains(&normalize_whitespace(snippet)) {
        Located::NearMiss
    } else {
        Located::NotFound
    }
}

/// Collapse every whitespace run to one space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_reports_first_offset() {
        assert_eq!(locate("word word word", "word"), Located::Exact(0));
        assert_eq!(locate("a word here", "word"), Located::Exact(2));
    }

    #[test]
    fn whitespace_drift_is_a_near_miss() {
        let doc = "The quick\n  brown fox";
        assert_eq!(locate(doc, "quick brown"), Located::NearMiss);
        assert_eq!(locate(doc, "quick brown").offset(), None);
    }

    #[test]
    fn missing_snippet_is_not_found() {
        assert_eq!(locate("The quick brown fox", "lazy dog"), Located::NotFound);
    }

    #[test]
    fn empty_snippet_is_never_searched() {
        assert_eq!(locate("anything", ""), Located::NotFound);
        assert_eq!(locate("anything", " \n\t"), Located::NotFound);
    }

    #[test]
    fn normalize_collapses_runs() {
        assert_eq!(normalize_whitespace("  a \n\n b\tc  "), "a b c");
    }
}
