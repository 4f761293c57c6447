use stylefix_types::EditProposal;

/// `current_text` shorter than this (in characters) may match in several places.
pub const SHORT_TEXT_THRESHOLD: usize = 10;

/// Annotation tokens that must never appear in a replacement string.
pub const COMMENTARY_MARKERS: &[&str] = &[
    "# NOTE:",
    "# TODO:",
    "# FIX:",
    "# CHANGED:",
    "[Note:",
    "[TODO:",
    "[Changed:",
    "// NOTE",
    "// TODO",
];

/// Inspect proposals for oracle misbehavior. Advisory only: the result never gates
/// [`apply_fixes`](crate::apply_fixes).
pub fn validate_fix_quality(proposals: &[EditProposal]) -> Vec<String> {
    let mut warnings = Vec::new();

    for (i, proposal) in proposals.iter().enumerate() {
        let rule_id = if proposal.rule_id.trim().is_empty() {
            format!("violation-{}", i + 1)
        } else {
            proposal.rule_id.clone()
        };
        let current = proposal.current_text.trim();
        let fix = proposal.suggested_fix.trim();

        if current.is_empty() {
            warnings.push(format!("{rule_id}: Missing current_text"));
        }
        if fix.is_empty() {
            warnings.push(format!("{rule_id}: Missing suggested_fix"));
        }
        if current.is_empty() || fix.is_empty() {
            continue;
        }

        if current == fix {
            warnings.push(format!(
                "{rule_id}: Current text and suggested fix are identical, no-op"
            ));
            continue;
        }

        for marker in COMMENTARY_MARKERS {
            if fix.contains(marker) {
                warnings.push(format!(
                    "{rule_id}: Suggested fix contains commentary: '{marker}'"
                ));
            }
        }

        let len = current.chars().count();
        if len < SHORT_TEXT_THRESHOLD {
            warnings.push(format!(
                "{rule_id}: Current text is very short ({len} chars), may match multiple locations"
            ));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_proposal(current: &str, fix: &str) -> EditProposal {
        EditProposal::new("qe-writing-001", current, fix)
    }

    #[test]
    fn clean_proposal_has_no_warnings() {
        let w = validate_fix_quality(&[make_proposal(
            "This is a long enough sentence",
            "This is a long-enough sentence",
        )]);
        assert!(w.is_empty(), "{w:?}");
    }

    #[test]
    fn missing_fields_both_reported() {
        let w = validate_fix_quality(&[make_proposal("", "")]);
        assert_eq!(w.len(), 2);
        assert!(w[0].contains("Missing current_text"));
        assert!(w[1].contains("Missing suggested_fix"));
    }

    #[test]
    fn identical_is_flagged_once() {
        let w = validate_fix_quality(&[make_proposal("same", "same")]);
        assert_eq!(w, vec!["qe-writing-001: Current text and suggested fix are identical, no-op"]);
    }

    #[test]
    fn short_current_text_is_flagged() {
        let w = validate_fix_quality(&[make_proposal("hi", "hello")]);
        assert_eq!(w.len(), 1);
        assert!(w[0].contains("very short (2 chars)"));
    }

    #[test]
    fn short_check_counts_characters_not_bytes() {
        // 9 characters, 18 bytes
        let w = validate_fix_quality(&[make_proposal("ααααααααα", "βββββββββ")]);
        assert!(w.iter().any(|m| m.contains("very short (9 chars)")));
        let w = validate_fix_quality(&[make_proposal("αααααααααα", "ββββββββββ")]);
        assert!(w.is_empty());
    }

    #[test]
    fn every_commentary_marker_is_reported() {
        let w = validate_fix_quality(&[make_proposal(
            "original sentence text",
            "new sentence text # NOTE: changed [TODO: check]",
        )]);
        assert!(w.iter().any(|m| m.contains("'# NOTE:'")));
        assert!(w.iter().any(|m| m.contains("'[TODO:'")));
    }

    #[test]
    fn blank_rule_id_uses_position() {
        let mut p = make_proposal("", "x");
        p.rule_id.clear();
        let w = validate_fix_quality(&[make_proposal("long enough text", "other long text"), p]);
        assert_eq!(w, vec!["violation-2: Missing current_text"]);
    }
}
