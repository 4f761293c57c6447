use crate::locate::{Located, locate};
use stylefix_types::EditProposal;
use tracing::{debug, warn};

/// Result of applying one batch of proposals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// The working copy after every applicable proposal. Equal to the input when nothing applied.
    pub document: String,
    pub warnings: Vec<String>,
    /// Proposals that were actually applied, in application order.
    pub applied: Vec<EditProposal>,
}

impl ApplyOutcome {
    pub fn into_parts(self) -> (String, Vec<String>, Vec<EditProposal>) {
        (self.document, self.warnings, self.applied)
    }
}

struct Candidate<'a> {
    index: usize,
    proposal: &'a EditProposal,
    current: &'a str,
    fix: &'a str,
    /// First exact offset in the batch's input document.
    position: Option<usize>,
}

/// Apply `proposals` to `document`, replacing the first exact occurrence of each
/// `current_text` with its `suggested_fix`.
///
/// Proposals with an empty `current_text` or `suggested_fix`, no-op proposals (equal after
/// trimming), and proposals whose text cannot be found exactly are skipped with a warning.
/// The rest are applied earliest-in-document first against a working copy that already
/// carries the earlier replacements of this batch. Never panics.
pub fn apply_fixes(document: &str, proposals: &[EditProposal]) -> ApplyOutcome {
    let mut warnings = Vec::new();
    let mut candidates = Vec::with_capacity(proposals.len());

    for (index, proposal) in proposals.iter().enumerate() {
        let rule_id = proposal.rule_id_or_unknown();
        let current = proposal.current_text.trim();
        let fix = proposal.suggested_fix.trim();

        if current.is_empty() {
            skip(&mut warnings, format!("Skipping {rule_id}: no current_text provided"));
            continue;
        }
        if fix.is_empty() {
            skip(&mut warnings, format!("Skipping {rule_id}: no suggested_fix provided"));
            continue;
        }
        if current == fix {
            skip(
                &mut warnings,
                format!("Skipping {rule_id}: current_text and suggested_fix are identical (no-op)"),
            );
            continue;
        }

        candidates.push(Candidate {
            index,
            proposal,
            current,
            fix,
            position: locate(document, current).offset(),
        });
    }

    // Proposals whose text only appears after an earlier fix in this batch go last.
    candidates.sort_by_key(|c| (c.position.is_none(), c.position, c.index));

    let mut working = document.to_string();
    let mut applied = Vec::new();

    for candidate in candidates {
        let rule_id = candidate.proposal.rule_id_or_unknown();
        let location = candidate.proposal.location_or_unknown();

        match locate(&working, candidate.current) {
            Located::Exact(offset) => {
                working.replace_range(offset..offset + candidate.current.len(), candidate.fix);
                debug!(rule_id = %rule_id, offset, "applied fix");
                applied.push(candidate.proposal.clone());
            }
            Located::NearMiss => skip(
                &mut warnings,
                format!(
                    "Skipping {rule_id}: could not find exact match in content, \
                     only a whitespace-normalized match (Location: {location})"
                ),
            ),
            Located::NotFound => skip(
                &mut warnings,
                format!(
                    "Skipping {rule_id}: could not find exact match in content (Location: {location})"
                ),
            ),
        }
    }

    debug!(
        applied = applied.len(),
        total = proposals.len(),
        skipped = warnings.len(),
        "fix batch finished"
    );

    ApplyOutcome {
        document: working,
        warnings,
        applied,
    }
}

fn skip(warnings: &mut Vec<String>, message: String) {
    warn!("{}", message);
    warnings.push(message);
}
