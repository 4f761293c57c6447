//! After-the-fact change attribution.
//!
//! [`reconcile`] diffs the pristine original against the final document line by line and
//! attributes every changed region to the fix-log entries whose text overlaps it. The result
//! is report data only; nothing here feeds back into document mutation.

mod attribute;
mod diff;
mod merge;

pub use attribute::{ATTRIBUTION_MIN_LINE_CHARS, contributes};
pub use merge::MERGE_GAP_LINES;

use stylefix_types::{AppliedFix, ChangedRegion, UNKNOWN_RULE_ID};
use tracing::debug;

/// Attributed changed regions between `original` and `final_doc`, ascending by start line.
///
/// Identical documents yield an empty list. A region no fix explains is kept and attributed
/// to [`UNKNOWN_RULE_ID`].
pub fn reconcile(original: &str, final_doc: &str, fix_log: &[AppliedFix]) -> Vec<ChangedRegion> {
    if original == final_doc {
        return Vec::new();
    }

    let mut regions = diff::changed_regions(original, final_doc);
    for region in &mut regions {
        attribute::attribute(region, fix_log);
    }

    let mut merged = merge::merge_adjacent(regions);
    for region in &mut merged {
        if region.contributing_rule_ids.is_empty() {
            debug!(start_line = region.start_line, "changed region has no attributable rule");
            region
                .contributing_rule_ids
                .insert(UNKNOWN_RULE_ID.to_string());
        }
    }
    debug!(regions = merged.len(), fixes = fix_log.len(), "reconciled changes");
    merged
}
