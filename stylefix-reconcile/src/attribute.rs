use stylefix_types::{AppliedFix, ChangedRegion};

/// Minimum trimmed length (in characters) of a line used by the per-line fallback.
/// Shorter lines match too much to mean anything.
pub const ATTRIBUTION_MIN_LINE_CHARS: usize = 10;

/// Whether `fix` plausibly produced `region`.
///
/// Whole-text containment in either direction on the original side (`current_text`) or the
/// final side (`suggested_fix`) first; failing that, any sufficiently long line of the fix
/// text overlapping any line of the region text. The fallback catches fixes whose text was
/// later rewritten by another rule.
pub fn contributes(fix: &AppliedFix, region: &ChangedRegion) -> bool {
    overlaps(&fix.current_text, &region.original_text)
        || overlaps(&fix.suggested_fix, &region.final_text)
        || lines_overlap(&fix.current_text, &region.original_text)
        || lines_overlap(&fix.suggested_fix, &region.final_text)
}

pub(crate) fn attribute(region: &mut ChangedRegion, fix_log: &[AppliedFix]) {
    for fix in fix_log {
        if !contributes(fix, region) {
            continue;
        }
        region.contributing_rule_ids.insert(fix.rule_id.clone());
        if let Some(description) = &fix.description {
            region
                .descriptions
                .entry(fix.rule_id.clone())
                .or_insert_with(|| description.clone());
        }
        if let Some(explanation) = &fix.explanation {
            region
                .explanations
                .entry(fix.rule_id.clone())
                .or_insert_with(|| explanation.clone());
        }
    }
}

fn overlaps(fix_text: &str, region_text: &str) -> bool {
    let fix_text = fix_text.trim();
    let region_text = region_text.trim();
    if fix_text.is_empty() || region_text.is_empty() {
        return false;
    }
    region_text.contains(fix_text) || fix_text.contains(region_text)
}

fn lines_overlap(fix_text: &str, region_text: &str) -> bool {
    let region_lines: Vec<&str> = significant_lines(region_text).collect();
    significant_lines(fix_text).any(|fix_line| {
        region_lines
            .iter()
            .any(|region_line| region_line.contains(fix_line) || fix_line.contains(region_line))
    })
}

fn significant_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.chars().count() >= ATTRIBUTION_MIN_LINE_CHARS)
}
