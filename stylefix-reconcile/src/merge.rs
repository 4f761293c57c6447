use stylefix_types::ChangedRegion;

/// A region starting within this many lines of the previous region's end is folded into it.
pub const MERGE_GAP_LINES: usize = 2;

/// Fold near-adjacent regions together, unioning their attribution. Output is ascending by
/// start line.
pub(crate) fn merge_adjacent(mut regions: Vec<ChangedRegion>) -> Vec<ChangedRegion> {
    regions.sort_by_key(|r| r.start_line);

    // Merged texts skip the unchanged gap lines, so each merged region's last original
    // line is tracked here instead of re-estimated from its text.
    let mut merged: Vec<(ChangedRegion, usize)> = Vec::with_capacity(regions.len());
    for region in regions {
        let end = region.estimated_end_line();
        match merged.last_mut() {
            Some((prev, prev_end)) if region.start_line <= *prev_end + MERGE_GAP_LINES => {
                *prev_end = (*prev_end).max(end);
                absorb(prev, region);
            }
            _ => merged.push((region, end)),
        }
    }
    merged.into_iter().map(|(region, _)| region).collect()
}

fn absorb(prev: &mut ChangedRegion, next: ChangedRegion) {
    join_block(&mut prev.original_text, &next.original_text);
    join_block(&mut prev.final_text, &next.final_text);
    prev.contributing_rule_ids.extend(next.contributing_rule_ids);
    for (rule_id, text) in next.descriptions {
        prev.descriptions.entry(rule_id).or_insert(text);
    }
    for (rule_id, text) in next.explanations {
        prev.explanations.entry(rule_id).or_insert(text);
    }
}

fn join_block(into: &mut String, block: &str) {
    if block.is_empty() {
        return;
    }
    if !into.is_empty() && !into.ends_with('\n') {
        into.push('\n');
    }
    into.push_str(block);
}
