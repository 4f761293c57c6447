use similar::{Algorithm, DiffTag, capture_diff_slices};
use stylefix_types::ChangedRegion;

/// Non-equal LCS opcodes over lines, as unattributed regions.
///
/// Lines keep their terminators so region texts are verbatim slices. Regions whose both
/// sides are blank after trimming are dropped.
pub(crate) fn changed_regions(original: &str, final_doc: &str) -> Vec<ChangedRegion> {
    let old_lines: Vec<&str> = original.split_inclusive('\n').collect();
    let new_lines: Vec<&str> = final_doc.split_inclusive('\n').collect();

    capture_diff_slices(Algorithm::Lcs, &old_lines, &new_lines)
        .iter()
        .filter_map(|op| {
            let (tag, old_range, new_range) = op.as_tag_tuple();
            if tag == DiffTag::Equal {
                return None;
            }
            let original_text = old_lines[old_range.clone()].concat();
            let final_text = new_lines[new_range].concat();
            if original_text.trim().is_empty() && final_text.trim().is_empty() {
                return None;
            }
            Some(ChangedRegion {
                start_line: old_range.start + 1,
                original_text,
                final_text,
                ..ChangedRegion::default()
            })
        })
        .collect()
}
