use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Attribution sentinel for a changed region no fix-log entry explains.
pub const UNKNOWN_RULE_ID: &str = "unknown";

/// A contiguous span where the final document differs from the original.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedRegion {
    /// 1-based line in the original document.
    pub start_line: usize,
    pub original_text: String,
    pub final_text: String,

    #[serde(default)]
    pub contributing_rule_ids: BTreeSet<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub descriptions: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub explanations: BTreeMap<String, String>,
}

impl ChangedRegion {
    /// Last original line covered by this region (an insertion covers its start line).
    pub fn estimated_end_line(&self) -> usize {
        let lines = self.original_text.lines().count().max(1);
        self.start_line + lines - 1
    }

    pub fn is_unattributed(&self) -> bool {
        self.contributing_rule_ids.is_empty()
            || (self.contributing_rule_ids.len() == 1
                && self.contributing_rule_ids.contains(UNKNOWN_RULE_ID))
    }
}
