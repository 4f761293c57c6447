use serde::{Deserialize, Serialize};
use stylefix_types::EditProposal;

/// One recorded oracle answer for a single rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default)]
    pub summary: String,

    /// Count the oracle claimed; may disagree with `violations.len()`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues_found: Option<usize>,

    #[serde(default)]
    pub violations: Vec<EditProposal>,

    /// Whole-document rewrite some oracles append. Kept for the record, never applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrected_content: Option<String>,
}

impl OracleResponse {
    pub fn issues_found(&self) -> usize {
        self.issues_found.unwrap_or(self.violations.len())
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}
