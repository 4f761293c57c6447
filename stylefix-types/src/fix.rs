use crate::proposal::{EditProposal, RuleCategory};
use serde::{Deserialize, Serialize};

/// An edit that was actually applied, tagged with the rule that caused it.
///
/// Appended to the fix log in application order; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedFix {
    pub rule_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_title: Option<String>,

    pub category: RuleCategory,
    pub current_text: String,
    pub suggested_fix: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl AppliedFix {
    /// Record `proposal` as applied under `rule_id`.
    ///
    /// A rule id named by the proposal is kept, so a unit bundling several rules
    /// attributes each fix precisely; `rule_id` fills in when the oracle left it blank.
    pub fn from_proposal(rule_id: &str, category: RuleCategory, proposal: &EditProposal) -> Self {
        let rule_id = if proposal.rule_id.trim().is_empty() {
            rule_id.to_string()
        } else {
            proposal.rule_id.clone()
        };
        Self {
            rule_id,
            rule_title: proposal.rule_title.clone(),
            category,
            current_text: proposal.current_text.clone(),
            suggested_fix: proposal.suggested_fix.clone(),
            description: proposal.description.clone(),
            explanation: proposal.explanation.clone(),
            location: proposal.location.clone(),
        }
    }
}
