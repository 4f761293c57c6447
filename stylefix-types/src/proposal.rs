use serde::{Deserialize, Serialize};

/// Whether a rule's proposals may be applied mechanically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    /// Mechanical rule: proposals go through the fix applier.
    Actionable,
    /// Subjective guidance: proposals are routed to human review, never applied.
    Advisory,
}

impl RuleCategory {
    /// Map a rule database label (`rule`, `style`, `migrate`) to a category.
    ///
    /// Only `rule` is actionable; every other label is advisory.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("rule") {
            RuleCategory::Actionable
        } else {
            RuleCategory::Advisory
        }
    }

    pub fn is_actionable(self) -> bool {
        matches!(self, RuleCategory::Actionable)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RuleCategory::Actionable => "actionable",
            RuleCategory::Advisory => "advisory",
        }
    }
}

/// A claimed `current_text -> suggested_fix` edit produced by the oracle.
///
/// Never mutated after it is received. `current_text` and `suggested_fix` default
/// to empty so that a malformed proposal degrades to a skipped edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditProposal {
    #[serde(default)]
    pub rule_id: String,

    #[serde(default)]
    pub current_text: String,

    #[serde(default)]
    pub suggested_fix: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Free-text classification as reported by the oracle (e.g. "rule", "style").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

impl EditProposal {
    pub fn new(
        rule_id: impl Into<String>,
        current_text: impl Into<String>,
        suggested_fix: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            current_text: current_text.into(),
            suggested_fix: suggested_fix.into(),
            ..Self::default()
        }
    }

    /// `location` for diagnostics, `unknown` when the oracle gave none.
    pub fn location_or_unknown(&self) -> &str {
        self.location.as_deref().unwrap_or("unknown")
    }

    /// `rule_id` for diagnostics, `unknown` when the oracle left it blank.
    pub fn rule_id_or_unknown(&self) -> &str {
        if self.rule_id.trim().is_empty() {
            "unknown"
        } else {
            &self.rule_id
        }
    }
}
