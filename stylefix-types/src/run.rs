use crate::fix::AppliedFix;
use crate::proposal::{EditProposal, RuleCategory};
use serde::{Deserialize, Serialize};

/// Lifecycle of one rule-unit inside a run.
///
/// `Pending -> Evaluated -> {Applied | SkippedStyle | SkippedNoViolations | Failed}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleState {
    Pending,
    Evaluated,
    Applied,
    SkippedStyle,
    SkippedNoViolations,
    Failed,
}

impl RuleState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, RuleState::Pending | RuleState::Evaluated)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub rule_id: String,
    pub category: RuleCategory,
    pub state: RuleState,

    /// Proposals the oracle returned for this unit.
    pub proposals: u64,

    /// Proposals that made it into the fix log.
    pub applied: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RuleOutcome {
    pub fn pending(rule_id: impl Into<String>, category: RuleCategory) -> Self {
        Self {
            rule_id: rule_id.into(),
            category,
            state: RuleState::Pending,
            proposals: 0,
            applied: 0,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub rules_total: u64,
    pub rules_applied: u64,
    pub rules_skipped_style: u64,
    pub rules_skipped_no_violations: u64,
    pub rules_failed: u64,

    /// Every proposal received, applied or not.
    pub issues_found: u64,
    pub fixes_applied: u64,
    pub human_review: u64,
}

/// Everything a run produced. The run always completes; problems end up in `warnings`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub original_document: String,
    pub final_document: String,

    /// Applied fixes in application order.
    #[serde(default)]
    pub fix_log: Vec<AppliedFix>,

    #[serde(default)]
    pub auto_applied_violations: Vec<EditProposal>,

    #[serde(default)]
    pub human_review_violations: Vec<EditProposal>,

    #[serde(default)]
    pub warnings: Vec<String>,

    #[serde(default)]
    pub outcomes: Vec<RuleOutcome>,
}

impl RunResult {
    pub fn new(original_document: impl Into<String>) -> Self {
        let original_document = original_document.into();
        Self {
            final_document: original_document.clone(),
            original_document,
            ..Self::default()
        }
    }

    pub fn document_changed(&self) -> bool {
        self.original_document != self.final_document
    }

    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary {
            rules_total: self.outcomes.len() as u64,
            fixes_applied: self.fix_log.len() as u64,
            human_review: self.human_review_violations.len() as u64,
            ..RunSummary::default()
        };
        for outcome in &self.outcomes {
            summary.issues_found += outcome.proposals;
            match outcome.state {
                RuleState::Applied => summary.rules_applied += 1,
                RuleState::SkippedStyle => summary.rules_skipped_style += 1,
                RuleState::SkippedNoViolations => summary.rules_skipped_no_violations += 1,
                RuleState::Failed => summary.rules_failed += 1,
                RuleState::Pending | RuleState::Evaluated => {}
            }
        }
        summary
    }
}
