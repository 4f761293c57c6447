use crate::unit::RuleUnit;
use stylefix_edit::{apply_fixes, validate_fix_quality};
use stylefix_types::{AppliedFix, EditProposal, RuleCategory, RuleOutcome, RuleState, RunResult};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Run the fix-quality checks on actionable proposals and keep their warnings.
    pub check_quality: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            check_quality: true,
        }
    }
}

/// Drives rule-units one at a time against the evolving document.
#[derive(Debug, Clone, Default)]
pub struct SequentialRuleRunner {
    config: RunnerConfig,
}

impl SequentialRuleRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Run every unit in order. Each unit is evaluated against the document as left by
    /// the previous units; a failing unit is recorded and skipped.
    pub fn run(&self, document: &str, units: &[Box<dyn RuleUnit>]) -> RunResult {
        let mut result = RunResult::new(document);
        info!(units = units.len(), "running rule-units sequentially");

        for unit in units {
            let evaluation = unit.evaluate(&result.final_document);
            self.settle(unit.as_ref(), evaluation, &mut result);
        }

        finish(&result);
        result
    }

    /// Take one unit from EVALUATED (or FAILED) to its terminal state, folding its
    /// proposals into `result`.
    pub(crate) fn settle(
        &self,
        unit: &dyn RuleUnit,
        evaluation: anyhow::Result<Vec<EditProposal>>,
        result: &mut RunResult,
    ) {
        let rule_id = unit.id();
        let category = unit.category();
        let mut outcome = RuleOutcome::pending(rule_id, category);

        let proposals = match evaluation {
            Ok(proposals) => proposals,
            Err(err) => {
                let detail = format!("{err:#}");
                warn!(rule_id = %rule_id, error = %detail, "rule-unit failed");
                result
                    .warnings
                    .push(format!("{rule_id}: rule evaluation failed: {detail}"));
                outcome.state = RuleState::Failed;
                outcome.error = Some(detail);
                result.outcomes.push(outcome);
                return;
            }
        };

        outcome.state = RuleState::Evaluated;
        outcome.proposals = proposals.len() as u64;
        debug!(rule_id = %rule_id, proposals = proposals.len(), "rule-unit evaluated");

        if proposals.is_empty() {
            outcome.state = RuleState::SkippedNoViolations;
            result.outcomes.push(outcome);
            return;
        }

        match category {
            RuleCategory::Advisory => {
                debug!(rule_id = %rule_id, "advisory rule-unit, routing to human review");
                result.human_review_violations.extend(proposals);
                outcome.state = RuleState::SkippedStyle;
            }
            RuleCategory::Actionable => {
                if self.config.check_quality {
                    for message in validate_fix_quality(&proposals) {
                        debug!(rule_id = %rule_id, "{}", message);
                        result.warnings.push(message);
                    }
                }

                let applied = apply_fixes(&result.final_document, &proposals);
                result.final_document = applied.document;
                result.warnings.extend(applied.warnings);

                outcome.applied = applied.applied.len() as u64;
                for proposal in &applied.applied {
                    result
                        .fix_log
                        .push(AppliedFix::from_proposal(rule_id, category, proposal));
                }
                result.auto_applied_violations.extend(applied.applied);
                outcome.state = RuleState::Applied;
            }
        }

        result.outcomes.push(outcome);
    }
}

pub(crate) fn finish(result: &RunResult) {
    let summary = result.summary();
    info!(
        rules = summary.rules_total,
        fixes_applied = summary.fixes_applied,
        human_review = summary.human_review,
        failed = summary.rules_failed,
        changed = result.document_changed(),
        "run finished"
    );
}
