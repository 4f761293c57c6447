//! Replay oracle: rule-units that answer with a recorded response.

use anyhow::anyhow;
use std::collections::BTreeMap;
use stylefix_domain::RuleUnit;
use stylefix_responses::LoadedResponse;
use stylefix_rules::StyleRule;
use stylefix_types::{EditProposal, RuleCategory};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
enum Recording {
    Missing,
    Proposals(Vec<EditProposal>),
    Failed { path: String, reason: String },
}

/// One style rule whose evaluation replays the oracle's recorded answer.
///
/// The recording is fixed, so it is replayed whatever document state the runner hands in.
#[derive(Debug, Clone)]
pub struct ReplayRuleUnit {
    rule_id: String,
    category: RuleCategory,
    recording: Recording,
}

impl ReplayRuleUnit {
    fn new(rule: &StyleRule, recording: Recording) -> Self {
        let recording = match recording {
            Recording::Proposals(proposals) => Recording::Proposals(
                proposals
                    .into_iter()
                    .map(|p| fill_from_rule(p, rule))
                    .collect(),
            ),
            other => other,
        };
        Self {
            rule_id: rule.rule_id.clone(),
            category: rule.category,
            recording,
        }
    }
}

/// Proposals the oracle left unlabelled inherit the rule's id, title and label.
fn fill_from_rule(mut proposal: EditProposal, rule: &StyleRule) -> EditProposal {
    if proposal.rule_id.trim().is_empty() {
        proposal.rule_id = rule.rule_id.clone();
    }
    if proposal.rule_title.is_none() && !rule.title.is_empty() {
        proposal.rule_title = Some(rule.title.clone());
    }
    if proposal.category.is_none() {
        proposal.category = Some(rule.label.clone());
    }
    proposal
}

impl RuleUnit for ReplayRuleUnit {
    fn id(&self) -> &str {
        &self.rule_id
    }

    fn category(&self) -> RuleCategory {
        self.category
    }

    fn evaluate(&self, _document: &str) -> anyhow::Result<Vec<EditProposal>> {
        match &self.recording {
            Recording::Missing => Ok(Vec::new()),
            Recording::Proposals(proposals) => Ok(proposals.clone()),
            Recording::Failed { path, reason } => {
                Err(anyhow!("recorded response {path} failed to load: {reason}"))
            }
        }
    }
}

/// One unit per rule, in the order given. Recordings are matched by rule id; when a
/// rule has several, the first by path wins.
pub fn build_replay_units(
    rules: &[&StyleRule],
    responses: &[LoadedResponse],
) -> Vec<Box<dyn RuleUnit>> {
    let mut by_rule: BTreeMap<&str, &LoadedResponse> = BTreeMap::new();
    for loaded in responses {
        if let Some(kept) = by_rule.get(loaded.rule_id.as_str()) {
            warn!(
                rule_id = %loaded.rule_id,
                kept = %kept.path,
                ignored = %loaded.path,
                "several recordings for one rule"
            );
            continue;
        }
        by_rule.insert(loaded.rule_id.as_str(), loaded);
    }

    for loaded in responses {
        if !rules.iter().any(|r| r.rule_id == loaded.rule_id) {
            debug!(rule_id = %loaded.rule_id, path = %loaded.path, "recording for unselected rule");
        }
    }

    rules
        .iter()
        .map(|rule| {
            let recording = match by_rule.get(rule.rule_id.as_str()) {
                None => Recording::Missing,
                Some(loaded) => match &loaded.response {
                    Ok(response) => Recording::Proposals(response.violations.clone()),
                    Err(err) => Recording::Failed {
                        path: loaded.path.to_string(),
                        reason: err.to_string(),
                    },
                },
            };
            Box::new(ReplayRuleUnit::new(rule, recording)) as Box<dyn RuleUnit>
        })
        .collect()
}
