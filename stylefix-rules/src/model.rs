use crate::category::CheckCategory;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use stylefix_types::RuleCategory;

/// One `### Rule:` section of the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleRule {
    pub rule_id: String,

    /// Raw `**Category:**` label (`rule`, `style`, `migrate`).
    pub label: String,

    pub category: RuleCategory,
    pub title: String,
    pub description: String,
    pub check_for: Vec<String>,
    pub examples: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub implementation_note: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exceptions: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Upper-case group the rule was declared in, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl StyleRule {
    pub fn is_actionable(&self) -> bool {
        self.category.is_actionable()
    }
}

/// Parsed rule database. Rules keep their file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleDatabase {
    version: String,
    rules: Vec<StyleRule>,
    groups: BTreeMap<String, Vec<usize>>,
}

impl RuleDatabase {
    pub(crate) fn new(version: String, rules: Vec<StyleRule>) -> Self {
        let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (idx, rule) in rules.iter().enumerate() {
            if let Some(group) = &rule.group {
                groups.entry(group.clone()).or_default().push(idx);
            }
        }
        Self {
            version,
            rules,
            groups,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    pub fn get(&self, rule_id: &str) -> Option<&StyleRule> {
        self.rules.iter().find(|r| r.rule_id == rule_id)
    }

    /// Group names present in the file, sorted.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Rules declared inside `GROUP:<name>`; the name is matched case-insensitively.
    pub fn rules_in_group(&self, name: &str) -> Vec<&StyleRule> {
        self.groups
            .get(&name.to_ascii_uppercase())
            .map(|idxs| idxs.iter().map(|&i| &self.rules[i]).collect())
            .unwrap_or_default()
    }

    pub fn actionable_rules(&self) -> Vec<&StyleRule> {
        self.rules.iter().filter(|r| r.is_actionable()).collect()
    }

    /// Rules for the selected check categories, in evaluation order.
    ///
    /// Categories are visited in their fixed order regardless of how they were passed;
    /// within a category rules keep their file order. An empty selection means all.
    pub fn rules_for_categories(&self, categories: &[CheckCategory]) -> Vec<&StyleRule> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        for category in CheckCategory::normalize(categories.to_vec()) {
            for rule in self.rules_in_group(&category.group_name()) {
                if seen.insert(rule.rule_id.as_str()) {
                    out.push(rule);
                }
            }
        }
        out
    }
}
