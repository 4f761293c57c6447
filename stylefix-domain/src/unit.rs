use stylefix_types::{EditProposal, RuleCategory};

/// One evaluable check: a single rule or a bundle of rules evaluated together.
///
/// `evaluate` is where the oracle gets called. It receives the *current* document, which
/// already carries every fix applied by earlier units in the run.
pub trait RuleUnit: Send + Sync {
    fn id(&self) -> &str;

    fn category(&self) -> RuleCategory;

    fn evaluate(&self, document: &str) -> anyhow::Result<Vec<EditProposal>>;
}

/// Closure-backed [`RuleUnit`], handy for embedding and tests.
pub struct FnRuleUnit<F> {
    id: String,
    category: RuleCategory,
    evaluate: F,
}

impl<F> FnRuleUnit<F>
where
    F: Fn(&str) -> anyhow::Result<Vec<EditProposal>> + Send + Sync,
{
    pub fn new(id: impl Into<String>, category: RuleCategory, evaluate: F) -> Self {
        Self {
            id: id.into(),
            category,
            evaluate,
        }
    }
}

impl<F> RuleUnit for FnRuleUnit<F>
where
    F: Fn(&str) -> anyhow::Result<Vec<EditProposal>> + Send + Sync,
{
    fn id(&self) -> &str {
        &self.id
    }

    fn category(&self) -> RuleCategory {
        self.category
    }

    fn evaluate(&self, document: &str) -> anyhow::Result<Vec<EditProposal>> {
        (self.evaluate)(document)
    }
}
