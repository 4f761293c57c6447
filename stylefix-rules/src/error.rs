use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleDbError {
    #[error("duplicate rule id: {rule_id}")]
    DuplicateRule { rule_id: String },

    #[error("rule {rule_id} has no **Category:** line")]
    MissingCategory { rule_id: String },

    #[error("unknown check category `{name}` (valid: {valid})")]
    UnknownCategory { name: String, valid: String },

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}
