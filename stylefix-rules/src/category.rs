use crate::error::RuleDbError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A semantic bundle of rules, checked in a fixed order.
///
/// Earlier categories run first so later ones see their fixes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CheckCategory {
    Writing,
    Math,
    Code,
    Jax,
    Figures,
    References,
    Links,
    Admonitions,
}

impl CheckCategory {
    /// Every category, in evaluation order.
    pub const ALL: [CheckCategory; 8] = [
        CheckCategory::Writing,
        CheckCategory::Math,
        CheckCategory::Code,
        CheckCategory::Jax,
        CheckCategory::Figures,
        CheckCategory::References,
        CheckCategory::Links,
        CheckCategory::Admonitions,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CheckCategory::Writing => "writing",
            CheckCategory::Math => "math",
            CheckCategory::Code => "code",
            CheckCategory::Jax => "jax",
            CheckCategory::Figures => "figures",
            CheckCategory::References => "references",
            CheckCategory::Links => "links",
            CheckCategory::Admonitions => "admonitions",
        }
    }

    /// Name of the `<!-- GROUP:... -->` block holding this category's rules.
    pub fn group_name(self) -> String {
        self.as_str().to_ascii_uppercase()
    }

    /// Parse a comma-separated list, e.g. `"math, writing"`.
    ///
    /// The result is deduplicated and sorted into evaluation order. An empty list means all.
    pub fn parse_list(list: &str) -> Result<Vec<CheckCategory>, RuleDbError> {
        let mut out = Vec::new();
        for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            out.push(name.parse::<CheckCategory>()?);
        }
        Ok(Self::normalize(out))
    }

    /// Sort into evaluation order and drop duplicates; an empty selection means all.
    pub fn normalize(mut categories: Vec<CheckCategory>) -> Vec<CheckCategory> {
        if categories.is_empty() {
            return Self::ALL.to_vec();
        }
        categories.sort();
        categories.dedup();
        categories
    }
}

impl FromStr for CheckCategory {
    type Err = RuleDbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| RuleDbError::UnknownCategory {
                name: s.trim().to_string(),
                valid: Self::ALL
                    .iter()
                    .map(|c| c.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl fmt::Display for CheckCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
