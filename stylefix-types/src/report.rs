use crate::fix::AppliedFix;
use crate::proposal::EditProposal;
use crate::region::ChangedRegion;
use crate::run::{RuleOutcome, RunSummary};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Machine-readable result of one `check` run, written as `report.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StylefixReport {
    pub schema: String,
    pub tool: ReportToolInfo,
    pub run: ReportRunInfo,
    pub document: ReportDocument,
    pub verdict: ReportVerdict,
    pub summary: RunSummary,

    #[serde(default)]
    pub outcomes: Vec<RuleOutcome>,

    #[serde(default)]
    pub fix_log: Vec<AppliedFix>,

    #[serde(default)]
    pub human_review: Vec<EditProposal>,

    #[serde(default)]
    pub changes: Vec<ChangedRegion>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,

    /// Recorded responses that could not be loaded.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs_failed: Vec<InputFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportToolInfo {
    pub name: String,
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRunInfo {
    pub run_id: Uuid,
    pub started_at: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,

    /// `sequential` or `parallel`.
    pub mode: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument {
    pub path: String,
    pub sha256_before: String,
    pub sha256_after: String,
    pub changed: bool,

    /// The fixed document was written back over `path`.
    #[serde(default)]
    pub written: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportVerdict {
    pub status: ReportStatus,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pass,
    Warn,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFailure {
    pub path: String,
    pub rule_id: String,
    pub reason: String,
}
