//! Shared DTOs (schemas-as-code) for the stylefix workspace.
//!
//! # Design constraints
//! - Proposals arrive from an untrusted oracle; every advisory field is optional.
//! - Run results and reports are intended to be serialized to disk.
//! - Prefer adding optional fields over changing semantics.

pub mod fix;
pub mod proposal;
pub mod region;
pub mod report;
pub mod run;

pub use fix::AppliedFix;
pub use proposal::{EditProposal, RuleCategory};
pub use region::{ChangedRegion, UNKNOWN_RULE_ID};
pub use run::{RuleOutcome, RuleState, RunResult, RunSummary};

/// Schema identifiers.
pub mod schema {
    pub const STYLEFIX_REPORT_V1: &str = "stylefix.report.v1";
    pub const STYLEFIX_RESPONSE_V1: &str = "stylefix.response.v1";
}
