//! The check pipeline, extracted from the CLI.
//!
//! Entry points are I/O-agnostic: every read and write goes through the port traits.

use crate::oracle::build_replay_units;
use crate::ports::{DocumentSource, ResponseSource, RuleSource, WritePort};
use crate::settings::{CheckSettings, RunMode};
use anyhow::Context;
use camino::Utf8Path;
use chrono::Utc;
use sha2::{Digest, Sha256};
use stylefix_domain::{RunnerConfig, SequentialRuleRunner, run_parallel};
use stylefix_edit::render_patch;
use stylefix_reconcile::reconcile;
use stylefix_responses::LoadedResponse;
use stylefix_rules::{CheckCategory, StyleRule};
use stylefix_types::report::{
    InputFailure, ReportDocument, ReportRunInfo, ReportStatus, ReportToolInfo, ReportVerdict,
    StylefixReport,
};
use stylefix_types::schema::STYLEFIX_REPORT_V1;
use stylefix_types::{ChangedRegion, RunResult};
use tracing::{debug, info};
use uuid::Uuid;

pub const REPORT_FILE: &str = "report.json";
pub const PATCH_FILE: &str = "patch.diff";
pub const FIXED_DOCUMENT_FILE: &str = "document.fixed.md";

/// Error type for pipeline results. Every variant maps to exit code 1.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("no rules in the database for categories: {categories}")]
    NoRulesSelected { categories: String },
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

/// Outcome of `run_check`.
pub struct CheckOutcome {
    pub result: RunResult,
    pub changes: Vec<ChangedRegion>,
    pub report: StylefixReport,
    pub patch: String,
}

impl CheckOutcome {
    /// The document should be written back: `fix` was requested and the run changed it.
    pub fn should_write_document(&self) -> bool {
        self.report.document.written
    }
}

/// Run the check pipeline: load, evaluate, reconcile, report.
///
/// Nothing is written; see [`write_check_artifacts`] and [`write_fixed_document`].
pub fn run_check(
    settings: &CheckSettings,
    rules: &dyn RuleSource,
    responses: &dyn ResponseSource,
    documents: &dyn DocumentSource,
    tool: ReportToolInfo,
) -> Result<CheckOutcome, ToolError> {
    let started = Utc::now();
    let run_id = Uuid::new_v4();

    let document = documents.read_document(&settings.document)?;
    let db = rules.load_rules().context("load rule database")?;
    let selected = db.rules_for_categories(&settings.categories);
    if selected.is_empty() {
        return Err(ToolError::NoRulesSelected {
            categories: describe_categories(&settings.categories),
        });
    }
    let loaded = responses.load_responses()?;
    info!(
        run_id = %run_id,
        document = %settings.document,
        rules = selected.len(),
        recordings = loaded.len(),
        mode = settings.mode.as_str(),
        "starting check"
    );

    let units = build_replay_units(&selected, &loaded);
    let runner = SequentialRuleRunner::with_config(RunnerConfig {
        check_quality: settings.check_quality,
    });
    let result = match settings.mode {
        RunMode::Sequential => runner.run(&document, &units),
        RunMode::Parallel => run_parallel(&runner, &document, &units),
    };

    let changes = reconcile(
        &result.original_document,
        &result.final_document,
        &result.fix_log,
    );
    debug!(regions = changes.len(), "reconciled changes");

    let patch = render_patch(
        settings.document.as_str(),
        &result.original_document,
        &result.final_document,
    );

    let ended = Utc::now();
    let run = ReportRunInfo {
        run_id,
        started_at: started.to_rfc3339(),
        ended_at: Some(ended.to_rfc3339()),
        duration_ms: u64::try_from((ended - started).num_milliseconds()).ok(),
        mode: settings.mode.as_str().to_string(),
    };
    let report = build_report(settings, tool, run, &result, &changes, &loaded, &selected);

    Ok(CheckOutcome {
        result,
        changes,
        report,
        patch,
    })
}

/// Rules as listed by `list-rules`: everything, or one category's group.
pub fn list_rules(
    rules: &dyn RuleSource,
    category: Option<CheckCategory>,
) -> anyhow::Result<Vec<StyleRule>> {
    let db = rules.load_rules()?;
    Ok(match category {
        Some(c) => db.rules_for_categories(&[c]).into_iter().cloned().collect(),
        None => db.rules().to_vec(),
    })
}

/// Write `report.json`, `patch.diff` and `document.fixed.md` under `out_dir`.
pub fn write_check_artifacts(
    outcome: &CheckOutcome,
    out_dir: &Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    writer.create_dir_all(out_dir)?;

    let report_json =
        serde_json::to_string_pretty(&outcome.report).context("serialize report")?;
    writer.write_file(&out_dir.join(REPORT_FILE), report_json.as_bytes())?;
    writer.write_file(&out_dir.join(PATCH_FILE), outcome.patch.as_bytes())?;
    writer.write_file(
        &out_dir.join(FIXED_DOCUMENT_FILE),
        outcome.result.final_document.as_bytes(),
    )?;

    debug!(out_dir = %out_dir, "wrote check artifacts");
    Ok(())
}

/// Overwrite `document` with the fixed text when the outcome calls for it.
/// Returns whether anything was written.
pub fn write_fixed_document(
    outcome: &CheckOutcome,
    document: &Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<bool> {
    if !outcome.should_write_document() {
        return Ok(false);
    }
    writer
        .write_file(document, outcome.result.final_document.as_bytes())
        .with_context(|| format!("write fixed document {}", document))?;
    info!(document = %document, "document updated in place");
    Ok(true)
}

fn describe_categories(categories: &[CheckCategory]) -> String {
    CheckCategory::normalize(categories.to_vec())
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn build_report(
    settings: &CheckSettings,
    tool: ReportToolInfo,
    run: ReportRunInfo,
    result: &RunResult,
    changes: &[ChangedRegion],
    loaded: &[LoadedResponse],
    selected: &[&StyleRule],
) -> StylefixReport {
    let summary = result.summary();
    let changed = result.document_changed();

    let inputs_failed: Vec<InputFailure> = loaded
        .iter()
        .filter(|l| selected.iter().any(|r| r.rule_id == l.rule_id))
        .filter_map(|l| {
            l.response.as_ref().err().map(|e| InputFailure {
                path: l.path.to_string(),
                rule_id: l.rule_id.clone(),
                reason: e.to_string(),
            })
        })
        .collect();

    let mut reasons = Vec::new();
    if summary.fixes_applied > 0 {
        reasons.push("fixes_applied".to_string());
    }
    if summary.human_review > 0 {
        reasons.push("human_review".to_string());
    }
    if summary.rules_failed > 0 {
        reasons.push("rule_failures".to_string());
    }
    if !inputs_failed.is_empty() {
        reasons.push("partial_inputs".to_string());
    }
    if summary.issues_found > summary.fixes_applied + summary.human_review {
        reasons.push("unapplied_proposals".to_string());
    }

    let status = if summary.rules_total > 0 && summary.rules_failed == summary.rules_total {
        ReportStatus::Fail
    } else if reasons.is_empty() && result.warnings.is_empty() {
        ReportStatus::Pass
    } else {
        ReportStatus::Warn
    };

    StylefixReport {
        schema: STYLEFIX_REPORT_V1.to_string(),
        tool,
        run,
        document: ReportDocument {
            path: settings.document.to_string(),
            sha256_before: sha256_hex(result.original_document.as_bytes()),
            sha256_after: sha256_hex(result.final_document.as_bytes()),
            changed,
            written: settings.fix && changed,
        },
        verdict: ReportVerdict { status, reasons },
        summary,
        outcomes: result.outcomes.clone(),
        fix_log: result.fix_log.clone(),
        human_review: result.human_review_violations.clone(),
        changes: changes.to_vec(),
        warnings: result.warnings.clone(),
        inputs_failed,
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
