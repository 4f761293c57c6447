mod config;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use config::{CheckOverrides, ConfigMerger};
use std::process::ExitCode;
use stylefix_core::CheckCategory;
use stylefix_core::adapters::{FsDocumentSource, FsResponseSource, FsRuleSource, FsWritePort};
use stylefix_core::pipeline::{
    REPORT_FILE, list_rules, run_check, write_check_artifacts, write_fixed_document,
};
use stylefix_types::report::ReportToolInfo;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "stylefix",
    version,
    about = "Apply recorded style-guide fixes to a Markdown lecture and report what changed."
)]
struct Cli {
    /// Config file (default: ./stylefix.toml when present).
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run every selected rule against a document and write the report.
    Check(CheckArgs),
    /// List rules from the rule database.
    ListRules(ListRulesArgs),
}

#[derive(Debug, Parser)]
struct CheckArgs {
    /// Markdown document to check.
    document: Utf8PathBuf,

    /// Rule database (default: style-guide-database.md).
    #[arg(long)]
    rules_db: Option<Utf8PathBuf>,

    /// Directory of recorded oracle responses (default: responses).
    #[arg(long)]
    responses_dir: Option<Utf8PathBuf>,

    /// Comma-separated check categories (default: all).
    #[arg(long)]
    categories: Option<String>,

    /// Overwrite the document in place when fixes were applied.
    #[arg(long, default_value_t = false)]
    fix: bool,

    /// Evaluate rules concurrently against the original document.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Skip the fix-quality warnings.
    #[arg(long, default_value_t = false)]
    no_quality_checks: bool,

    /// Output directory (default: <document dir>/artifacts/stylefix).
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct ListRulesArgs {
    /// Rule database (default: style-guide-database.md).
    #[arg(long)]
    rules_db: Option<Utf8PathBuf>,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Only rules of this check category.
    #[arg(long)]
    category: Option<String>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let file_config = config::load_or_default(cli.config.as_deref(), Utf8Path::new("."))
        .context("load stylefix.toml config")?;
    let merger = ConfigMerger::new(file_config);

    match cli.cmd {
        Command::Check(args) => cmd_check(args, merger),
        Command::ListRules(args) => cmd_list_rules(args, merger),
    }
}

fn tool_info() -> ReportToolInfo {
    ReportToolInfo {
        name: "stylefix".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        commit: None,
    }
}

fn cmd_check(args: CheckArgs, merger: ConfigMerger) -> anyhow::Result<()> {
    let merged = merger.merge_check_args(&CheckOverrides {
        rules_db: args.rules_db,
        responses_dir: args.responses_dir,
        out_dir: args.out_dir,
        categories: args.categories,
        fix: args.fix,
        parallel: args.parallel,
        no_quality_checks: args.no_quality_checks,
    })?;
    let settings = merged.into_settings(args.document);
    debug!(?settings, "merged settings");

    let outcome = run_check(
        &settings,
        &FsRuleSource::new(settings.rules_db.clone()),
        &FsResponseSource::new(settings.responses_dir.clone()),
        &FsDocumentSource,
        tool_info(),
    )?;

    let writer = FsWritePort;
    write_check_artifacts(&outcome, &settings.out_dir, &writer)?;
    let written = write_fixed_document(&outcome, &settings.document, &writer)?;

    let summary = &outcome.report.summary;
    println!(
        "{}: {} rules, {} issues, {} fixes applied, {} for human review, {} failed",
        settings.document,
        summary.rules_total,
        summary.issues_found,
        summary.fixes_applied,
        summary.human_review,
        summary.rules_failed
    );
    for warning in &outcome.report.warnings {
        println!("  warning: {warning}");
    }
    if written {
        println!("updated {}", settings.document);
    } else if outcome.result.document_changed() {
        println!("run with --fix to update {}", settings.document);
    }
    println!("report: {}", settings.out_dir.join(REPORT_FILE));
    Ok(())
}

fn cmd_list_rules(args: ListRulesArgs, merger: ConfigMerger) -> anyhow::Result<()> {
    let category = args
        .category
        .as_deref()
        .map(str::parse::<CheckCategory>)
        .transpose()?;
    let rules_db = merger.rules_db(args.rules_db.as_deref());
    let rules = list_rules(&FsRuleSource::new(rules_db), category)?;

    match args.format {
        OutputFormat::Text => {
            println!("  {:<24} {:<8} {:<12} TITLE", "RULE", "LABEL", "GROUP");
            println!("  {:<24} {:<8} {:<12} -----", "----", "-----", "-----");
            for rule in &rules {
                println!(
                    "  {:<24} {:<8} {:<12} {}",
                    rule.rule_id,
                    rule.label,
                    rule.group.as_deref().unwrap_or("-"),
                    rule.title
                );
            }
            println!();
            let actionable = rules.iter().filter(|r| r.is_actionable()).count();
            println!("{} rules ({} actionable)", rules.len(), actionable);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rules)?);
        }
    }
    Ok(())
}
