//! Style-guide rule database.
//!
//! The database is a Markdown file: rules are `### Rule: <id>` sections carrying a
//! `**Category:**` label and bold-labelled fields, grouped by `<!-- GROUP:NAME-START -->`
//! markers. This crate turns that file into typed [`StyleRule`]s; it never talks to an oracle.

mod category;
mod error;
mod model;
mod parse;

pub use category::CheckCategory;
pub use error::RuleDbError;
pub use model::{RuleDatabase, StyleRule};
pub use parse::parse_rule_database;

use anyhow::Context;
use camino::Utf8Path;
use fs_err as fs;
use tracing::debug;

/// Read and parse the rule database at `path`.
pub fn load_rule_database(path: &Utf8Path) -> anyhow::Result<RuleDatabase> {
    let text = fs::read_to_string(path).with_context(|| format!("read rule database {}", path))?;
    let db = parse_rule_database(&text).with_context(|| format!("parse rule database {}", path))?;
    debug!(
        path = %path,
        rules = db.rules().len(),
        version = %db.version(),
        "loaded rule database"
    );
    Ok(db)
}
