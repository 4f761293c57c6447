//! Configuration file loading for stylefix.
//!
//! Discovers and loads `stylefix.toml` from the working directory (or `--config`).
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use stylefix_core::CheckCategory;
use stylefix_core::settings::{CheckSettings, RunMode, default_out_dir};
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "stylefix.toml";

/// Top-level configuration from stylefix.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StylefixConfig {
    pub rules: RulesConfig,
    pub responses: ResponsesConfig,
    pub output: OutputConfig,
    pub run: RunConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Path to the Markdown rule database.
    pub database: Option<Utf8PathBuf>,

    /// Check categories to run; empty means all.
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResponsesConfig {
    /// Directory holding `<rule_id>.md|json` recordings.
    pub dir: Option<Utf8PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub out_dir: Option<Utf8PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub parallel: bool,
    pub fix: bool,
    pub check_quality: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            fix: false,
            check_quality: true,
        }
    }
}

/// Discover `stylefix.toml` in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!(path = %config_path, "found config file");
        Some(config_path)
    } else {
        debug!(path = %config_path, "no config file");
        None
    }
}

pub fn load_config(path: &Utf8Path) -> anyhow::Result<StylefixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<StylefixConfig> {
    let config: StylefixConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load the explicit config if given, else the discovered one, else defaults.
///
/// An explicit path that does not exist is an error.
pub fn load_or_default(
    explicit: Option<&Utf8Path>,
    dir: &Utf8Path,
) -> anyhow::Result<StylefixConfig> {
    match explicit {
        Some(path) => load_config(path),
        None => match discover_config(dir) {
            Some(path) => load_config(&path),
            None => Ok(StylefixConfig::default()),
        },
    }
}

/// `check` flags that may override the config file.
#[derive(Debug, Clone, Default)]
pub struct CheckOverrides {
    pub rules_db: Option<Utf8PathBuf>,
    pub responses_dir: Option<Utf8PathBuf>,
    pub out_dir: Option<Utf8PathBuf>,
    /// Comma-separated category list.
    pub categories: Option<String>,
    pub fix: bool,
    pub parallel: bool,
    pub no_quality_checks: bool,
}

/// Merged configuration combining config file and CLI arguments.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub rules_db: Utf8PathBuf,
    pub responses_dir: Utf8PathBuf,
    /// `None` means next to the document.
    pub out_dir: Option<Utf8PathBuf>,
    pub categories: Vec<CheckCategory>,
    pub fix: bool,
    pub parallel: bool,
    pub check_quality: bool,
}

impl MergedConfig {
    /// Lower into pipeline settings for `document`.
    pub fn into_settings(self, document: Utf8PathBuf) -> CheckSettings {
        CheckSettings {
            out_dir: self.out_dir.unwrap_or_else(|| default_out_dir(&document)),
            document,
            rules_db: self.rules_db,
            responses_dir: self.responses_dir,
            categories: self.categories,
            fix: self.fix,
            mode: if self.parallel {
                RunMode::Parallel
            } else {
                RunMode::Sequential
            },
            check_quality: self.check_quality,
        }
    }
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: StylefixConfig,
}

impl ConfigMerger {
    pub fn new(config: StylefixConfig) -> Self {
        Self { config }
    }

    /// Merge with `check` arguments.
    ///
    /// Paths and the category list from the CLI replace the config values. Boolean flags
    /// can only switch a behaviour on; `--no-quality-checks` switches quality checks off.
    pub fn merge_check_args(self, cli: &CheckOverrides) -> anyhow::Result<MergedConfig> {
        let defaults = CheckSettings::default();
        let categories = match cli.categories.as_deref() {
            Some(list) => CheckCategory::parse_list(list).context("--categories")?,
            None => CheckCategory::parse_list(&self.config.rules.categories.join(","))
                .context("[rules] categories")?,
        };

        Ok(MergedConfig {
            rules_db: cli
                .rules_db
                .clone()
                .or(self.config.rules.database)
                .unwrap_or(defaults.rules_db),
            responses_dir: cli
                .responses_dir
                .clone()
                .or(self.config.responses.dir)
                .unwrap_or(defaults.responses_dir),
            out_dir: cli.out_dir.clone().or(self.config.output.out_dir),
            categories,
            fix: cli.fix || self.config.run.fix,
            parallel: cli.parallel || self.config.run.parallel,
            check_quality: !cli.no_quality_checks && self.config.run.check_quality,
        })
    }

    /// Rule database for `list-rules`: CLI path, then config, then default.
    pub fn rules_db(self, cli: Option<&Utf8Path>) -> Utf8PathBuf {
        cli.map(Utf8Path::to_path_buf)
            .or(self.config.rules.database)
            .unwrap_or(CheckSettings::default().rules_db)
    }
}
