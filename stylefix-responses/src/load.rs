use crate::json::parse_json_response;
use crate::markdown::parse_markdown_response;
use crate::model::OracleResponse;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use glob::glob;
use stylefix_types::schema::STYLEFIX_RESPONSE_V1;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct LoadedResponse {
    pub path: Utf8PathBuf,
    /// File stem, which names the rule the recording answers.
    pub rule_id: String,
    pub response: Result<OracleResponse, ResponseLoadError>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResponseLoadError {
    #[error("io error: {message}")]
    Io { message: String },

    #[error("json parse error: {message}")]
    Json { message: String },
}

fn parse_file(path: &Utf8Path) -> Result<OracleResponse, ResponseLoadError> {
    let text = fs::read_to_string(path).map_err(|e| ResponseLoadError::Io {
        message: e.to_string(),
    })?;
    if path.extension() == Some("json") {
        let response = parse_json_response(&text).map_err(|e| ResponseLoadError::Json {
            message: e.to_string(),
        })?;
        if let Some(schema) = response.schema.as_deref()
            && schema != STYLEFIX_RESPONSE_V1
        {
            warn!(path = %path, schema = %schema, "unexpected response schema; loading anyway");
        }
        Ok(response)
    } else {
        Ok(parse_markdown_response(&text))
    }
}

/// Load every `<rule_id>.md` and `<rule_id>.json` recording under `dir`.
///
/// A missing directory yields nothing. Per-file failures are kept in the result rather
/// than aborting the scan. Output is sorted by path.
pub fn load_responses(dir: &Utf8Path) -> anyhow::Result<Vec<LoadedResponse>> {
    let mut out = Vec::new();
    for ext in ["md", "json"] {
        let pattern = dir.join(format!("*.{ext}"));
        debug!(pattern = %pattern, "scanning for recorded responses");

        for entry in glob(pattern.as_str()).with_context(|| format!("glob {}", pattern))? {
            let path = entry.map_err(|e| anyhow::anyhow!("glob error: {e}"))?;
            let path = Utf8PathBuf::from_path_buf(path)
                .map_err(|p| anyhow::anyhow!("non-UTF-8 response path: {}", p.display()))?;
            let Some(rule_id) = path.file_stem().map(str::to_string) else {
                continue;
            };

            let response = parse_file(&path);
            if let Err(err) = &response {
                warn!(path = %path, rule_id = %rule_id, error = %err, "failed to load response");
            }
            out.push(LoadedResponse {
                path,
                rule_id,
                response,
            });
        }
    }

    out.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(out)
}
