//! Default filesystem-backed port implementations, plus in-memory ones for embedding.

use crate::ports::{DocumentSource, ResponseSource, RuleSource, WritePort};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::collections::BTreeMap;
use stylefix_responses::LoadedResponse;
use stylefix_rules::{RuleDatabase, parse_rule_database};

/// Loads the rule database from a Markdown file.
#[derive(Debug, Clone)]
pub struct FsRuleSource {
    pub path: Utf8PathBuf,
}

impl FsRuleSource {
    pub fn new(path: Utf8PathBuf) -> Self {
        Self { path }
    }
}

impl RuleSource for FsRuleSource {
    fn load_rules(&self) -> anyhow::Result<RuleDatabase> {
        stylefix_rules::load_rule_database(&self.path)
    }
}

/// Parses a rule database held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryRuleSource {
    text: String,
}

impl InMemoryRuleSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl RuleSource for InMemoryRuleSource {
    fn load_rules(&self) -> anyhow::Result<RuleDatabase> {
        parse_rule_database(&self.text).context("parse in-memory rule database")
    }
}

/// Loads recordings via `stylefix_responses::load_responses`.
#[derive(Debug, Clone)]
pub struct FsResponseSource {
    pub dir: Utf8PathBuf,
}

impl FsResponseSource {
    pub fn new(dir: Utf8PathBuf) -> Self {
        Self { dir }
    }
}

impl ResponseSource for FsResponseSource {
    fn load_responses(&self) -> anyhow::Result<Vec<LoadedResponse>> {
        stylefix_responses::load_responses(&self.dir)
            .with_context(|| format!("load responses from {}", self.dir))
    }
}

/// Pre-loaded recordings, sorted by path on construction to match [`FsResponseSource`].
#[derive(Debug, Clone)]
pub struct InMemoryResponseSource {
    responses: Vec<LoadedResponse>,
}

impl InMemoryResponseSource {
    pub fn new(mut responses: Vec<LoadedResponse>) -> Self {
        responses.sort_by(|a, b| a.path.cmp(&b.path));
        Self { responses }
    }
}

impl ResponseSource for InMemoryResponseSource {
    fn load_responses(&self) -> anyhow::Result<Vec<LoadedResponse>> {
        Ok(self.responses.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct FsDocumentSource;

impl DocumentSource for FsDocumentSource {
    fn read_document(&self, path: &Utf8Path) -> anyhow::Result<String> {
        fs::read_to_string(path).with_context(|| format!("read document {}", path))
    }
}

/// Documents keyed by path.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentSource {
    documents: BTreeMap<Utf8PathBuf, String>,
}

impl InMemoryDocumentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, path: impl Into<Utf8PathBuf>, text: impl Into<String>) -> Self {
        self.documents.insert(path.into(), text.into());
        self
    }
}

impl DocumentSource for InMemoryDocumentSource {
    fn read_document(&self, path: &Utf8Path) -> anyhow::Result<String> {
        self.documents
            .get(path)
            .cloned()
            .with_context(|| format!("no document at {}", path))
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        fs::create_dir_all(path).with_context(|| format!("create_dir_all {}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylefix_responses::ResponseLoadError;
    use tempfile::TempDir;

    fn failed(path: &str) -> LoadedResponse {
        LoadedResponse {
            path: Utf8PathBuf::from(path),
            rule_id: Utf8Path::new(path).file_stem().unwrap_or("unknown").to_string(),
            response: Err(ResponseLoadError::Io {
                message: "stub".to_string(),
            }),
        }
    }

    fn utf8_root(temp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8")
    }

    #[test]
    fn in_memory_responses_sort_by_path() {
        let source = InMemoryResponseSource::new(vec![
            failed("responses/qe-z.md"),
            failed("responses/qe-a.md"),
            failed("responses/qe-m.json"),
        ]);
        let loaded = source.load_responses().unwrap();
        let ids: Vec<&str> = loaded.iter().map(|r| r.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["qe-a", "qe-m", "qe-z"]);
        assert!(loaded.iter().all(|r| r.response.is_err()));
    }

    #[test]
    fn in_memory_rules_parse_on_load() {
        let source =
            InMemoryRuleSource::new("### Rule: qe-a-001\n**Category:** rule\n**Title:** A\n");
        let db = source.load_rules().unwrap();
        assert_eq!(db.rules().len(), 1);
    }

    #[test]
    fn in_memory_document_lookup() {
        let docs = InMemoryDocumentSource::new().with_document("lecture.md", "text");
        assert_eq!(docs.read_document(Utf8Path::new("lecture.md")).unwrap(), "text");
        let err = docs.read_document(Utf8Path::new("other.md")).unwrap_err();
        assert!(err.to_string().contains("other.md"));
    }

    #[test]
    fn fs_sources_read_from_disk() {
        let temp = TempDir::new().expect("temp dir");
        let root = utf8_root(&temp);
        std::fs::create_dir_all(root.join("responses")).expect("mkdir");
        std::fs::write(root.join("responses/qe-a-001.json"), "[]").expect("write");
        std::fs::write(
            root.join("db.md"),
            "### Rule: qe-a-001\n**Category:** style\n**Title:** A\n",
        )
        .expect("write");
        std::fs::write(root.join("lecture.md"), "body\n").expect("write");

        let responses = FsResponseSource::new(root.join("responses"))
            .load_responses()
            .expect("responses");
        assert_eq!(responses.len(), 1);
        let db = FsRuleSource::new(root.join("db.md")).load_rules().expect("db");
        assert_eq!(db.rules()[0].label, "style");
        let doc = FsDocumentSource.read_document(&root.join("lecture.md")).expect("doc");
        assert_eq!(doc, "body\n");
    }

    #[test]
    fn fs_write_port_writes_and_creates_dirs() {
        let temp = TempDir::new().expect("temp dir");
        let root = utf8_root(&temp);
        let target = root.join("nested").join("report.json");

        let port = FsWritePort;
        port.write_file(&target, b"{}").expect("write");
        assert_eq!(std::fs::read_to_string(&target).expect("read"), "{}");

        let extra = root.join("extra");
        port.create_dir_all(&extra).expect("mkdir");
        assert!(extra.exists());
    }
}
