//! Port traits abstracting all I/O away from the pipeline.

use camino::Utf8Path;
use stylefix_responses::LoadedResponse;
use stylefix_rules::RuleDatabase;

/// Source of the style-guide rule database.
pub trait RuleSource {
    fn load_rules(&self) -> anyhow::Result<RuleDatabase>;
}

/// Source of recorded oracle responses.
pub trait ResponseSource {
    fn load_responses(&self) -> anyhow::Result<Vec<LoadedResponse>>;
}

/// Reads the document under review.
pub trait DocumentSource {
    fn read_document(&self, path: &Utf8Path) -> anyhow::Result<String>;
}

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}
