//! Recorded oracle responses.
//!
//! The style oracle is external; stylefix replays what it answered. Each rule's answer
//! is stored as `<rule_id>.md` (the oracle's Markdown layout) or `<rule_id>.json`.
//! Loading is tolerant: unknown fields are ignored, malformed Markdown degrades to an
//! empty response, and per-file failures are reported next to the files that loaded.

mod json;
mod load;
mod markdown;
mod model;

pub use json::parse_json_response;
pub use load::{LoadedResponse, ResponseLoadError, load_responses};
pub use markdown::parse_markdown_response;
pub use model::OracleResponse;
