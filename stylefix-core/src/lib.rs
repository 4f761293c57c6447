//! Embeddable core library for stylefix.
//!
//! Provides a clap-free, I/O-abstracted entry point for checking one document
//! against the style-guide rule database with recorded oracle responses.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`RuleSource`](ports::RuleSource): load the rule database
//! - [`ResponseSource`](ports::ResponseSource): load recorded oracle responses
//! - [`DocumentSource`](ports::DocumentSource): read the document under review
//! - [`WritePort`](ports::WritePort): write files and create directories
//!
//! The [`adapters`] module provides filesystem-backed and in-memory implementations.
//!
//! # Entry points
//!
//! - [`run_check`](pipeline::run_check): evaluate, apply, reconcile and build the report
//! - [`write_check_artifacts`](pipeline::write_check_artifacts) and
//!   [`write_fixed_document`](pipeline::write_fixed_document): persist the outcome

pub mod adapters;
pub mod oracle;
pub mod pipeline;
pub mod ports;
pub mod settings;

// Re-exported so embedders don't need the leaf crates directly.
pub use stylefix_responses::{LoadedResponse, OracleResponse, ResponseLoadError};
pub use stylefix_rules::{CheckCategory, RuleDatabase, StyleRule};
