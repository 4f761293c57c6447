//! Domain logic: run an ordered list of rule-units against a document.
//!
//! This crate owns *which* proposals are applied and in what order, and keeps the fix log.
//! It does not own *how* a single batch is applied; that's the `stylefix-edit` crate.
//! Rule evaluation itself (the oracle) sits behind the [`RuleUnit`] port.

mod parallel;
mod runner;
mod unit;

pub use parallel::run_parallel;
pub use runner::{RunnerConfig, SequentialRuleRunner};
pub use unit::{FnRuleUnit, RuleUnit};
