use crate::runner::{SequentialRuleRunner, finish};
use crate::unit::RuleUnit;
use rayon::prelude::*;
use stylefix_types::{EditProposal, RunResult};
use tracing::info;

/// Evaluate every unit concurrently against its own copy of `document`, then fold the
/// proposals into one authoritative document in unit order.
///
/// Units never see each other's fixes, so a proposal written against text an earlier unit
/// already rewrote is skipped at merge time. This is an approximation of
/// [`SequentialRuleRunner::run`] that trades ordering guarantees for latency.
pub fn run_parallel(
    runner: &SequentialRuleRunner,
    document: &str,
    units: &[Box<dyn RuleUnit>],
) -> RunResult {
    info!(units = units.len(), "evaluating rule-units in parallel");

    let evaluations: Vec<anyhow::Result<Vec<EditProposal>>> = units
        .par_iter()
        .map(|unit| {
            let snapshot = document.to_owned();
            unit.evaluate(&snapshot)
        })
        .collect();

    let mut result = RunResult::new(document);
    for (unit, evaluation) in units.iter().zip(evaluations) {
        runner.settle(unit.as_ref(), evaluation, &mut result);
    }

    finish(&result);
    result
}
