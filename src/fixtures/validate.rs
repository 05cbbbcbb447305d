//! Consistency checks over the hand-authored inputs.

use std::collections::HashSet;

use super::inputs::FixtureInputs;
use crate::error::{AppError, AppResult};

/// Reject inputs the synthesizer cannot build a consistent history from.
///
/// Collects every problem and reports them together.
pub fn validate_inputs(inputs: &FixtureInputs) -> AppResult<()> {
    let mut errors = Vec::new();
    let catalog = &inputs.catalog;

    let mut attempt_ids = HashSet::new();
    for attempt in &inputs.seed_attempts {
        if !attempt_ids.insert(attempt.id.as_str()) {
            errors.push(format!("duplicate attempt id {}", attempt.id));
        }
        if catalog.cluster_region(&attempt.cluster_region_id).is_none() {
            errors.push(format!(
                "attempt {} references unknown cluster-region {}",
                attempt.id, attempt.cluster_region_id
            ));
        }
        if catalog.service(&attempt.service_id).is_none() {
            errors.push(format!(
                "attempt {} references unknown service {}",
                attempt.id, attempt.service_id
            ));
        }
    }

    for (cluster_region_id, service_id, _) in inputs.current_running.entries() {
        if catalog.cluster_region(cluster_region_id).is_none() {
            errors.push(format!("current version listed for unknown cluster-region {}", cluster_region_id));
        }
        if catalog.service(service_id).is_none() {
            errors.push(format!(
                "current version listed for unknown service {} on {}",
                service_id, cluster_region_id
            ));
        }
    }

    let mut run_ids = HashSet::new();
    let mut run_keys = HashSet::new();
    for run in &inputs.seed_test_runs {
        if !run_ids.insert(run.id.as_str()) {
            errors.push(format!("duplicate test run id {}", run.id));
        }
        if !attempt_ids.contains(run.attempt_id.as_str()) {
            errors.push(format!("test run {} references unknown attempt {}", run.id, run.attempt_id));
        }
        if !run_keys.insert((run.attempt_id.as_str(), run.suite_type)) {
            errors.push(format!(
                "test run {} duplicates {} for attempt {}",
                run.id, run.suite_type, run.attempt_id
            ));
        }
        if run.suite_type.is_cluster_level() {
            errors.push(format!(
                "test run {} uses cluster-level suite {}",
                run.id, run.suite_type
            ));
        }
        if !run.counts_consistent() {
            errors.push(format!(
                "test run {} counts do not add up: {} + {} + {} != {}",
                run.id, run.passed, run.failed, run.skipped, run.total
            ));
        }
    }

    for pinned in inputs.exceptions.iter() {
        if !attempt_ids.contains(pinned) {
            errors.push(format!("exception ledger names unknown attempt {}", pinned));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::InvalidSeed(errors.join("; ")))
    }
}
