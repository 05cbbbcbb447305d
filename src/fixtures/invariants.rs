//! Post-synthesis invariant checks.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use super::Fixtures;
use super::attempts::latest_by_pair;
use crate::models::{AttemptStatus, SuiteType};

/// One broken invariant found in a built fixture set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A current pair has fewer attempts than required
    Coverage {
        cluster_region_id: String,
        service_id: String,
        found: usize,
        required: usize,
    },
    /// The latest attempt of a current pair is not at the current version
    StaleLatest {
        attempt_id: String,
        found: String,
        expected: String,
    },
    /// The latest attempt of a current pair is not healthy
    UnhealthyLatest {
        attempt_id: String,
        status: AttemptStatus,
        expected: AttemptStatus,
    },
    /// Attempts at `index` and `index + 1` are out of order
    SortOrder { index: usize },
    /// Two test runs share one `(attempt, suite)` pair
    DuplicateTestRun {
        attempt_id: String,
        suite_type: SuiteType,
    },
    /// `passed + failed + skipped != total`
    CountMismatch { run_id: String },
    DuplicateId { id: String },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coverage {
                cluster_region_id,
                service_id,
                found,
                required,
            } => write!(
                f,
                "coverage: {}/{} has {} attempts, requires {}",
                cluster_region_id, service_id, found, required
            ),
            Self::StaleLatest {
                attempt_id,
                found,
                expected,
            } => write!(
                f,
                "freshness: latest attempt {} is at {}, current is {}",
                attempt_id, found, expected
            ),
            Self::UnhealthyLatest {
                attempt_id,
                status,
                expected,
            } => write!(
                f,
                "freshness: latest attempt {} is {}, expected {}",
                attempt_id, status, expected
            ),
            Self::SortOrder { index } => {
                write!(f, "sort order: attempts {} and {} are out of order", index, index + 1)
            }
            Self::DuplicateTestRun {
                attempt_id,
                suite_type,
            } => write!(f, "uniqueness: {} has more than one {} run", attempt_id, suite_type),
            Self::CountMismatch { run_id } => {
                write!(f, "counts: run {} does not add up to its total", run_id)
            }
            Self::DuplicateId { id } => write!(f, "uniqueness: id {} is used more than once", id),
        }
    }
}

/// Check every output invariant, returning all violations found.
pub fn check_invariants(fixtures: &Fixtures) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let attempts = fixtures.list_deployment_attempts();

    let mut counts: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for attempt in attempts {
        *counts.entry(attempt.pair()).or_default() += 1;
    }
    let latest = latest_by_pair(attempts);

    for (cluster_region_id, service_id, expected) in fixtures.current_running().entries() {
        let found = counts
            .get(&(cluster_region_id, service_id))
            .copied()
            .unwrap_or(0);
        if found < fixtures.min_attempts() {
            violations.push(InvariantViolation::Coverage {
                cluster_region_id: cluster_region_id.to_string(),
                service_id: service_id.to_string(),
                found,
                required: fixtures.min_attempts(),
            });
        }

        let Some(&idx) = latest.get(&(cluster_region_id.to_string(), service_id.to_string())) else {
            continue;
        };
        let attempt = &attempts[idx];
        if fixtures.exceptions().contains(&attempt.id) {
            continue;
        }

        if attempt.build_version != expected {
            violations.push(InvariantViolation::StaleLatest {
                attempt_id: attempt.id.clone(),
                found: attempt.build_version.clone(),
                expected: expected.to_string(),
            });
        }
        if let Some(tier) = fixtures.catalog().tier_of(cluster_region_id) {
            let desired = AttemptStatus::healthy_for(tier);
            if attempt.status != desired {
                violations.push(InvariantViolation::UnhealthyLatest {
                    attempt_id: attempt.id.clone(),
                    status: attempt.status,
                    expected: desired,
                });
            }
        }
    }

    for (index, pair) in attempts.windows(2).enumerate() {
        if pair[0].started_at < pair[1].started_at {
            violations.push(InvariantViolation::SortOrder { index });
        }
    }

    let mut ids = HashSet::new();
    for attempt in attempts {
        if !ids.insert(attempt.id.as_str()) {
            violations.push(InvariantViolation::DuplicateId { id: attempt.id.clone() });
        }
    }

    let mut keys = HashSet::new();
    for run in fixtures.list_test_runs() {
        if !ids.insert(run.id.as_str()) {
            violations.push(InvariantViolation::DuplicateId { id: run.id.clone() });
        }
        if !keys.insert((run.attempt_id.as_str(), run.suite_type)) {
            violations.push(InvariantViolation::DuplicateTestRun {
                attempt_id: run.attempt_id.clone(),
                suite_type: run.suite_type,
            });
        }
        if !run.counts_consistent() {
            violations.push(InvariantViolation::CountMismatch { run_id: run.id.clone() });
        }
    }

    for run in fixtures.list_cluster_test_runs() {
        if !ids.insert(run.id.as_str()) {
            violations.push(InvariantViolation::DuplicateId { id: run.id.clone() });
        }
        if !run.counts_consistent() {
            violations.push(InvariantViolation::CountMismatch { run_id: run.id.clone() });
        }
    }

    violations
}
