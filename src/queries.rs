//! Read-only lookups over a built fixture set.

use std::cmp::Reverse;

use crate::error::{AppError, AppResult};
use crate::fixtures::Fixtures;
use crate::fixtures::attempts::supersedes;
use crate::models::{AttemptStatus, ClusterTestRun, DeploymentAttempt, SuiteType, TestRun};

// ============================================================================
// Deployment Attempts
// ============================================================================

/// Predicate over deployment attempts; `None` fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttemptFilter {
    pub cluster_region_id: Option<String>,
    pub service_id: Option<String>,
    pub status: Option<AttemptStatus>,
}

impl AttemptFilter {
    pub fn matches(&self, attempt: &DeploymentAttempt) -> bool {
        self.cluster_region_id
            .as_deref()
            .is_none_or(|id| attempt.cluster_region_id == id)
            && self
                .service_id
                .as_deref()
                .is_none_or(|id| attempt.service_id == id)
            && self.status.is_none_or(|status| attempt.status == status)
    }
}

/// Matching attempts, newest first.
pub fn list_attempts<'a>(fixtures: &'a Fixtures, filter: &AttemptFilter) -> Vec<&'a DeploymentAttempt> {
    fixtures
        .list_deployment_attempts()
        .iter()
        .filter(|a| filter.matches(a))
        .collect()
}

/// Get attempt by id.
pub fn find_attempt<'a>(fixtures: &'a Fixtures, id: &str) -> AppResult<&'a DeploymentAttempt> {
    fixtures
        .list_deployment_attempts()
        .iter()
        .find(|a| a.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Deployment attempt {}", id)))
}

/// Version-latest attempt of a pair; equal versions prefer the later start.
pub fn latest_attempt<'a>(
    fixtures: &'a Fixtures,
    cluster_region_id: &str,
    service_id: &str,
) -> Option<&'a DeploymentAttempt> {
    let mut latest: Option<&'a DeploymentAttempt> = None;
    for attempt in fixtures.list_deployment_attempts() {
        if attempt.pair() != (cluster_region_id, service_id) {
            continue;
        }
        if latest.is_none_or(|tracked| supersedes(attempt, tracked)) {
            latest = Some(attempt);
        }
    }
    latest
}

// ============================================================================
// Test Runs
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestRunFilter {
    pub attempt_id: Option<String>,
    pub suite_type: Option<SuiteType>,
}

impl TestRunFilter {
    pub fn matches(&self, run: &TestRun) -> bool {
        self.attempt_id
            .as_deref()
            .is_none_or(|id| run.attempt_id == id)
            && self.suite_type.is_none_or(|suite| run.suite_type == suite)
    }
}

pub fn list_test_runs<'a>(fixtures: &'a Fixtures, filter: &TestRunFilter) -> Vec<&'a TestRun> {
    fixtures
        .list_test_runs()
        .iter()
        .filter(|r| filter.matches(r))
        .collect()
}

/// Every run recorded against one attempt.
pub fn test_runs_for_attempt<'a>(fixtures: &'a Fixtures, attempt_id: &str) -> Vec<&'a TestRun> {
    list_test_runs(
        fixtures,
        &TestRunFilter {
            attempt_id: Some(attempt_id.to_string()),
            suite_type: None,
        },
    )
}

// ============================================================================
// Cluster Test Runs
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterTestRunFilter {
    pub cluster_region_id: Option<String>,
    pub suite_type: Option<SuiteType>,
}

impl ClusterTestRunFilter {
    pub fn matches(&self, run: &ClusterTestRun) -> bool {
        self.cluster_region_id
            .as_deref()
            .is_none_or(|id| run.cluster_region_id == id)
            && self.suite_type.is_none_or(|suite| run.suite_type == suite)
    }
}

/// Matching cluster runs, most recent day first.
pub fn list_cluster_test_runs<'a>(
    fixtures: &'a Fixtures,
    filter: &ClusterTestRunFilter,
) -> Vec<&'a ClusterTestRun> {
    let mut runs: Vec<_> = fixtures
        .list_cluster_test_runs()
        .iter()
        .filter(|r| filter.matches(r))
        .collect();
    runs.sort_by_key(|r| Reverse(r.executed_at));
    runs
}
