//! Aggregations behind the dashboard's charts, risk lists and scorecards.
//!
//! Every function here is a pure read over already-built records; nothing
//! is cached and nothing mutates the fixture set.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::fixtures::semver;
use crate::fixtures::{Catalog, CurrentRunning, Fixtures};
use crate::models::{
    AttemptStatus, DeploymentAttempt, ReleaseTicket, Scorecard, ScorecardWeights, SuiteType,
    TestRun,
};
use crate::queries::latest_attempt;

// ============================================================================
// Daily series
// ============================================================================

/// Attempt outcomes started on one UTC day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyOutcome {
    pub day: NaiveDate,
    /// `SUCCESS` or `LIVE`
    pub healthy: usize,
    pub failed: usize,
    pub rollback: usize,
}

/// Pass percentage per suite for attempts started on one UTC day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyPassRate {
    pub day: NaiveDate,
    pub functional: Option<f64>,
    pub sanity: Option<f64>,
    pub regression: Option<f64>,
}

/// Deploy count and mean lead time for one UTC day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeployFrequency {
    pub day: NaiveDate,
    pub deploys: usize,
    /// Mean `ended - started` in minutes over finished attempts
    pub avg_lead_time_min: Option<f64>,
}

fn start_day(attempt: &DeploymentAttempt) -> NaiveDate {
    attempt.started_at.date_naive()
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Healthy, failed and rolled-back attempts per start day, oldest day first.
///
/// `IN_PROGRESS` attempts still open their day but count toward no bucket.
pub fn daily_outcomes<'a, I>(attempts: I) -> Vec<DailyOutcome>
where
    I: IntoIterator<Item = &'a DeploymentAttempt>,
{
    let mut days: BTreeMap<NaiveDate, DailyOutcome> = BTreeMap::new();
    for attempt in attempts {
        let day = start_day(attempt);
        let entry = days.entry(day).or_insert(DailyOutcome {
            day,
            healthy: 0,
            failed: 0,
            rollback: 0,
        });
        match attempt.status {
            AttemptStatus::Success | AttemptStatus::Live => entry.healthy += 1,
            AttemptStatus::Failed => entry.failed += 1,
            AttemptStatus::Rollback => entry.rollback += 1,
            AttemptStatus::InProgress => {}
        }
    }
    days.into_values().collect()
}

/// Per-day pass rates of the attempt-level suites.
///
/// Runs are bucketed by the start day of the attempt they belong to, so a
/// nightly executed after midnight still lands on its deploy day. Runs whose
/// attempt is not in `attempts` are ignored.
pub fn daily_pass_rates<'a>(
    attempts: &[&'a DeploymentAttempt],
    runs: &[&'a TestRun],
) -> Vec<DailyPassRate> {
    let day_of: HashMap<&str, NaiveDate> = attempts
        .iter()
        .map(|a| (a.id.as_str(), start_day(a)))
        .collect();

    // (passed, total) per (day, suite)
    let mut sums: HashMap<(NaiveDate, SuiteType), (u64, u64)> = HashMap::new();
    for run in runs {
        if !matches!(
            run.suite_type,
            SuiteType::Functional | SuiteType::Sanity | SuiteType::Regression
        ) {
            continue;
        }
        let Some(&day) = day_of.get(run.attempt_id.as_str()) else {
            continue;
        };
        let sum = sums.entry((day, run.suite_type)).or_insert((0, 0));
        sum.0 += u64::from(run.passed);
        sum.1 += u64::from(run.total);
    }

    let rate = |day: NaiveDate, suite: SuiteType| -> Option<f64> {
        match sums.get(&(day, suite)) {
            Some(&(passed, total)) if total > 0 => {
                Some(round_one_decimal(passed as f64 / total as f64 * 100.0))
            }
            _ => None,
        }
    };

    let mut days: Vec<NaiveDate> = day_of.values().copied().collect();
    days.sort();
    days.dedup();

    days.into_iter()
        .map(|day| DailyPassRate {
            day,
            functional: rate(day, SuiteType::Functional),
            sanity: rate(day, SuiteType::Sanity),
            regression: rate(day, SuiteType::Regression),
        })
        .collect()
}

/// Deploys per start day with the mean lead time of the finished ones.
pub fn deploy_frequency<'a, I>(attempts: I) -> Vec<DeployFrequency>
where
    I: IntoIterator<Item = &'a DeploymentAttempt>,
{
    // (deploys, lead-time sum, finished count)
    let mut days: BTreeMap<NaiveDate, (usize, f64, usize)> = BTreeMap::new();
    for attempt in attempts {
        let entry = days.entry(start_day(attempt)).or_insert((0, 0.0, 0));
        entry.0 += 1;
        if let Some(minutes) = attempt.duration_minutes() {
            entry.1 += minutes;
            entry.2 += 1;
        }
    }

    days.into_iter()
        .map(|(day, (deploys, sum, finished))| DeployFrequency {
            day,
            deploys,
            avg_lead_time_min: (finished > 0).then(|| round_one_decimal(sum / finished as f64)),
        })
        .collect()
}

// ============================================================================
// Risk lists
// ============================================================================

/// Rolled-back attempts, most recently ended first.
pub fn recent_rollbacks(fixtures: &Fixtures, limit: usize) -> Vec<&DeploymentAttempt> {
    let mut rollbacks: Vec<&DeploymentAttempt> = fixtures
        .list_deployment_attempts()
        .iter()
        .filter(|a| a.status == AttemptStatus::Rollback)
        .collect();
    rollbacks.sort_by_key(|a| (Reverse(a.ended_at.unwrap_or(a.started_at)), a.id.as_str()));
    rollbacks.truncate(limit);
    rollbacks
}

/// Nightly runs that reported at least one failure, most recent first.
pub fn failing_nightlies(fixtures: &Fixtures, limit: usize) -> Vec<&TestRun> {
    let mut failing: Vec<&TestRun> = fixtures
        .list_test_runs()
        .iter()
        .filter(|r| r.suite_type.is_nightly() && r.failed > 0)
        .collect();
    failing.sort_by_key(|r| (Reverse(r.executed_at), r.id.as_str()));
    failing.truncate(limit);
    failing
}

// ============================================================================
// Cluster snapshot & versions
// ============================================================================

/// Health of one cluster-region judged by the latest attempt of each service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSnapshot {
    #[serde(rename = "clusterId")]
    pub cluster_region_id: String,
    pub services: usize,
    pub healthy: usize,
    pub rollback: usize,
    pub failed: usize,
}

impl ClusterSnapshot {
    /// Anything other than a fully healthy set of latest attempts.
    pub fn needs_attention(&self) -> bool {
        self.healthy < self.services
    }
}

pub fn cluster_snapshot(fixtures: &Fixtures, cluster_region_id: &str) -> ClusterSnapshot {
    let mut snapshot = ClusterSnapshot {
        cluster_region_id: cluster_region_id.to_string(),
        services: 0,
        healthy: 0,
        rollback: 0,
        failed: 0,
    };

    for service in fixtures.catalog().services() {
        let Some(latest) = latest_attempt(fixtures, cluster_region_id, &service.id) else {
            continue;
        };
        snapshot.services += 1;
        match latest.status {
            AttemptStatus::Success | AttemptStatus::Live => snapshot.healthy += 1,
            AttemptStatus::Rollback => snapshot.rollback += 1,
            AttemptStatus::Failed => snapshot.failed += 1,
            AttemptStatus::InProgress => {}
        }
    }
    snapshot
}

/// One service's running version on every cluster-region that reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VersionRow {
    pub service_id: String,
    /// Cluster-region id to running version
    pub versions: BTreeMap<String, String>,
}

impl VersionRow {
    /// True when every reporting cluster-region runs the same build.
    pub fn is_uniform(&self) -> bool {
        let mut versions = self.versions.values();
        match versions.next() {
            Some(first) => versions.all(|v| v == first),
            None => true,
        }
    }
}

/// Rows in catalog service order.
pub fn version_matrix(catalog: &Catalog, current: &CurrentRunning) -> Vec<VersionRow> {
    catalog
        .services()
        .iter()
        .map(|service| VersionRow {
            service_id: service.id.clone(),
            versions: catalog
                .cluster_regions()
                .iter()
                .filter_map(|cr| {
                    current
                        .version(&cr.id, &service.id)
                        .map(|v| (cr.id.clone(), v.to_string()))
                })
                .collect(),
        })
        .collect()
}

// ============================================================================
// Release notes
// ============================================================================

/// Tickets shipped after `from` up to and including `to`.
pub fn tickets_between<'a>(
    tickets: &'a BTreeMap<String, Vec<ReleaseTicket>>,
    service_id: &str,
    from: &str,
    to: &str,
) -> Vec<&'a ReleaseTicket> {
    tickets
        .get(service_id)
        .map(|list| {
            list.iter()
                .filter(|t| {
                    semver::compare(&t.version, from).is_gt()
                        && semver::compare(&t.version, to).is_le()
                })
                .collect()
        })
        .unwrap_or_default()
}

// ============================================================================
// Scorecards
// ============================================================================

/// Band a weighted score falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTone {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreTone {
    pub fn for_score(score: u32) -> Self {
        match score {
            90.. => Self::Excellent,
            80..=89 => Self::Good,
            70..=79 => Self::Fair,
            _ => Self::Poor,
        }
    }

    /// Badge colour shown on the dashboard.
    pub fn tone(&self) -> &'static str {
        match self {
            Self::Excellent => "emerald",
            Self::Good => "violet",
            Self::Fair => "amber",
            Self::Poor => "rose",
        }
    }
}

/// Weighted mean of the category scores, rounded half up.
///
/// Returns 0 when every weight is zero.
pub fn weighted_score(scorecard: &Scorecard, weights: &ScorecardWeights) -> u32 {
    let total = u64::from(weights.total());
    if total == 0 {
        return 0;
    }
    let sum = u64::from(scorecard.gameday) * u64::from(weights.gameday)
        + u64::from(scorecard.outages) * u64::from(weights.outages)
        + u64::from(scorecard.tests) * u64::from(weights.tests)
        + u64::from(scorecard.incidents) * u64::from(weights.incidents)
        + u64::from(scorecard.readiness) * u64::from(weights.readiness);
    let rounded = (sum * 2 + total) / (total * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}
