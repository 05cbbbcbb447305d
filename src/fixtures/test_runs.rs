//! Service-level test-run backfill: functional, sanity, nightly regression
//! and canary suites derived from the final attempt list.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::Duration;
use tracing::debug;

use super::inputs::Catalog;
use super::roll::string_hash;
use crate::models::{DeploymentAttempt, PLACEHOLDER_REPORT_URL, SuiteType, TestRun};

pub const FUNCTIONAL_DELAY_MINUTES: i64 = 6;
pub const FUNCTIONAL_DURATION_SEC: u32 = 600;

pub const SANITY_TOTAL: u32 = 120;
pub const SANITY_DELAY_HOURS: i64 = 9;
pub const SANITY_DURATION_SEC: u32 = 540;

/// Roughly 60% of eligible attempts get a nightly regression run.
pub const NIGHTLY_ADMIT_MODULUS: u32 = 10;
pub const NIGHTLY_ADMIT_BELOW: u32 = 6;
pub const NIGHTLY_FAIL_MODULUS: u32 = 7;
pub const NIGHTLY_FAIL_PERCENT: u32 = 2;
pub const NIGHTLY_MIN_FAILED: u32 = 2;
pub const NIGHTLY_DELAY_HOURS: i64 = 8;
pub const NIGHTLY_DURATION_SEC: u32 = 2400;

pub const CANARY_FAIL_MODULUS: u32 = 8;
pub const CANARY_FAIL_PERCENT: u32 = 4;
pub const CANARY_MIN_FAILED: u32 = 1;
pub const CANARY_DELAY_MINUTES: i64 = 30;
pub const CANARY_BASE_DURATION_SEC: u32 = 300;
pub const CANARY_DURATION_JITTER_SEC: u32 = 120;

/// Per-service case counts and failure denylists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteBaselines {
    /// Functional and regression case count per service
    pub functional_counts: BTreeMap<String, u32>,
    pub default_functional_count: u32,
    /// Canary case count per service
    pub canary_counts: BTreeMap<String, u32>,
    pub default_canary_count: u32,
    /// Services whose nightly regression may report failures
    pub nightly_fail_services: BTreeSet<String>,
    /// Services whose canary may report failures
    pub canary_fail_services: BTreeSet<String>,
}

impl SuiteBaselines {
    pub fn functional_count(&self, service_id: &str) -> u32 {
        self.functional_counts
            .get(service_id)
            .copied()
            .unwrap_or(self.default_functional_count)
    }

    pub fn canary_count(&self, service_id: &str) -> u32 {
        self.canary_counts
            .get(service_id)
            .copied()
            .unwrap_or(self.default_canary_count)
    }
}

/// `max(minimum, total * percent / 100)`, capped at `total`.
fn injected_failures(total: u32, percent: u32, minimum: u32) -> u32 {
    let scaled = u64::from(total) * u64::from(percent) / 100;
    u32::try_from(scaled).unwrap_or(u32::MAX).max(minimum).min(total)
}

fn run(
    id: String,
    attempt: &DeploymentAttempt,
    suite_type: SuiteType,
    total: u32,
    failed: u32,
    duration_sec: u32,
    delay: Duration,
) -> TestRun {
    TestRun {
        id,
        attempt_id: attempt.id.clone(),
        suite_type,
        total,
        passed: total - failed,
        failed,
        skipped: 0,
        duration_sec,
        executed_at: attempt.started_at + delay,
        report_url: PLACEHOLDER_REPORT_URL.to_string(),
    }
}

/// Tracks which `(attempt_id, suite_type)` pairs already have a run.
struct RunLedger {
    runs: Vec<TestRun>,
    keys: HashSet<(String, SuiteType)>,
}

impl RunLedger {
    fn new(seed: &[TestRun]) -> Self {
        RunLedger {
            runs: seed.to_vec(),
            keys: seed
                .iter()
                .map(|r| (r.attempt_id.clone(), r.suite_type))
                .collect(),
        }
    }

    fn has(&self, attempt_id: &str, suite_type: SuiteType) -> bool {
        self.keys.contains(&(attempt_id.to_string(), suite_type))
    }

    fn push(&mut self, run: TestRun) {
        self.keys.insert((run.attempt_id.clone(), run.suite_type));
        self.runs.push(run);
    }
}

/// Seed runs followed by every synthesized run, never duplicating an
/// `(attempt_id, suite_type)` pair.
pub fn backfill_test_runs(
    seed: &[TestRun],
    attempts: &[DeploymentAttempt],
    catalog: &Catalog,
    baselines: &SuiteBaselines,
) -> Vec<TestRun> {
    let mut ledger = RunLedger::new(seed);

    for attempt in attempts {
        if !ledger.has(&attempt.id, SuiteType::Functional) {
            ledger.push(run(
                format!("tr:auto:{}:{}", attempt.id, SuiteType::Functional),
                attempt,
                SuiteType::Functional,
                baselines.functional_count(&attempt.service_id),
                0,
                FUNCTIONAL_DURATION_SEC,
                Duration::minutes(FUNCTIONAL_DELAY_MINUTES),
            ));
        }

        let runs_sanity = catalog
            .tier_of(&attempt.cluster_region_id)
            .is_some_and(|tier| tier.runs_sanity());
        if runs_sanity && !ledger.has(&attempt.id, SuiteType::Sanity) {
            ledger.push(run(
                format!("tr:auto:{}:{}", attempt.id, SuiteType::Sanity),
                attempt,
                SuiteType::Sanity,
                SANITY_TOTAL,
                0,
                SANITY_DURATION_SEC,
                Duration::hours(SANITY_DELAY_HOURS),
            ));
        }
    }

    for attempt in attempts {
        let eligible = catalog
            .tier_of(&attempt.cluster_region_id)
            .is_some_and(|tier| tier.runs_nightly());
        if !eligible || ledger.has(&attempt.id, SuiteType::Regression) {
            continue;
        }

        let hash = string_hash(&attempt.id);
        if hash % NIGHTLY_ADMIT_MODULUS >= NIGHTLY_ADMIT_BELOW {
            continue;
        }

        let total = baselines.functional_count(&attempt.service_id);
        let failing = baselines.nightly_fail_services.contains(&attempt.service_id)
            && hash % NIGHTLY_FAIL_MODULUS == 0;
        let failed = if failing {
            debug!("Injecting nightly failures into {}", attempt.id);
            injected_failures(total, NIGHTLY_FAIL_PERCENT, NIGHTLY_MIN_FAILED)
        } else {
            0
        };

        ledger.push(run(
            format!("tr:nightly:{}", attempt.id),
            attempt,
            SuiteType::Regression,
            total,
            failed,
            NIGHTLY_DURATION_SEC,
            Duration::hours(NIGHTLY_DELAY_HOURS),
        ));
    }

    for attempt in attempts {
        let eligible = catalog
            .tier_of(&attempt.cluster_region_id)
            .is_some_and(|tier| tier.is_production());
        if !eligible || ledger.has(&attempt.id, SuiteType::Canary) {
            continue;
        }

        let hash = string_hash(&attempt.id);
        let total = baselines.canary_count(&attempt.service_id);
        let failing = baselines.canary_fail_services.contains(&attempt.service_id)
            && hash % CANARY_FAIL_MODULUS == 0;
        let failed = if failing {
            debug!("Injecting canary failures into {}", attempt.id);
            injected_failures(total, CANARY_FAIL_PERCENT, CANARY_MIN_FAILED)
        } else {
            0
        };

        ledger.push(run(
            format!("tr:canary:{}", attempt.id),
            attempt,
            SuiteType::Canary,
            total,
            failed,
            CANARY_BASE_DURATION_SEC + hash % CANARY_DURATION_JITTER_SEC,
            Duration::minutes(CANARY_DELAY_MINUTES),
        ));
    }

    ledger.runs
}
