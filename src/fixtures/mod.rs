//! Deterministic synthesis of the deployment and test history.
//!
//! [`build_fixtures`] runs once over a [`FixtureInputs`] bundle:
//!
//! 1. validate the seed tables
//! 2. backfill attempts up to the per-pair minimum
//! 3. anchor each current version as a real attempt
//! 4. settle the latest attempt of every pair into a healthy status
//! 5. sort attempts newest first
//! 6. backfill functional, sanity, regression and canary runs
//! 7. synthesize the cluster-wide suites
//!
//! The resulting [`Fixtures`] value is immutable and handed to every reader.

pub mod attempts;
pub mod cluster_runs;
pub mod inputs;
pub mod invariants;
pub mod roll;
pub mod semver;
pub mod test_runs;
pub mod validate;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::info;
use utoipa::ToSchema;

use crate::config::{self, defaults};
use crate::error::AppResult;
use crate::models::{ClusterTestRun, DeploymentAttempt, TestRun};

pub use cluster_runs::ClusterSuiteProfile;
pub use inputs::{Catalog, CurrentRunning, ExceptionLedger, FixtureInputs, ReferenceData};
pub use invariants::{InvariantViolation, check_invariants};
pub use semver::Rollover;
pub use test_runs::SuiteBaselines;

/// How to treat a catalog pair that has no current version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnMissingCurrentVersion {
    /// Only backfill pairs listed in CurrentRunning
    #[default]
    Skip,
    /// Backfill every catalog pair, using `0.0.0` when no version is listed
    AssumeZero,
}

impl OnMissingCurrentVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::AssumeZero => "assume-zero",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "skip" => Some(Self::Skip),
            "assume-zero" | "assume_zero" | "assumezero" => Some(Self::AssumeZero),
            _ => None,
        }
    }
}

impl std::fmt::Display for OnMissingCurrentVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Knobs of one synthesis pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthesisOptions {
    /// Backfilled attempt `i` starts `i + 1` hours before this instant
    pub reference_time: DateTime<Utc>,
    /// Day 0 of the cluster-wide suites
    pub cluster_suite_time: DateTime<Utc>,
    pub min_attempts: usize,
    pub on_missing_current: OnMissingCurrentVersion,
    /// Add an attempt at the current version when none exists
    pub anchor_current_version: bool,
    pub rollover: Rollover,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        SynthesisOptions {
            reference_time: config::default_instant(defaults::REFERENCE_TIME),
            cluster_suite_time: config::default_instant(defaults::CLUSTER_SUITE_TIME),
            min_attempts: defaults::MIN_ATTEMPTS,
            on_missing_current: OnMissingCurrentVersion::default(),
            anchor_current_version: defaults::ANCHOR_CURRENT,
            rollover: Rollover {
                patch: defaults::PATCH_ROLLOVER,
                minor: defaults::MINOR_ROLLOVER,
            },
        }
    }
}

/// Counters collected while building.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuildStats {
    pub seed_attempts: usize,
    pub backfilled_attempts: usize,
    pub anchored_attempts: usize,
    /// Latest attempts rewritten to a healthy status
    pub normalized_attempts: usize,
    pub seed_test_runs: usize,
    pub synthesized_test_runs: usize,
    pub cluster_test_runs: usize,
}

/// Overview of a built fixture set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FixtureSummary {
    pub attempts: usize,
    /// Attempt count per status
    pub attempts_by_status: BTreeMap<String, usize>,
    pub test_runs: usize,
    /// Test run count per suite
    pub test_runs_by_suite: BTreeMap<String, usize>,
    pub cluster_test_runs: usize,
    pub stats: BuildStats,
    /// Hex SHA-256 of the three collections
    pub digest: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Collections<'a> {
    deployment_attempts: &'a [DeploymentAttempt],
    test_runs: &'a [TestRun],
    cluster_test_runs: &'a [ClusterTestRun],
}

/// Immutable result of one synthesis pass.
#[derive(Debug, Clone)]
pub struct Fixtures {
    catalog: Catalog,
    current_running: CurrentRunning,
    exceptions: ExceptionLedger,
    reference: ReferenceData,
    min_attempts: usize,
    deployment_attempts: Vec<DeploymentAttempt>,
    test_runs: Vec<TestRun>,
    cluster_test_runs: Vec<ClusterTestRun>,
    stats: BuildStats,
}

impl Fixtures {
    /// All attempts, newest `started_at` first.
    pub fn list_deployment_attempts(&self) -> &[DeploymentAttempt] {
        &self.deployment_attempts
    }

    /// Seed runs followed by synthesized ones.
    pub fn list_test_runs(&self) -> &[TestRun] {
        &self.test_runs
    }

    pub fn list_cluster_test_runs(&self) -> &[ClusterTestRun] {
        &self.cluster_test_runs
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn current_running(&self) -> &CurrentRunning {
        &self.current_running
    }

    pub fn exceptions(&self) -> &ExceptionLedger {
        &self.exceptions
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn min_attempts(&self) -> usize {
        self.min_attempts
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Lowercase hex SHA-256 of the JSON encoding of the three collections.
    pub fn digest(&self) -> AppResult<String> {
        let collections = Collections {
            deployment_attempts: &self.deployment_attempts,
            test_runs: &self.test_runs,
            cluster_test_runs: &self.cluster_test_runs,
        };
        let bytes = serde_json::to_vec(&collections)?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }

    pub fn summary(&self) -> AppResult<FixtureSummary> {
        let mut attempts_by_status = BTreeMap::new();
        for attempt in &self.deployment_attempts {
            *attempts_by_status
                .entry(attempt.status.as_str().to_string())
                .or_insert(0) += 1;
        }

        let mut test_runs_by_suite = BTreeMap::new();
        for run in &self.test_runs {
            *test_runs_by_suite
                .entry(run.suite_type.as_str().to_string())
                .or_insert(0) += 1;
        }
        for run in &self.cluster_test_runs {
            *test_runs_by_suite
                .entry(run.suite_type.as_str().to_string())
                .or_insert(0) += 1;
        }

        Ok(FixtureSummary {
            attempts: self.deployment_attempts.len(),
            attempts_by_status,
            test_runs: self.test_runs.len(),
            test_runs_by_suite,
            cluster_test_runs: self.cluster_test_runs.len(),
            stats: self.stats,
            digest: self.digest()?,
        })
    }
}

/// Validate `inputs` and synthesize the complete history.
pub fn build_fixtures(inputs: FixtureInputs, options: &SynthesisOptions) -> AppResult<Fixtures> {
    validate::validate_inputs(&inputs)?;

    let FixtureInputs {
        catalog,
        current_running,
        seed_attempts,
        seed_test_runs,
        exceptions,
        suite_baselines,
        cluster_suites,
        reference,
    } = inputs;

    let mut stats = BuildStats {
        seed_attempts: seed_attempts.len(),
        seed_test_runs: seed_test_runs.len(),
        ..BuildStats::default()
    };

    let mut deployment_attempts = seed_attempts;
    stats.backfilled_attempts =
        attempts::backfill_attempts(&mut deployment_attempts, &catalog, &current_running, options);
    if options.anchor_current_version {
        stats.anchored_attempts = attempts::anchor_current_versions(
            &mut deployment_attempts,
            &catalog,
            &current_running,
            options,
        );
    }
    stats.normalized_attempts = attempts::enforce_latest_healthy(
        &mut deployment_attempts,
        &catalog,
        &current_running,
        &exceptions,
    );
    attempts::sort_newest_first(&mut deployment_attempts);

    let test_runs = test_runs::backfill_test_runs(
        &seed_test_runs,
        &deployment_attempts,
        &catalog,
        &suite_baselines,
    );
    stats.synthesized_test_runs = test_runs.len() - seed_test_runs.len();

    let cluster_test_runs =
        cluster_runs::synthesize_cluster_runs(&catalog, &cluster_suites, options.cluster_suite_time);
    stats.cluster_test_runs = cluster_test_runs.len();

    info!(
        "Built {} attempts ({} backfilled, {} anchored, {} normalized), {} test runs, {} cluster runs",
        deployment_attempts.len(),
        stats.backfilled_attempts,
        stats.anchored_attempts,
        stats.normalized_attempts,
        test_runs.len(),
        cluster_test_runs.len()
    );

    Ok(Fixtures {
        catalog,
        current_running,
        exceptions,
        reference,
        min_attempts: options.min_attempts,
        deployment_attempts,
        test_runs,
        cluster_test_runs,
        stats,
    })
}
