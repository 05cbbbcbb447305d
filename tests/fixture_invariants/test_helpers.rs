//! Shared helpers for the fixture invariant tests.

use std::sync::OnceLock;

use deploy_insights_lib::fixtures::{
    CurrentRunning, ExceptionLedger, FixtureInputs, Fixtures, ReferenceData, SynthesisOptions,
    build_fixtures,
};
use deploy_insights_lib::seed;

static STANDARD: OnceLock<Fixtures> = OnceLock::new();

/// The standard fixture set built with default options, shared by all tests.
pub fn standard() -> &'static Fixtures {
    STANDARD.get_or_init(|| {
        build_fixtures(seed::standard_inputs().unwrap(), &SynthesisOptions::default())
            .expect("standard fixtures should build")
    })
}

/// Standard catalog and baselines with no seed history at all.
pub fn bare_inputs(current_running: CurrentRunning) -> FixtureInputs {
    FixtureInputs {
        catalog: seed::catalog().unwrap(),
        current_running,
        seed_attempts: Vec::new(),
        seed_test_runs: Vec::new(),
        exceptions: ExceptionLedger::new(),
        suite_baselines: seed::suite_baselines(),
        cluster_suites: seed::cluster_suites(),
        reference: ReferenceData::default(),
    }
}

/// Build ids of every attempt for one pair, in fixture order.
pub fn pair_ids<'a>(fixtures: &'a Fixtures, cluster_region_id: &str, service_id: &str) -> Vec<&'a str> {
    fixtures
        .list_deployment_attempts()
        .iter()
        .filter(|a| a.pair() == (cluster_region_id, service_id))
        .map(|a| a.id.as_str())
        .collect()
}
