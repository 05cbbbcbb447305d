//! End-to-end scenarios over hand-made and standard inputs.

use chrono::{Duration, TimeZone, Utc};
use deploy_insights_lib::fixtures::semver::decrement;
use deploy_insights_lib::fixtures::{
    CurrentRunning, ExceptionLedger, InvariantViolation, OnMissingCurrentVersion, Rollover,
    SynthesisOptions, build_fixtures, check_invariants,
};
use deploy_insights_lib::models::{AttemptStatus, SuiteType, Trigger};
use deploy_insights_lib::queries::{find_attempt, latest_attempt, test_runs_for_attempt};
use deploy_insights_lib::seed;

use super::test_helpers::*;

fn mira_authn_only() -> CurrentRunning {
    let mut current = CurrentRunning::new();
    current.insert("mira-us-west-2", "authn", "3.4.2");
    current
}

/// Scenario A: patch rollover and the 0.0.0 floor.
#[test]
fn test_decrement_policy() {
    let rollover = Rollover::default();
    assert_eq!(decrement("3.4.2", 1, rollover), "3.4.1");
    assert_eq!(decrement("3.4.0", 1, rollover), "3.3.9");
    assert_eq!(decrement("0.0.0", 5, rollover), "0.0.0");
}

/// Scenario B: an empty pair is backfilled to five older builds plus an anchor.
#[test]
fn test_backfill_from_current_version_alone() {
    let options = SynthesisOptions::default();
    let fixtures = build_fixtures(bare_inputs(mira_authn_only()), &options).unwrap();

    let ids = pair_ids(&fixtures, "mira-us-west-2", "authn");
    assert_eq!(
        ids,
        vec![
            "mira-us-west-2:authn:3.4.2:gen8999",
            "mira-us-west-2:authn:3.4.1:gen9000",
            "mira-us-west-2:authn:3.4.0:gen9001",
            "mira-us-west-2:authn:3.3.9:gen9002",
            "mira-us-west-2:authn:3.3.8:gen9003",
            "mira-us-west-2:authn:3.3.7:gen9004",
        ]
    );

    let oldest = find_attempt(&fixtures, "mira-us-west-2:authn:3.3.7:gen9004").unwrap();
    assert_eq!(oldest.started_at, options.reference_time - Duration::hours(5));
    assert_eq!(oldest.ended_at, Some(oldest.started_at + Duration::minutes(12)));
    assert_eq!(oldest.status, AttemptStatus::Success);
    assert_eq!(oldest.trigger, Trigger::Merge);

    let latest = latest_attempt(&fixtures, "mira-us-west-2", "authn").unwrap();
    assert_eq!(latest.build_version, "3.4.2");
    assert_eq!(latest.started_at, options.reference_time);
    assert!(check_invariants(&fixtures).is_empty());

    // QA tier: functional on every attempt, regression on the hash-admitted ones
    let stats = fixtures.stats();
    assert_eq!((stats.backfilled_attempts, stats.anchored_attempts), (5, 1));
    let runs = fixtures.list_test_runs();
    assert_eq!(runs.iter().filter(|r| r.suite_type == SuiteType::Functional).count(), 6);
    assert_eq!(runs.iter().filter(|r| r.suite_type == SuiteType::Regression).count(), 4);
    assert!(runs.iter().all(|r| r.suite_type != SuiteType::Sanity));
}

#[test]
fn test_without_anchor_the_freshness_check_fails() {
    let options = SynthesisOptions {
        anchor_current_version: false,
        ..SynthesisOptions::default()
    };
    let fixtures = build_fixtures(bare_inputs(mira_authn_only()), &options).unwrap();

    assert_eq!(pair_ids(&fixtures, "mira-us-west-2", "authn").len(), 5);
    let violations = check_invariants(&fixtures);
    assert_eq!(
        violations,
        vec![InvariantViolation::StaleLatest {
            attempt_id: "mira-us-west-2:authn:3.4.1:gen9000".to_string(),
            found: "3.4.1".to_string(),
            expected: "3.4.2".to_string(),
        }]
    );
}

#[test]
fn test_assume_zero_covers_the_whole_catalog() {
    let options = SynthesisOptions {
        on_missing_current: OnMissingCurrentVersion::AssumeZero,
        ..SynthesisOptions::default()
    };
    let fixtures = build_fixtures(bare_inputs(CurrentRunning::new()), &options).unwrap();

    let catalog = fixtures.catalog();
    let pairs = catalog.cluster_regions().len() * catalog.services().len();
    assert_eq!(fixtures.list_deployment_attempts().len(), pairs * 5);
    assert!(fixtures.list_deployment_attempts().iter().all(|a| a.build_version == "0.0.0"));
    assert_eq!(fixtures.stats().anchored_attempts, 0);
}

#[test]
fn test_skip_leaves_pairs_without_current_version_empty() {
    let fixtures = build_fixtures(bare_inputs(mira_authn_only()), &SynthesisOptions::default()).unwrap();
    assert!(pair_ids(&fixtures, "mira-us-west-2", "authz").is_empty());
    assert!(pair_ids(&fixtures, "pavo-us-west-2", "authn").is_empty());
}

#[test]
fn test_raised_minimum_and_custom_rollover() {
    let options = SynthesisOptions {
        min_attempts: 7,
        rollover: Rollover { patch: 5, minor: 5 },
        ..SynthesisOptions::default()
    };
    let mut current = CurrentRunning::new();
    current.insert("pavo-us-east-2", "ugm", "1.0.1");
    let fixtures = build_fixtures(bare_inputs(current), &options).unwrap();

    let versions: Vec<&str> = fixtures
        .list_deployment_attempts()
        .iter()
        .map(|a| a.build_version.as_str())
        .collect();
    assert_eq!(versions, vec!["1.0.1", "1.0.0", "0.5.5", "0.5.4", "0.5.3", "0.5.2", "0.5.1", "0.5.0"]);
    assert!(fixtures.list_deployment_attempts().iter().all(|a| a.trigger == Trigger::Promotion));
}

/// Scenario C: a ledgered rollback stays a rollback even as the newest release.
#[test]
fn test_ledgered_rollback_survives_normalization() {
    let fixtures = standard();
    let latest = latest_attempt(fixtures, "mira-us-west-2", "notification-service").unwrap();
    assert_eq!(latest.id, "mira-us-west-2:notification-service:1.3.1:5001");
    assert_eq!(latest.status, AttemptStatus::Rollback);
    assert!(latest.rollback_to_build.is_some());
    assert!(latest.failure_reason.is_some());
}

#[test]
fn test_without_ledger_the_rollback_is_settled() {
    let mut inputs = seed::standard_inputs().unwrap();
    inputs.exceptions = ExceptionLedger::new();
    let fixtures = build_fixtures(inputs, &SynthesisOptions::default()).unwrap();

    let settled = find_attempt(&fixtures, "mira-us-west-2:notification-service:1.3.1:5001").unwrap();
    assert_eq!(settled.status, AttemptStatus::Success);
    assert!(settled.rollback_to_build.is_none());
    assert!(settled.failure_reason.is_none());
    assert_eq!(fixtures.stats().normalized_attempts, 8);
}

/// Scenario D: stage attempts always carry a sanity run.
#[test]
fn test_stage_attempts_have_sanity_runs() {
    let fixtures = standard();
    for attempt in fixtures.list_deployment_attempts() {
        if !attempt.cluster_region_id.starts_with("pavo-") {
            continue;
        }
        let sanity = test_runs_for_attempt(fixtures, &attempt.id)
            .into_iter()
            .filter(|r| r.suite_type == SuiteType::Sanity)
            .count();
        assert_eq!(sanity, 1, "{}", attempt.id);
    }

    let runs = test_runs_for_attempt(fixtures, "pavo-us-east-2:authz:2.9.1:4120");
    let sanity = runs.iter().find(|r| r.suite_type == SuiteType::Sanity).unwrap();
    assert_eq!((sanity.total, sanity.failed, sanity.duration_sec), (120, 0, 540));
    let attempt = find_attempt(fixtures, "pavo-us-east-2:authz:2.9.1:4120").unwrap();
    assert_eq!(sanity.executed_at, attempt.started_at + Duration::hours(9));
}

#[test]
fn test_seeded_sanity_run_is_not_duplicated() {
    let fixtures = standard();
    let runs = test_runs_for_attempt(fixtures, "pavo-us-west-2:frontend:0.42.1:802");
    let sanity: Vec<_> = runs.iter().filter(|r| r.suite_type == SuiteType::Sanity).collect();
    assert_eq!(sanity.len(), 1);
    assert_eq!(sanity[0].id, "tr:9");
    assert_eq!(sanity[0].failed, 22);
}

#[test]
fn test_reference_time_moves_synthesized_history() {
    let options = SynthesisOptions {
        reference_time: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        ..SynthesisOptions::default()
    };
    let fixtures = build_fixtures(bare_inputs(mira_authn_only()), &options).unwrap();
    let first = &fixtures.list_deployment_attempts()[0];
    assert_eq!(first.started_at, options.reference_time);
}
