//! Rebuilding from the same inputs yields byte-identical output.

use chrono::{TimeZone, Utc};
use deploy_insights_lib::fixtures::{SynthesisOptions, build_fixtures};
use deploy_insights_lib::seed;

use super::test_helpers::*;

#[test]
fn test_rebuild_has_same_digest() {
    let again = build_fixtures(seed::standard_inputs().unwrap(), &SynthesisOptions::default()).unwrap();
    assert_eq!(standard().digest().unwrap(), again.digest().unwrap());
    assert_eq!(
        serde_json::to_vec(standard().list_test_runs()).unwrap(),
        serde_json::to_vec(again.list_test_runs()).unwrap()
    );
}

#[test]
fn test_digest_tracks_inputs() {
    let options = SynthesisOptions {
        reference_time: Utc.with_ymd_and_hms(2026, 2, 6, 20, 0, 0).unwrap(),
        ..SynthesisOptions::default()
    };
    let shifted = build_fixtures(seed::standard_inputs().unwrap(), &options).unwrap();
    assert_ne!(standard().digest().unwrap(), shifted.digest().unwrap());
}

#[test]
fn test_summary_reports_digest_and_counts() {
    let summary = standard().summary().unwrap();
    assert_eq!(summary.digest, standard().digest().unwrap());
    assert_eq!(summary.attempts, 400);
    assert_eq!(summary.attempts_by_status["LIVE"], 111);
    assert_eq!(summary.attempts_by_status["SUCCESS"], 279);
    assert!(!summary.attempts_by_status.contains_key("IN_PROGRESS"));
    assert_eq!(summary.attempts_by_status["ROLLBACK"], 5);
    assert_eq!(summary.attempts_by_status["FAILED"], 5);
    assert_eq!(summary.test_runs_by_suite["SOLUTION"], 20);
    assert_eq!(summary.test_runs_by_suite["SYSTEM"], 20);

    let value = serde_json::to_value(&summary).unwrap();
    assert_eq!(value["stats"]["anchoredAttempts"], 30);
    assert_eq!(value["clusterTestRuns"], 40);
}
