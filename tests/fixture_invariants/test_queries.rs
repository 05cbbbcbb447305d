//! Query layer over the standard fixtures.

use std::collections::BTreeSet;

use deploy_insights_lib::error::AppError;
use deploy_insights_lib::models::{AttemptStatus, SuiteType};
use deploy_insights_lib::queries::*;

use super::test_helpers::*;

#[test]
fn test_first_attempts_are_the_reference_time_anchors() {
    let attempts = list_attempts(standard(), &AttemptFilter::default());
    assert_eq!(attempts[0].id, "aquila-us-east-2:account-management:1.17.7:gen8999");
    assert_eq!(attempts[1].id, "aquila-us-east-2:activate-device-direct:5.1.2:gen8999");
    assert_eq!(attempts[0].started_at.to_rfc3339(), "2026-02-05T20:00:00+00:00");
}

#[test]
fn test_pair_history_includes_backfill() {
    let ids = pair_ids(standard(), "pavo-us-east-2", "authz");
    assert_eq!(ids.len(), 5);
    let expected: BTreeSet<&str> = [
        "pavo-us-east-2:authz:2.9.1:4120",
        "pavo-us-east-2:authz:2.9.0:gen9001",
        "pavo-us-east-2:authz:2.8.9:gen9002",
        "pavo-us-east-2:authz:2.8.8:gen9003",
        "pavo-us-east-2:authz:2.8.7:gen9004",
    ]
    .into_iter()
    .collect();
    assert_eq!(ids.into_iter().collect::<BTreeSet<_>>(), expected);
}

#[test]
fn test_status_filter() {
    let filter = AttemptFilter {
        status: Some(AttemptStatus::Rollback),
        ..AttemptFilter::default()
    };
    let rollbacks = list_attempts(standard(), &filter);
    assert_eq!(rollbacks.len(), 5);
    assert!(rollbacks.iter().all(|a| a.cluster_region_id == "mira-us-west-2"));
}

#[test]
fn test_normalized_latest_attempts() {
    let fixed = find_attempt(standard(), "mira-us-west-2:activate-device-direct:5.2.0:540").unwrap();
    assert_eq!(fixed.status, AttemptStatus::Success);
    assert!(fixed.failure_reason.is_none());

    let fixed = find_attempt(standard(), "mira-us-east-2:ugm:2.1.3:331").unwrap();
    assert_eq!(fixed.status, AttemptStatus::Success);
}

#[test]
fn test_newest_unpinned_builds_are_settled() {
    let running = find_attempt(standard(), "mira-us-east-2:account-management:1.18.0:9101").unwrap();
    assert_eq!(running.status, AttemptStatus::Success);
    assert_eq!(running.ended_at, Some(running.started_at));

    for id in [
        "pavo-us-west-2:frontend:0.42.1:802",
        "pavo-us-east-2:account-management:1.17.9:8802",
    ] {
        let settled = find_attempt(standard(), id).unwrap();
        assert_eq!(settled.status, AttemptStatus::Success, "{}", id);
        assert!(settled.failure_reason.is_none(), "{}", id);
    }

    let ledger = standard().exceptions();
    assert_eq!(ledger.len(), 3);
    assert!(ledger.iter().all(|id| id.starts_with("mira-us-west-2:")));
}

#[test]
fn test_find_attempt_not_found() {
    let err = find_attempt(standard(), "mira-us-west-2:authn:9.9.9:1").unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(err.to_string(), "Deployment attempt mira-us-west-2:authn:9.9.9:1 not found");
}

#[test]
fn test_failing_regressions() {
    let filter = TestRunFilter {
        suite_type: Some(SuiteType::Regression),
        ..TestRunFilter::default()
    };
    let failing: BTreeSet<(&str, u32, u32)> = list_test_runs(standard(), &filter)
        .into_iter()
        .filter(|r| r.failed > 0)
        .map(|r| (r.attempt_id.as_str(), r.failed, r.total))
        .collect();
    let expected: BTreeSet<(&str, u32, u32)> = [
        ("pavo-us-east-2:ugm:2.1.0:gen8999", 3, 198),
        ("mira-us-east-2:session-manager:1.9.7:gen9001", 4, 230),
        ("pavo-us-east-2:ugm:2.0.9:gen9000", 3, 198),
        ("pavo-us-east-2:frontend:0.39.5:gen9004", 6, 340),
    ]
    .into_iter()
    .collect();
    assert_eq!(failing, expected);
}

#[test]
fn test_failing_canaries() {
    let filter = TestRunFilter {
        suite_type: Some(SuiteType::Canary),
        ..TestRunFilter::default()
    };
    let failing: Vec<_> = list_test_runs(standard(), &filter)
        .into_iter()
        .filter(|r| r.failed > 0)
        .collect();
    assert_eq!(failing.len(), 5);
    for run in failing {
        assert!(run.attempt_id.starts_with("aquila-us-west-2:sso-manager:"), "{}", run.attempt_id);
        assert_eq!((run.failed, run.total), (1, 24));
        assert_eq!(run.id, format!("tr:canary:{}", run.attempt_id));
    }
}

#[test]
fn test_runs_for_seeded_attempt() {
    let runs = test_runs_for_attempt(standard(), "mira-us-west-2:authn:3.4.2:1283");
    let functional = runs.iter().find(|r| r.suite_type == SuiteType::Functional).unwrap();
    assert_eq!(functional.id, "tr:4");
    assert_eq!(functional.failed, 22);
    assert!(runs.iter().all(|r| r.suite_type != SuiteType::Canary));
}

#[test]
fn test_cluster_runs_newest_day_first() {
    let filter = ClusterTestRunFilter {
        cluster_region_id: Some("pavo-us-west-2".to_string()),
        suite_type: Some(SuiteType::System),
    };
    let runs = list_cluster_test_runs(standard(), &filter);
    let days: Vec<u32> = runs.iter().map(|r| r.day_offset).collect();
    assert_eq!(days, vec![0, 1, 2, 3, 4]);

    let aquila = ClusterTestRunFilter {
        cluster_region_id: Some("aquila-us-west-2".to_string()),
        suite_type: None,
    };
    assert!(list_cluster_test_runs(standard(), &aquila).is_empty());
}
