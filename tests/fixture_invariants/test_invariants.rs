//! Coverage, freshness, ordering and uniqueness over the standard fixtures.

use std::collections::HashSet;

use deploy_insights_lib::fixtures::check_invariants;
use deploy_insights_lib::models::{AttemptStatus, SuiteType};
use deploy_insights_lib::queries::latest_attempt;

use super::test_helpers::*;

#[test]
fn test_standard_fixtures_have_no_violations() {
    let violations = check_invariants(standard());
    assert!(violations.is_empty(), "violations: {:?}", violations);
}

#[test]
fn test_every_current_pair_has_minimum_coverage() {
    let fixtures = standard();
    for (cr, svc, _) in fixtures.current_running().entries() {
        let count = pair_ids(fixtures, cr, svc).len();
        assert!(count >= 5, "{}/{} has {} attempts", cr, svc, count);
    }
}

#[test]
fn test_latest_attempt_matches_current_version() {
    let fixtures = standard();
    for (cr, svc, version) in fixtures.current_running().entries() {
        let latest = latest_attempt(fixtures, cr, svc).unwrap();
        if fixtures.exceptions().contains(&latest.id) {
            continue;
        }
        let tier = fixtures.catalog().tier_of(cr).unwrap();
        assert_eq!(latest.build_version, version, "{}", latest.id);
        assert_eq!(latest.status, AttemptStatus::healthy_for(tier), "{}", latest.id);
    }
}

#[test]
fn test_attempts_sorted_newest_first() {
    let attempts = standard().list_deployment_attempts();
    for pair in attempts.windows(2) {
        assert!(pair[0].started_at >= pair[1].started_at, "{} before {}", pair[0].id, pair[1].id);
        if pair[0].started_at == pair[1].started_at {
            assert!(pair[0].id < pair[1].id);
        }
    }
}

#[test]
fn test_ids_are_unique() {
    let fixtures = standard();
    let attempt_ids: HashSet<&str> = fixtures.list_deployment_attempts().iter().map(|a| a.id.as_str()).collect();
    assert_eq!(attempt_ids.len(), fixtures.list_deployment_attempts().len());

    let mut pairs = HashSet::new();
    for run in fixtures.list_test_runs() {
        assert!(attempt_ids.contains(run.attempt_id.as_str()), "{} is orphaned", run.id);
        assert!(pairs.insert((run.attempt_id.as_str(), run.suite_type)), "{} duplicated", run.id);
        assert!(!run.suite_type.is_cluster_level());
    }
}

#[test]
fn test_counts_add_up() {
    let fixtures = standard();
    // tr:6 carries a seeded skip count
    assert!(fixtures.list_test_runs().iter().all(|r| r.counts_consistent()));
    assert!(fixtures.list_cluster_test_runs().iter().all(|r| r.counts_consistent()));
}

#[test]
fn test_standard_totals() {
    let fixtures = standard();
    let stats = fixtures.stats();
    assert_eq!(stats.seed_attempts, 61);
    assert_eq!(stats.backfilled_attempts, 309);
    assert_eq!(stats.anchored_attempts, 30);
    assert_eq!(stats.normalized_attempts, 5);
    assert_eq!(fixtures.list_deployment_attempts().len(), 400);
    assert_eq!(fixtures.list_test_runs().len(), 931);
    assert_eq!(fixtures.list_cluster_test_runs().len(), 40);

    let count = |suite: SuiteType| fixtures.list_test_runs().iter().filter(|r| r.suite_type == suite).count();
    assert_eq!(count(SuiteType::Functional), 400);
    assert_eq!(count(SuiteType::Sanity), 243);
    assert_eq!(count(SuiteType::Regression), 177);
    assert_eq!(count(SuiteType::Canary), 111);
}

#[test]
fn test_production_only_canaries_and_no_production_nightlies() {
    let fixtures = standard();
    for run in fixtures.list_test_runs() {
        let attempt = fixtures
            .list_deployment_attempts()
            .iter()
            .find(|a| a.id == run.attempt_id)
            .unwrap();
        let tier = fixtures.catalog().tier_of(&attempt.cluster_region_id).unwrap();
        match run.suite_type {
            SuiteType::Canary => assert!(tier.is_production(), "{}", run.id),
            SuiteType::Regression => assert!(tier.runs_nightly(), "{}", run.id),
            SuiteType::Sanity => assert!(tier.runs_sanity(), "{}", run.id),
            _ => {}
        }
    }
}
