//! Dashboard aggregations over the standard fixtures.

use deploy_insights_lib::analytics::*;
use deploy_insights_lib::queries::{AttemptFilter, list_attempts};

use super::test_helpers::*;

#[test]
fn test_daily_series_cover_the_same_days() {
    let fixtures = standard();
    let outcomes = daily_outcomes(fixtures.list_deployment_attempts());
    let frequency = deploy_frequency(fixtures.list_deployment_attempts());
    assert_eq!(outcomes.len(), 5);
    assert_eq!(
        outcomes.iter().map(|o| o.day).collect::<Vec<_>>(),
        frequency.iter().map(|f| f.day).collect::<Vec<_>>()
    );
    let deploys: usize = frequency.iter().map(|f| f.deploys).sum();
    assert_eq!(deploys, 400);
}

#[test]
fn test_pass_rates_for_one_service() {
    let fixtures = standard();
    let filter = AttemptFilter {
        cluster_region_id: Some("mira-us-west-2".to_string()),
        service_id: Some("authn".to_string()),
        ..AttemptFilter::default()
    };
    let attempts = list_attempts(fixtures, &filter);
    let runs: Vec<_> = fixtures.list_test_runs().iter().collect();
    let rates = daily_pass_rates(&attempts, &runs);
    assert!(!rates.is_empty());
    // QA never runs sanity
    assert!(rates.iter().all(|r| r.sanity.is_none()));
    assert!(rates.iter().all(|r| r.functional.is_some_and(|p| (0.0..=100.0).contains(&p))));
}

#[test]
fn test_snapshots_flag_only_ledgered_incidents() {
    let fixtures = standard();
    let mira = cluster_snapshot(fixtures, "mira-us-west-2");
    assert_eq!((mira.rollback, mira.failed), (2, 1));
    assert!(mira.needs_attention());

    for cluster_region_id in ["mira-us-east-2", "pavo-us-west-2", "pavo-us-east-2"] {
        let snapshot = cluster_snapshot(fixtures, cluster_region_id);
        assert_eq!(snapshot.healthy, snapshot.services, "{}", cluster_region_id);
        assert!(!snapshot.needs_attention(), "{}", cluster_region_id);
    }
}

#[test]
fn test_release_notes_between_running_versions() {
    let fixtures = standard();
    let matrix = version_matrix(fixtures.catalog(), fixtures.current_running());
    let authn = matrix.iter().find(|r| r.service_id == "authn").unwrap();
    let qa = &authn.versions["mira-us-west-2"];
    assert_eq!(qa, "3.4.2");
    let tickets = tickets_between(&fixtures.reference().tickets, "authn", "3.4.1", qa);
    assert_eq!(tickets.len(), 3);
    assert!(tickets.iter().all(|t| t.version == "3.4.2"));
}

#[test]
fn test_every_scorecard_scores_in_range() {
    let reference = standard().reference();
    for (service_id, scorecard) in &reference.scorecards {
        let score = weighted_score(scorecard, &reference.weights);
        assert!((60..=95).contains(&score), "{} scored {}", service_id, score);
    }
}
