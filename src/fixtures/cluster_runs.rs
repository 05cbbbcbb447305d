//! Cluster-wide SOLUTION and SYSTEM suites, one run per suite per day for
//! every QA and Stage cluster-region.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use super::inputs::Catalog;
use crate::models::{ClusterTestRun, PLACEHOLDER_REPORT_URL, SuiteType};

/// Days of history per cluster-region, day 0 being the most recent.
pub const CLUSTER_SUITE_DAYS: usize = 5;

/// Shape of one cluster-level suite.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterSuiteProfile {
    pub suite_type: SuiteType,
    /// Short tag used in run ids (`ct:{tag}:{cluster}:{day}`)
    pub id_tag: String,
    /// Baseline case count per cluster-region
    pub counts: BTreeMap<String, u32>,
    pub default_count: u32,
    /// Case count adjustment per day offset
    pub jitter: [i32; CLUSTER_SUITE_DAYS],
    pub fail_pcts: [f64; CLUSTER_SUITE_DAYS],
    pub skip_pcts: [f64; CLUSTER_SUITE_DAYS],
    pub base_duration_sec: u32,
    /// Added to the duration for each day further back
    pub duration_step_sec: u32,
}

impl ClusterSuiteProfile {
    fn total(&self, cluster_region_id: &str, day: usize) -> u32 {
        let base = self
            .counts
            .get(cluster_region_id)
            .copied()
            .unwrap_or(self.default_count);
        let total = i64::from(base) + i64::from(self.jitter[day]);
        u32::try_from(total.max(0)).unwrap_or(0)
    }
}

/// `round(total * pct / 100)`, clamped to `0..=total`.
fn share(total: u32, pct: f64) -> u32 {
    let value = (f64::from(total) * pct / 100.0).round();
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= f64::from(total) {
        total
    } else {
        value as u32
    }
}

/// Build one run per profile per day for every nightly-tier cluster-region.
///
/// Day `i` executes `i` days before `day_zero`.
pub fn synthesize_cluster_runs(
    catalog: &Catalog,
    profiles: &[ClusterSuiteProfile],
    day_zero: DateTime<Utc>,
) -> Vec<ClusterTestRun> {
    let mut runs = Vec::new();

    for region in catalog.cluster_regions().iter().filter(|cr| cr.tier.runs_nightly()) {
        for day in 0..CLUSTER_SUITE_DAYS {
            let executed_at = day_zero - Duration::days(day as i64);

            for profile in profiles {
                let total = profile.total(&region.id, day);
                let failed = share(total, profile.fail_pcts[day]);
                let skipped = share(total, profile.skip_pcts[day]).min(total - failed);
                let step = u32::try_from(day).unwrap_or(0);

                runs.push(ClusterTestRun {
                    id: format!("ct:{}:{}:{}", profile.id_tag, region.id, day),
                    cluster_region_id: region.id.clone(),
                    suite_type: profile.suite_type,
                    day_offset: step,
                    total,
                    passed: total - failed - skipped,
                    failed,
                    skipped,
                    duration_sec: profile.base_duration_sec + step * profile.duration_step_sec,
                    executed_at,
                    report_url: PLACEHOLDER_REPORT_URL.to_string(),
                });
            }
        }
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use chrono::TimeZone;

    fn runs() -> Vec<ClusterTestRun> {
        let catalog = seed::catalog().unwrap();
        let day_zero = Utc.with_ymd_and_hms(2026, 2, 5, 3, 0, 0).unwrap();
        synthesize_cluster_runs(&catalog, &seed::cluster_suites(), day_zero)
    }

    fn find<'a>(runs: &'a [ClusterTestRun], id: &str) -> &'a ClusterTestRun {
        runs.iter().find(|r| r.id == id).unwrap()
    }

    #[test]
    fn test_covers_qa_and_stage_regions_only() {
        let runs = runs();
        // 4 regions x 5 days x 2 suites
        assert_eq!(runs.len(), 40);
        assert!(runs.iter().all(|r| !r.cluster_region_id.starts_with("aquila-")));
    }

    #[test]
    fn test_solution_day_zero() {
        let runs = runs();
        let run = find(&runs, "ct:sol:mira-us-west-2:0");
        // 185 - 1 jitter, 0.5% fail
        assert_eq!(run.suite_type, SuiteType::Solution);
        assert_eq!(run.total, 184);
        assert_eq!(run.failed, 1);
        assert_eq!(run.skipped, 0);
        assert_eq!(run.passed, 183);
        assert_eq!(run.duration_sec, 1800);
        assert_eq!(run.executed_at, Utc.with_ymd_and_hms(2026, 2, 5, 3, 0, 0).unwrap());
    }

    #[test]
    fn test_solution_day_two() {
        let runs = runs();
        let run = find(&runs, "ct:sol:pavo-us-east-2:2");
        // 160 + 1 jitter, 2.8% fail, 0.5% skip
        assert_eq!(run.total, 161);
        assert_eq!(run.failed, 5);
        assert_eq!(run.skipped, 1);
        assert_eq!(run.passed, 155);
        assert_eq!(run.duration_sec, 2040);
        assert_eq!(run.day_offset, 2);
        assert_eq!(run.executed_at, Utc.with_ymd_and_hms(2026, 2, 3, 3, 0, 0).unwrap());
    }

    #[test]
    fn test_system_day_one() {
        let runs = runs();
        let run = find(&runs, "ct:sys:mira-us-east-2:1");
        // 92 + 1 jitter, 3.2% fail
        assert_eq!(run.suite_type, SuiteType::System);
        assert_eq!(run.total, 93);
        assert_eq!(run.failed, 3);
        assert_eq!(run.skipped, 0);
        assert_eq!(run.duration_sec, 2790);
    }

    #[test]
    fn test_counts_consistent() {
        assert!(runs().iter().all(ClusterTestRun::counts_consistent));
    }

    #[test]
    fn test_share_rounding() {
        assert_eq!(share(184, 0.5), 1);
        assert_eq!(share(100, 0.0), 0);
        assert_eq!(share(10, 250.0), 10);
    }
}
