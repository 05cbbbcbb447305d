//! Seeded test runs and the baseline tables used to synthesize the rest.

use std::collections::{BTreeMap, BTreeSet};

use super::timestamp;
use crate::error::AppResult;
use crate::fixtures::{ClusterSuiteProfile, SuiteBaselines};
use crate::models::SuiteType::{self, Functional, Sanity};
use crate::models::{PLACEHOLDER_REPORT_URL, TestRun};

/// `(id, attempt, suite, [total, passed, failed, skipped], duration, executed at)`
type SeedRun = (&'static str, &'static str, SuiteType, [u32; 4], u32, &'static str);

const fn run(
    id: &'static str,
    attempt_id: &'static str,
    suite_type: SuiteType,
    counts: [u32; 4],
    duration_sec: u32,
    executed_at: &'static str,
) -> SeedRun {
    (id, attempt_id, suite_type, counts, duration_sec, executed_at)
}

const SEED_RUNS: &[SeedRun] = &[
    run("tr:1", "mira-us-west-2:authn:3.4.2:1284", Functional, [420, 420, 0, 0], 580, "2026-02-03T22:20:00Z"),
    run("tr:4", "mira-us-west-2:authn:3.4.2:1283", Functional, [420, 398, 22, 0], 410, "2026-02-03T20:14:00Z"),
    run("tr:5", "pavo-us-west-2:authn:3.4.1:1279", Sanity, [80, 80, 0, 0], 420, "2026-02-04T07:55:00Z"),
    run("tr:6", "mira-us-east-2:account-management:1.18.0:9101", Functional, [312, 120, 0, 192], 240, "2026-02-05T18:46:00Z"),
    run("tr:7", "mira-us-east-2:ugm:2.1.3:331", Functional, [198, 158, 40, 0], 520, "2026-02-05T11:40:00Z"),
    run("tr:8", "pavo-us-west-2:frontend:0.42.0:801", Sanity, [120, 120, 0, 0], 600, "2026-02-05T07:30:00Z"),
    run("tr:9", "pavo-us-west-2:frontend:0.42.1:802", Sanity, [120, 98, 22, 0], 610, "2026-02-05T08:30:00Z"),
    run("tr:10", "mira-us-west-2:notification-service:1.3.1:5001", Functional, [148, 130, 18, 0], 580, "2026-02-05T16:08:00Z"),
    run("tr:11", "mira-us-west-2:config-service:0.9.2:5002", Functional, [132, 120, 12, 0], 560, "2026-02-05T15:36:00Z"),
    run("tr:12", "mira-us-west-2:audit-service:2.0.5:5003", Functional, [210, 175, 35, 0], 490, "2026-02-05T14:52:00Z"),
];

const FUNCTIONAL_COUNTS: &[(&str, u32)] = &[
    ("authn", 420),
    ("authz", 385),
    ("account-management", 312),
    ("activate-device-direct", 278),
    ("activate-inventory", 245),
    ("ugm", 198),
    ("pingfed", 156),
    ("session-manager", 230),
    ("sso-manager", 175),
    ("frontend", 340),
    ("ui-doorway", 265),
    ("mfe", 290),
    ("notification-service", 148),
    ("audit-service", 210),
    ("config-service", 132),
];

const CANARY_COUNTS: &[(&str, u32)] = &[
    ("authn", 45),
    ("authz", 38),
    ("account-management", 32),
    ("activate-device-direct", 28),
    ("activate-inventory", 25),
    ("ugm", 22),
    ("pingfed", 18),
    ("session-manager", 20),
    ("sso-manager", 24),
    ("frontend", 30),
    ("ui-doorway", 15),
    ("mfe", 18),
    ("notification-service", 12),
    ("audit-service", 14),
    ("config-service", 10),
];

const NIGHTLY_FAIL_SERVICES: &[&str] = &["ugm", "frontend", "session-manager"];
const CANARY_FAIL_SERVICES: &[&str] = &["frontend", "sso-manager"];

const SOLUTION_COUNTS: &[(&str, u32)] = &[
    ("mira-us-west-2", 185),
    ("mira-us-east-2", 185),
    ("pavo-us-west-2", 160),
    ("pavo-us-east-2", 160),
];

const SYSTEM_COUNTS: &[(&str, u32)] = &[
    ("mira-us-west-2", 92),
    ("mira-us-east-2", 92),
    ("pavo-us-west-2", 78),
    ("pavo-us-east-2", 78),
];

fn table(rows: &[(&str, u32)]) -> BTreeMap<String, u32> {
    rows.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn test_runs() -> AppResult<Vec<TestRun>> {
    SEED_RUNS
        .iter()
        .map(|(id, attempt_id, suite_type, [total, passed, failed, skipped], duration_sec, executed_at)| {
            Ok(TestRun {
                id: id.to_string(),
                attempt_id: attempt_id.to_string(),
                suite_type: *suite_type,
                total: *total,
                passed: *passed,
                failed: *failed,
                skipped: *skipped,
                duration_sec: *duration_sec,
                executed_at: timestamp(executed_at)?,
                report_url: PLACEHOLDER_REPORT_URL.to_string(),
            })
        })
        .collect()
}

pub fn suite_baselines() -> SuiteBaselines {
    SuiteBaselines {
        functional_counts: table(FUNCTIONAL_COUNTS),
        default_functional_count: 200,
        canary_counts: table(CANARY_COUNTS),
        default_canary_count: 20,
        nightly_fail_services: set(NIGHTLY_FAIL_SERVICES),
        canary_fail_services: set(CANARY_FAIL_SERVICES),
    }
}

pub fn cluster_suites() -> Vec<ClusterSuiteProfile> {
    vec![
        ClusterSuiteProfile {
            suite_type: SuiteType::Solution,
            id_tag: "sol".to_string(),
            counts: table(SOLUTION_COUNTS),
            default_count: 160,
            jitter: [-1, 0, 1, -1, 0],
            fail_pcts: [0.5, 0.0, 2.8, 1.1, 0.0],
            skip_pcts: [0.0, 0.5, 0.5, 0.0, 1.0],
            base_duration_sec: 1800,
            duration_step_sec: 120,
        },
        ClusterSuiteProfile {
            suite_type: SuiteType::System,
            id_tag: "sys".to_string(),
            counts: table(SYSTEM_COUNTS),
            default_count: 78,
            jitter: [0, 1, 0, 1, 0],
            fail_pcts: [1.1, 3.2, 0.0, 0.0, 1.6],
            skip_pcts: [0.0, 0.0, 1.3, 0.0, 0.5],
            base_duration_sec: 2700,
            duration_step_sec: 90,
        },
    ]
}
