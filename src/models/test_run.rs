//! Test run models for service-level and cluster-level suites.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Placeholder report link carried by synthesized runs.
pub const PLACEHOLDER_REPORT_URL: &str = "#";

/// Category of automated test suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuiteType {
    /// On-deploy gate
    Functional,
    /// Nightly regression on QA and Stage
    Regression,
    /// Promotion gate on Stage and Production
    Sanity,
    /// Production health check
    Canary,
    /// Cluster-wide acceptance
    Solution,
    /// Cluster-wide acceptance
    System,
}

impl SuiteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Functional => "FUNCTIONAL",
            Self::Regression => "REGRESSION",
            Self::Sanity => "SANITY",
            Self::Canary => "CANARY",
            Self::Solution => "SOLUTION",
            Self::System => "SYSTEM",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "FUNCTIONAL" => Some(Self::Functional),
            "REGRESSION" => Some(Self::Regression),
            "SANITY" => Some(Self::Sanity),
            "CANARY" => Some(Self::Canary),
            "SOLUTION" => Some(Self::Solution),
            "SYSTEM" => Some(Self::System),
            _ => None,
        }
    }

    /// Suites keyed by cluster-region and day rather than by attempt.
    pub fn is_cluster_level(&self) -> bool {
        matches!(self, Self::Solution | Self::System)
    }

    /// Suites shown as "nightly" on the reliability views.
    pub fn is_nightly(&self) -> bool {
        matches!(self, Self::Regression | Self::Sanity)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Functional => "Functional (on deploy)",
            Self::Regression => "Nightly Regression",
            Self::Sanity => "Nightly Sanity",
            Self::Canary => "Canary",
            Self::Solution => "Solution",
            Self::System => "System",
        }
    }
}

impl std::fmt::Display for SuiteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one suite executed against one deployment attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestRun {
    pub id: String,
    pub attempt_id: String,
    pub suite_type: SuiteType,
    pub total: u32,
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
    pub duration_sec: u32,
    pub executed_at: DateTime<Utc>,
    pub report_url: String,
}

impl TestRun {
    /// Check `passed + failed + skipped == total`.
    pub fn counts_consistent(&self) -> bool {
        counts_consistent(self.total, self.passed, self.failed, self.skipped)
    }

    /// Percentage of passed cases, `None` for an empty run.
    pub fn pass_rate(&self) -> Option<f64> {
        pass_rate(self.passed, self.total)
    }
}

/// Result of one cluster-wide suite on one cluster-region on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClusterTestRun {
    pub id: String,
    #[serde(rename = "clusterId")]
    pub cluster_region_id: String,
    pub suite_type: SuiteType,
    /// Days before the reference day (0 = most recent)
    pub day_offset: u32,
    pub total: u32,
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
    pub duration_sec: u32,
    pub executed_at: DateTime<Utc>,
    pub report_url: String,
}

impl ClusterTestRun {
    pub fn counts_consistent(&self) -> bool {
        counts_consistent(self.total, self.passed, self.failed, self.skipped)
    }

    pub fn pass_rate(&self) -> Option<f64> {
        pass_rate(self.passed, self.total)
    }
}

fn counts_consistent(total: u32, passed: u32, failed: u32, skipped: u32) -> bool {
    passed
        .checked_add(failed)
        .and_then(|sum| sum.checked_add(skipped))
        == Some(total)
}

fn pass_rate(passed: u32, total: u32) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(passed as f64 / total as f64 * 100.0)
    }
}
