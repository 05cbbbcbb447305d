//! Deployment attempt model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ClusterTier;

/// Outcome of a deployment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttemptStatus {
    Success,
    Failed,
    Rollback,
    InProgress,
    Live,
}

impl AttemptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
            Self::Rollback => "ROLLBACK",
            Self::InProgress => "IN_PROGRESS",
            Self::Live => "LIVE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SUCCESS" => Some(Self::Success),
            "FAILED" => Some(Self::Failed),
            "ROLLBACK" => Some(Self::Rollback),
            "IN_PROGRESS" => Some(Self::InProgress),
            "LIVE" => Some(Self::Live),
            _ => None,
        }
    }

    /// Status the latest attempt of a pair settles into on the given tier.
    pub fn healthy_for(tier: ClusterTier) -> Self {
        if tier.is_production() {
            Self::Live
        } else {
            Self::Success
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Success | Self::Live)
    }

    /// Badge label shown on the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
            Self::Rollback => "FAILED → ROLLBACK",
            Self::InProgress => "IN PROGRESS",
            Self::Live => "LIVE",
        }
    }

    /// Badge colour shown on the dashboard.
    pub fn tone(&self) -> &'static str {
        match self {
            Self::Success | Self::Live => "emerald",
            Self::Failed => "rose",
            Self::Rollback => "amber",
            Self::InProgress => "sky",
        }
    }
}

impl std::fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What started the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    /// A merge to main deployed straight to QA
    Merge,
    /// A build promoted from the previous tier
    Promotion,
}

impl Trigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Merge => "merge",
            Self::Promotion => "promotion",
        }
    }

    /// QA deploys on merge; every later tier deploys by promotion.
    pub fn for_tier(tier: ClusterTier) -> Self {
        match tier {
            ClusterTier::Qa => Self::Merge,
            ClusterTier::Stage | ClusterTier::Production => Self::Promotion,
        }
    }
}

/// One attempt to deploy one service build to one cluster-region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentAttempt {
    /// `{clusterRegionId}:{serviceId}:{version}:{sequence}`
    pub id: String,
    /// Cluster-region the build was deployed to
    #[serde(rename = "clusterId")]
    pub cluster_region_id: String,
    pub service_id: String,
    /// Semver build version (or an opaque build string)
    pub build_version: String,
    /// Source revision the build was cut from
    pub git_sha: String,
    pub started_at: DateTime<Utc>,
    /// `None` while the attempt is still running
    pub ended_at: Option<DateTime<Utc>>,
    pub status: AttemptStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rollback_to_build: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    pub trigger: Trigger,
}

impl DeploymentAttempt {
    /// Build the composite attempt id.
    pub fn compose_id(cluster_region_id: &str, service_id: &str, version: &str, sequence: &str) -> String {
        format!("{}:{}:{}:{}", cluster_region_id, service_id, version, sequence)
    }

    /// Key used to group attempts per (cluster-region, service) pair.
    pub fn pair(&self) -> (&str, &str) {
        (self.cluster_region_id.as_str(), self.service_id.as_str())
    }

    /// Wall-clock duration in minutes, when the attempt has finished.
    pub fn duration_minutes(&self) -> Option<f64> {
        self.ended_at
            .map(|end| (end - self.started_at).num_seconds() as f64 / 60.0)
    }

    /// Copy of this attempt settled into `status`, clearing any failure detail.
    pub fn settled(&self, status: AttemptStatus) -> Self {
        DeploymentAttempt {
            status,
            ended_at: self.ended_at.or(Some(self.started_at)),
            rollback_to_build: None,
            failure_reason: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn rollback_attempt() -> DeploymentAttempt {
        DeploymentAttempt {
            id: "mira-us-west-2:authn:3.4.2:1283".to_string(),
            cluster_region_id: "mira-us-west-2".to_string(),
            service_id: "authn".to_string(),
            build_version: "3.4.2".to_string(),
            git_sha: "a1b2c3d".to_string(),
            started_at: Utc.with_ymd_and_hms(2026, 2, 3, 20, 10, 0).unwrap(),
            ended_at: None,
            status: AttemptStatus::Rollback,
            rollback_to_build: Some("3.4.1".to_string()),
            failure_reason: Some("Functional failures during deployment".to_string()),
            trigger: Trigger::Merge,
        }
    }

    #[test]
    fn test_status_round_trip_strings() {
        for status in [
            AttemptStatus::Success,
            AttemptStatus::Failed,
            AttemptStatus::Rollback,
            AttemptStatus::InProgress,
            AttemptStatus::Live,
        ] {
            assert_eq!(AttemptStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(AttemptStatus::parse("PENDING"), None);
    }

    #[test]
    fn test_healthy_status_per_tier() {
        assert_eq!(AttemptStatus::healthy_for(ClusterTier::Production), AttemptStatus::Live);
        assert_eq!(AttemptStatus::healthy_for(ClusterTier::Stage), AttemptStatus::Success);
        assert_eq!(AttemptStatus::healthy_for(ClusterTier::Qa), AttemptStatus::Success);
    }

    #[test]
    fn test_settled_clears_failure_detail() {
        let settled = rollback_attempt().settled(AttemptStatus::Success);
        assert_eq!(settled.status, AttemptStatus::Success);
        assert_eq!(settled.ended_at, Some(settled.started_at));
        assert!(settled.rollback_to_build.is_none());
        assert!(settled.failure_reason.is_none());
        assert_eq!(settled.id, "mira-us-west-2:authn:3.4.2:1283");
    }

    #[test]
    fn test_serializes_with_dashboard_field_names() {
        let value = serde_json::to_value(rollback_attempt()).unwrap();
        assert_eq!(value["clusterId"], "mira-us-west-2");
        assert_eq!(value["buildVersion"], "3.4.2");
        assert_eq!(value["status"], "ROLLBACK");
        assert_eq!(value["startedAt"], "2026-02-03T20:10:00Z");
        assert!(value["endedAt"].is_null());
        assert_eq!(value["trigger"], "merge");
    }

    #[test]
    fn test_duration_minutes() {
        let mut attempt = rollback_attempt();
        assert_eq!(attempt.duration_minutes(), None);
        attempt.ended_at = Some(Utc.with_ymd_and_hms(2026, 2, 3, 20, 19, 0).unwrap());
        assert_eq!(attempt.duration_minutes(), Some(9.0));
    }
}
