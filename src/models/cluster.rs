//! Cluster and cluster-region models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Environment tier a cluster belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
pub enum ClusterTier {
    #[serde(rename = "QA")]
    Qa,
    Stage,
    Production,
}

impl ClusterTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Qa => "QA",
            Self::Stage => "Stage",
            Self::Production => "Production",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "qa" => Some(Self::Qa),
            "stage" => Some(Self::Stage),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Production attempts settle as `LIVE`, everything else as `SUCCESS`.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Tiers that run the nightly regression and the cluster-wide suites.
    pub fn runs_nightly(&self) -> bool {
        matches!(self, Self::Qa | Self::Stage)
    }

    /// Tiers that gate promotions on the sanity suite.
    pub fn runs_sanity(&self) -> bool {
        matches!(self, Self::Stage | Self::Production)
    }
}

impl std::fmt::Display for ClusterTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A logical environment tier such as Mira (QA) or Aquila (Production).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub tier: ClusterTier,
    pub description: String,
}

/// Role a region plays inside its cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RegionRole {
    Active,
    #[serde(rename = "Hot-standby")]
    HotStandby,
    Unknown,
}

impl RegionRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::HotStandby => "Hot-standby",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for RegionRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which region is active and which is the hot standby for one cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegionRoles {
    pub active: String,
    pub hot_standby: String,
}

impl RegionRoles {
    pub fn role_of(&self, region: &str) -> RegionRole {
        if self.active == region {
            RegionRole::Active
        } else if self.hot_standby == region {
            RegionRole::HotStandby
        } else {
            RegionRole::Unknown
        }
    }
}

/// One geographic instance of a cluster; the unit attempts deploy to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRegion {
    /// `{clusterId}-{region}`
    pub id: String,
    /// Owning cluster id
    pub base_id: String,
    /// Region code (e.g. us-west-2)
    pub region: String,
    /// Resolved from the cluster's role table
    pub role: RegionRole,
    /// Tier of the owning cluster
    pub tier: ClusterTier,
    /// `{ClusterName}-{region}`
    pub name: String,
}

impl ClusterRegion {
    /// Derive the region id for a cluster and region code.
    pub fn region_id(base_id: &str, region: &str) -> String {
        format!("{}-{}", base_id, region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_parsing() {
        assert_eq!(ClusterTier::parse("QA"), Some(ClusterTier::Qa));
        assert_eq!(ClusterTier::parse("stage"), Some(ClusterTier::Stage));
        assert_eq!(ClusterTier::parse("prod"), Some(ClusterTier::Production));
        assert_eq!(ClusterTier::parse("edge"), None);
    }

    #[test]
    fn test_tier_suite_eligibility() {
        assert!(ClusterTier::Qa.runs_nightly());
        assert!(!ClusterTier::Qa.runs_sanity());
        assert!(ClusterTier::Stage.runs_nightly());
        assert!(ClusterTier::Stage.runs_sanity());
        assert!(!ClusterTier::Production.runs_nightly());
        assert!(ClusterTier::Production.runs_sanity());
    }

    #[test]
    fn test_role_resolution() {
        let roles = RegionRoles {
            active: "us-west-2".to_string(),
            hot_standby: "us-east-2".to_string(),
        };
        assert_eq!(roles.role_of("us-west-2"), RegionRole::Active);
        assert_eq!(roles.role_of("us-east-2"), RegionRole::HotStandby);
        assert_eq!(roles.role_of("eu-west-1"), RegionRole::Unknown);
    }

    #[test]
    fn test_tier_serializes_as_display_name() {
        let json = serde_json::to_string(&ClusterTier::Qa).unwrap();
        assert_eq!(json, "\"QA\"");
        let role = serde_json::to_string(&RegionRole::HotStandby).unwrap();
        assert_eq!(role, "\"Hot-standby\"");
    }
}
