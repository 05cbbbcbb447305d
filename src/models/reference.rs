//! Hand-maintained reference records shown next to the deployment history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A build promoted from one cluster-region to the next tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    pub id: String,
    pub service_id: String,
    pub build_version: String,
    pub from_cluster_id: String,
    pub to_cluster_id: String,
    pub promoted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TicketKind {
    Bug,
    Story,
    Task,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum TicketPriority {
    Critical,
    High,
    Medium,
    Low,
}

/// Issue-tracker ticket shipped in a given service version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseTicket {
    pub key: String,
    pub summary: String,
    #[serde(rename = "type")]
    pub kind: TicketKind,
    pub priority: TicketPriority,
    /// Version the ticket shipped in
    pub version: String,
    pub status: String,
}

/// Per-category production readiness scores, each 0-100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Scorecard {
    pub gameday: u32,
    pub outages: u32,
    pub tests: u32,
    pub incidents: u32,
    pub readiness: u32,
    pub notes: String,
}

/// Category weights used to combine a scorecard into one score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScorecardWeights {
    pub gameday: u32,
    pub outages: u32,
    pub tests: u32,
    pub incidents: u32,
    pub readiness: u32,
}

impl ScorecardWeights {
    pub fn total(&self) -> u32 {
        self.gameday + self.outages + self.tests + self.incidents + self.readiness
    }
}

impl Default for ScorecardWeights {
    fn default() -> Self {
        ScorecardWeights {
            gameday: 25,
            outages: 25,
            tests: 20,
            incidents: 15,
            readiness: 15,
        }
    }
}
