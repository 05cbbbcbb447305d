//! Domain models for the deploy insights fixtures.

pub mod cluster;
pub mod deployment_attempt;
pub mod reference;
pub mod service;
pub mod test_run;

// Re-export commonly used types
pub use cluster::{Cluster, ClusterRegion, ClusterTier, RegionRole, RegionRoles};
pub use deployment_attempt::{AttemptStatus, DeploymentAttempt, Trigger};
pub use reference::{
    Promotion, ReleaseTicket, Scorecard, ScorecardWeights, TicketKind, TicketPriority,
};
pub use service::{Criticality, Service};
pub use test_run::{ClusterTestRun, PLACEHOLDER_REPORT_URL, SuiteType, TestRun};
