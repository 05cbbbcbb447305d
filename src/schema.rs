//! OpenAPI components document for the records handed to the dashboard.

use utoipa::OpenApi;

use crate::{analytics, fixtures, models};

/// Schema-only OpenAPI document; there are no paths, only components.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Deploy Insights Fixtures",
        version = "0.4.0",
        description = "Deterministic deployment attempts, test runs and cluster suites consumed by the deploy insights dashboard"
    ),
    components(
        schemas(
            // Catalog
            models::Cluster,
            models::ClusterTier,
            models::ClusterRegion,
            models::RegionRole,
            models::RegionRoles,
            models::Service,
            models::Criticality,
            // Deployments
            models::DeploymentAttempt,
            models::AttemptStatus,
            models::Trigger,
            // Tests
            models::TestRun,
            models::ClusterTestRun,
            models::SuiteType,
            // Reference
            models::Promotion,
            models::ReleaseTicket,
            models::TicketKind,
            models::TicketPriority,
            models::Scorecard,
            models::ScorecardWeights,
            // Build output
            fixtures::FixtureSummary,
            fixtures::BuildStats,
            // Analytics
            analytics::DailyOutcome,
            analytics::DailyPassRate,
            analytics::DeployFrequency,
            analytics::ClusterSnapshot,
            analytics::VersionRow,
            analytics::ScoreTone,
        )
    ),
    tags(
        (name = "fixtures", description = "Synthesized deployment and test history"),
    )
)]
pub struct ApiDoc;

/// Render the document as JSON.
pub fn render(pretty: bool) -> Result<String, serde_json::Error> {
    let doc = ApiDoc::openapi();
    if pretty {
        doc.to_pretty_json()
    } else {
        doc.to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lists_every_record() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().unwrap().schemas;
        for name in [
            "DeploymentAttempt",
            "TestRun",
            "ClusterTestRun",
            "AttemptStatus",
            "SuiteType",
            "Service",
            "ClusterRegion",
            "ReleaseTicket",
            "Scorecard",
            "FixtureSummary",
            "ClusterSnapshot",
        ] {
            assert!(schemas.contains_key(name), "missing schema {}", name);
        }
    }

    #[test]
    fn test_render_is_valid_json() {
        let json = render(false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["info"]["title"], "Deploy Insights Fixtures");
        assert!(value["components"]["schemas"]["DeploymentAttempt"].is_object());
    }
}
