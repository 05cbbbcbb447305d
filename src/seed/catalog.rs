//! Clusters, regions and services of the platform.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::fixtures::Catalog;
use crate::models::{Cluster, ClusterTier, Criticality, RegionRoles, Service};

const CLUSTERS: &[(&str, &str, ClusterTier, &str)] = &[
    (
        "mira",
        "Mira",
        ClusterTier::Qa,
        "Deploy after PR is merged. Functional tests gate success. Functional/Scale/Perf/Manual testing cluster. Also runs Nightly Regression.",
    ),
    (
        "pavo",
        "Pavo",
        ClusterTier::Stage,
        "Promote after Mira validation. Used by BU partners and also runs Nightly Regression.",
    ),
    (
        "aquila",
        "Aquila",
        ClusterTier::Production,
        "Production rollout to customers after confidence is high.",
    ),
];

const REGIONS: &[(&str, &str)] = &[
    ("mira", "us-west-2"),
    ("mira", "us-east-2"),
    ("pavo", "us-west-2"),
    ("pavo", "us-east-2"),
    ("aquila", "us-west-2"),
    ("aquila", "us-east-2"),
];

/// `(cluster, active region, hot-standby region)`
const ROLES: &[(&str, &str, &str)] = &[
    ("mira", "us-west-2", "us-east-2"),
    ("pavo", "us-west-2", "us-east-2"),
    ("aquila", "us-west-2", "us-east-2"),
];

/// `(id, name, owner, criticality, app id)`
const SERVICES: &[(&str, &str, &str, Criticality, &str)] = &[
    ("authn", "AuthN", "Identity Team", Criticality::Critical, "00000000-0000-0000-0000-000000000001"),
    ("authz", "AuthZ", "Identity Team", Criticality::Critical, "00000000-0000-0000-0000-000000000002"),
    ("account-management", "Account-management", "Accounts Team", Criticality::High, "a8965612-527e-45b4-8ee9-616109cb79e5"),
    ("activate-device-direct", "Activate-Device-Direct", "Activation Team", Criticality::High, "00000000-0000-0000-0000-000000000003"),
    ("activate-inventory", "Activate-Inventory", "Activation Team", Criticality::High, "00000000-0000-0000-0000-000000000004"),
    ("ugm", "UGM", "Platform Team", Criticality::Medium, "00000000-0000-0000-0000-000000000005"),
    ("pingfed", "Pingfed", "Identity Team", Criticality::Medium, "00000000-0000-0000-0000-000000000006"),
    ("session-manager", "Session Manager", "Platform Team", Criticality::Medium, "00000000-0000-0000-0000-000000000007"),
    ("sso-manager", "SSO Manager", "Identity Team", Criticality::Medium, "00000000-0000-0000-0000-000000000008"),
    ("frontend", "Frontend", "UI Team", Criticality::High, "00000000-0000-0000-0000-000000000009"),
    ("ui-doorway", "UI-Doorway", "UI Team", Criticality::High, "00000000-0000-0000-0000-000000000010"),
    ("mfe", "MFE", "UI Team", Criticality::High, "00000000-0000-0000-0000-000000000011"),
    ("notification-service", "Notification Service", "Platform Team", Criticality::Medium, "00000000-0000-0000-0000-000000000012"),
    ("audit-service", "Audit Service", "Security Team", Criticality::High, "00000000-0000-0000-0000-000000000013"),
    ("config-service", "Config Service", "Platform Team", Criticality::Medium, "00000000-0000-0000-0000-000000000014"),
];

pub fn catalog() -> AppResult<Catalog> {
    let clusters = CLUSTERS
        .iter()
        .map(|(id, name, tier, description)| Cluster {
            id: id.to_string(),
            name: name.to_string(),
            tier: *tier,
            description: description.to_string(),
        })
        .collect();

    let roles: BTreeMap<String, RegionRoles> = ROLES
        .iter()
        .map(|(cluster, active, standby)| {
            (
                cluster.to_string(),
                RegionRoles {
                    active: active.to_string(),
                    hot_standby: standby.to_string(),
                },
            )
        })
        .collect();

    let services = SERVICES
        .iter()
        .map(|(id, name, owner, tier, app_id)| {
            let app_id = Uuid::parse_str(app_id)
                .map_err(|e| AppError::InvalidSeed(format!("service {} app id: {}", id, e)))?;
            Ok(Service {
                id: id.to_string(),
                name: name.to_string(),
                owner: owner.to_string(),
                tier: *tier,
                app_id,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Catalog::new(clusters, REGIONS, &roles, services)
}
