//! Versions currently live on each cluster-region.

use crate::fixtures::CurrentRunning;

const MIRA_US_WEST_2: &[(&str, &str)] = &[
    ("authn", "3.4.2"),
    ("authz", "2.9.1"),
    ("account-management", "1.18.0"),
    ("activate-device-direct", "5.2.0"),
    ("activate-inventory", "4.6.1"),
    ("ugm", "2.1.3"),
    ("pingfed", "12.0.9"),
    ("session-manager", "1.9.8"),
    ("sso-manager", "2.3.5"),
    ("frontend", "0.42.2"),
    ("ui-doorway", "0.18.3"),
    ("mfe", "0.27.6"),
    ("notification-service", "1.3.0"),
    ("audit-service", "2.0.4"),
    ("config-service", "0.9.1"),
];

const MIRA_US_EAST_2: &[(&str, &str)] = &[
    ("authn", "3.4.1"),
    ("authz", "2.9.2"),
    ("account-management", "1.18.0"),
    ("activate-device-direct", "5.2.1"),
    ("activate-inventory", "4.6.1"),
    ("ugm", "2.1.3"),
    ("pingfed", "12.0.9"),
    ("session-manager", "1.9.8"),
    ("sso-manager", "2.3.5"),
    ("frontend", "0.42.2"),
    ("ui-doorway", "0.18.3"),
    ("mfe", "0.27.6"),
    ("notification-service", "1.2.9"),
    ("audit-service", "2.0.3"),
    ("config-service", "0.9.0"),
];

const PAVO_US_WEST_2: &[(&str, &str)] = &[
    ("authn", "3.4.1"),
    ("authz", "2.9.1"),
    ("account-management", "1.17.9"),
    ("activate-device-direct", "5.1.8"),
    ("activate-inventory", "4.6.0"),
    ("ugm", "2.1.2"),
    ("pingfed", "12.0.8"),
    ("session-manager", "1.9.6"),
    ("sso-manager", "2.3.3"),
    ("frontend", "0.42.1"),
    ("ui-doorway", "0.18.2"),
    ("mfe", "0.27.3"),
];

const PAVO_US_EAST_2: &[(&str, &str)] = &[
    ("authn", "3.4.0"),
    ("authz", "2.9.1"),
    ("account-management", "1.17.9"),
    ("activate-device-direct", "5.1.2"),
    ("activate-inventory", "4.6.0"),
    ("ugm", "2.1.0"),
    ("pingfed", "12.0.7"),
    ("session-manager", "1.9.2"),
    ("sso-manager", "2.3.3"),
    ("frontend", "0.40.0"),
    ("ui-doorway", "0.17.4"),
    ("mfe", "0.27.3"),
];

/// Production runs the first ten services only.
const AQUILA: &[(&str, &str)] = &[
    ("authn", "3.4.0"),
    ("authz", "2.8.9"),
    ("account-management", "1.17.7"),
    ("activate-device-direct", "5.1.2"),
    ("activate-inventory", "4.5.6"),
    ("ugm", "2.1.0"),
    ("pingfed", "12.0.7"),
    ("session-manager", "1.9.2"),
    ("sso-manager", "2.3.0"),
    ("frontend", "0.40.0"),
];

const TABLE: &[(&str, &[(&str, &str)])] = &[
    ("mira-us-west-2", MIRA_US_WEST_2),
    ("mira-us-east-2", MIRA_US_EAST_2),
    ("pavo-us-west-2", PAVO_US_WEST_2),
    ("pavo-us-east-2", PAVO_US_EAST_2),
    ("aquila-us-west-2", AQUILA),
    ("aquila-us-east-2", AQUILA),
];

pub fn current_running() -> CurrentRunning {
    let mut current = CurrentRunning::new();
    for (cluster_region_id, services) in TABLE {
        for (service_id, version) in *services {
            current.insert(cluster_region_id, service_id, version);
        }
    }
    current
}
