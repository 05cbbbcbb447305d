//! Promotions, release tickets and readiness scorecards.

use super::timestamp;
use crate::error::AppResult;
use crate::fixtures::ReferenceData;
use crate::models::TicketKind::{self, Bug, Story, Task};
use crate::models::TicketPriority::{self, Critical, High, Low, Medium};
use crate::models::{Promotion, ReleaseTicket, Scorecard, ScorecardWeights};

/// `(id, service, version, from, to, promoted at)`
const PROMOTIONS: &[(&str, &str, &str, &str, &str, &str)] = &[
    ("promo:1", "authn", "3.4.1", "mira-us-east-2", "pavo-us-west-2", "2026-02-03T23:05:00Z"),
    ("promo:2", "authn", "3.4.0", "pavo-us-west-2", "aquila-us-west-2", "2026-02-02T17:40:00Z"),
];

/// `(service, key, summary, kind, priority, version)`; every ticket is done.
const TICKETS: &[(&str, &str, &str, TicketKind, TicketPriority, &str)] = &[
    ("authn", "AUTHN-1042", "Fix token refresh race condition", Bug, Critical, "3.4.2"),
    ("authn", "AUTHN-1038", "Add MFA enrollment audit logging", Story, High, "3.4.2"),
    ("authn", "AUTHN-1035", "Upgrade OIDC library to 4.x", Task, Medium, "3.4.2"),
    ("authn", "AUTHN-1030", "Session expiry not honoring grace period", Bug, High, "3.4.1"),
    ("authn", "AUTHN-1027", "Support SAML IdP-initiated SSO", Story, High, "3.4.1"),
    ("authn", "AUTHN-1024", "Rate limit login attempts per IP", Story, Medium, "3.4.1"),
    ("authn", "AUTHN-1020", "Password policy minimum length increase", Task, Low, "3.4.0"),
    ("authn", "AUTHN-1018", "Fix CORS header for /userinfo endpoint", Bug, High, "3.4.0"),
    ("authn", "AUTHN-1015", "Add account lockout notification email", Story, Medium, "3.4.0"),
    ("authz", "AUTHZ-892", "Policy evaluation timeout on large rule sets", Bug, Critical, "2.9.1"),
    ("authz", "AUTHZ-888", "Add deny-override combining algorithm", Story, High, "2.9.1"),
    ("authz", "AUTHZ-885", "Cache policy decisions for 30s", Task, Medium, "2.9.0"),
    ("authz", "AUTHZ-880", "Fix role hierarchy resolution for nested groups", Bug, High, "2.9.0"),
    ("authz", "AUTHZ-876", "Attribute-based access control MVP", Story, High, "2.8.9"),
    ("authz", "AUTHZ-872", "Audit log for permission changes", Story, Medium, "2.8.9"),
    ("account-management", "ACCT-540", "Bulk account import CSV validation fix", Bug, High, "1.18.0"),
    ("account-management", "ACCT-537", "Add account suspension workflow", Story, High, "1.18.0"),
    ("account-management", "ACCT-533", "Org hierarchy depth limit to 10 levels", Task, Medium, "1.17.9"),
    ("account-management", "ACCT-530", "Fix duplicate email validation on update", Bug, Medium, "1.17.9"),
    ("account-management", "ACCT-526", "Self-service account deletion", Story, High, "1.17.7"),
    ("activate-device-direct", "ADD-310", "Device activation timeout increased to 120s", Task, Medium, "5.2.0"),
    ("activate-device-direct", "ADD-307", "Support batch device onboarding", Story, High, "5.2.0"),
    ("activate-device-direct", "ADD-304", "Fix serial number collision handling", Bug, Critical, "5.1.8"),
    ("activate-device-direct", "ADD-300", "Add device health check endpoint", Story, Medium, "5.1.8"),
    ("activate-device-direct", "ADD-296", "Certificate rotation for device auth", Task, High, "5.1.2"),
    ("activate-inventory", "INV-220", "Inventory sync job memory leak fix", Bug, Critical, "4.6.1"),
    ("activate-inventory", "INV-217", "Add inventory export to CSV", Story, Medium, "4.6.1"),
    ("activate-inventory", "INV-214", "Pagination fix for large inventory lists", Bug, High, "4.6.0"),
    ("activate-inventory", "INV-210", "Inventory reconciliation cron job", Story, High, "4.6.0"),
    ("activate-inventory", "INV-206", "Add inventory tagging support", Story, Medium, "4.5.6"),
    ("ugm", "UGM-180", "Group membership cache invalidation fix", Bug, High, "2.1.3"),
    ("ugm", "UGM-177", "Nested group resolution performance", Task, Medium, "2.1.3"),
    ("ugm", "UGM-174", "Add bulk user import via SCIM", Story, High, "2.1.2"),
    ("ugm", "UGM-170", "Fix user search by display name", Bug, Medium, "2.1.2"),
    ("ugm", "UGM-166", "Dynamic group rules engine", Story, High, "2.1.0"),
    ("pingfed", "PF-450", "Upgrade PingFederate runtime to 12.0.8", Task, High, "12.0.8"),
    ("pingfed", "PF-447", "Fix SAML assertion signing algorithm", Bug, Critical, "12.0.8"),
    ("pingfed", "PF-443", "Add OAuth2 DPoP support", Story, Medium, "12.0.7"),
    ("session-manager", "SM-330", "Redis session store connection pooling", Task, High, "1.9.7"),
    ("session-manager", "SM-327", "Fix session hijack detection false positives", Bug, Critical, "1.9.7"),
    ("session-manager", "SM-324", "Sliding window session expiry", Story, Medium, "1.9.6"),
    ("session-manager", "SM-320", "Add session activity log", Story, Low, "1.9.2"),
    ("sso-manager", "SSO-270", "Fix cross-domain cookie SameSite issue", Bug, Critical, "2.3.4"),
    ("sso-manager", "SSO-267", "SP-initiated logout flow", Story, High, "2.3.4"),
    ("sso-manager", "SSO-264", "Add SSO connection test endpoint", Story, Medium, "2.3.3"),
    ("sso-manager", "SSO-260", "OIDC back-channel logout support", Story, High, "2.3.0"),
    ("frontend", "FE-890", "Fix dashboard rendering on Safari 17", Bug, High, "0.42.0"),
    ("frontend", "FE-887", "Dark mode color contrast accessibility", Story, Medium, "0.42.0"),
    ("frontend", "FE-884", "Add keyboard navigation to data tables", Story, Medium, "0.41.3"),
    ("frontend", "FE-880", "Bundle size optimization -15%", Task, High, "0.41.3"),
    ("frontend", "FE-876", "Fix date picker timezone issue", Bug, High, "0.40.0"),
    ("ui-doorway", "UID-190", "Portal landing page redesign", Story, High, "0.18.2"),
    ("ui-doorway", "UID-187", "Fix redirect loop on expired sessions", Bug, Critical, "0.18.2"),
    ("ui-doorway", "UID-184", "Add multi-tenant branding support", Story, Medium, "0.18.1"),
    ("ui-doorway", "UID-180", "Lazy load portal micro-frontends", Task, High, "0.17.4"),
    ("mfe", "MFE-150", "Module federation shared scope fix", Bug, High, "0.27.5"),
    ("mfe", "MFE-147", "Add health check for remote modules", Story, Medium, "0.27.5"),
    ("mfe", "MFE-144", "Upgrade Webpack to 5.90", Task, Medium, "0.27.3"),
    ("mfe", "MFE-140", "Fix CSS isolation between micro-frontends", Bug, High, "0.26.9"),
    ("notification-service", "NS-110", "Email template rendering fix for Outlook", Bug, High, "1.3.0"),
    ("notification-service", "NS-107", "Add webhook delivery retry with backoff", Story, High, "1.3.0"),
    ("notification-service", "NS-104", "SMS notification support", Story, Medium, "1.2.9"),
    ("audit-service", "AUD-88", "Fix audit log search by date range", Bug, High, "2.0.4"),
    ("audit-service", "AUD-85", "Add audit event streaming to SIEM", Story, High, "2.0.4"),
    ("audit-service", "AUD-82", "Retention policy auto-purge", Task, Medium, "2.0.3"),
    ("config-service", "CFG-66", "Fix config reload race condition", Bug, Critical, "0.9.1"),
    ("config-service", "CFG-63", "Add config diff between versions", Story, Medium, "0.9.1"),
    ("config-service", "CFG-60", "Environment variable override support", Story, High, "0.9.0"),
];

/// `(service, [gameday, outages, tests, incidents, readiness], notes)`
const SCORECARDS: &[(&str, [u32; 5], &str)] = &[
    ("authn", [86, 92, 88, 80, 90], "Strong reliability and test coverage; a few incident learnings pending follow-up."),
    ("authz", [84, 88, 85, 78, 87], "Stable. Improve incident response automation and add more system tests."),
    ("account-management", [75, 82, 78, 70, 79], "Track recurring incident type and complete remaining production readiness checks."),
    ("activate-device-direct", [80, 76, 74, 72, 77], "Recent deploy instability; prioritize system tests and hardening from gameday findings."),
    ("activate-inventory", [82, 85, 79, 74, 83], "Good trend; address top flaky tests and add outage drills."),
    ("ugm", [70, 80, 72, 68, 75], "Needs more production readiness automation and incident playbooks."),
    ("pingfed", [78, 90, 70, 76, 82], "Outage record is strong; improve solution/system test automation coverage."),
    ("session-manager", [74, 79, 76, 71, 78], "Moderate risk; close readiness gaps and tighten incident response SLAs."),
    ("sso-manager", [76, 84, 77, 73, 81], "Healthy baseline; improve gameday scenarios and system test depth."),
    ("frontend", [72, 83, 75, 69, 74], "UI regressions observed; add more E2E/system tests and incident runbooks."),
    ("ui-doorway", [71, 82, 73, 68, 73], "Improve readiness checks and gameday remediation tracking."),
    ("mfe", [73, 81, 74, 70, 76], "Focus on system tests and production readiness score improvements."),
    ("notification-service", [68, 77, 71, 65, 70], "New service ramping up; needs gameday participation and broader test coverage."),
    ("audit-service", [80, 86, 82, 75, 84], "Solid reliability; improve incident response playbooks."),
    ("config-service", [66, 74, 69, 63, 68], "Early stage; prioritize production readiness checklist and system tests."),
];

pub fn reference() -> AppResult<ReferenceData> {
    let promotions = PROMOTIONS
        .iter()
        .map(|(id, service_id, version, from, to, promoted_at)| {
            Ok(Promotion {
                id: id.to_string(),
                service_id: service_id.to_string(),
                build_version: version.to_string(),
                from_cluster_id: from.to_string(),
                to_cluster_id: to.to_string(),
                promoted_at: timestamp(promoted_at)?,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    let mut data = ReferenceData {
        promotions,
        weights: ScorecardWeights::default(),
        ..ReferenceData::default()
    };

    for (service_id, key, summary, kind, priority, version) in TICKETS {
        data.tickets
            .entry(service_id.to_string())
            .or_default()
            .push(ReleaseTicket {
                key: key.to_string(),
                summary: summary.to_string(),
                kind: *kind,
                priority: *priority,
                version: version.to_string(),
                status: "Done".to_string(),
            });
    }

    for (service_id, [gameday, outages, tests, incidents, readiness], notes) in SCORECARDS {
        data.scorecards.insert(
            service_id.to_string(),
            Scorecard {
                gameday: *gameday,
                outages: *outages,
                tests: *tests,
                incidents: *incidents,
                readiness: *readiness,
                notes: notes.to_string(),
            },
        );
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_tables() {
        let data = reference().unwrap();
        assert_eq!(data.promotions.len(), 2);
        assert_eq!(data.tickets.len(), 15);
        assert_eq!(data.tickets["authn"].len(), 9);
        assert_eq!(data.scorecards.len(), 15);
        assert_eq!(data.weights.total(), 100);
    }

    #[test]
    fn test_ticket_order_is_preserved() {
        let data = reference().unwrap();
        let keys: Vec<_> = data.tickets["pingfed"].iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, vec!["PF-450", "PF-447", "PF-443"]);
    }
}
