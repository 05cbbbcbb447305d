//! Hand-authored deployment attempts and the pinned incident ledger.

use super::timestamp;
use crate::error::{AppError, AppResult};
use crate::fixtures::ExceptionLedger;
use crate::models::AttemptStatus::{self, Failed, InProgress, Live, Rollback, Success};
use crate::models::DeploymentAttempt;
use crate::models::Trigger::{self, Merge, Promotion};

/// Attempts that stay failed or rolled back even when they are
/// the newest release of their pair.
pub const PINNED_ATTEMPTS: &[&str] = &[
    "mira-us-west-2:notification-service:1.3.1:5001",
    "mira-us-west-2:config-service:0.9.2:5002",
    "mira-us-west-2:audit-service:2.0.5:5003",
];

/// One row of the seed table. Cluster-region, service and version are
/// taken from the id.
#[derive(Debug, Clone, Copy)]
pub struct SeedAttempt {
    pub id: &'static str,
    pub git_sha: &'static str,
    pub started_at: &'static str,
    pub ended_at: Option<&'static str>,
    pub status: AttemptStatus,
    pub trigger: Trigger,
    pub rollback_to: Option<&'static str>,
    pub failure_reason: Option<&'static str>,
}

const fn attempt(
    id: &'static str,
    git_sha: &'static str,
    started_at: &'static str,
    ended_at: Option<&'static str>,
    status: AttemptStatus,
    trigger: Trigger,
) -> SeedAttempt {
    SeedAttempt {
        id,
        git_sha,
        started_at,
        ended_at,
        status,
        trigger,
        rollback_to: None,
        failure_reason: None,
    }
}

impl SeedAttempt {
    const fn rolled_back(self, to: &'static str, reason: &'static str) -> Self {
        SeedAttempt {
            rollback_to: Some(to),
            failure_reason: Some(reason),
            ..self
        }
    }

    const fn failed_because(self, reason: &'static str) -> Self {
        SeedAttempt {
            failure_reason: Some(reason),
            ..self
        }
    }

    pub fn to_attempt(&self) -> AppResult<DeploymentAttempt> {
        let parts: Vec<&str> = self.id.splitn(4, ':').collect();
        let [cluster_region_id, service_id, build_version, _sequence] = parts.as_slice() else {
            return Err(AppError::InvalidSeed(format!(
                "attempt id {} is not cluster:service:version:sequence",
                self.id
            )));
        };

        Ok(DeploymentAttempt {
            id: self.id.to_string(),
            cluster_region_id: cluster_region_id.to_string(),
            service_id: service_id.to_string(),
            build_version: build_version.to_string(),
            git_sha: self.git_sha.to_string(),
            started_at: timestamp(self.started_at)?,
            ended_at: self.ended_at.map(timestamp).transpose()?,
            status: self.status,
            rollback_to_build: self.rollback_to.map(str::to_string),
            failure_reason: self.failure_reason.map(str::to_string),
            trigger: self.trigger,
        })
    }
}

pub const SEED_ATTEMPTS: &[SeedAttempt] = &[
    attempt("mira-us-west-2:authn:3.4.2:1284", "a1b2c3d", "2026-02-03T22:14:00Z", Some("2026-02-03T22:28:00Z"), Success, Merge),
    attempt("mira-us-west-2:authn:3.4.2:1283", "a1b2c3d", "2026-02-03T20:10:00Z", Some("2026-02-03T20:19:00Z"), Rollback, Merge)
        .rolled_back("3.4.1", "Functional failures during deployment"),
    attempt("mira-us-east-2:authn:3.4.1:1282", "98ff12a", "2026-02-03T17:02:00Z", Some("2026-02-03T17:14:00Z"), Success, Merge),
    attempt("pavo-us-west-2:authn:3.4.1:1279", "98ff12a", "2026-02-03T23:10:00Z", Some("2026-02-03T23:20:00Z"), Success, Promotion),
    attempt("aquila-us-west-2:authn:3.4.0:1275", "77ac991", "2026-02-02T18:00:00Z", Some("2026-02-02T18:22:00Z"), Live, Promotion),
    attempt("mira-us-west-2:authz:2.9.1:2201", "b9c0a12", "2026-02-03T19:42:00Z", Some("2026-02-03T19:55:00Z"), Success, Merge),
    attempt("mira-us-west-2:activate-device-direct:5.2.0:540", "c3d4e5f", "2026-02-03T18:10:00Z", Some("2026-02-03T18:37:00Z"), Failed, Merge)
        .failed_because("Health checks did not stabilize within timeout"),
    attempt("mira-us-east-2:account-management:1.18.0:9101", "d0c0ffee", "2026-02-05T18:40:02Z", None, InProgress, Merge),
    attempt("mira-us-west-2:account-management:1.17.9:9099", "c0ffee0", "2026-02-05T14:10:00Z", Some("2026-02-05T14:22:00Z"), Success, Merge),
    attempt("mira-us-west-2:ugm:2.1.3:330", "bead123", "2026-02-05T11:00:00Z", Some("2026-02-05T11:18:00Z"), Success, Merge),
    attempt("mira-us-east-2:ugm:2.1.3:331", "bead123", "2026-02-05T11:30:00Z", Some("2026-02-05T11:50:00Z"), Failed, Merge)
        .failed_because("Functional gate timed out"),
    attempt("pavo-us-east-2:authz:2.9.1:4120", "b9c0a12", "2026-02-04T10:00:00Z", Some("2026-02-04T10:12:00Z"), Success, Promotion),
    attempt("pavo-us-west-2:frontend:0.42.0:801", "f00dbad", "2026-02-04T06:05:00Z", Some("2026-02-04T06:22:00Z"), Success, Promotion),
    attempt("pavo-us-west-2:frontend:0.42.1:802", "f00dbb1", "2026-02-05T03:05:00Z", Some("2026-02-05T03:18:00Z"), Failed, Promotion)
        .failed_because("Smoke checks failed after rollout"),
    attempt("aquila-us-east-2:authz:2.8.9:3990", "7a7a7a7", "2026-02-02T20:00:00Z", Some("2026-02-02T20:18:00Z"), Live, Promotion),
    attempt("mira-us-east-2:authz:2.9.2:2205", "b9c0a13", "2026-02-05T09:05:00Z", Some("2026-02-05T09:18:00Z"), Success, Merge),
    attempt("mira-us-west-2:authz:2.9.0:2199", "b9c0a11", "2026-02-02T15:10:00Z", Some("2026-02-02T15:22:00Z"), Success, Merge),
    attempt("mira-us-east-2:account-management:1.17.8:9096", "c0ffee1", "2026-02-04T12:05:00Z", Some("2026-02-04T12:18:00Z"), Success, Merge),
    attempt("pavo-us-west-2:account-management:1.17.8:8801", "c0ffee1", "2026-02-04T18:10:00Z", Some("2026-02-04T18:25:00Z"), Success, Promotion),
    attempt("pavo-us-east-2:account-management:1.17.9:8802", "c0ffee0", "2026-02-05T02:00:00Z", Some("2026-02-05T02:18:00Z"), Failed, Promotion)
        .failed_because("Sanity checks failed after promotion"),
    attempt("mira-us-east-2:activate-device-direct:5.2.1:545", "c3d4e60", "2026-02-05T13:05:00Z", Some("2026-02-05T13:28:00Z"), Success, Merge),
    attempt("mira-us-west-2:activate-device-direct:5.2.0:541", "c3d4e5f", "2026-02-03T16:10:00Z", Some("2026-02-03T16:32:00Z"), Rollback, Merge)
        .rolled_back("5.1.8", "Functional failures during deployment"),
    attempt("pavo-us-west-2:activate-device-direct:5.1.8:510", "c3d4e4a", "2026-02-03T23:40:00Z", Some("2026-02-03T23:58:00Z"), Success, Promotion),
    attempt("aquila-us-west-2:activate-device-direct:5.1.2:470", "c3d4e10", "2026-02-01T18:00:00Z", Some("2026-02-01T18:25:00Z"), Live, Promotion),
    attempt("mira-us-west-2:activate-inventory:4.6.1:610", "aa11bb2", "2026-02-05T05:10:00Z", Some("2026-02-05T05:28:00Z"), Success, Merge),
    attempt("mira-us-east-2:activate-inventory:4.6.1:611", "aa11bb2", "2026-02-05T05:40:00Z", Some("2026-02-05T05:58:00Z"), Success, Merge),
    attempt("mira-us-west-2:activate-inventory:4.6.0:608", "aa11bb1", "2026-02-04T04:10:00Z", Some("2026-02-04T04:25:00Z"), Failed, Merge)
        .failed_because("Health checks failed"),
    attempt("pavo-us-east-2:activate-inventory:4.6.0:590", "aa11bb1", "2026-02-04T21:10:00Z", Some("2026-02-04T21:26:00Z"), Success, Promotion),
    attempt("aquila-us-east-2:activate-inventory:4.5.6:560", "aa11bb0", "2026-02-02T12:00:00Z", Some("2026-02-02T12:18:00Z"), Live, Promotion),
    attempt("mira-us-west-2:ugm:2.1.2:329", "bead122", "2026-02-04T09:00:00Z", Some("2026-02-04T09:15:00Z"), Success, Merge),
    attempt("pavo-us-west-2:ugm:2.1.2:300", "bead122", "2026-02-04T13:00:00Z", Some("2026-02-04T13:12:00Z"), Success, Promotion),
    attempt("aquila-us-west-2:ugm:2.1.0:260", "bead120", "2026-02-01T20:00:00Z", Some("2026-02-01T20:15:00Z"), Live, Promotion),
    attempt("mira-us-west-2:pingfed:12.0.9:150", "9911aa0", "2026-02-05T07:00:00Z", Some("2026-02-05T07:10:00Z"), Success, Merge),
    attempt("mira-us-east-2:pingfed:12.0.9:151", "9911aa0", "2026-02-05T07:20:00Z", Some("2026-02-05T07:32:00Z"), Success, Merge),
    attempt("mira-us-west-2:pingfed:12.0.8:148", "9911a99", "2026-02-04T07:00:00Z", Some("2026-02-04T07:12:00Z"), Rollback, Merge)
        .rolled_back("12.0.7", "Functional failures during deployment"),
    attempt("pavo-us-west-2:pingfed:12.0.8:140", "9911a99", "2026-02-04T22:00:00Z", Some("2026-02-04T22:11:00Z"), Success, Promotion),
    attempt("aquila-us-east-2:pingfed:12.0.7:120", "9911a70", "2026-02-02T22:10:00Z", Some("2026-02-02T22:22:00Z"), Live, Promotion),
    attempt("mira-us-west-2:session-manager:1.9.8:901", "55aa001", "2026-02-05T10:00:00Z", Some("2026-02-05T10:15:00Z"), Success, Merge),
    attempt("mira-us-east-2:session-manager:1.9.8:902", "55aa001", "2026-02-05T10:20:00Z", Some("2026-02-05T10:40:00Z"), Success, Merge),
    attempt("mira-us-west-2:session-manager:1.9.7:899", "55aa000", "2026-02-04T10:00:00Z", Some("2026-02-04T10:18:00Z"), Failed, Merge)
        .failed_because("Functional gate timed out"),
    attempt("pavo-us-west-2:session-manager:1.9.6:870", "5599ff0", "2026-02-03T21:10:00Z", Some("2026-02-03T21:25:00Z"), Success, Promotion),
    attempt("aquila-us-west-2:session-manager:1.9.2:820", "5599aa2", "2026-02-01T10:10:00Z", Some("2026-02-01T10:28:00Z"), Live, Promotion),
    attempt("mira-us-west-2:sso-manager:2.3.5:701", "123ab55", "2026-02-05T08:00:00Z", Some("2026-02-05T08:15:00Z"), Success, Merge),
    attempt("mira-us-east-2:sso-manager:2.3.5:702", "123ab55", "2026-02-05T08:20:00Z", Some("2026-02-05T08:33:00Z"), Success, Merge),
    attempt("mira-us-west-2:sso-manager:2.3.4:699", "123ab44", "2026-02-04T08:00:00Z", Some("2026-02-04T08:14:00Z"), Success, Merge),
    attempt("pavo-us-east-2:sso-manager:2.3.3:670", "123ab33", "2026-02-03T09:00:00Z", Some("2026-02-03T09:12:00Z"), Success, Promotion),
    attempt("aquila-us-east-2:sso-manager:2.3.0:640", "123ab00", "2026-02-01T22:00:00Z", Some("2026-02-01T22:18:00Z"), Live, Promotion),
    attempt("mira-us-west-2:frontend:0.42.2:820", "f00dbb2", "2026-02-05T04:00:00Z", Some("2026-02-05T04:15:00Z"), Success, Merge),
    attempt("mira-us-east-2:frontend:0.42.2:821", "f00dbb2", "2026-02-05T04:25:00Z", Some("2026-02-05T04:40:00Z"), Success, Merge),
    attempt("aquila-us-west-2:frontend:0.40.0:780", "f00db40", "2026-02-02T08:00:00Z", Some("2026-02-02T08:14:00Z"), Live, Promotion),
    attempt("mira-us-west-2:ui-doorway:0.18.3:1001", "dd00aa3", "2026-02-05T06:00:00Z", Some("2026-02-05T06:12:00Z"), Success, Merge),
    attempt("mira-us-east-2:ui-doorway:0.18.3:1002", "dd00aa3", "2026-02-05T06:20:00Z", Some("2026-02-05T06:35:00Z"), Success, Merge),
    attempt("mira-us-west-2:ui-doorway:0.18.2:999", "dd00aa2", "2026-02-04T06:00:00Z", Some("2026-02-04T06:14:00Z"), Failed, Merge)
        .failed_because("E2E smoke failed"),
    attempt("pavo-us-west-2:ui-doorway:0.18.2:960", "dd00aa2", "2026-02-04T20:00:00Z", Some("2026-02-04T20:12:00Z"), Success, Promotion),
    attempt("mira-us-west-2:mfe:0.27.6:1101", "ee11aa6", "2026-02-05T06:50:00Z", Some("2026-02-05T07:05:00Z"), Success, Merge),
    attempt("mira-us-east-2:mfe:0.27.6:1102", "ee11aa6", "2026-02-05T07:15:00Z", Some("2026-02-05T07:28:00Z"), Success, Merge),
    attempt("mira-us-west-2:mfe:0.27.5:1099", "ee11aa5", "2026-02-04T06:50:00Z", Some("2026-02-04T07:05:00Z"), Failed, Merge)
        .failed_because("Bundle validation failed"),
    attempt("pavo-us-east-2:mfe:0.27.3:1060", "ee11aa3", "2026-02-03T17:00:00Z", Some("2026-02-03T17:12:00Z"), Success, Promotion),
    attempt("mira-us-west-2:notification-service:1.3.1:5001", "noti501", "2026-02-05T16:00:00Z", Some("2026-02-05T16:14:00Z"), Rollback, Merge)
        .rolled_back("1.3.0", "Functional gate failures: notification delivery timeout"),
    attempt("mira-us-west-2:config-service:0.9.2:5002", "cfg5002", "2026-02-05T15:30:00Z", Some("2026-02-05T15:42:00Z"), Rollback, Merge)
        .rolled_back("0.9.1", "Config propagation regression detected"),
    attempt("mira-us-west-2:audit-service:2.0.5:5003", "aud5003", "2026-02-05T14:45:00Z", Some("2026-02-05T14:58:00Z"), Failed, Merge)
        .failed_because("Health checks did not stabilize within timeout"),
];

pub fn attempts() -> AppResult<Vec<DeploymentAttempt>> {
    SEED_ATTEMPTS.iter().map(SeedAttempt::to_attempt).collect()
}

pub fn exceptions() -> ExceptionLedger {
    PINNED_ATTEMPTS.iter().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_attempts_parse() {
        let attempts = attempts().unwrap();
        assert_eq!(attempts.len(), SEED_ATTEMPTS.len());

        let rollback = attempts
            .iter()
            .find(|a| a.id == "mira-us-west-2:authn:3.4.2:1283")
            .unwrap();
        assert_eq!(rollback.cluster_region_id, "mira-us-west-2");
        assert_eq!(rollback.service_id, "authn");
        assert_eq!(rollback.build_version, "3.4.2");
        assert_eq!(rollback.status, AttemptStatus::Rollback);
        assert_eq!(rollback.rollback_to_build.as_deref(), Some("3.4.1"));
    }

    #[test]
    fn test_in_progress_has_no_end() {
        let attempts = attempts().unwrap();
        let running = attempts
            .iter()
            .find(|a| a.status == AttemptStatus::InProgress)
            .unwrap();
        assert!(running.ended_at.is_none());
    }

    #[test]
    fn test_malformed_id_rejected() {
        let bad = attempt("mira-us-west-2:authn", "a", "2026-02-03T22:14:00Z", None, Success, Merge);
        assert!(bad.to_attempt().is_err());
    }

    #[test]
    fn test_pinned_attempts_are_seeded() {
        let attempts = attempts().unwrap();
        for pinned in exceptions().iter() {
            assert!(attempts.iter().any(|a| a.id == pinned), "{}", pinned);
        }
    }
}
