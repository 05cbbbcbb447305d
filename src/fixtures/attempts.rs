//! Attempt backfill, current-version anchoring, latest-healthy
//! normalization and the final newest-first ordering.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use super::inputs::{Catalog, CurrentRunning, ExceptionLedger};
use super::semver;
use super::{OnMissingCurrentVersion, SynthesisOptions};
use crate::models::{AttemptStatus, ClusterTier, DeploymentAttempt, Trigger};

/// First sequence number used for backfilled attempts.
pub const BACKFILL_SEQUENCE_BASE: usize = 9000;
/// Sequence number of the attempt anchoring the current version.
pub const ANCHOR_SEQUENCE: usize = 8999;
/// Wall-clock length of every synthesized attempt.
pub const SYNTHETIC_DURATION_MINUTES: i64 = 12;

const BASELINE_VERSION: &str = "0.0.0";

/// Sequence suffix (and git revision marker) of a synthesized attempt.
pub fn synthetic_sequence(n: usize) -> String {
    format!("gen{}", n)
}

fn synthesize(
    cluster_region_id: &str,
    service_id: &str,
    version: &str,
    sequence: usize,
    started_at: DateTime<Utc>,
    tier: ClusterTier,
) -> DeploymentAttempt {
    let marker = synthetic_sequence(sequence);
    DeploymentAttempt {
        id: DeploymentAttempt::compose_id(cluster_region_id, service_id, version, &marker),
        cluster_region_id: cluster_region_id.to_string(),
        service_id: service_id.to_string(),
        build_version: version.to_string(),
        git_sha: marker,
        started_at,
        ended_at: Some(started_at + Duration::minutes(SYNTHETIC_DURATION_MINUTES)),
        status: AttemptStatus::healthy_for(tier),
        rollback_to_build: None,
        failure_reason: None,
        trigger: Trigger::for_tier(tier),
    }
}

/// `(cluster_region_id, service_id, baseline_version)` for every pair to backfill.
fn backfill_targets<'a>(
    catalog: &'a Catalog,
    current: &'a CurrentRunning,
    mode: OnMissingCurrentVersion,
) -> Vec<(&'a str, &'a str, &'a str)> {
    match mode {
        OnMissingCurrentVersion::Skip => current.entries().collect(),
        OnMissingCurrentVersion::AssumeZero => catalog
            .cluster_regions()
            .iter()
            .flat_map(|cr| {
                catalog.services().iter().map(move |svc| {
                    let version = current.version(&cr.id, &svc.id).unwrap_or(BASELINE_VERSION);
                    (cr.id.as_str(), svc.id.as_str(), version)
                })
            })
            .collect(),
    }
}

/// Top up every pair to `options.min_attempts` with older synthesized attempts.
///
/// Attempt `i` (0-based) of a pair that already has `existing` attempts gets
/// version `decrement(baseline, i + 1)`, sequence `9000 + i + existing` and
/// starts `i + 1` hours before the reference instant. Ids that already exist
/// are skipped. Returns the number of attempts added.
pub fn backfill_attempts(
    attempts: &mut Vec<DeploymentAttempt>,
    catalog: &Catalog,
    current: &CurrentRunning,
    options: &SynthesisOptions,
) -> usize {
    let mut counts: BTreeMap<(String, String), usize> = BTreeMap::new();
    for attempt in attempts.iter() {
        *counts
            .entry((attempt.cluster_region_id.clone(), attempt.service_id.clone()))
            .or_default() += 1;
    }
    let mut ids: HashSet<String> = attempts.iter().map(|a| a.id.clone()).collect();

    let mut added = 0;
    for (cluster_region_id, service_id, baseline) in
        backfill_targets(catalog, current, options.on_missing_current)
    {
        let Some(tier) = catalog.tier_of(cluster_region_id) else {
            warn!("Skipping backfill for unknown cluster-region {}", cluster_region_id);
            continue;
        };

        let existing = counts
            .get(&(cluster_region_id.to_string(), service_id.to_string()))
            .copied()
            .unwrap_or(0);
        if existing >= options.min_attempts {
            continue;
        }

        let needed = options.min_attempts - existing;
        debug!(
            "Backfilling {} attempts for {}/{} from {}",
            needed, cluster_region_id, service_id, baseline
        );

        for i in 0..needed {
            let steps = u32::try_from(i + 1).unwrap_or(u32::MAX);
            let version = semver::decrement(baseline, steps, options.rollover);
            let started_at = options.reference_time - Duration::hours(i as i64 + 1);
            let attempt = synthesize(
                cluster_region_id,
                service_id,
                &version,
                BACKFILL_SEQUENCE_BASE + i + existing,
                started_at,
                tier,
            );

            if ids.insert(attempt.id.clone()) {
                attempts.push(attempt);
                added += 1;
            }
        }
    }

    added
}

/// Ensure every current version appears as an actual attempt.
///
/// For each CurrentRunning entry with no attempt at that version, adds one
/// healthy attempt started at the reference instant. Returns the number added.
pub fn anchor_current_versions(
    attempts: &mut Vec<DeploymentAttempt>,
    catalog: &Catalog,
    current: &CurrentRunning,
    options: &SynthesisOptions,
) -> usize {
    let present: HashSet<(&str, &str, &str)> = attempts
        .iter()
        .map(|a| (a.cluster_region_id.as_str(), a.service_id.as_str(), a.build_version.as_str()))
        .collect();

    let mut anchors = Vec::new();
    for (cluster_region_id, service_id, version) in current.entries() {
        if present.contains(&(cluster_region_id, service_id, version)) {
            continue;
        }
        let Some(tier) = catalog.tier_of(cluster_region_id) else {
            continue;
        };

        debug!("Anchoring {}/{} at {}", cluster_region_id, service_id, version);
        anchors.push(synthesize(
            cluster_region_id,
            service_id,
            version,
            ANCHOR_SEQUENCE,
            options.reference_time,
            tier,
        ));
    }

    let ids: HashSet<&str> = attempts.iter().map(|a| a.id.as_str()).collect();
    let anchors: Vec<_> = anchors
        .into_iter()
        .filter(|a| !ids.contains(a.id.as_str()))
        .collect();

    let added = anchors.len();
    attempts.extend(anchors);
    added
}

/// Whether `candidate` replaces `tracked` as the latest attempt of its pair.
///
/// Higher version wins; equal versions fall back to the later start.
pub fn supersedes(candidate: &DeploymentAttempt, tracked: &DeploymentAttempt) -> bool {
    match semver::compare(&candidate.build_version, &tracked.build_version) {
        Ordering::Greater => true,
        Ordering::Equal => candidate.started_at > tracked.started_at,
        Ordering::Less => false,
    }
}

/// Index of the latest attempt per `(cluster_region_id, service_id)` pair.
pub fn latest_by_pair(attempts: &[DeploymentAttempt]) -> BTreeMap<(String, String), usize> {
    let mut latest: BTreeMap<(String, String), usize> = BTreeMap::new();
    for (idx, attempt) in attempts.iter().enumerate() {
        let key = (attempt.cluster_region_id.clone(), attempt.service_id.clone());
        let replace = latest
            .get(&key)
            .is_none_or(|&tracked| supersedes(attempt, &attempts[tracked]));
        if replace {
            latest.insert(key, idx);
        }
    }
    latest
}

/// Rewrite the latest attempt of every pair to its tier's healthy status.
///
/// Attempts in the exception ledger are left untouched. Returns the number
/// of attempts rewritten.
pub fn enforce_latest_healthy(
    attempts: &mut [DeploymentAttempt],
    catalog: &Catalog,
    current: &CurrentRunning,
    exceptions: &ExceptionLedger,
) -> usize {
    let mut rewritten = 0;
    for ((cluster_region_id, service_id), idx) in latest_by_pair(attempts) {
        let latest = &attempts[idx];
        if exceptions.contains(&latest.id) {
            continue;
        }

        if let Some(expected) = current.version(&cluster_region_id, &service_id)
            && semver::compare(&latest.build_version, expected) == Ordering::Greater
        {
            warn!(
                "Attempt {} is ahead of the current version {} and is not pinned",
                latest.id, expected
            );
        }

        let Some(tier) = catalog.tier_of(&cluster_region_id) else {
            continue;
        };
        let desired = AttemptStatus::healthy_for(tier);
        if latest.status != desired {
            debug!("Settling {} from {} to {}", latest.id, latest.status, desired);
            let settled = latest.settled(desired);
            attempts[idx] = settled;
            rewritten += 1;
        }
    }
    rewritten
}

/// Newest start first; equal starts ordered by id.
pub fn sort_newest_first(attempts: &mut [DeploymentAttempt]) {
    attempts.sort_by(|a, b| {
        b.started_at
            .cmp(&a.started_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}
