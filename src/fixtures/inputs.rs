//! Input tables the synthesizer consumes.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cluster_runs::ClusterSuiteProfile;
use super::test_runs::SuiteBaselines;
use crate::error::{AppError, AppResult};
use crate::models::{
    Cluster, ClusterRegion, ClusterTier, DeploymentAttempt, Promotion, RegionRole, RegionRoles,
    ReleaseTicket, Scorecard, ScorecardWeights, Service, TestRun,
};

/// Static catalog of clusters, their regions, and services.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    clusters: Vec<Cluster>,
    cluster_regions: Vec<ClusterRegion>,
    services: Vec<Service>,
}

impl Catalog {
    /// Resolve cluster-regions from `(cluster id, region code)` pairs.
    ///
    /// Roles come from `roles`; a cluster without a role entry yields
    /// `RegionRole::Unknown` for each of its regions.
    pub fn new(
        clusters: Vec<Cluster>,
        regions: &[(&str, &str)],
        roles: &BTreeMap<String, RegionRoles>,
        services: Vec<Service>,
    ) -> AppResult<Self> {
        let mut cluster_regions = Vec::with_capacity(regions.len());
        for (base_id, region) in regions {
            let cluster = clusters
                .iter()
                .find(|c| c.id == *base_id)
                .ok_or_else(|| AppError::InvalidSeed(format!("region {} names unknown cluster {}", region, base_id)))?;
            let role = roles
                .get(*base_id)
                .map(|r| r.role_of(region))
                .unwrap_or(RegionRole::Unknown);

            cluster_regions.push(ClusterRegion {
                id: ClusterRegion::region_id(base_id, region),
                base_id: base_id.to_string(),
                region: region.to_string(),
                role,
                tier: cluster.tier,
                name: format!("{}-{}", cluster.name, region),
            });
        }

        Ok(Catalog {
            clusters,
            cluster_regions,
            services,
        })
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn cluster_regions(&self) -> &[ClusterRegion] {
        &self.cluster_regions
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn cluster(&self, id: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.id == id)
    }

    pub fn cluster_region(&self, id: &str) -> Option<&ClusterRegion> {
        self.cluster_regions.iter().find(|cr| cr.id == id)
    }

    pub fn service(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    /// Tier of a cluster-region, `None` when the region is not in the catalog.
    pub fn tier_of(&self, cluster_region_id: &str) -> Option<ClusterTier> {
        self.cluster_region(cluster_region_id).map(|cr| cr.tier)
    }

    /// Reverse lookup from external application id to service.
    pub fn service_for_app_id(&self, app_id: &Uuid) -> Option<&Service> {
        self.services.iter().find(|s| s.app_id == *app_id)
    }
}

/// Version currently live per cluster-region per service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrentRunning(BTreeMap<String, BTreeMap<String, String>>);

impl CurrentRunning {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, cluster_region_id: &str, service_id: &str, version: &str) {
        self.0
            .entry(cluster_region_id.to_string())
            .or_default()
            .insert(service_id.to_string(), version.to_string());
    }

    pub fn version(&self, cluster_region_id: &str, service_id: &str) -> Option<&str> {
        self.0
            .get(cluster_region_id)
            .and_then(|services| services.get(service_id))
            .map(String::as_str)
    }

    /// Every `(cluster_region_id, service_id, version)` entry, ordered by key.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.0.iter().flat_map(|(cr, services)| {
            services
                .iter()
                .map(move |(svc, ver)| (cr.as_str(), svc.as_str(), ver.as_str()))
        })
    }

    pub fn cluster_region_ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of (cluster-region, service) pairs.
    pub fn len(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Attempt ids exempt from latest-healthy normalization.
///
/// These are intentionally seeded, still unresolved incidents; they keep
/// their failed or rolled-back status even when they are the newest release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExceptionLedger(BTreeSet<String>);

impl ExceptionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, attempt_id: &str) -> bool {
        self.0.insert(attempt_id.to_string())
    }

    pub fn contains(&self, attempt_id: &str) -> bool {
        self.0.contains(attempt_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ExceptionLedger {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ExceptionLedger(iter.into_iter().map(Into::into).collect())
    }
}

/// Hand-maintained tables displayed next to the synthesized history.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceData {
    pub promotions: Vec<Promotion>,
    /// Release tickets per service id
    pub tickets: BTreeMap<String, Vec<ReleaseTicket>>,
    /// Readiness scorecards per service id
    pub scorecards: BTreeMap<String, Scorecard>,
    pub weights: ScorecardWeights,
}

/// Everything `build_fixtures` needs.
#[derive(Debug, Clone)]
pub struct FixtureInputs {
    pub catalog: Catalog,
    pub current_running: CurrentRunning,
    pub seed_attempts: Vec<DeploymentAttempt>,
    pub seed_test_runs: Vec<TestRun>,
    pub exceptions: ExceptionLedger,
    pub suite_baselines: SuiteBaselines,
    pub cluster_suites: Vec<ClusterSuiteProfile>,
    pub reference: ReferenceData,
}
