#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result types for the geospatial compliance clustering engine.
//!
//! These types are serialized to JSON for the analytics API. They are
//! separate from the engine itself so the server models can reference
//! them without pulling in the clustering code.

use chrono::{DateTime, Utc};
use fieldscan_report_models::{ComplianceReport, ComplianceStatus};
use serde::{Deserialize, Serialize};

/// Tuning parameters for one clustering run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusteringParams {
    /// Maximum neighborhood radius in kilometers for two reports to be
    /// considered spatially adjacent.
    pub epsilon_km: f64,
    /// Minimum neighborhood size (self inclusive) for a report to seed a
    /// cluster.
    pub min_points: usize,
}

/// Per-status report counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceBreakdown {
    /// Reports with a compliant finding.
    pub compliant: u64,
    /// Reports with a non-compliant finding.
    pub non_compliant: u64,
    /// Reports with a fraudulent finding.
    pub fraudulent: u64,
}

impl ComplianceBreakdown {
    /// Adds one report with the given status to the tally.
    pub const fn record(&mut self, status: ComplianceStatus) {
        match status {
            ComplianceStatus::Compliant => self.compliant += 1,
            ComplianceStatus::NonCompliant => self.non_compliant += 1,
            ComplianceStatus::Fraudulent => self.fraudulent += 1,
        }
    }

    /// Total reports counted across all statuses.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.compliant + self.non_compliant + self.fraudulent
    }
}

/// Arithmetic-mean coordinate of a cluster's members.
///
/// A plain coordinate mean, not a geodesic centroid. The approximation
/// holds for geographically compact clusters, which is what a sensible
/// epsilon produces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Centroid {
    /// Mean latitude of the member reports.
    pub latitude: f64,
    /// Mean longitude of the member reports.
    pub longitude: f64,
}

/// One discovered compliance hotspot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterInfo {
    /// Cluster ID, sequential from 0 in discovery order.
    pub id: usize,
    /// Number of member reports. Always equals `points.len()`.
    pub size: usize,
    /// Arithmetic-mean coordinate of the members.
    pub centroid: Centroid,
    /// Maximum great-circle distance from the centroid to any member, in
    /// kilometers. Zero for singleton clusters.
    pub radius_km: f64,
    /// The member reports.
    pub points: Vec<ComplianceReport>,
    /// Per-status counts over the members.
    pub compliance: ComplianceBreakdown,
}

/// Global statistics over one clustering run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    /// Number of geolocated reports considered.
    pub total_points: usize,
    /// Number of clusters discovered.
    pub cluster_count: usize,
    /// Number of reports classified as noise.
    pub noise_count: usize,
    /// Noise points as a percentage of `total_points`.
    pub noise_percentage: f64,
    /// Per-status counts over all considered reports, clustered or not.
    pub compliance: ComplianceBreakdown,
}

/// Top-level clustering analysis response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Parameters the run was performed with.
    pub parameters: ClusteringParams,
    /// Global statistics.
    pub summary: AnalysisSummary,
    /// Discovered clusters, largest first. Ties keep discovery order.
    pub clusters: Vec<ClusterInfo>,
    /// Reports not dense enough to belong to any cluster, in input order.
    pub noise_points: Vec<ComplianceReport>,
    /// When the analysis completed.
    pub completed_at: DateTime<Utc>,
}
