#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geospatial compliance clustering engine.
//!
//! Partitions geotagged compliance reports into spatial hotspots with
//! density-based clustering (DBSCAN over haversine distance), then
//! derives per-cluster and global compliance statistics. Pure and
//! stateless: one call, one result, no I/O and no shared state, so
//! concurrent invocations need no coordination.

mod cluster;
mod distance;
mod stats;

use chrono::Utc;
use fieldscan_analytics_models::{AnalysisResult, ClusteringParams};
use fieldscan_report_models::ComplianceReport;
use thiserror::Error;

use crate::cluster::ClusterPoint;

/// Errors that can occur during a clustering run.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// No report in the batch carried a usable coordinate pair. Surfaced
    /// loudly instead of returning an empty result so upstream
    /// data-quality problems are visible.
    #[error("No geolocated reports available for analysis")]
    EmptyInput,

    /// A tuning parameter was out of range.
    #[error("Invalid clustering parameter: {message}")]
    InvalidParameter {
        /// Description of the violated constraint.
        message: String,
    },
}

/// Runs one clustering analysis over a batch of compliance reports.
///
/// Reports without a full, finite coordinate pair are filtered out before
/// clustering. The remaining points are grouped with DBSCAN: `epsilon_km`
/// is the neighborhood radius in kilometers, `min_points` the minimum
/// neighborhood size (self inclusive) for a point to seed a cluster.
///
/// The run is deterministic: iteration follows the filtered input order,
/// so identical input always yields identical cluster IDs and ordering.
///
/// # Errors
///
/// * [`AnalyticsError::InvalidParameter`] if `min_points` is zero or
///   `epsilon_km` is not a positive finite number. Validation is eager;
///   the engine never degrades silently on bad parameters.
/// * [`AnalyticsError::EmptyInput`] if no report has usable coordinates.
pub fn analyze(
    reports: Vec<ComplianceReport>,
    epsilon_km: f64,
    min_points: usize,
) -> Result<AnalysisResult, AnalyticsError> {
    if min_points < 1 {
        return Err(AnalyticsError::InvalidParameter {
            message: format!("minPoints must be at least 1, got {min_points}"),
        });
    }
    if !epsilon_km.is_finite() || epsilon_km <= 0.0 {
        return Err(AnalyticsError::InvalidParameter {
            message: format!("epsilon must be a positive number of kilometers, got {epsilon_km}"),
        });
    }

    let points: Vec<ClusterPoint> = reports
        .into_iter()
        .filter_map(|report| {
            report.coordinates().map(|(latitude, longitude)| ClusterPoint {
                report,
                latitude,
                longitude,
            })
        })
        .collect();

    if points.is_empty() {
        return Err(AnalyticsError::EmptyInput);
    }

    let (assignments, cluster_count) = cluster::assign_clusters(&points, epsilon_km, min_points);

    let clusters = stats::build_clusters(&points, &assignments, cluster_count);
    let noise_points = stats::collect_noise(&points, &assignments);
    let summary = stats::build_summary(&points, cluster_count, noise_points.len());

    log::debug!(
        "Clustered {} reports into {} clusters ({} noise) with epsilon {epsilon_km} km, min points {min_points}",
        summary.total_points,
        summary.cluster_count,
        summary.noise_count,
    );

    Ok(AnalysisResult {
        parameters: ClusteringParams {
            epsilon_km,
            min_points,
        },
        summary,
        clusters,
        noise_points,
        completed_at: Utc::now(),
    })
}
