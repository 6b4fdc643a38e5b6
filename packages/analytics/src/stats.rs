//! Cluster statistics derivation.
//!
//! Turns raw cluster assignments into the API-facing result types:
//! centroid, radius, per-cluster and global compliance tallies, and the
//! largest-first cluster ordering.

use fieldscan_analytics_models::{
    AnalysisSummary, Centroid, ClusterInfo, ComplianceBreakdown,
};
use fieldscan_report_models::ComplianceReport;

use crate::cluster::{Assignment, ClusterPoint};
use crate::distance::haversine_km;

/// Builds the per-cluster info list, sorted largest first.
///
/// Ties in size keep discovery order (stable sort), so repeated runs over
/// the same input produce identically-ordered output.
pub(crate) fn build_clusters(
    points: &[ClusterPoint],
    assignments: &[Assignment],
    cluster_count: usize,
) -> Vec<ClusterInfo> {
    let mut members: Vec<Vec<usize>> = vec![Vec::new(); cluster_count];
    for (index, assignment) in assignments.iter().enumerate() {
        if let Some(id) = assignment {
            members[*id].push(index);
        }
    }

    let mut clusters: Vec<ClusterInfo> = members
        .into_iter()
        .enumerate()
        .map(|(id, indices)| summarize_cluster(id, &indices, points))
        .collect();

    clusters.sort_by(|a, b| b.size.cmp(&a.size));
    clusters
}

/// Collects the noise points in filtered-input order.
pub(crate) fn collect_noise(
    points: &[ClusterPoint],
    assignments: &[Assignment],
) -> Vec<ComplianceReport> {
    points
        .iter()
        .zip(assignments)
        .filter(|(_, assignment)| assignment.is_none())
        .map(|(point, _)| point.report.clone())
        .collect()
}

/// Builds the global summary over all considered points.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn build_summary(
    points: &[ClusterPoint],
    cluster_count: usize,
    noise_count: usize,
) -> AnalysisSummary {
    let mut compliance = ComplianceBreakdown::default();
    for point in points {
        compliance.record(point.report.status);
    }

    let total_points = points.len();
    let noise_percentage = if total_points == 0 {
        0.0
    } else {
        100.0 * noise_count as f64 / total_points as f64
    };

    AnalysisSummary {
        total_points,
        cluster_count,
        noise_count,
        noise_percentage,
        compliance,
    }
}

#[allow(clippy::cast_precision_loss)]
fn summarize_cluster(id: usize, indices: &[usize], points: &[ClusterPoint]) -> ClusterInfo {
    let size = indices.len();

    let (lat_sum, lng_sum) = indices.iter().fold((0.0, 0.0), |(lat, lng), &index| {
        (lat + points[index].latitude, lng + points[index].longitude)
    });
    let centroid = Centroid {
        latitude: lat_sum / size as f64,
        longitude: lng_sum / size as f64,
    };

    let radius_km = indices
        .iter()
        .map(|&index| {
            haversine_km(
                (centroid.latitude, centroid.longitude),
                points[index].coordinates(),
            )
        })
        .fold(0.0, f64::max);

    let members: Vec<ComplianceReport> = indices
        .iter()
        .map(|&index| points[index].report.clone())
        .collect();
    let mut compliance = ComplianceBreakdown::default();
    for member in &members {
        compliance.record(member.status);
    }

    ClusterInfo {
        id,
        size,
        centroid,
        radius_km,
        points: members,
        compliance,
    }
}
