//! Density-based spatial clustering over geolocated reports.
//!
//! Straight DBSCAN: a report with at least `min_points` neighbors within
//! `epsilon_km` (self inclusive) is a core point; clusters are the
//! transitive closure of core-point neighborhoods; everything else is
//! noise. Iteration follows the filtered input order, so identical input
//! always produces identical cluster assignments.

use std::collections::VecDeque;

use fieldscan_report_models::ComplianceReport;

use crate::distance::haversine_km;

/// A geolocated report prepared for clustering. Ephemeral: lives only for
/// the duration of one analysis call.
#[derive(Debug, Clone)]
pub(crate) struct ClusterPoint {
    /// The underlying report.
    pub report: ComplianceReport,
    /// Resolved latitude in degrees.
    pub latitude: f64,
    /// Resolved longitude in degrees.
    pub longitude: f64,
}

impl ClusterPoint {
    pub(crate) const fn coordinates(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// Cluster assignment for one point: `Some(id)` or noise.
pub(crate) type Assignment = Option<usize>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Unvisited,
    Noise,
    Cluster(usize),
}

/// Assigns each point to a cluster or to noise.
///
/// Returns the per-point assignments (indexed like `points`) and the
/// number of clusters discovered. Cluster IDs are sequential from 0 in
/// discovery order.
pub(crate) fn assign_clusters(
    points: &[ClusterPoint],
    epsilon_km: f64,
    min_points: usize,
) -> (Vec<Assignment>, usize) {
    let neighborhoods = build_neighborhoods(points, epsilon_km);

    let mut labels = vec![Label::Unvisited; points.len()];
    let mut cluster_count = 0;

    for seed in 0..points.len() {
        if labels[seed] != Label::Unvisited {
            continue;
        }
        if neighborhoods[seed].len() < min_points {
            labels[seed] = Label::Noise;
            continue;
        }

        let cluster_id = cluster_count;
        cluster_count += 1;
        labels[seed] = Label::Cluster(cluster_id);

        // Region growing over density-reachable points. An explicit
        // worklist instead of recursion: a dense connected cluster can
        // chain through thousands of core points.
        let mut worklist: VecDeque<usize> = neighborhoods[seed].iter().copied().collect();
        while let Some(candidate) = worklist.pop_front() {
            match labels[candidate] {
                Label::Cluster(_) => {}
                Label::Noise => {
                    // Border point: reachable from a core point but not
                    // core itself. Its neighborhood was already below the
                    // density threshold, so it doesn't expand further.
                    labels[candidate] = Label::Cluster(cluster_id);
                }
                Label::Unvisited => {
                    labels[candidate] = Label::Cluster(cluster_id);
                    if neighborhoods[candidate].len() >= min_points {
                        worklist.extend(neighborhoods[candidate].iter().copied());
                    }
                }
            }
        }
    }

    let assignments = labels
        .into_iter()
        .map(|label| match label {
            Label::Cluster(id) => Some(id),
            Label::Noise => None,
            Label::Unvisited => unreachable!("every point is labeled after the seed loop"),
        })
        .collect();

    (assignments, cluster_count)
}

/// Computes the epsilon-neighborhood of every point, self inclusive.
///
/// Quadratic pairwise scan. Fine for the hundreds-to-low-thousands of
/// reports a compliance workload produces; a spatial index would only
/// change the constant factor, not the assignments.
fn build_neighborhoods(points: &[ClusterPoint], epsilon_km: f64) -> Vec<Vec<usize>> {
    (0..points.len())
        .map(|i| {
            (0..points.len())
                .filter(|&j| {
                    i == j
                        || haversine_km(points[i].coordinates(), points[j].coordinates())
                            <= epsilon_km
                })
                .collect()
        })
        .collect()
}
