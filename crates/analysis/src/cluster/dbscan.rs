//! DBSCAN density-based clustering
//!
//! Reference:
//! Ester, M., Kriegel, H.-P., Sander, J., Xu, X. (1996). A density-based
//! algorithm for discovering clusters in large spatial databases with
//! noise. KDD-96.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::kdtree::KdTree;

/// Label for points density-reachable from no core point.
pub const NOISE: i32 = -1;

const UNVISITED: i32 = -2;

/// Parameters for DBSCAN clustering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbscanParams {
    /// Neighborhood radius, in the units of the input coordinates.
    ///
    /// For sighting scatters that is raw degrees: the neighborhood is
    /// Euclidean in (longitude, latitude) space, which overstates
    /// east-west reach toward the poles. Kept deliberately for
    /// compatibility with the upstream pipeline.
    pub eps: f64,
    /// Minimum neighborhood size (the point itself included) for a point
    /// to seed or extend a cluster.
    pub min_samples: usize,
}

impl Default for DbscanParams {
    fn default() -> Self {
        Self {
            eps: 1.0,
            min_samples: 5,
        }
    }
}

/// Cluster a point set by density connectivity.
///
/// A point with at least `min_samples` neighbors within `eps` (itself
/// included) is a core point. Clusters grow outward from core points;
/// non-core neighbors become border points of the cluster that reaches them
/// first; everything else is noise.
///
/// # Returns
/// One label per input point: a small non-negative cluster id, or [`NOISE`].
/// An all-noise result is valid, not an error. Cluster membership does not
/// depend on input order; cluster id numbering may.
pub fn dbscan(points: &[(f64, f64)], params: &DbscanParams) -> Vec<i32> {
    let n = points.len();
    if n == 0 {
        return Vec::new();
    }

    let tree = KdTree::build(points);
    let mut labels = vec![UNVISITED; n];
    let mut next_cluster = 0;

    for i in 0..n {
        if labels[i] != UNVISITED {
            continue;
        }

        let neighbors = tree.within_radius(points[i].0, points[i].1, params.eps);
        if neighbors.len() < params.min_samples {
            labels[i] = NOISE;
            continue;
        }

        // i is a core point: start a cluster and expand it breadth-first
        labels[i] = next_cluster;
        let mut queue: VecDeque<usize> = neighbors.into_iter().filter(|&j| j != i).collect();

        while let Some(j) = queue.pop_front() {
            if labels[j] == NOISE {
                // Border point claimed by this cluster; not expanded further
                labels[j] = next_cluster;
            }
            if labels[j] != UNVISITED {
                continue;
            }
            labels[j] = next_cluster;

            let reachable = tree.within_radius(points[j].0, points[j].1, params.eps);
            if reachable.len() >= params.min_samples {
                queue.extend(reachable);
            }
        }

        next_cluster += 1;
    }

    labels
}
