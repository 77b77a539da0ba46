//! 2D k-d tree for neighborhood queries
//!
//! Answers "which points lie within radius r of q" in O(log n + k) on
//! average, replacing the O(n) scan per query that makes naive DBSCAN
//! quadratic everywhere instead of only in dense neighborhoods.
//!
//! Reference:
//! Bentley, J.L. (1975). Multidimensional binary search trees used
//! for associative searching. CACM, 18(9).

/// A 2-D k-d tree over (x, y) coordinates.
///
/// Queries return indices into the point slice the tree was built from, so
/// callers can carry labels or records alongside the coordinates.
#[derive(Debug)]
pub struct KdTree {
    nodes: Vec<KdNode>,
    coords: Vec<(f64, f64)>,
}

#[derive(Debug)]
struct KdNode {
    /// Index into the original point slice
    point_idx: usize,
    /// Split dimension: 0 = x, 1 = y
    split_dim: u8,
    left: Option<usize>,
    right: Option<usize>,
}

impl KdTree {
    /// Build a tree from a coordinate slice.
    ///
    /// O(n log n) via median-of-coordinate splitting; the input slice is
    /// not reordered.
    pub fn build(coords: &[(f64, f64)]) -> Self {
        if coords.is_empty() {
            return Self {
                nodes: Vec::new(),
                coords: Vec::new(),
            };
        }

        let stored: Vec<(f64, f64)> = coords.to_vec();
        let mut indices: Vec<usize> = (0..stored.len()).collect();
        let mut nodes = Vec::with_capacity(stored.len());

        build_recursive(&stored, &mut indices, 0, &mut nodes);

        Self {
            nodes,
            coords: stored,
        }
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Indices of all points within `radius` of (qx, qy), inclusive of the
    /// boundary and of any point at the query location itself.
    ///
    /// Results are in no particular order.
    pub fn within_radius(&self, qx: f64, qy: f64, radius: f64) -> Vec<usize> {
        if self.nodes.is_empty() || radius <= 0.0 {
            return Vec::new();
        }

        let radius_sq = radius * radius;
        let mut hits = Vec::new();
        self.radius_recursive(0, qx, qy, radius_sq, &mut hits);
        hits
    }

    fn radius_recursive(
        &self,
        node_idx: usize,
        qx: f64,
        qy: f64,
        radius_sq: f64,
        hits: &mut Vec<usize>,
    ) {
        let node = &self.nodes[node_idx];
        let (px, py) = self.coords[node.point_idx];

        let dx = qx - px;
        let dy = qy - py;
        if dx * dx + dy * dy <= radius_sq {
            hits.push(node.point_idx);
        }

        let diff = if node.split_dim == 0 { dx } else { dy };

        // Descend into a side only if it holds the query or the splitting
        // plane is within reach. The left subtree holds the smaller
        // coordinates, so it matters when diff < 0.
        if let Some(left) = node.left {
            if diff < 0.0 || diff * diff <= radius_sq {
                self.radius_recursive(left, qx, qy, radius_sq, hits);
            }
        }
        if let Some(right) = node.right {
            if diff > 0.0 || diff * diff <= radius_sq {
                self.radius_recursive(right, qx, qy, radius_sq, hits);
            }
        }
    }
}

fn build_recursive(
    coords: &[(f64, f64)],
    indices: &mut [usize],
    depth: usize,
    nodes: &mut Vec<KdNode>,
) -> usize {
    let n = indices.len();
    let split_dim = (depth % 2) as u8;

    indices.sort_by(|&a, &b| {
        let va = if split_dim == 0 { coords[a].0 } else { coords[a].1 };
        let vb = if split_dim == 0 { coords[b].0 } else { coords[b].1 };
        va.partial_cmp(&vb).unwrap_or(std::cmp::Ordering::Equal)
    });

    let median = n / 2;
    let point_idx = indices[median];

    let node_idx = nodes.len();
    nodes.push(KdNode {
        point_idx,
        split_dim,
        left: None,
        right: None,
    });

    if median > 0 {
        let mut left_indices = indices[..median].to_vec();
        let left = build_recursive(coords, &mut left_indices, depth + 1, nodes);
        nodes[node_idx].left = Some(left);
    }
    if median + 1 < n {
        let mut right_indices = indices[median + 1..].to_vec();
        let right = build_recursive(coords, &mut right_indices, depth + 1, nodes);
        nodes[node_idx].right = Some(right);
    }

    node_idx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scatter() -> Vec<(f64, f64)> {
        vec![
            (2.0, 3.0),
            (5.0, 4.0),
            (9.0, 6.0),
            (4.0, 7.0),
            (8.0, 1.0),
            (7.0, 2.0),
            (1.0, 8.0),
            (6.0, 5.0),
        ]
    }

    fn brute_force(coords: &[(f64, f64)], qx: f64, qy: f64, radius: f64) -> Vec<usize> {
        let r2 = radius * radius;
        coords
            .iter()
            .enumerate()
            .filter(|(_, &(x, y))| {
                let dx = qx - x;
                let dy = qy - y;
                dx * dx + dy * dy <= r2
            })
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_build_and_size() {
        let tree = KdTree::build(&scatter());
        assert_eq!(tree.len(), 8);
        assert!(!tree.is_empty());
    }

    #[test]
    fn test_empty_tree() {
        let tree = KdTree::build(&[]);
        assert!(tree.is_empty());
        assert!(tree.within_radius(0.0, 0.0, 10.0).is_empty());
    }

    #[test]
    fn test_query_point_included_at_zero_distance() {
        let pts = scatter();
        let tree = KdTree::build(&pts);
        let hits = tree.within_radius(5.0, 4.0, 0.5);
        assert!(hits.contains(&1), "point at the query location must be a hit");
    }

    #[test]
    fn test_within_radius_matches_brute_force() {
        let pts = scatter();
        let tree = KdTree::build(&pts);

        for qx in 0..10 {
            for qy in 0..10 {
                let qx = qx as f64 + 0.5;
                let qy = qy as f64 + 0.5;
                for radius in [0.5, 1.5, 3.0, 8.0] {
                    let mut hits = tree.within_radius(qx, qy, radius);
                    let mut expected = brute_force(&pts, qx, qy, radius);
                    hits.sort_unstable();
                    expected.sort_unstable();
                    assert_eq!(
                        hits, expected,
                        "mismatch at ({qx}, {qy}) r = {radius}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_query_side_is_never_pruned() {
        // Two points far apart: the root splits on the far point, and the
        // subtree holding the query location itself must still be visited.
        let pts = vec![(0.0, 0.0), (10.0, 0.0)];
        let tree = KdTree::build(&pts);
        let hits = tree.within_radius(0.0, 0.0, 1.0);
        assert_eq!(hits, vec![0], "point at the query location was pruned");
    }

    #[test]
    fn test_within_radius_zero_or_negative() {
        let tree = KdTree::build(&scatter());
        assert!(tree.within_radius(5.0, 4.0, 0.0).is_empty());
        assert!(tree.within_radius(5.0, 4.0, -1.0).is_empty());
    }

    #[test]
    fn test_duplicate_coordinates() {
        let pts = vec![(1.0, 1.0), (1.0, 1.0), (1.0, 1.0), (9.0, 9.0)];
        let tree = KdTree::build(&pts);
        let mut hits = tree.within_radius(1.0, 1.0, 0.1);
        hits.sort_unstable();
        assert_eq!(hits, vec![0, 1, 2]);
    }

    #[test]
    fn test_large_scatter_matches_brute_force() {
        let pts: Vec<(f64, f64)> = (0..500)
            .map(|i| {
                let x = ((i * 7 + 13) % 100) as f64 / 10.0;
                let y = ((i * 11 + 37) % 100) as f64 / 10.0;
                (x, y)
            })
            .collect();
        let tree = KdTree::build(&pts);

        let mut hits = tree.within_radius(5.0, 5.0, 1.25);
        let mut expected = brute_force(&pts, 5.0, 5.0, 1.25);
        hits.sort_unstable();
        expected.sort_unstable();
        assert_eq!(hits, expected);
    }
}
