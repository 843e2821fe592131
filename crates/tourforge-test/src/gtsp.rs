//! Six-cluster GTSP instance.
//!
//! Clusters 0, 1 and 2 are 3×3 grids centred at (0,0), (5,5) and (0,5).
//! Cluster 3 has five points near (3,4), cluster 4 three points below the
//! first grid, and cluster 5 the single point (4,1). With the cluster order
//! [`GTSP_ORDER`] the optimal representatives are [`GTSP_OPTIMAL`], at cost
//! 5 + 4 + 3 + 1 + 2 + 3 = 18.

use std::sync::Arc;

use tourforge_core::{Clustering, Norm, PointGraph};

pub const GTSP_SIZES: [usize; 6] = [9, 9, 9, 5, 3, 1];

/// Fixed cluster visiting order.
pub const GTSP_ORDER: [usize; 6] = [0, 4, 5, 1, 3, 2];

/// Optimal representative per rank of [`GTSP_ORDER`].
pub const GTSP_OPTIMAL: [usize; 6] = [8, 34, 35, 9, 29, 24];

pub const GTSP_OPTIMAL_COST: f64 = 18.0;

/// Clustering of the 36 vertices by [`GTSP_SIZES`].
pub fn gtsp_clustering() -> Arc<Clustering> {
    Arc::new(Clustering::from_sizes(&GTSP_SIZES).expect("fixture sizes are valid"))
}

/// Euclidean graph of the instance, clustered.
pub fn gtsp_graph() -> PointGraph<f64> {
    let mut points: Vec<[f64; 2]> = Vec::with_capacity(36);
    for (cx, cy) in [(0.0, 0.0), (5.0, 5.0), (0.0, 5.0)] {
        for dx in [-1.0, 0.0, 1.0] {
            for dy in [-1.0, 0.0, 1.0] {
                points.push([cx + dx, cy + dy]);
            }
        }
    }
    points.extend([[3.0, 6.0], [4.0, 5.0], [3.0, 4.0], [3.0, 3.0], [4.0, 3.0]]);
    points.extend([[4.0, -4.0], [6.0, -3.0], [4.0, -3.0]]);
    points.push([4.0, 1.0]);

    PointGraph::from_points(&points, Norm::Euclidean)
        .and_then(|g| g.with_clustering(gtsp_clustering()))
        .expect("fixture graph is valid")
}

/// Initial tour along [`GTSP_ORDER`] taking each cluster's first member.
pub fn gtsp_initial_tour() -> Vec<usize> {
    let clustering = gtsp_clustering();
    GTSP_ORDER
        .iter()
        .map(|&c| clustering.members(c)[0])
        .collect()
}
