//! GTSP cluster optimization.
//!
//! With the cluster visiting order fixed, choosing one representative per
//! cluster is a shortest-path problem through the layered cluster graph.
//! Cutting the cycle at one cluster turns it into a linear dynamic program
//! solved once per vertex of the cut cluster.

mod arena;

#[cfg(test)]
mod tests;

pub use arena::DynProgArena;

use std::sync::Arc;

use tracing::{debug, info};

use tourforge_core::{Clustering, Cost, CostOracle, GeneralizedTour, Result, TourForgeError};

use crate::stats::SolverStats;

/// Optimal representative selection for a fixed cluster order.
///
/// For a tour of M clusters and cut cluster K the work is
/// O(|K| · (M − 1) · s²) with s the largest cluster size. The arena is sized
/// by vertex count and reused across calls.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tourforge_core::{Clustering, GeneralizedTour, Norm, PointGraph};
/// use tourforge_solver::ClusterOptimizer;
///
/// // Clusters {0, 1} and {2, 3} on a line.
/// let clustering = Arc::new(Clustering::from_sizes(&[2, 2]).unwrap());
/// let g = PointGraph::from_points(
///     &[[0.0, 0.0], [10.0, 0.0], [3.0, 0.0], [20.0, 0.0]],
///     Norm::Euclidean,
/// )
/// .unwrap()
/// .with_clustering(Arc::clone(&clustering))
/// .unwrap();
///
/// let mut tour = GeneralizedTour::from_permutation(vec![1, 3], clustering).unwrap();
/// let cost = ClusterOptimizer::new().improve(&mut tour, &g, None).unwrap();
///
/// assert_eq!(tour.tour().as_slice(), &[0, 2]);
/// assert_eq!(cost, 6.0);
/// ```
#[derive(Debug, Clone)]
pub struct ClusterOptimizer<C> {
    arena: DynProgArena<C>,
    stats: SolverStats,
}

impl<C: Cost> ClusterOptimizer<C> {
    pub fn new() -> Self {
        Self {
            arena: DynProgArena::default(),
            stats: SolverStats::default(),
        }
    }

    /// Computes the optimal representatives for `tour`'s cluster order.
    ///
    /// On success `out[rank]` is the chosen vertex of the cluster visited at
    /// `rank`, and the optimal cycle cost is returned. `tour` is not modified.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `oracle` does not carry the tour's clustering or
    /// `cut_cluster` is not a cluster ID. `out` is untouched on error.
    pub fn solve<G>(
        &mut self,
        tour: &GeneralizedTour<C>,
        oracle: &G,
        cut_cluster: usize,
        out: &mut Vec<usize>,
    ) -> Result<C>
    where
        G: CostOracle<Cost = C> + ?Sized,
    {
        tour.check_oracle(oracle)?;
        let cut_rank = cut_rank(tour, cut_cluster)?;

        out.clear();
        out.resize(tour.len(), usize::MAX);
        self.solve_order(
            tour.cluster_sequence(),
            tour.clustering(),
            oracle,
            cut_rank,
            out,
        )
    }

    /// Replaces `tour`'s representatives with the optimal ones in place.
    ///
    /// The cut defaults to the smallest cluster. The new cost is cached on
    /// the tour and returned.
    pub fn improve<G>(
        &mut self,
        tour: &mut GeneralizedTour<C>,
        oracle: &G,
        cut_cluster: Option<usize>,
    ) -> Result<C>
    where
        G: CostOracle<Cost = C> + ?Sized,
    {
        tour.check_oracle(oracle)?;
        let clustering = Arc::clone(tour.clustering());
        let cut_cluster = cut_cluster.unwrap_or_else(|| clustering.smallest_cluster());
        let cut_rank = cut_rank(tour, cut_cluster)?;

        let (order, vertices) = tour.split_sequences_mut();
        let cost = self.solve_order(order, &clustering, oracle, cut_rank, vertices)?;
        tour.set_cost(cost);
        Ok(cost)
    }

    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    fn solve_order<G>(
        &mut self,
        order: &[usize],
        clustering: &Clustering,
        oracle: &G,
        cut_rank: usize,
        out: &mut [usize],
    ) -> Result<C>
    where
        G: CostOracle<Cost = C> + ?Sized,
    {
        let m = order.len();
        let cut_cluster = order[cut_rank];
        let layer = |step: usize| clustering.members(order[(cut_rank + step) % m]);
        self.stats.record_dp_solve();

        if m == 1 {
            let mut best: Option<(usize, C)> = None;
            for &x in layer(0) {
                let cost = oracle.edge_cost(x, x);
                if best.map_or(true, |(_, b)| cost < b) {
                    best = Some((x, cost));
                }
            }
            let (x, cost) = best.ok_or_else(|| empty_cut(cut_cluster))?;
            out[0] = x;
            return Ok(cost);
        }

        self.arena.reset(oracle.num_vertices());
        let mut best: Option<C> = None;

        for &x in layer(0) {
            // Last step before returning to the cut vertex.
            for &v in layer(m - 1) {
                self.arena.set(v, oracle.edge_cost(v, x), x);
            }

            for step in (1..m - 1).rev() {
                for &v in layer(step) {
                    let (w, cost) = self.cheapest_next(oracle, v, layer(step + 1));
                    self.arena.set(v, cost, w);
                }
            }

            let (first, total) = self.cheapest_next(oracle, x, layer(1));
            if best.map_or(false, |b| !(total < b)) {
                continue;
            }
            best = Some(total);
            debug!(cut_vertex = x, cost = %total, "new cluster optimization best");

            out[cut_rank] = x;
            let mut w = first;
            for step in 1..m {
                out[(cut_rank + step) % m] = w;
                w = self.arena.best_next(w);
            }
        }

        let cost = best.ok_or_else(|| empty_cut(cut_cluster))?;
        info!(
            event = "dp_solved",
            clusters = m as u64,
            cut_cluster = cut_cluster as u64,
            cost = %cost,
        );
        Ok(cost)
    }

    // Ties keep the first member.
    fn cheapest_next<G>(&self, oracle: &G, v: usize, next_layer: &[usize]) -> (usize, C)
    where
        G: CostOracle<Cost = C> + ?Sized,
    {
        let mut best = (usize::MAX, C::max_value());
        for &w in next_layer {
            let cost = oracle.edge_cost(v, w) + self.arena.cost_to_go(w);
            if best.0 == usize::MAX || cost < best.1 {
                best = (w, cost);
            }
        }
        best
    }
}

impl<C: Cost> Default for ClusterOptimizer<C> {
    fn default() -> Self {
        Self::new()
    }
}

fn cut_rank<C: Cost>(tour: &GeneralizedTour<C>, cut_cluster: usize) -> Result<usize> {
    let num_clusters = tour.clustering().num_clusters();
    if cut_cluster >= num_clusters {
        return Err(TourForgeError::invalid_argument(format!(
            "cut cluster {cut_cluster} is out of range: the clustering has {num_clusters} clusters"
        )));
    }
    tour.cluster_rank(cut_cluster)
        .ok_or_else(|| TourForgeError::internal(format!("cluster {cut_cluster} is not visited")))
}

fn empty_cut(cluster: usize) -> TourForgeError {
    TourForgeError::internal(format!("cut cluster {cluster} has no members"))
}
