//! Tours visiting one vertex per cluster.

use std::sync::Arc;

use super::{ArrayTour, CyclicTour};
use crate::clustering::{same_clustering, Clustering};
use crate::cost::Cost;
use crate::error::{Result, TourForgeError};
use crate::graph::CostOracle;

/// A GTSP tour: an [`ArrayTour`] holding one representative vertex per
/// cluster, plus the cached cluster visited at every rank.
///
/// The cluster sequence is not kept in sync automatically. After mutating
/// the vertex order through [`tour_mut`](Self::tour_mut), call
/// [`refresh_cluster_sequence`](Self::refresh_cluster_sequence).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tourforge_core::{Clustering, GeneralizedTour};
///
/// let clustering = Arc::new(Clustering::from_sizes(&[2, 2, 2]).unwrap());
/// let tour = GeneralizedTour::<f64>::from_permutation(vec![1, 5, 2], clustering).unwrap();
///
/// assert_eq!(tour.cluster_sequence(), &[0, 2, 1]);
/// assert_eq!(tour.vertex_of_cluster(2), Some(5));
/// assert_eq!(tour.cost(), None);
/// ```
#[derive(Debug, Clone)]
pub struct GeneralizedTour<C> {
    tour: ArrayTour,
    clustering: Arc<Clustering>,
    cluster_seq: Vec<usize>,
    cost: Option<C>,
}

impl<C: Cost> GeneralizedTour<C> {
    /// Wraps a tour over the clustering's vertices.
    ///
    /// # Errors
    ///
    /// Fails if the tour's vertex universe differs from the clustering's,
    /// or if the tour does not visit every cluster exactly once.
    pub fn new(tour: ArrayTour, clustering: Arc<Clustering>) -> Result<Self> {
        if tour.max_len() != clustering.num_vertices() {
            return Err(TourForgeError::LengthMismatch {
                what: "generalized tour vertex range",
                expected: clustering.num_vertices(),
                actual: tour.max_len(),
            });
        }
        let mut gtour = Self {
            tour,
            clustering,
            cluster_seq: Vec::new(),
            cost: None,
        };
        gtour.refresh_cluster_sequence()?;
        Ok(gtour)
    }

    /// Builds the tour from a sequence of representative vertices.
    pub fn from_permutation(seq: Vec<usize>, clustering: Arc<Clustering>) -> Result<Self> {
        let tour = ArrayTour::partial(seq, clustering.num_vertices())?;
        Self::new(tour, clustering)
    }

    /// Recomputes the cluster visited at every rank and drops the cached cost.
    pub fn refresh_cluster_sequence(&mut self) -> Result<()> {
        let num_clusters = self.clustering.num_clusters();
        if self.tour.len() != num_clusters {
            return Err(TourForgeError::LengthMismatch {
                what: "generalized tour",
                expected: num_clusters,
                actual: self.tour.len(),
            });
        }

        self.cluster_seq.clear();
        self.cluster_seq.extend(
            self.tour
                .as_slice()
                .iter()
                .map(|&v| self.clustering.cluster_id(v)),
        );

        let mut first_rank: Vec<Option<usize>> = vec![None; num_clusters];
        for (rank, &cluster) in self.cluster_seq.iter().enumerate() {
            if let Some(first) = first_rank[cluster] {
                return Err(TourForgeError::Duplicate {
                    what: "generalized tour",
                    entry: "cluster",
                    value: cluster,
                    first,
                    second: rank,
                });
            }
            first_rank[cluster] = Some(rank);
        }

        self.cost = None;
        Ok(())
    }

    pub fn tour(&self) -> &ArrayTour {
        &self.tour
    }

    /// Mutable access to the vertex tour; refresh the cluster sequence after.
    pub fn tour_mut(&mut self) -> &mut ArrayTour {
        &mut self.tour
    }

    pub fn clustering(&self) -> &Arc<Clustering> {
        &self.clustering
    }

    /// Number of clusters, which is also the tour length.
    pub fn len(&self) -> usize {
        self.cluster_seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cluster_seq.is_empty()
    }

    /// Cluster visited at every rank.
    pub fn cluster_sequence(&self) -> &[usize] {
        &self.cluster_seq
    }

    /// Cluster visited at `rank`, taken modulo the tour length.
    pub fn cluster_at(&self, rank: usize) -> usize {
        self.cluster_seq[rank % self.cluster_seq.len()]
    }

    /// Rank at which `cluster` is visited.
    pub fn cluster_rank(&self, cluster: usize) -> Option<usize> {
        self.cluster_seq.iter().position(|&c| c == cluster)
    }

    /// Representative vertex of `cluster`.
    pub fn vertex_of_cluster(&self, cluster: usize) -> Option<usize> {
        self.cluster_rank(cluster).map(|rank| self.tour.vertex_at(rank))
    }

    /// Cluster sequence together with the writable vertex sequence.
    ///
    /// Writers must keep `vertices[rank]` inside cluster `clusters[rank]`;
    /// the cluster sequence then stays valid without a refresh.
    pub fn split_sequences_mut(&mut self) -> (&[usize], &mut [usize]) {
        (&self.cluster_seq, self.tour.sequence_mut())
    }

    /// Cached cost, `None` after a refresh until set again.
    pub fn cost(&self) -> Option<C> {
        self.cost
    }

    pub fn set_cost(&mut self, cost: C) {
        self.cost = Some(cost);
    }

    /// Evaluates and caches the cost under `oracle`.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidArgument` unless `oracle` carries the same clustering.
    pub fn eval_cost<G>(&mut self, oracle: &G) -> Result<C>
    where
        G: CostOracle<Cost = C> + ?Sized,
    {
        self.check_oracle(oracle)?;
        let cost = self.tour.cost(oracle);
        self.cost = Some(cost);
        Ok(cost)
    }

    /// Checks that `oracle` is clustered with this tour's clustering.
    pub fn check_oracle<G>(&self, oracle: &G) -> Result<()>
    where
        G: CostOracle + ?Sized,
    {
        match oracle.clustering() {
            Some(other) if same_clustering(&self.clustering, other) => Ok(()),
            Some(_) => Err(TourForgeError::invalid_argument(
                "the tour and the graph use different clusterings",
            )),
            None => Err(TourForgeError::invalid_argument(
                "the graph has no clustering",
            )),
        }
    }
}
