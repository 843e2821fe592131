//! Partition of vertex IDs into clusters.

use std::sync::Arc;

use crate::error::{Result, TourForgeError};

const UNASSIGNED: usize = usize::MAX;

/// A partition of `[0, N)` into non-empty, disjoint, covering clusters.
///
/// Immutable once built. Graphs and generalized tours share one instance
/// through an `Arc`.
///
/// # Example
///
/// ```
/// use tourforge_core::Clustering;
///
/// let clustering = Clustering::from_sizes(&[3, 1, 2]).unwrap();
/// assert_eq!(clustering.num_clusters(), 3);
/// assert_eq!(clustering.members(2), &[4, 5]);
/// assert_eq!(clustering.cluster_id(3), 1);
/// assert_eq!(clustering.smallest_cluster(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clustering {
    clusters: Vec<Vec<usize>>,
    cluster_of: Vec<usize>,
}

impl Clustering {
    /// Builds a clustering of `num_vertices` vertices from explicit member lists.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an empty graph, an empty cluster, a vertex
    /// outside `[0, num_vertices)`, a vertex assigned twice or a vertex left out.
    pub fn new(num_vertices: usize, clusters: Vec<Vec<usize>>) -> Result<Self> {
        if num_vertices == 0 {
            return Err(TourForgeError::invalid_argument(
                "It makes no sense to partition an empty graph",
            ));
        }

        let mut cluster_of = vec![UNASSIGNED; num_vertices];
        for (id, members) in clusters.iter().enumerate() {
            if members.is_empty() {
                return Err(TourForgeError::invalid_argument(format!(
                    "Invalid clustering because cluster {id} is empty."
                )));
            }
            for &v in members {
                if v >= num_vertices {
                    return Err(TourForgeError::invalid_argument(format!(
                        "Invalid clustering because cluster {id} contains vertex {v}, \
                         which exceeds the maximum vertex index {}.",
                        num_vertices - 1
                    )));
                }
                if cluster_of[v] != UNASSIGNED {
                    return Err(TourForgeError::invalid_argument(format!(
                        "Invalid clustering because you assign vertex {v} to both clusters {} and {id}.",
                        cluster_of[v]
                    )));
                }
                cluster_of[v] = id;
            }
        }

        if let Some(v) = cluster_of.iter().position(|&c| c == UNASSIGNED) {
            return Err(TourForgeError::invalid_argument(format!(
                "Invalid clustering because vertex {v} is not assigned to any cluster."
            )));
        }

        Ok(Self {
            clusters,
            cluster_of,
        })
    }

    /// Builds a clustering of consecutive vertex IDs: the first `sizes[0]`
    /// vertices form cluster 0, the next `sizes[1]` form cluster 1, and so on.
    pub fn from_sizes(sizes: &[usize]) -> Result<Self> {
        let mut clusters = Vec::with_capacity(sizes.len());
        let mut next = 0;
        for &size in sizes {
            clusters.push((next..next + size).collect());
            next += size;
        }
        Self::new(next, clusters)
    }

    pub fn num_clusters(&self) -> usize {
        self.clusters.len()
    }

    pub fn num_vertices(&self) -> usize {
        self.cluster_of.len()
    }

    /// Members of a cluster, in the order they were given.
    ///
    /// # Panics
    ///
    /// Panics if `cluster >= num_clusters()`.
    pub fn members(&self, cluster: usize) -> &[usize] {
        &self.clusters[cluster]
    }

    /// Cluster containing `vertex`.
    ///
    /// # Panics
    ///
    /// Panics if `vertex >= num_vertices()`.
    pub fn cluster_id(&self, vertex: usize) -> usize {
        self.cluster_of[vertex]
    }

    pub fn cluster_size(&self, cluster: usize) -> usize {
        self.clusters[cluster].len()
    }

    /// ID of a cluster with the fewest members, the lowest ID on ties.
    pub fn smallest_cluster(&self) -> usize {
        let mut best = 0;
        for (id, members) in self.clusters.iter().enumerate() {
            if members.len() < self.clusters[best].len() {
                best = id;
            }
            if self.clusters[best].len() == 1 {
                break;
            }
        }
        best
    }

    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.clusters.iter().map(Vec::as_slice)
    }
}

/// Whether two shared clusterings describe the same partition.
///
/// Pointer identity is checked first; structurally equal copies also match.
pub fn same_clustering(a: &Arc<Clustering>, b: &Arc<Clustering>) -> bool {
    Arc::ptr_eq(a, b) || a == b
}
