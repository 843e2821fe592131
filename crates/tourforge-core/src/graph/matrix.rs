//! Explicit cost-matrix graph.

use std::sync::Arc;

use tracing::warn;

use super::{check_clustering_fits, CostOracle};
use crate::clustering::Clustering;
use crate::cost::Cost;
use crate::error::{Result, TourForgeError};

/// A graph storing every edge cost in a row-major N×N matrix.
///
/// A symmetric graph is built from the lower triangle: entries above the
/// diagonal are overwritten with their mirror image.
///
/// # Example
///
/// ```
/// use tourforge_core::{CostOracle, MatrixGraph};
///
/// let g = MatrixGraph::from_rows(
///     vec![
///         vec![0, 99, 99],
///         vec![4, 0, 99],
///         vec![7, 5, 0],
///     ],
///     true,
/// )
/// .unwrap();
///
/// assert_eq!(g.edge_cost(0, 2), 7);
/// assert_eq!(g.edge_cost(2, 0), 7);
/// assert!(g.is_symmetric());
/// ```
#[derive(Debug, Clone)]
pub struct MatrixGraph<C> {
    num_vertices: usize,
    costs: Vec<C>,
    symmetric: bool,
    clustering: Option<Arc<Clustering>>,
}

impl<C: Cost> MatrixGraph<C> {
    /// Creates a graph from a row-major matrix of `num_vertices²` costs.
    pub fn new(num_vertices: usize, mut costs: Vec<C>, symmetric: bool) -> Result<Self> {
        if num_vertices == 0 {
            return Err(TourForgeError::invalid_argument(
                "a cost matrix needs at least one vertex",
            ));
        }
        let expected = num_vertices * num_vertices;
        if costs.len() != expected {
            return Err(TourForgeError::LengthMismatch {
                what: "cost matrix",
                expected,
                actual: costs.len(),
            });
        }

        if symmetric {
            for row in 0..num_vertices {
                for col in row + 1..num_vertices {
                    costs[row * num_vertices + col] = costs[col * num_vertices + row];
                }
            }
        }

        let negatives = costs.iter().filter(|&&c| c < C::zero()).count();
        if negatives > 0 {
            warn!(
                negatives,
                "cost matrix has negative edge costs; tour algorithms may misbehave"
            );
        }

        Ok(Self {
            num_vertices,
            costs,
            symmetric,
            clustering: None,
        })
    }

    /// Creates a graph from a square list of rows.
    pub fn from_rows(rows: Vec<Vec<C>>, symmetric: bool) -> Result<Self> {
        let n = rows.len();
        let mut costs = Vec::with_capacity(n * n);
        for row in rows {
            if row.len() != n {
                return Err(TourForgeError::LengthMismatch {
                    what: "cost matrix row",
                    expected: n,
                    actual: row.len(),
                });
            }
            costs.extend(row);
        }
        Self::new(n, costs, symmetric)
    }

    /// Attaches a clustering, turning this into a GTSP instance.
    pub fn with_clustering(mut self, clustering: Arc<Clustering>) -> Result<Self> {
        check_clustering_fits(self.num_vertices, &clustering)?;
        self.clustering = Some(clustering);
        Ok(self)
    }
}

impl<C: Cost> CostOracle for MatrixGraph<C> {
    type Cost = C;

    fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    #[inline]
    fn edge_cost(&self, from: usize, to: usize) -> C {
        self.costs[from * self.num_vertices + to]
    }

    fn clustering(&self) -> Option<&Arc<Clustering>> {
        self.clustering.as_ref()
    }
}
