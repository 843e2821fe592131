//! Cost oracles: pairwise edge costs over a dense vertex set.
//!
//! - [`MatrixGraph`] - explicit N×N cost matrix
//! - [`PointGraph`] - implicit distances between points under a [`Norm`]

mod matrix;
mod points;

#[cfg(test)]
mod tests;

use std::sync::Arc;

pub use matrix::MatrixGraph;
pub use points::{Norm, PointGraph};

use crate::clustering::Clustering;
use crate::cost::Cost;
use crate::error::{Result, TourForgeError};

/// Provides edge costs between vertices `0..num_vertices()`.
///
/// Tour algorithms only ever talk to a graph through this trait.
pub trait CostOracle {
    /// Numeric type of an edge cost.
    type Cost: Cost;

    /// Number of vertices; valid IDs are `0..num_vertices()`.
    fn num_vertices(&self) -> usize;

    /// Whether `edge_cost(a, b) == edge_cost(b, a)` for every pair.
    fn is_symmetric(&self) -> bool;

    /// Cost of travelling from `from` to `to`.
    ///
    /// Must be callable for any ordered pair of valid vertex IDs.
    fn edge_cost(&self, from: usize, to: usize) -> Self::Cost;

    /// Clustering of the vertices, if this is a GTSP instance.
    fn clustering(&self) -> Option<&Arc<Clustering>> {
        None
    }

    /// Number of clusters, 0 when unclustered.
    fn num_clusters(&self) -> usize {
        self.clustering().map_or(0, |c| c.num_clusters())
    }

    fn is_clustered(&self) -> bool {
        self.clustering().is_some()
    }
}

// A clustering attached to a graph must cover exactly the graph's vertices.
fn check_clustering_fits(num_vertices: usize, clustering: &Clustering) -> Result<()> {
    if clustering.num_vertices() != num_vertices {
        return Err(TourForgeError::invalid_argument(format!(
            "clustering covers {} vertices but the graph has {}",
            clustering.num_vertices(),
            num_vertices
        )));
    }
    Ok(())
}
