//! Implicit geometric graph over points.

use std::sync::Arc;

use num_traits::Float;
use tracing::{debug, warn};

use super::{check_clustering_fits, CostOracle, MatrixGraph};
use crate::clustering::Clustering;
use crate::cost::Cost;
use crate::error::{Result, TourForgeError};

const LARGE_EXPLICIT_GRAPH: usize = 10_000;

/// Distance function between two points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Norm {
    /// L2 distance.
    #[default]
    Euclidean,
    /// L1 distance.
    Manhattan,
    /// L∞ distance.
    Maximum,
}

impl Norm {
    pub fn distance<F: Float>(self, a: &[F], b: &[F]) -> F {
        let diffs = a.iter().zip(b).map(|(&x, &y)| (x - y).abs());
        match self {
            Norm::Euclidean => diffs.fold(F::zero(), |acc, d| acc + d * d).sqrt(),
            Norm::Manhattan => diffs.fold(F::zero(), |acc, d| acc + d),
            Norm::Maximum => diffs.fold(F::zero(), |acc, d| acc.max(d)),
        }
    }
}

/// A graph whose edge costs are distances between points of equal dimension.
///
/// Always symmetric. Coordinates are stored flat, `dim` values per vertex.
///
/// # Example
///
/// ```
/// use tourforge_core::{CostOracle, Norm, PointGraph};
///
/// let g = PointGraph::<f64>::from_points(&[[0.0, 0.0], [3.0, 4.0]], Norm::Euclidean).unwrap();
/// assert_eq!(g.edge_cost(0, 1), 5.0);
///
/// let g = PointGraph::<f64>::from_points(&[[0.0, 0.0], [3.0, 4.0]], Norm::Manhattan).unwrap();
/// assert_eq!(g.edge_cost(1, 0), 7.0);
/// ```
#[derive(Debug, Clone)]
pub struct PointGraph<F> {
    dim: usize,
    coords: Vec<F>,
    norm: Norm,
    clustering: Option<Arc<Clustering>>,
}

impl<F: Float + Cost> PointGraph<F> {
    /// Creates a graph from flat coordinates, `dim` values per point.
    pub fn new(dim: usize, coords: Vec<F>, norm: Norm) -> Result<Self> {
        if dim == 0 {
            return Err(TourForgeError::invalid_argument(
                "points need at least one coordinate",
            ));
        }
        if coords.is_empty() {
            return Err(TourForgeError::invalid_argument(
                "a point graph needs at least one point",
            ));
        }
        if coords.len() % dim != 0 {
            return Err(TourForgeError::invalid_argument(format!(
                "{} coordinates cannot be split into points of dimension {dim}",
                coords.len()
            )));
        }
        Ok(Self {
            dim,
            coords,
            norm,
            clustering: None,
        })
    }

    /// Creates a graph from a list of points sharing one dimension.
    pub fn from_points<P: AsRef<[F]>>(points: &[P], norm: Norm) -> Result<Self> {
        let dim = points.first().map_or(0, |p| p.as_ref().len());
        let mut coords = Vec::with_capacity(points.len() * dim);
        for p in points {
            let p = p.as_ref();
            if p.len() != dim {
                return Err(TourForgeError::LengthMismatch {
                    what: "point",
                    expected: dim,
                    actual: p.len(),
                });
            }
            coords.extend_from_slice(p);
        }
        Self::new(dim, coords, norm)
    }

    /// Attaches a clustering, turning this into a GTSP instance.
    pub fn with_clustering(mut self, clustering: Arc<Clustering>) -> Result<Self> {
        check_clustering_fits(self.num_vertices(), &clustering)?;
        self.clustering = Some(clustering);
        Ok(self)
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn norm(&self) -> Norm {
        self.norm
    }

    /// Coordinates of vertex `v`.
    pub fn point(&self, v: usize) -> &[F] {
        &self.coords[v * self.dim..(v + 1) * self.dim]
    }

    /// Precomputes every distance into an integer matrix.
    ///
    /// Each distance is multiplied by `scale` and rounded to the nearest
    /// integer as TSPLIB's `nint` does. The clustering, if any, is shared
    /// with the new graph.
    pub fn explicitize(&self, scale: F) -> Result<MatrixGraph<i64>> {
        let n = self.num_vertices();
        if n > LARGE_EXPLICIT_GRAPH {
            warn!(
                vertices = n,
                "explicitizing a large point graph; the matrix holds n² entries"
            );
        }
        if scale < F::one() {
            warn!(scale = %scale, "explicitizing with scale below 1 loses precision");
        }

        let half = F::one() / (F::one() + F::one());
        let mut costs = Vec::with_capacity(n * n);
        for from in 0..n {
            for to in 0..n {
                let scaled = (self.edge_cost(from, to) * scale + half).floor();
                let rounded = scaled.to_i64().ok_or_else(|| {
                    TourForgeError::invalid_argument(format!(
                        "distance {from}->{to} scaled by {scale} does not fit an integer cost"
                    ))
                })?;
                costs.push(rounded);
            }
        }
        debug!(vertices = n, scale = %scale, "explicitized point graph");

        let graph = MatrixGraph::new(n, costs, true)?;
        match &self.clustering {
            Some(clustering) => graph.with_clustering(Arc::clone(clustering)),
            None => Ok(graph),
        }
    }

    /// Builds an unclustered graph with one point per cluster, its mean.
    ///
    /// Useful for ordering clusters before the vertices inside them are chosen.
    pub fn cluster_means(&self) -> Result<PointGraph<F>> {
        let clustering = self.clustering.as_ref().ok_or_else(|| {
            TourForgeError::invalid_operation("cluster means need a clustered graph")
        })?;
        if self.norm != Norm::Euclidean {
            warn!(
                norm = ?self.norm,
                "cluster means are barycenters and ignore the graph's norm"
            );
        }

        let mut coords = Vec::with_capacity(clustering.num_clusters() * self.dim);
        for members in clustering.iter() {
            let count = F::from(members.len()).ok_or_else(|| {
                TourForgeError::internal("cluster size not representable as a coordinate")
            })?;
            for axis in 0..self.dim {
                let sum = members
                    .iter()
                    .fold(F::zero(), |acc, &v| acc + self.point(v)[axis]);
                coords.push(sum / count);
            }
        }
        PointGraph::new(self.dim, coords, self.norm)
    }
}

impl<F: Float + Cost> CostOracle for PointGraph<F> {
    type Cost = F;

    fn num_vertices(&self) -> usize {
        self.coords.len() / self.dim
    }

    fn is_symmetric(&self) -> bool {
        true
    }

    #[inline]
    fn edge_cost(&self, from: usize, to: usize) -> F {
        self.norm.distance(self.point(from), self.point(to))
    }

    fn clustering(&self) -> Option<&Arc<Clustering>> {
        self.clustering.as_ref()
    }
}
