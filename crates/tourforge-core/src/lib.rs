//! TourForge Core - tour representations and cost oracles
//!
//! This crate provides the fundamental abstractions for TSP and GTSP search:
//! - Cyclic tours as permutation arrays or linked records
//! - Cost oracles over explicit matrices or geometric points
//! - Clusterings for the generalized (GTSP) variant
//! - In-place cyclic segment reversal

pub mod clustering;
pub mod cost;
pub mod error;
pub mod graph;
pub mod ring;
pub mod tour;
pub mod validate;

pub use clustering::{same_clustering, Clustering};
pub use cost::Cost;
pub use error::{Result, TourForgeError};
pub use graph::{CostOracle, MatrixGraph, Norm, PointGraph};
pub use tour::{eval_tour, two_opt_gain, ArrayTour, CyclicTour, GeneralizedTour, LinkedTour};
