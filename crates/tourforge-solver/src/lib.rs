//! TourForge solver engines
//!
//! This crate provides the tour improvement algorithms:
//! - 2-opt search and priority-scheduled 2-opt sweeps
//! - GTSP cluster optimization by dynamic programming
//! - Farthest-insertion and random tour construction
//! - TSP and GTSP solve pipelines wiring these together

pub mod cluster_opt;
pub mod construction;
pub mod pipeline;
pub mod stats;
pub mod two_opt;

pub use cluster_opt::{ClusterOptimizer, DynProgArena};
pub use construction::{construct, farthest_insertion};
pub use pipeline::{solve_gtsp, solve_tsp, GtspSolution, TspSolution};
pub use stats::SolverStats;
pub use two_opt::{find_two_opt_move, PriorityTwoOpt, TwoOptMove, TwoOptOutcome};

pub use tourforge_config::{ImprovementMode, TourRepresentation};
