//! TourForge - TSP and GTSP local search in Rust
//!
//! Load an instance, pick a configuration and call [`solve_tsp`] or
//! [`solve_gtsp`].
//!
//! # Example
//!
//! ```rust
//! use tourforge::prelude::*;
//!
//! let g = PointGraph::<f64>::from_points(
//!     &[[0.0, 0.0], [2.0, 0.0], [2.0, 1.0], [0.0, 1.0]],
//!     Norm::Euclidean,
//! )
//! .unwrap();
//!
//! let solution = solve_tsp(&g, &SolverConfig::default()).unwrap();
//! assert!((solution.cost - 6.0).abs() < 1e-9);
//! ```

// Tours, graphs and clusterings
pub use tourforge_core::{
    eval_tour, same_clustering, two_opt_gain, ArrayTour, Clustering, Cost, CostOracle, CyclicTour,
    GeneralizedTour, LinkedTour, MatrixGraph, Norm, PointGraph, Result, TourForgeError,
};

// Segment reversal on rings
pub use tourforge_core::ring;

// Solver engines and pipelines
pub use tourforge_solver::{
    construct, farthest_insertion, find_two_opt_move, solve_gtsp, solve_tsp, ClusterOptimizer,
    DynProgArena, GtspSolution, PriorityTwoOpt, SolverStats, TspSolution, TwoOptMove,
    TwoOptOutcome,
};

// Configuration
pub use tourforge_config::{
    ClusterOptimizationConfig, ConfigError, ConstructionConfig, ImprovementMode, SolverConfig,
    TourRepresentation, TwoOptConfig,
};

// TSPLIB files
pub use tourforge_tsplib::{EdgeWeightType, ProblemType, TsplibError, TsplibProblem, TsplibTour};

/// Colored console output for solver events.
#[cfg(feature = "console")]
pub use tourforge_console as console;

pub mod prelude {
    pub use super::{ArrayTour, CostOracle, CyclicTour, GeneralizedTour, LinkedTour};
    pub use super::{Clustering, MatrixGraph, Norm, PointGraph};
    pub use super::{solve_gtsp, solve_tsp, ImprovementMode, SolverConfig, TourRepresentation};
    pub use super::{TsplibProblem, TsplibTour};
}
