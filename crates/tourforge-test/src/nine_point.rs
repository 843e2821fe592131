//! Nine points whose 2-optimal tour from [`NINE_POINT_START`] is optimal.

use tourforge_core::{Norm, PointGraph};

/// Initial tour, far from optimal.
pub const NINE_POINT_START: [usize; 9] = [0, 1, 4, 8, 7, 2, 6, 3, 5];

/// A known optimal tour.
pub const NINE_POINT_OPTIMAL: [usize; 9] = [0, 1, 3, 4, 7, 8, 6, 5, 2];

pub const NINE_POINT_START_COST: f64 = 28.983801585673326;

pub const NINE_POINT_OPTIMAL_COST: f64 = 20.536631057245557;

const POINTS: [[f64; 2]; 9] = [
    [0.0, 0.0],
    [4.0, 0.0],
    [1.0, 2.0],
    [3.0, 2.0],
    [4.0, 2.0],
    [0.0, 4.0],
    [2.0, 4.0],
    [4.0, 4.0],
    [2.0, 6.0],
];

/// Euclidean graph over the nine points.
pub fn nine_point_graph() -> PointGraph<f64> {
    PointGraph::from_points(&POINTS, Norm::Euclidean).expect("fixture points are valid")
}
