//! Four points on the unit circle.
//!
//! The tour `[2, 0, 3, 1]` crosses itself; exchanging the edges leaving
//! vertices 3 and 2 uncrosses it.

use tourforge_core::{Norm, PointGraph};

/// Starting tour with two crossing edges.
pub const CIRCLE_TOUR: [usize; 4] = [2, 0, 3, 1];

/// Points (1,0), (0,1), (-1,0) and (0,-1).
pub fn circle_graph() -> PointGraph<f64> {
    PointGraph::from_points(
        &[[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0], [0.0, -1.0]],
        Norm::Euclidean,
    )
    .expect("fixture points are valid")
}

/// Cost of [`CIRCLE_TOUR`]: 2√2 + 4.
pub fn circle_tour_cost() -> f64 {
    2.0 * 2f64.sqrt() + 4.0
}

/// Cost of the uncrossed square: 4√2.
pub fn circle_optimal_cost() -> f64 {
    4.0 * 2f64.sqrt()
}
