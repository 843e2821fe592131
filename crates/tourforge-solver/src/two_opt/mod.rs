//! 2-opt local search.
//!
//! A 2-opt move removes edges A–B and C–D (B = next(A), D = next(C)) and
//! reconnects A–C and B–D, reversing the arc in between.
//!
//! - [`find_two_opt_move`] - best or first improving move for a fixed A
//! - [`PriorityTwoOpt`] - sweeps that drive a tour to 2-optimality

mod engine;
mod outcome;


pub use engine::PriorityTwoOpt;
pub use outcome::TwoOptOutcome;

use tracing::trace;

use tourforge_config::ImprovementMode;
use tourforge_core::{two_opt_gain, Cost, CostOracle, CyclicTour, Result, TourForgeError};

/// Result of a 2-opt scan around vertex `a`.
///
/// `c` is `None` and `improvement` zero when no improving move exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoOptMove<C> {
    pub a: usize,
    pub c: Option<usize>,
    pub improvement: C,
}

impl<C: Cost> TwoOptMove<C> {
    /// A scan result carrying no move.
    pub fn none(a: usize) -> Self {
        Self {
            a,
            c: None,
            improvement: C::zero(),
        }
    }

    /// Whether applying the move shortens the tour.
    pub fn is_valid(&self) -> bool {
        self.c.is_some() && self.improvement > C::zero()
    }
}

/// Scans every 2-opt move removing the edge leaving `a`.
///
/// Candidates C are `next(B)`, `next(next(B))`, … for `len() - 3` steps,
/// so A, B, C and D are always four distinct vertices in cyclic order. The
/// improvement of a candidate is `(c(A,B) + c(C,D)) - (c(A,C) + c(B,D))`.
/// In [`ImprovementMode::First`] the first positive one is returned.
///
/// Runs in O(len()) on either tour representation.
///
/// # Errors
///
/// `InvalidOperation` if the tour has fewer than 4 vertices, the oracle is
/// asymmetric, or `a` is not in the tour.
///
/// # Example
///
/// ```
/// use tourforge_config::ImprovementMode;
/// use tourforge_core::{LinkedTour, Norm, PointGraph};
/// use tourforge_solver::find_two_opt_move;
///
/// let g = PointGraph::from_points(
///     &[[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0], [0.0, -1.0]],
///     Norm::Euclidean,
/// )
/// .unwrap();
/// let tour = LinkedTour::new(vec![2, 0, 3, 1]).unwrap();
///
/// let mv = find_two_opt_move(&tour, 3, &g, ImprovementMode::Best).unwrap();
/// assert!(mv.is_valid());
/// assert_eq!(mv.c, Some(2));
/// ```
pub fn find_two_opt_move<T, G>(
    tour: &T,
    a: usize,
    oracle: &G,
    mode: ImprovementMode,
) -> Result<TwoOptMove<G::Cost>>
where
    T: CyclicTour + ?Sized,
    G: CostOracle + ?Sized,
{
    let n = tour.len();
    if n < 4 {
        return Err(TourForgeError::invalid_operation(format!(
            "tour is too short for a 2-opt move: {n} vertices, need at least 4"
        )));
    }
    if !oracle.is_symmetric() {
        return Err(TourForgeError::invalid_operation(
            "2-opt search requires a symmetric cost oracle",
        ));
    }

    let b = tour.try_next(a)?;
    let mut best = TwoOptMove::none(a);

    // walk_from(b) yields B, then the candidates C and their successors D.
    let mut walk = tour.walk_from(b).skip(1);
    let Some(mut c) = walk.next() else {
        return Ok(best);
    };
    for d in walk.take(n - 3) {
        let improvement = two_opt_gain(oracle, a, b, c, d);
        if improvement > best.improvement {
            trace!(a, c, improvement = %improvement, "improving 2-opt candidate");
            best.c = Some(c);
            best.improvement = improvement;
            if mode == ImprovementMode::First {
                break;
            }
        }
        c = d;
    }

    Ok(best)
}
