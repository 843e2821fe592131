//! Cyclic tour representations.
//!
//! - [`ArrayTour`] - permutation array, O(1) access by rank
//! - [`LinkedTour`] - doubly-linked records, O(1) successor by vertex ID
//! - [`GeneralizedTour`] - one representative vertex per cluster
//!
//! Algorithms are written once against [`CyclicTour`] and accept either
//! representation, usually as `&mut dyn CyclicTour`.

mod array;
mod generalized;
mod linked;

#[cfg(test)]
mod tests;

pub use array::ArrayTour;
pub use generalized::GeneralizedTour;
pub use linked::LinkedTour;

use num_traits::Zero;

use crate::error::{Result, TourForgeError};
use crate::graph::CostOracle;

/// A cyclic visiting order over a subset of the vertex IDs `0..max_len()`.
///
/// The depot anchors iteration only; it has no effect on cost or validity.
pub trait CyclicTour {
    /// Number of vertices currently in the tour.
    fn len(&self) -> usize;

    /// Size of the vertex universe; `len() == max_len()` for a Hamiltonian tour.
    fn max_len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `v` is currently in the tour.
    fn contains(&self, v: usize) -> bool;

    /// Successor of `v`.
    ///
    /// `v` must be in the tour. The precondition is only checked in debug
    /// builds, where a violation panics; in release builds the returned
    /// vertex is meaningless. Use [`try_next`](Self::try_next) when
    /// membership is not known.
    fn next(&self, v: usize) -> usize;

    /// Successor of `v`, or `InvalidOperation` if `v` is not in the tour.
    fn try_next(&self, v: usize) -> Result<usize> {
        if self.contains(v) {
            Ok(self.next(v))
        } else {
            Err(not_in_tour(v))
        }
    }

    /// The vertex that anchors rank 0.
    fn depot(&self) -> usize;

    /// One full cycle starting at `v`: exactly `len()` vertices.
    fn walk_from(&self, v: usize) -> Box<dyn Iterator<Item = usize> + '_> {
        let len = self.len();
        Box::new(std::iter::successors(Some(v), move |&u| Some(self.next(u))).take(len))
    }

    /// The tour as a sequence starting at the depot.
    fn to_sequence(&self) -> Vec<usize> {
        self.walk_from(self.depot()).collect()
    }

    /// Replaces edges A–B and C–D with A–C and B–D, where B = next(A) and
    /// D = next(C).
    ///
    /// C must be at least two steps ahead of A and A at least two steps
    /// ahead of C. One of the arcs B..C or D..A is reversed; with `strict`
    /// it is always B..C. The tour's cost is not tracked here.
    fn exchange_two_edges(&mut self, a: usize, c: usize, strict: bool) -> Result<()>;

    /// Whether `to == next(from)`.
    fn is_one_step_ahead(&self, from: usize, to: usize) -> bool {
        self.next(from) == to
    }

    /// Whether `to == next(next(from))`.
    fn is_two_steps_ahead(&self, from: usize, to: usize) -> bool {
        self.next(self.next(from)) == to
    }

    /// Whether reaching `to` from `from` takes two or more steps.
    fn is_two_plus_steps_ahead(&self, from: usize, to: usize) -> bool {
        from != to && self.next(from) != to
    }

    /// Number of successor steps from `from` to `to`, `None` if `to` is
    /// not on `from`'s cycle.
    fn steps_ahead(&self, from: usize, to: usize) -> Option<usize> {
        self.walk_from(from).position(|v| v == to)
    }

    /// Whether walking from the depot never meets a vertex twice.
    fn has_no_revisit(&self) -> bool {
        let mut seen = vec![false; self.max_len()];
        for v in self.walk_from(self.depot()) {
            if v >= seen.len() {
                continue;
            }
            if seen[v] {
                return false;
            }
            seen[v] = true;
        }
        true
    }

    /// Whether every vertex met from the depot lies in `0..max_len()`.
    fn all_elements_valid(&self) -> bool {
        let max_len = self.max_len();
        self.walk_from(self.depot()).all(|v| v < max_len)
    }

    /// Whether every vertex of the universe is visited exactly once.
    fn is_hamiltonian(&self) -> bool {
        self.len() == self.max_len() && self.all_elements_valid() && self.has_no_revisit()
    }
}

/// Sum of edge costs once around the tour.
///
/// # Example
///
/// ```
/// use tourforge_core::{eval_tour, ArrayTour, Norm, PointGraph};
///
/// let g = PointGraph::<f64>::from_points(
///     &[[0.0, 0.0], [3.0, 0.0], [3.0, 4.0]],
///     Norm::Euclidean,
/// )
/// .unwrap();
/// let tour = ArrayTour::new(vec![0, 1, 2]).unwrap();
///
/// assert_eq!(eval_tour(&tour, &g), 12.0);
/// ```
pub fn eval_tour<T, G>(tour: &T, oracle: &G) -> G::Cost
where
    T: CyclicTour + ?Sized,
    G: CostOracle + ?Sized,
{
    let mut walk = tour.walk_from(tour.depot());
    let Some(first) = walk.next() else {
        return G::Cost::zero();
    };
    let (last, total) = walk.fold((first, G::Cost::zero()), |(prev, acc), v| {
        (v, acc + oracle.edge_cost(prev, v))
    });
    total + oracle.edge_cost(last, first)
}

/// Cost change `(c(A,B) + c(C,D)) - (c(A,C) + c(B,D))` of a 2-opt move;
/// positive when the move shortens the tour.
#[inline]
pub fn two_opt_gain<G>(oracle: &G, a: usize, b: usize, c: usize, d: usize) -> G::Cost
where
    G: CostOracle + ?Sized,
{
    let removed = oracle.edge_cost(a, b) + oracle.edge_cost(c, d);
    let added = oracle.edge_cost(a, c) + oracle.edge_cost(b, d);
    removed - added
}

pub(crate) fn not_in_tour(v: usize) -> TourForgeError {
    TourForgeError::invalid_operation(format!("vertex {v} is not in the tour"))
}

// Resolves B = next(A) and D = next(C) for an edge exchange, checking that
// A, B, C and D are four distinct vertices in cyclic order.
pub(crate) fn exchange_endpoints<T>(tour: &T, a: usize, c: usize) -> Result<(usize, usize)>
where
    T: CyclicTour + ?Sized,
{
    let b = tour.try_next(a)?;
    let d = tour.try_next(c)?;
    if c == a || c == b || d == a {
        return Err(TourForgeError::invalid_operation(format!(
            "cannot exchange edges {a}-{b} and {c}-{d}: vertex {c} must be at least two steps \
             ahead of {a} and vice versa"
        )));
    }
    Ok((b, d))
}
