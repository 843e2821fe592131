//! Permutation-array tour.

use tracing::trace;

use super::{exchange_endpoints, not_in_tour, CyclicTour};
use crate::error::{Result, TourForgeError};
use crate::graph::CostOracle;
use crate::ring;
use crate::validate::{check_distinct_in_range, check_permutation};

/// A tour stored as `seq[rank] = vertex`, with the depot at rank 0.
///
/// Positional access is O(1); finding a vertex's rank is a linear scan, so
/// hot loops that track ranks themselves should use the rank-based methods.
///
/// # Example
///
/// ```
/// use tourforge_core::{ArrayTour, CyclicTour};
///
/// let mut tour = ArrayTour::new(vec![0, 1, 2, 3, 4, 5]).unwrap();
/// tour.exchange_two_edges(1, 4, true).unwrap();
///
/// assert_eq!(tour.as_slice(), &[0, 1, 4, 3, 2, 5]);
/// assert!(tour.is_hamiltonian());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayTour {
    seq: Vec<usize>,
    max_len: usize,
}

impl ArrayTour {
    /// Creates a Hamiltonian tour over `0..seq.len()`.
    pub fn new(seq: Vec<usize>) -> Result<Self> {
        let n = seq.len();
        Self::hamiltonian(seq, n)
    }

    /// Creates a Hamiltonian tour over `0..n`; `seq` must be a permutation of it.
    pub fn hamiltonian(seq: Vec<usize>, n: usize) -> Result<Self> {
        check_non_empty(&seq)?;
        check_permutation(&seq, n)?;
        Ok(Self { seq, max_len: n })
    }

    /// Creates a tour visiting only some of the vertices `0..max_len`.
    pub fn partial(seq: Vec<usize>, max_len: usize) -> Result<Self> {
        check_non_empty(&seq)?;
        if seq.len() > max_len {
            return Err(TourForgeError::LengthMismatch {
                what: "partial tour",
                expected: max_len,
                actual: seq.len(),
            });
        }
        check_distinct_in_range(&seq, max_len, "tour", "vertex")?;
        Ok(Self { seq, max_len })
    }

    /// Rank of `v`, found by linear scan.
    pub fn rank_of(&self, v: usize) -> Option<usize> {
        self.seq.iter().position(|&u| u == v)
    }

    /// Vertex at `rank`, taken modulo the tour length.
    #[inline]
    pub fn vertex_at(&self, rank: usize) -> usize {
        self.seq[rank % self.seq.len()]
    }

    /// Successor of the vertex at `rank`.
    #[inline]
    pub fn next_by_rank(&self, rank: usize) -> usize {
        self.vertex_at(rank + 1)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.seq
    }

    /// Mutable access to the sequence.
    ///
    /// The caller keeps it a valid tour: no repeated and no out-of-range
    /// vertices.
    pub fn sequence_mut(&mut self) -> &mut [usize] {
        &mut self.seq
    }

    /// Tour cost from consecutive positions, without successor lookups.
    pub fn cost<G: CostOracle + ?Sized>(&self, oracle: &G) -> G::Cost {
        let closing = oracle.edge_cost(self.seq[self.seq.len() - 1], self.seq[0]);
        self.seq
            .windows(2)
            .fold(closing, |acc, w| acc + oracle.edge_cost(w[0], w[1]))
    }

    /// Exchanges edges (A, B) and (C, D) given the ranks of A and C.
    ///
    /// `rank_a < len()` and `rank_a + 2 <= rank_c <= rank_a + len() - 2`;
    /// `rank_c` may exceed `len()` when C lies past the end of the array.
    /// Reverses the ranks `[rank_a + 1, rank_c]`, i.e. B..C, or with
    /// `strict == false` possibly the complementary arc D..A.
    pub fn exchange_two_edges_by_rank(
        &mut self,
        rank_a: usize,
        rank_c: usize,
        strict: bool,
    ) -> Result<()> {
        let n = self.seq.len();
        if rank_a >= n || rank_c < rank_a + 2 || rank_c + 2 > rank_a + n {
            return Err(TourForgeError::invalid_operation(format!(
                "cannot exchange edges at ranks {rank_a} and {rank_c} of a tour of length {n}: \
                 rank {rank_c} must be at least two steps ahead of {rank_a} and vice versa"
            )));
        }

        let start = (rank_a + 1) % n;
        let end = start + (rank_c - rank_a - 1);
        trace!(rank_a, rank_c, strict, "array edge exchange");
        if strict {
            ring::reverse_strict(&mut self.seq, start, end)
        } else {
            ring::reverse_smart(&mut self.seq, start, end).map(|_| ())
        }
    }
}

fn check_non_empty(seq: &[usize]) -> Result<()> {
    if seq.is_empty() {
        return Err(TourForgeError::invalid_argument(
            "a tour needs at least one vertex",
        ));
    }
    Ok(())
}

impl CyclicTour for ArrayTour {
    fn len(&self) -> usize {
        self.seq.len()
    }

    fn max_len(&self) -> usize {
        self.max_len
    }

    fn contains(&self, v: usize) -> bool {
        self.seq.contains(&v)
    }

    // Debug-checked only; see `CyclicTour::next`.
    fn next(&self, v: usize) -> usize {
        match self.rank_of(v) {
            Some(rank) => self.next_by_rank(rank),
            None => {
                debug_assert!(false, "vertex {v} is not in the tour");
                v
            }
        }
    }

    fn try_next(&self, v: usize) -> Result<usize> {
        self.rank_of(v)
            .map(|rank| self.next_by_rank(rank))
            .ok_or_else(|| not_in_tour(v))
    }

    fn depot(&self) -> usize {
        self.seq[0]
    }

    fn walk_from(&self, v: usize) -> Box<dyn Iterator<Item = usize> + '_> {
        match self.rank_of(v) {
            Some(rank) => {
                let n = self.seq.len();
                Box::new((0..n).map(move |k| self.seq[(rank + k) % n]))
            }
            None => Box::new(std::iter::empty()),
        }
    }

    fn to_sequence(&self) -> Vec<usize> {
        self.seq.clone()
    }

    fn exchange_two_edges(&mut self, a: usize, c: usize, strict: bool) -> Result<()> {
        exchange_endpoints(self, a, c)?;
        let n = self.seq.len();
        let rank_a = self.rank_of(a).ok_or_else(|| not_in_tour(a))?;
        let mut rank_c = self.rank_of(c).ok_or_else(|| not_in_tour(c))?;
        if rank_c < rank_a {
            rank_c += n;
        }
        self.exchange_two_edges_by_rank(rank_a, rank_c, strict)
    }
}
