//! Doubly-linked tour over an index arena.

use tracing::trace;

use super::{exchange_endpoints, ArrayTour, CyclicTour};
use crate::error::{Result, TourForgeError};
use crate::validate::{check_distinct_in_range, check_permutation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Link {
    prev: usize,
    next: usize,
}

/// A tour stored as one predecessor/successor record per possible vertex.
///
/// Records are addressed by vertex ID. Vertices outside the tour keep a
/// self-loop record that is unreachable from the depot. Successor lookup is
/// O(1) and an edge exchange costs O(length of the reversed arc).
///
/// # Example
///
/// ```
/// use tourforge_core::{CyclicTour, LinkedTour};
///
/// let mut tour = LinkedTour::new(vec![2, 0, 3, 1]).unwrap();
/// tour.exchange_two_edges(3, 2, true).unwrap();
///
/// assert_eq!(tour.to_sequence(), vec![2, 1, 0, 3]);
/// assert_eq!(tour.prev(2), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedTour {
    links: Vec<Link>,
    in_tour: Vec<bool>,
    len: usize,
    depot: usize,
}

impl LinkedTour {
    /// Creates a Hamiltonian tour over `0..seq.len()`.
    pub fn new(seq: Vec<usize>) -> Result<Self> {
        let n = seq.len();
        Self::hamiltonian(&seq, n)
    }

    /// Creates a Hamiltonian tour over `0..n`; `seq` must be a permutation of it.
    pub fn hamiltonian(seq: &[usize], n: usize) -> Result<Self> {
        if seq.is_empty() {
            return Err(TourForgeError::invalid_argument(
                "a tour needs at least one vertex",
            ));
        }
        check_permutation(seq, n)?;
        Ok(Self::link(seq, n))
    }

    /// Creates a tour visiting only some of the vertices `0..max_len`.
    pub fn partial(seq: &[usize], max_len: usize) -> Result<Self> {
        if seq.is_empty() {
            return Err(TourForgeError::invalid_argument(
                "a tour needs at least one vertex",
            ));
        }
        if seq.len() > max_len {
            return Err(TourForgeError::LengthMismatch {
                what: "partial tour",
                expected: max_len,
                actual: seq.len(),
            });
        }
        check_distinct_in_range(seq, max_len, "tour", "vertex")?;
        Ok(Self::link(seq, max_len))
    }

    // `seq` is non-empty, distinct and within `0..max_len`.
    fn link(seq: &[usize], max_len: usize) -> Self {
        let mut links: Vec<Link> = (0..max_len).map(|v| Link { prev: v, next: v }).collect();
        let mut in_tour = vec![false; max_len];
        let n = seq.len();
        for (rank, &v) in seq.iter().enumerate() {
            links[v] = Link {
                prev: seq[(rank + n - 1) % n],
                next: seq[(rank + 1) % n],
            };
            in_tour[v] = true;
        }
        Self {
            links,
            in_tour,
            len: n,
            depot: seq[0],
        }
    }

    /// Predecessor of `v`; `v` must be in the tour.
    #[inline]
    pub fn prev(&self, v: usize) -> usize {
        self.links[v].prev
    }

    // Reverses the arc first..=last by swapping each record's links.
    // Boundary links still point outward afterwards and must be relinked.
    fn flip_arc(&mut self, first: usize, last: usize) {
        let mut u = first;
        loop {
            let link = &mut self.links[u];
            let after = link.next;
            std::mem::swap(&mut link.prev, &mut link.next);
            if u == last {
                break;
            }
            u = after;
        }
    }

    // Counts along B..C and D..A in lockstep; true if B..C is no longer.
    fn inner_arc_is_shorter(&self, b: usize, c: usize, d: usize, a: usize) -> bool {
        let (mut x, mut y) = (b, d);
        loop {
            if x == c {
                return true;
            }
            if y == a {
                return false;
            }
            x = self.links[x].next;
            y = self.links[y].next;
        }
    }
}

impl From<&ArrayTour> for LinkedTour {
    fn from(tour: &ArrayTour) -> Self {
        Self::link(tour.as_slice(), tour.max_len())
    }
}

impl CyclicTour for LinkedTour {
    fn len(&self) -> usize {
        self.len
    }

    fn max_len(&self) -> usize {
        self.links.len()
    }

    fn contains(&self, v: usize) -> bool {
        self.in_tour.get(v).copied().unwrap_or(false)
    }

    #[inline]
    fn next(&self, v: usize) -> usize {
        debug_assert!(self.contains(v), "vertex {v} is not in the tour");
        self.links[v].next
    }

    fn depot(&self) -> usize {
        self.depot
    }

    fn exchange_two_edges(&mut self, a: usize, c: usize, strict: bool) -> Result<()> {
        let (b, d) = exchange_endpoints(self, a, c)?;

        if strict || self.inner_arc_is_shorter(b, c, d, a) {
            trace!(a, b, c, d, "reversing inner arc");
            self.flip_arc(b, c);
            self.links[a].next = c;
            self.links[c].prev = a;
            self.links[b].next = d;
            self.links[d].prev = b;
        } else {
            trace!(a, b, c, d, "reversing outer arc");
            self.flip_arc(d, a);
            self.links[c].next = a;
            self.links[a].prev = c;
            self.links[d].next = b;
            self.links[b].prev = d;
        }
        Ok(())
    }
}
