//! Initial tour construction.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use tourforge_config::ConstructionConfig;
use tourforge_core::validate::random_permutation;
use tourforge_core::{ArrayTour, CostOracle, Result, TourForgeError};

/// Builds a Hamiltonian tour by farthest insertion.
///
/// Starting from `first_pick`, repeatedly takes the vertex farthest from the
/// partial tour (lowest ID on ties) and inserts it where it lengthens the
/// tour least (earliest position on ties). Runs in O(N²).
///
/// # Errors
///
/// `InvalidArgument` if `first_pick` is not a vertex of `oracle`.
///
/// # Example
///
/// ```
/// use tourforge_core::{CyclicTour, Norm, PointGraph};
/// use tourforge_solver::farthest_insertion;
///
/// let g = PointGraph::from_points(
///     &[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0], [1.0, 1.0]],
///     Norm::Euclidean,
/// )
/// .unwrap();
///
/// let tour = farthest_insertion(&g, 4).unwrap();
/// assert!(tour.is_hamiltonian());
/// assert_eq!(tour.depot(), 4);
/// ```
pub fn farthest_insertion<G>(oracle: &G, first_pick: usize) -> Result<ArrayTour>
where
    G: CostOracle + ?Sized,
{
    let n = oracle.num_vertices();
    if first_pick >= n {
        return Err(TourForgeError::invalid_argument(format!(
            "first pick {first_pick} is not a vertex of a graph with {n} vertices"
        )));
    }

    let mut seq = Vec::with_capacity(n);
    seq.push(first_pick);
    let mut in_tour = vec![false; n];
    in_tour[first_pick] = true;

    // Distance from each outside vertex to its nearest tour vertex.
    let mut dist: Vec<G::Cost> = (0..n)
        .map(|v| oracle.edge_cost(first_pick, v))
        .collect();

    while seq.len() < n {
        let mut farthest: Option<usize> = None;
        for v in (0..n).filter(|&v| !in_tour[v]) {
            if farthest.map_or(true, |f| dist[v] > dist[f]) {
                farthest = Some(v);
            }
        }
        let Some(x) = farthest else { break };

        let position = cheapest_insertion(oracle, &seq, x);
        seq.insert(position, x);
        in_tour[x] = true;

        for v in (0..n).filter(|&v| !in_tour[v]) {
            let d = oracle.edge_cost(x, v);
            if d < dist[v] {
                dist[v] = d;
            }
        }
    }

    debug!(vertices = n, first_pick, "farthest insertion tour built");
    ArrayTour::hamiltonian(seq, n)
}

// Index at which inserting `x` adds the least cost.
fn cheapest_insertion<G>(oracle: &G, seq: &[usize], x: usize) -> usize
where
    G: CostOracle + ?Sized,
{
    let mut best: Option<(usize, G::Cost)> = None;
    for (i, &prev) in seq.iter().enumerate() {
        let next = seq[(i + 1) % seq.len()];
        let delta =
            oracle.edge_cost(prev, x) + oracle.edge_cost(x, next) - oracle.edge_cost(prev, next);
        if best.map_or(true, |(_, b)| delta < b) {
            best = Some((i + 1, delta));
        }
    }
    best.map_or(seq.len(), |(i, _)| i)
}

/// Builds the initial tour selected by `config`.
///
/// Random construction draws from a `ChaCha8Rng` seeded with `seed`, or 0.
pub fn construct<G>(oracle: &G, config: &ConstructionConfig, seed: Option<u64>) -> Result<ArrayTour>
where
    G: CostOracle + ?Sized,
{
    match *config {
        ConstructionConfig::FarthestInsertion { first_vertex } => {
            farthest_insertion(oracle, first_vertex)
        }
        ConstructionConfig::Random => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed.unwrap_or(0));
            let n = oracle.num_vertices();
            ArrayTour::hamiltonian(random_permutation(n, &mut rng), n)
        }
    }
}
