//! End-to-end solve pipelines for TSP and GTSP instances.

use tracing::{info, warn};

use tourforge_config::{SolverConfig, TourRepresentation, TwoOptConfig};
use tourforge_core::validate::check_distinct_in_range;
use tourforge_core::{
    ArrayTour, Cost, CostOracle, CyclicTour, GeneralizedTour, LinkedTour, Result, TourForgeError,
};

use crate::cluster_opt::ClusterOptimizer;
use crate::construction::construct;
use crate::stats::SolverStats;
use crate::two_opt::{PriorityTwoOpt, TwoOptOutcome};

/// Result of [`solve_tsp`].
#[derive(Debug, Clone)]
pub struct TspSolution<C> {
    /// Final tour, walked from its depot.
    pub tour: Vec<usize>,
    pub initial_cost: C,
    pub cost: C,
    pub outcome: TwoOptOutcome<C>,
    pub stats: SolverStats,
}

/// Result of [`solve_gtsp`].
#[derive(Debug, Clone)]
pub struct GtspSolution<C> {
    /// One representative vertex per cluster, in visiting order.
    pub tour: Vec<usize>,
    /// Cluster visited at every rank of `tour`.
    pub cluster_order: Vec<usize>,
    pub initial_cost: C,
    pub cost: C,
    /// Completed rounds of cluster optimization followed by 2-opt.
    pub rounds: usize,
    pub stats: SolverStats,
}

/// Constructs a tour and improves it with priority 2-opt.
///
/// # Example
///
/// ```
/// use tourforge_config::SolverConfig;
/// use tourforge_core::{Norm, PointGraph};
/// use tourforge_solver::solve_tsp;
///
/// let g = PointGraph::<f64>::from_points(
///     &[[0.0, 0.0], [1.0, 1.0], [1.0, 0.0], [0.0, 1.0]],
///     Norm::Euclidean,
/// )
/// .unwrap();
///
/// let solution = solve_tsp(&g, &SolverConfig::default()).unwrap();
/// assert_eq!(solution.tour.len(), 4);
/// assert!((solution.cost - 4.0).abs() < 1e-9);
/// ```
pub fn solve_tsp<G>(oracle: &G, config: &SolverConfig) -> Result<TspSolution<G::Cost>>
where
    G: CostOracle + ?Sized,
{
    let mut stats = SolverStats::default();
    stats.start();

    let mut tour = construct(oracle, &config.construction, config.random_seed)?;
    let initial_cost = tour.cost(oracle);
    info!(
        event = "tsp_start",
        vertices = oracle.num_vertices() as u64,
        initial_cost = %initial_cost,
    );

    let (outcome, seq) = run_two_opt(&mut tour, oracle, &config.two_opt, &mut stats)?;
    let tour = ArrayTour::hamiltonian(seq, oracle.num_vertices())?;
    let cost = tour.cost(oracle);
    check_bookkeeping(initial_cost, outcome.improvement(), cost);

    info!(
        event = "tsp_end",
        initial_cost = %initial_cost,
        cost = %cost,
        moves = outcome.num_moves() as u64,
        duration_ms = stats.elapsed().as_millis() as u64,
    );
    Ok(TspSolution {
        tour: tour.to_sequence(),
        initial_cost,
        cost,
        outcome,
        stats,
    })
}

/// Alternates cluster optimization and 2-opt over a GTSP tour.
///
/// The initial tour visits the clusters in `cluster_order`, taking the
/// first member of each. Every round re-selects the representatives for the
/// current order, then 2-opt reorders them when there are at least four
/// clusters. Rounds stop when one fails to lower the cost or after
/// `max_rounds`.
///
/// # Errors
///
/// `InvalidArgument` if `oracle` is unclustered, and a construction error if
/// `cluster_order` is not a permutation of the cluster IDs.
pub fn solve_gtsp<G>(
    oracle: &G,
    cluster_order: &[usize],
    config: &SolverConfig,
) -> Result<GtspSolution<G::Cost>>
where
    G: CostOracle + ?Sized,
{
    let clustering = oracle
        .clustering()
        .cloned()
        .ok_or_else(|| TourForgeError::invalid_argument("GTSP solve requires a clustered graph"))?;
    check_distinct_in_range(
        cluster_order,
        clustering.num_clusters(),
        "cluster order",
        "cluster",
    )?;

    let mut stats = SolverStats::default();
    stats.start();

    let seq = cluster_order
        .iter()
        .map(|&c| clustering.members(c)[0])
        .collect();
    let mut gtour = GeneralizedTour::from_permutation(seq, clustering)?;
    let initial_cost = gtour.eval_cost(oracle)?;
    info!(
        event = "gtsp_start",
        clusters = gtour.len() as u64,
        initial_cost = %initial_cost,
    );

    let options = &config.cluster_optimization;
    let mut optimizer = ClusterOptimizer::new();
    let mut cost = initial_cost;
    let mut rounds = 0;
    while rounds < options.max_rounds {
        optimizer.improve(&mut gtour, oracle, options.cut_cluster)?;

        if gtour.len() >= 4 {
            let (_, seq) = run_two_opt(gtour.tour_mut(), oracle, &config.two_opt, &mut stats)?;
            *gtour.tour_mut() = ArrayTour::partial(seq, oracle.num_vertices())?;
            gtour.refresh_cluster_sequence()?;
        }

        let round_cost = gtour.eval_cost(oracle)?;
        rounds += 1;
        info!(
            event = "gtsp_round",
            round = rounds as u64,
            cost = %round_cost,
        );
        if !(round_cost < cost) {
            break;
        }
        cost = round_cost;
    }
    stats.absorb(optimizer.stats());

    info!(
        event = "gtsp_end",
        initial_cost = %initial_cost,
        cost = %cost,
        rounds = rounds as u64,
        duration_ms = stats.elapsed().as_millis() as u64,
    );
    Ok(GtspSolution {
        tour: gtour.tour().as_slice().to_vec(),
        cluster_order: gtour.cluster_sequence().to_vec(),
        initial_cost,
        cost,
        rounds,
        stats,
    })
}

// Runs 2-opt on the configured representation; returns the outcome and
// the resulting vertex sequence.
fn run_two_opt<G>(
    tour: &mut ArrayTour,
    oracle: &G,
    config: &TwoOptConfig,
    stats: &mut SolverStats,
) -> Result<(TwoOptOutcome<G::Cost>, Vec<usize>)>
where
    G: CostOracle + ?Sized,
{
    if tour.len() < 4 {
        warn!(
            vertices = tour.len() as u64,
            "tour too short for 2-opt; keeping construction"
        );
        return Ok((TwoOptOutcome::new(), tour.as_slice().to_vec()));
    }

    match config.representation {
        TourRepresentation::Array => {
            let mut engine = PriorityTwoOpt::new(&mut *tour, oracle)?;
            let outcome = engine.solve(config.max_sweeps, config.improvement)?;
            stats.absorb(engine.stats());
            Ok((outcome, tour.as_slice().to_vec()))
        }
        TourRepresentation::Linked => {
            let mut linked = LinkedTour::from(&*tour);
            let mut engine = PriorityTwoOpt::new(&mut linked, oracle)?;
            let outcome = engine.solve(config.max_sweeps, config.improvement)?;
            stats.absorb(engine.stats());
            Ok((outcome, linked.to_sequence()))
        }
    }
}

fn check_bookkeeping<C: Cost>(initial: C, improvement: C, cost: C) {
    let expected = (initial - improvement).to_f64().unwrap_or(f64::NAN);
    let actual = cost.to_f64().unwrap_or(f64::NAN);
    let tolerance = 1e-6 * expected.abs().max(1.0);
    if !((expected - actual).abs() <= tolerance) {
        warn!(
            initial = %initial,
            improvement = %improvement,
            cost = %cost,
            "tour cost disagrees with the accumulated 2-opt improvement"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tourforge_config::{ConstructionConfig, ImprovementMode};
    use tourforge_core::{eval_tour, Clustering, MatrixGraph, Norm, PointGraph};
    use tourforge_test::assert_cost_eq;
    use tourforge_test::gtsp::{gtsp_graph, GTSP_OPTIMAL, GTSP_OPTIMAL_COST, GTSP_ORDER};
    use tourforge_test::nine_point::{nine_point_graph, NINE_POINT_OPTIMAL_COST};

    use super::*;

    #[test]
    fn test_solve_tsp_both_representations() {
        let g = nine_point_graph();
        let mut costs = Vec::new();
        for representation in [TourRepresentation::Array, TourRepresentation::Linked] {
            let config = SolverConfig::new()
                .with_max_sweeps(100)
                .with_representation(representation);
            let solution = solve_tsp(&g, &config).unwrap();

            let tour = ArrayTour::new(solution.tour.clone()).unwrap();
            assert!(tour.is_hamiltonian());
            assert_cost_eq(eval_tour(&tour, &g), solution.cost);
            assert_cost_eq(
                solution.initial_cost - solution.outcome.improvement(),
                solution.cost,
            );
            assert!(solution.outcome.confirmed_two_opt());
            assert!(solution.cost >= NINE_POINT_OPTIMAL_COST - 1e-9);
            costs.push(solution.cost);
        }
        assert_cost_eq(costs[0], costs[1]);
    }

    #[test]
    fn test_solve_tsp_random_construction() {
        let g = nine_point_graph();
        let config = SolverConfig::new()
            .with_random_seed(11)
            .with_construction(ConstructionConfig::Random)
            .with_improvement(ImprovementMode::Best)
            .with_max_sweeps(100);

        let first = solve_tsp(&g, &config).unwrap();
        let second = solve_tsp(&g, &config).unwrap();

        assert_eq!(first.tour, second.tour);
        assert!(first.cost <= first.initial_cost);
    }

    #[test]
    fn test_solve_tsp_small_instance() {
        let g = MatrixGraph::new(3, vec![0, 1, 2, 1, 0, 3, 2, 3, 0], true).unwrap();
        let solution = solve_tsp(&g, &SolverConfig::default()).unwrap();

        assert_eq!(solution.cost, 6);
        assert_eq!(solution.outcome.num_sweeps(), 0);
    }

    #[test]
    fn test_solve_gtsp() {
        let g = gtsp_graph();
        let solution = solve_gtsp(&g, &GTSP_ORDER, &SolverConfig::default()).unwrap();

        assert_cost_eq(solution.initial_cost, 25.539155827344672);
        assert_cost_eq(solution.cost, GTSP_OPTIMAL_COST);
        assert_eq!(solution.rounds, 2);
        assert_eq!(solution.tour.len(), 6);
        assert_eq!(solution.stats.dp_solves, 2);

        let clustering = g.clustering().unwrap();
        for (&v, &c) in solution.tour.iter().zip(&solution.cluster_order) {
            assert_eq!(clustering.cluster_id(v), c);
        }
    }

    #[test]
    fn test_solve_gtsp_single_round_without_two_opt() {
        let g = gtsp_graph();
        let mut config = SolverConfig::new().with_max_sweeps(0);
        config.cluster_optimization.max_rounds = 1;

        let solution = solve_gtsp(&g, &GTSP_ORDER, &config).unwrap();

        assert_eq!(solution.rounds, 1);
        assert_eq!(solution.tour, GTSP_OPTIMAL);
        assert_eq!(solution.cluster_order, GTSP_ORDER);
        assert_cost_eq(solution.cost, GTSP_OPTIMAL_COST);
    }

    #[test]
    fn test_solve_gtsp_rejects_unclustered_graph() {
        let g = nine_point_graph();
        assert!(matches!(
            solve_gtsp(&g, &[0, 1], &SolverConfig::default()),
            Err(TourForgeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_solve_gtsp_rejects_bad_order() {
        let clustering = Arc::new(Clustering::from_sizes(&[1, 1, 1]).unwrap());
        let g = PointGraph::<f64>::from_points(&[[0.0], [1.0], [2.0]], Norm::Euclidean)
            .unwrap()
            .with_clustering(clustering)
            .unwrap();
        let config = SolverConfig::default();

        assert!(matches!(
            solve_gtsp(&g, &[0, 1, 1], &config),
            Err(TourForgeError::Duplicate { .. })
        ));
        assert!(matches!(
            solve_gtsp(&g, &[0, 3, 1], &config),
            Err(TourForgeError::OutOfRange { .. })
        ));
        assert!(matches!(
            solve_gtsp(&g, &[0, 1], &config),
            Err(TourForgeError::LengthMismatch { .. })
        ));
    }
}
