//! Priority-scheduled 2-opt sweeps.

use std::cmp::Ordering;

use num_traits::Zero;
use tracing::{debug, info, warn};

use tourforge_config::ImprovementMode;
use tourforge_core::{CostOracle, CyclicTour, Result, TourForgeError};

use super::{find_two_opt_move, TwoOptOutcome};
use crate::stats::SolverStats;

/// Drives a tour to 2-optimality with prioritized sweeps.
///
/// Each sweep orders the tour's vertices by the cost of their outgoing edge,
/// most expensive first, and scans a 2-opt move for each. Both endpoints of
/// an applied move are skipped for the rest of the sweep. Sweeps repeat
/// until one finds no move or the sweep budget runs out.
///
/// The priority list and skip bitmap are allocated once and reused.
///
/// # Example
///
/// ```
/// use tourforge_config::ImprovementMode;
/// use tourforge_core::{eval_tour, LinkedTour, Norm, PointGraph};
/// use tourforge_solver::PriorityTwoOpt;
///
/// let g = PointGraph::from_points(
///     &[[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0], [0.0, -1.0]],
///     Norm::Euclidean,
/// )
/// .unwrap();
/// let mut tour = LinkedTour::new(vec![2, 0, 3, 1]).unwrap();
///
/// let outcome = PriorityTwoOpt::new(&mut tour, &g)
///     .unwrap()
///     .solve(10, ImprovementMode::First)
///     .unwrap();
///
/// assert!(outcome.confirmed_two_opt());
/// assert!((eval_tour(&tour, &g) - 4.0 * 2f64.sqrt()).abs() < 1e-9);
/// ```
pub struct PriorityTwoOpt<'a, T, G>
where
    T: CyclicTour + ?Sized,
    G: CostOracle + ?Sized,
{
    tour: &'a mut T,
    oracle: &'a G,
    priority: Vec<(usize, G::Cost)>,
    skip: Vec<bool>,
    stats: SolverStats,
}

impl<'a, T, G> PriorityTwoOpt<'a, T, G>
where
    T: CyclicTour + ?Sized,
    G: CostOracle + ?Sized,
{
    /// Binds the engine to a tour and the oracle it is evaluated under.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the tour's vertex universe differs from the
    /// oracle's vertex count.
    pub fn new(tour: &'a mut T, oracle: &'a G) -> Result<Self> {
        if tour.max_len() != oracle.num_vertices() {
            return Err(TourForgeError::invalid_argument(format!(
                "tour is inconsistent with the graph: tour ranges over {} vertices, graph has {}",
                tour.max_len(),
                oracle.num_vertices()
            )));
        }
        let n = tour.len();
        Ok(Self {
            tour,
            oracle,
            priority: Vec::with_capacity(n),
            skip: vec![false; oracle.num_vertices()],
            stats: SolverStats::default(),
        })
    }

    /// Runs one sweep and returns its total improvement and move count.
    pub fn try_one_sweep(&mut self, mode: ImprovementMode) -> Result<(G::Cost, usize)> {
        self.rebuild_priority();
        self.skip.fill(false);

        let mut improvement = G::Cost::zero();
        let mut moves = 0;
        for &(a, _) in &self.priority {
            if self.skip[a] {
                continue;
            }
            self.stats.record_scan();
            let mv = find_two_opt_move(&*self.tour, a, self.oracle, mode)?;
            let Some(c) = mv.c.filter(|_| mv.is_valid()) else {
                continue;
            };

            self.skip[a] = true;
            self.skip[c] = true;
            self.tour.exchange_two_edges(a, c, true)?;
            improvement = improvement + mv.improvement;
            moves += 1;
            self.stats.record_move();
            debug!(a, c, improvement = %mv.improvement, "applied 2-opt move");
        }

        self.stats.record_sweep();
        Ok((improvement, moves))
    }

    /// Sweeps until no improving move is left or `max_sweeps` sweeps ran.
    pub fn solve(&mut self, max_sweeps: usize, mode: ImprovementMode) -> Result<TwoOptOutcome<G::Cost>> {
        let mut outcome = TwoOptOutcome::new();
        if max_sweeps == 0 {
            warn!("2-opt asked to run zero sweeps; tour left unchanged");
            return Ok(outcome);
        }

        self.stats.start();
        info!(
            event = "two_opt_start",
            vertices = self.tour.len() as u64,
            max_sweeps = max_sweeps as u64,
            mode = ?mode,
        );

        for sweep in 0..max_sweeps {
            let (improvement, moves) = self.try_one_sweep(mode)?;
            outcome.record_sweep(improvement, moves)?;
            info!(
                event = "sweep_end",
                sweep = sweep as u64,
                moves = moves as u64,
                improvement = %improvement,
            );
            if outcome.confirmed_two_opt() {
                break;
            }
        }

        info!(
            event = "two_opt_end",
            sweeps = outcome.num_sweeps() as u64,
            moves = outcome.num_moves() as u64,
            improvement = %outcome.improvement(),
            two_optimal = outcome.confirmed_two_opt(),
            duration_ms = self.stats.elapsed().as_millis() as u64,
        );
        Ok(outcome)
    }

    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    // Vertices in descending order of outgoing edge cost; ties keep tour order.
    fn rebuild_priority(&mut self) {
        self.priority.clear();
        let depot = self.tour.depot();
        let mut walk = self.tour.walk_from(depot).peekable();
        while let Some(v) = walk.next() {
            let next = walk.peek().copied().unwrap_or(depot);
            self.priority.push((v, self.oracle.edge_cost(v, next)));
        }
        self.priority
            .sort_by(|x, y| y.1.partial_cmp(&x.1).unwrap_or(Ordering::Equal));
    }
}
