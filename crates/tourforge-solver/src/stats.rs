//! Solver statistics.
//!
//! Plain counters for local search and cluster optimization runs.

use std::time::{Duration, Instant};

/// Solver-level statistics.
///
/// Tracks aggregate metrics across 2-opt sweeps and dynamic programs.
///
/// # Example
///
/// ```
/// use tourforge_solver::stats::SolverStats;
///
/// let mut stats = SolverStats::default();
/// stats.start();
/// stats.record_scan();
/// stats.record_scan();
/// stats.record_move();
/// stats.record_sweep();
///
/// assert_eq!(stats.scans, 2);
/// assert_eq!(stats.moves_applied, 1);
/// assert_eq!(stats.sweeps, 1);
/// assert_eq!(stats.acceptance_rate(), 0.5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SolverStats {
    start_time: Option<Instant>,
    /// Completed 2-opt sweeps.
    pub sweeps: u64,
    /// 2-opt neighbourhood scans, one per vertex A examined.
    pub scans: u64,
    /// Improving moves applied to the tour.
    pub moves_applied: u64,
    /// Cluster optimization solves.
    pub dp_solves: u64,
}

impl SolverStats {
    /// Marks the start of solving.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Returns the elapsed time since solving started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    pub fn record_sweep(&mut self) {
        self.sweeps += 1;
    }

    pub fn record_scan(&mut self) {
        self.scans += 1;
    }

    pub fn record_move(&mut self) {
        self.moves_applied += 1;
    }

    pub fn record_dp_solve(&mut self) {
        self.dp_solves += 1;
    }

    /// Adds the counters of `other`, keeping this run's start time.
    pub fn absorb(&mut self, other: &SolverStats) {
        self.sweeps += other.sweeps;
        self.scans += other.scans;
        self.moves_applied += other.moves_applied;
        self.dp_solves += other.dp_solves;
    }

    /// Returns the fraction of scans that produced a move.
    pub fn acceptance_rate(&self) -> f64 {
        if self.scans == 0 {
            0.0
        } else {
            self.moves_applied as f64 / self.scans as f64
        }
    }
}
