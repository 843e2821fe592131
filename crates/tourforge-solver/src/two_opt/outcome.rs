//! Accumulated result of repeated 2-opt sweeps.

use tourforge_core::{Cost, Result, TourForgeError};

/// Total improvement and move count across sweeps.
///
/// A sweep that finds no move confirms the tour is 2-optimal; no sweep may
/// be recorded after that.
///
/// # Example
///
/// ```
/// use tourforge_solver::TwoOptOutcome;
///
/// let mut outcome = TwoOptOutcome::new();
/// outcome.record_sweep(7, 2).unwrap();
/// outcome.record_sweep(0, 0).unwrap();
///
/// assert_eq!(outcome.improvement(), 7);
/// assert_eq!(outcome.num_moves(), 2);
/// assert_eq!(outcome.num_sweeps(), 2);
/// assert!(outcome.confirmed_two_opt());
/// assert!(outcome.record_sweep(1, 1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoOptOutcome<C> {
    improvement: C,
    moves: usize,
    sweeps: usize,
    two_optimal: bool,
}

impl<C: Cost> TwoOptOutcome<C> {
    pub fn new() -> Self {
        Self {
            improvement: C::zero(),
            moves: 0,
            sweeps: 0,
            two_optimal: false,
        }
    }

    /// Adds one sweep's result.
    ///
    /// # Errors
    ///
    /// `Internal` if the sweep claims moves without a strictly positive
    /// improvement, an improvement without moves, or follows a sweep that
    /// already confirmed 2-optimality.
    pub fn record_sweep(&mut self, improvement: C, moves: usize) -> Result<()> {
        if self.two_optimal {
            return Err(TourForgeError::internal(
                "sweep recorded after the tour was confirmed 2-optimal",
            ));
        }
        if moves == 0 && improvement != C::zero() {
            return Err(TourForgeError::internal(format!(
                "sweep reports improvement {improvement} without any move"
            )));
        }
        if moves > 0 && !(improvement > C::zero()) {
            return Err(TourForgeError::internal(format!(
                "sweep reports {moves} moves but improvement {improvement}"
            )));
        }

        self.improvement = self.improvement + improvement;
        self.moves += moves;
        self.sweeps += 1;
        self.two_optimal = moves == 0;
        Ok(())
    }

    /// Total cost reduction.
    pub fn improvement(&self) -> C {
        self.improvement
    }

    pub fn num_moves(&self) -> usize {
        self.moves
    }

    pub fn num_sweeps(&self) -> usize {
        self.sweeps
    }

    /// Whether the last sweep found no improving move.
    pub fn confirmed_two_opt(&self) -> bool {
        self.two_optimal
    }
}

impl<C: Cost> Default for TwoOptOutcome<C> {
    fn default() -> Self {
        Self::new()
    }
}
