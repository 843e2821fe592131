//! TSPLIB file support for TourForge.
//!
//! - [`TsplibProblem`] - geometric TSP and GTSP instances
//! - [`TsplibTour`] - tour files, read and written

mod error;
mod problem;
mod tour;


pub use error::{Result, TsplibError};
pub use problem::{EdgeWeightType, ProblemType, TsplibProblem};
pub use tour::TsplibTour;
