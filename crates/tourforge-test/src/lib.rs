//! Shared test fixtures for TourForge crates.
//!
//! This crate provides small instances with known answers.
//!
//! - [`circle`] - four points on the unit circle with a crossing tour
//! - [`nine_point`] - nine-point instance with a known 2-optimal optimum
//! - [`gtsp`] - six-cluster GTSP instance with a known cluster optimum
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! tourforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use tourforge_test::nine_point::{nine_point_graph, NINE_POINT_START};
//! ```

pub mod circle;
pub mod gtsp;
pub mod nine_point;

/// Asserts two costs are equal up to floating-point noise.
#[track_caller]
pub fn assert_cost_eq(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "cost {actual} differs from expected {expected}"
    );
}
