//! Distance and travel time matrices.
//!
//! Provides a dense distance matrix and a per-period travel time matrix.

mod matrix;

pub use matrix::{DistanceMatrix, PeriodMatrix};
