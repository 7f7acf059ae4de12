//! Theta series construction and evaluation of the automorphic solution.
//!
//! Stage 1: theta series over a generated group
//! Stage 2: two-series solution with batched evaluation, binary output

pub mod io;
pub mod solution;
pub mod theta_series;
