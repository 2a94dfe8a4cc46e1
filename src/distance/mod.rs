//! Travel cost matrices.
//!
//! Provides a dense, integer travel cost matrix for routing problems.

mod matrix;

pub use matrix::CostMatrix;
