//! Constructive heuristics for building the first feasible assignment.
//!
//! - [`cheapest_insertion`] — Global cheapest insertion over all vehicles and positions
//! - [`path_cheapest_arc`] — Per-vehicle path extension along the cheapest feasible arc

mod cheapest_insertion;
mod path_cheapest_arc;

pub use cheapest_insertion::cheapest_insertion;
pub use path_cheapest_arc::path_cheapest_arc;

use thiserror::Error;

/// Why construction stopped without routing every stop.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructionError {
    /// The stop has no feasible insertion in any vehicle.
    #[error("stop {stop} cannot be inserted into any route")]
    Unroutable { stop: usize },
    #[error("construction cancelled")]
    Cancelled,
}
