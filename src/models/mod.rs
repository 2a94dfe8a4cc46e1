//! Domain model types for vehicle routing with time windows.
//!
//! Provides the core abstractions: stops with service durations and time
//! windows, the immutable problem snapshot a solve runs on, and the owned
//! solution value handed back to the caller.

mod problem;
mod route;
mod solution;
mod stop;

pub use problem::RoutingProblem;
pub use route::{RoutePlan, Visit};
pub use solution::{Solution, Violation};
pub use stop::{Stop, TimeWindow};
