//! Cumulative time dimension.
//!
//! Tracks the service start time at every node of a route, narrows each
//! node's bounds by propagation along the route chain, and resolves the
//! final schedule.

mod cumul;
mod time_dimension;

pub use cumul::{CumulVar, Infeasible};
pub use time_dimension::{RouteSchedule, TimeDimension};
