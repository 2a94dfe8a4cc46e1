//! Search over assignments: state, budgets, and the engine driving
//! construction and local search.

mod assignment;
mod engine;
mod monitor;
mod state;

pub use assignment::{Assignment, RouteChange};
pub use engine::{SearchEngine, SearchOutcome};
pub use monitor::{SearchCommand, SearchMonitor, TerminationReason};
pub use state::{SearchState, SearchStats};
