//! # tw-routing
//!
//! Vehicle routing with time windows over a fleet of identical vehicles
//! sharing one depot. Elapsed time is tracked as a cumulative dimension
//! along each route, with bounded waiting and a maximum route span.
//!
//! ## Modules
//!
//! - [`config`] — Solver configuration, presets, and cancellation token
//! - [`error`] — Input validation and solver invariant errors
//! - [`models`] — Stops, time windows, problem snapshots, solutions
//! - [`distance`] — Integer travel cost matrix
//! - [`graph`] — Mapping between stops and per-vehicle search nodes
//! - [`dimension`] — Cumulative time bounds, propagation, and schedule resolution
//! - [`constructive`] — First-solution heuristics (cheapest insertion, path cheapest arc)
//! - [`local_search`] — Improvement operators (relocate, exchange, 2-opt, or-opt)
//! - [`search`] — Search engine, states, and budget monitor
//! - [`extraction`] — Reading routes and visit times off an assignment
//! - [`solver`] — The [`solve`] entry point
//!
//! ## Example
//!
//! ```
//! use tw_routing::{solve, RoutingProblem, SolveOutcome, SolverConfig};
//!
//! let problem = RoutingProblem::from_rows(
//!     vec![
//!         vec![0, 12, 20],
//!         vec![12, 0, 9],
//!         vec![20, 9, 0],
//!     ],
//!     vec![(0, 1440), (600, 700), (610, 720)],
//!     vec![0, 15, 15],
//!     2,
//!     0,
//! )?;
//!
//! match solve(&problem, &SolverConfig::default())? {
//!     SolveOutcome::Solved(solution) => {
//!         for (vehicle, plan) in solution.routes().iter().enumerate() {
//!             println!("vehicle {vehicle}: {:?}", plan.stop_ids());
//!         }
//!         assert_eq!(solution.num_served(), 2);
//!     }
//!     SolveOutcome::NoSolution(reason) => panic!("{reason:?}"),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod constructive;
pub mod dimension;
pub mod distance;
pub mod error;
pub mod extraction;
pub mod graph;
pub mod local_search;
pub mod models;
pub mod search;
pub mod solver;

pub use config::{CancellationToken, FirstSolutionStrategy, SolverConfig, TotalTimeMode};
pub use error::{InvalidProblemError, SolveError};
pub use models::{RoutePlan, RoutingProblem, Solution, Visit};
pub use solver::{solve, solve_cancellable, NoSolutionReason, SolveOutcome};
