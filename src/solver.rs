//! Top-level solve entry points.
//!
//! A solve validates the configuration against the problem, builds the
//! route graph and time dimension, runs the search engine, and extracts
//! the result. The problem is borrowed immutably for the whole run, so the
//! snapshot a solve works on cannot change underneath it.

use tracing::{info, instrument};

use crate::config::{CancellationToken, SolverConfig};
use crate::dimension::TimeDimension;
use crate::error::SolveError;
use crate::extraction::SolutionExtractor;
use crate::graph::RouteGraph;
use crate::models::{RoutingProblem, Solution};
use crate::search::{SearchEngine, SearchOutcome};

/// Why a solve ended without a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoSolutionReason {
    /// `stop` cannot be served by any vehicle.
    Infeasible { stop: usize },
    /// Cancelled before a feasible assignment was found.
    Cancelled,
}

/// Result of a solve that got past input validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    Solved(Solution),
    NoSolution(NoSolutionReason),
}

impl SolveOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Self::Solved(solution) => Some(solution),
            Self::NoSolution(_) => None,
        }
    }

    pub fn into_solution(self) -> Option<Solution> {
        match self {
            Self::Solved(solution) => Some(solution),
            Self::NoSolution(_) => None,
        }
    }
}

/// Solves `problem` to a local optimum within the configured budget.
///
/// # Errors
///
/// Returns [`SolveError::InvalidProblem`] if the configuration is invalid or
/// a time window, service time or travel cost extends past the horizon, and
/// [`SolveError::InternalInvariantViolation`] if the extracted solution
/// fails its own consistency checks.
///
/// # Examples
///
/// ```
/// use tw_routing::config::SolverConfig;
/// use tw_routing::models::RoutingProblem;
/// use tw_routing::solve;
///
/// let problem = RoutingProblem::from_rows(
///     vec![
///         vec![0, 10, 15],
///         vec![10, 0, 8],
///         vec![15, 8, 0],
///     ],
///     vec![(0, 1000), (100, 160), (120, 200)],
///     vec![0, 10, 10],
///     2,
///     0,
/// ).unwrap();
///
/// let outcome = solve(&problem, &SolverConfig::default()).unwrap();
/// let solution = outcome.solution().unwrap();
/// assert_eq!(solution.num_served(), 2);
/// assert!(solution.validate(&problem, &SolverConfig::default()).is_empty());
/// ```
pub fn solve(problem: &RoutingProblem, config: &SolverConfig) -> Result<SolveOutcome, SolveError> {
    run(problem, config, None)
}

/// Like [`solve`], stopping early once `cancel` is set.
///
/// A run cancelled after its first solution still returns that solution
/// (or a better one), with `SearchState::Cancelled` in its statistics.
pub fn solve_cancellable(
    problem: &RoutingProblem,
    config: &SolverConfig,
    cancel: &CancellationToken,
) -> Result<SolveOutcome, SolveError> {
    run(problem, config, Some(cancel.clone()))
}

#[instrument(skip_all)]
fn run(
    problem: &RoutingProblem,
    config: &SolverConfig,
    cancel: Option<CancellationToken>,
) -> Result<SolveOutcome, SolveError> {
    config.validate()?;
    problem.check_horizon(config.horizon)?;
    info!(
        stops = problem.num_stops(),
        vehicles = problem.num_vehicles(),
        "solve started"
    );

    let graph = RouteGraph::new(problem.num_stops(), problem.num_vehicles(), problem.depot());
    let dimension = TimeDimension::new(problem, &graph, config);
    let mut engine = SearchEngine::new(&dimension, config, cancel);
    let outcome = engine.run();
    let stats = engine.stats();

    let assignment = match outcome {
        SearchOutcome::Found(assignment) => assignment,
        SearchOutcome::Infeasible { stop } => {
            info!(stop, "no solution, stop cannot be routed");
            return Ok(SolveOutcome::NoSolution(NoSolutionReason::Infeasible { stop }));
        }
        SearchOutcome::Cancelled => {
            info!("no solution, cancelled");
            return Ok(SolveOutcome::NoSolution(NoSolutionReason::Cancelled));
        }
    };

    assignment.check_partition(problem)?;
    let solution = SolutionExtractor::new(&graph, problem, config)
        .extract(&assignment)
        .with_stats(stats);
    let violations = solution.validate(problem, config);
    if !violations.is_empty() {
        return Err(SolveError::InternalInvariantViolation(format!(
            "extracted solution is inconsistent: {violations:?}"
        )));
    }

    info!(
        status = ?stats.final_state,
        objective = solution.objective_value(),
        total_time = solution.total_time(),
        vehicles_used = solution.num_used_vehicles(),
        evaluations = stats.evaluations,
        "solve finished"
    );
    Ok(SolveOutcome::Solved(solution))
}
