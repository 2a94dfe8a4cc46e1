//! Search engine: first solution, then local search until convergence.
//!
//! # State machine
//!
//! ```text
//! Building ─(all stops routed)─► InitialFound ─► Improving ─► Converged
//!    │                                               │
//!    ├─(some stop unroutable)─► Infeasible           └─(token set)─► Cancelled
//!    └─(token set)─► Cancelled
//! ```
//!
//! Each improving iteration asks the operators, in order, for their best
//! move and applies the first one found. The monitor is consulted at every
//! iteration boundary and before every candidate evaluation.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, instrument};

use super::{Assignment, SearchCommand, SearchMonitor, SearchState, SearchStats, TerminationReason};
use crate::config::{CancellationToken, FirstSolutionStrategy, SolverConfig};
use crate::constructive::{cheapest_insertion, path_cheapest_arc, ConstructionError};
use crate::dimension::TimeDimension;
use crate::local_search::Operator;

/// Result of a search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A feasible assignment: converged, or the best one found before
    /// cancellation.
    Found(Assignment),
    /// `stop` fits in no vehicle.
    Infeasible { stop: usize },
    /// Cancelled before any feasible assignment existed.
    Cancelled,
}

/// Drives one solve over a time dimension.
///
/// # Examples
///
/// ```
/// use tw_routing::config::SolverConfig;
/// use tw_routing::dimension::TimeDimension;
/// use tw_routing::graph::RouteGraph;
/// use tw_routing::models::RoutingProblem;
/// use tw_routing::search::{SearchEngine, SearchOutcome, SearchState};
///
/// let problem = RoutingProblem::from_rows(
///     vec![vec![0, 5, 9], vec![5, 0, 4], vec![9, 4, 0]],
///     vec![(0, 500), (0, 500), (0, 500)],
///     vec![0, 0, 0],
///     2,
///     0,
/// ).unwrap();
/// let graph = RouteGraph::new(3, 2, 0);
/// let config = SolverConfig::default();
/// let dimension = TimeDimension::new(&problem, &graph, &config);
///
/// let mut engine = SearchEngine::new(&dimension, &config, None);
/// let SearchOutcome::Found(assignment) = engine.run() else { panic!() };
/// assert_eq!(assignment.objective(), 18);
/// assert_eq!(engine.state(), SearchState::Converged);
/// ```
pub struct SearchEngine<'a> {
    dimension: &'a TimeDimension<'a>,
    config: &'a SolverConfig,
    monitor: SearchMonitor,
    operators: Vec<Operator>,
    state: SearchState,
    stats: SearchStats,
}

impl<'a> SearchEngine<'a> {
    pub fn new(
        dimension: &'a TimeDimension<'a>,
        config: &'a SolverConfig,
        cancel: Option<CancellationToken>,
    ) -> Self {
        let mut operators = Operator::ALL.to_vec();
        if let Some(seed) = config.seed {
            let mut rng = StdRng::seed_from_u64(seed);
            operators.shuffle(&mut rng);
        }
        Self {
            dimension,
            config,
            monitor: SearchMonitor::new(config, cancel),
            operators,
            state: SearchState::Building,
            stats: SearchStats::default(),
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Order in which operators are tried each iteration.
    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    /// Counters of the run so far.
    pub fn stats(&self) -> SearchStats {
        SearchStats {
            evaluations: self.monitor.evaluations(),
            final_state: self.state,
            elapsed: self.monitor.elapsed(),
            ..self.stats
        }
    }

    #[instrument(skip_all)]
    pub fn run(&mut self) -> SearchOutcome {
        let mut assignment = match self.build() {
            Ok(assignment) => assignment,
            Err(ConstructionError::Unroutable { stop }) => {
                self.state = SearchState::Infeasible;
                debug!(stop, "no feasible insertion");
                return SearchOutcome::Infeasible { stop };
            }
            Err(ConstructionError::Cancelled) => {
                self.state = SearchState::Cancelled;
                debug!("cancelled during construction");
                return SearchOutcome::Cancelled;
            }
        };

        self.state = SearchState::InitialFound;
        debug!(
            objective = assignment.objective(),
            strategy = ?self.config.first_solution,
            "first solution"
        );

        if self.config.local_search {
            self.improve(&mut assignment);
        } else {
            self.state = SearchState::Converged;
        }
        SearchOutcome::Found(assignment)
    }

    fn build(&mut self) -> Result<Assignment, ConstructionError> {
        if self.monitor.is_cancelled() {
            return Err(ConstructionError::Cancelled);
        }
        let problem = self.dimension.problem();
        let mut assignment = Assignment::empty(self.dimension)
            .map_err(|_| ConstructionError::Unroutable { stop: problem.depot() })?;
        match self.config.first_solution {
            FirstSolutionStrategy::CheapestInsertion => {
                let pending = problem.customer_ids().collect();
                cheapest_insertion(self.dimension, &mut assignment, pending, &self.monitor)?;
            }
            FirstSolutionStrategy::PathCheapestArc => {
                path_cheapest_arc(self.dimension, &mut assignment, &self.monitor)?;
            }
        }
        Ok(assignment)
    }

    #[instrument(skip_all)]
    fn improve(&mut self, assignment: &mut Assignment) {
        self.state = SearchState::Improving;
        loop {
            if let SearchCommand::Terminate(reason) = self.monitor.search_command() {
                self.state = match reason {
                    TerminationReason::Cancelled => SearchState::Cancelled,
                    TerminationReason::EvaluationBudget | TerminationReason::TimeLimit => {
                        SearchState::Converged
                    }
                };
                debug!(
                    ?reason,
                    evaluations = self.monitor.evaluations(),
                    objective = assignment.objective(),
                    "search stopped"
                );
                return;
            }

            self.stats.iterations += 1;
            let mut applied = false;
            for &operator in &self.operators {
                if let Some(mv) = operator.best_move(self.dimension, assignment, &mut self.monitor) {
                    debug!(operator = operator.name(), delta = mv.delta, "accepted move");
                    assignment.apply(mv.changes);
                    self.stats.accepted_moves += 1;
                    applied = true;
                    break;
                }
                if self.monitor.is_stopped() {
                    break;
                }
            }

            if !applied && !self.monitor.is_stopped() {
                self.state = SearchState::Converged;
                debug!(
                    iterations = self.stats.iterations,
                    objective = assignment.objective(),
                    "local optimum"
                );
                return;
            }
        }
    }
}
