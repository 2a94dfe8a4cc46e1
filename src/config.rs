//! Solver configuration.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::InvalidProblemError;

/// Heuristic used to build the first feasible assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FirstSolutionStrategy {
    /// Repeatedly inserts the unrouted stop with the cheapest feasible
    /// insertion over all vehicles and positions.
    #[default]
    CheapestInsertion,
    /// Extends each vehicle's path with the cheapest feasible next stop,
    /// one vehicle at a time.
    PathCheapestArc,
}

/// How per-vehicle end times are aggregated into `total_time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TotalTimeMode {
    #[default]
    Sum,
    Max,
}

/// Configuration surface of a solve.
///
/// # Examples
///
/// ```
/// use tw_routing::config::{FirstSolutionStrategy, SolverConfig};
///
/// let config = SolverConfig::default()
///     .with_horizon(2000)
///     .with_first_solution(FirstSolutionStrategy::PathCheapestArc)
///     .with_seed(7);
/// assert_eq!(config.waiting_slack, 30);
/// assert_eq!(config.max_span, 1260);
/// assert_eq!(config.horizon, 2000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Maximum waiting time allowed before each node.
    pub waiting_slack: i64,
    /// Maximum time between a vehicle's start and end.
    pub max_span: i64,
    /// Upper bound of every cumulative time value.
    pub horizon: i64,
    pub first_solution: FirstSolutionStrategy,
    /// Run local search after construction.
    pub local_search: bool,
    /// Number of candidate move evaluations local search may spend.
    pub max_evaluations: u64,
    /// Wall-clock budget of the local search phase.
    pub time_limit: Option<Duration>,
    /// Seed for shuffling the neighborhood order. `None` keeps the fixed order.
    pub seed: Option<u64>,
    /// Weight of the per-vehicle span term added to the arc cost objective.
    pub span_cost_coefficient: i64,
    pub total_time: TotalTimeMode,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            waiting_slack: 30,
            max_span: 1260,
            horizon: 1440,
            first_solution: FirstSolutionStrategy::default(),
            local_search: true,
            max_evaluations: 100_000,
            time_limit: None,
            seed: None,
            span_cost_coefficient: 0,
            total_time: TotalTimeMode::default(),
        }
    }
}

impl SolverConfig {
    /// Small budget for interactive use.
    pub fn fast() -> Self {
        Self {
            max_evaluations: 5_000,
            time_limit: Some(Duration::from_secs(1)),
            ..Self::default()
        }
    }

    /// Large budget for offline planning.
    pub fn thorough() -> Self {
        Self {
            max_evaluations: 2_000_000,
            time_limit: Some(Duration::from_secs(60)),
            ..Self::default()
        }
    }

    pub fn with_waiting_slack(mut self, slack: i64) -> Self {
        self.waiting_slack = slack;
        self
    }

    pub fn with_max_span(mut self, span: i64) -> Self {
        self.max_span = span;
        self
    }

    pub fn with_horizon(mut self, horizon: i64) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_first_solution(mut self, strategy: FirstSolutionStrategy) -> Self {
        self.first_solution = strategy;
        self
    }

    pub fn with_local_search(mut self, enabled: bool) -> Self {
        self.local_search = enabled;
        self
    }

    pub fn with_max_evaluations(mut self, budget: u64) -> Self {
        self.max_evaluations = budget;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_span_cost_coefficient(mut self, coefficient: i64) -> Self {
        self.span_cost_coefficient = coefficient;
        self
    }

    pub fn with_total_time(mut self, mode: TotalTimeMode) -> Self {
        self.total_time = mode;
        self
    }

    /// Checks the numeric fields.
    pub fn validate(&self) -> Result<(), InvalidProblemError> {
        let checks = [
            ("waiting_slack", self.waiting_slack, self.waiting_slack >= 0),
            ("max_span", self.max_span, self.max_span >= 0),
            ("horizon", self.horizon, self.horizon > 0),
            (
                "span_cost_coefficient",
                self.span_cost_coefficient,
                self.span_cost_coefficient >= 0,
            ),
        ];
        for (field, value, ok) in checks {
            if !ok {
                return Err(InvalidProblemError::InvalidConfig { field, value });
            }
        }
        Ok(())
    }
}

/// Shared flag a caller sets to stop a running solve.
///
/// The search polls it between local-search iterations and returns the best
/// assignment found so far.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
