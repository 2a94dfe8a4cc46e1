//! Search states and run statistics.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Phase of the search engine.
///
/// ```text
/// Building ──► InitialFound ──► Improving ──► Converged
///     │                             │
///     ▼                             ▼
/// Infeasible                    Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchState {
    #[default]
    Building,
    InitialFound,
    /// Some stop has no feasible insertion in any vehicle.
    Infeasible,
    Improving,
    /// No improving move left, or the evaluation/time budget ran out.
    Converged,
    /// The caller's cancellation token was set.
    Cancelled,
}

impl SearchState {
    /// Returns `true` once the engine will make no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Infeasible | Self::Converged | Self::Cancelled)
    }
}

/// Counters collected during one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Candidate moves scored by local search.
    pub evaluations: u64,
    /// Improving moves applied.
    pub accepted_moves: u64,
    /// Local-search iterations started.
    pub iterations: u64,
    pub final_state: SearchState,
    pub elapsed: Duration,
}
