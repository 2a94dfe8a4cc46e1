//! Budget and cancellation monitor for the local search.
//!
//! Counts candidate evaluations against the configured budget, checks the
//! wall clock every `clock_check_mask + 1` evaluations, and watches the
//! caller's cancellation token.

use std::time::{Duration, Instant};

use crate::config::{CancellationToken, SolverConfig};

/// Why the search stopped before running out of improving moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    EvaluationBudget,
    TimeLimit,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchCommand {
    Continue,
    Terminate(TerminationReason),
}

#[derive(Debug, Clone)]
pub struct SearchMonitor {
    max_evaluations: u64,
    evaluations: u64,
    time_limit: Option<Duration>,
    start_time: Instant,
    clock_check_mask: u64,
    cancel: Option<CancellationToken>,
    stopped: Option<TerminationReason>,
}

impl SearchMonitor {
    /// Check the clock every 256 evaluations.
    const DEFAULT_CLOCK_CHECK_MASK: u64 = 0xFF;

    pub fn new(config: &SolverConfig, cancel: Option<CancellationToken>) -> Self {
        Self {
            max_evaluations: config.max_evaluations,
            evaluations: 0,
            time_limit: config.time_limit,
            start_time: Instant::now(),
            clock_check_mask: Self::DEFAULT_CLOCK_CHECK_MASK,
            cancel,
            stopped: None,
        }
    }

    pub fn with_clock_check_mask(mut self, mask: u64) -> Self {
        self.clock_check_mask = mask;
        self
    }

    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }

    /// Returns `true` once any budget has been hit.
    pub fn is_stopped(&self) -> bool {
        self.stopped.is_some()
    }

    /// Claims one candidate evaluation. Returns `false` if the budget is
    /// spent, in which case the caller must not evaluate.
    pub fn try_evaluate(&mut self) -> bool {
        if self.stopped.is_some() {
            return false;
        }
        if self.evaluations >= self.max_evaluations {
            self.stopped = Some(TerminationReason::EvaluationBudget);
            return false;
        }
        self.evaluations += 1;
        if self.evaluations & self.clock_check_mask == 0 {
            self.stopped = self.check_limits();
        }
        true
    }

    /// Decision taken at each iteration boundary.
    pub fn search_command(&mut self) -> SearchCommand {
        if self.stopped.is_none() {
            self.stopped = self.check_limits();
        }
        if self.stopped.is_none() && self.evaluations >= self.max_evaluations {
            self.stopped = Some(TerminationReason::EvaluationBudget);
        }
        match self.stopped {
            Some(reason) => SearchCommand::Terminate(reason),
            None => SearchCommand::Continue,
        }
    }

    fn check_limits(&self) -> Option<TerminationReason> {
        if self.is_cancelled() {
            return Some(TerminationReason::Cancelled);
        }
        match self.time_limit {
            Some(limit) if self.start_time.elapsed() >= limit => Some(TerminationReason::TimeLimit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluation_budget() {
        let config = SolverConfig::default().with_max_evaluations(3);
        let mut monitor = SearchMonitor::new(&config, None);
        assert!(monitor.try_evaluate());
        assert!(monitor.try_evaluate());
        assert!(monitor.try_evaluate());
        assert!(!monitor.try_evaluate());
        assert_eq!(monitor.evaluations(), 3);
        assert!(monitor.is_stopped());
        assert_eq!(
            monitor.search_command(),
            SearchCommand::Terminate(TerminationReason::EvaluationBudget)
        );
    }

    #[test]
    fn test_exhausted_budget_stops_at_boundary() {
        let config = SolverConfig::default().with_max_evaluations(0);
        let mut monitor = SearchMonitor::new(&config, None);
        assert_eq!(
            monitor.search_command(),
            SearchCommand::Terminate(TerminationReason::EvaluationBudget)
        );
    }

    #[test]
    fn test_continue_without_limits() {
        let config = SolverConfig::default();
        let mut monitor = SearchMonitor::new(&config, None);
        assert_eq!(monitor.search_command(), SearchCommand::Continue);
        assert!(!monitor.is_cancelled());
    }

    #[test]
    fn test_cancellation_seen_at_boundary() {
        let token = CancellationToken::new();
        let config = SolverConfig::default();
        let mut monitor = SearchMonitor::new(&config, Some(token.clone()));
        assert_eq!(monitor.search_command(), SearchCommand::Continue);
        token.cancel();
        assert!(monitor.is_cancelled());
        assert_eq!(
            monitor.search_command(),
            SearchCommand::Terminate(TerminationReason::Cancelled)
        );
    }

    #[test]
    fn test_cancellation_seen_between_evaluations() {
        let token = CancellationToken::new();
        let config = SolverConfig::default();
        let mut monitor = SearchMonitor::new(&config, Some(token.clone())).with_clock_check_mask(0);
        assert!(monitor.try_evaluate());
        token.cancel();
        // the evaluation that observes the flag still runs
        assert!(monitor.try_evaluate());
        assert!(!monitor.try_evaluate());
    }

    #[test]
    fn test_time_limit() {
        let config = SolverConfig::default().with_time_limit(Duration::ZERO);
        let mut monitor = SearchMonitor::new(&config, None);
        assert_eq!(
            monitor.search_command(),
            SearchCommand::Terminate(TerminationReason::TimeLimit)
        );
    }
}
