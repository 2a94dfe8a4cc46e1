//! Error taxonomy for problem construction and solving.
//!
//! Only malformed input and broken solver invariants are errors. An
//! unsatisfiable instance or a cancelled run is a regular
//! [`SolveOutcome`](crate::solver::SolveOutcome), not an `Err`.

use thiserror::Error;

/// Rejected problem input, detected before any search starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidProblemError {
    #[error("cost matrix is empty")]
    EmptyMatrix,
    #[error("cost matrix row {row} has {len} entries, expected {expected}")]
    MatrixShape {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("cost matrix of size {size} holds {len} entries, expected {expected}")]
    MatrixLength {
        size: usize,
        len: usize,
        expected: usize,
    },
    #[error("cost from {from} to {to} is negative ({cost})")]
    NegativeCost { from: usize, to: usize, cost: i64 },
    #[error("cost from stop {stop} to itself must be 0, got {cost}")]
    NonZeroDiagonal { stop: usize, cost: i64 },
    #[error("expected {expected} time windows, got {actual}")]
    TimeWindowCount { expected: usize, actual: usize },
    #[error("expected {expected} service times, got {actual}")]
    ServiceTimeCount { expected: usize, actual: usize },
    #[error("time window of stop {stop} is inverted: [{earliest}, {latest}]")]
    InvertedWindow {
        stop: usize,
        earliest: i64,
        latest: i64,
    },
    #[error("time window of stop {stop} has a negative bound: [{earliest}, {latest}]")]
    NegativeWindow {
        stop: usize,
        earliest: i64,
        latest: i64,
    },
    #[error("time window of stop {stop} ends at {latest}, beyond the planning horizon {horizon}")]
    WindowBeyondHorizon {
        stop: usize,
        latest: i64,
        horizon: i64,
    },
    #[error("cost from {from} to {to} is {cost}, beyond the planning horizon {horizon}")]
    CostBeyondHorizon {
        from: usize,
        to: usize,
        cost: i64,
        horizon: i64,
    },
    #[error("service time of stop {stop} is negative ({duration})")]
    NegativeServiceTime { stop: usize, duration: i64 },
    #[error("service time of stop {stop} is {duration}, beyond the planning horizon {horizon}")]
    ServiceBeyondHorizon {
        stop: usize,
        duration: i64,
        horizon: i64,
    },
    #[error("stop at position {position} carries id {id}")]
    StopIdMismatch { position: usize, id: usize },
    #[error("depot (stop {depot}) must have zero service time, got {duration}")]
    DepotServiceTime { depot: usize, duration: i64 },
    #[error("fleet must contain at least one vehicle")]
    NoVehicles,
    #[error("depot index {depot} is out of range for {num_stops} stops")]
    DepotOutOfRange { depot: usize, num_stops: usize },
    #[error("stop index {stop} is out of range for {num_stops} stops")]
    StopOutOfRange { stop: usize, num_stops: usize },
    #[error("the depot (stop {depot}) cannot be removed")]
    CannotRemoveDepot { depot: usize },
    #[error("invalid configuration: {field} = {value}")]
    InvalidConfig { field: &'static str, value: i64 },
}

/// Fatal failure of a single solve call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error(transparent)]
    InvalidProblem(#[from] InvalidProblemError),
    /// The search produced an assignment that breaks the route partition.
    /// Never expected in correct operation.
    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_offending_field() {
        let err = InvalidProblemError::InvertedWindow {
            stop: 3,
            earliest: 50,
            latest: 10,
        };
        assert_eq!(
            err.to_string(),
            "time window of stop 3 is inverted: [50, 10]"
        );
        assert_eq!(
            InvalidProblemError::NoVehicles.to_string(),
            "fleet must contain at least one vehicle"
        );
    }

    #[test]
    fn test_solve_error_wraps_invalid_problem() {
        let err: SolveError = InvalidProblemError::EmptyMatrix.into();
        assert_eq!(err, SolveError::InvalidProblem(InvalidProblemError::EmptyMatrix));
        assert_eq!(err.to_string(), "cost matrix is empty");
    }
}
