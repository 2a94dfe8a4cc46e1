//! Bounded cumulative variables.

use thiserror::Error;

use crate::graph::NodeIndex;

/// Bounds `[min, max]` on the cumulative time at one node.
///
/// # Examples
///
/// ```
/// use tw_routing::dimension::CumulVar;
///
/// let mut var = CumulVar::new(615, 795);
/// assert!(var.set_min(700));
/// assert!(!var.set_min(650));
/// assert!(var.set_max(690));
/// assert!(var.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CumulVar {
    min: i64,
    max: i64,
}

impl CumulVar {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    /// Returns `true` when no value satisfies both bounds.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Raises the lower bound. Returns `true` if it moved.
    pub fn set_min(&mut self, value: i64) -> bool {
        if value > self.min {
            self.min = value;
            true
        } else {
            false
        }
    }

    /// Lowers the upper bound. Returns `true` if it moved.
    pub fn set_max(&mut self, value: i64) -> bool {
        if value < self.max {
            self.max = value;
            true
        } else {
            false
        }
    }
}

/// Why a candidate route has no feasible schedule.
///
/// Not a failure of the solve: the search discards the candidate.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Infeasible {
    #[error("bounds of node {node} emptied to [{min}, {max}]")]
    EmptyDomain { node: NodeIndex, min: i64, max: i64 },
    #[error("vehicle {vehicle} needs a span of {span}, limit is {max_span}")]
    SpanExceeded {
        vehicle: usize,
        span: i64,
        max_span: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrowing() {
        let mut var = CumulVar::new(0, 100);
        assert!(var.set_min(10));
        assert!(var.set_max(50));
        assert!(!var.set_max(60));
        assert!(!var.set_min(5));
        assert_eq!((var.min(), var.max()), (10, 50));
        assert!(var.contains(10));
        assert!(var.contains(50));
        assert!(!var.contains(51));
        assert!(!var.is_empty());
    }

    #[test]
    fn test_crossing_bounds_empties() {
        let mut var = CumulVar::new(10, 20);
        var.set_min(21);
        assert!(var.is_empty());
    }

    #[test]
    fn test_infeasible_messages() {
        let err = Infeasible::EmptyDomain {
            node: NodeIndex::new(3),
            min: 40,
            max: 30,
        };
        assert_eq!(err.to_string(), "bounds of node 3 emptied to [40, 30]");
    }
}
