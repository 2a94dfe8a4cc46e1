//! Route plan and visit types.

use serde::{Deserialize, Serialize};

/// One stop of an extracted route with its resolved timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    /// Stop id (the depot appears at both ends of a route).
    pub stop: usize,
    /// Service start time at this stop.
    pub arrival_time: i64,
    /// `arrival_time` plus the stop's service duration.
    pub departure_time: i64,
}

/// The ordered visits of one vehicle, from the depot back to the depot.
///
/// An unused vehicle has exactly two visits, both at the depot.
///
/// # Examples
///
/// ```
/// use tw_routing::models::{RoutePlan, Visit};
///
/// let plan = RoutePlan::new(vec![
///     Visit { stop: 0, arrival_time: 600, departure_time: 600 },
///     Visit { stop: 3, arrival_time: 645, departure_time: 663 },
///     Visit { stop: 0, arrival_time: 690, departure_time: 690 },
/// ]);
/// assert_eq!(plan.stop_ids(), vec![3]);
/// assert_eq!(plan.span(), 90);
/// assert!(!plan.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutePlan {
    visits: Vec<Visit>,
}

impl RoutePlan {
    pub fn new(visits: Vec<Visit>) -> Self {
        Self { visits }
    }

    /// All visits, depot anchors included.
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Visits strictly between the two depot anchors.
    pub fn stops(&self) -> &[Visit] {
        match self.visits.len() {
            0..=2 => &[],
            n => &self.visits[1..n - 1],
        }
    }

    /// Stop ids served by this route, in order, depot excluded.
    pub fn stop_ids(&self) -> Vec<usize> {
        self.stops().iter().map(|v| v.stop).collect()
    }

    /// Returns `true` if the vehicle serves no stop.
    pub fn is_empty(&self) -> bool {
        self.stops().is_empty()
    }

    /// Number of stops served, depot excluded.
    pub fn len(&self) -> usize {
        self.stops().len()
    }

    /// Time at the end depot.
    pub fn end_time(&self) -> i64 {
        self.visits.last().map_or(0, |v| v.arrival_time)
    }

    /// Time between leaving and returning to the depot.
    pub fn span(&self) -> i64 {
        match (self.visits.first(), self.visits.last()) {
            (Some(first), Some(last)) => last.arrival_time - first.arrival_time,
            _ => 0,
        }
    }
}
