//! Stop and time window types.

use serde::{Deserialize, Serialize};

/// An inclusive interval of allowed service start times, in minutes.
///
/// A vehicle may arrive before `earliest` and wait (within the configured
/// slack), but service must start no later than `latest`.
///
/// # Examples
///
/// ```
/// use tw_routing::models::TimeWindow;
///
/// let tw = TimeWindow::new(615, 795).unwrap();
/// assert!(tw.contains(700));
/// assert!(!tw.contains(800));
/// assert_eq!(tw.waiting_time(600), 15);
/// assert!(TimeWindow::new(10, 5).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    earliest: i64,
    latest: i64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `earliest > latest` or `earliest < 0`.
    pub fn new(earliest: i64, latest: i64) -> Option<Self> {
        if earliest < 0 || earliest > latest {
            return None;
        }
        Some(Self { earliest, latest })
    }

    /// Earliest allowable service start.
    pub fn earliest(&self) -> i64 {
        self.earliest
    }

    /// Latest allowable service start.
    pub fn latest(&self) -> i64 {
        self.latest
    }

    /// Returns `true` if the given time falls within this window.
    pub fn contains(&self, time: i64) -> bool {
        time >= self.earliest && time <= self.latest
    }

    /// Waiting needed when arriving at `arrival`. Zero once the window is open.
    pub fn waiting_time(&self, arrival: i64) -> i64 {
        (self.earliest - arrival).max(0)
    }
}

/// A stop (or the depot) of a routing problem.
///
/// The stop's location is only meaningful through its row and column in the
/// cost matrix, so a stop carries just its id, window and service duration.
///
/// # Examples
///
/// ```
/// use tw_routing::models::{Stop, TimeWindow};
///
/// let stop = Stop::new(2, TimeWindow::new(930, 1110).unwrap(), 20);
/// assert_eq!(stop.id(), 2);
/// assert_eq!(stop.service_duration(), 20);
/// assert_eq!(stop.time_window().latest(), 1110);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    id: usize,
    time_window: TimeWindow,
    service_duration: i64,
}

impl Stop {
    pub fn new(id: usize, time_window: TimeWindow, service_duration: i64) -> Self {
        Self {
            id,
            time_window,
            service_duration,
        }
    }

    /// Stable stop id, equal to its row in the cost matrix.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn time_window(&self) -> TimeWindow {
        self.time_window
    }

    /// Time spent at the stop once service starts.
    pub fn service_duration(&self) -> i64 {
        self.service_duration
    }

    pub(crate) fn with_id(mut self, id: usize) -> Self {
        self.id = id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window_valid() {
        let tw = TimeWindow::new(10, 20).expect("valid");
        assert_eq!(tw.earliest(), 10);
        assert_eq!(tw.latest(), 20);
    }

    #[test]
    fn test_time_window_invalid() {
        assert!(TimeWindow::new(20, 10).is_none());
        assert!(TimeWindow::new(-5, 10).is_none());
    }

    #[test]
    fn test_time_window_contains_is_inclusive() {
        let tw = TimeWindow::new(10, 20).expect("valid");
        assert!(tw.contains(10));
        assert!(tw.contains(20));
        assert!(!tw.contains(9));
        assert!(!tw.contains(21));
    }

    #[test]
    fn test_time_window_waiting() {
        let tw = TimeWindow::new(10, 20).expect("valid");
        assert_eq!(tw.waiting_time(4), 6);
        assert_eq!(tw.waiting_time(10), 0);
        assert_eq!(tw.waiting_time(25), 0);
    }

    #[test]
    fn test_stop_renumbered() {
        let stop = Stop::new(4, TimeWindow::new(0, 5).expect("valid"), 3).with_id(2);
        assert_eq!(stop.id(), 2);
        assert_eq!(stop.service_duration(), 3);
    }
}
