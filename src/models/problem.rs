//! Immutable routing problem snapshot.

use serde::{Deserialize, Serialize};

use super::{Stop, TimeWindow};
use crate::distance::CostMatrix;
use crate::error::InvalidProblemError;

/// A single-depot VRPTW instance, frozen for the duration of a solve.
///
/// Stop `i` is row and column `i` of the cost matrix. The fleet is
/// homogeneous: every vehicle starts and ends at the depot.
///
/// Editing methods ([`with_stop`](Self::with_stop),
/// [`without_stop`](Self::without_stop)) return a new snapshot and leave
/// `self` untouched, so a solve running on one snapshot never observes
/// edits made for the next one.
///
/// # Examples
///
/// ```
/// use tw_routing::models::RoutingProblem;
///
/// let problem = RoutingProblem::from_rows(
///     vec![vec![0, 10], vec![10, 0]],
///     vec![(0, 100), (20, 40)],
///     vec![0, 5],
///     1,
///     0,
/// ).unwrap();
/// assert_eq!(problem.num_stops(), 2);
/// assert_eq!(problem.transit(1, 0), 15);
///
/// assert!(RoutingProblem::from_rows(vec![vec![0]], vec![(0, 10)], vec![0], 0, 0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProblem")]
pub struct RoutingProblem {
    stops: Vec<Stop>,
    costs: CostMatrix,
    num_vehicles: usize,
    depot: usize,
}

impl RoutingProblem {
    /// Builds and validates a problem.
    ///
    /// `time_windows[i]` is `(earliest, latest)` and `service_times[i]` the
    /// service duration of stop `i`.
    pub fn new(
        costs: CostMatrix,
        time_windows: &[(i64, i64)],
        service_times: &[i64],
        num_vehicles: usize,
        depot: usize,
    ) -> Result<Self, InvalidProblemError> {
        costs.validate()?;
        let n = costs.size();
        if time_windows.len() != n {
            return Err(InvalidProblemError::TimeWindowCount {
                expected: n,
                actual: time_windows.len(),
            });
        }
        if service_times.len() != n {
            return Err(InvalidProblemError::ServiceTimeCount {
                expected: n,
                actual: service_times.len(),
            });
        }
        if num_vehicles == 0 {
            return Err(InvalidProblemError::NoVehicles);
        }
        if depot >= n {
            return Err(InvalidProblemError::DepotOutOfRange {
                depot,
                num_stops: n,
            });
        }

        let mut stops = Vec::with_capacity(n);
        for (id, (&(earliest, latest), &duration)) in
            time_windows.iter().zip(service_times).enumerate()
        {
            stops.push(make_stop(id, earliest, latest, duration)?);
        }
        if stops[depot].service_duration() != 0 {
            return Err(InvalidProblemError::DepotServiceTime {
                depot,
                duration: stops[depot].service_duration(),
            });
        }

        Ok(Self {
            stops,
            costs,
            num_vehicles,
            depot,
        })
    }

    /// Builds a problem from a nested cost matrix.
    pub fn from_rows(
        costs: Vec<Vec<i64>>,
        time_windows: Vec<(i64, i64)>,
        service_times: Vec<i64>,
        num_vehicles: usize,
        depot: usize,
    ) -> Result<Self, InvalidProblemError> {
        let costs = CostMatrix::from_rows(costs)?;
        Self::new(costs, &time_windows, &service_times, num_vehicles, depot)
    }

    /// Rejects any window that ends after `horizon`, and any service time or
    /// travel cost longer than `horizon`: such a stop or arc can never be
    /// scheduled, and bounding them keeps time arithmetic in range.
    pub fn check_horizon(&self, horizon: i64) -> Result<(), InvalidProblemError> {
        for stop in &self.stops {
            let latest = stop.time_window().latest();
            if latest > horizon {
                return Err(InvalidProblemError::WindowBeyondHorizon {
                    stop: stop.id(),
                    latest,
                    horizon,
                });
            }
            if stop.service_duration() > horizon {
                return Err(InvalidProblemError::ServiceBeyondHorizon {
                    stop: stop.id(),
                    duration: stop.service_duration(),
                    horizon,
                });
            }
        }
        let n = self.num_stops();
        for from in 0..n {
            for to in 0..n {
                let cost = self.costs.get(from, to);
                if cost > horizon {
                    return Err(InvalidProblemError::CostBeyondHorizon {
                        from,
                        to,
                        cost,
                        horizon,
                    });
                }
            }
        }
        Ok(())
    }

    /// Returns a new snapshot with one more stop appended (its id is the
    /// current stop count).
    ///
    /// `to_new[i]` is the cost from stop `i` to the new stop and `from_new[j]`
    /// the cost from the new stop to stop `j`.
    pub fn with_stop(
        &self,
        time_window: (i64, i64),
        service_time: i64,
        to_new: &[i64],
        from_new: &[i64],
    ) -> Result<Self, InvalidProblemError> {
        let n = self.num_stops();
        for costs in [to_new, from_new] {
            if costs.len() != n {
                return Err(InvalidProblemError::MatrixShape {
                    row: n,
                    len: costs.len(),
                    expected: n,
                });
            }
        }
        let stop = make_stop(n, time_window.0, time_window.1, service_time)?;
        let costs = self.costs.with_appended(to_new, from_new);
        costs.validate()?;

        let mut stops = self.stops.clone();
        stops.push(stop);
        Ok(Self {
            stops,
            costs,
            num_vehicles: self.num_vehicles,
            depot: self.depot,
        })
    }

    /// Returns a new snapshot without `stop`. Later stops shift down by one.
    pub fn without_stop(&self, stop: usize) -> Result<Self, InvalidProblemError> {
        let n = self.num_stops();
        if stop >= n {
            return Err(InvalidProblemError::StopOutOfRange { stop, num_stops: n });
        }
        if stop == self.depot {
            return Err(InvalidProblemError::CannotRemoveDepot { depot: self.depot });
        }
        let stops = self
            .stops
            .iter()
            .filter(|s| s.id() != stop)
            .enumerate()
            .map(|(id, s)| s.with_id(id))
            .collect();
        let depot = if self.depot > stop {
            self.depot - 1
        } else {
            self.depot
        };
        Ok(Self {
            stops,
            costs: self.costs.without(stop),
            num_vehicles: self.num_vehicles,
            depot,
        })
    }

    /// Returns a new snapshot with a different fleet size.
    pub fn with_num_vehicles(&self, num_vehicles: usize) -> Result<Self, InvalidProblemError> {
        if num_vehicles == 0 {
            return Err(InvalidProblemError::NoVehicles);
        }
        Ok(Self {
            num_vehicles,
            ..self.clone()
        })
    }

    /// All stops, depot included, indexed by id.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn stop(&self, id: usize) -> &Stop {
        &self.stops[id]
    }

    pub fn num_stops(&self) -> usize {
        self.stops.len()
    }

    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    pub fn depot(&self) -> usize {
        self.depot
    }

    pub fn costs(&self) -> &CostMatrix {
        &self.costs
    }

    /// Travel cost from `from` to `to`.
    pub fn cost(&self, from: usize, to: usize) -> i64 {
        self.costs.get(from, to)
    }

    /// Time consumed between starting service at `from` and reaching `to`:
    /// service at `from` plus travel.
    pub fn transit(&self, from: usize, to: usize) -> i64 {
        self.stops[from]
            .service_duration()
            .saturating_add(self.costs.get(from, to))
    }

    /// Non-depot stop ids in ascending order.
    pub fn customer_ids(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.num_stops()).filter(move |&id| id != self.depot)
    }
}

/// Wire shape of [`RoutingProblem`]; deserialized input goes through
/// [`RoutingProblem::new`] like any other.
#[derive(Deserialize)]
struct RawProblem {
    stops: Vec<Stop>,
    costs: CostMatrix,
    num_vehicles: usize,
    depot: usize,
}

impl TryFrom<RawProblem> for RoutingProblem {
    type Error = InvalidProblemError;

    fn try_from(raw: RawProblem) -> Result<Self, Self::Error> {
        if let Some((position, stop)) = raw
            .stops
            .iter()
            .enumerate()
            .find(|(position, stop)| stop.id() != *position)
        {
            return Err(InvalidProblemError::StopIdMismatch {
                position,
                id: stop.id(),
            });
        }
        let windows: Vec<(i64, i64)> = raw
            .stops
            .iter()
            .map(|s| (s.time_window().earliest(), s.time_window().latest()))
            .collect();
        let service: Vec<i64> = raw.stops.iter().map(Stop::service_duration).collect();
        Self::new(raw.costs, &windows, &service, raw.num_vehicles, raw.depot)
    }
}

fn make_stop(
    id: usize,
    earliest: i64,
    latest: i64,
    duration: i64,
) -> Result<Stop, InvalidProblemError> {
    if earliest < 0 || latest < 0 {
        return Err(InvalidProblemError::NegativeWindow {
            stop: id,
            earliest,
            latest,
        });
    }
    let window = TimeWindow::new(earliest, latest).ok_or(InvalidProblemError::InvertedWindow {
        stop: id,
        earliest,
        latest,
    })?;
    if duration < 0 {
        return Err(InvalidProblemError::NegativeServiceTime { stop: id, duration });
    }
    Ok(Stop::new(id, window, duration))
}
