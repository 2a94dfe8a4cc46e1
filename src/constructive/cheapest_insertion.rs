//! Global cheapest insertion.
//!
//! # Algorithm
//!
//! Starting from the current assignment, repeatedly evaluates every pending
//! stop at every position of every vehicle, resolving the time dimension of
//! each candidate route. The feasible insertion with the smallest objective
//! increase is applied. Ties go to the lowest stop id, then the lowest
//! vehicle, then the earliest position.
//!
//! A stop with no feasible insertion is skipped for the round: with a
//! bounded waiting slack, inserting another stop can close a gap that was
//! too long to wait through and open a position for it. Construction
//! fails only when no pending stop can be inserted at all, naming the
//! lowest such stop id.
//!
//! # Complexity
//!
//! O(n² × m × L) schedule resolutions, with n stops, m vehicles and L the
//! longest route.

use tracing::debug;

use super::ConstructionError;
use crate::dimension::TimeDimension;
use crate::search::{Assignment, RouteChange, SearchMonitor};

struct Insertion {
    index: usize,
    change: RouteChange,
    delta: i64,
}

/// Inserts every stop of `pending` into `assignment`.
///
/// # Examples
///
/// ```
/// use tw_routing::config::SolverConfig;
/// use tw_routing::constructive::cheapest_insertion;
/// use tw_routing::dimension::TimeDimension;
/// use tw_routing::graph::RouteGraph;
/// use tw_routing::models::RoutingProblem;
/// use tw_routing::search::{Assignment, SearchMonitor};
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
/// let monitor = SearchMonitor::new(&config, None);
///
/// let mut assignment = Assignment::empty(&dimension).unwrap();
/// cheapest_insertion(&dimension, &mut assignment, vec![1, 2], &monitor).unwrap();
/// // both stops share vehicle 0: 0 → 2 → 1 → 0 costs 9 + 4 + 5
/// assert_eq!(assignment.route(0), &[2, 1]);
/// assert_eq!(assignment.objective(), 18);
/// assert!(assignment.route(1).is_empty());
/// ```
pub fn cheapest_insertion(
    dimension: &TimeDimension<'_>,
    assignment: &mut Assignment,
    mut pending: Vec<usize>,
    monitor: &SearchMonitor,
) -> Result<(), ConstructionError> {
    pending.sort_unstable();

    while !pending.is_empty() {
        if monitor.is_cancelled() {
            return Err(ConstructionError::Cancelled);
        }

        let mut best: Option<Insertion> = None;
        for (index, &stop) in pending.iter().enumerate() {
            for vehicle in 0..assignment.num_vehicles() {
                let route = assignment.route(vehicle);
                for position in 0..=route.len() {
                    let mut stops = Vec::with_capacity(route.len() + 1);
                    stops.extend_from_slice(&route[..position]);
                    stops.push(stop);
                    stops.extend_from_slice(&route[position..]);

                    let Ok(change) = RouteChange::new(dimension, vehicle, stops) else {
                        continue;
                    };
                    let delta = assignment.delta(std::slice::from_ref(&change));
                    if best.as_ref().is_none_or(|b| delta < b.delta) {
                        best = Some(Insertion {
                            index,
                            change,
                            delta,
                        });
                    }
                }
            }
        }

        let Some(best) = best else {
            debug!(remaining = pending.len(), "no feasible insertion left");
            return Err(ConstructionError::Unroutable { stop: pending[0] });
        };
        let stop = pending.remove(best.index);
        debug!(
            stop,
            vehicle = best.change.vehicle,
            delta = best.delta,
            "inserted"
        );
        assignment.apply(vec![best.change]);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SolverConfig;
    use crate::graph::RouteGraph;
    use crate::models::RoutingProblem;

    fn line_problem(windows: Vec<(i64, i64)>, num_vehicles: usize) -> RoutingProblem {
        // stops on a line at positions 0, 10, 20, ...
        let n = windows.len();
        let costs = (0..n)
            .map(|i| (0..n).map(|j| 10 * (i as i64 - j as i64).abs()).collect())
            .collect();
        RoutingProblem::from_rows(costs, windows, vec![0; n], num_vehicles, 0).expect("valid")
    }

    #[test]
    fn test_inserts_all_stops_in_one_route() {
        let p = line_problem(vec![(0, 1000); 4], 2);
        let graph = RouteGraph::new(4, 2, 0);
        let config = SolverConfig::default();
        let dim = TimeDimension::new(&p, &graph, &config);
        let monitor = SearchMonitor::new(&config, None);
        let mut assignment = Assignment::empty(&dim).expect("feasible");
        cheapest_insertion(&dim, &mut assignment, vec![3, 1, 2], &monitor).expect("routable");
        assert_eq!(assignment.num_routed(), 3);
        assert!(assignment.check_partition(&p).is_ok());
        // going out to 30 and back costs 60; ties insert at the front
        assert_eq!(assignment.objective(), 60);
        assert_eq!(assignment.route(0), &[3, 2, 1]);
        assert!(assignment.route(1).is_empty());
    }

    #[test]
    fn test_conflicting_windows_use_second_vehicle() {
        // 1 and 2 must both be served at time 10-20: one vehicle cannot do both.
        let p = RoutingProblem::from_rows(
            vec![vec![0, 10, 10], vec![10, 0, 20], vec![10, 20, 0]],
            vec![(0, 1000), (10, 12), (10, 12)],
            vec![0, 5, 5],
            2,
            0,
        )
        .expect("valid");
        let graph = RouteGraph::new(3, 2, 0);
        let config = SolverConfig::default();
        let dim = TimeDimension::new(&p, &graph, &config);
        let monitor = SearchMonitor::new(&config, None);
        let mut assignment = Assignment::empty(&dim).expect("feasible");
        cheapest_insertion(&dim, &mut assignment, vec![1, 2], &monitor).expect("routable");
        assert_eq!(assignment.route(0), &[1]);
        assert_eq!(assignment.route(1), &[2]);
    }

    #[test]
    fn test_unreachable_stop_reported() {
        let p = line_problem(vec![(0, 1000), (0, 1000), (0, 15)], 2);
        let graph = RouteGraph::new(3, 2, 0);
        let config = SolverConfig::default();
        let dim = TimeDimension::new(&p, &graph, &config);
        let monitor = SearchMonitor::new(&config, None);
        let mut assignment = Assignment::empty(&dim).expect("feasible");
        let err = cheapest_insertion(&dim, &mut assignment, vec![1, 2], &monitor).unwrap_err();
        assert_eq!(err, ConstructionError::Unroutable { stop: 2 });
    }

    #[test]
    fn test_blocked_stop_retried_after_gap_filled() {
        // 3 cannot follow 1 (a 60-minute wait against a 30-minute slack)
        // until 2 is inserted between them.
        let n = 4;
        let costs = (0..n)
            .map(|i| (0..n).map(|j| if i == j { 0 } else { 10 }).collect())
            .collect();
        let p = RoutingProblem::from_rows(
            costs,
            vec![(0, 1440), (10, 10), (45, 45), (80, 80)],
            vec![0; n],
            1,
            0,
        )
        .expect("valid");
        let graph = RouteGraph::new(n, 1, 0);
        let config = SolverConfig::default();
        let dim = TimeDimension::new(&p, &graph, &config);
        let monitor = SearchMonitor::new(&config, None);
        let mut assignment = Assignment::empty(&dim).expect("feasible");
        assert!(!dim.is_feasible(0, &[1, 3]));

        cheapest_insertion(&dim, &mut assignment, vec![1, 2, 3], &monitor).expect("routable");
        assert_eq!(assignment.route(0), &[1, 2, 3]);
        assert_eq!(assignment.objective(), 40);
    }

    #[test]
    fn test_cancelled_before_start() {
        let p = line_problem(vec![(0, 1000); 3], 1);
        let graph = RouteGraph::new(3, 1, 0);
        let config = SolverConfig::default();
        let dim = TimeDimension::new(&p, &graph, &config);
        let token = crate::config::CancellationToken::new();
        token.cancel();
        let monitor = SearchMonitor::new(&config, Some(token));
        let mut assignment = Assignment::empty(&dim).expect("feasible");
        let err = cheapest_insertion(&dim, &mut assignment, vec![1, 2], &monitor).unwrap_err();
        assert_eq!(err, ConstructionError::Cancelled);
        assert_eq!(assignment.num_routed(), 0);
    }

    #[test]
    fn test_tie_breaks_by_lowest_vehicle() {
        let p = line_problem(vec![(0, 1000); 2], 3);
        let graph = RouteGraph::new(2, 3, 0);
        let config = SolverConfig::default();
        let dim = TimeDimension::new(&p, &graph, &config);
        let monitor = SearchMonitor::new(&config, None);
        let mut assignment = Assignment::empty(&dim).expect("feasible");
        cheapest_insertion(&dim, &mut assignment, vec![1], &monitor).expect("routable");
        assert_eq!(assignment.route(0), &[1]);
    }
}
