//! Path cheapest arc construction.
//!
//! # Algorithm
//!
//! Vehicles are filled one after another. Each vehicle's path is extended
//! from its last stop along the cheapest arc (transit, ties to the lowest
//! stop id) whose target keeps the route feasible. When no feasible arc
//! remains the next vehicle starts. Stops still pending after the last
//! vehicle are handed to [`cheapest_insertion`], which may place them in
//! the middle of a route.
//!
//! # Complexity
//!
//! O(n² log n) arc sorting plus O(n² × L) schedule resolutions.

use tracing::debug;

use super::{cheapest_insertion, ConstructionError};
use crate::dimension::TimeDimension;
use crate::search::{Assignment, RouteChange, SearchMonitor};

/// Routes every non-depot stop, extending one vehicle's path at a time.
///
/// # Examples
///
/// ```
/// use tw_routing::config::SolverConfig;
/// use tw_routing::constructive::path_cheapest_arc;
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
/// path_cheapest_arc(&dimension, &mut assignment, &monitor).unwrap();
/// assert_eq!(assignment.route(0), &[1, 2]);
/// ```
pub fn path_cheapest_arc(
    dimension: &TimeDimension<'_>,
    assignment: &mut Assignment,
    monitor: &SearchMonitor,
) -> Result<(), ConstructionError> {
    let problem = dimension.problem();
    let mut pending: Vec<usize> = problem
        .customer_ids()
        .filter(|stop| !assignment.routes().iter().any(|r| r.contains(stop)))
        .collect();

    for vehicle in 0..assignment.num_vehicles() {
        while !pending.is_empty() {
            if monitor.is_cancelled() {
                return Err(ConstructionError::Cancelled);
            }

            let route = assignment.route(vehicle);
            let last = route.last().copied().unwrap_or(problem.depot());
            let mut candidates = pending.clone();
            candidates.sort_by_key(|&stop| (problem.transit(last, stop), stop));

            let extension = candidates.into_iter().find_map(|stop| {
                let mut stops = route.to_vec();
                stops.push(stop);
                RouteChange::new(dimension, vehicle, stops)
                    .ok()
                    .map(|change| (stop, change))
            });

            let Some((stop, change)) = extension else {
                break;
            };
            pending.retain(|&s| s != stop);
            assignment.apply(vec![change]);
        }
    }

    if pending.is_empty() {
        return Ok(());
    }
    debug!(
        remaining = pending.len(),
        "paths exhausted, falling back to cheapest insertion"
    );
    cheapest_insertion(dimension, assignment, pending, monitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SolverConfig;
    use crate::graph::RouteGraph;
    use crate::models::RoutingProblem;

    #[test]
    fn test_follows_cheapest_arcs() {
        // 0 → 2 is cheapest, then 2 → 3, then 3 → 1
        let p = RoutingProblem::from_rows(
            vec![
                vec![0, 9, 1, 8],
                vec![9, 0, 7, 2],
                vec![1, 7, 0, 3],
                vec![8, 2, 3, 0],
            ],
            vec![(0, 1000); 4],
            vec![0; 4],
            2,
            0,
        )
        .expect("valid");
        let graph = RouteGraph::new(4, 2, 0);
        let config = SolverConfig::default();
        let dim = TimeDimension::new(&p, &graph, &config);
        let monitor = SearchMonitor::new(&config, None);
        let mut assignment = Assignment::empty(&dim).expect("feasible");
        path_cheapest_arc(&dim, &mut assignment, &monitor).expect("routable");
        assert_eq!(assignment.route(0), &[2, 3, 1]);
        assert!(assignment.route(1).is_empty());
        assert_eq!(assignment.objective(), 1 + 3 + 2 + 9);
    }

    #[test]
    fn test_skips_infeasible_arcs() {
        // 1 is nearest but its window only opens long after 2 closes
        let p = RoutingProblem::from_rows(
            vec![vec![0, 1, 5], vec![1, 0, 5], vec![5, 5, 0]],
            vec![(0, 1000), (500, 600), (0, 20)],
            vec![0, 0, 0],
            2,
            0,
        )
        .expect("valid");
        let graph = RouteGraph::new(3, 2, 0);
        let config = SolverConfig::default();
        let dim = TimeDimension::new(&p, &graph, &config);
        let monitor = SearchMonitor::new(&config, None);
        let mut assignment = Assignment::empty(&dim).expect("feasible");
        path_cheapest_arc(&dim, &mut assignment, &monitor).expect("routable");
        assert_eq!(assignment.route(0), &[1]);
        assert_eq!(assignment.route(1), &[2]);
    }

    #[test]
    fn test_falls_back_to_insertion() {
        // One vehicle: the path 0 → 1 cannot be extended by 2 at its end,
        // but 2 fits in front of 1.
        let p = RoutingProblem::from_rows(
            vec![vec![0, 1, 5], vec![1, 0, 5], vec![5, 5, 0]],
            vec![(0, 1000), (10, 20), (0, 12)],
            vec![0, 0, 0],
            1,
            0,
        )
        .expect("valid");
        let graph = RouteGraph::new(3, 1, 0);
        let config = SolverConfig::default();
        let dim = TimeDimension::new(&p, &graph, &config);
        let monitor = SearchMonitor::new(&config, None);
        let mut assignment = Assignment::empty(&dim).expect("feasible");
        path_cheapest_arc(&dim, &mut assignment, &monitor).expect("routable");
        assert_eq!(assignment.route(0), &[2, 1]);
    }

    #[test]
    fn test_unroutable_after_fallback() {
        let p = RoutingProblem::from_rows(
            vec![vec![0, 1, 50], vec![1, 0, 50], vec![50, 50, 0]],
            vec![(0, 1000), (0, 1000), (0, 10)],
            vec![0, 0, 0],
            2,
            0,
        )
        .expect("valid");
        let graph = RouteGraph::new(3, 2, 0);
        let config = SolverConfig::default();
        let dim = TimeDimension::new(&p, &graph, &config);
        let monitor = SearchMonitor::new(&config, None);
        let mut assignment = Assignment::empty(&dim).expect("feasible");
        let err = path_cheapest_arc(&dim, &mut assignment, &monitor).unwrap_err();
        assert_eq!(err, ConstructionError::Unroutable { stop: 2 });
    }
}
