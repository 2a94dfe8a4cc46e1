//! Solution extraction from resolved route schedules.

use crate::config::{SolverConfig, TotalTimeMode};
use crate::dimension::RouteSchedule;
use crate::graph::RouteGraph;
use crate::models::{RoutePlan, RoutingProblem, Solution, Visit};
use crate::search::Assignment;

/// Reads routes, visit times and totals off an assignment.
///
/// Extraction only reads resolved schedules, so extracting the same
/// assignment twice gives equal solutions.
///
/// # Examples
///
/// ```
/// use tw_routing::config::SolverConfig;
/// use tw_routing::dimension::TimeDimension;
/// use tw_routing::extraction::SolutionExtractor;
/// use tw_routing::graph::RouteGraph;
/// use tw_routing::models::RoutingProblem;
/// use tw_routing::search::Assignment;
///
/// let problem = RoutingProblem::from_rows(
///     vec![vec![0, 10], vec![10, 0]],
///     vec![(0, 500), (100, 120)],
///     vec![0, 5],
///     2,
///     0,
/// ).unwrap();
/// let graph = RouteGraph::new(2, 2, 0);
/// let config = SolverConfig::default();
/// let dimension = TimeDimension::new(&problem, &graph, &config);
/// let assignment = Assignment::from_routes(&dimension, vec![vec![1], vec![]]).unwrap();
///
/// let solution = SolutionExtractor::new(&graph, &problem, &config).extract(&assignment);
/// let visits = solution.routes()[0].visits();
/// assert_eq!((visits[1].stop, visits[1].arrival_time, visits[1].departure_time), (1, 100, 105));
/// assert_eq!(solution.objective_value(), 25);
/// // vehicle 0 back at 115, idle vehicle 1 at 0
/// assert_eq!(solution.total_time(), 115);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SolutionExtractor<'a> {
    graph: &'a RouteGraph,
    problem: &'a RoutingProblem,
    config: &'a SolverConfig,
}

impl<'a> SolutionExtractor<'a> {
    pub fn new(graph: &'a RouteGraph, problem: &'a RoutingProblem, config: &'a SolverConfig) -> Self {
        Self {
            graph,
            problem,
            config,
        }
    }

    pub fn extract(&self, assignment: &Assignment) -> Solution {
        let routes: Vec<RoutePlan> = assignment
            .schedules()
            .iter()
            .map(|schedule| self.route_plan(schedule))
            .collect();

        let ends = assignment.schedules().iter().map(RouteSchedule::end_time);
        let total_time = match self.config.total_time {
            TotalTimeMode::Sum => ends.sum(),
            TotalTimeMode::Max => ends.max().unwrap_or(0),
        };

        Solution::new(routes, total_time, assignment.objective())
    }

    fn route_plan(&self, schedule: &RouteSchedule) -> RoutePlan {
        let visits = schedule
            .nodes()
            .iter()
            .zip(schedule.cumuls())
            .map(|(&node, &cumul)| {
                let stop = self.graph.node_to_stop(node);
                Visit {
                    stop,
                    arrival_time: cumul,
                    departure_time: cumul + self.problem.stop(stop).service_duration(),
                }
            })
            .collect();
        RoutePlan::new(visits)
    }
}
