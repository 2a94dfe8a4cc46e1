//! Working assignment shared by construction and local search.

use crate::dimension::{Infeasible, RouteSchedule, TimeDimension};
use crate::error::SolveError;
use crate::models::RoutingProblem;

/// Replacement of one vehicle's route by an already scheduled candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteChange {
    pub vehicle: usize,
    pub stops: Vec<usize>,
    pub schedule: RouteSchedule,
}

impl RouteChange {
    /// Schedules `stops` for `vehicle`.
    pub fn new(
        dimension: &TimeDimension<'_>,
        vehicle: usize,
        stops: Vec<usize>,
    ) -> Result<Self, Infeasible> {
        let schedule = dimension.schedule(vehicle, &stops)?;
        Ok(Self {
            vehicle,
            stops,
            schedule,
        })
    }
}

/// One ordered stop list per vehicle, each with its resolved schedule.
///
/// Every stored route is feasible; changes are only applied once their
/// schedule has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    routes: Vec<Vec<usize>>,
    schedules: Vec<RouteSchedule>,
    objective: i64,
}

impl Assignment {
    /// All vehicles idle at the depot.
    pub fn empty(dimension: &TimeDimension<'_>) -> Result<Self, Infeasible> {
        let num_vehicles = dimension.graph().num_vehicles();
        let schedules = (0..num_vehicles)
            .map(|vehicle| dimension.schedule(vehicle, &[]))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            routes: vec![Vec::new(); num_vehicles],
            objective: total_cost(&schedules),
            schedules,
        })
    }

    /// Builds an assignment from explicit routes, scheduling each one.
    pub fn from_routes(
        dimension: &TimeDimension<'_>,
        routes: Vec<Vec<usize>>,
    ) -> Result<Self, Infeasible> {
        let schedules = routes
            .iter()
            .enumerate()
            .map(|(vehicle, stops)| dimension.schedule(vehicle, stops))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            objective: total_cost(&schedules),
            routes,
            schedules,
        })
    }

    pub fn num_vehicles(&self) -> usize {
        self.routes.len()
    }

    /// Stops of `vehicle`'s route, depot excluded.
    pub fn route(&self, vehicle: usize) -> &[usize] {
        &self.routes[vehicle]
    }

    pub fn routes(&self) -> &[Vec<usize>] {
        &self.routes
    }

    pub fn schedule(&self, vehicle: usize) -> &RouteSchedule {
        &self.schedules[vehicle]
    }

    pub fn schedules(&self) -> &[RouteSchedule] {
        &self.schedules
    }

    /// Sum of route costs.
    pub fn objective(&self) -> i64 {
        self.objective
    }

    pub fn num_routed(&self) -> usize {
        self.routes.iter().map(Vec::len).sum()
    }

    /// Objective change if `changes` were applied.
    pub fn delta(&self, changes: &[RouteChange]) -> i64 {
        changes
            .iter()
            .map(|c| c.schedule.cost() - self.schedules[c.vehicle].cost())
            .fold(0i64, i64::saturating_add)
    }

    pub fn apply(&mut self, changes: Vec<RouteChange>) {
        for change in changes {
            self.objective = self
                .objective
                .saturating_add(change.schedule.cost() - self.schedules[change.vehicle].cost());
            self.routes[change.vehicle] = change.stops;
            self.schedules[change.vehicle] = change.schedule;
        }
    }

    /// Verifies that routes partition the non-depot stops.
    pub fn check_partition(&self, problem: &RoutingProblem) -> Result<(), SolveError> {
        let mut owner: Vec<Option<usize>> = vec![None; problem.num_stops()];
        for (vehicle, route) in self.routes.iter().enumerate() {
            for &stop in route {
                if stop >= problem.num_stops() || stop == problem.depot() {
                    return Err(SolveError::InternalInvariantViolation(format!(
                        "vehicle {vehicle} visits invalid stop {stop}"
                    )));
                }
                if let Some(other) = owner[stop] {
                    return Err(SolveError::InternalInvariantViolation(format!(
                        "stop {stop} visited by vehicles {other} and {vehicle}"
                    )));
                }
                owner[stop] = Some(vehicle);
            }
        }
        match problem.customer_ids().find(|&stop| owner[stop].is_none()) {
            Some(stop) => Err(SolveError::InternalInvariantViolation(format!(
                "stop {stop} is not routed"
            ))),
            None => Ok(()),
        }
    }
}

fn total_cost(schedules: &[RouteSchedule]) -> i64 {
    schedules
        .iter()
        .map(RouteSchedule::cost)
        .fold(0, i64::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SolverConfig;
    use crate::graph::RouteGraph;

    fn problem() -> RoutingProblem {
        RoutingProblem::from_rows(
            vec![
                vec![0, 10, 10, 10],
                vec![10, 0, 4, 10],
                vec![10, 4, 0, 10],
                vec![10, 10, 10, 0],
            ],
            vec![(0, 1000), (0, 1000), (0, 1000), (0, 1000)],
            vec![0, 0, 0, 0],
            2,
            0,
        )
        .expect("valid")
    }

    #[test]
    fn test_empty_assignment() {
        let p = problem();
        let graph = RouteGraph::new(4, 2, 0);
        let config = SolverConfig::default();
        let dim = TimeDimension::new(&p, &graph, &config);
        let assignment = Assignment::empty(&dim).expect("feasible");
        assert_eq!(assignment.num_vehicles(), 2);
        assert_eq!(assignment.objective(), 0);
        assert_eq!(assignment.num_routed(), 0);
        assert!(assignment.check_partition(&p).is_err());
    }

    #[test]
    fn test_apply_updates_objective() {
        let p = problem();
        let graph = RouteGraph::new(4, 2, 0);
        let config = SolverConfig::default();
        let dim = TimeDimension::new(&p, &graph, &config);
        let mut assignment =
            Assignment::from_routes(&dim, vec![vec![1, 3], vec![2]]).expect("feasible");
        assert_eq!(assignment.objective(), 30 + 20);
        assert!(assignment.check_partition(&p).is_ok());

        let changes = vec![
            RouteChange::new(&dim, 0, vec![3]).expect("feasible"),
            RouteChange::new(&dim, 1, vec![1, 2]).expect("feasible"),
        ];
        assert_eq!(assignment.delta(&changes), 20 + 24 - 50);
        assignment.apply(changes);
        assert_eq!(assignment.objective(), 44);
        assert_eq!(assignment.route(1), &[1, 2]);
        assert_eq!(assignment.schedule(1).cost(), 24);
    }

    #[test]
    fn test_partition_detects_duplicates() {
        let p = problem();
        let graph = RouteGraph::new(4, 2, 0);
        let config = SolverConfig::default();
        let dim = TimeDimension::new(&p, &graph, &config);
        let assignment =
            Assignment::from_routes(&dim, vec![vec![1, 2, 3], vec![2]]).expect("feasible");
        let err = assignment.check_partition(&p).unwrap_err();
        assert_eq!(
            err,
            SolveError::InternalInvariantViolation(
                "stop 2 visited by vehicles 0 and 1".to_string()
            )
        );
    }
}
