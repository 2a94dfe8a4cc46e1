//! Solution and violation types.

use serde::{Deserialize, Serialize};

use super::{RoutePlan, RoutingProblem};
use crate::config::{SolverConfig, TotalTimeMode};
use crate::search::SearchStats;

/// A constraint a [`Solution`] fails to satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Number of routes differs from the fleet size.
    RouteCount { expected: usize, actual: usize },
    /// Route does not start and end at the depot.
    NotAnchored { vehicle: usize },
    /// A visit names a stop id the problem does not have.
    UnknownStop { stop: usize },
    /// A non-depot stop is never visited.
    MissingStop { stop: usize },
    /// A stop is visited more than once, or the depot appears mid-route.
    DuplicateStop { stop: usize },
    /// Service starts outside the stop's window or the horizon.
    TimeWindowViolated {
        stop: usize,
        arrival: i64,
        earliest: i64,
        latest: i64,
    },
    /// `departure_time` differs from arrival plus service.
    DepartureMismatch { stop: usize },
    /// Arrival earlier than departure from the previous stop plus travel.
    ArcTiming { vehicle: usize, from: usize, to: usize },
    /// Waiting before `to` exceeds the configured slack.
    SlackExceeded {
        vehicle: usize,
        to: usize,
        waiting: i64,
        slack: i64,
    },
    /// Time from start to end depot exceeds the maximum span.
    SpanExceeded {
        vehicle: usize,
        span: i64,
        max_span: i64,
    },
    /// Reported objective or total time disagrees with the routes.
    ObjectiveMismatch { reported: i64, recomputed: i64 },
    TotalTimeMismatch { reported: i64, recomputed: i64 },
}

/// The routes produced by one solve, fully owned by the caller.
///
/// Serializes to `{ "routes": [[{ "stop", "arrival_time", "departure_time" }]],
/// "total_time", "objective_value" }`. Search statistics are not part of the
/// serialized form.
///
/// # Examples
///
/// ```
/// use tw_routing::models::{RoutePlan, Solution, Visit};
///
/// let depot = |t| Visit { stop: 0, arrival_time: t, departure_time: t };
/// let solution = Solution::new(
///     vec![RoutePlan::new(vec![
///         depot(0),
///         Visit { stop: 1, arrival_time: 10, departure_time: 15 },
///         depot(25),
///     ])],
///     25,
///     30,
/// );
/// assert_eq!(solution.num_served(), 1);
/// assert_eq!(solution.route_of(1), Some(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    routes: Vec<RoutePlan>,
    total_time: i64,
    objective_value: i64,
    #[serde(skip)]
    stats: SearchStats,
}

impl Solution {
    pub fn new(routes: Vec<RoutePlan>, total_time: i64, objective_value: i64) -> Self {
        Self {
            routes,
            total_time,
            objective_value,
            stats: SearchStats::default(),
        }
    }

    pub(crate) fn with_stats(mut self, stats: SearchStats) -> Self {
        self.stats = stats;
        self
    }

    /// One route per vehicle, indexed by vehicle id.
    pub fn routes(&self) -> &[RoutePlan] {
        &self.routes
    }

    /// Sum (or max, per configuration) of every vehicle's end time.
    pub fn total_time(&self) -> i64 {
        self.total_time
    }

    /// Value minimized by the search.
    pub fn objective_value(&self) -> i64 {
        self.objective_value
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Number of vehicles serving at least one stop.
    pub fn num_used_vehicles(&self) -> usize {
        self.routes.iter().filter(|r| !r.is_empty()).count()
    }

    /// Total number of stops served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// Vehicle serving `stop`, if any.
    pub fn route_of(&self, stop: usize) -> Option<usize> {
        self.routes
            .iter()
            .position(|r| r.stops().iter().any(|v| v.stop == stop))
    }

    /// Recomputes the objective from the routes: the transit (service at the
    /// origin plus travel) of every arc of every used vehicle, plus the
    /// weighted span of every used vehicle.
    pub fn recompute_objective(&self, problem: &RoutingProblem, config: &SolverConfig) -> i64 {
        self.routes
            .iter()
            .filter(|r| !r.is_empty())
            .map(|r| {
                let arcs: i64 = r
                    .visits()
                    .windows(2)
                    .map(|w| problem.transit(w[0].stop, w[1].stop))
                    .sum();
                arcs + config.span_cost_coefficient * r.span()
            })
            .sum()
    }

    /// Recomputes the total time from the route end times.
    pub fn recompute_total_time(&self, config: &SolverConfig) -> i64 {
        let ends = self.routes.iter().map(RoutePlan::end_time);
        match config.total_time {
            TotalTimeMode::Sum => ends.sum(),
            TotalTimeMode::Max => ends.max().unwrap_or(0),
        }
    }

    /// Checks the solution against the problem and returns every violation.
    ///
    /// An empty result means the routes partition the non-depot stops, every
    /// timing constraint holds, and the reported totals match the routes.
    pub fn validate(&self, problem: &RoutingProblem, config: &SolverConfig) -> Vec<Violation> {
        let mut violations = Vec::new();
        let depot = problem.depot();

        if self.routes.len() != problem.num_vehicles() {
            violations.push(Violation::RouteCount {
                expected: problem.num_vehicles(),
                actual: self.routes.len(),
            });
        }

        let mut seen = vec![false; problem.num_stops()];
        for (vehicle, route) in self.routes.iter().enumerate() {
            let visits = route.visits();
            let anchored = visits.len() >= 2
                && visits.first().is_some_and(|v| v.stop == depot)
                && visits.last().is_some_and(|v| v.stop == depot);
            if !anchored {
                violations.push(Violation::NotAnchored { vehicle });
                continue;
            }

            if let Some(unknown) = visits.iter().find(|v| v.stop >= problem.num_stops()) {
                violations.push(Violation::UnknownStop { stop: unknown.stop });
                continue;
            }

            for visit in route.stops() {
                if visit.stop == depot || seen[visit.stop] {
                    violations.push(Violation::DuplicateStop { stop: visit.stop });
                    continue;
                }
                seen[visit.stop] = true;
            }

            for visit in visits {
                let stop = problem.stop(visit.stop);
                let window = stop.time_window();
                let latest = window.latest().min(config.horizon);
                if visit.arrival_time < window.earliest() || visit.arrival_time > latest {
                    violations.push(Violation::TimeWindowViolated {
                        stop: visit.stop,
                        arrival: visit.arrival_time,
                        earliest: window.earliest(),
                        latest,
                    });
                }
                if visit.departure_time != visit.arrival_time + stop.service_duration() {
                    violations.push(Violation::DepartureMismatch { stop: visit.stop });
                }
            }

            for pair in visits.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                let ready = a.departure_time + problem.cost(a.stop, b.stop);
                if b.arrival_time < ready {
                    violations.push(Violation::ArcTiming {
                        vehicle,
                        from: a.stop,
                        to: b.stop,
                    });
                } else if b.arrival_time - ready > config.waiting_slack {
                    violations.push(Violation::SlackExceeded {
                        vehicle,
                        to: b.stop,
                        waiting: b.arrival_time - ready,
                        slack: config.waiting_slack,
                    });
                }
            }

            if route.span() > config.max_span {
                violations.push(Violation::SpanExceeded {
                    vehicle,
                    span: route.span(),
                    max_span: config.max_span,
                });
            }
        }

        for stop in problem.customer_ids() {
            if !seen[stop] {
                violations.push(Violation::MissingStop { stop });
            }
        }

        let recomputed = self.recompute_objective(problem, config);
        if recomputed != self.objective_value {
            violations.push(Violation::ObjectiveMismatch {
                reported: self.objective_value,
                recomputed,
            });
        }
        let recomputed = self.recompute_total_time(config);
        if recomputed != self.total_time {
            violations.push(Violation::TotalTimeMismatch {
                reported: self.total_time,
                recomputed,
            });
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Visit;

    fn problem() -> RoutingProblem {
        RoutingProblem::from_rows(
            vec![vec![0, 10, 20], vec![10, 0, 5], vec![20, 5, 0]],
            vec![(0, 500), (10, 40), (20, 60)],
            vec![0, 5, 5],
            2,
            0,
        )
        .expect("valid")
    }

    fn visit(stop: usize, arrival_time: i64, service: i64) -> Visit {
        Visit {
            stop,
            arrival_time,
            departure_time: arrival_time + service,
        }
    }

    fn valid_solution() -> Solution {
        // 0 -(10)-> 1 [10, svc 5] -(5)-> 2 [20, svc 5] -(20)-> 0 [45]
        let used = RoutePlan::new(vec![
            visit(0, 0, 0),
            visit(1, 10, 5),
            visit(2, 20, 5),
            visit(0, 45, 0),
        ]);
        let unused = RoutePlan::new(vec![visit(0, 0, 0), visit(0, 0, 0)]);
        // transits: 10 + 10 + 25 = 45
        Solution::new(vec![used, unused], 45, 45)
    }

    #[test]
    fn test_valid_solution_has_no_violations() {
        let sol = valid_solution();
        let config = SolverConfig::default();
        assert_eq!(sol.validate(&problem(), &config), vec![]);
        assert_eq!(sol.num_used_vehicles(), 1);
        assert_eq!(sol.num_served(), 2);
        assert_eq!(sol.route_of(2), Some(0));
        assert_eq!(sol.route_of(7), None);
    }

    #[test]
    fn test_objective_includes_span_term() {
        let sol = valid_solution();
        let config = SolverConfig::default().with_span_cost_coefficient(2);
        assert_eq!(sol.recompute_objective(&problem(), &config), 45 + 2 * 45);
    }

    #[test]
    fn test_total_time_max_mode() {
        let sol = valid_solution();
        let config = SolverConfig::default().with_total_time(TotalTimeMode::Max);
        assert_eq!(sol.recompute_total_time(&config), 45);
    }

    #[test]
    fn test_missing_and_duplicate_stops() {
        let route = RoutePlan::new(vec![
            visit(0, 0, 0),
            visit(1, 10, 5),
            visit(1, 15, 5),
            visit(0, 40, 0),
        ]);
        let sol = Solution::new(vec![route, RoutePlan::new(vec![visit(0, 0, 0), visit(0, 0, 0)])], 40, 0);
        let violations = sol.validate(&problem(), &SolverConfig::default());
        assert!(violations.contains(&Violation::DuplicateStop { stop: 1 }));
        assert!(violations.contains(&Violation::MissingStop { stop: 2 }));
    }

    #[test]
    fn test_window_and_timing_violations() {
        let route = RoutePlan::new(vec![
            visit(0, 0, 0),
            visit(1, 50, 5),
            visit(2, 56, 5),
            visit(0, 81, 0),
        ]);
        let sol = Solution::new(vec![route, RoutePlan::new(vec![visit(0, 0, 0), visit(0, 0, 0)])], 81, 45);
        let violations = sol.validate(&problem(), &SolverConfig::default());
        assert!(violations.iter().any(|v| matches!(
            v,
            Violation::TimeWindowViolated { stop: 1, arrival: 50, .. }
        )));
        // arrival 50 after leaving depot at 0 with travel 10: waited 40 > 30
        assert!(violations.iter().any(|v| matches!(
            v,
            Violation::SlackExceeded { to: 1, waiting: 40, .. }
        )));
        // leaves 1 at 55, travel 5, arrives 56 < 60
        assert!(violations.contains(&Violation::ArcTiming {
            vehicle: 0,
            from: 1,
            to: 2
        }));
    }

    #[test]
    fn test_not_anchored_and_route_count() {
        let route = RoutePlan::new(vec![visit(1, 10, 5), visit(0, 25, 0)]);
        let sol = Solution::new(vec![route], 25, 15);
        let violations = sol.validate(&problem(), &SolverConfig::default());
        assert!(violations.contains(&Violation::NotAnchored { vehicle: 0 }));
        assert!(violations.contains(&Violation::RouteCount {
            expected: 2,
            actual: 1
        }));
    }

    #[test]
    fn test_unknown_stop() {
        let route = RoutePlan::new(vec![visit(0, 0, 0), visit(9, 10, 0), visit(0, 20, 0)]);
        let sol = Solution::new(vec![route.clone(), route], 40, 0);
        let violations = sol.validate(&problem(), &SolverConfig::default());
        assert!(violations.contains(&Violation::UnknownStop { stop: 9 }));
    }

    #[test]
    fn test_span_exceeded() {
        let sol = valid_solution();
        let config = SolverConfig::default().with_max_span(40);
        let violations = sol.validate(&problem(), &config);
        assert_eq!(
            violations,
            vec![Violation::SpanExceeded {
                vehicle: 0,
                span: 45,
                max_span: 40
            }]
        );
    }

    #[test]
    fn test_reported_totals_checked() {
        let mut sol = valid_solution();
        sol.objective_value = 44;
        sol.total_time = 1;
        let violations = sol.validate(&problem(), &SolverConfig::default());
        assert!(violations.contains(&Violation::ObjectiveMismatch {
            reported: 44,
            recomputed: 45
        }));
        assert!(violations.contains(&Violation::TotalTimeMismatch {
            reported: 1,
            recomputed: 45
        }));
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(valid_solution()).expect("serializable");
        assert_eq!(json["objective_value"], 45);
        assert_eq!(json["total_time"], 45);
        assert_eq!(json["routes"][0][1]["stop"], 1);
        assert_eq!(json["routes"][0][1]["arrival_time"], 10);
        assert_eq!(json["routes"][0][1]["departure_time"], 15);
        assert!(json.get("stats").is_none());

        let back: Solution = serde_json::from_value(json).expect("deserializable");
        assert_eq!(back, valid_solution());
    }
}
