//! Time dimension over route chains.
//!
//! The cumul of a node is the time service starts there. Along a route
//! `a → b`:
//!
//! ```text
//! cumul(a) + transit(a, b) <= cumul(b) <= cumul(a) + transit(a, b) + slack
//! transit(a, b) = service(a) + cost(a, b)
//! ```
//!
//! Every cumul lies in `[0, horizon]` intersected with its stop's window, and
//! `cumul(end) - cumul(start) <= max_span` per vehicle.
//!
//! Routes are chains, so a forward pass followed by a backward pass leaves
//! every remaining value of every node part of some feasible schedule. The
//! forward pass alone decides feasibility.

use super::{CumulVar, Infeasible};
use crate::config::SolverConfig;
use crate::graph::{NodeIndex, RouteGraph};
use crate::models::RoutingProblem;

/// Resolved timing and cost of one vehicle's route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSchedule {
    vehicle: usize,
    nodes: Vec<NodeIndex>,
    cumuls: Vec<i64>,
    arc_cost: i64,
    cost: i64,
}

impl RouteSchedule {
    pub fn vehicle(&self) -> usize {
        self.vehicle
    }

    /// Start node, stop nodes, end node.
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }

    /// Resolved cumul of each entry of [`nodes`](Self::nodes).
    pub fn cumuls(&self) -> &[i64] {
        &self.cumuls
    }

    pub fn start_time(&self) -> i64 {
        self.cumuls[0]
    }

    pub fn end_time(&self) -> i64 {
        self.cumuls[self.cumuls.len() - 1]
    }

    pub fn span(&self) -> i64 {
        self.end_time() - self.start_time()
    }

    /// Sum of transits along the route.
    pub fn arc_cost(&self) -> i64 {
        self.arc_cost
    }

    /// Objective contribution: arc cost plus weighted span, zero for an
    /// unused vehicle.
    pub fn cost(&self) -> i64 {
        self.cost
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 2
    }
}

/// Elapsed-time dimension attached to a route graph.
///
/// # Examples
///
/// ```
/// use tw_routing::config::SolverConfig;
/// use tw_routing::dimension::TimeDimension;
/// use tw_routing::graph::RouteGraph;
/// use tw_routing::models::RoutingProblem;
///
/// let problem = RoutingProblem::from_rows(
///     vec![vec![0, 10], vec![10, 0]],
///     vec![(0, 500), (100, 120)],
///     vec![0, 5],
///     1,
///     0,
/// ).unwrap();
/// let graph = RouteGraph::new(2, 1, 0);
/// let config = SolverConfig::default();
/// let dimension = TimeDimension::new(&problem, &graph, &config);
///
/// let schedule = dimension.schedule(0, &[1]).unwrap();
/// assert_eq!(schedule.cumuls(), &[90, 100, 115]);
/// assert_eq!(schedule.cost(), 25);
/// ```
#[derive(Debug, Clone)]
pub struct TimeDimension<'a> {
    problem: &'a RoutingProblem,
    graph: &'a RouteGraph,
    slack: i64,
    max_span: i64,
    horizon: i64,
    span_cost_coefficient: i64,
}

impl<'a> TimeDimension<'a> {
    pub fn new(problem: &'a RoutingProblem, graph: &'a RouteGraph, config: &SolverConfig) -> Self {
        Self {
            problem,
            graph,
            slack: config.waiting_slack,
            max_span: config.max_span,
            horizon: config.horizon,
            span_cost_coefficient: config.span_cost_coefficient,
        }
    }

    pub fn problem(&self) -> &'a RoutingProblem {
        self.problem
    }

    pub fn graph(&self) -> &'a RouteGraph {
        self.graph
    }

    /// Bounds of `node` before any propagation: its stop's window within
    /// `[0, horizon]`.
    pub fn initial_var(&self, node: NodeIndex) -> CumulVar {
        let window = self
            .problem
            .stop(self.graph.node_to_stop(node))
            .time_window();
        CumulVar::new(window.earliest().max(0), window.latest().min(self.horizon))
    }

    pub fn transit(&self, from: NodeIndex, to: NodeIndex) -> i64 {
        self.problem
            .transit(self.graph.node_to_stop(from), self.graph.node_to_stop(to))
    }

    /// Narrows the bounds of every node of a route chain.
    pub fn propagate(&self, nodes: &[NodeIndex]) -> Result<Vec<CumulVar>, Infeasible> {
        let mut vars: Vec<CumulVar> = nodes.iter().map(|&n| self.initial_var(n)).collect();
        self.push_forward(nodes, &mut vars, 0)?;
        self.pull_backward(nodes, &mut vars)?;
        Ok(vars)
    }

    /// Pushes bounds from `nodes[from]` towards the end of the route: a
    /// later node can be reached no earlier than its predecessor plus the
    /// transit, and no later than that plus the slack.
    pub fn push_forward(
        &self,
        nodes: &[NodeIndex],
        vars: &mut [CumulVar],
        from: usize,
    ) -> Result<(), Infeasible> {
        check(nodes[from], &vars[from])?;
        for i in (from + 1)..nodes.len() {
            let transit = self.transit(nodes[i - 1], nodes[i]);
            let prev = vars[i - 1];
            vars[i].set_min(prev.min().saturating_add(transit));
            vars[i].set_max(prev.max().saturating_add(transit).saturating_add(self.slack));
            check(nodes[i], &vars[i])?;
        }
        Ok(())
    }

    fn pull_backward(&self, nodes: &[NodeIndex], vars: &mut [CumulVar]) -> Result<(), Infeasible> {
        for i in (0..nodes.len().saturating_sub(1)).rev() {
            let transit = self.transit(nodes[i], nodes[i + 1]);
            let next = vars[i + 1];
            vars[i].set_max(next.max().saturating_sub(transit));
            vars[i].set_min(next.min().saturating_sub(transit).saturating_sub(self.slack));
            check(nodes[i], &vars[i])?;
        }
        Ok(())
    }

    /// Resolves the schedule of a node chain.
    ///
    /// The end node takes its earliest feasible time, and every earlier node
    /// the latest time compatible with its successor, which yields the
    /// shortest span among schedules finishing earliest.
    ///
    /// Both depot times are pushed towards each other: the start is not
    /// minimized, so a vehicle leaves as late as the route allows rather
    /// than at the earliest moment the depot window opens.
    pub fn resolve(&self, vehicle: usize, nodes: Vec<NodeIndex>) -> Result<RouteSchedule, Infeasible> {
        let vars = self.propagate(&nodes)?;
        let last = nodes.len() - 1;

        let mut cumuls = vec![0; nodes.len()];
        cumuls[last] = vars[last].min();
        for i in (0..last).rev() {
            let transit = self.transit(nodes[i], nodes[i + 1]);
            cumuls[i] = vars[i].max().min(cumuls[i + 1].saturating_sub(transit));
        }

        let span = cumuls[last] - cumuls[0];
        if span > self.max_span {
            return Err(Infeasible::SpanExceeded {
                vehicle,
                span,
                max_span: self.max_span,
            });
        }

        let arc_cost = nodes
            .windows(2)
            .map(|w| self.transit(w[0], w[1]))
            .fold(0i64, i64::saturating_add);
        let cost = if nodes.len() <= 2 {
            0
        } else {
            arc_cost.saturating_add(self.span_cost_coefficient.saturating_mul(span))
        };

        Ok(RouteSchedule {
            vehicle,
            nodes,
            cumuls,
            arc_cost,
            cost,
        })
    }

    /// Schedules `vehicle` visiting `stops` in order.
    pub fn schedule(&self, vehicle: usize, stops: &[usize]) -> Result<RouteSchedule, Infeasible> {
        self.resolve(vehicle, self.graph.route_nodes(vehicle, stops))
    }

    /// Returns `true` if `stops` can be served in order by one vehicle.
    pub fn is_feasible(&self, vehicle: usize, stops: &[usize]) -> bool {
        self.schedule(vehicle, stops).is_ok()
    }
}

fn check(node: NodeIndex, var: &CumulVar) -> Result<(), Infeasible> {
    if var.is_empty() {
        Err(Infeasible::EmptyDomain {
            node,
            min: var.min(),
            max: var.max(),
        })
    } else {
        Ok(())
    }
}
