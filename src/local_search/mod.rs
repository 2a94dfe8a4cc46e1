//! Local search operators for improving a feasible assignment.
//!
//! - [`best_relocate`] — Move one stop to another position or vehicle
//! - [`best_exchange`] — Swap two stops between vehicles
//! - [`best_two_opt`] — Reverse a segment within one route
//! - [`best_or_opt`] — Move a segment of 2 or 3 stops to another position or vehicle
//!
//! Every operator scans its whole neighborhood in a fixed order, resolves
//! the time dimension of each candidate, and returns the feasible move with
//! the largest objective decrease. Scanning stops early when the monitor's
//! budget runs out, returning the best move seen so far.

mod exchange;
mod or_opt;
mod relocate;
mod two_opt;

pub use exchange::best_exchange;
pub use or_opt::best_or_opt;
pub use relocate::best_relocate;
pub use two_opt::best_two_opt;

use crate::dimension::TimeDimension;
use crate::search::{Assignment, RouteChange, SearchMonitor};

/// A local search neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Relocate,
    Exchange,
    TwoOpt,
    OrOpt,
}

impl Operator {
    /// Default scanning order.
    pub const ALL: [Operator; 4] = [
        Operator::Relocate,
        Operator::Exchange,
        Operator::TwoOpt,
        Operator::OrOpt,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operator::Relocate => "relocate",
            Operator::Exchange => "exchange",
            Operator::TwoOpt => "two_opt",
            Operator::OrOpt => "or_opt",
        }
    }

    /// Best improving move of this neighborhood, if any.
    pub fn best_move(
        &self,
        dimension: &TimeDimension<'_>,
        assignment: &Assignment,
        monitor: &mut SearchMonitor,
    ) -> Option<Move> {
        match self {
            Operator::Relocate => best_relocate(dimension, assignment, monitor),
            Operator::Exchange => best_exchange(dimension, assignment, monitor),
            Operator::TwoOpt => best_two_opt(dimension, assignment, monitor),
            Operator::OrOpt => best_or_opt(dimension, assignment, monitor),
        }
    }
}

/// An improving move: the routes it rewrites and the objective change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub operator: Operator,
    pub changes: Vec<RouteChange>,
    pub delta: i64,
}

/// Schedules the candidate routes and keeps them as `best` if every one is
/// feasible and the objective strictly decreases by more than `best` does.
fn consider(
    best: &mut Option<Move>,
    operator: Operator,
    dimension: &TimeDimension<'_>,
    assignment: &Assignment,
    routes: Vec<(usize, Vec<usize>)>,
) {
    let mut changes = Vec::with_capacity(routes.len());
    for (vehicle, stops) in routes {
        match RouteChange::new(dimension, vehicle, stops) {
            Ok(change) => changes.push(change),
            Err(_) => return,
        }
    }
    let delta = assignment.delta(&changes);
    if delta < 0 && best.as_ref().is_none_or(|b| delta < b.delta) {
        *best = Some(Move {
            operator,
            changes,
            delta,
        });
    }
}

fn inserted(route: &[usize], position: usize, segment: &[usize]) -> Vec<usize> {
    let mut stops = Vec::with_capacity(route.len() + segment.len());
    stops.extend_from_slice(&route[..position]);
    stops.extend_from_slice(segment);
    stops.extend_from_slice(&route[position..]);
    stops
}
