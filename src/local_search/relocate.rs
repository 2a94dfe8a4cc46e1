//! Relocate operator.
//!
//! # Algorithm
//!
//! Removes one stop from its route and reinserts it at every position of
//! every route, its own included. The time dimension of both affected
//! routes is resolved for each candidate; infeasible candidates are
//! skipped.
//!
//! # Complexity
//!
//! O(n² × m) candidates per scan, with n stops and m vehicles.
//!
//! # Reference
//!
//! Savelsbergh, M.W.P. (1992). "The Vehicle Routing Problem with Time
//! Windows: Minimizing Route Duration", *ORSA Journal on Computing* 4(2),
//! 146-154.

use super::{consider, inserted, Move, Operator};
use crate::dimension::TimeDimension;
use crate::search::{Assignment, SearchMonitor};

/// Finds the best improving single-stop relocation.
pub fn best_relocate(
    dimension: &TimeDimension<'_>,
    assignment: &Assignment,
    monitor: &mut SearchMonitor,
) -> Option<Move> {
    let mut best = None;

    for from_vehicle in 0..assignment.num_vehicles() {
        let from_route = assignment.route(from_vehicle);
        for from_pos in 0..from_route.len() {
            let stop = from_route[from_pos];
            let mut reduced = from_route.to_vec();
            reduced.remove(from_pos);

            for to_vehicle in 0..assignment.num_vehicles() {
                let same = to_vehicle == from_vehicle;
                let target = if same {
                    &reduced[..]
                } else {
                    assignment.route(to_vehicle)
                };

                for to_pos in 0..=target.len() {
                    if same && to_pos == from_pos {
                        continue;
                    }
                    if !monitor.try_evaluate() {
                        return best;
                    }
                    let routes = if same {
                        vec![(from_vehicle, inserted(target, to_pos, &[stop]))]
                    } else {
                        vec![
                            (from_vehicle, reduced.clone()),
                            (to_vehicle, inserted(target, to_pos, &[stop])),
                        ]
                    };
                    consider(&mut best, Operator::Relocate, dimension, assignment, routes);
                }
            }
        }
    }

    best
}
