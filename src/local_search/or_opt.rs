//! Or-opt operator.
//!
//! # Algorithm
//!
//! Moves a segment of 2 or 3 consecutive stops, orientation preserved, to
//! any other position of its own route or of another vehicle's route.
//! Single-stop moves are left to relocate.
//!
//! # Complexity
//!
//! O(n² × m) candidates per scan, with n stops and m vehicles.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use super::{consider, inserted, Move, Operator};
use crate::dimension::TimeDimension;
use crate::search::{Assignment, SearchMonitor};

const SEGMENT_LENGTHS: [usize; 2] = [2, 3];

/// Finds the best improving segment move.
pub fn best_or_opt(
    dimension: &TimeDimension<'_>,
    assignment: &Assignment,
    monitor: &mut SearchMonitor,
) -> Option<Move> {
    let mut best = None;

    for seg_len in SEGMENT_LENGTHS {
        for from_vehicle in 0..assignment.num_vehicles() {
            let from_route = assignment.route(from_vehicle);
            if from_route.len() < seg_len {
                continue;
            }
            for from in 0..=(from_route.len() - seg_len) {
                let segment = &from_route[from..from + seg_len];
                let mut reduced = from_route[..from].to_vec();
                reduced.extend_from_slice(&from_route[from + seg_len..]);

                for to_vehicle in 0..assignment.num_vehicles() {
                    let same = to_vehicle == from_vehicle;
                    let target = if same {
                        &reduced[..]
                    } else {
                        assignment.route(to_vehicle)
                    };

                    for to in 0..=target.len() {
                        if same && to == from {
                            continue;
                        }
                        if !monitor.try_evaluate() {
                            return best;
                        }
                        let routes = if same {
                            vec![(from_vehicle, inserted(target, to, segment))]
                        } else {
                            vec![
                                (from_vehicle, reduced.clone()),
                                (to_vehicle, inserted(target, to, segment)),
                            ]
                        };
                        consider(&mut best, Operator::OrOpt, dimension, assignment, routes);
                    }
                }
            }
        }
    }

    best
}
