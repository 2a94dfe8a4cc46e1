//! Intra-route 2-opt operator.
//!
//! # Algorithm
//!
//! For every pair of positions `i < j` in a route, reverses the segment
//! `[i..=j]`:
//!
//! ```text
//! [.., r[i-1], r[i], .., r[j], r[j+1], ..] → [.., r[i-1], r[j], .., r[i], r[j+1], ..]
//! ```
//!
//! Reversal changes the arrival time at every stop in the segment, so each
//! candidate is rescheduled in full rather than scored by edge deltas.
//!
//! # Complexity
//!
//! O(n²) candidates per route, O(n) per resolution.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use super::{consider, Move, Operator};
use crate::dimension::TimeDimension;
use crate::search::{Assignment, SearchMonitor};

/// Finds the best improving segment reversal over all routes.
pub fn best_two_opt(
    dimension: &TimeDimension<'_>,
    assignment: &Assignment,
    monitor: &mut SearchMonitor,
) -> Option<Move> {
    let mut best = None;

    for vehicle in 0..assignment.num_vehicles() {
        let route = assignment.route(vehicle);
        let n = route.len();
        for i in 0..n.saturating_sub(1) {
            for j in (i + 1)..n {
                if !monitor.try_evaluate() {
                    return best;
                }
                let mut candidate = route.to_vec();
                candidate[i..=j].reverse();
                consider(
                    &mut best,
                    Operator::TwoOpt,
                    dimension,
                    assignment,
                    vec![(vehicle, candidate)],
                );
            }
        }
    }

    best
}
