//! Inter-route exchange operator.
//!
//! # Algorithm
//!
//! Swaps one stop of route R1 with one stop of route R2, each taking the
//! other's position:
//!
//! ```text
//! R1 = [a₁, ..., aᵢ, ..., aₙ]      R1' = [a₁, ..., bⱼ, ..., aₙ]
//! R2 = [b₁, ..., bⱼ, ..., bₘ]  →   R2' = [b₁, ..., aᵢ, ..., bₘ]
//! ```
//!
//! Both rewritten routes must stay feasible in the time dimension.
//!
//! # Complexity
//!
//! O(n²) candidates per scan over all route pairs.
//!
//! # Reference
//!
//! Osman, I.H. (1993). "Metastrategy simulated annealing and tabu search
//! algorithms for the vehicle routing problem", *Annals of Operations
//! Research* 41, 421-451.

use super::{consider, Move, Operator};
use crate::dimension::TimeDimension;
use crate::search::{Assignment, SearchMonitor};

/// Finds the best improving swap of two stops on different vehicles.
pub fn best_exchange(
    dimension: &TimeDimension<'_>,
    assignment: &Assignment,
    monitor: &mut SearchMonitor,
) -> Option<Move> {
    let mut best = None;
    let num_vehicles = assignment.num_vehicles();

    for v1 in 0..num_vehicles {
        let r1 = assignment.route(v1);
        for v2 in (v1 + 1)..num_vehicles {
            let r2 = assignment.route(v2);
            for i in 0..r1.len() {
                for j in 0..r2.len() {
                    if !monitor.try_evaluate() {
                        return best;
                    }
                    let mut new_r1 = r1.to_vec();
                    let mut new_r2 = r2.to_vec();
                    new_r1[i] = r2[j];
                    new_r2[j] = r1[i];
                    consider(
                        &mut best,
                        Operator::Exchange,
                        dimension,
                        assignment,
                        vec![(v1, new_r1), (v2, new_r2)],
                    );
                }
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::super::test_support::line_problem;
    use super::*;
    use crate::config::SolverConfig;
    use crate::graph::RouteGraph;
    use crate::models::RoutingProblem;

    #[test]
    fn test_swap_improves_crossed_routes() {
        let p = line_problem(5, 2);
        let graph = RouteGraph::new(5, 2, 0);
        let config = SolverConfig::default();
        let dim = TimeDimension::new(&p, &graph, &config);
        let mut monitor = SearchMonitor::new(&config, None);
        // [1, 4] = 80, [3, 2] = 60
        let assignment = Assignment::from_routes(&dim, vec![vec![1, 4], vec![3, 2]]).expect("feasible");

        let mv = best_exchange(&dim, &assignment, &mut monitor).expect("improving");
        assert_eq!(mv.operator, Operator::Exchange);
        assert_eq!(mv.delta, -20);
        let mut after = assignment.clone();
        after.apply(mv.changes);
        // first of two equal swaps wins
        assert_eq!(after.route(0), &[3, 4]);
        assert_eq!(after.route(1), &[1, 2]);
        assert_eq!(after.objective(), 120);
    }

    #[test]
    fn test_single_route_has_no_exchange() {
        let p = line_problem(4, 1);
        let graph = RouteGraph::new(4, 1, 0);
        let config = SolverConfig::default();
        let dim = TimeDimension::new(&p, &graph, &config);
        let mut monitor = SearchMonitor::new(&config, None);
        let assignment = Assignment::from_routes(&dim, vec![vec![3, 1, 2]]).expect("feasible");
        assert!(best_exchange(&dim, &assignment, &mut monitor).is_none());
        assert_eq!(monitor.evaluations(), 0);
    }

    #[test]
    fn test_infeasible_swaps_rejected() {
        // stop 3 is served late; putting it on the early route waits too long
        let p = RoutingProblem::from_rows(
            vec![
                vec![0, 50, 50, 50],
                vec![50, 0, 30, 10],
                vec![50, 30, 0, 10],
                vec![50, 10, 10, 0],
            ],
            vec![(0, 1440), (60, 80), (100, 120), (600, 620)],
            vec![0, 0, 0, 0],
            2,
            0,
        )
        .expect("valid");
        let graph = RouteGraph::new(4, 2, 0);
        let config = SolverConfig::default();
        let dim = TimeDimension::new(&p, &graph, &config);
        let mut monitor = SearchMonitor::new(&config, None);
        let assignment = Assignment::from_routes(&dim, vec![vec![1, 2], vec![3]]).expect("feasible");
        assert!(!dim.is_feasible(0, &[1, 3]));
        assert!(!dim.is_feasible(0, &[3, 2]));
        assert!(best_exchange(&dim, &assignment, &mut monitor).is_none());
        assert_eq!(monitor.evaluations(), 2);
    }
}
