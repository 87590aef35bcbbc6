//! The trivial single-worker specialization: no ring, no token, no threads.

use log::{debug, info};
use tsp_core::{BestTour, Graph};

use crate::bound::should_prune_on_pop;
use crate::expand::{expand_children, seed_for_worker, try_complete};
use crate::queue::NodeQueue;

/// Runs branch-and-bound search to completion on the current thread.
pub fn solve_serial(graph: &Graph, ceiling: f64) -> BestTour {
    let mut queue = NodeQueue::new();
    for node in seed_for_worker(graph, 0, 1, ceiling) {
        queue.push(node);
    }
    info!("serial search seeded with {} node(s), ceiling {ceiling:.1}", queue.len());

    let mut best = BestTour::new(ceiling);

    while let Some(node) = queue.pop() {
        if should_prune_on_pop(node.bound(), best.cost(), ceiling) {
            debug!("pruning at pop (bound {:.1}), draining {} queued node(s)", node.bound(), queue.len());
            queue.clear();
            continue;
        }

        if node.length() == graph.n() {
            if let Some((tour, cost)) = try_complete(graph, &node) {
                if best.offer(&tour, cost) {
                    debug!("new incumbent: cost {cost:.1}");
                }
            }
            continue;
        }

        for child in expand_children(graph, &node, best.cost(), ceiling) {
            queue.push(child);
        }
    }

    info!("serial search finished: cost {:.1}", best.cost());
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_the_four_city_square() {
        let g = Graph::from_edges(4, &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 0, 1.0), (0, 2, 2.0), (1, 3, 2.0)])
            .unwrap();
        let best = solve_serial(&g, 1e9);
        assert_eq!(best.cost(), 4.0);
        assert_eq!(best.tour(), Some(&[0, 1, 2, 3][..]));
    }

    #[test]
    fn ceiling_below_optimum_yields_no_solution() {
        let g = Graph::from_edges(4, &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 0, 1.0), (0, 2, 2.0), (1, 3, 2.0)])
            .unwrap();
        let best = solve_serial(&g, 3.5);
        assert_eq!(best.tour(), None);
    }

    #[test]
    fn two_city_instance() {
        let g = Graph::from_edges(2, &[(0, 1, 7.0)]).unwrap();
        let best = solve_serial(&g, 1e9);
        assert_eq!(best.cost(), 14.0);
        assert_eq!(best.tour(), Some(&[0, 1][..]));
    }

    #[test]
    fn triangle_instance() {
        let g = Graph::from_edges(3, &[(0, 1, 1.0), (1, 2, 2.0), (0, 2, 3.0)]).unwrap();
        let best = solve_serial(&g, 1e9);
        assert_eq!(best.cost(), 6.0);
        assert_eq!(best.tour(), Some(&[0, 1, 2][..]));
    }

    #[test]
    fn disconnected_graph_reports_no_solution() {
        // two disjoint triangles {0,1,2} and {3,4,5}: every city satisfies
        // the degree >= 2 requirement, but no edge crosses between them, so
        // no Hamiltonian tour exists.
        let g = Graph::from_edges(
            6,
            &[(0, 1, 1.0), (1, 2, 1.0), (0, 2, 1.0), (3, 4, 1.0), (4, 5, 1.0), (3, 5, 1.0)],
        )
        .unwrap();
        let best = solve_serial(&g, 1e9);
        assert_eq!(best.tour(), None);
    }

    #[test]
    fn five_city_complete_graph_breaks_ties_lexicographically() {
        // K5 with every edge the same weight: every Hamiltonian tour ties,
        // so the lexicographically smallest must win.
        let mut edges = Vec::new();
        for i in 0..5 {
            for j in (i + 1)..5 {
                edges.push((i, j, 1.0));
            }
        }
        let g = Graph::from_edges(5, &edges).unwrap();
        let best = solve_serial(&g, 1e9);
        assert_eq!(best.cost(), 5.0);
        assert_eq!(best.tour(), Some(&[0, 1, 2, 3, 4][..]));
    }
}
