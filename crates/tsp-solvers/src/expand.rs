//! Turning a popped node into children (or a completed tour), and seeding a
//! worker's queue at startup (§4.4, §4.6).

use tsp_core::{Graph, SearchNode};

use crate::bound::{child_bound, should_prune_child};

/// If `node` is a completed tour (`length == n`) and the closing edge back
/// to city 0 exists, returns its full tour and total cost. Returns `None`
/// for an incomplete tour or a missing closing edge — per §4.4, completion
/// cost always comes from the accumulated `cost` field, never `bound`.
pub fn try_complete(graph: &Graph, node: &SearchNode) -> Option<(Vec<u32>, f64)> {
    debug_assert_eq!(node.length(), graph.n(), "try_complete called on a partial tour");
    let closing = graph.weight(node.index() as usize, 0);
    if closing.is_infinite() {
        return None;
    }
    Some((node.tour().to_vec(), node.cost() + closing))
}

/// Generates the feasible, unpruned children of a popped partial-tour node.
///
/// `btourcost` is the current incumbent cost; `upper_ref` is the ceiling
/// (serial, shared-memory) or the worker's locally lagging limit
/// (token-ring) — see [`crate::bound::should_prune_child`].
pub fn expand_children(graph: &Graph, node: &SearchNode, btourcost: f64, upper_ref: f64) -> Vec<SearchNode> {
    debug_assert!(node.length() < graph.n(), "expand_children called on a completed tour");
    let a = node.index() as usize;
    let mut children = Vec::new();
    for b in 0..graph.n() {
        if b == a || node.tour().contains(&(b as u32)) {
            continue;
        }
        let weight = graph.weight(a, b);
        if weight.is_infinite() {
            continue;
        }
        let bound = child_bound(graph, node.bound(), a, b, weight);
        if should_prune_child(bound, btourcost, upper_ref) {
            continue;
        }
        children.push(node.child(b as u32, weight, bound));
    }
    children
}

/// Seeds a worker's queue with its share of city 0's length-2 children
/// (§4.6): in a `workers`-worker system, worker `rank` takes successors `i`
/// with `i mod workers == rank`, skipping the trivially-redundant length-1
/// root. Children whose bound already exceeds the ceiling are dropped, same
/// as any other expansion.
pub fn seed_for_worker(graph: &Graph, rank: usize, workers: usize, ceiling: f64) -> Vec<SearchNode> {
    let mut seeded = Vec::new();
    for i in 1..graph.n() {
        if i % workers != rank {
            continue;
        }
        let weight = graph.weight(0, i);
        if weight.is_infinite() {
            continue;
        }
        let bound = child_bound(graph, graph.root_bound(), 0, i, weight);
        if should_prune_child(bound, ceiling, ceiling) {
            continue;
        }
        seeded.push(SearchNode::root_child(i as u32, weight, bound));
    }
    seeded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Graph {
        // 0-1-2-3-0 cycle of weight 1, plus the two diagonals of weight 2.
        Graph::from_edges(4, &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 0, 1.0), (0, 2, 2.0), (1, 3, 2.0)]).unwrap()
    }

    #[test]
    fn seed_for_worker_splits_by_rank_modulo() {
        let g = square();
        let seeded_0 = seed_for_worker(&g, 0, 2, 1e9);
        let seeded_1 = seed_for_worker(&g, 1, 2, 1e9);
        // i in 1..4: i=1 -> rank 1, i=2 -> rank 0, i=3 -> rank 1.
        assert_eq!(seeded_0.iter().map(SearchNode::index).collect::<Vec<_>>(), vec![2]);
        assert_eq!(seeded_1.iter().map(SearchNode::index).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn expand_children_skips_visited_and_infinite_edges() {
        let g = square();
        let node = SearchNode::root_child(1, 1.0, g.root_bound());
        let children = expand_children(&g, &node, 1e9, 1e9);
        let indices: Vec<u32> = children.iter().map(SearchNode::index).collect();
        assert!(!indices.contains(&0));
        assert!(!indices.contains(&1));
        assert!(indices.contains(&2));
        assert!(indices.contains(&3));
    }

    #[test]
    fn try_complete_uses_accumulated_cost_not_bound() {
        let g = square();
        let node = SearchNode::root_child(1, 1.0, 999.0).child(2, 1.0, 999.0).child(3, 1.0, 999.0);
        let (tour, cost) = try_complete(&g, &node).unwrap();
        assert_eq!(tour, vec![0, 1, 2, 3]);
        assert_eq!(cost, 4.0); // 1+1+1 accumulated, plus the closing edge 3-0 of weight 1.
    }

    #[test]
    fn try_complete_returns_none_without_closing_edge() {
        let g = Graph::from_edges(4, &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (0, 2, 1.0), (1, 3, 1.0)]).unwrap();
        let node = SearchNode::root_child(1, 1.0, 0.0).child(2, 1.0, 0.0).child(3, 1.0, 0.0);
        assert!(try_complete(&g, &node).is_none());
    }
}
