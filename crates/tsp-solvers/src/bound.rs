//! The admissible lower-bound estimator (§4.3): a Little/Held–Karp-style
//! 1-tree relaxation over the two smallest incident-edge weights per city.

use tsp_core::Graph;

/// Computes `child.bound` for the edge `(a, b)` extending a parent whose own
/// bound was `parent_bound`.
///
/// The root bound `L0` already charges every city for its two cheapest
/// incident edges, halved since each edge is shared by both endpoints.
/// Committing to `(a, b)` consumes one incident slot at each endpoint: the
/// slot deducted is `short1` unless `w(a, b)` already dominates it, in which
/// case `short2` is deducted instead, keeping the estimate admissible while
/// tightening it.
pub fn child_bound(graph: &Graph, parent_bound: f64, a: usize, b: usize, weight: f64) -> f64 {
    let ca = if weight >= graph.short2(a) { graph.short2(a) } else { graph.short1(a) };
    let cb = if weight >= graph.short2(b) { graph.short2(b) } else { graph.short1(b) };
    parent_bound + weight - (ca + cb) / 2.0
}

/// Pop-time pruning (§4.5): a popped node whose bound is no better than the
/// current incumbent, or worse than the applicable ceiling, can be dropped —
/// along with the rest of its worker's queue, since nothing behind it in
/// bound order can do better.
///
/// `upper_ref` is the user's ceiling for the serial and shared-memory
/// engines, or a worker's locally lagging `limit` for the token-ring engine
/// (§4.9); either is always `<= ceiling`, so pruning against it is always
/// safe.
pub fn should_prune_on_pop(bound: f64, btourcost: f64, upper_ref: f64) -> bool {
    bound >= btourcost || bound > upper_ref
}

/// Expansion-time pruning (§4.4): a child is dropped if its bound cannot
/// possibly beat either the current incumbent or the applicable ceiling.
pub fn should_prune_child(bound: f64, btourcost: f64, upper_ref: f64) -> bool {
    bound > btourcost || bound > upper_ref
}
