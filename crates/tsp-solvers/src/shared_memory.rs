//! The shared-memory engine (§4.10): OS threads sharing per-worker
//! mutex-guarded queues and a small set of atomic coordination flags. This is
//! the analogue of the original OpenMP implementation; it does not use the
//! token-ring transport at all.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use log::{debug, info};
use parking_lot::Mutex;
use tsp_core::{BestTour, Graph};

use crate::bound::should_prune_on_pop;
use crate::expand::{expand_children, seed_for_worker, try_complete};
use crate::queue::NodeQueue;
use crate::serial::solve_serial;

/// Runs the shared-memory engine with `workers` OS threads. `workers <= 1`
/// degenerates to [`solve_serial`], since there is no peer to coordinate
/// with.
pub fn solve_shared_memory(graph: &Graph, ceiling: f64, workers: usize) -> BestTour {
    if workers <= 1 {
        return solve_serial(graph, ceiling);
    }

    let queues: Vec<Mutex<NodeQueue>> = (0..workers).map(|_| Mutex::new(NodeQueue::new())).collect();
    let waiting: Vec<AtomicBool> = (0..workers).map(|_| AtomicBool::new(false)).collect();
    let finish = AtomicUsize::new(0);
    let best = Mutex::new(BestTour::new(ceiling));

    for (rank, queue) in queues.iter().enumerate() {
        let mut guard = queue.lock();
        for node in seed_for_worker(graph, rank, workers, ceiling) {
            guard.push(node);
        }
    }
    info!("shared-memory search seeded across {workers} worker(s), ceiling {ceiling:.1}");

    std::thread::scope(|scope| {
        for rank in 0..workers {
            let queues = &queues;
            let waiting = &waiting;
            let finish = &finish;
            let best = &best;
            scope.spawn(move || run_worker(graph, ceiling, workers, rank, queues, waiting, finish, best));
        }
    });

    let result = best.into_inner();
    info!("shared-memory search finished: cost {:.1}", result.cost());
    result
}

#[allow(clippy::too_many_arguments)]
fn run_worker(
    graph: &Graph,
    ceiling: f64,
    workers: usize,
    rank: usize,
    queues: &[Mutex<NodeQueue>],
    waiting: &[AtomicBool],
    finish: &AtomicUsize,
    best: &Mutex<BestTour>,
) {
    loop {
        let popped = queues[rank].lock().pop();
        let Some(node) = popped else {
            if go_idle(rank, workers, waiting, finish) {
                return;
            }
            continue;
        };

        let btourcost = best.lock().cost();
        if should_prune_on_pop(node.bound(), btourcost, ceiling) {
            debug!("worker {rank} pruning at pop (bound {:.1})", node.bound());
            queues[rank].lock().clear();
            continue;
        }

        if node.length() == graph.n() {
            if let Some((tour, cost)) = try_complete(graph, &node) {
                if best.lock().offer(&tour, cost) {
                    debug!("worker {rank} found new incumbent: cost {cost:.1}");
                }
            }
            continue;
        }

        let btourcost = best.lock().cost();
        for child in expand_children(graph, &node, btourcost, ceiling) {
            donate_or_enqueue(child, rank, workers, queues, waiting, finish);
        }
    }
}

/// Marks `rank` idle and spins until either new work arrives (its queue is
/// non-empty again) or every worker has gone idle, at which point the last
/// worker to arrive clears every `waiting` flag and all workers exit.
/// Returns `true` once it is safe for the caller to terminate.
fn go_idle(rank: usize, workers: usize, waiting: &[AtomicBool], finish: &AtomicUsize) -> bool {
    waiting[rank].store(true, Ordering::SeqCst);
    let paused_count = finish.fetch_add(1, Ordering::SeqCst) + 1;
    if paused_count == workers {
        for flag in waiting {
            flag.store(false, Ordering::SeqCst);
        }
    }

    while waiting[rank].load(Ordering::SeqCst) {
        std::hint::spin_loop();
    }

    finish.load(Ordering::SeqCst) == workers
}

/// Pushes `child` onto the first waiting worker's queue (waking it), or onto
/// the donor's own queue if no worker is currently idle.
fn donate_or_enqueue(
    child: tsp_core::SearchNode,
    rank: usize,
    workers: usize,
    queues: &[Mutex<NodeQueue>],
    waiting: &[AtomicBool],
    finish: &AtomicUsize,
) {
    for target in 0..workers {
        if target != rank
            && waiting[target].compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst).is_ok()
        {
            queues[target].lock().push(child);
            finish.fetch_sub(1, Ordering::SeqCst);
            return;
        }
    }
    queues[rank].lock().push(child);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_serial_on_the_four_city_square() {
        let g = Graph::from_edges(4, &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 0, 1.0), (0, 2, 2.0), (1, 3, 2.0)])
            .unwrap();
        let best = solve_shared_memory(&g, 1e9, 4);
        assert_eq!(best.cost(), 4.0);
        assert_eq!(best.tour(), Some(&[0, 1, 2, 3][..]));
    }

    #[test]
    fn ceiling_below_optimum_yields_no_solution() {
        let g = Graph::from_edges(4, &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 0, 1.0), (0, 2, 2.0), (1, 3, 2.0)])
            .unwrap();
        let best = solve_shared_memory(&g, 3.5, 4);
        assert_eq!(best.tour(), None);
    }

    #[test]
    fn single_worker_degenerates_to_serial() {
        let g = Graph::from_edges(3, &[(0, 1, 1.0), (1, 2, 2.0), (0, 2, 3.0)]).unwrap();
        let best = solve_shared_memory(&g, 1e9, 1);
        assert_eq!(best.cost(), 6.0);
        assert_eq!(best.tour(), Some(&[0, 1, 2][..]));
    }

    #[test]
    fn worker_count_does_not_change_the_optimum() {
        let edges = [
            (0, 1, 2.0),
            (1, 2, 3.0),
            (2, 3, 1.0),
            (3, 4, 4.0),
            (4, 0, 2.0),
            (0, 2, 5.0),
            (1, 3, 5.0),
            (2, 4, 5.0),
            (3, 0, 5.0),
            (4, 1, 5.0),
        ];
        let g = Graph::from_edges(5, &edges).unwrap();
        let serial = solve_serial(&g, 1e9);
        for workers in [2, 4, 8] {
            let parallel = solve_shared_memory(&g, 1e9, workers);
            assert_eq!(parallel.cost(), serial.cost());
            assert_eq!(parallel.tour(), serial.tour());
        }
    }
}
