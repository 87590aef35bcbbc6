//! The token-ring engine (§4.6–§4.9): independent workers coordinating
//! purely by moving owned values across channels and a circulating
//! termination token — the in-process analogue of the original MPI
//! implementation. `crossbeam-channel` stands in for the network transport;
//! swapping it for a real one would not touch `worker::run_worker` at all.

mod token;
mod worker;

use crossbeam_channel::unbounded;
use log::info;
use tsp_core::{BestTour, Graph};

use crate::serial::solve_serial;
use worker::{run_worker, WorkerLinks};

pub use token::{Stage, Token};

/// Runs the token-ring engine with `workers` peers. `workers <= 1`
/// degenerates to [`solve_serial`], since a one-node ring has no peer to
/// pass a token to.
pub fn solve_token_ring(graph: &Graph, ceiling: f64, workers: usize) -> BestTour {
    if workers <= 1 {
        return solve_serial(graph, ceiling);
    }

    let (work_senders, work_receivers): (Vec<_>, Vec<_>) = (0..workers).map(|_| unbounded()).unzip();
    let (token_senders, token_receivers): (Vec<_>, Vec<_>) = (0..workers).map(|_| unbounded()).unzip();

    info!("token-ring search starting with {workers} worker(s), ceiling {ceiling:.1}");

    let results: Vec<BestTour> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|rank| {
                let links = WorkerLinks {
                    work_inbox: work_receivers[rank].clone(),
                    work_outboxes: work_senders.clone(),
                    token_in: token_receivers[rank].clone(),
                    token_out: token_senders[(rank + 1) % workers].clone(),
                };
                scope.spawn(move || run_worker(graph, ceiling, rank, workers, links))
            })
            .collect();
        handles.into_iter().map(|h| h.join().expect("token-ring worker thread panicked")).collect()
    });

    let mut overall = BestTour::new(ceiling);
    for worker_best in results {
        if let Some(tour) = worker_best.tour() {
            overall.offer(tour, worker_best.cost());
        }
    }
    info!("token-ring search finished: cost {:.1}", overall.cost());
    overall
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_serial_on_the_four_city_square() {
        let g = Graph::from_edges(4, &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 0, 1.0), (0, 2, 2.0), (1, 3, 2.0)])
            .unwrap();
        let best = solve_token_ring(&g, 1e9, 3);
        assert_eq!(best.cost(), 4.0);
        assert_eq!(best.tour(), Some(&[0, 1, 2, 3][..]));
    }

    #[test]
    fn ceiling_below_optimum_yields_no_solution() {
        let g = Graph::from_edges(4, &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 0, 1.0), (0, 2, 2.0), (1, 3, 2.0)])
            .unwrap();
        let best = solve_token_ring(&g, 3.5, 3);
        assert_eq!(best.tour(), None);
    }

    #[test]
    fn single_worker_degenerates_to_serial() {
        let g = Graph::from_edges(3, &[(0, 1, 1.0), (1, 2, 2.0), (0, 2, 3.0)]).unwrap();
        let best = solve_token_ring(&g, 1e9, 1);
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
            let ring = solve_token_ring(&g, 1e9, workers);
            assert_eq!(ring.cost(), serial.cost());
            assert_eq!(ring.tour(), serial.tour());
        }
    }

    #[test]
    fn five_city_complete_graph_breaks_ties_lexicographically() {
        let mut edges = Vec::new();
        for i in 0..5 {
            for j in (i + 1)..5 {
                edges.push((i, j, 1.0));
            }
        }
        let g = Graph::from_edges(5, &edges).unwrap();
        let best = solve_token_ring(&g, 1e9, 4);
        assert_eq!(best.cost(), 5.0);
        assert_eq!(best.tour(), Some(&[0, 1, 2, 3, 4][..]));
    }
}
