//! One token-ring peer's main loop (§4.6–§4.9).

use crossbeam_channel::{Receiver, Sender};
use log::{debug, trace};
use tsp_core::{BestTour, Graph, SearchNode};

use crate::bound::should_prune_on_pop;
use crate::expand::{expand_children, seed_for_worker, try_complete};
use crate::queue::NodeQueue;
use crate::rng::XorShiftRng;

use super::token::{Stage, Token};

/// Donation threshold: workers with a deep queue donate a popped node after
/// this many pops since their last donation (§4.8, §9). Empirically tuned in
/// the original distributed source; kept as named constants here so a future
/// retune has one place to land.
const T_SMALL_FEW_WORKERS: usize = 20_000;
const T_SMALL_MANY_WORKERS: usize = 7_500;
const MANY_WORKERS_THRESHOLD: usize = 16;

/// The wiring one worker needs to talk to its peers: a private WORK inbox, a
/// sender per rank for donating out, and the ring's TOKEN link to and from
/// its neighbours.
pub struct WorkerLinks {
    pub work_inbox: Receiver<SearchNode>,
    pub work_outboxes: Vec<Sender<SearchNode>>,
    pub token_in: Receiver<Token>,
    pub token_out: Sender<Token>,
}

pub fn run_worker(graph: &Graph, ceiling: f64, rank: usize, workers: usize, links: WorkerLinks) -> BestTour {
    let n = graph.n();
    let t_small = if workers < MANY_WORKERS_THRESHOLD { T_SMALL_FEW_WORKERS } else { T_SMALL_MANY_WORKERS };

    let mut queue = NodeQueue::new();
    for node in seed_for_worker(graph, rank, workers, ceiling) {
        queue.push(node);
    }

    let mut best = BestTour::new(ceiling);
    let mut limit = ceiling;
    let mut paused = queue.is_empty();
    let mut pops = 0usize;
    let mut noted: Option<usize> = None;
    let mut prev_noted: Option<usize> = None;
    let mut rng = XorShiftRng::seeded();

    if rank == 0 {
        let _ = links.token_out.send(Token::new(workers, ceiling));
    }

    loop {
        while let Ok(node) = links.work_inbox.try_recv() {
            queue.push(node);
            paused = false;
        }

        if let Ok(mut token) = links.token_in.try_recv() {
            token.paused[rank] = paused;
            limit = limit.min(token.gbest);
            token.gbest = token.gbest.min(best.cost());

            if rank == 0 {
                token.stage = match token.stage {
                    Stage::Candidate => Stage::Commit,
                    _ if paused => Stage::Candidate,
                    _ => Stage::Normal,
                };
            } else if token.stage == Stage::Candidate && !paused {
                token.stage = Stage::Normal;
            }

            if token.stage == Stage::Commit {
                debug!("worker {rank} observed commit, forwarding and terminating");
                let _ = links.token_out.send(token);
                break;
            }

            noted = None;
            if queue.len() > n {
                for (k, idle) in token.paused.iter_mut().enumerate() {
                    if *idle && k != rank && Some(k) != prev_noted {
                        noted = Some(k);
                        *idle = false;
                        break;
                    }
                }
            }

            let _ = links.token_out.send(token);
        }

        let Some(node) = queue.pop() else {
            paused = true;
            continue;
        };
        pops += 1;

        if should_prune_on_pop(node.bound(), best.cost(), limit) {
            trace!("worker {rank} pruning at pop (bound {:.1})", node.bound());
            queue.clear();
            continue;
        }

        if node.length() == n {
            if let Some((tour, cost)) = try_complete(graph, &node) {
                if best.offer(&tour, cost) {
                    debug!("worker {rank} found new incumbent: cost {cost:.1}");
                }
            }
            continue;
        }

        if should_donate(pops, t_small, noted, prev_noted) {
            let target = donation_target(rank, workers, noted, &mut rng);
            trace!("worker {rank} donating node at city {} to worker {target}", node.index());
            let _ = links.work_outboxes[target].send(node);
            if noted.is_some() {
                prev_noted = noted;
            } else {
                pops = 0;
            }
        } else {
            for child in expand_children(graph, &node, best.cost(), limit) {
                queue.push(child);
            }
        }
    }

    queue.clear();
    best
}

fn should_donate(pops: usize, t_small: usize, noted: Option<usize>, prev_noted: Option<usize>) -> bool {
    pops > t_small || (noted.is_some() && noted != prev_noted)
}

fn donation_target(rank: usize, workers: usize, noted: Option<usize>, rng: &mut XorShiftRng) -> usize {
    match noted {
        Some(target) => target,
        None => {
            let candidate = rng.next_range(workers);
            if candidate == rank { (rank + workers - 1) % workers } else { candidate }
        }
    }
}
