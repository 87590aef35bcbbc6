//! Branch-and-bound solvers for the exact symmetric Travelling Salesperson
//! Problem, exposed as three independent entry points sharing the same
//! [`tsp_core::Graph`], [`tsp_core::SearchNode`], and [`tsp_core::BestTour`]
//! building blocks:
//!
//! - [`solve_serial`]: the trivial single-worker specialization.
//! - [`solve_shared_memory`]: OS threads coordinating through mutex-guarded
//!   per-worker queues and atomic flags (§4.10).
//! - [`solve_token_ring`]: independent workers coordinating purely by
//!   passing owned values across channels and a circulating termination
//!   token (§4.6–§4.9).

pub mod bound;
pub mod expand;
pub mod queue;
pub mod rng;
pub mod serial;
pub mod shared_memory;
pub mod token_ring;

pub use serial::solve_serial;
pub use shared_memory::solve_shared_memory;
pub use token_ring::solve_token_ring;

use tsp_core::BestTour;

/// The final outcome of a solver run: either an optimal tour within the
/// ceiling, or confirmation that none exists. `NoSolution` is not an error —
/// it is a normal outcome, reported on stdout as the literal line
/// `NO SOLUTION`.
#[derive(Debug, Clone, PartialEq)]
pub enum Solution {
    Tour { tour: Vec<u32>, cost: f64 },
    NoSolution,
}

impl From<BestTour> for Solution {
    fn from(best: BestTour) -> Self {
        match best.tour() {
            Some(tour) => Solution::Tour { tour: tour.to_vec(), cost: best.cost() },
            None => Solution::NoSolution,
        }
    }
}
