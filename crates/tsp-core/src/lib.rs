//! Shared types for the tsp-bb solvers: the dense weighted [`graph::Graph`],
//! the [`node::SearchNode`] that a branch-and-bound frontier pops and pushes,
//! and the [`best::BestTour`] incumbent every engine converges on.

pub mod best;
pub mod graph;
pub mod node;

pub use best::BestTour;
pub use graph::{Graph, GraphError};
pub use node::SearchNode;
