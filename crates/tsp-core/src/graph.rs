//! The dense, replicated graph representation shared by every solver.

use thiserror::Error;

/// One input edge as read off the wire: two city indices and a weight.
pub type RawEdge = (usize, usize, f64);

/// A symmetric weighted graph over cities `0..n`, stored as a dense `n x n`
/// matrix plus the two smallest incident-edge weights per city.
///
/// Missing edges carry weight [`f64::INFINITY`]. Built once by
/// [`Graph::from_edges`] and never mutated afterwards; every worker holds its
/// own copy rather than sharing one behind a lock.
#[derive(Debug, Clone)]
pub struct Graph {
    n: usize,
    w: Vec<f64>,
    short1: Vec<f64>,
    short2: Vec<f64>,
}

/// Why a requested graph could not be built.
#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("city count must be at least 2, got {0}")]
    TooFewCities(usize),
    #[error("edge ({u}, {v}) references a city outside [0, {n})")]
    CityOutOfRange { u: usize, v: usize, n: usize },
    #[error("edge ({u}, {v}) is a self-loop")]
    SelfLoop { u: usize, v: usize },
    #[error("edge ({u}, {v}) has non-positive weight {weight}")]
    NonPositiveWeight { u: usize, v: usize, weight: f64 },
    #[error("city {0} has fewer than two incident edges")]
    InsufficientDegree(usize),
}

impl Graph {
    /// Builds a graph from an edge list, applying the rejection rules for
    /// malformed input: out-of-range endpoints, self-loops, non-positive
    /// weights, and cities left with fewer than two incident edges (the
    /// structural `n == 2` case is exempt, since both cities there have
    /// exactly one incident edge by construction).
    pub fn from_edges(n: usize, edges: &[RawEdge]) -> Result<Self, GraphError> {
        if n < 2 {
            return Err(GraphError::TooFewCities(n));
        }

        let mut w = vec![f64::INFINITY; n * n];
        let mut short1 = vec![f64::INFINITY; n];
        let mut short2 = vec![f64::INFINITY; n];

        for &(u, v, weight) in edges {
            if u >= n || v >= n {
                return Err(GraphError::CityOutOfRange { u, v, n });
            }
            if u == v {
                return Err(GraphError::SelfLoop { u, v });
            }
            if weight <= 0.0 {
                return Err(GraphError::NonPositiveWeight { u, v, weight });
            }

            w[u * n + v] = weight;
            w[v * n + u] = weight;

            for x in [u, v] {
                if weight < short1[x] {
                    short2[x] = short1[x];
                    short1[x] = weight;
                } else if weight < short2[x] {
                    short2[x] = weight;
                }
            }
        }

        if n == 2 {
            // both cities have exactly one incident edge, counted as both
            // their smallest and second-smallest.
            short2[0] = short1[0];
            short2[1] = short1[1];
        } else {
            for city in 0..n {
                if short2[city].is_infinite() {
                    return Err(GraphError::InsufficientDegree(city));
                }
            }
        }

        Ok(Self { n, w, short1, short2 })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// The weight of edge `(a, b)`, or `+inf` if no such edge exists.
    pub fn weight(&self, a: usize, b: usize) -> f64 {
        self.w[a * self.n + b]
    }

    /// The smallest weight incident to `city`.
    pub fn short1(&self, city: usize) -> f64 {
        self.short1[city]
    }

    /// The second-smallest weight incident to `city`.
    pub fn short2(&self, city: usize) -> f64 {
        self.short2[city]
    }

    /// The root lower bound `L0 = (sum of short1[i] + short2[i]) / 2`,
    /// admissible for any complete tour.
    pub fn root_bound(&self) -> f64 {
        let sum: f64 = (0..self.n).map(|i| self.short1[i] + self.short2[i]).sum();
        sum / 2.0
    }
}
