//! The unit of work passed through a worker's queue: a partial tour, its
//! accumulated cost, and its admissible bound.

/// A node in the branch-and-bound search tree: a partial tour rooted at
/// city 0, its accumulated cost, and its lower bound on any completion.
///
/// `Ord` is implemented **inverted** relative to `(bound, index)` so that
/// [`std::collections::BinaryHeap`] — a max-heap — pops the node with the
/// lowest bound first, ties broken by the lowest frontier city. This mirrors
/// the teacher crate's own `InvWeightUnEdge` idiom rather than wrapping every
/// push/pop site in `std::cmp::Reverse`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchNode {
    tour: Vec<u32>,
    cost: f64,
    bound: f64,
}

impl SearchNode {
    /// Builds the length-2 node reached from city 0 via `first`.
    pub fn root_child(first: u32, cost: f64, bound: f64) -> Self {
        Self { tour: vec![0, first], cost, bound }
    }

    /// Builds the child reached by appending `next` to `self`.
    pub fn child(&self, next: u32, edge_weight: f64, bound: f64) -> Self {
        let mut tour = self.tour.clone();
        tour.push(next);
        Self { tour, cost: self.cost + edge_weight, bound }
    }

    pub fn tour(&self) -> &[u32] {
        &self.tour
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn bound(&self) -> f64 {
        self.bound
    }

    pub fn length(&self) -> usize {
        self.tour.len()
    }

    /// The frontier city: the last entry of the partial tour.
    pub fn index(&self) -> u32 {
        *self.tour.last().expect("tour is never empty")
    }

    /// Packs this node into the manual wire format used for WORK messages:
    /// `[length:u32][index:u32][cost:f64][bound:f64][tour:u32*length]`.
    pub fn to_wire(&self) -> Vec<u8> {
        let length = self.tour.len() as u32;
        let mut buf = Vec::with_capacity(8 + 16 + self.tour.len() * 4);
        buf.extend_from_slice(&length.to_le_bytes());
        buf.extend_from_slice(&self.index().to_le_bytes());
        buf.extend_from_slice(&self.cost.to_le_bytes());
        buf.extend_from_slice(&self.bound.to_le_bytes());
        for &city in &self.tour {
            buf.extend_from_slice(&city.to_le_bytes());
        }
        buf
    }

    /// Inverse of [`SearchNode::to_wire`]. Returns `None` on truncated or
    /// length-inconsistent input.
    pub fn from_wire(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 24 {
            return None;
        }
        let length = u32::from_le_bytes(bytes[0..4].try_into().ok()?) as usize;
        let _index = u32::from_le_bytes(bytes[4..8].try_into().ok()?);
        let cost = f64::from_le_bytes(bytes[8..16].try_into().ok()?);
        let bound = f64::from_le_bytes(bytes[16..24].try_into().ok()?);

        let tour_bytes = &bytes[24..];
        if tour_bytes.len() != length * 4 {
            return None;
        }
        let tour = tour_bytes.chunks_exact(4).map(|c| u32::from_le_bytes(c.try_into().unwrap())).collect();

        Some(Self { tour, cost, bound })
    }
}

impl Eq for SearchNode {}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchNode {
    /// Inverted `(bound, index)` order: the node `std::cmp::Ordering::Greater`
    /// of this comparison is the one a min-heap-by-`(bound, index)` would pop
    /// first, so that pushing these nodes into a `BinaryHeap` yields a
    /// min-heap without a `Reverse` wrapper at every call site.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .bound
            .total_cmp(&self.bound)
            .then_with(|| other.index().cmp(&self.index()))
    }
}
