//! A minimal, non-cryptographic PRNG for donation target selection.
//!
//! The choice of recipient is a heuristic (§4.8, §9), not a correctness
//! concern, so this avoids pulling in a general-purpose `rand` dependency
//! for a single `next_range` call per donation.

use std::time::{SystemTime, UNIX_EPOCH};

pub struct XorShiftRng(u64);

impl XorShiftRng {
    /// Seeds from the wall clock; non-deterministic by design (§6: "random
    /// seed for donation target selection is time-based; this is explicitly
    /// allowed to vary run-to-run without affecting final result").
    pub fn seeded() -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos() as u64).unwrap_or(1);
        Self(nanos | 1)
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// A pseudo-random value in `0..bound`. Panics if `bound == 0`.
    pub fn next_range(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }
}
