//! Seeded linear congruential generator for reproducible fixtures.
//!
//! `state' = (state * 9301 + 49297) mod 233280`, value `state' / 233280`.
//! The generator carries its state explicitly; there is no global source of
//! randomness anywhere in the fixtures.

/// Seed used by every demo dataset.
pub const DEMO_SEED: u32 = 12345;

const MULTIPLIER: u64 = 9301;
const INCREMENT: u64 = 49297;
const MODULUS: u64 = 233_280;

/// Advances a state, returning the draw in `[0, 1)` and the next state.
#[must_use]
pub fn next_state(state: u32) -> (f64, u32) {
    let next = (u64::from(state) * MULTIPLIER + INCREMENT) % MODULUS;
    // next < MODULUS, which fits in u32
    let next = next as u32;
    (f64::from(next) / MODULUS as f64, next)
}

/// Stateful wrapper around [`next_state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// Creates a generator from a seed.
    #[must_use]
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Creates a generator seeded with [`DEMO_SEED`].
    #[must_use]
    pub fn demo() -> Self {
        Self::new(DEMO_SEED)
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Next draw in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        let (value, state) = next_state(self.state);
        self.state = state;
        value
    }

    /// `floor(draw * span) + offset`.
    pub fn int(&mut self, span: u32, offset: i64) -> i64 {
        (self.next_f64() * f64::from(span)).floor() as i64 + offset
    }

    /// Draws an index below `len`.
    pub fn index(&mut self, len: usize) -> usize {
        ((self.next_f64() * len as f64).floor() as usize).min(len.saturating_sub(1))
    }

    /// Picks one element.
    ///
    /// # Panics
    ///
    /// Panics if `items` is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.index(items.len())]
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::demo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_known_sequence() {
        // (12345 * 9301 + 49297) % 233280 = 96382
        let (value, state) = next_state(DEMO_SEED);
        assert_eq!(state, 96_382);
        assert_relative_eq!(value, 96_382.0 / 233_280.0);

        let mut lcg = Lcg::demo();
        assert_relative_eq!(lcg.next_f64(), value);
        assert_eq!(lcg.state(), state);
    }

    #[test]
    fn test_reproducible() {
        let a: Vec<f64> = {
            let mut lcg = Lcg::demo();
            (0..100).map(|_| lcg.next_f64()).collect()
        };
        let b: Vec<f64> = {
            let mut lcg = Lcg::demo();
            (0..100).map(|_| lcg.next_f64()).collect()
        };
        assert_eq!(a, b);
        assert!(a.iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn test_pick_and_int_ranges() {
        let mut lcg = Lcg::new(1);
        let items = ["a", "b", "c"];
        for _ in 0..200 {
            assert!(items.contains(lcg.pick(&items)));
            let n = lcg.int(900, 100);
            assert!((100..1000).contains(&n));
        }
    }
}
