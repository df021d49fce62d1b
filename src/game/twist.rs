//! Random source for the one-time twist draw.
//!
//! The engine only ever asks for a single boolean, so the capability is a
//! single method. `SeededTwist` gives reproducible games from a seed and
//! `FixedTwist` forces either branch in tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait TwistSource {
    fn next_bool(&mut self) -> bool;
}

impl<T: TwistSource + ?Sized> TwistSource for &mut T {
    fn next_bool(&mut self) -> bool {
        (**self).next_bool()
    }
}

impl<T: TwistSource + ?Sized> TwistSource for Box<T> {
    fn next_bool(&mut self) -> bool {
        (**self).next_bool()
    }
}

#[derive(Debug, Clone)]
pub struct SeededTwist {
    rng: StdRng,
    probability: f64,
}

impl SeededTwist {
    /// Probabilities outside `0.0..=1.0` are clamped; NaN falls back to a fair coin.
    pub fn new(seed: u64, probability: f64) -> Self {
        let probability = if probability.is_nan() {
            0.5
        } else {
            probability.clamp(0.0, 1.0)
        };
        Self {
            rng: StdRng::seed_from_u64(seed),
            probability,
        }
    }

    pub fn fair(seed: u64) -> Self {
        Self::new(seed, 0.5)
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl TwistSource for SeededTwist {
    fn next_bool(&mut self) -> bool {
        self.rng.gen_bool(self.probability)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTwist(pub bool);

impl TwistSource for FixedTwist {
    fn next_bool(&mut self) -> bool {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut first = SeededTwist::fair(9);
        let mut second = SeededTwist::fair(9);
        for _ in 0..32 {
            assert_eq!(first.next_bool(), second.next_bool());
        }
    }

    #[test]
    fn extreme_probabilities_are_certain() {
        let mut never = SeededTwist::new(1, 0.0);
        let mut always = SeededTwist::new(1, 1.0);
        for _ in 0..16 {
            assert!(!never.next_bool());
            assert!(always.next_bool());
        }
    }

    #[test]
    fn probability_is_clamped() {
        assert_eq!(SeededTwist::new(0, 3.0).probability(), 1.0);
        assert_eq!(SeededTwist::new(0, -1.0).probability(), 0.0);
        assert_eq!(SeededTwist::new(0, f64::NAN).probability(), 0.5);
    }

    #[test]
    fn fair_coin_produces_both_sides() {
        let mut twist = SeededTwist::fair(1234);
        let draws: Vec<bool> = (0..64).map(|_| twist.next_bool()).collect();
        assert!(draws.iter().any(|d| *d));
        assert!(draws.iter().any(|d| !*d));
    }
}
