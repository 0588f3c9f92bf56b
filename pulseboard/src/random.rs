//! Probabilistic gates for the periodic updaters.
//!
//! Several updaters only act on a fraction of their ticks (the activity feed
//! on 30% of ticks, service degradation on 10%). Each gate is a Bernoulli
//! trial drawn from the model's random source, so tests can seed the source
//! or pin the probability to 0 or 1.

use std::fmt;

use rand::distr::Bernoulli;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::ConfigError;

/// Default probability that a realtime tick appends an activity entry.
pub const DEFAULT_ACTIVITY_CHANCE: f64 = 0.3;

/// Default probability that a degradation tick degrades a service.
pub const DEFAULT_DEGRADATION_CHANCE: f64 = 0.1;

/// A Bernoulli trial with a fixed probability of success.
#[derive(Clone, Copy)]
pub struct Chance {
    probability: f64,
    gate: Gate,
}

#[derive(Clone, Copy)]
enum Gate {
    Always,
    Never,
    Trial(Bernoulli),
}

impl Chance {
    /// Create a gate that succeeds with the given probability.
    ///
    /// Fails when the probability lies outside `[0, 1]`.
    pub fn new(probability: f64) -> Result<Self, ConfigError> {
        let distribution = Bernoulli::new(probability)
            .map_err(|_| ConfigError::InvalidProbability(probability))?;
        Ok(Self {
            probability,
            gate: Gate::Trial(distribution),
        })
    }

    /// A gate that always succeeds.
    pub fn always() -> Self {
        Self {
            probability: 1.0,
            gate: Gate::Always,
        }
    }

    /// A gate that never succeeds.
    pub fn never() -> Self {
        Self {
            probability: 0.0,
            gate: Gate::Never,
        }
    }

    /// Probability of success.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Run one trial.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        match self.gate {
            Gate::Always => true,
            Gate::Never => false,
            Gate::Trial(distribution) => rng.sample(distribution),
        }
    }
}

impl fmt::Debug for Chance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Chance").field(&self.probability).finish()
    }
}

impl PartialEq for Chance {
    fn eq(&self, other: &Self) -> bool {
        self.probability == other.probability
    }
}

/// Build the model's random source.
///
/// A configured seed gives a reproducible session; otherwise the source is
/// seeded from the operating system.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chance_rejects_out_of_range() {
        assert!(Chance::new(1.5).is_err());
        assert!(Chance::new(-0.1).is_err());
        assert!(Chance::new(0.3).is_ok());
    }

    #[test]
    fn test_always_and_never() {
        let mut rng = rng_from_seed(Some(7));
        for _ in 0..100 {
            assert!(Chance::always().roll(&mut rng));
            assert!(!Chance::never().roll(&mut rng));
        }
    }

    #[test]
    fn test_fixed_gates_equal_validated_ones() {
        assert_eq!(Chance::always(), Chance::new(1.0).unwrap());
        assert_eq!(Chance::never(), Chance::new(0.0).unwrap());
        assert_eq!(Chance::always().probability(), 1.0);
    }

    #[test]
    fn test_seeded_rolls_are_reproducible() {
        let chance = Chance::new(DEFAULT_ACTIVITY_CHANCE).unwrap();
        let mut a = rng_from_seed(Some(42));
        let mut b = rng_from_seed(Some(42));

        let first: Vec<bool> = (0..32).map(|_| chance.roll(&mut a)).collect();
        let second: Vec<bool> = (0..32).map(|_| chance.roll(&mut b)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rate_is_roughly_the_probability() {
        let chance = Chance::new(0.3).unwrap();
        let mut rng = rng_from_seed(Some(1));
        let hits = (0..10_000).filter(|_| chance.roll(&mut rng)).count();
        assert!((2_500..3_500).contains(&hits), "hits = {}", hits);
    }
}
