// Random Sampling
// Owned pseudorandom generator with reseeding and prime rejection sampling

use std::time::{SystemTime, UNIX_EPOCH};

use num_bigint::RandBigInt;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, trace};

use super::bigint::{is_prime, RsaBigInt};
use crate::util::config::{ConfigError, MIN_WIDTH};

/// A bit width wide enough to hold a prime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PrimeWidth(u64);

impl PrimeWidth {
    /// `name` labels the error when `bits` is below [`MIN_WIDTH`].
    pub fn new(name: &'static str, bits: u64) -> Result<Self, ConfigError> {
        if bits < MIN_WIDTH {
            return Err(ConfigError::WidthTooSmall { name, width: bits });
        }
        Ok(Self(bits))
    }

    pub fn bits(self) -> u64 {
        self.0
    }
}

/// Where a [`RandomSampler`] takes its seeds from.
pub trait SeedSource {
    fn next_seed(&mut self) -> u64;
}

/// Seconds since the UNIX epoch.
///
/// Two reseeds within the same second replay the same stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock;

impl SeedSource for WallClock {
    fn next_seed(&mut self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    }
}

/// Deterministic seeds `s, s + 1, s + 2, ...`
#[derive(Debug, Clone, Copy)]
pub struct FixedSeed {
    next: u64,
}

impl FixedSeed {
    pub fn new(seed: u64) -> Self {
        Self { next: seed }
    }
}

impl SeedSource for FixedSeed {
    fn next_seed(&mut self) -> u64 {
        let seed = self.next;
        self.next = self.next.wrapping_add(1);
        seed
    }
}

/// Either built-in seed source, picked at runtime from configuration.
#[derive(Debug, Clone, Copy)]
pub enum Seeds {
    Clock(WallClock),
    Fixed(FixedSeed),
}

impl SeedSource for Seeds {
    fn next_seed(&mut self) -> u64 {
        match self {
            Seeds::Clock(clock) => clock.next_seed(),
            Seeds::Fixed(fixed) => fixed.next_seed(),
        }
    }
}

/// Random integers and primes of a given bit width.
pub struct RandomSampler<R = StdRng, S = WallClock> {
    rng: R,
    seeds: S,
    last_seed: u64,
    reseeds: u64,
    repeats: u64,
}

impl<R, S> RandomSampler<R, S>
where
    R: RngCore + SeedableRng,
    S: SeedSource,
{
    /// Create a sampler seeded with the first value of `seeds`.
    pub fn new(mut seeds: S) -> Self {
        let seed = seeds.next_seed();
        Self {
            rng: R::seed_from_u64(seed),
            seeds,
            last_seed: seed,
            reseeds: 0,
            repeats: 0,
        }
    }

    /// Reinitialize the generator from the next seed.
    pub fn reseed(&mut self) {
        let seed = self.seeds.next_seed();
        if seed == self.last_seed {
            self.repeats += 1;
            debug!(seed, repeats = self.repeats, "seed repeated, replaying the same stream");
        } else {
            trace!(seed, "reseeding generator");
        }
        self.rng = R::seed_from_u64(seed);
        self.last_seed = seed;
        self.reseeds += 1;
    }

    /// Number of reseeds since construction.
    pub fn reseeds(&self) -> u64 {
        self.reseeds
    }

    /// Reseeds that got the same seed as the one before.
    pub fn seed_repeats(&self) -> u64 {
        self.repeats
    }

    /// Uniform integer in `[0, 2^width)`.
    pub fn sample_bits(&mut self, width: u64) -> RsaBigInt {
        self.rng.gen_biguint(width)
    }

    /// Rejection-sample until [`is_prime`] holds.
    pub fn sample_prime(&mut self, width: PrimeWidth) -> RsaBigInt {
        loop {
            let candidate = self.sample_bits(width.bits());
            if is_prime(&candidate) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;

    fn sampler(seed: u64) -> RandomSampler<ChaCha8Rng, FixedSeed> {
        RandomSampler::new(FixedSeed::new(seed))
    }

    #[test]
    fn test_sample_bits_in_range() {
        let mut s = sampler(1);
        let bound = RsaBigInt::from(1u8) << 8;
        for _ in 0..500 {
            assert!(s.sample_bits(8) < bound);
        }
    }

    #[test]
    fn test_sample_prime_passes_primality() {
        let mut s = sampler(2);
        for width in 2..=12 {
            let bits = PrimeWidth::new("width", width).unwrap();
            for _ in 0..20 {
                let p = s.sample_prime(bits);
                assert!(is_prime(&p));
                assert!(p.bits() <= width);
            }
        }
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let mut a = sampler(42);
        let mut b = sampler(42);
        for _ in 0..50 {
            assert_eq!(a.sample_bits(16), b.sample_bits(16));
        }
    }

    #[test]
    fn test_reseed_advances_fixed_seed() {
        let mut a = sampler(7);
        let mut b = sampler(8);
        a.reseed();
        assert_eq!(a.reseeds(), 1);
        // a is now seeded with 8, exactly like a fresh b
        for _ in 0..50 {
            assert_eq!(a.sample_bits(16), b.sample_bits(16));
        }
    }

    #[test]
    fn test_prime_width_rejects_narrow_widths() {
        assert_eq!(
            PrimeWidth::new("factor_width", 1),
            Err(ConfigError::WidthTooSmall {
                name: "factor_width",
                width: 1
            })
        );
        assert!(PrimeWidth::new("factor_width", 0).is_err());
        assert_eq!(PrimeWidth::new("factor_width", 2).map(PrimeWidth::bits), Ok(2));
    }

    struct Stuck(u64);

    impl SeedSource for Stuck {
        fn next_seed(&mut self) -> u64 {
            self.0
        }
    }

    #[test]
    fn test_repeated_seed_is_counted() {
        let mut s = RandomSampler::<ChaCha8Rng, _>::new(Stuck(3));
        let first = s.sample_bits(32);
        s.reseed();
        s.reseed();
        assert_eq!(s.seed_repeats(), 2);
        assert_eq!(s.sample_bits(32), first);

        let mut fixed = sampler(3);
        fixed.reseed();
        assert_eq!(fixed.seed_repeats(), 0);
    }

    #[test]
    fn test_wall_clock_is_after_epoch() {
        assert!(WallClock.next_seed() > 0);
    }
}
