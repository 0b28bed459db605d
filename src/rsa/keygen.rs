// RSA Key Generation
// Synthesizes toy-sized key pairs from two sampled primes

use std::fmt;

use num_traits::One;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::debug;

use super::bigint::{from_u64, gcd, RsaBigInt};
use super::decrypt::backward;
use super::encrypt::forward;
use super::errors::{CodecError, KeyError, SynthesisError};
use super::layout::ByteLayout;
use super::oracle;
use super::sampler::{FixedSeed, PrimeWidth, RandomSampler, SeedSource, Seeds, WallClock};
use crate::util::config::{ConfigError, SynthesisConfig};

/// RSA Public Key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RsaPublicKey {
    e: RsaBigInt, // Public exponent
    n: RsaBigInt, // Modulus
}

/// RSA Private Key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RsaPrivateKey {
    d: RsaBigInt, // Private exponent
    n: RsaBigInt, // Modulus (same as public)
}

/// RSA Key Pair (both public and private keys)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKeyPair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
}

fn check_modulus(n: &RsaBigInt) -> Result<(), KeyError> {
    if *n < from_u64(2) {
        return Err(KeyError::ModulusTooSmall(n.clone()));
    }
    Ok(())
}

impl RsaPublicKey {
    pub fn new(e: RsaBigInt, n: RsaBigInt) -> Result<Self, KeyError> {
        check_modulus(&n)?;
        Ok(Self { e, n })
    }

    pub fn exponent(&self) -> &RsaBigInt {
        &self.e
    }

    pub fn modulus(&self) -> &RsaBigInt {
        &self.n
    }

    /// Encode text with this public key
    pub fn forward(&self, text: &str, layout: ByteLayout) -> String {
        forward(text, self, layout)
    }
}

impl RsaPrivateKey {
    pub fn new(d: RsaBigInt, n: RsaBigInt) -> Result<Self, KeyError> {
        check_modulus(&n)?;
        Ok(Self { d, n })
    }

    pub fn exponent(&self) -> &RsaBigInt {
        &self.d
    }

    pub fn modulus(&self) -> &RsaBigInt {
        &self.n
    }

    /// Decode coded text with this private key
    pub fn backward(&self, coded: &str, layout: ByteLayout) -> Result<String, CodecError> {
        backward(coded, self, layout)
    }
}

impl fmt::Display for RsaPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.e, self.n)
    }
}

impl fmt::Display for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.d, self.n)
    }
}

/// Key pair generator owning its random sampler.
///
/// Each [`generate`](Self::generate) call is one bounded attempt; the caller
/// decides how often to retry.
pub struct KeyPairSynthesizer<R = StdRng, S = Seeds> {
    config: SynthesisConfig,
    factor_width: PrimeWidth,
    exponent_width: PrimeWidth,
    sampler: RandomSampler<R, S>,
}

impl KeyPairSynthesizer<StdRng, Seeds> {
    /// Synthesizer using `StdRng`, seeded from `config.seed` when set and from
    /// the wall clock otherwise.
    pub fn from_config(config: SynthesisConfig) -> Result<Self, ConfigError> {
        let seeds = match config.seed {
            Some(seed) => Seeds::Fixed(FixedSeed::new(seed)),
            None => Seeds::Clock(WallClock),
        };
        Self::new(config, RandomSampler::new(seeds))
    }
}

impl<R, S> KeyPairSynthesizer<R, S>
where
    R: RngCore + SeedableRng,
    S: SeedSource,
{
    pub fn new(config: SynthesisConfig, sampler: RandomSampler<R, S>) -> Result<Self, ConfigError> {
        config.validate()?;
        let factor_width = PrimeWidth::new("factor_width", config.factor_width)?;
        let exponent_width = PrimeWidth::new("exponent_width", config.exponent_width)?;
        Ok(Self {
            config,
            factor_width,
            exponent_width,
            sampler,
        })
    }

    pub fn sampler(&self) -> &RandomSampler<R, S> {
        &self.sampler
    }

    /// One synthesis attempt from freshly sampled primes.
    pub fn generate(&mut self) -> Result<RsaKeyPair, SynthesisError> {
        self.sampler.reseed();

        let p = self.sampler.sample_prime(self.factor_width);
        let q = self.sampler.sample_prime(self.factor_width);
        debug!(%p, %q, "sampled factors");

        self.synthesize_from_factors(&p, &q)
    }

    /// Derive and validate a key pair from the given factors.
    pub fn synthesize_from_factors(
        &mut self,
        p: &RsaBigInt,
        q: &RsaBigInt,
    ) -> Result<RsaKeyPair, SynthesisError> {
        let n = p * q;
        check_modulus(&n)?;
        if p.is_one() || q.is_one() {
            // a unit factor leaves a zero totient
            return Err(KeyError::ModulusTooSmall(n).into());
        }
        let totient = (p - 1u8) * (q - 1u8);

        let e = self.find_exponent(&totient, &n)?;
        let (e, d) = self.find_private_exponent(&totient, e, &n)?;

        let public_key = RsaPublicKey::new(e, n.clone())?;
        let private_key = RsaPrivateKey::new(d, n)?;

        if !oracle::verify(&public_key, &private_key, self.config.layout, &self.config.probe) {
            debug!(%public_key, %private_key, "self check rejected key pair");
            return Err(SynthesisError::ValidationFailed);
        }

        debug!(%public_key, "key pair accepted");
        Ok(RsaKeyPair {
            public_key,
            private_key,
        })
    }

    /// Draw a prime public exponent with `e <= modulus` and `gcd(e, totient) == 1`.
    ///
    /// The bound is checked against the modulus, not the totient.
    pub fn find_exponent(
        &mut self,
        totient: &RsaBigInt,
        modulus: &RsaBigInt,
    ) -> Result<RsaBigInt, SynthesisError> {
        let one = RsaBigInt::one();
        for _ in 0..self.config.max_exponent_draws {
            let candidate = self.sampler.sample_prime(self.exponent_width);
            if &candidate <= modulus && gcd(&candidate, totient) == one {
                return Ok(candidate);
            }
        }
        Err(SynthesisError::ExponentUnavailable {
            draws: self.config.max_exponent_draws,
        })
    }

    /// Search for `d` with `(d * e) mod totient == 1` among sampled primes.
    ///
    /// Every `inverse_attempts_per_reseed` misses (starting with the first)
    /// the generator is reseeded and the public exponent redrawn. Returns the
    /// exponent actually paired with `d`.
    pub fn find_private_exponent(
        &mut self,
        totient: &RsaBigInt,
        mut e: RsaBigInt,
        modulus: &RsaBigInt,
    ) -> Result<(RsaBigInt, RsaBigInt), SynthesisError> {
        let one = RsaBigInt::one();
        let per_reseed = u64::from(self.config.inverse_attempts_per_reseed);

        let mut d = self.sampler.sample_prime(self.factor_width);
        let mut count: u64 = 0;
        let mut reseeds: u32 = 0;

        while (&d * &e) % totient != one {
            if count % per_reseed == 0 {
                if reseeds == self.config.max_reseeds {
                    debug!(reseeds, "private exponent search exhausted");
                    return Err(SynthesisError::Exhausted { reseeds });
                }
                self.sampler.reseed();
                e = self.find_exponent(totient, modulus)?;
                reseeds += 1;
                debug!(reseeds, %e, "redrew public exponent");
            }
            d = self.sampler.sample_prime(self.factor_width);
            count += 1;
        }

        Ok((e, d))
    }
}
