// Configuration for key synthesis and the block codec

use std::env;

use thiserror::Error;

use crate::rsa::layout::ByteLayout;
use crate::rsa::oracle::DEFAULT_PROBE;

/// Smallest bit width that can represent a prime.
pub const MIN_WIDTH: u64 = 2;

pub const ENV_FACTOR_WIDTH: &str = "TOY_RSA_FACTOR_WIDTH";
pub const ENV_EXPONENT_WIDTH: &str = "TOY_RSA_EXPONENT_WIDTH";
pub const ENV_BYTE_LAYOUT: &str = "TOY_RSA_BYTE_LAYOUT";
pub const ENV_SEED: &str = "TOY_RSA_SEED";

/// Errors raised while building or validating configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be at least 2 bits, got {width}")]
    WidthTooSmall { name: &'static str, width: u64 },
    #[error("{name} must be at least 1")]
    ZeroBudget { name: &'static str },
    #[error("self-check probe must not be empty")]
    EmptyProbe,
    #[error("{name}={value:?} is not a valid value")]
    InvalidVar { name: &'static str, value: String },
    #[error("unknown byte layout {0:?}, expected \"legacy\" or \"canonical\"")]
    UnknownLayout(String),
}

/// Knobs for [`KeyPairSynthesizer`](crate::rsa::keygen::KeyPairSynthesizer).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SynthesisConfig {
    /// Bit width of both prime factors and of private-exponent candidates.
    pub factor_width: u64,
    /// Bit width of public-exponent candidates.
    pub exponent_width: u64,
    /// Failed inverse checks between reseeds.
    pub inverse_attempts_per_reseed: u32,
    /// Reseeds allowed before an attempt is abandoned.
    pub max_reseeds: u32,
    /// Draws allowed per public-exponent search.
    pub max_exponent_draws: u32,
    pub probe: String,
    pub layout: ByteLayout,
    /// `None` reseeds from the wall clock.
    pub seed: Option<u64>,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            factor_width: 8,
            exponent_width: 4,
            inverse_attempts_per_reseed: 200,
            max_reseeds: 200,
            max_exponent_draws: 10_000,
            probe: DEFAULT_PROBE.to_string(),
            layout: ByteLayout::Legacy,
            seed: None,
        }
    }
}

impl SynthesisConfig {
    pub fn with_factor_width(mut self, width: u64) -> Self {
        self.factor_width = width;
        self
    }

    pub fn with_exponent_width(mut self, width: u64) -> Self {
        self.exponent_width = width;
        self
    }

    pub fn with_retry_budget(mut self, attempts_per_reseed: u32, max_reseeds: u32) -> Self {
        self.inverse_attempts_per_reseed = attempts_per_reseed;
        self.max_reseeds = max_reseeds;
        self
    }

    pub fn with_max_exponent_draws(mut self, draws: u32) -> Self {
        self.max_exponent_draws = draws;
        self
    }

    pub fn with_probe(mut self, probe: impl Into<String>) -> Self {
        self.probe = probe.into();
        self
    }

    pub fn with_layout(mut self, layout: ByteLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Defaults overridden by `TOY_RSA_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_FACTOR_WIDTH) {
            config.factor_width = parse_var(ENV_FACTOR_WIDTH, &value)?;
        }
        if let Some(value) = lookup(ENV_EXPONENT_WIDTH) {
            config.exponent_width = parse_var(ENV_EXPONENT_WIDTH, &value)?;
        }
        if let Some(value) = lookup(ENV_BYTE_LAYOUT) {
            config.layout = value.parse().map_err(ConfigError::UnknownLayout)?;
        }
        if let Some(value) = lookup(ENV_SEED) {
            config = config.with_seed(parse_var(ENV_SEED, &value)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the invariants every synthesizer relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.factor_width < MIN_WIDTH {
            return Err(ConfigError::WidthTooSmall {
                name: "factor_width",
                width: self.factor_width,
            });
        }
        if self.exponent_width < MIN_WIDTH {
            return Err(ConfigError::WidthTooSmall {
                name: "exponent_width",
                width: self.exponent_width,
            });
        }
        if self.inverse_attempts_per_reseed == 0 {
            return Err(ConfigError::ZeroBudget {
                name: "inverse_attempts_per_reseed",
            });
        }
        if self.max_reseeds == 0 {
            return Err(ConfigError::ZeroBudget { name: "max_reseeds" });
        }
        if self.max_exponent_draws == 0 {
            return Err(ConfigError::ZeroBudget {
                name: "max_exponent_draws",
            });
        }
        if self.probe.is_empty() {
            return Err(ConfigError::EmptyProbe);
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidVar {
        name,
        value: value.to_string(),
    })
}
