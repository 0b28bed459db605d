// Utility Module
// Configuration, logging and key fingerprints

pub mod config;
pub mod fingerprint;
pub mod logging;

pub use config::{ConfigError, SynthesisConfig};
pub use fingerprint::{private_fingerprint, public_fingerprint};
