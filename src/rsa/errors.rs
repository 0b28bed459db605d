// Error types for key synthesis and the block codec

use std::string::FromUtf8Error;

use thiserror::Error;

use super::bigint::RsaBigInt;

/// Invalid key material.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("modulus {0} is below 2")]
    ModulusTooSmall(RsaBigInt),
}

/// Reasons a single [`generate`](super::keygen::KeyPairSynthesizer::generate)
/// attempt produced no pair. Callers retry from scratch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("no private exponent found after {reseeds} reseeds")]
    Exhausted { reseeds: u32 },
    #[error("no public exponent found after {draws} draws")]
    ExponentUnavailable { draws: u32 },
    #[error("key pair failed the round-trip self check")]
    ValidationFailed,
    #[error(transparent)]
    Key(#[from] KeyError),
}

/// Per-request codec failures. None of them invalidate the keys.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("token {index} is not an integer: {token:?}")]
    MalformedInput { index: usize, token: String },
    #[error("block {index} is not valid UTF-8")]
    Decoding {
        index: usize,
        #[source]
        source: FromUtf8Error,
    },
    #[error("block {index} value {value} does not fit its signed byte width")]
    ByteOverflow { index: usize, value: RsaBigInt },
}

impl CodecError {
    /// True for failures to turn a decrypted value back into text.
    pub fn is_decoding_failure(&self) -> bool {
        matches!(self, CodecError::Decoding { .. } | CodecError::ByteOverflow { .. })
    }
}
