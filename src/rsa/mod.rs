// RSA Module - Main module file
// Exports key synthesis and the per-character block codec

pub mod bigint;
pub mod decrypt;
pub mod encrypt;
pub mod errors;
pub mod keygen;
pub mod layout;
pub mod oracle;
pub mod sampler;

pub use decrypt::backward;
pub use encrypt::forward;
pub use errors::{CodecError, KeyError, SynthesisError};
pub use keygen::{KeyPairSynthesizer, RsaKeyPair, RsaPrivateKey, RsaPublicKey};
pub use layout::{ByteLayout, BLOCK_WIDTH};
pub use sampler::{FixedSeed, PrimeWidth, RandomSampler, SeedSource, Seeds, WallClock};
