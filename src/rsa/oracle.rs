// Self check for freshly synthesized key pairs

use super::decrypt::backward;
use super::encrypt::forward;
use super::errors::CodecError;
use super::keygen::{RsaPrivateKey, RsaPublicKey};
use super::layout::ByteLayout;

/// Probe used when no other is configured.
pub const DEFAULT_PROBE: &str = "test";

/// Round-trip `probe` through both keys. NUL characters in the decoded text
/// are ignored.
///
/// An accepted pair is only guaranteed to carry the characters of `probe`.
/// Any other character round-trips only when its block value is below the
/// modulus and the factors were distinct true primes.
pub fn check(
    public_key: &RsaPublicKey,
    private_key: &RsaPrivateKey,
    layout: ByteLayout,
    probe: &str,
) -> Result<bool, CodecError> {
    let coded = forward(probe, public_key, layout);
    let decoded = backward(&coded, private_key, layout)?;
    Ok(decoded.replace('\0', "").as_bytes() == probe.as_bytes())
}

/// [`check`] with every codec error counted as a failure.
pub fn verify(
    public_key: &RsaPublicKey,
    private_key: &RsaPrivateKey,
    layout: ByteLayout,
    probe: &str,
) -> bool {
    check(public_key, private_key, layout, probe).unwrap_or(false)
}
