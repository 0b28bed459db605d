// RSA Backward Transform
// Raises each coded token to the private exponent and rebuilds the text

use num_bigint::BigInt;

use super::bigint::{mod_pow, reduce_signed};
use super::errors::CodecError;
use super::keygen::RsaPrivateKey;
use super::layout::ByteLayout;

/// Decode space-separated integers produced by
/// [`forward`](super::encrypt::forward).
///
/// Tokens are split on single spaces, so an empty input or a doubled space
/// produces an empty token and fails as malformed.
pub fn backward(
    coded: &str,
    private_key: &RsaPrivateKey,
    layout: ByteLayout,
) -> Result<String, CodecError> {
    let mut text = String::new();

    for (index, token) in coded.split(' ').enumerate() {
        let c: BigInt = token
            .trim()
            .parse()
            .map_err(|_| CodecError::MalformedInput {
                index,
                token: token.to_string(),
            })?;

        let c = reduce_signed(&c, private_key.modulus());
        let m = mod_pow(&c, private_key.exponent(), private_key.modulus());

        let bytes = layout
            .decode(&m)
            .ok_or_else(|| CodecError::ByteOverflow {
                index,
                value: m.clone(),
            })?;
        let block = String::from_utf8(bytes)
            .map_err(|source| CodecError::Decoding { index, source })?;

        text.push_str(&block);
    }

    Ok(text)
}
