// RSA Forward Transform
// Raises each character block to the public exponent

use super::bigint::{mod_pow, reduce_signed};
use super::keygen::RsaPublicKey;
use super::layout::{ByteLayout, BLOCK_WIDTH};

/// Encode `text` in blocks of [`BLOCK_WIDTH`] characters with the public key.
///
/// The output is one decimal integer per block, separated by single
/// spaces. Empty text yields an empty string.
pub fn forward(text: &str, public_key: &RsaPublicKey, layout: ByteLayout) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(BLOCK_WIDTH)
        .map(|block| {
            let block: String = block.iter().collect();
            let value = layout.encode(block.as_bytes());
            let m = reduce_signed(&value, public_key.modulus());
            mod_pow(&m, public_key.exponent(), public_key.modulus()).to_string()
        })
        .collect::<Vec<_>>()
        .join(" ")
}
