// Block byte layouts
// How a character's UTF-8 bytes map to an integer and back

use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::Zero;

use super::bigint::RsaBigInt;

/// Characters per block.
pub const BLOCK_WIDTH: usize = 1;

/// Integer interpretation of a block's bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteLayout {
    /// Little-endian signed. Decoding sizes the output from the value's bit
    /// length (rounded up to whole bytes), so multi-byte characters and
    /// values with the sign bit set do not survive a round trip.
    #[default]
    Legacy,
    /// Little-endian unsigned in both directions.
    Canonical,
}

impl ByteLayout {
    /// Integer value of a block's encoded bytes.
    pub fn encode(self, bytes: &[u8]) -> BigInt {
        match self {
            ByteLayout::Legacy => BigInt::from_signed_bytes_le(bytes),
            ByteLayout::Canonical => BigInt::from(RsaBigInt::from_bytes_le(bytes)),
        }
    }

    /// Bytes of a decrypted value, or `None` if it does not fit.
    pub fn decode(self, value: &RsaBigInt) -> Option<Vec<u8>> {
        match self {
            ByteLayout::Legacy => {
                if value.is_zero() {
                    return Some(Vec::new());
                }
                let bytes = value.to_bytes_le();
                // a set top bit would read back as negative
                match bytes.last() {
                    Some(top) if top & 0x80 != 0 => None,
                    _ => Some(bytes),
                }
            }
            ByteLayout::Canonical => Some(value.to_bytes_le()),
        }
    }
}

impl FromStr for ByteLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(ByteLayout::Legacy),
            "canonical" => Ok(ByteLayout::Canonical),
            other => Err(other.to_string()),
        }
    }
}
