// RSA Big Integer Operations
// Wrapper around num-bigint for the toy key sizes used here

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Modular exponentiation: base^exp mod modulus
/// Uses square-and-multiply algorithm
pub fn mod_pow(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    if modulus.is_one() {
        return RsaBigInt::zero();
    }

    let mut result = RsaBigInt::one();
    let mut base = base % modulus;
    let mut exp = exp.clone();

    while !exp.is_zero() {
        if exp.is_odd() {
            result = (&result * &base) % modulus;
        }
        base = (&base * &base) % modulus;
        exp >>= 1;
    }

    result
}

/// Reduce a signed value into `[0, modulus)`.
///
/// Rounds like `mod_floor`, so `-1` maps to `modulus - 1`.
pub fn reduce_signed(value: &BigInt, modulus: &RsaBigInt) -> RsaBigInt {
    let m = BigInt::from_biguint(Sign::Plus, modulus.clone());
    // mod_floor with a positive modulus is never negative
    value.mod_floor(&m).magnitude().clone()
}

/// Trial-division primality test.
///
/// Divisors `i` and `i + 2` are tried for `i = 5, 9, 13, ...` while
/// `i * i < n`. The bound is strict, so the square of a prime `p ≡ 1 (mod 4)`
/// (25, 169, 289, ...) passes.
pub fn is_prime(n: &RsaBigInt) -> bool {
    let two = from_u64(2);
    let three = from_u64(3);

    if *n == two || *n == three {
        return true;
    }
    if n.is_multiple_of(&two) || n.is_multiple_of(&three) || n.is_one() {
        return false;
    }

    let mut i = from_u64(5);
    while &(&i * &i) < n {
        if n.is_multiple_of(&i) || n.is_multiple_of(&(&i + 2u8)) {
            return false;
        }
        i += 4u8;
    }

    true
}

/// Greatest common divisor
pub fn gcd(a: &RsaBigInt, b: &RsaBigInt) -> RsaBigInt {
    a.gcd(b)
}
