//! Textbook RSA with toy-sized keys.
//!
//! Key pairs come from two sampled primes of a few bits each and are applied
//! one character at a time. None of this is secure; the keys are small enough
//! to factor by hand.

pub mod rsa;
pub mod ui;
pub mod util;
