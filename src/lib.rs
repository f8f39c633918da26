#![doc = include_str!("../README.md")]
#![allow(non_snake_case)]
#![warn(missing_docs)]

#[macro_use]
mod binary_encoding;

mod curve;
mod field;
mod signature;

pub mod adaptor;
pub mod bip340;
pub mod errors;
pub mod tagged_hashes;

pub use binary_encoding::*;
pub use curve::*;
pub use field::*;
pub use signature::*;

#[cfg(test)]
pub(crate) mod testhex;

/// Re-export of the fixed-width integer types used to represent
/// coordinates and scalars.
pub use crypto_bigint;
