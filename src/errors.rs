//! Various error types for different kinds of failures.

use std::error::Error;
use std::fmt;

/// Returned when lifting an X-only coordinate fails, either because the
/// coordinate is not less than the field prime, or because `x³ + 7` is a
/// quadratic non-residue and so no curve point has that X coordinate.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct LiftXError;
impl fmt::Display for LiftXError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("x coordinate does not correspond to a valid curve point")
    }
}
impl Error for LiftXError {}

/// Returned when inverting zero in a prime field. Zero has no
/// multiplicative inverse.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct DivisionByZeroError;
impl fmt::Display for DivisionByZeroError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("attempted to invert zero modulo a prime")
    }
}
impl Error for DivisionByZeroError {}

/// Error returned when signature verification fails.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum VerifyError {
    /// The signature or adaptor point could not be decoded, e.g. because
    /// of a bad length or an out-of-range scalar.
    MalformedInput,

    /// The signature is not valid for the given key and message.
    BadSignature,
}
impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "failed to verify signature: {}",
            match self {
                Self::MalformedInput => "input could not be decoded",
                Self::BadSignature => "signature is invalid",
            }
        )
    }
}
impl Error for VerifyError {}

/// Returned when extracting an adaptor secret from a signature pair whose
/// nonce X coordinates differ. Such signatures were not produced from the
/// same pre-signature, so their scalar difference reveals nothing.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct MismatchedNonceError;
impl fmt::Display for MismatchedNonceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("signatures do not share a nonce; cannot extract adaptor secret")
    }
}
impl Error for MismatchedNonceError {}

/// Enumerates the various reasons why binary or hex decoding could fail.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum DecodeFailureReason {
    /// The hex string's format was incorrect, which could mean it either
    /// was the wrong length or held invalid characters.
    BadHexFormat(base16ct::Error),

    /// The byte slice we tried to deserialize had the wrong length.
    BadLength(usize),

    /// The bytes contained coordinates to a point that is not on the
    /// secp256k1 curve, or coordinates not less than the field prime.
    InvalidPoint,

    /// The bytes represented an integer not less than the field prime.
    InvalidFieldElement,

    /// The bytes represented an integer not less than the curve order.
    InvalidScalar,
}

/// Returned when decoding a certain data structure of type `T` fails.
///
/// The type `T` only serves as a compile-time safety check; no data of
/// type `T` is actually owned by this error.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DecodeError<T> {
    /// The reason for the decoding failure.
    pub reason: DecodeFailureReason,
    phantom: std::marker::PhantomData<T>,
}

impl<T> DecodeError<T> {
    /// Construct a new decoding error for type `T` given a cause for the
    /// failure.
    pub fn new(reason: DecodeFailureReason) -> Self {
        DecodeError {
            reason,
            phantom: std::marker::PhantomData,
        }
    }

    /// Create a decoding error caused by an incorrect input byte slice
    /// length.
    pub fn bad_length(size: usize) -> Self {
        DecodeError::new(DecodeFailureReason::BadLength(size))
    }

    /// Converts the decoding error for one type into that of another type.
    pub fn convert<U>(self) -> DecodeError<U> {
        DecodeError::new(self.reason)
    }
}

impl<T> fmt::Display for DecodeError<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use DecodeFailureReason::*;

        write!(
            f,
            "error decoding {}: {}",
            std::any::type_name::<T>(),
            match &self.reason {
                BadHexFormat(e) => format!("hex decoding error: {}", e),
                BadLength(size) => format!("unexpected length {}", size),
                InvalidPoint => "point is not on the secp256k1 curve".to_string(),
                InvalidFieldElement =>
                    "integer is not within the secp256k1 field range".to_string(),
                InvalidScalar => "integer is not within the secp256k1 scalar range".to_string(),
            }
        )
    }
}

impl<T: fmt::Debug> Error for DecodeError<T> {}

impl<T> From<base16ct::Error> for DecodeError<T> {
    fn from(e: base16ct::Error) -> Self {
        DecodeError::new(DecodeFailureReason::BadHexFormat(e))
    }
}
