//! The 64-byte compact Schnorr signature encoding shared by plain
//! signatures and adaptor pre-signatures.

use crate::errors::{DecodeError, DecodeFailureReason};
use crate::{BinaryEncoding, SECP256K1};

use crypto_bigint::{Encoding, U256};

/// The number of bytes in a binary-serialized Schnorr signature.
pub const SCHNORR_SIGNATURE_SIZE: usize = 64;

/// A compact Schnorr signature: the X coordinate of the nonce point `R`
/// followed by the signature scalar `s`, each 32 big-endian bytes.
///
/// Both halves are range-checked at decoding time, so a constructed
/// `CompactSignature` always satisfies `r < p` and `s < n`. The same
/// encoding carries adaptor pre-signatures, whose scalar is conventionally
/// written `s′`; nothing in the byte format distinguishes the two, only
/// which verification equation the signature is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactSignature {
    /// The X coordinate of the nonce point `R`, as an integer in `[0, p)`.
    pub r: U256,

    /// The signature scalar which proves knowledge of the secret key and
    /// nonce, as an integer in `[0, n)`.
    pub s: U256,
}

impl CompactSignature {
    /// The nonce X coordinate as 32 big-endian bytes, the form consumed
    /// by the challenge hash.
    pub fn rx(&self) -> [u8; 32] {
        self.r.to_be_bytes()
    }
}

mod encodings {
    use super::*;

    impl BinaryEncoding for CompactSignature {
        type Serialized = [u8; SCHNORR_SIGNATURE_SIZE];

        /// Serializes the signature to its compact 64-byte encoding.
        fn to_bytes(&self) -> Self::Serialized {
            let mut serialized = [0u8; SCHNORR_SIGNATURE_SIZE];
            serialized[..32].clone_from_slice(&self.r.to_be_bytes());
            serialized[32..].clone_from_slice(&self.s.to_be_bytes());
            serialized
        }

        /// Deserialize a compact Schnorr signature from a byte slice. This
        /// slice must be exactly [`SCHNORR_SIGNATURE_SIZE`] bytes long,
        /// with `r` less than the field prime and `s` less than the curve
        /// order.
        fn from_bytes(signature_bytes: &[u8]) -> Result<Self, DecodeError<Self>> {
            if signature_bytes.len() != SCHNORR_SIGNATURE_SIZE {
                return Err(DecodeError::bad_length(signature_bytes.len()));
            }

            let r = U256::from_be_bytes(<[u8; 32]>::try_from(&signature_bytes[..32]).unwrap());
            let s = U256::from_be_bytes(<[u8; 32]>::try_from(&signature_bytes[32..]).unwrap());

            let curve = &*SECP256K1;
            if !curve.field.contains(&r) {
                return Err(DecodeError::new(DecodeFailureReason::InvalidFieldElement));
            }
            if !curve.scalar_field.contains(&s) {
                return Err(DecodeError::new(DecodeFailureReason::InvalidScalar));
            }

            Ok(CompactSignature { r, s })
        }
    }

    impl_encoding_traits!(CompactSignature, SCHNORR_SIGNATURE_SIZE);
    impl_hex_display!(CompactSignature);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_encoding_round_trips() {
        let hex = "E907831F80848D1069A5371B402410364BDF1C5F8307B0084C55F1CE2DCA8215\
                   25F66A4A85EA8B71E482A74F382D2CE5EBEEE8FDB2172F477DF4900D310536C0";
        let signature: CompactSignature = hex.parse().expect("valid signature hex");
        assert_eq!(format!("{:X}", signature), hex);

        let bytes = signature.serialize();
        assert_eq!(
            CompactSignature::from_bytes(&bytes).expect("round trip"),
            signature
        );
    }

    #[test]
    fn decoding_rejects_bad_lengths() {
        assert!(CompactSignature::from_bytes(&[0u8; 63]).is_err());
        assert!(CompactSignature::from_bytes(&[0u8; 65]).is_err());
    }

    #[test]
    fn decoding_rejects_out_of_range_halves() {
        // r equal to the field prime (BIP340 test vector 12).
        let r_too_big = "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F\
                         69E89B4C5564D00349106B8497785DD7D1D713A8AE82B32FA79D5F7FC407D39B";
        assert!(CompactSignature::from_hex(r_too_big).is_err());

        // s equal to the curve order (BIP340 test vector 13).
        let s_too_big = "6CFF5C3BA86C69EA4B7376F31A9BCB4F74C1976089B2D9963DA2E5543E177769\
                         FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141";
        assert!(CompactSignature::from_hex(s_too_big).is_err());
    }
}
