//! Adaptor signature verification and secret extraction.
//!
//! An adaptor signature (or pre-signature) looks exactly like a compact
//! Schnorr signature, but its challenge is bound to a tweaked nonce point
//! `R + T` instead of the nonce `R` itself. Whoever knows the discrete log
//! `t` of the adaptor point `T = tG` can complete the pre-signature, and
//! anyone holding both the pre-signature and the completed signature can
//! recover `t` from the difference of their scalars.

use crate::bip340::compute_challenge_hash;
use crate::errors::{MismatchedNonceError, VerifyError};
use crate::{CompactSignature, Point, SECP256K1};

use crypto_bigint::{Encoding, U256};

use subtle::ConstantTimeEq as _;

/// Verifies an adaptor signature against an X-only public key, a message,
/// and an adaptor point `T`.
///
/// This checks the same equation as [`bip340::verify_single`][crate::bip340::verify_single],
/// except the challenge commits to the tweaked nonce `R + T`. A signature
/// which passes here is not yet a valid BIP340 signature; it becomes one
/// once the holder of `T`'s discrete log completes it.
///
/// The adaptor point must satisfy the curve equation. [`Point::Infinity`]
/// is accepted as a trivial tweak, in which case this behaves identically
/// to plain verification.
pub fn verify_single<T>(
    pubkey_x: &[u8; 32],
    signature: T,
    message: impl AsRef<[u8]>,
    adaptor_point: &Point,
) -> Result<(), VerifyError>
where
    CompactSignature: TryFrom<T>,
{
    use VerifyError::*;

    let signature = CompactSignature::try_from(signature).map_err(|_| MalformedInput)?;
    let curve = &*SECP256K1;

    if !curve.is_on_curve(adaptor_point) {
        return Err(MalformedInput);
    }

    let pubkey = curve
        .lift_x_even_y(&U256::from_be_bytes(*pubkey_x))
        .map_err(|_| BadSignature)?;

    // The pre-signature's r commits to an even-parity nonce point, which
    // must exist for the tweak to be applied.
    let nonce_point = curve.lift_x_even_y(&signature.r).map_err(|_| BadSignature)?;

    let tweaked_nonce = curve.add(&nonce_point, adaptor_point);
    if tweaked_nonce.is_infinity() {
        // T = -R leaves no X coordinate to bind the challenge to.
        return Err(BadSignature);
    }

    let e = compute_challenge_hash(&tweaked_nonce.serialize_xonly(), pubkey_x, message);

    // s'G = R + eP, rearranged to avoid lifting the nonce a second time:
    // R = s'G - eP
    let s_g = curve.mul(&curve.generator(), &signature.s);
    let e_p = curve.mul(&pubkey, &e);
    let verification_point = curve.add(&s_g, &curve.negate(&e_p));

    if verification_point.is_infinity() || !verification_point.has_even_y() {
        return Err(BadSignature);
    }

    let valid = verification_point.serialize_xonly().ct_eq(&signature.rx());
    if bool::from(valid) {
        Ok(())
    } else {
        Err(BadSignature)
    }
}

/// Recovers the adaptor secret `t = (s - s') mod n` from a completed
/// signature and the adaptor signature it was completed from.
///
/// Both signatures must commit to the same nonce X coordinate; otherwise
/// they were not produced over the same nonce and no secret relates them,
/// which fails with [`MismatchedNonceError`].
pub fn extract_secret(
    complete_signature: &CompactSignature,
    adaptor_signature: &CompactSignature,
) -> Result<U256, MismatchedNonceError> {
    if complete_signature.r != adaptor_signature.r {
        return Err(MismatchedNonceError);
    }

    Ok(SECP256K1
        .scalar_field
        .sub(&complete_signature.s, &adaptor_signature.s))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// BIP340 test vector 0: a valid signature by the secret key `d = 3`
    /// on the all-zeros message.
    const PUBKEY_HEX: &str = "F9308A019258C31049344F85F89D5229B531C845836F99B08601F113BCE036F9";
    const SIGNATURE_HEX: &str = "E907831F80848D1069A5371B402410364BDF1C5F8307B0084C55F1CE2DCA8215\
                                 25F66A4A85EA8B71E482A74F382D2CE5EBEEE8FDB2172F477DF4900D310536C0";

    fn fixture() -> ([u8; 32], CompactSignature, [u8; 32]) {
        let pubkey_x = U256::from_be_hex(PUBKEY_HEX).to_be_bytes();
        let signature: CompactSignature = SIGNATURE_HEX.parse().expect("valid signature hex");
        (pubkey_x, signature, [0u8; 32])
    }

    #[test]
    fn infinity_adaptor_point_degenerates_to_plain_verification() {
        let (pubkey_x, signature, message) = fixture();

        assert_eq!(
            verify_single(&pubkey_x, signature, message, &Point::Infinity),
            Ok(())
        );
        assert_eq!(
            crate::bip340::verify_single(&pubkey_x, signature, message),
            Ok(())
        );

        let mut tampered = signature.serialize();
        tampered[63] ^= 1;
        assert!(verify_single(&pubkey_x, tampered, message, &Point::Infinity).is_err());
        assert!(crate::bip340::verify_single(&pubkey_x, tampered, message).is_err());
    }

    #[test]
    fn adaptor_signature_round_trip() {
        let (pubkey_x, signature, message) = fixture();
        let curve = &*SECP256K1;
        let n_field = &curve.scalar_field;

        // The fixture's key is d = 3; BIP340 negates it implicitly when
        // dG has an odd Y coordinate, so recover the effective key first.
        let d = U256::from_u64(3);
        let pubkey = curve
            .lift_x_even_y(&U256::from_be_bytes(pubkey_x))
            .unwrap();
        let d_effective = if curve.mul(&curve.generator(), &d) == pubkey {
            d
        } else {
            n_field.neg(&d)
        };

        let t = U256::from_u64(11);
        let adaptor_point = curve.mul(&curve.generator(), &t);

        let nonce_point = curve.lift_x_even_y(&signature.r).unwrap();
        let tweaked_nonce = curve.add(&nonce_point, &adaptor_point);

        // Rebind the fixture signature's challenge from R to R + T while
        // keeping the nonce fixed: s' = s + (e' - e)d.
        let e = compute_challenge_hash(&signature.rx(), &pubkey_x, message);
        let e_tweaked =
            compute_challenge_hash(&tweaked_nonce.serialize_xonly(), &pubkey_x, message);
        let delta = n_field.mul(&n_field.sub(&e_tweaked, &e), &d_effective);
        let pre_signature = CompactSignature {
            r: signature.r,
            s: n_field.add(&signature.s, &delta),
        };

        assert_eq!(
            verify_single(&pubkey_x, pre_signature, message, &adaptor_point),
            Ok(())
        );

        // The pre-signature is not yet a valid signature, and does not
        // verify against the wrong adaptor point.
        assert!(crate::bip340::verify_single(&pubkey_x, pre_signature, message).is_err());
        assert!(verify_single(&pubkey_x, pre_signature, message, &Point::Infinity).is_err());
    }

    #[test]
    fn off_curve_adaptor_points_are_rejected() {
        let (pubkey_x, signature, message) = fixture();
        let bogus = Point::Affine {
            x: U256::ONE,
            y: U256::ONE,
        };
        assert_eq!(
            verify_single(&pubkey_x, signature, message, &bogus),
            Err(VerifyError::MalformedInput)
        );
    }

    #[test]
    fn unliftable_nonce_fails_verification() {
        let (pubkey_x, signature, message) = fixture();

        // An X coordinate with no square root (BIP340 test vector 11).
        let pre_signature = CompactSignature {
            r: U256::from_be_hex(
                "4A298DACAE57395A15D0795DDBFD1DCB564DA82B0F269BC70A74F8220429BA1D",
            ),
            s: signature.s,
        };
        assert_eq!(
            verify_single(&pubkey_x, pre_signature, message, &Point::Infinity),
            Err(VerifyError::BadSignature)
        );
    }

    #[test]
    fn extraction_recovers_the_adaptor_secret() {
        let (_, adaptor_signature, _) = fixture();
        let n_field = &SECP256K1.scalar_field;

        let t = U256::from_u64(77);
        let complete_signature = CompactSignature {
            r: adaptor_signature.r,
            s: n_field.add(&adaptor_signature.s, &t),
        };
        assert_eq!(
            extract_secret(&complete_signature, &adaptor_signature),
            Ok(t)
        );

        // Wraps around the curve order when s < s'.
        let small = CompactSignature {
            r: adaptor_signature.r,
            s: U256::from_u64(5),
        };
        let expected = n_field.sub(&U256::from_u64(5), &adaptor_signature.s);
        assert_eq!(extract_secret(&small, &adaptor_signature), Ok(expected));
    }

    #[test]
    fn extraction_rejects_mismatched_nonces() {
        let (_, signature, _) = fixture();
        let other = CompactSignature {
            r: SECP256K1.field.sub(&signature.r, &U256::ONE),
            s: signature.s,
        };
        assert_eq!(
            extract_secret(&signature, &other),
            Err(MismatchedNonceError)
        );
    }
}
