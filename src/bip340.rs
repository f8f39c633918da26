//! [BIP340](https://github.com/bitcoin/bips/blob/master/bip-0340.mediawiki)
//! Schnorr signature verification.

use crate::errors::VerifyError;
use crate::{tagged_hashes, CompactSignature, SECP256K1};

use crypto_bigint::{Encoding, U256};

use sha2::Digest as _;
use subtle::ConstantTimeEq as _;

/// Computes the BIP340 challenge scalar:
///
/// ```notrust
/// e = H_tag(R.x || P.x || m) mod n
/// ```
///
/// where `H_tag` is the `BIP0340/challenge` tagged hash. The nonce X
/// coordinate is passed as 32 big-endian bytes whether it came straight
/// from a signature or from a recomputed point (the adaptor case).
pub fn compute_challenge_hash(
    nonce_xonly: &[u8; 32],
    pubkey_xonly: &[u8; 32],
    message: impl AsRef<[u8]>,
) -> U256 {
    let hash: [u8; 32] = tagged_hashes::BIP0340_CHALLENGE_TAG_HASHER
        .clone()
        .chain_update(nonce_xonly)
        .chain_update(pubkey_xonly)
        .chain_update(message.as_ref())
        .finalize()
        .into();

    SECP256K1.scalar_field.reduce(&U256::from_be_bytes(hash))
}

/// Verifies a [BIP340-compatible](https://github.com/bitcoin/bips/blob/master/bip-0340.mediawiki)
/// Schnorr signature against an X-only public key and a message.
///
/// The `signature` argument is parsed as a [`CompactSignature`]. You may
/// pass any type which converts fallibly to a [`CompactSignature`],
/// including `&[u8]` and `[u8; 64]`. Out-of-range signature halves
/// (`r >= p` or `s >= n`) fail decoding and are reported as
/// [`VerifyError::MalformedInput`]; no input can cause a panic.
///
/// Returns an error if the signature is invalid.
pub fn verify_single<T>(
    pubkey_x: &[u8; 32],
    signature: T,
    message: impl AsRef<[u8]>,
) -> Result<(), VerifyError>
where
    CompactSignature: TryFrom<T>,
{
    use VerifyError::*;

    let signature = CompactSignature::try_from(signature).map_err(|_| MalformedInput)?;
    let curve = &*SECP256K1;

    // lift_x(x(P)): the public key is always the even-parity point.
    let pubkey = curve
        .lift_x_even_y(&U256::from_be_bytes(*pubkey_x))
        .map_err(|_| BadSignature)?;

    let e = compute_challenge_hash(&signature.rx(), pubkey_x, message);

    // Instead of the usual sG = R + eP schnorr equation, we swap things
    // around slightly, thus avoiding the need to lift the x-only nonce.
    //
    // sG = R + eP
    // R = sG - eP
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
