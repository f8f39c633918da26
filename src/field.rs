//! Fixed-width modular arithmetic over a prime modulus.
//!
//! Signature verification needs exact arithmetic over two distinct odd
//! primes: the secp256k1 field prime `p` for point coordinates and the
//! curve order `n` for signature scalars. Both are served by the same
//! [`PrimeField`] type, so there is a single audited reduction path.
//!
//! None of these operations are constant-time. This engine only ever
//! operates on public values (signatures, challenges, coordinates), so
//! timing leaks carry no secrets.

use crate::errors::DivisionByZeroError;

use crypto_bigint::modular::runtime_mod::{DynResidue, DynResidueParams};
use crypto_bigint::{NonZero, U256};

/// Number of limbs in a [`U256`] on the target architecture.
pub(crate) const LIMBS: usize = U256::LIMBS;

/// Arithmetic modulo a fixed odd prime.
///
/// The modulus and its precomputed Montgomery parameters are immutable
/// once constructed. Operations taking two operands require both to be
/// fully reduced; every result is fully reduced.
#[derive(Debug, Clone, Copy)]
pub struct PrimeField {
    modulus: NonZero<U256>,
    monty: DynResidueParams<LIMBS>,
}

impl PrimeField {
    /// Constructs the field for a given modulus.
    ///
    /// Returns `None` if the modulus is zero. The modulus must be an odd
    /// prime; the Montgomery parameters are undefined for even moduli and
    /// [`invert`][Self::invert] relies on primality.
    pub fn new(modulus: U256) -> Option<PrimeField> {
        let modulus = Option::<NonZero<U256>>::from(NonZero::new(modulus))?;
        let monty = DynResidueParams::new(&modulus);
        Some(PrimeField { modulus, monty })
    }

    /// Returns the field modulus.
    pub fn modulus(&self) -> &U256 {
        &self.modulus
    }

    /// Returns true if `value` is in canonical range, i.e. `value < modulus`.
    pub fn contains(&self, value: &U256) -> bool {
        value < self.modulus()
    }

    /// Modular addition of two reduced operands.
    pub fn add(&self, a: &U256, b: &U256) -> U256 {
        a.add_mod(b, self.modulus())
    }

    /// Modular subtraction of two reduced operands.
    pub fn sub(&self, a: &U256, b: &U256) -> U256 {
        a.sub_mod(b, self.modulus())
    }

    /// Modular negation of a reduced operand. Zero maps to zero.
    pub fn neg(&self, a: &U256) -> U256 {
        a.neg_mod(self.modulus())
    }

    /// Modular multiplication, via Montgomery form.
    pub fn mul(&self, a: &U256, b: &U256) -> U256 {
        (DynResidue::new(a, self.monty) * DynResidue::new(b, self.monty)).retrieve()
    }

    /// Modular exponentiation, via Montgomery form.
    pub fn pow(&self, base: &U256, exponent: &U256) -> U256 {
        DynResidue::new(base, self.monty).pow(exponent).retrieve()
    }

    /// Modular inverse by Fermat's little theorem: `a^(m-2) mod m`.
    ///
    /// Fails with [`DivisionByZeroError`] when `a` is zero, which has no
    /// inverse.
    pub fn invert(&self, a: &U256) -> Result<U256, DivisionByZeroError> {
        if a == &U256::ZERO {
            return Err(DivisionByZeroError);
        }
        let exponent = self.modulus().wrapping_sub(&U256::from_u64(2));
        Ok(self.pow(a, &exponent))
    }

    /// Fully reduces an arbitrary 256-bit integer into canonical range.
    pub fn reduce(&self, value: &U256) -> U256 {
        value.rem(&self.modulus)
    }
}
