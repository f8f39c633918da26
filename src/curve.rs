//! The secp256k1 group: affine points, the chord-and-tangent group law,
//! scalar multiplication, and the BIP340 `lift_x` operation.
//!
//! The point at infinity is an explicit [`Point`] variant rather than a
//! sentinel coordinate pair; the all-zero encoding only appears at the
//! 64-byte wire boundary.

use crate::errors::{DecodeError, DecodeFailureReason, LiftXError};
use crate::field::PrimeField;
use crate::BinaryEncoding;

use crypto_bigint::{Encoding, Integer, U256};

use std::sync::LazyLock;

/// The secp256k1 field prime `p`.
const FIELD_MODULUS: U256 =
    U256::from_be_hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F");

/// The secp256k1 curve order `n`.
const CURVE_ORDER: U256 =
    U256::from_be_hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141");

/// The constant term of the curve equation `y² = x³ + 7`.
const CURVE_B: U256 = U256::from_u64(7);

const GENERATOR_X: U256 =
    U256::from_be_hex("79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798");
const GENERATOR_Y: U256 =
    U256::from_be_hex("483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8");

/// The number of bytes in the uncompressed affine encoding of a [`Point`].
pub const POINT_SIZE: usize = 64;

/// A point on the secp256k1 curve in affine coordinates, or the point at
/// infinity (the group identity).
///
/// Coordinates of `Affine` points are expected to be fully reduced modulo
/// the field prime; every operation on [`Curve`] upholds this, and
/// [`Curve::is_on_curve`] treats unreduced coordinates as off-curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Point {
    /// The group identity.
    Infinity,

    /// A finite point with affine coordinates `(x, y)`.
    Affine {
        /// Big-endian X coordinate, reduced modulo the field prime.
        x: U256,
        /// Big-endian Y coordinate, reduced modulo the field prime.
        y: U256,
    },
}

impl Point {
    /// Returns true if this is the point at infinity.
    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    /// Returns true for a finite point whose Y coordinate is even.
    /// The point at infinity has no parity and returns false.
    pub fn has_even_y(&self) -> bool {
        match self {
            Point::Infinity => false,
            Point::Affine { y, .. } => !bool::from(y.is_odd()),
        }
    }

    /// Serializes the X coordinate as 32 big-endian bytes.
    ///
    /// The point at infinity serializes to all zero bytes, matching its
    /// wire-level sentinel encoding.
    pub fn serialize_xonly(&self) -> [u8; 32] {
        match self {
            Point::Infinity => [0; 32],
            Point::Affine { x, .. } => x.to_be_bytes(),
        }
    }
}

/// An immutable set of short-Weierstrass curve parameters together with
/// the modular arithmetic contexts derived from them.
///
/// The one instance used throughout this crate is [`SECP256K1`].
/// Constructing a separate instance (e.g. a toy curve for tests) is
/// possible but the square-root exponent assumes `p ≡ 3 (mod 4)`.
#[derive(Debug, Clone, Copy)]
pub struct Curve {
    /// Arithmetic modulo the field prime `p`, for point coordinates.
    pub field: PrimeField,

    /// Arithmetic modulo the curve order `n`, for signature scalars.
    pub scalar_field: PrimeField,

    b: U256,
    generator: Point,
    sqrt_exponent: U256,
}

/// The secp256k1 curve parameters, constructed once on first use.
pub static SECP256K1: LazyLock<Curve> = LazyLock::new(Curve::secp256k1);

impl Curve {
    /// Constructs the secp256k1 parameter set. Prefer [`SECP256K1`]
    /// outside of tests.
    pub fn secp256k1() -> Curve {
        let field = PrimeField::new(FIELD_MODULUS).expect("field prime is nonzero");
        let scalar_field = PrimeField::new(CURVE_ORDER).expect("curve order is nonzero");

        // p ≡ 3 (mod 4), so square roots in the field are c^((p+1)/4).
        let sqrt_exponent = FIELD_MODULUS.wrapping_add(&U256::ONE).shr_vartime(2);

        Curve {
            field,
            scalar_field,
            b: CURVE_B,
            generator: Point::Affine {
                x: GENERATOR_X,
                y: GENERATOR_Y,
            },
            sqrt_exponent,
        }
    }

    /// Returns the generator point `G`.
    pub fn generator(&self) -> Point {
        self.generator
    }

    /// The right-hand side of the curve equation, `x³ + 7 mod p`.
    fn curve_rhs(&self, x: &U256) -> U256 {
        let x_cubed = self.field.mul(&self.field.mul(x, x), x);
        self.field.add(&x_cubed, &self.b)
    }

    /// Checks whether a point satisfies the curve equation.
    ///
    /// The point at infinity is considered on-curve. Finite points must
    /// have reduced coordinates satisfying `y² ≡ x³ + 7 (mod p)`.
    pub fn is_on_curve(&self, point: &Point) -> bool {
        match point {
            Point::Infinity => true,
            Point::Affine { x, y } => {
                self.field.contains(x)
                    && self.field.contains(y)
                    && self.field.mul(y, y) == self.curve_rhs(x)
            }
        }
    }

    /// Negates a point: `(x, p - y)`, with infinity mapping to itself.
    pub fn negate(&self, point: &Point) -> Point {
        match point {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y } => Point::Affine {
                x: *x,
                y: self.field.neg(y),
            },
        }
    }

    /// Adds two points using the affine chord rule, falling back to
    /// [`double`][Self::double] when the points coincide.
    pub fn add(&self, p1: &Point, p2: &Point) -> Point {
        let (x1, y1) = match p1 {
            Point::Infinity => return *p2,
            Point::Affine { x, y } => (x, y),
        };
        let (x2, y2) = match p2 {
            Point::Infinity => return *p1,
            Point::Affine { x, y } => (x, y),
        };

        if x1 == x2 {
            // Inverse pair or a 2-torsion point: the chord is vertical.
            if self.field.add(y1, y2) == U256::ZERO || y1 == &U256::ZERO {
                return Point::Infinity;
            }
            return self.double(p1);
        }

        let dy = self.field.sub(y2, y1);
        let dx = self.field.sub(x2, x1);
        let dx_inv = self
            .field
            .invert(&dx)
            .expect("dx is nonzero when x1 != x2");
        let slope = self.field.mul(&dy, &dx_inv);

        let x3 = self
            .field
            .sub(&self.field.sub(&self.field.mul(&slope, &slope), x1), x2);
        let y3 = self
            .field
            .sub(&self.field.mul(&slope, &self.field.sub(x1, &x3)), y1);

        Point::Affine { x: x3, y: y3 }
    }

    /// Doubles a point using the affine tangent rule.
    ///
    /// Doubling the point at infinity or a point with `y = 0` yields the
    /// point at infinity.
    pub fn double(&self, point: &Point) -> Point {
        let (x, y) = match point {
            Point::Infinity => return Point::Infinity,
            Point::Affine { x, y } => (x, y),
        };
        if y == &U256::ZERO {
            return Point::Infinity;
        }

        let two = U256::from_u64(2);
        let numerator = self.field.mul(&U256::from_u64(3), &self.field.mul(x, x));
        let denominator = self.field.mul(&two, y);
        let denom_inv = self
            .field
            .invert(&denominator)
            .expect("2y is nonzero when y != 0");
        let slope = self.field.mul(&numerator, &denom_inv);

        let x3 = self
            .field
            .sub(&self.field.mul(&slope, &slope), &self.field.mul(&two, x));
        let y3 = self
            .field
            .sub(&self.field.mul(&slope, &self.field.sub(x, &x3)), y);

        Point::Affine { x: x3, y: y3 }
    }

    /// Multiplies a point by a scalar with a least-significant-bit-first
    /// double-and-add ladder.
    ///
    /// A zero scalar yields the point at infinity. The ladder is not
    /// constant-time; this engine only multiplies public scalars.
    pub fn mul(&self, point: &Point, scalar: &U256) -> Point {
        let mut result = Point::Infinity;
        let mut addend = *point;

        for byte in scalar.to_be_bytes().iter().rev() {
            for bit in 0..8 {
                if (byte >> bit) & 1 == 1 {
                    result = self.add(&result, &addend);
                }
                addend = self.double(&addend);
            }
        }
        result
    }

    /// Lifts an X-only coordinate to the curve point with even Y, per
    /// BIP340's `lift_x`.
    ///
    /// Fails with [`LiftXError`] if `x` is not less than the field prime,
    /// or if `x³ + 7` has no square root in the field. Never returns the
    /// point at infinity.
    pub fn lift_x_even_y(&self, x: &U256) -> Result<Point, LiftXError> {
        if !self.field.contains(x) {
            return Err(LiftXError);
        }

        let c = self.curve_rhs(x);
        let y = self.field.pow(&c, &self.sqrt_exponent);

        // The exponentiation only yields a square root when c is a
        // quadratic residue; otherwise x is not on the curve.
        if self.field.mul(&y, &y) != c {
            return Err(LiftXError);
        }

        let y = if bool::from(y.is_odd()) {
            self.field.neg(&y)
        } else {
            y
        };
        Ok(Point::Affine { x: *x, y })
    }
}

mod encodings {
    use super::*;

    impl BinaryEncoding for Point {
        type Serialized = [u8; POINT_SIZE];

        /// Serializes the point as 32 big-endian X bytes followed by 32
        /// big-endian Y bytes. The point at infinity serializes as 64
        /// zero bytes.
        fn to_bytes(&self) -> Self::Serialized {
            let mut serialized = [0u8; POINT_SIZE];
            if let Point::Affine { x, y } = self {
                serialized[..32].clone_from_slice(&x.to_be_bytes());
                serialized[32..].clone_from_slice(&y.to_be_bytes());
            }
            serialized
        }

        /// Deserializes a point from its 64-byte uncompressed affine
        /// encoding. All-zero bytes decode to the point at infinity;
        /// anything else must be a pair of reduced coordinates satisfying
        /// the secp256k1 curve equation.
        fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError<Self>> {
            if bytes.len() != POINT_SIZE {
                return Err(DecodeError::bad_length(bytes.len()));
            }
            if bytes.iter().all(|&b| b == 0) {
                return Ok(Point::Infinity);
            }

            let x = U256::from_be_bytes(<[u8; 32]>::try_from(&bytes[..32]).unwrap());
            let y = U256::from_be_bytes(<[u8; 32]>::try_from(&bytes[32..]).unwrap());
            let point = Point::Affine { x, y };

            if !SECP256K1.is_on_curve(&point) {
                return Err(DecodeError::new(DecodeFailureReason::InvalidPoint));
            }
            Ok(point)
        }
    }

    impl_encoding_traits!(Point, POINT_SIZE);
    impl_hex_display!(Point);
}
