//! The group G1: points on E(Fq), E: y² = x³ + 4.
//!
//! Points are affine; the identity is the reserved pair (0, 0), which is
//! not on the curve. Serialization follows the Zcash BLS12-381 convention
//! (48-byte compressed, 96-byte uncompressed, three flag bits in the top
//! of byte 0).

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

use crate::bigint::abs_biguint;
use crate::constants;
use crate::error::CurveError;
use crate::field::{inv_checked, FieldElement, Fq};

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct G1Point {
    pub x: Fq,
    pub y: Fq,
}

impl G1Point {
    pub fn new(x: Fq, y: Fq) -> Self {
        Self { x, y }
    }

    pub fn identity() -> Self {
        Self::new(Fq::zero(), Fq::zero())
    }

    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }

    pub fn generator() -> Self {
        constants::g1_generator().clone()
    }

    pub fn neg(&self) -> Self {
        if self.is_identity() {
            return self.clone();
        }
        Self::new(self.x.clone(), self.y.neg())
    }

    pub fn double(&self) -> Self {
        if self.is_identity() || self.y.is_zero() {
            return Self::identity();
        }
        let three_x2 = self.x.square().mul(&Fq::from_u64(3));
        let slope = three_x2.mul(&inv_checked(&self.y.add(&self.y)));
        let x3 = slope.square().sub(&self.x).sub(&self.x);
        let y3 = slope.mul(&self.x.sub(&x3)).sub(&self.y);
        Self::new(x3, y3)
    }

    pub fn add(&self, other: &Self) -> Self {
        if self.is_identity() {
            return other.clone();
        }
        if other.is_identity() {
            return self.clone();
        }
        if self.x == other.x {
            if self.y == other.y.neg() {
                return Self::identity();
            }
            return self.double();
        }
        let slope = other
            .y
            .sub(&self.y)
            .mul(&inv_checked(&other.x.sub(&self.x)));
        let x3 = slope.square().sub(&self.x).sub(&other.x);
        let y3 = slope.mul(&self.x.sub(&x3)).sub(&self.y);
        Self::new(x3, y3)
    }

    /// Double-and-add over the unsigned expansion of |c|; the sign is
    /// applied to the result.
    pub fn mul(&self, scalar: &BigInt) -> Self {
        let (magnitude, negative) = abs_biguint(scalar);
        let point = self.mul_unsigned(&magnitude);
        if negative {
            point.neg()
        } else {
            point
        }
    }

    fn mul_unsigned(&self, magnitude: &BigUint) -> Self {
        if magnitude.is_zero() {
            return Self::identity();
        }
        if magnitude == &BigUint::from(1u32) {
            return self.clone();
        }
        let mut acc = Self::identity();
        for i in (0..magnitude.bits()).rev() {
            acc = acc.double();
            if magnitude.bit(i) {
                acc = acc.add(self);
            }
        }
        acc
    }

    /// Identity is not on the curve.
    pub fn is_on_curve(&self) -> bool {
        if self.is_identity() {
            return false;
        }
        let rhs = self.x.square().mul(&self.x).add(constants::b_g1());
        self.y.square() == rhs
    }

    pub fn is_in_subgroup(&self) -> bool {
        self.mul(&BigInt::from(constants::r_order().clone()))
            .is_identity()
    }

    /// Identity and valid subgroup members are acceptable pairing inputs.
    pub(crate) fn is_pairing_input(&self) -> bool {
        self.is_identity() || (self.is_on_curve() && self.is_in_subgroup())
    }

    /// Cofactor clearing by [1 - X]P.
    pub fn clear_cofactor(&self) -> Self {
        self.mul(constants::g1_cofactor())
    }

    pub fn to_bytes(&self, compressed: bool) -> Vec<u8> {
        if compressed {
            let mut out = vec![0u8; 48];
            if self.is_identity() {
                out[0] = 0x80 | 0x40;
                return out;
            }
            out.copy_from_slice(&fq_to_bytes(&self.x));
            out[0] |= 0x80;
            if self.y.is_lex_largest() {
                out[0] |= 0x20;
            }
            out
        } else {
            let mut out = vec![0u8; 96];
            if self.is_identity() {
                out[0] = 0x40;
                return out;
            }
            out[..48].copy_from_slice(&fq_to_bytes(&self.x));
            out[48..].copy_from_slice(&fq_to_bytes(&self.y));
            out
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CurveError> {
        match bytes.len() {
            48 => Self::decompress(bytes),
            96 => Self::from_uncompressed(bytes),
            _ => Err(CurveError::InvalidLength),
        }
    }

    fn decompress(bytes: &[u8]) -> Result<Self, CurveError> {
        if bytes[0] & 0x80 == 0 {
            return Err(CurveError::InvalidPoint);
        }
        let infinity = bytes[0] & 0x40 != 0;
        let lex_largest = bytes[0] & 0x20 != 0;
        let mut payload = [0u8; 48];
        payload.copy_from_slice(bytes);
        payload[0] &= 0x1f;

        if infinity {
            if lex_largest || payload.iter().any(|b| *b != 0) {
                return Err(CurveError::InvalidPoint);
            }
            return Ok(Self::identity());
        }

        let x = fq_from_bytes(&payload)?;
        let rhs = x.square().mul(&x).add(constants::b_g1());
        let mut y = rhs.sqrt().map_err(|_| CurveError::InvalidPoint)?;
        if y.is_lex_largest() != lex_largest {
            y = y.neg();
        }
        Ok(Self::new(x, y))
    }

    fn from_uncompressed(bytes: &[u8]) -> Result<Self, CurveError> {
        if bytes[0] & 0x80 != 0 || bytes[0] & 0x20 != 0 {
            return Err(CurveError::InvalidPoint);
        }
        let infinity = bytes[0] & 0x40 != 0;
        let mut x_bytes = [0u8; 48];
        x_bytes.copy_from_slice(&bytes[..48]);
        x_bytes[0] &= 0x1f;

        if infinity {
            if x_bytes.iter().any(|b| *b != 0) || bytes[48..].iter().any(|b| *b != 0) {
                return Err(CurveError::InvalidPoint);
            }
            return Ok(Self::identity());
        }

        let x = fq_from_bytes(&x_bytes)?;
        let mut y_bytes = [0u8; 48];
        y_bytes.copy_from_slice(&bytes[48..]);
        let y = fq_from_bytes(&y_bytes)?;
        let point = Self::new(x, y);
        if !point.is_on_curve() {
            return Err(CurveError::InvalidPoint);
        }
        Ok(point)
    }
}

pub(crate) fn fq_to_bytes(value: &Fq) -> [u8; 48] {
    let raw = value.value().to_bytes_be();
    let mut out = [0u8; 48];
    out[48 - raw.len()..].copy_from_slice(&raw);
    out
}

pub(crate) fn fq_from_bytes(bytes: &[u8; 48]) -> Result<Fq, CurveError> {
    let value = BigUint::from_bytes_be(bytes);
    if &value >= constants::q() {
        return Err(CurveError::InvalidPoint);
    }
    Ok(Fq::new(value))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[test]
    fn test_generator_is_valid() {
        let g = G1Point::generator();
        assert!(g.is_on_curve());
        assert!(g.is_in_subgroup());
    }

    #[test]
    fn test_identity_is_special() {
        let id = G1Point::identity();
        assert!(id.is_identity());
        assert!(!id.is_on_curve());
        assert!(id.is_in_subgroup());
    }

    #[test]
    fn test_group_laws() {
        let g = G1Point::generator();
        let id = G1Point::identity();
        assert_eq!(g.add(&id), g);
        assert_eq!(id.add(&g), g);
        assert_eq!(g.add(&g.neg()), id);

        let two_g = g.double();
        let three_g = two_g.add(&g);
        assert_eq!(g.add(&two_g), two_g.add(&g));
        assert_eq!(three_g, g.add(&g).add(&g));
        assert!(three_g.is_on_curve());
    }

    #[test]
    fn test_scalar_mul_matches_addition() {
        let g = G1Point::generator();
        assert!(g.mul(&BigInt::from(0)).is_identity());
        assert_eq!(g.mul(&BigInt::from(1)), g);
        assert_eq!(g.mul(&BigInt::from(-1)), g.neg());

        let mut acc = G1Point::identity();
        for n in 1..=9 {
            acc = acc.add(&g);
            assert_eq!(g.mul(&BigInt::from(n)), acc);
        }
        assert_eq!(
            g.mul(&BigInt::from(25)).add(&g.mul(&BigInt::from(17))),
            g.mul(&BigInt::from(42))
        );
    }

    #[test]
    fn test_order_annihilates_generator() {
        let g = G1Point::generator();
        let r = BigInt::from(crate::constants::r_order().clone());
        assert!(g.mul(&r).is_identity());
    }

    #[test]
    fn test_clear_cofactor_stays_in_subgroup() {
        let g = G1Point::generator();
        let cleared = g.clear_cofactor();
        assert!(cleared.is_on_curve());
        assert!(cleared.is_in_subgroup());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let g = G1Point::generator();
        let points = [
            G1Point::identity(),
            g.clone(),
            g.neg(),
            g.mul(&BigInt::from(7)),
            g.mul(&BigInt::from(12345)),
        ];
        for point in &points {
            for compressed in [true, false] {
                let bytes = point.to_bytes(compressed);
                assert_eq!(bytes.len(), if compressed { 48 } else { 96 });
                let decoded = match G1Point::from_bytes(&bytes) {
                    Ok(decoded) => decoded,
                    Err(_) => {
                        assert!(false, "decode failed");
                        return;
                    }
                };
                assert_eq!(&decoded, point);
            }
        }
    }

    #[test]
    fn test_serialization_roundtrip_outside_subgroup() {
        // Round-trips hold for any curve point, subgroup member or not.
        let mut lcg = crate::field::test_support::Lcg(0x3131_3131_3131_3131);
        let point = loop {
            let x = Fq::new(lcg.next_biguint(384));
            let rhs = x.square().mul(&x).add(crate::constants::b_g1());
            if let Ok(y) = rhs.sqrt() {
                break G1Point::new(x, y);
            }
        };
        assert!(point.is_on_curve());
        assert!(!point.is_in_subgroup());
        for compressed in [true, false] {
            let bytes = point.to_bytes(compressed);
            assert_eq!(G1Point::from_bytes(&bytes), Ok(point.clone()));
        }
    }

    #[test]
    fn test_serialization_sign_bit() {
        let g = G1Point::generator();
        let pos = g.to_bytes(true);
        let neg = g.neg().to_bytes(true);
        assert_eq!(pos[0] & 0x20 != 0, g.y.is_lex_largest());
        assert_ne!(pos[0] & 0x20, neg[0] & 0x20);
        assert_eq!(&pos[1..], &neg[1..]);
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        let g = G1Point::generator();
        assert_eq!(
            G1Point::from_bytes(&[0u8; 47]),
            Err(CurveError::InvalidLength)
        );

        // Compressed flag missing.
        let mut bytes = g.to_bytes(true);
        bytes[0] &= 0x7f;
        assert!(G1Point::from_bytes(&bytes).is_err());

        // Infinity with a nonzero payload.
        let mut bytes = G1Point::identity().to_bytes(true);
        bytes[47] = 1;
        assert_eq!(
            G1Point::from_bytes(&bytes),
            Err(CurveError::InvalidPoint)
        );

        // Uncompressed point off the curve.
        let mut bytes = g.to_bytes(false);
        bytes[95] ^= 1;
        assert_eq!(
            G1Point::from_bytes(&bytes),
            Err(CurveError::InvalidPoint)
        );
    }
}
