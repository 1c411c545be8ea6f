//! The group G2: points on the twist E'(Fq²), E': y² = x³ + 4(1 + u).
//!
//! Carries the untwist embedding into Fq¹² that the pairing line
//! functions evaluate through, and the Zcash 96/192-byte encodings with
//! the Fq² x-coordinate stored as (c1, c0).

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

use crate::bigint::abs_biguint;
use crate::constants;
use crate::error::CurveError;
use crate::field::{inv_checked, FieldElement, Fq};
use crate::fq12::Fq12;
use crate::fq2::Fq2;
use crate::fq6::Fq6;
use crate::g1::{fq_from_bytes, fq_to_bytes};

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct G2Point {
    pub x: Fq2,
    pub y: Fq2,
}

impl G2Point {
    pub fn new(x: Fq2, y: Fq2) -> Self {
        Self { x, y }
    }

    pub fn identity() -> Self {
        Self::new(Fq2::zero(), Fq2::zero())
    }

    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }

    pub fn generator() -> Self {
        constants::g2_generator().clone()
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
        let three = Fq2::from_fq(Fq::from_u64(3));
        let slope = self
            .x
            .square()
            .mul(&three)
            .mul(&inv_checked(&self.y.add(&self.y)));
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

    pub fn is_on_curve(&self) -> bool {
        if self.is_identity() {
            return false;
        }
        let rhs = self.x.square().mul(&self.x).add(constants::b_g2());
        self.y.square() == rhs
    }

    pub fn is_in_subgroup(&self) -> bool {
        self.mul(&BigInt::from(constants::r_order().clone()))
            .is_identity()
    }

    pub(crate) fn is_pairing_input(&self) -> bool {
        self.is_identity() || (self.is_on_curve() && self.is_in_subgroup())
    }

    /// Cofactor clearing by the fixed scalar h2.
    pub fn clear_cofactor(&self) -> Self {
        self.mul(constants::g2_cofactor())
    }

    /// Lift the twist point into affine coordinates over Fq¹², where the
    /// Miller loop evaluates its line functions:
    ///   X = x·(v, 0)⁻¹, Y = y·(0, v)⁻¹ with v = (0, 1, 0) ∈ Fq⁶.
    pub(crate) fn untwist(&self) -> (Fq12, Fq12) {
        let root = Fq6::new(Fq2::zero(), Fq2::one(), Fq2::zero());
        let wide_x = Fq12::from_fq6(Fq6::from_fq2(self.x.clone()))
            .mul(&inv_checked(&Fq12::from_fq6(root.clone())));
        let wide_y = Fq12::from_fq6(Fq6::from_fq2(self.y.clone()))
            .mul(&inv_checked(&Fq12::new(Fq6::zero(), root)));
        (wide_x, wide_y)
    }

    pub fn to_bytes(&self, compressed: bool) -> Vec<u8> {
        if compressed {
            let mut out = vec![0u8; 96];
            if self.is_identity() {
                out[0] = 0x80 | 0x40;
                return out;
            }
            out[..48].copy_from_slice(&fq_to_bytes(&self.x.c1));
            out[48..].copy_from_slice(&fq_to_bytes(&self.x.c0));
            out[0] |= 0x80;
            if self.y.is_lex_largest() {
                out[0] |= 0x20;
            }
            out
        } else {
            let mut out = vec![0u8; 192];
            if self.is_identity() {
                out[0] = 0x40;
                return out;
            }
            out[..48].copy_from_slice(&fq_to_bytes(&self.x.c1));
            out[48..96].copy_from_slice(&fq_to_bytes(&self.x.c0));
            out[96..144].copy_from_slice(&fq_to_bytes(&self.y.c1));
            out[144..].copy_from_slice(&fq_to_bytes(&self.y.c0));
            out
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CurveError> {
        match bytes.len() {
            96 => Self::decompress(bytes),
            192 => Self::from_uncompressed(bytes),
            _ => Err(CurveError::InvalidLength),
        }
    }

    fn decompress(bytes: &[u8]) -> Result<Self, CurveError> {
        if bytes[0] & 0x80 == 0 {
            return Err(CurveError::InvalidPoint);
        }
        let infinity = bytes[0] & 0x40 != 0;
        let lex_largest = bytes[0] & 0x20 != 0;
        let mut payload = [0u8; 96];
        payload.copy_from_slice(bytes);
        payload[0] &= 0x1f;

        if infinity {
            if lex_largest || payload.iter().any(|b| *b != 0) {
                return Err(CurveError::InvalidPoint);
            }
            return Ok(Self::identity());
        }

        let x = fq2_from_bytes(&payload)?;
        let rhs = x.square().mul(&x).add(constants::b_g2());
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
        let mut x_payload = [0u8; 96];
        x_payload.copy_from_slice(&bytes[..96]);
        x_payload[0] &= 0x1f;

        if infinity {
            if x_payload.iter().any(|b| *b != 0) || bytes[96..].iter().any(|b| *b != 0) {
                return Err(CurveError::InvalidPoint);
            }
            return Ok(Self::identity());
        }

        let x = fq2_from_bytes(&x_payload)?;
        let mut y_payload = [0u8; 96];
        y_payload.copy_from_slice(&bytes[96..]);
        let y = fq2_from_bytes(&y_payload)?;
        let point = Self::new(x, y);
        if !point.is_on_curve() {
            return Err(CurveError::InvalidPoint);
        }
        Ok(point)
    }
}

/// Fq² from the wire order (c1, c0), 48 bytes each.
fn fq2_from_bytes(bytes: &[u8; 96]) -> Result<Fq2, CurveError> {
    let mut c1 = [0u8; 48];
    c1.copy_from_slice(&bytes[..48]);
    let mut c0 = [0u8; 48];
    c0.copy_from_slice(&bytes[48..]);
    Ok(Fq2::new(fq_from_bytes(&c0)?, fq_from_bytes(&c1)?))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[test]
    fn test_generator_is_valid() {
        let g = G2Point::generator();
        assert!(g.is_on_curve());
        assert!(g.is_in_subgroup());
    }

    #[test]
    fn test_group_laws() {
        let g = G2Point::generator();
        let id = G2Point::identity();
        assert_eq!(g.add(&id), g);
        assert_eq!(g.add(&g.neg()), id);
        let two_g = g.double();
        assert_eq!(g.add(&two_g), two_g.add(&g));
        assert_eq!(g.mul(&BigInt::from(5)), two_g.add(&two_g).add(&g));
    }

    #[test]
    fn test_order_annihilates_generator() {
        let g = G2Point::generator();
        let r = BigInt::from(crate::constants::r_order().clone());
        assert!(g.mul(&r).is_identity());
    }

    #[test]
    fn test_untwist_lands_on_fq12_curve() {
        // The untwisted image satisfies Y² = X³ + 4 over Fq¹².
        let four = Fq12::from_fq(Fq::from_u64(4));
        for point in [G2Point::generator(), G2Point::generator().double()] {
            let (x, y) = point.untwist();
            assert_eq!(y.square(), x.square().mul(&x).add(&four));
        }
    }

    #[test]
    fn test_serialization_roundtrip() {
        let g = G2Point::generator();
        let points = [
            G2Point::identity(),
            g.clone(),
            g.neg(),
            g.mul(&BigInt::from(11)),
        ];
        for point in &points {
            for compressed in [true, false] {
                let bytes = point.to_bytes(compressed);
                assert_eq!(bytes.len(), if compressed { 96 } else { 192 });
                let decoded = match G2Point::from_bytes(&bytes) {
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
        let mut lcg = crate::field::test_support::Lcg(0x3232_3232_3232_3232);
        let point = loop {
            let x = Fq2::new(
                Fq::new(lcg.next_biguint(384)),
                Fq::new(lcg.next_biguint(384)),
            );
            let rhs = x.square().mul(&x).add(crate::constants::b_g2());
            if let Ok(y) = rhs.sqrt() {
                break G2Point::new(x, y);
            }
        };
        assert!(point.is_on_curve());
        assert!(!point.is_in_subgroup());
        for compressed in [true, false] {
            let bytes = point.to_bytes(compressed);
            assert_eq!(G2Point::from_bytes(&bytes), Ok(point.clone()));
        }
    }

    #[test]
    fn test_serialization_sign_bit() {
        let g = G2Point::generator();
        let pos = g.to_bytes(true);
        let neg = g.neg().to_bytes(true);
        assert_ne!(pos[0] & 0x20, neg[0] & 0x20);
        assert_eq!(&pos[1..], &neg[1..]);
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        assert_eq!(
            G2Point::from_bytes(&[0u8; 95]),
            Err(CurveError::InvalidLength)
        );

        let mut bytes = G2Point::identity().to_bytes(true);
        bytes[95] = 1;
        assert_eq!(
            G2Point::from_bytes(&bytes),
            Err(CurveError::InvalidPoint)
        );

        let g = G2Point::generator();
        let mut bytes = g.to_bytes(false);
        bytes[191] ^= 1;
        assert_eq!(
            G2Point::from_bytes(&bytes),
            Err(CurveError::InvalidPoint)
        );
    }

    #[test]
    fn test_clear_cofactor_stays_in_subgroup() {
        let g = G2Point::generator();
        let cleared = g.clear_cofactor();
        assert!(cleared.is_on_curve());
        assert!(cleared.is_in_subgroup());
    }
}
