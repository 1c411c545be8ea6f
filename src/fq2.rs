//! Quadratic extension Fq² = Fq[u]/(u² + 1).

#![allow(clippy::should_implement_trait)]

use num_bigint::BigUint;

use crate::constants;
use crate::error::CurveError;
use crate::field::{FieldElement, Fq};

/// a + b·u with u² = -1.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Fq2 {
    pub c0: Fq,
    pub c1: Fq,
}

impl Fq2 {
    pub fn new(c0: Fq, c1: Fq) -> Self {
        Self { c0, c1 }
    }

    pub fn from_fq(c0: Fq) -> Self {
        Self::new(c0, Fq::zero())
    }

    pub fn conjugate(&self) -> Self {
        Self::new(self.c0.clone(), self.c1.neg())
    }

    /// x ↦ x^(q^power); conjugation on odd powers, identity otherwise.
    pub fn frobenius(&self, power: usize) -> Self {
        if power % 2 == 1 {
            self.conjugate()
        } else {
            self.clone()
        }
    }

    /// Component-wise strict comparison. Both coordinates must compare
    /// the same way, so incomparable pairs exist; serialization uses
    /// [`Fq2::is_lex_largest`] instead.
    pub fn lt(&self, other: &Self) -> bool {
        self.c0.value() < other.c0.value() && self.c1.value() < other.c1.value()
    }

    pub fn gt(&self, other: &Self) -> bool {
        self.c0.value() > other.c0.value() && self.c1.value() > other.c1.value()
    }

    /// True iff self is component-wise smaller than its negation.
    pub fn sign_big_endian(&self) -> bool {
        self.lt(&self.neg())
    }

    /// Zcash convention: compare (c1, c0) lexicographically against the
    /// negation. Splits every ±y pair, which the compressed sign flag
    /// relies on.
    pub fn is_lex_largest(&self) -> bool {
        let neg = self.neg();
        self.c1.value() > neg.c1.value()
            || (self.c1.value() == neg.c1.value() && self.c0.value() > neg.c0.value())
    }

    /// Square root by the eighth-roots-of-unity method: the candidate
    /// s = x^((q²+8)/16) is off from a true root by a fourth root of
    /// unity, which s²/x locates in the precomputed table.
    pub fn sqrt(&self) -> Result<Self, CurveError> {
        if self.is_zero() {
            return Ok(Self::zero());
        }
        let q2 = constants::q() * constants::q();
        let exp = (&q2 + 8u32) >> 4;
        let s = self.pow(&exp);
        let check = s.square().mul(&self.inv()?);
        let roots = constants::eighth_roots_of_unity();
        for k in 0..4 {
            if roots[2 * k] == check {
                let x1 = s.mul(&roots[k].inv()?);
                let x2 = x1.neg();
                let root = if x1.gt(&x2) { x1 } else { x2 };
                debug_assert!(root.square() == *self);
                return Ok(root);
            }
        }
        Err(CurveError::NoSquareRoot)
    }

    /// Exponentiation with the base-field modpow on both coordinates is
    /// not available here; the generic square-and-multiply from the trait
    /// applies. This wrapper only fixes the receiver type for callers
    /// holding a `&BigUint` exponent.
    pub fn pow(&self, exp: &BigUint) -> Self {
        <Self as FieldElement>::pow(self, exp)
    }
}

impl FieldElement for Fq2 {
    fn zero() -> Self {
        Self::new(Fq::zero(), Fq::zero())
    }

    fn one() -> Self {
        Self::new(Fq::one(), Fq::zero())
    }

    fn is_zero(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero()
    }

    fn add(&self, rhs: &Self) -> Self {
        Self::new(self.c0.add(&rhs.c0), self.c1.add(&rhs.c1))
    }

    fn sub(&self, rhs: &Self) -> Self {
        Self::new(self.c0.sub(&rhs.c0), self.c1.sub(&rhs.c1))
    }

    fn neg(&self) -> Self {
        Self::new(self.c0.neg(), self.c1.neg())
    }

    fn mul(&self, rhs: &Self) -> Self {
        // (a + bu)(c + du) = (ac - bd) + (ad + bc)u with u² = -1.
        let ac = self.c0.mul(&rhs.c0);
        let bd = self.c1.mul(&rhs.c1);
        let ad = self.c0.mul(&rhs.c1);
        let bc = self.c1.mul(&rhs.c0);
        Self::new(ac.sub(&bd), ad.add(&bc))
    }

    fn inv(&self) -> Result<Self, CurveError> {
        if self.is_zero() {
            return Err(CurveError::InversionOfZero);
        }
        let norm = self.c0.square().add(&self.c1.square());
        let factor = norm.inv()?;
        Ok(Self::new(self.c0.mul(&factor), self.c1.neg().mul(&factor)))
    }

    /// (a + bu)(1 + u) = (a - b) + (a + b)u.
    fn mul_by_nonresidue(&self) -> Self {
        Self::new(self.c0.sub(&self.c1), self.c0.add(&self.c1))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::field::test_support::{check_field_laws, Lcg};

    pub(crate) fn fq2_samples(seed: u64, count: usize) -> Vec<Fq2> {
        let mut lcg = Lcg(seed);
        (0..count)
            .map(|_| {
                Fq2::new(
                    Fq::new(lcg.next_biguint(384)),
                    Fq::new(lcg.next_biguint(384)),
                )
            })
            .collect()
    }

    #[test]
    fn test_fq2_field_laws() {
        check_field_laws(&fq2_samples(0x2222_aaaa_5555_0001, 16));
    }

    #[test]
    fn test_u_squares_to_minus_one() {
        let u = Fq2::new(Fq::zero(), Fq::one());
        assert_eq!(u.square(), Fq2::one().neg());
    }

    #[test]
    fn test_nonresidue_matches_explicit_mul() {
        let xi = Fq2::new(Fq::one(), Fq::one());
        for a in fq2_samples(0x0f0f_1e1e_2d2d_3c3c, 8) {
            assert_eq!(a.mul_by_nonresidue(), a.mul(&xi));
        }
    }

    #[test]
    fn test_sqrt_roundtrip() {
        for a in fq2_samples(0x7777_0001_3333_0002, 6) {
            let square = a.square();
            let root = match square.sqrt() {
                Ok(root) => root,
                Err(_) => {
                    assert!(false, "sqrt of a square");
                    return;
                }
            };
            assert_eq!(root.square(), square);
        }
    }

    #[test]
    fn test_sqrt_of_nonresidue_fails() {
        // (1+u) generates the full multiplicative 2-part; ξ itself is a
        // non-residue.
        let xi = Fq2::new(Fq::one(), Fq::one());
        assert_eq!(xi.sqrt(), Err(CurveError::NoSquareRoot));
    }

    #[test]
    fn test_sqrt_prefers_greater_candidate() {
        for a in fq2_samples(0x4545_4545_4545_4545, 6) {
            let square = a.square();
            let root = match square.sqrt() {
                Ok(root) => root,
                Err(_) => {
                    assert!(false, "sqrt of a square");
                    return;
                }
            };
            assert!(!root.neg().gt(&root));
        }
    }

    #[test]
    fn test_frobenius_is_conjugation() {
        for a in fq2_samples(0x1357_9bdf_0246_8ace, 6) {
            assert_eq!(a.frobenius(1), a.conjugate());
            assert_eq!(a.frobenius(2), a);
            assert_eq!(a.frobenius(1).frobenius(1), a);
            // frob is x ↦ x^q.
            assert_eq!(a.frobenius(1), a.pow(crate::constants::q()));
        }
    }

    #[test]
    fn test_frobenius_multiplicative() {
        let samples = fq2_samples(0x9999_8888_7777_6666, 8);
        for pair in samples.chunks(2) {
            if pair.len() < 2 {
                continue;
            }
            assert_eq!(
                pair[0].mul(&pair[1]).frobenius(1),
                pair[0].frobenius(1).mul(&pair[1].frobenius(1))
            );
        }
    }

    #[test]
    fn test_sign_big_endian() {
        let one = Fq2::one();
        // 1 = (1, 0): c1 = 0 is not strictly below q - 0 = q... the
        // component-wise order leaves (1, 0) incomparable with (-1, 0).
        assert!(!one.sign_big_endian());
        let both_small = Fq2::new(Fq::from_u64(5), Fq::from_u64(9));
        assert!(both_small.sign_big_endian());
        assert!(!both_small.neg().sign_big_endian());
    }
}
