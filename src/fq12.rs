//! Degree-twelve extension Fq¹² = Fq⁶[w]/(w² - v) and the final
//! exponentiation.
//!
//! Elements that have been through the easy part of the final
//! exponentiation live in the cyclotomic subgroup of order Φ₁₂(q), where
//! squaring compresses to three Fq⁴ sub-squarings (Granger–Scott) and the
//! hard part runs the |X|-parameterised addition chain.

#![allow(clippy::should_implement_trait)]

use num_bigint::BigUint;

use crate::constants;
use crate::error::CurveError;
use crate::field::{FieldElement, Fq};
use crate::fq2::Fq2;
use crate::fq6::Fq6;

/// x + y·w with w² = v.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Fq12 {
    pub c0: Fq6,
    pub c1: Fq6,
}

impl Fq12 {
    pub fn new(c0: Fq6, c1: Fq6) -> Self {
        Self { c0, c1 }
    }

    pub fn from_fq6(c0: Fq6) -> Self {
        Self::new(c0, Fq6::zero())
    }

    /// Inject an Fq scalar; the line functions evaluate G1 coordinates
    /// inside Fq¹² through this.
    pub fn from_fq(value: Fq) -> Self {
        Self::from_fq6(Fq6::from_fq2(Fq2::from_fq(value)))
    }

    /// Conjugation over Fq⁶: negate the w coordinate. For cyclotomic
    /// elements this is the inverse.
    pub fn conjugate(&self) -> Self {
        Self::new(self.c0.clone(), self.c1.neg())
    }

    /// x ↦ x^(q^power).
    pub fn frobenius(&self, power: usize) -> Self {
        let coeff = &constants::frob12_coeffs()[power % 12];
        Self::new(
            self.c0.frobenius(power),
            self.c1.frobenius(power).scale(coeff),
        )
    }

    pub fn pow(&self, exp: &BigUint) -> Self {
        <Self as FieldElement>::pow(self, exp)
    }

    /// Compressed squaring for the cyclotomic subgroup, three Fq⁴
    /// sub-squarings in Granger–Scott form. Not meaningful outside the
    /// subgroup.
    pub fn cyclotomic_square(&self) -> Self {
        let c0c0 = &self.c0.c0;
        let c0c1 = &self.c0.c1;
        let c0c2 = &self.c0.c2;
        let c1c0 = &self.c1.c0;
        let c1c1 = &self.c1.c1;
        let c1c2 = &self.c1.c2;

        let (t3, t4) = fq4_square(c0c0, c1c1);
        let (t5, t6) = fq4_square(c1c0, c0c2);
        let (t7, t8) = fq4_square(c0c1, c1c2);
        let t9 = t8.mul_by_nonresidue();

        let two = |x: &Fq2| x.add(x);
        Self::new(
            Fq6::new(
                two(&t3.sub(c0c0)).add(&t3),
                two(&t5.sub(c0c1)).add(&t5),
                two(&t7.sub(c0c2)).add(&t7),
            ),
            Fq6::new(
                two(&t9.add(c1c0)).add(&t9),
                two(&t4.add(c1c1)).add(&t4),
                two(&t6.add(c1c2)).add(&t6),
            ),
        )
    }

    /// Left-to-right binary exponentiation with cyclotomic squarings.
    pub fn cyclotomic_exp(&self, exp: &BigUint) -> Self {
        let mut result = Self::one();
        for i in (0..exp.bits()).rev() {
            result = result.cyclotomic_square();
            if exp.bit(i) {
                result = result.mul(self);
            }
        }
        result
    }

    /// Easy part of the final exponentiation: raise to (q⁶-1)(q²+1),
    /// landing in the cyclotomic subgroup.
    pub fn easy_part(&self) -> Self {
        let inv = self.inv().unwrap_or_else(|_| {
            debug_assert!(false, "easy part of zero");
            Self::zero()
        });
        let t0 = self.frobenius(6).mul(&inv);
        t0.frobenius(2).mul(&t0)
    }

    /// Final exponentiation: the easy part followed by the hard-part
    /// chain, which raises the cyclotomic image to 3·Φ₁₂(q)/r. The
    /// overall exponent is 3·(q¹²-1)/r, the cube of the canonical
    /// representative; cubing is a bijection of the order-r target
    /// subgroup (gcd(3, r) = 1), so product-equals-one checks see the
    /// same answer.
    pub fn final_exponentiate(&self) -> Self {
        hard_part(&self.easy_part())
    }
}

/// Squaring in Fq⁴ = Fq²[w]/(w² - ξ·…): returns (a² + ξb², (a+b)² - a² - b²).
fn fq4_square(a: &Fq2, b: &Fq2) -> (Fq2, Fq2) {
    let a2 = a.square();
    let b2 = b.square();
    (
        b2.mul_by_nonresidue().add(&a2),
        a.add(b).square().sub(&a2).sub(&b2),
    )
}

/// Hard part of the final exponentiation, the |X|-parameterised
/// Fuentes-Castañeda style addition chain. The conjugations after each
/// cyclotomic exponentiation account for X being negative.
fn hard_part(t1: &Fq12) -> Fq12 {
    let x = constants::x_abs();
    let t2 = t1.cyclotomic_exp(x).conjugate();
    let t3 = t1.cyclotomic_square().conjugate().mul(&t2);
    let t4 = t3.cyclotomic_exp(x).conjugate();
    let t5 = t4.cyclotomic_exp(x).conjugate();
    let t6 = t5
        .cyclotomic_exp(x)
        .conjugate()
        .mul(&t2.cyclotomic_square());
    let t7 = t6.cyclotomic_exp(x).conjugate();

    t2.mul(&t5)
        .frobenius(2)
        .mul(&t4.mul(t1).frobenius(3))
        .mul(&t6.mul(&t1.conjugate()).frobenius(1))
        .mul(&t7.mul(&t3.conjugate()).mul(t1))
}

impl FieldElement for Fq12 {
    fn zero() -> Self {
        Self::new(Fq6::zero(), Fq6::zero())
    }

    fn one() -> Self {
        Self::new(Fq6::one(), Fq6::zero())
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
        let v0 = self.c0.mul(&rhs.c0);
        let v1 = self.c1.mul(&rhs.c1);
        let c1 = self
            .c0
            .add(&self.c1)
            .mul(&rhs.c0.add(&rhs.c1))
            .sub(&v0)
            .sub(&v1);
        Self::new(v1.mul_by_nonresidue().add(&v0), c1)
    }

    fn inv(&self) -> Result<Self, CurveError> {
        if self.is_zero() {
            return Err(CurveError::InversionOfZero);
        }
        let norm = self.c0.square().sub(&self.c1.square().mul_by_nonresidue());
        let factor = norm.inv()?;
        Ok(Self::new(
            self.c0.mul(&factor),
            self.c1.neg().mul(&factor),
        ))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::field::test_support::check_field_laws;
    use crate::fq6::tests::fq6_samples;

    pub(crate) fn fq12_samples(seed: u64, count: usize) -> Vec<Fq12> {
        let halves = fq6_samples(seed, count * 2);
        halves
            .chunks(2)
            .map(|pair| Fq12::new(pair[0].clone(), pair[1].clone()))
            .collect()
    }

    #[test]
    fn test_fq12_field_laws() {
        check_field_laws(&fq12_samples(0x1212_1212_1212_1212, 8));
    }

    #[test]
    fn test_w_squares_to_v() {
        let w = Fq12::new(Fq6::zero(), Fq6::one());
        let v = Fq12::from_fq6(Fq6::new(Fq2::zero(), Fq2::one(), Fq2::zero()));
        assert_eq!(w.square(), v);
    }

    #[test]
    fn test_fq6_nonresidue_is_w_squared() {
        // Multiplying the Fq⁶ part by its non-residue is multiplication
        // by w² one level up.
        let w = Fq12::new(Fq6::zero(), Fq6::one());
        for a in fq6_samples(0x0404_0404_0404_0404, 4) {
            assert_eq!(
                Fq12::from_fq6(a.mul_by_nonresidue()),
                Fq12::from_fq6(a).mul(&w.square())
            );
        }
    }

    #[test]
    fn test_frobenius_matches_power_map() {
        for a in fq12_samples(0x0505_0505_0505_0505, 2) {
            assert_eq!(a.frobenius(1), a.pow(crate::constants::q()));
        }
    }

    #[test]
    fn test_frobenius_period_twelve() {
        for a in fq12_samples(0x0606_0606_0606_0606, 2) {
            let mut image = a.clone();
            for _ in 0..12 {
                image = image.frobenius(1);
            }
            assert_eq!(image, a);
        }
    }

    #[test]
    fn test_frobenius_multiplicative() {
        let samples = fq12_samples(0x0707_0707_0707_0707, 4);
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
    fn test_cyclotomic_square_matches_square_in_subgroup() {
        for a in fq12_samples(0x0808_0808_0808_0808, 3) {
            let m = a.easy_part();
            assert_eq!(m.cyclotomic_square(), m.square());
        }
    }

    #[test]
    fn test_cyclotomic_exp_matches_pow_in_subgroup() {
        let exp = BigUint::from(0x1234_5678u64);
        for a in fq12_samples(0x0909_0909_0909_0909, 2) {
            let m = a.easy_part();
            assert_eq!(m.cyclotomic_exp(&exp), m.pow(&exp));
        }
    }

    #[test]
    fn test_conjugate_inverts_cyclotomic_elements() {
        for a in fq12_samples(0x0a0a_0a0a_0a0a_0a0a, 2) {
            let m = a.easy_part();
            assert!(m.mul(&m.conjugate()).is_one());
        }
    }

    #[test]
    fn test_easy_part_lands_in_cyclotomic_subgroup() {
        let q2 = crate::constants::q() * crate::constants::q();
        let phi12 = &q2 * &q2 - &q2 + 1u32;
        for a in fq12_samples(0x0b0b_0b0b_0b0b_0b0b, 2) {
            let m = a.easy_part();
            assert!(m.pow(&phi12).is_one());
        }
    }

    #[test]
    fn test_final_exponentiation_has_order_dividing_r() {
        for a in fq12_samples(0x0c0c_0c0c_0c0c_0c0c, 2) {
            let out = a.final_exponentiate();
            assert!(out.pow(crate::constants::r_order()).is_one());
        }
    }

    #[test]
    fn test_final_exponentiation_exponent_is_three_h() {
        // The chain, easy part included, is a literal 3·(q¹²-1)/r power.
        let q = crate::constants::q();
        let exp = (q.pow(12) - 1u32) / crate::constants::r_order() * 3u32;
        for a in fq12_samples(0x0d0d_0d0d_0d0d_0d0d, 1) {
            assert_eq!(a.final_exponentiate(), a.pow(&exp));
        }
    }
}
