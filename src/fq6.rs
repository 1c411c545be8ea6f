//! Cubic extension Fq⁶ = Fq²[v]/(v³ - ξ), ξ = 1 + u.

#![allow(clippy::should_implement_trait)]

use crate::constants;
use crate::error::CurveError;
use crate::field::FieldElement;
use crate::fq2::Fq2;

/// x + y·v + z·v² with v³ = ξ.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Fq6 {
    pub c0: Fq2,
    pub c1: Fq2,
    pub c2: Fq2,
}

impl Fq6 {
    pub fn new(c0: Fq2, c1: Fq2, c2: Fq2) -> Self {
        Self { c0, c1, c2 }
    }

    pub fn from_fq2(c0: Fq2) -> Self {
        Self::new(c0, Fq2::zero(), Fq2::zero())
    }

    /// Multiply every coordinate by an Fq² scalar.
    pub fn scale(&self, k: &Fq2) -> Self {
        Self::new(self.c0.mul(k), self.c1.mul(k), self.c2.mul(k))
    }

    /// x ↦ x^(q^power): coordinate-wise Fq² Frobenius, then the tabulated
    /// ξ-power twists on the v and v² coordinates.
    pub fn frobenius(&self, power: usize) -> Self {
        let coeffs = constants::frob6_coeffs();
        Self::new(
            self.c0.frobenius(power),
            self.c1.frobenius(power).mul(&coeffs[0][power % 6]),
            self.c2.frobenius(power).mul(&coeffs[1][power % 6]),
        )
    }
}

impl FieldElement for Fq6 {
    fn zero() -> Self {
        Self::new(Fq2::zero(), Fq2::zero(), Fq2::zero())
    }

    fn one() -> Self {
        Self::new(Fq2::one(), Fq2::zero(), Fq2::zero())
    }

    fn is_zero(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero() && self.c2.is_zero()
    }

    fn add(&self, rhs: &Self) -> Self {
        Self::new(
            self.c0.add(&rhs.c0),
            self.c1.add(&rhs.c1),
            self.c2.add(&rhs.c2),
        )
    }

    fn sub(&self, rhs: &Self) -> Self {
        Self::new(
            self.c0.sub(&rhs.c0),
            self.c1.sub(&rhs.c1),
            self.c2.sub(&rhs.c2),
        )
    }

    fn neg(&self) -> Self {
        Self::new(self.c0.neg(), self.c1.neg(), self.c2.neg())
    }

    fn mul(&self, rhs: &Self) -> Self {
        // Karatsuba-style interpolation: six Fq² products.
        let t0 = self.c0.mul(&rhs.c0);
        let t1 = self.c1.mul(&rhs.c1);
        let t2 = self.c2.mul(&rhs.c2);

        let z0 = self
            .c1
            .add(&self.c2)
            .mul(&rhs.c1.add(&rhs.c2))
            .sub(&t1)
            .sub(&t2)
            .mul_by_nonresidue()
            .add(&t0);
        let z1 = self
            .c0
            .add(&self.c1)
            .mul(&rhs.c0.add(&rhs.c1))
            .sub(&t0)
            .sub(&t1)
            .add(&t2.mul_by_nonresidue());
        let z2 = self
            .c0
            .add(&self.c2)
            .mul(&rhs.c0.add(&rhs.c2))
            .sub(&t0)
            .sub(&t2)
            .add(&t1);

        Self::new(z0, z1, z2)
    }

    fn inv(&self) -> Result<Self, CurveError> {
        if self.is_zero() {
            return Err(CurveError::InversionOfZero);
        }
        let t0 = self
            .c0
            .square()
            .sub(&self.c1.mul(&self.c2).mul_by_nonresidue());
        let t1 = self.c2.square().mul_by_nonresidue().sub(&self.c0.mul(&self.c1));
        let t2 = self.c1.square().sub(&self.c0.mul(&self.c2));

        let norm = self
            .c0
            .mul(&t0)
            .add(&self.c2.mul(&t1).mul_by_nonresidue())
            .add(&self.c1.mul(&t2).mul_by_nonresidue());
        let factor = norm.inv()?;
        Ok(Self::new(t0.mul(&factor), t1.mul(&factor), t2.mul(&factor)))
    }

    /// (x, y, z)·v = (ξ·z, x, y).
    fn mul_by_nonresidue(&self) -> Self {
        Self::new(
            self.c2.mul_by_nonresidue(),
            self.c0.clone(),
            self.c1.clone(),
        )
    }
}
