//! Base field Fq and scalar field Fr for BLS12-381.
//!
//! Elements are canonical `BigUint` residues; every constructor and every
//! arithmetic result is reduced into [0, modulus). The shared
//! [`FieldElement`] contract is what the tower extensions and the generic
//! field-law tests build on; the non-residue hook is the identity at the
//! leaves.

#![allow(clippy::should_implement_trait)]

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

use crate::bigint::{mod_inverse, mod_pow};
use crate::constants;
use crate::error::CurveError;

/// Capability shared by Fq, Fr and the tower extensions Fq², Fq⁶, Fq¹².
///
/// Each implementor is a concrete struct with a fixed coordinate layout;
/// the trait only captures the common arithmetic contract.
pub trait FieldElement: Clone + PartialEq + Eq + std::fmt::Debug {
    fn zero() -> Self;
    fn one() -> Self;
    fn is_zero(&self) -> bool;
    fn add(&self, rhs: &Self) -> Self;
    fn sub(&self, rhs: &Self) -> Self;
    fn neg(&self) -> Self;
    fn mul(&self, rhs: &Self) -> Self;
    fn inv(&self) -> Result<Self, CurveError>;

    fn square(&self) -> Self {
        self.mul(self)
    }

    fn is_one(&self) -> bool {
        *self == Self::one()
    }

    /// Multiplication by the tower non-residue; identity at the leaf.
    fn mul_by_nonresidue(&self) -> Self {
        self.clone()
    }

    /// Square-and-multiply exponentiation, right-to-left.
    fn pow(&self, exp: &BigUint) -> Self {
        let mut result = Self::one();
        let mut base = self.clone();
        let mut e = exp.clone();
        while !e.is_zero() {
            if e.bit(0) {
                result = result.mul(&base);
            }
            base = base.square();
            e >>= 1;
        }
        result
    }
}

/// Inversion for denominators the caller has already proven nonzero
/// (group-law slopes, untwist constants). Falls back to zero behind a
/// debug assertion instead of propagating an impossible error.
pub(crate) fn inv_checked<F: FieldElement>(value: &F) -> F {
    value.inv().unwrap_or_else(|_| {
        debug_assert!(false, "inverse of zero in checked context");
        F::zero()
    })
}

/// Element of the 381-bit base field Fq.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Fq(BigUint);

/// Element of the 255-bit scalar field Fr.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Fr(BigUint);

impl Fq {
    pub fn new(value: BigUint) -> Self {
        Self(value % constants::q())
    }

    pub fn from_u64(value: u64) -> Self {
        Self::new(BigUint::from(value))
    }

    pub fn from_bigint(value: &BigInt) -> Self {
        Self(crate::bigint::umod(value, constants::q()))
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }

    pub fn modulus() -> &'static BigUint {
        constants::q()
    }

    /// Square root via x^((q+1)/4); valid because q ≡ 3 (mod 4). The
    /// candidate is validated by squaring.
    pub fn sqrt(&self) -> Result<Self, CurveError> {
        let exp = (constants::q() + 1u32) >> 2;
        let root = self.pow(&exp);
        if root.square() == *self {
            Ok(root)
        } else {
            Err(CurveError::NoSquareRoot)
        }
    }

    /// Legendre symbol: 1 for residues, -1 for non-residues, 0 for zero.
    pub fn legendre(&self) -> i8 {
        let exp = (constants::q() - 1u32) >> 1;
        let symbol = self.pow(&exp);
        if symbol.is_zero() {
            0
        } else if symbol.is_one() {
            1
        } else {
            -1
        }
    }

    /// True iff x < q - x.
    pub fn sign(&self) -> bool {
        self.0 < constants::q() - &self.0
    }

    /// True iff x > q - x, the Zcash "lexicographically largest" predicate
    /// used by the compressed-point sign flag.
    pub fn is_lex_largest(&self) -> bool {
        self.0 > constants::q() - &self.0
    }

    /// Conjugation is the identity on the base field.
    pub fn conjugate(&self) -> Self {
        self.clone()
    }
}

impl FieldElement for Fq {
    fn zero() -> Self {
        Self(BigUint::zero())
    }

    fn one() -> Self {
        Self(BigUint::one())
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    fn add(&self, rhs: &Self) -> Self {
        let mut sum = &self.0 + &rhs.0;
        if sum >= *constants::q() {
            sum -= constants::q();
        }
        Self(sum)
    }

    fn sub(&self, rhs: &Self) -> Self {
        if self.0 >= rhs.0 {
            Self(&self.0 - &rhs.0)
        } else {
            Self(constants::q() - &rhs.0 + &self.0)
        }
    }

    fn neg(&self) -> Self {
        if self.0.is_zero() {
            self.clone()
        } else {
            Self(constants::q() - &self.0)
        }
    }

    fn mul(&self, rhs: &Self) -> Self {
        Self(&self.0 * &rhs.0 % constants::q())
    }

    fn inv(&self) -> Result<Self, CurveError> {
        let inv = mod_inverse(&BigInt::from(self.0.clone()), constants::q())?;
        Ok(Self(inv))
    }

    fn pow(&self, exp: &BigUint) -> Self {
        Self(mod_pow(&self.0, exp, constants::q()))
    }
}

impl Fr {
    pub fn new(value: BigUint) -> Self {
        Self(value % constants::r_order())
    }

    pub fn from_u64(value: u64) -> Self {
        Self::new(BigUint::from(value))
    }

    pub fn from_bigint(value: &BigInt) -> Self {
        Self(crate::bigint::umod(value, constants::r_order()))
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }

    pub fn modulus() -> &'static BigUint {
        constants::r_order()
    }

    /// Shares the (m+1)/4 square-root path with Fq; the squaring check
    /// makes it fail closed where the exponent identity does not hold.
    pub fn sqrt(&self) -> Result<Self, CurveError> {
        let exp = (constants::r_order() + 1u32) >> 2;
        let root = self.pow(&exp);
        if root.square() == *self {
            Ok(root)
        } else {
            Err(CurveError::NoSquareRoot)
        }
    }

    pub fn legendre(&self) -> i8 {
        let exp = (constants::r_order() - 1u32) >> 1;
        let symbol = self.pow(&exp);
        if symbol.is_zero() {
            0
        } else if symbol.is_one() {
            1
        } else {
            -1
        }
    }

    pub fn sign(&self) -> bool {
        self.0 < constants::r_order() - &self.0
    }

    pub fn conjugate(&self) -> Self {
        self.clone()
    }
}

impl FieldElement for Fr {
    fn zero() -> Self {
        Self(BigUint::zero())
    }

    fn one() -> Self {
        Self(BigUint::one())
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    fn add(&self, rhs: &Self) -> Self {
        let mut sum = &self.0 + &rhs.0;
        if sum >= *constants::r_order() {
            sum -= constants::r_order();
        }
        Self(sum)
    }

    fn sub(&self, rhs: &Self) -> Self {
        if self.0 >= rhs.0 {
            Self(&self.0 - &rhs.0)
        } else {
            Self(constants::r_order() - &rhs.0 + &self.0)
        }
    }

    fn neg(&self) -> Self {
        if self.0.is_zero() {
            self.clone()
        } else {
            Self(constants::r_order() - &self.0)
        }
    }

    fn mul(&self, rhs: &Self) -> Self {
        Self(&self.0 * &rhs.0 % constants::r_order())
    }

    fn inv(&self) -> Result<Self, CurveError> {
        let inv = mod_inverse(&BigInt::from(self.0.clone()), constants::r_order())?;
        Ok(Self(inv))
    }

    fn pow(&self, exp: &BigUint) -> Self {
        Self(mod_pow(&self.0, exp, constants::r_order()))
    }
}
