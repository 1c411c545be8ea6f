//! Big-integer helpers shared by the field and witness modules.
//!
//! All moduli in this crate are positive; `umod` always returns the
//! representative in [0, m).

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Signed, Zero};

use crate::error::CurveError;

/// Non-negative remainder of `n` modulo `m`.
pub fn umod(n: &BigInt, m: &BigUint) -> BigUint {
    let m_signed = BigInt::from(m.clone());
    let mut rem = n % &m_signed;
    if rem.is_negative() {
        rem += &m_signed;
    }
    rem.to_biguint().unwrap_or_else(|| {
        debug_assert!(false, "umod produced a negative remainder");
        BigUint::zero()
    })
}

/// Modular exponentiation, `base^exp mod m`.
pub fn mod_pow(base: &BigUint, exp: &BigUint, m: &BigUint) -> BigUint {
    base.modpow(exp, m)
}

/// Modular inverse by the iterative extended Euclidean algorithm.
///
/// Fails with `InversionOfZero` when `a ≡ 0 (mod m)` and with
/// `NotInvertible` when gcd(a, m) ≠ 1. The modulus does not have to be
/// prime; the witness construction inverts modulo 27, p and h3.
pub fn mod_inverse(a: &BigInt, m: &BigUint) -> Result<BigUint, CurveError> {
    let a_red = umod(a, m);
    if a_red.is_zero() {
        return Err(CurveError::InversionOfZero);
    }

    let mut r0 = BigInt::from(m.clone());
    let mut r1 = BigInt::from(a_red);
    let mut s0 = BigInt::zero();
    let mut s1 = BigInt::one();
    while !r1.is_zero() {
        let quot = &r0 / &r1;
        let r2 = &r0 - &quot * &r1;
        r0 = std::mem::replace(&mut r1, r2);
        let s2 = &s0 - &quot * &s1;
        s0 = std::mem::replace(&mut s1, s2);
    }
    if !r0.is_one() {
        return Err(CurveError::NotInvertible);
    }
    Ok(umod(&s0, m))
}

/// Magnitude and sign of a signed integer, for double-and-add loops that
/// scan the unsigned expansion of |c|.
pub fn abs_biguint(n: &BigInt) -> (BigUint, bool) {
    let negative = n.sign() == Sign::Minus;
    (n.magnitude().clone(), negative)
}
