//! Optimal ate pairing e: G1 × G2 → GT over BLS12-381.
//!
//! The Miller loop runs over the bits of |X| and evaluates line functions
//! at the untwisted image of the G2 accumulator; a negative X is absorbed
//! by the final exponentiation. Multi-pairing products share a single
//! final exponentiation.

use crate::error::CurveError;
use crate::field::{inv_checked, FieldElement};
use crate::fq12::Fq12;
use crate::g1::G1Point;
use crate::g2::G2Point;
use crate::constants;

/// Line through the untwisted double of R, evaluated at P.
fn line_double(r: &G2Point, p: &G1Point) -> Fq12 {
    let (x, y) = r.untwist();
    let x2 = x.square();
    let numerator = x2.add(&x2).add(&x2);
    let slope = numerator.mul(&inv_checked(&y.add(&y)));
    let offset = y.sub(&slope.mul(&x));
    Fq12::from_fq(p.y.clone())
        .sub(&Fq12::from_fq(p.x.clone()).mul(&slope))
        .sub(&offset)
}

/// Line through the untwisted R and Q, evaluated at P; vertical when the
/// points are mutual negations.
fn line_add(r: &G2Point, q: &G2Point, p: &G1Point) -> Fq12 {
    let (x_r, y_r) = r.untwist();
    let (x_q, y_q) = q.untwist();
    if x_r == x_q && y_r == y_q.neg() {
        return Fq12::from_fq(p.x.clone()).sub(&x_r);
    }
    let slope = y_q.sub(&y_r).mul(&inv_checked(&x_q.sub(&x_r)));
    let offset = y_q
        .mul(&x_r)
        .sub(&y_r.mul(&x_q))
        .mul(&inv_checked(&x_r.sub(&x_q)));
    Fq12::from_fq(p.y.clone())
        .sub(&Fq12::from_fq(p.x.clone()).mul(&slope))
        .sub(&offset)
}

/// Miller loop accumulator for a single pair; identity inputs
/// short-circuit to 1.
pub fn miller_loop(p: &G1Point, q: &G2Point) -> Fq12 {
    if p.is_identity() || q.is_identity() {
        return Fq12::one();
    }
    let mut acc = Fq12::one();
    let mut r = q.clone();
    for bit in constants::x_miller_bits() {
        let r_dbl = r.double();
        acc = acc.square().mul(&line_double(&r, p));
        if *bit {
            acc = acc.mul(&line_add(&r_dbl, q, p));
            r = r_dbl.add(q);
        } else {
            r = r_dbl;
        }
    }
    acc
}

/// Validated product of Miller loops, without the final exponentiation.
/// This is the accumulator the witness-residue construction consumes.
pub fn miller_product(ps: &[G1Point], qs: &[G2Point]) -> Result<Fq12, CurveError> {
    if ps.len() != qs.len() {
        return Err(CurveError::InputMismatch);
    }
    let mut acc = Fq12::one();
    for (p, q) in ps.iter().zip(qs) {
        if !p.is_pairing_input() || !q.is_pairing_input() {
            return Err(CurveError::InvalidPoint);
        }
        acc = acc.mul(&miller_loop(p, q));
    }
    Ok(acc)
}

/// The optimal ate pairing e(P, Q).
pub fn pair(p: &G1Point, q: &G2Point) -> Result<Fq12, CurveError> {
    if !p.is_pairing_input() || !q.is_pairing_input() {
        return Err(CurveError::InvalidPoint);
    }
    if p.is_identity() || q.is_identity() {
        return Ok(Fq12::one());
    }
    Ok(miller_loop(p, q).final_exponentiate())
}

/// True iff ∏ e(Pᵢ, Qᵢ) = 1, with one shared final exponentiation.
pub fn validate_pairing(ps: &[G1Point], qs: &[G2Point]) -> Result<bool, CurveError> {
    let product = miller_product(ps, qs)?;
    Ok(product.final_exponentiate().is_one())
}
