//! Residue witnesses for pairing products (Novakovic–Eagen, "On Proving
//! Pairings").
//!
//! For an accumulator f = easy_part(∏ miller(Pᵢ, Qᵢ)) of a valid pairing
//! equation, f is an r-th residue in the cyclotomic subgroup, whose order
//! factors as r·27·p·h3. The witness (c, wᵢ) satisfies c^λ = f·wᵢ: wᵢ
//! cancels the 27- and p-components of f, and c is the λ-th root of the
//! shifted value, leaving the verifier one exponentiation instead of a
//! final exponentiation.

use num_bigint::{BigInt, BigUint};
use num_traits::One;

use crate::bigint::mod_inverse;
use crate::constants;
use crate::error::CurveError;
use crate::field::FieldElement;
use crate::fq12::Fq12;
use crate::g1::G1Point;
use crate::g2::G2Point;
use crate::pairing::miller_product;

/// Inverse p-th root shift: 1 when f is already a p-th residue,
/// otherwise (f^v)^(-v⁻¹ mod p) with v = 27·h3.
fn inverse_p_th_root(f: &Fq12) -> Result<Fq12, CurveError> {
    let v = BigUint::from(27u32) * constants::h3();
    let wj = f.pow(&v);
    if wj.is_one() {
        return Ok(Fq12::one());
    }
    let p = constants::p_factor();
    let v_inv = mod_inverse(&BigInt::from(v.clone()), p)?;
    let shift_exp = p - v_inv;
    Ok(wj.pow(&shift_exp))
}

/// Inverse 27-th root shift: determine the order 3^pw of f^(p·h3) with
/// pw ∈ {0, 1, 2, 3}, then cancel it the same way.
fn inverse_27_th_root(f: &Fq12) -> Result<Fq12, CurveError> {
    let v = constants::p_factor() * constants::h3();
    let wj = f.pow(&v);

    let mut order = BigUint::one();
    let mut power = wj.clone();
    let mut pw = 0u32;
    while !power.is_one() {
        if pw == 3 {
            // f is not in the 27·p·h3-order subgroup at all.
            return Err(CurveError::WitnessComputationFailed);
        }
        power = power.pow(&BigUint::from(3u32));
        order *= 3u32;
        pw += 1;
    }
    if pw == 0 {
        return Ok(Fq12::one());
    }

    let v_inv = mod_inverse(&BigInt::from(v.clone()), &order)?;
    let shift_exp = &order - v_inv;
    Ok(wj.pow(&shift_exp))
}

/// Compute the witness (c, wᵢ) with c^λ = f·wᵢ.
///
/// `f` must be the easy-parted Miller product of a valid pairing
/// equation (∏ e(Pᵢ, Qᵢ) = 1); anything else fails with
/// `WitnessComputationFailed`.
pub fn compute_witness(f: &Fq12) -> Result<(Fq12, Fq12), CurveError> {
    let w_p_shift = inverse_p_th_root(f)?;
    let w_27_shift = inverse_27_th_root(f)?;
    let wi = w_p_shift.mul(&w_27_shift);
    let shifted = f.mul(&wi);

    let lambda_inv = mod_inverse(
        &BigInt::from(constants::lambda().clone()),
        constants::h3(),
    )?;
    let c = shifted.pow(&lambda_inv);

    if c.pow(constants::lambda()) != shifted {
        return Err(CurveError::WitnessComputationFailed);
    }
    let c_inv = c.inv()?;
    if !c_inv.pow(constants::lambda()).mul(f).mul(&wi).is_one() {
        return Err(CurveError::WitnessResidueCheckFailed);
    }
    Ok((c, wi))
}

/// Verifier side: recompute f from the pairing inputs and check the
/// residue identity c^λ = f·wᵢ.
pub fn verify_equivalent_pairings(
    ps: &[G1Point],
    qs: &[G2Point],
    c: &Fq12,
    wi: &Fq12,
) -> Result<bool, CurveError> {
    let f = miller_product(ps, qs)?.easy_part();
    Ok(c.pow(constants::lambda()) == f.mul(wi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    /// A pairing equation that holds: e(P, Q)·e(-P, Q) = 1.
    fn valid_equation() -> (Vec<G1Point>, Vec<G2Point>) {
        let p = G1Point::generator().mul(&BigInt::from(23));
        let q = G2Point::generator().mul(&BigInt::from(45));
        (vec![p.clone(), p.neg()], vec![q.clone(), q])
    }

    fn accumulator(ps: &[G1Point], qs: &[G2Point]) -> Fq12 {
        let product = match miller_product(ps, qs) {
            Ok(product) => product,
            Err(_) => {
                assert!(false, "miller product");
                return Fq12::one();
            }
        };
        product.easy_part()
    }

    #[test]
    fn test_witness_roundtrip() {
        let (ps, qs) = valid_equation();
        let f = accumulator(&ps, &qs);
        let (c, wi) = match compute_witness(&f) {
            Ok(pair) => pair,
            Err(_) => {
                assert!(false, "witness");
                return;
            }
        };
        assert_eq!(c.pow(crate::constants::lambda()), f.mul(&wi));
        assert_eq!(verify_equivalent_pairings(&ps, &qs, &c, &wi), Ok(true));
    }

    #[test]
    fn test_witness_survives_small_subgroup_shift() {
        // A 27-component on top of a valid accumulator is removed by the
        // inverse-root shifts.
        let (ps, qs) = valid_equation();
        let f = accumulator(&ps, &qs).mul(crate::constants::w27());
        let (c, wi) = match compute_witness(&f) {
            Ok(pair) => pair,
            Err(_) => {
                assert!(false, "witness");
                return;
            }
        };
        assert_eq!(c.pow(crate::constants::lambda()), f.mul(&wi));
    }

    #[test]
    fn test_witness_rejects_invalid_accumulator() {
        // A pairing product that is not 1 has an r-component the shifts
        // cannot remove.
        let p = G1Point::generator();
        let q = G2Point::generator();
        let f = accumulator(&[p], &[q]);
        assert!(compute_witness(&f).is_err());
    }

    #[test]
    fn test_witness_rejects_random_element() {
        let f = crate::fq12::tests::fq12_samples(0x5151_5151_5151_5151, 1)
            .pop()
            .unwrap_or_else(Fq12::one);
        assert_eq!(
            compute_witness(&f),
            Err(CurveError::WitnessComputationFailed)
        );
    }

    #[test]
    fn test_verify_rejects_tampered_inputs() {
        let (ps, qs) = valid_equation();
        let f = accumulator(&ps, &qs);
        let (c, wi) = match compute_witness(&f) {
            Ok(pair) => pair,
            Err(_) => {
                assert!(false, "witness");
                return;
            }
        };
        let mut tampered = qs.clone();
        tampered[1] = tampered[1].double();
        assert_eq!(
            verify_equivalent_pairings(&ps, &tampered, &c, &wi),
            Ok(false)
        );
    }

    #[test]
    fn test_verify_checks_point_validity() {
        let (ps, qs) = valid_equation();
        let f = accumulator(&ps, &qs);
        let (c, wi) = match compute_witness(&f) {
            Ok(pair) => pair,
            Err(_) => {
                assert!(false, "witness");
                return;
            }
        };
        let bad = vec![
            G1Point::new(crate::field::Fq::from_u64(1), crate::field::Fq::from_u64(2)),
            ps[1].clone(),
        ];
        assert_eq!(
            verify_equivalent_pairings(&bad, &qs, &c, &wi),
            Err(CurveError::InvalidPoint)
        );
    }
}
