//! Hash-to-curve for G1: expand_message_xmd over SHA-256, hash_to_field,
//! the simplified SWU map onto the 11-isogenous curve, and the isogeny
//! back to E.

use num_bigint::BigUint;
use sha2::{Digest, Sha256};

use crate::constants;
use crate::error::CurveError;
use crate::field::{inv_checked, FieldElement, Fq};
use crate::g1::G1Point;

const HASH_OUTPUT_LEN: usize = 32;
const HASH_BLOCK_LEN: usize = 64;

/// expand_message_xmd (RFC 9380 §5.4.1) with SHA-256.
pub fn expand_message_xmd(
    dst: &[u8],
    msg: &[u8],
    len_in_bytes: usize,
) -> Result<Vec<u8>, CurveError> {
    if len_in_bytes > 65536 || dst.len() > 255 {
        return Err(CurveError::InvalidExpandLength);
    }
    let ell = len_in_bytes.div_ceil(HASH_OUTPUT_LEN);
    if ell > 255 {
        return Err(CurveError::InvalidExpandLength);
    }

    let mut dst_prime = dst.to_vec();
    dst_prime.push(dst.len() as u8);

    let mut hasher = Sha256::new();
    hasher.update([0u8; HASH_BLOCK_LEN]);
    hasher.update(msg);
    hasher.update((len_in_bytes as u16).to_be_bytes());
    hasher.update([0u8]);
    hasher.update(&dst_prime);
    let b0: [u8; HASH_OUTPUT_LEN] = hasher.finalize().into();

    let mut hasher = Sha256::new();
    hasher.update(b0);
    hasher.update([1u8]);
    hasher.update(&dst_prime);
    let mut block: [u8; HASH_OUTPUT_LEN] = hasher.finalize().into();

    let mut uniform = Vec::with_capacity(ell * HASH_OUTPUT_LEN);
    uniform.extend_from_slice(&block);
    for i in 2..=ell {
        let mut hasher = Sha256::new();
        let mixed: Vec<u8> = b0.iter().zip(block.iter()).map(|(a, b)| a ^ b).collect();
        hasher.update(mixed);
        hasher.update([i as u8]);
        hasher.update(&dst_prime);
        block = hasher.finalize().into();
        uniform.extend_from_slice(&block);
    }
    uniform.truncate(len_in_bytes);
    Ok(uniform)
}

/// Derive `count` field elements from 64-byte big-endian windows of the
/// expanded message.
pub fn hash_to_field(dst: &[u8], msg: &[u8], count: usize) -> Result<Vec<Fq>, CurveError> {
    let uniform = expand_message_xmd(dst, msg, count * 64)?;
    Ok(uniform
        .chunks(64)
        .map(|chunk| Fq::new(BigUint::from_bytes_be(chunk)))
        .collect())
}

/// sqrt_ratio for q ≡ 3 (mod 4): returns whether u/v is square together
/// with sqrt(u/v) or sqrt(Z·u/v).
fn sqrt_ratio_3mod4(u: &Fq, v: &Fq) -> (bool, Fq) {
    let tv1 = v.square();
    let tv2 = u.mul(v);
    let tv1 = tv1.mul(&tv2);
    let y1 = tv1.pow(constants::swu_c1()).mul(&tv2);
    let y2 = y1.mul(constants::swu_c2());
    let tv3 = y1.square().mul(v);
    if tv3 == *u {
        (true, y1)
    } else {
        (false, y2)
    }
}

/// Straight-line simplified SWU onto the isogenous curve
/// E': y² = x³ + A'x + B' with Z = 11.
pub fn map_to_point_sswu(u: &Fq) -> (Fq, Fq) {
    let a = constants::swu_a();
    let b = constants::swu_b();
    let z = constants::swu_z();

    let tv1 = z.mul(&u.square());
    let tv2 = tv1.square().add(&tv1);
    let tv3 = b.mul(&tv2.add(&Fq::one()));
    let tv4 = if tv2.is_zero() { z.clone() } else { tv2.neg() };
    let tv4 = a.mul(&tv4);
    let tv2 = tv3.square();
    let tv6 = tv4.square();
    let tv5 = a.mul(&tv6);
    let tv2 = tv2.add(&tv5).mul(&tv3);
    let tv6 = tv6.mul(&tv4);
    let tv5 = b.mul(&tv6);
    let tv2 = tv2.add(&tv5);

    let (is_gx1_square, y1) = sqrt_ratio_3mod4(&tv2, &tv6);
    let (mut x, mut y) = if is_gx1_square {
        (tv3, y1)
    } else {
        (tv1.mul(&tv3), tv1.mul(u).mul(&y1))
    };
    if u.sign() != y.sign() {
        y = y.neg();
    }
    x = x.mul(&inv_checked(&tv4));
    (x, y)
}

/// The 11-isogeny from E' to E, four fixed polynomials in Horner form.
pub fn iso_map_g1(x: &Fq, y: &Fq) -> G1Point {
    let x_num = horner(constants::iso_x_num(), x);
    let x_den = horner_monic(constants::iso_x_den(), x);
    let y_num = horner(constants::iso_y_num(), x);
    let y_den = horner_monic(constants::iso_y_den(), x);
    G1Point::new(
        x_num.mul(&inv_checked(&x_den)),
        y.mul(&y_num).mul(&inv_checked(&y_den)),
    )
}

fn horner(coeffs: &[Fq], x: &Fq) -> Fq {
    let mut acc = coeffs[coeffs.len() - 1].clone();
    for coeff in coeffs.iter().rev().skip(1) {
        acc = acc.mul(x).add(coeff);
    }
    acc
}

/// Horner evaluation for a monic polynomial whose leading coefficient is
/// not stored.
fn horner_monic(coeffs: &[Fq], x: &Fq) -> Fq {
    let mut acc = x.add(&coeffs[coeffs.len() - 1]);
    for coeff in coeffs.iter().rev().skip(1) {
        acc = acc.mul(x).add(coeff);
    }
    acc
}

/// Full hash-to-point: two field elements, two SSWU maps, one addition
/// on E, one cofactor clearing.
pub fn hash_to_point(dst: &[u8], msg: &[u8]) -> Result<G1Point, CurveError> {
    let fields = hash_to_field(dst, msg, 2)?;
    let (x0, y0) = map_to_point_sswu(&fields[0]);
    let (x1, y1) = map_to_point_sswu(&fields[1]);
    let p0 = iso_map_g1(&x0, &y0);
    let p1 = iso_map_g1(&x1, &y1);
    Ok(p0.add(&p1).clear_cofactor())
}
