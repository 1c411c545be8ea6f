//! BLS signatures with signatures on G1 and public keys on G2
//! (minimal-signature-size suite).

use num_bigint::BigInt;
use rand::RngCore;

use crate::error::CurveError;
use crate::field::Fr;
use crate::g1::G1Point;
use crate::g2::G2Point;
use crate::hash_to_curve::hash_to_point;
use crate::pairing::validate_pairing;
use crate::rng::random_fr;

/// Canonical domain separation tag for this suite.
pub const DOMAIN_SEPARATION_TAG: &[u8] = b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_NUL_";

/// Fresh keypair from the caller's entropy source.
pub fn generate_keypair(rng: &mut impl RngCore) -> (Fr, G2Point) {
    let sk = random_fr(rng);
    let pk = derive_pubkey(&sk);
    (sk, pk)
}

/// Public key [sk]·G2.
pub fn derive_pubkey(sk: &Fr) -> G2Point {
    G2Point::generator().mul(&BigInt::from(sk.value().clone()))
}

/// Signature [sk]·H(msg) on G1.
pub fn sign_g1(sk: &Fr, msg: &[u8]) -> Result<G1Point, CurveError> {
    let hashed = hash_to_point(DOMAIN_SEPARATION_TAG, msg)?;
    Ok(hashed.mul(&BigInt::from(sk.value().clone())))
}

/// Core verification equation on already-decoded, already-hashed inputs:
/// e(H(m), -pk) · e(sig, G2) = 1, folded into one multi-pairing.
pub fn raw_verify_g1(
    pub_key: &G2Point,
    signature: &G1Point,
    hashed_message: &G1Point,
) -> Result<bool, CurveError> {
    validate_pairing(
        &[hashed_message.clone(), signature.clone()],
        &[pub_key.neg(), G2Point::generator()],
    )
}

/// Byte-level verification: 96-byte compressed public key, 48-byte
/// compressed signature, raw message.
pub fn verify_g1(
    pub_key_bytes: &[u8],
    signature_bytes: &[u8],
    msg: &[u8],
) -> Result<bool, CurveError> {
    if pub_key_bytes.len() != 96 || signature_bytes.len() != 48 {
        return Err(CurveError::InvalidLength);
    }
    let pub_key = G2Point::from_bytes(pub_key_bytes)?;
    let signature = G1Point::from_bytes(signature_bytes)?;
    let hashed = hash_to_point(DOMAIN_SEPARATION_TAG, msg)?;
    raw_verify_g1(&pub_key, &signature, &hashed)
}
