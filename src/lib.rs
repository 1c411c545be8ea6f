//! BLS12-381: field tower, pairing, hash-to-curve, BLS signatures on G1,
//! and residue witnesses for off-chain pairing verification.
//!
//! The crate is pure and single-threaded: every operation returns a fresh
//! value, and the only external primitives are SHA-256 (`sha2`) and the
//! caller-supplied RNG. Process-wide constants and derived tables are
//! initialised once on first use.

pub mod bigint;
pub mod bls;
pub mod constants;
pub mod error;
pub mod field;
pub mod fq12;
pub mod fq2;
pub mod fq6;
pub mod g1;
pub mod g2;
pub mod hash_to_curve;
pub mod pairing;
pub mod rng;
pub mod witness;

pub use bls::{
    derive_pubkey, generate_keypair, raw_verify_g1, sign_g1, verify_g1, DOMAIN_SEPARATION_TAG,
};
pub use error::CurveError;
pub use field::{FieldElement, Fq, Fr};
pub use fq12::Fq12;
pub use fq2::Fq2;
pub use fq6::Fq6;
pub use g1::G1Point;
pub use g2::G2Point;
pub use hash_to_curve::{expand_message_xmd, hash_to_field, hash_to_point};
pub use pairing::{miller_loop, miller_product, pair, validate_pairing};
pub use witness::{compute_witness, verify_equivalent_pairings};
