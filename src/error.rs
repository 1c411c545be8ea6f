//! Error types for field, curve and pairing operations.

use thiserror::Error;

/// Errors surfaced by field arithmetic, point decoding, pairing and
/// witness computation. Boolean predicates (`is_on_curve`,
/// `is_in_subgroup`, `validate_pairing`) never produce these; they answer
/// yes or no.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurveError {
    #[error("inverse of zero")]
    InversionOfZero,

    #[error("element not invertible for this modulus")]
    NotInvertible,

    #[error("element has no square root")]
    NoSquareRoot,

    #[error("point not on curve or not in the prime-order subgroup")]
    InvalidPoint,

    #[error("byte buffer has the wrong length for this encoding")]
    InvalidLength,

    #[error("expand_message_xmd parameters exceed RFC limits")]
    InvalidExpandLength,

    #[error("pairing input sequences have different lengths")]
    InputMismatch,

    #[error("witness computation failed")]
    WitnessComputationFailed,

    #[error("witness residue check failed")]
    WitnessResidueCheckFailed,
}
