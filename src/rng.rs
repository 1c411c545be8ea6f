//! Randomness helpers: uniform big integers and field elements.
//!
//! The only consumer of system entropy in the crate; callers pass any
//! `RngCore`, typically `OsRng`.

use num_bigint::BigUint;
use num_traits::Zero;
use rand::RngCore;

use crate::constants;
use crate::field::{Fq, Fr};

/// Uniform integer in [0, limit) by rejection sampling over the minimal
/// byte width.
pub fn random_below(limit: &BigUint, rng: &mut impl RngCore) -> BigUint {
    if limit.is_zero() {
        debug_assert!(false, "sampling below zero");
        return BigUint::zero();
    }
    let bits = limit.bits();
    let num_bytes = bits.div_ceil(8) as usize;
    let excess = (num_bytes as u64 * 8 - bits) as u32;
    loop {
        let mut buf = vec![0u8; num_bytes];
        rng.fill_bytes(&mut buf);
        buf[0] >>= excess;
        let candidate = BigUint::from_bytes_be(&buf);
        if &candidate < limit {
            return candidate;
        }
    }
}

pub fn random_fq(rng: &mut impl RngCore) -> Fq {
    Fq::new(random_below(constants::q(), rng))
}

pub fn random_fr(rng: &mut impl RngCore) -> Fr {
    Fr::new(random_below(constants::r_order(), rng))
}
