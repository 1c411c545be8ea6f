//! Curve constants and process-wide derived tables.
//!
//! Everything here is fixed by the curve parameter X. Literal values are
//! kept for the constants the system is defined by (generators, cofactors,
//! isogeny coefficients); everything that is a pure function of q
//! (Frobenius coefficient tables, roots of unity, the cyclotomic cofactor
//! factors) is derived once behind a `OnceLock` and never recomputed.

use std::sync::OnceLock;

use num_bigint::{BigInt, BigUint};
use num_traits::{Num, One, Zero};

use crate::field::{FieldElement, Fq};
use crate::fq12::Fq12;
use crate::fq2::Fq2;
use crate::fq6::Fq6;
use crate::g1::G1Point;
use crate::g2::G2Point;

const X_ABS_U64: u64 = 0xd201_0000_0001_0000;

/// G2 cofactor, the fixed scalar used to clear the twist cofactor.
const G2_COFACTOR_HEX: &str =
    "5d543a95414e7f1091d50792876a202cd91de4547085abaa68a205b2e5a7ddfa628f1cb4d9e82ef21537e293a6691ae1616ec6e786f0c70cf1c38e31c7238e5";

/// The 62-bit prime factor p of the cyclotomic cofactor 27·p·h3.
const P_FACTOR_U64: u64 = 5044125407647214251;

const G1_GENERATOR_X: &str =
    "17f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb";
const G1_GENERATOR_Y: &str =
    "08b3f481e3aaa0f1a09e30ed741d8ae4fcf5e095d5d00af600db18cb2c04b3edd03cc744a2888ae40caa232946c5e7e1";

const G2_GENERATOR_X_C0: &str =
    "024aa2b2f08f0a91260805272dc51051c6e47ad4fa403b02b4510b647ae3d1770bac0326a805bbefd48056c8c121bdb8";
const G2_GENERATOR_X_C1: &str =
    "13e02b6052719f607dacd3a088274f65596bd0d09920b61ab5da61bbdc7f5049334cf11213945d57e5ac7d055d042b7e";
const G2_GENERATOR_Y_C0: &str =
    "0ce5d527727d6e118cc9cdc6da2e351aadfd9baa8cbdd3a76d429a695160d12c923ac9cc3baca289e193548608b82801";
const G2_GENERATOR_Y_C1: &str =
    "0606c4a02ea734cc32acd2b02bc28b99cb3e287e85a763af267492ab572e99ab3f370d275cec1da1aaa9075ff05f79be";

/// A' of the 11-isogenous curve E': y² = x³ + A'x + B'.
const SSWU_A_HEX: &str =
    "144698a3b8e9433d693a02c96d4982b0ea985383ee66a8d8e8981aefd881ac98936f8da0e0f97f5cf428082d584c1d";
/// B' of the 11-isogenous curve.
const SSWU_B_HEX: &str =
    "12e2908d11688030018b12e8753eee3b2016c1f0f24f4070a0b9c14fcef35ef55a23215a316ceaa5d1cc48e98e172be0";

/// x-numerator coefficients k1 of the 11-isogeny, constant term first.
const ISO_X_NUM_HEX: [&str; 12] = [
    "11a05f2b1e833340b809101dd99815856b303e88a2d7005ff2627b56cdb4e2c85610c2d5f2e62d6eaeac1662734649b7",
    "17294ed3e943ab2f0588bab22147a81c7c17e75b2f6a8417f565e33c70d1e86b4838f2a6f318c356e834eef1b3cb83bb",
    "0d54005db97678ec1d1048c5d10a9a1bce032473295983e56878e501ec68e25c958c3e3d2a09729fe0179f9dac9edcb0",
    "1778e7166fcc6db74e0609d307e55412d7f5e4656a8dbf25f1b33289f1b330835336e25ce3107193c5b388641d9b6861",
    "0e99726a3199f4436642b4b3e4118e5499db995a1257fb3f086eeb65982fac18985a286f301e77c451154ce9ac8895d9",
    "1630c3250d7313ff01d1201bf7a74ab5db3cb17dd952799b9ed3ab9097e68f90a0870d2dcae73d19cd13c1c66f652983",
    "0d6ed6553fe44d296a3726c38ae652bfb11586264f0f8ce19008e218f9c86b2a8da25128c1052ecaddd7f225a139ed84",
    "17b81e7701abdbe2e8743884d1117e53356de5ab275b4db1a682c62ef0f2753339b7c8f8c8f475af9ccb5618e3f0c88e",
    "080d3cf1f9a78fc47b90b33563be990dc43b756ce79f5574a2c596c928c5d1de4fa295f296b74e956d71986a8497e317",
    "169b1f8e1bcfa7c42e0c37515d138f22dd2ecb803a0c5c99676314baf4bb1b7fa3190b2edc0327797f241067be390c9e",
    "10321da079ce07e272d8ec09d2565b0dfa7dccdde6787f96d50af36003b14866f69b771f8c285decca67df3f1605fb7b",
    "06e08c248e260e70bd1e962381edee3d31d79d7e22c837bc23c0bf1bc24c6b68c24b1b80b64d391fa9c8ba2e8ba2d229",
];

/// x-denominator coefficients k2 (the degree-10 term is monic).
const ISO_X_DEN_HEX: [&str; 10] = [
    "08ca8d548cff19ae18b2e62f4bd3fa6f01d5ef4ba35b48ba9c9588617fc8ac62b558d681be343df8993cf9fa40d21b1c",
    "12561a5deb559c4348b4711298e536367041e8ca0cf0800c0126c2588c48bf5713daa8846cb026e9e5c8276ec82b3bff",
    "0b2962fe57a3225e8137e629bff2991f6f89416f5a718cd1fca64e00b11aceacd6a3d0967c94fedcfcc239ba5cb83e19",
    "03425581a58ae2fec83aafef7c40eb545b08243f16b1655154cca8abc28d6fd04976d5243eecf5c4130de8938dc62cd8",
    "13a8e162022914a80a6f1d5f43e7a07dffdfc759a12062bb8d6b44e833b306da9bd29ba81f35781d539d395b3532a21e",
    "0e7355f8e4e667b955390f7f0506c6e9395735e9ce9cad4d0a43bcef24b8982f7400d24bc4228f11c02df9a29f6304a5",
    "0772caacf16936190f3e0c63e0596721570f5799af53a1894e2e073062aede9cea73b3538f0de06cec2574496ee84a3a",
    "14a7ac2a9d64a8b230b3f5b074cf01996e7f63c21bca68a81996e1cdf9822c580fa5b9489d11e2d311f7d99bbdcc5a5e",
    "0a10ecf6ada54f825e920b3dafc7a3cce07f8d1d7161366b74100da67f39883503826692abba43704776ec3a79a1d641",
    "095fc13ab9e92ad4476d6e3eb3a56680f682b4ee96f7d03776df533978f31c1593174e4b4b7865002d6384d168ecdd0a",
];

/// y-numerator coefficients k3.
const ISO_Y_NUM_HEX: [&str; 16] = [
    "090d97c81ba24ee0259d1f094980dcfa11ad138e48a869522b52af6c956543d3cd0c7aee9b3ba3c2be9845719707bb33",
    "134996a104ee5811d51036d776fb46831223e96c254f383d0f906343eb67ad34d6c56711962fa8bfe097e75a2e41c696",
    "00cc786baa966e66f4a384c86a3b49942552e2d658a31ce2c344be4b91400da7d26d521628b00523b8dfe240c72de1f6",
    "01f86376e8981c217898751ad8746757d42aa7b90eeb791c09e4a3ec03251cf9de405aba9ec61deca6355c77b0e5f4cb",
    "08cc03fdefe0ff135caf4fe2a21529c4195536fbe3ce50b879833fd221351adc2ee7f8dc099040a841b6daecf2e8fedb",
    "16603fca40634b6a2211e11db8f0a6a074a7d0d4afadb7bd76505c3d3ad5544e203f6326c95a807299b23ab13633a5f0",
    "04ab0b9bcfac1bbcb2c977d027796b3ce75bb8ca2be184cb5231413c4d634f3747a87ac2460f415ec961f8855fe9d6f2",
    "0987c8d5333ab86fde9926bd2ca6c674170a05bfe3bdd81ffd038da6c26c842642f64550fedfe935a15e4ca31870fb29",
    "09fc4018bd96684be88c9e221e4da1bb8f3abd16679dc26c1e8b6e6a1f20cabe69d65201c78607a360370e577bdba587",
    "0e1bba7a1186bdb5223abde7ada14a23c42a0ca7915af6fe06985e7ed1e4d43b9b3f7055dd4eba6f2bafaaebca731c30",
    "19713e47937cd1be0dfd0b8f1d43fb93cd2fcbcb6caf493fd1183e416389e61031bf3a5cce3fbafce813711ad011c132",
    "18b46a908f36f6deb918c143fed2edcc523559b8aaf0c2462e6bfe7f911f643249d9cdf41b44d606ce07c8a4d0074d8e",
    "0b182cac101b9399d155096004f53f447aa7b12a3426b08ec02710e807b4633f06c851c1919211f20d4c04f00b971ef8",
    "0245a394ad1eca9b72fc00ae7be315dc757b3b080d4c158013e6632d3c40659cc6cf90ad1c232a6442d9d3f5db980133",
    "05c129645e44cf1102a159f748c4a3fc5e673d81d7e86568d9ab0f5d396a7ce46ba1049b6579afb7866b1e715475224b",
    "15e6be4e990f03ce4ea50b3b42df2eb5cb181d8f84965a3957add4fa95af01b2b665027efec01c7704b456be69c8b604",
];

/// y-denominator coefficients k4 (the degree-15 term is monic).
const ISO_Y_DEN_HEX: [&str; 15] = [
    "16112c4c3a9c98b252181140fad0eae9601a6de578980be6eec3232b5be72e7a07f3688ef60c206d01479253b03663c1",
    "1962d75c2381201e1a0cbd6c43c348b885c84ff731c4d59ca4a10356f453e01f78a4260763529e3532f6102c2e49a03d",
    "058df3306640da276faaae7d6e8eb15778c4855551ae7f310c35a5dd279cd2eca6757cd636f96f891e2538b53dbf67f2",
    "16b7d288798e5395f20d23bf89edb4d1d115c5dbddbcd30e123da489e726af41727364f2c28297ada8d26d98445f5416",
    "0be0e079545f43e4b00cc912f8228ddcc6d19c9f0f69bbb0542eda0fc9dec916a20b15dc0fd2ededda39142311a5001d",
    "08d9e5297186db2d9fb266eaac783182b70152c65550d881c5ecd87b6f0f5a6449f38db9dfa9cce202c6477faaf9b7ac",
    "166007c08a99db2fc3ba8734ace9824b5eecfdfa8d0cf8ef5dd365bc400a0051d5fa9c01a58b1fb93d1a1399126a775c",
    "16a3ef08be3ea7ea03bcddfabba6ff6ee5a4375efa1f4fd7feb34fd206357132b920f5b00801dee460ee415a15812ed9",
    "1866c8ed336c61231a1be54fd1d74cc4f9fb0ce4c6af5920abc5750c4bf39b4852cfe2f7bb9248836b233d9d55535d4a",
    "167a55cda70a6e1cea820597d94a84903216f763e13d87bb5308592e7ea7d4fbc7385ea3d529b35e346ef48bb8913f55",
    "04d2f259eea405bd48f010a01ad2911d9c6dd039bb61a6290e591b36e636a5c871a5c29f4f83060400f8b49cba8f6aa8",
    "0accbb67481d033ff5852c1e48c50c477f94ff8aefce42d28c0f9a88cea7913516f968986f7ebbea9684b529e2561092",
    "0ad6b9514c767fe3c3613144b45f1496543346d98adf02267d5ceef9a00d9b8693000763e3b90ac11e99b138573345cc",
    "02660400eb2e4f3b628bdd0d53cd76f2bf565b94e72927c1cb748df27942480e420517bd8714cc80d1fadc1326ed06f7",
    "0e0fa1d816ddc03e6b24255e0d7819c171c40f65e273b853324efcd6356caa205ca2f570f13497804415473a1d634b8f",
];

fn biguint_from_hex(hex: &str) -> BigUint {
    BigUint::from_str_radix(hex, 16).unwrap_or_else(|_| {
        debug_assert!(false, "invalid hex constant");
        BigUint::zero()
    })
}

fn fq_from_hex(hex: &str) -> Fq {
    Fq::new(biguint_from_hex(hex))
}

/// Curve family parameter X = -0xd201000000010000.
pub fn x_param() -> &'static BigInt {
    static X: OnceLock<BigInt> = OnceLock::new();
    X.get_or_init(|| -BigInt::from(X_ABS_U64))
}

/// |X|.
pub fn x_abs() -> &'static BigUint {
    static X_ABS: OnceLock<BigUint> = OnceLock::new();
    X_ABS.get_or_init(|| BigUint::from(X_ABS_U64))
}

/// Miller loop schedule: the bits of |X| below the most significant one,
/// scanned high to low.
pub fn x_miller_bits() -> &'static [bool] {
    static BITS: OnceLock<Vec<bool>> = OnceLock::new();
    BITS.get_or_init(|| {
        let x = x_abs();
        let top = x.bits();
        (0..top - 1).rev().map(|i| x.bit(i)).collect()
    })
}

/// Scalar field order r = X⁴ - X² + 1.
pub fn r_order() -> &'static BigUint {
    static R: OnceLock<BigUint> = OnceLock::new();
    R.get_or_init(|| {
        let x2 = x_param() * x_param();
        let r: BigInt = &x2 * &x2 - &x2 + 1;
        r.to_biguint().unwrap_or_else(|| {
            debug_assert!(false, "r derivation went negative");
            BigUint::zero()
        })
    })
}

/// Base field prime q = ((X-1)²/3)·r + X.
pub fn q() -> &'static BigUint {
    static Q: OnceLock<BigUint> = OnceLock::new();
    Q.get_or_init(|| {
        let x = x_param();
        let x_minus_1 = x - 1;
        let r = BigInt::from(r_order().clone());
        let q: BigInt = (&x_minus_1 * &x_minus_1 / 3) * r + x;
        q.to_biguint().unwrap_or_else(|| {
            debug_assert!(false, "q derivation went negative");
            BigUint::zero()
        })
    })
}

/// G1 cofactor-clearing scalar 1 - X.
pub fn g1_cofactor() -> &'static BigInt {
    static H1: OnceLock<BigInt> = OnceLock::new();
    H1.get_or_init(|| BigInt::one() - x_param())
}

/// G2 cofactor h2.
pub fn g2_cofactor() -> &'static BigInt {
    static H2: OnceLock<BigInt> = OnceLock::new();
    H2.get_or_init(|| BigInt::from(biguint_from_hex(G2_COFACTOR_HEX)))
}

/// The prime p in the cyclotomic cofactor factorisation 27·p·h3.
pub fn p_factor() -> &'static BigUint {
    static P: OnceLock<BigUint> = OnceLock::new();
    P.get_or_init(|| BigUint::from(P_FACTOR_U64))
}

/// Cyclotomic cofactor h = Φ₁₂(q)/r = 27·p·h3; the subgroup the
/// easy-parted Miller products live in has order r·h.
pub fn cyclotomic_cofactor() -> &'static BigUint {
    static H: OnceLock<BigUint> = OnceLock::new();
    H.get_or_init(|| {
        let q = q();
        let q2 = q * q;
        let phi12 = &q2 * &q2 - &q2 + 1u32;
        debug_assert!((&phi12 % r_order()).is_zero());
        phi12 / r_order()
    })
}

/// The large prime h3 = Φ₁₂(q)/(27·p·r).
pub fn h3() -> &'static BigUint {
    static H3: OnceLock<BigUint> = OnceLock::new();
    H3.get_or_init(|| {
        let small = BigUint::from(27u32) * p_factor();
        debug_assert!((cyclotomic_cofactor() % &small).is_zero());
        cyclotomic_cofactor() / small
    })
}

/// Witness exponent λ = 4·X⁴ - 4·X² + 4 = 4r; divisible by r and coprime
/// to h3.
pub fn lambda() -> &'static BigUint {
    static LAMBDA: OnceLock<BigUint> = OnceLock::new();
    LAMBDA.get_or_init(|| r_order() * 4u32)
}

pub fn g1_generator() -> &'static G1Point {
    static GEN: OnceLock<G1Point> = OnceLock::new();
    GEN.get_or_init(|| {
        G1Point::new(fq_from_hex(G1_GENERATOR_X), fq_from_hex(G1_GENERATOR_Y))
    })
}

pub fn g2_generator() -> &'static G2Point {
    static GEN: OnceLock<G2Point> = OnceLock::new();
    GEN.get_or_init(|| {
        G2Point::new(
            Fq2::new(
                fq_from_hex(G2_GENERATOR_X_C0),
                fq_from_hex(G2_GENERATOR_X_C1),
            ),
            Fq2::new(
                fq_from_hex(G2_GENERATOR_Y_C0),
                fq_from_hex(G2_GENERATOR_Y_C1),
            ),
        )
    })
}

/// b coefficient of E: y² = x³ + 4.
pub fn b_g1() -> &'static Fq {
    static B: OnceLock<Fq> = OnceLock::new();
    B.get_or_init(|| Fq::from_u64(4))
}

/// b coefficient of the twist E': y² = x³ + 4(1 + u).
pub fn b_g2() -> &'static Fq2 {
    static B: OnceLock<Fq2> = OnceLock::new();
    B.get_or_init(|| Fq2::new(Fq::from_u64(4), Fq::from_u64(4)))
}

/// ξ = 1 + u, the Fq² non-residue the tower is built on.
pub fn xi() -> &'static Fq2 {
    static XI: OnceLock<Fq2> = OnceLock::new();
    XI.get_or_init(|| Fq2::new(Fq::one(), Fq::one()))
}

/// Frobenius coefficients for Fq⁶: ξ^(a·(qʲ-1)/3) for a ∈ {1, 2}.
pub fn frob6_coeffs() -> &'static [[Fq2; 6]; 2] {
    static TABLE: OnceLock<[[Fq2; 6]; 2]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table: [[Fq2; 6]; 2] = Default::default();
        for (a, row) in table.iter_mut().enumerate() {
            for (j, coeff) in row.iter_mut().enumerate() {
                let exp = (q().pow(j as u32) - 1u32) / 3u32 * (a as u32 + 1);
                *coeff = xi().pow(&exp);
            }
        }
        table
    })
}

/// Frobenius coefficients for Fq¹²: ξ^((qʲ-1)/6).
pub fn frob12_coeffs() -> &'static [Fq2; 12] {
    static TABLE: OnceLock<[Fq2; 12]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table: [Fq2; 12] = Default::default();
        for (j, coeff) in table.iter_mut().enumerate() {
            let exp = (q().pow(j as u32) - 1u32) / 6u32;
            *coeff = xi().pow(&exp);
        }
        table
    })
}

/// The eighth roots of unity in Fq², ξ^(k·(q²-1)/8); the even-indexed
/// entries are the fourth roots the Fq² square root checks against.
pub fn eighth_roots_of_unity() -> &'static [Fq2; 8] {
    static TABLE: OnceLock<[Fq2; 8]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let step = (q() * q() - 1u32) / 8u32;
        let omega = xi().pow(&step);
        let mut table: [Fq2; 8] = Default::default();
        let mut acc = Fq2::one();
        for entry in table.iter_mut() {
            *entry = acc.clone();
            acc = acc.mul(&omega);
        }
        table
    })
}

/// Fixed primitive 27-th root of unity in Fq¹².
pub fn w27() -> &'static Fq12 {
    static W27: OnceLock<Fq12> = OnceLock::new();
    W27.get_or_init(|| {
        // Push a generic element into the cyclotomic subgroup, then kill
        // the r, p and h3 components; what survives has order dividing 27.
        let exp = r_order() * p_factor() * h3();
        for n in 2u64..64 {
            let seed = Fq12::new(
                Fq6::new(
                    Fq2::new(Fq::from_u64(n), Fq::one()),
                    Fq2::new(Fq::one(), Fq::zero()),
                    Fq2::zero(),
                ),
                Fq6::one(),
            );
            let w = seed.easy_part().pow(&exp);
            if !w.pow(&BigUint::from(9u32)).is_one() {
                return w;
            }
        }
        debug_assert!(false, "no order-27 element found in scan");
        Fq12::one()
    })
}

/// Non-residue Z = 11 of the simplified SWU map.
pub fn swu_z() -> &'static Fq {
    static Z: OnceLock<Fq> = OnceLock::new();
    Z.get_or_init(|| Fq::from_u64(11))
}

/// A' of the 11-isogenous curve.
pub fn swu_a() -> &'static Fq {
    static A: OnceLock<Fq> = OnceLock::new();
    A.get_or_init(|| fq_from_hex(SSWU_A_HEX))
}

/// B' of the 11-isogenous curve.
pub fn swu_b() -> &'static Fq {
    static B: OnceLock<Fq> = OnceLock::new();
    B.get_or_init(|| fq_from_hex(SSWU_B_HEX))
}

/// C1 = (q - 3)/4 of sqrt_ratio_3mod4.
pub fn swu_c1() -> &'static BigUint {
    static C1: OnceLock<BigUint> = OnceLock::new();
    C1.get_or_init(|| (q() - 3u32) >> 2)
}

/// C2 = sqrt(-Z) of sqrt_ratio_3mod4; -Z is a square because both -1 and
/// Z are non-squares.
pub fn swu_c2() -> &'static Fq {
    static C2: OnceLock<Fq> = OnceLock::new();
    C2.get_or_init(|| {
        swu_z().neg().sqrt().unwrap_or_else(|_| {
            debug_assert!(false, "-Z must be a square");
            Fq::zero()
        })
    })
}

fn hex_table(hex: &[&str]) -> Vec<Fq> {
    hex.iter().map(|h| fq_from_hex(h)).collect()
}

/// Isogeny x-numerator polynomial k1, constant term first.
pub fn iso_x_num() -> &'static [Fq] {
    static TABLE: OnceLock<Vec<Fq>> = OnceLock::new();
    TABLE.get_or_init(|| hex_table(&ISO_X_NUM_HEX))
}

/// Isogeny x-denominator polynomial k2 (monic of degree 10).
pub fn iso_x_den() -> &'static [Fq] {
    static TABLE: OnceLock<Vec<Fq>> = OnceLock::new();
    TABLE.get_or_init(|| hex_table(&ISO_X_DEN_HEX))
}

/// Isogeny y-numerator polynomial k3.
pub fn iso_y_num() -> &'static [Fq] {
    static TABLE: OnceLock<Vec<Fq>> = OnceLock::new();
    TABLE.get_or_init(|| hex_table(&ISO_Y_NUM_HEX))
}

/// Isogeny y-denominator polynomial k4 (monic of degree 15).
pub fn iso_y_den() -> &'static [Fq] {
    static TABLE: OnceLock<Vec<Fq>> = OnceLock::new();
    TABLE.get_or_init(|| hex_table(&ISO_Y_DEN_HEX))
}
