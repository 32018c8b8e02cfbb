//! Parameter sets for BLISS-B.
//!
//! Five fixed variants selected by an integer `kind`:
//! - `BLISS_B_0`: toy set, n = 256 over q = 7681 (no security claim)
//! - `BLISS_B_1`: ~128-bit security, n = 512 over q = 12289
//! - `BLISS_B_2`: speed-optimized variant of `BLISS_B_1`
//! - `BLISS_B_3`: ~160-bit security
//! - `BLISS_B_4`: ~192-bit security
//!
//! All sets work in the ring Z[X]/(X^n + 1). The kind alone determines
//! every other value; the sets are compiled in and never mutated.

use crate::error::{BlissError, Result};

/// Length of the entropy seed in bytes (one SHA3-512 digest).
pub const SEED_LEN: usize = 64;

/// Parameters for one BLISS-B variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Params {
    /// Parameter-set selector (0..=4).
    pub kind: u8,

    /// Ring dimension n.
    pub n: usize,

    /// Log2 of n; also the width of one packed challenge index.
    pub n_bits: u32,

    /// Modulus q.
    pub q: i32,

    /// Bits needed for one coefficient in [0, q).
    pub q_bits: u32,

    /// Number of low-order bits dropped from z2 (rounding depth).
    pub d: u32,

    /// Modulus for the compressed z2 component, `p = floor(2q / 2^d)`.
    pub p: i32,

    /// Challenge weight: number of indices in c.
    pub kappa: usize,

    /// Infinity-norm bound on z1 and on `z2 * 2^d`.
    pub b_inf: i32,

    /// Squared L2-norm bound on `(z1, z2 * 2^d)`.
    pub b_l2_sq: i64,

    /// Number of +-1 coefficients in each secret polynomial.
    pub nz1: usize,

    /// Number of +-2 coefficients in each secret polynomial.
    pub nz2: usize,

    /// Standard deviation of the discrete Gaussian sampler.
    pub sigma: u32,

    /// Rejection-sampling constant `M = sigma^2 / alpha^2`.
    pub m: u32,

    /// Number of rows in the Bernoulli table (`2^ell > M`).
    pub ell: u32,

    /// Bit precision of each Bernoulli table row.
    pub precision: u32,

    /// `(q + 2)^-1 mod 2q`.
    pub one_q2: i32,
}

impl Params {
    /// Returns `2q`, the modulus of the uncompressed challenge input.
    #[inline]
    pub const fn q2(&self) -> i32 {
        2 * self.q
    }
}

/// BLISS-B-0 toy parameters.
///
/// - n = 256, q = 7681, d = 5, kappa = 12
/// - Intended only for fast functional testing.
pub const BLISS_B_0: Params = Params {
    kind: 0,
    n: 256,
    n_bits: 8,
    q: 7681,
    q_bits: 13,
    d: 5,
    p: 480,
    kappa: 12,
    b_inf: 530,
    b_l2_sq: 2492 * 2492,
    nz1: 140,
    nz2: 38,
    sigma: 100,
    m: 40000,
    ell: 19,
    precision: 64,
    one_q2: 3841,
};

/// BLISS-B-1 parameters (~128-bit security).
pub const BLISS_B_1: Params = Params {
    kind: 1,
    n: 512,
    n_bits: 9,
    q: 12289,
    q_bits: 14,
    d: 10,
    p: 24,
    kappa: 23,
    b_inf: 2047,
    b_l2_sq: 12872 * 12872,
    nz1: 154,
    nz2: 0,
    sigma: 215,
    m: 46225,
    ell: 22,
    precision: 128,
    one_q2: 6145,
};

/// BLISS-B-2 parameters (~128-bit security, smaller sigma).
pub const BLISS_B_2: Params = Params {
    kind: 2,
    n: 512,
    n_bits: 9,
    q: 12289,
    q_bits: 14,
    d: 10,
    p: 24,
    kappa: 23,
    b_inf: 2047,
    b_l2_sq: 11074 * 11074,
    nz1: 154,
    nz2: 0,
    sigma: 107,
    m: 45796,
    ell: 20,
    precision: 128,
    one_q2: 6145,
};

/// BLISS-B-3 parameters (~160-bit security).
pub const BLISS_B_3: Params = Params {
    kind: 3,
    n: 512,
    n_bits: 9,
    q: 12289,
    q_bits: 14,
    d: 9,
    p: 48,
    kappa: 30,
    b_inf: 1760,
    b_l2_sq: 10206 * 10206,
    nz1: 216,
    nz2: 16,
    sigma: 250,
    m: 127551,
    ell: 22,
    precision: 128,
    one_q2: 6145,
};

/// BLISS-B-4 parameters (~192-bit security).
pub const BLISS_B_4: Params = Params {
    kind: 4,
    n: 512,
    n_bits: 9,
    q: 12289,
    q_bits: 14,
    d: 8,
    p: 96,
    kappa: 39,
    b_inf: 1613,
    b_l2_sq: 9901 * 9901,
    nz1: 231,
    nz2: 31,
    sigma: 271,
    m: 242780,
    ell: 22,
    precision: 128,
    one_q2: 6145,
};

/// Every parameter set, indexed by kind.
pub const ALL_PARAMS: [&Params; 5] = [&BLISS_B_0, &BLISS_B_1, &BLISS_B_2, &BLISS_B_3, &BLISS_B_4];

/// Resolves a kind selector to its parameter set.
///
/// Pure and total over `u32`: kinds outside 0..=4 yield
/// [`BlissError::UnknownKind`] before any key material exists.
pub fn resolve(kind: u32) -> Result<&'static Params> {
    ALL_PARAMS
        .get(kind as usize)
        .copied()
        .ok_or(BlissError::UnknownKind { kind })
}
