//! Samplers for BLISS-B.
//!
//! - Sparse uniform polynomials with `nz1` coefficients of +-1 and `nz2`
//!   coefficients of +-2 (secret key material).
//! - A discrete Gaussian over Z of standard deviation `sigma`, built from
//!   the binary Gaussian `D_{sigma_2}` (sigma_2 = sqrt(1 / (2 ln 2))) and
//!   Bernoulli rejection against `exp(-x / (2 sigma^2))`.
//! - `BerExp` and `BerCosh` trials used by the signer's rejection step.
//!
//! Bernoulli probabilities are stored as big-endian fixed-point fractions
//! of `precision` bits. Row i of the table holds `exp(-2^i / (2 sigma^2))`.
//! None of this is constant-time.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::entropy::Entropy;
use crate::error::{BlissError, Result};
use crate::params::Params;

/// Extra bits carried through the table computation and dropped at the end.
const GUARD_BITS: u32 = 64;

/// Binary Gaussian gives up after this many blocks and returns 0.
const BINARY_GAUSS_BLOCKS: u32 = 16;

/// Discrete Gaussian sampler bound to one parameter set.
#[derive(Clone, Debug)]
pub struct Sampler {
    sigma: u32,
    ell: u32,
    columns: usize,
    k_sigma: u32,
    k_sigma_bits: u32,
    table: Vec<u8>,
}

/// Computes `ell` rows of `exp(-2^i / (2 sigma^2))` as `precision`-bit
/// big-endian fractions.
fn exp_table(sigma: u32, ell: u32, precision: u32) -> Vec<u8> {
    let work = precision + GUARD_BITS;
    let one = BigUint::one() << work;
    let two_sigma_sq = BigUint::from(2u64 * sigma as u64 * sigma as u64);
    let t = &one / &two_sigma_sq;

    // exp(-t) by its alternating Taylor series. Partial sums stay in (0, 1).
    let mut sum = one.clone();
    let mut term = one.clone();
    let mut k = 1u32;
    loop {
        term = ((&term * &t) >> work) / k;
        if term.is_zero() {
            break;
        }
        if k % 2 == 1 {
            sum -= &term;
        } else {
            sum += &term;
        }
        k += 1;
    }

    let columns = (precision / 8) as usize;
    let mut table = Vec::with_capacity(ell as usize * columns);
    let mut row = sum;
    for _ in 0..ell {
        let bytes = (&row >> GUARD_BITS).to_bytes_be();
        let pad = columns.saturating_sub(bytes.len());
        table.extend(std::iter::repeat(0u8).take(pad));
        table.extend_from_slice(&bytes[bytes.len().saturating_sub(columns)..]);
        // exp(-2^(i+1) c) = exp(-2^i c)^2
        row = (&row * &row) >> work;
    }
    table
}

impl Sampler {
    /// Builds the sampler tables for a parameter set.
    pub fn new(params: &Params) -> Result<Self> {
        Self::with_params(params.sigma, params.ell, params.precision)
    }

    /// Builds a sampler for explicit Gaussian parameters.
    pub fn with_params(sigma: u32, ell: u32, precision: u32) -> Result<Self> {
        if sigma == 0 {
            return Err(BlissError::SamplerInit { reason: "sigma must be positive" });
        }
        if ell == 0 || ell > 32 {
            return Err(BlissError::SamplerInit { reason: "ell must be in 1..=32" });
        }
        if precision == 0 || precision % 8 != 0 {
            return Err(BlissError::SamplerInit {
                reason: "precision must be a positive multiple of 8",
            });
        }

        // k = ceil(sigma / sigma_2) with sigma_2 = 1 / sqrt(2 ln 2)
        let k_sigma = (sigma as f64 * (2.0 * std::f64::consts::LN_2).sqrt()).ceil() as u32;
        let k_sigma_bits = u32::BITS - (k_sigma - 1).leading_zeros();
        if k_sigma_bits == 0 || k_sigma_bits > 32 {
            return Err(BlissError::SamplerInit { reason: "invalid k_sigma" });
        }

        Ok(Sampler {
            sigma,
            ell,
            columns: (precision / 8) as usize,
            k_sigma,
            k_sigma_bits,
            table: exp_table(sigma, ell, precision),
        })
    }

    /// Standard deviation of [`Sampler::sample_gauss`].
    pub fn sigma(&self) -> u32 {
        self.sigma
    }

    /// Scaling factor `k` between the binary Gaussian and this sampler.
    pub fn k_sigma(&self) -> u32 {
        self.k_sigma
    }

    #[inline]
    fn row(&self, i: u32) -> &[u8] {
        let start = i as usize * self.columns;
        &self.table[start..start + self.columns]
    }

    /// Bernoulli trial with probability `p / 2^(8 * p.len())`, `p` big-endian.
    fn ber(&self, entropy: &mut Entropy, p: &[u8]) -> bool {
        for &pi in p {
            let uc = entropy.next_byte();
            if uc < pi {
                return true;
            }
            if uc > pi {
                return false;
            }
        }
        true
    }

    /// Bernoulli trial with probability `exp(-x / (2 sigma^2))`.
    ///
    /// One table row per set bit of `x`, highest first. Any part of `x` at
    /// or above `2^(ell - 1)` is covered by repeating the top row.
    pub fn ber_exp(&self, entropy: &mut Entropy, x: u64) -> bool {
        let top = self.ell - 1;
        let mut high = x >> top;
        while high > 0 {
            if !self.ber(entropy, self.row(top)) {
                return false;
            }
            high -= 1;
        }
        for i in (0..top).rev() {
            if x & (1u64 << i) != 0 && !self.ber(entropy, self.row(i)) {
                return false;
            }
        }
        true
    }

    /// Bernoulli trial with probability `1 / cosh(x / sigma^2)`.
    pub fn ber_cosh(&self, entropy: &mut Entropy, x: i64) -> bool {
        let x = x.unsigned_abs() << 1;
        loop {
            if self.ber_exp(entropy, x) {
                return true;
            }
            if !entropy.bit() && !self.ber_exp(entropy, x) {
                return false;
            }
        }
    }

    /// Samples the binary Gaussian `D_{sigma_2}` over non-negative integers.
    pub fn binary_gauss(&self, entropy: &mut Entropy) -> u32 {
        'restart: loop {
            if entropy.bit() {
                return 0;
            }
            for i in 1..=BINARY_GAUSS_BLOCKS {
                let u = entropy.bits(2 * i - 1);
                if u == 0 {
                    return i;
                }
                if u != 1 {
                    continue 'restart;
                }
            }
            return 0;
        }
    }

    /// Draws one value from the discrete Gaussian `D_sigma` over Z.
    pub fn sample_gauss(&self, entropy: &mut Entropy) -> i32 {
        let k = self.k_sigma;
        loop {
            let x = self.binary_gauss(entropy);
            let y = loop {
                let y = entropy.bits(self.k_sigma_bits);
                if y < k {
                    break y;
                }
            };
            let e = y as u64 * (y as u64 + 2 * k as u64 * x as u64);
            let u = entropy.bit();
            if ((x | y) != 0 || u) && self.ber_exp(entropy, e) {
                let magnitude = (k * x + y) as i32;
                return if u { magnitude } else { -magnitude };
            }
        }
    }

    /// Draws `n` independent Gaussian coefficients.
    pub fn gauss_poly(&self, entropy: &mut Entropy, n: usize) -> Vec<i32> {
        (0..n).map(|_| self.sample_gauss(entropy)).collect()
    }
}

/// Samples a sparse polynomial with exactly `nz1` coefficients in {-1, 1}
/// and `nz2` coefficients in {-2, 2}, at positions drawn from the u16 pool.
pub fn uniform_poly(params: &Params, entropy: &mut Entropy) -> Vec<i32> {
    let n = params.n;
    let mut v = vec![0i32; n];

    let mut placed = 0;
    while placed < params.nz1 {
        let x = entropy.next_u16();
        let j = (x >> 1) as usize % n;
        if v[j] == 0 {
            v[j] = if x & 1 == 1 { 1 } else { -1 };
            placed += 1;
        }
    }

    placed = 0;
    while placed < params.nz2 {
        let x = entropy.next_u16();
        let j = (x >> 1) as usize % n;
        if v[j] == 0 {
            v[j] = if x & 1 == 1 { 2 } else { -2 };
            placed += 1;
        }
    }

    v
}
