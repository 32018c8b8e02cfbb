//! Negacyclic Number Theoretic Transform over Z_q[X]/(X^n + 1).
//!
//! A transform context is built once per parameter set and holds the
//! twist factors for `psi`, a primitive 2n-th root of unity. Forward and
//! inverse transforms follow the classic twist / bit-reverse /
//! butterfly structure, so pointwise products in the NTT domain are
//! negacyclic convolutions in the coefficient domain.

use crate::field::{inv_mod, mul_mod, pow_mod, primitive_root_2n, reduce};
use crate::params::Params;

/// Precomputed NTT data for one `(n, q)` pair.
#[derive(Clone, Debug)]
pub struct NttContext {
    n: usize,
    log_n: u32,
    q: i32,
    omega: i32,
    omega_inv: i32,
    n_inv: i32,
    /// `psi^j` for j in 0..n.
    psi_pow: Vec<i32>,
    /// `psi^-j * n^-1` for j in 0..n.
    psi_inv_pow: Vec<i32>,
}

/// Reverses the bottom `log_n` bits of `x`.
#[inline]
fn bit_reverse(x: usize, log_n: u32) -> usize {
    x.reverse_bits() >> (usize::BITS - log_n)
}

impl NttContext {
    /// Builds the transform tables for a parameter set.
    pub fn new(params: &Params) -> Self {
        Self::with_modulus(params.n, params.q)
    }

    /// Builds the transform tables for an arbitrary power-of-two `n` and
    /// prime `q` with `2n | q - 1`.
    pub fn with_modulus(n: usize, q: i32) -> Self {
        let log_n = n.trailing_zeros();
        debug_assert_eq!(1 << log_n, n, "n must be a power of 2");

        let psi = primitive_root_2n(q, n);
        // psi is a unit, so both inverses exist.
        let psi_inv = inv_mod(psi, q).unwrap_or(1);
        let n_inv = inv_mod(n as i32, q).unwrap_or(1);
        let omega = mul_mod(psi, psi, q);
        let omega_inv = mul_mod(psi_inv, psi_inv, q);

        let mut psi_pow = Vec::with_capacity(n);
        let mut psi_inv_pow = Vec::with_capacity(n);
        let mut fwd = 1;
        let mut inv = n_inv;
        for _ in 0..n {
            psi_pow.push(fwd);
            psi_inv_pow.push(inv);
            fwd = mul_mod(fwd, psi, q);
            inv = mul_mod(inv, psi_inv, q);
        }

        NttContext {
            n,
            log_n,
            q,
            omega,
            omega_inv,
            n_inv,
            psi_pow,
            psi_inv_pow,
        }
    }

    /// Returns the ring dimension.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Returns the modulus.
    #[inline]
    pub fn q(&self) -> i32 {
        self.q
    }

    /// Forward negacyclic NTT (Cooley-Tukey, decimation in time).
    ///
    /// Accepts coefficients of any sign; output values are in `[0, q)`.
    pub fn forward(&self, a: &[i32]) -> Vec<i32> {
        debug_assert_eq!(a.len(), self.n);
        let n = self.n;
        let q = self.q;

        // Twist by psi^j, then bit-reverse.
        let mut result = vec![0i32; n];
        for (j, &coeff) in a.iter().enumerate() {
            result[bit_reverse(j, self.log_n)] = mul_mod(reduce(coeff as i64, q), self.psi_pow[j], q);
        }

        let mut len = 1;
        while len < n {
            let step = pow_mod(self.omega, (n / (2 * len)) as u64, q);
            let mut k = 0;
            while k < n {
                let mut w = 1;
                for j in 0..len {
                    let u = result[k + j];
                    let t = mul_mod(w, result[k + j + len], q);
                    result[k + j] = reduce((u + t) as i64, q);
                    result[k + j + len] = reduce((u - t) as i64, q);
                    w = mul_mod(w, step, q);
                }
                k += 2 * len;
            }
            len <<= 1;
        }

        result
    }

    /// Inverse negacyclic NTT (Gentleman-Sande, decimation in frequency).
    ///
    /// Output coefficients are in `[0, q)`.
    pub fn inverse(&self, a: &[i32]) -> Vec<i32> {
        debug_assert_eq!(a.len(), self.n);
        let n = self.n;
        let q = self.q;
        let mut work: Vec<i32> = a.iter().map(|&x| reduce(x as i64, q)).collect();

        let mut len = n / 2;
        while len >= 1 {
            let step = pow_mod(self.omega_inv, (n / (2 * len)) as u64, q);
            let mut k = 0;
            while k < n {
                let mut w = 1;
                for j in 0..len {
                    let u = work[k + j];
                    let t = work[k + j + len];
                    work[k + j] = reduce((u + t) as i64, q);
                    work[k + j + len] = mul_mod(reduce((u - t) as i64, q), w, q);
                    w = mul_mod(w, step, q);
                }
                k += 2 * len;
            }
            len >>= 1;
        }

        // Bit-reverse, then un-twist and scale by n^-1.
        let mut result = vec![0i32; n];
        for (i, &v) in work.iter().enumerate() {
            let j = bit_reverse(i, self.log_n);
            result[j] = mul_mod(v, self.psi_inv_pow[j], q);
        }
        result
    }

    /// Pointwise product of two NTT-domain vectors.
    pub fn pointwise_mul(&self, a: &[i32], b: &[i32]) -> Vec<i32> {
        a.iter().zip(b).map(|(&x, &y)| mul_mod(x, y, self.q)).collect()
    }

    /// Pointwise inverse of an NTT-domain vector.
    ///
    /// Returns `None` if any slot is zero, i.e. the polynomial is not a
    /// unit in the ring.
    pub fn pointwise_invert(&self, a: &[i32]) -> Option<Vec<i32>> {
        a.iter().map(|&x| inv_mod(x, self.q)).collect()
    }

    /// Negacyclic product of a coefficient-domain polynomial and an
    /// NTT-domain polynomial; the result is in coefficient form, `[0, q)`.
    pub fn multiply_by_ntt(&self, a: &[i32], b_ntt: &[i32]) -> Vec<i32> {
        let a_ntt = self.forward(a);
        self.inverse(&self.pointwise_mul(&a_ntt, b_ntt))
    }

    /// Negacyclic product of two coefficient-domain polynomials.
    pub fn multiply(&self, a: &[i32], b: &[i32]) -> Vec<i32> {
        let b_ntt = self.forward(b);
        self.multiply_by_ntt(a, &b_ntt)
    }

    /// `n^-1 mod q`.
    #[inline]
    pub fn n_inv(&self) -> i32 {
        self.n_inv
    }
}

/// Schoolbook negacyclic product, used as a reference in tests.
#[cfg(test)]
pub(crate) fn poly_mul_schoolbook(a: &[i32], b: &[i32], q: i32) -> Vec<i32> {
    let n = a.len();
    let mut acc = vec![0i64; n];
    for i in 0..n {
        for j in 0..n {
            let prod = a[i] as i64 * b[j] as i64;
            let k = i + j;
            if k < n {
                acc[k] += prod;
            } else {
                acc[k - n] -= prod;
            }
        }
    }
    acc.into_iter().map(|x| reduce(x, q)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{BLISS_B_0, BLISS_B_1};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_forward_inverse_identity() {
        let mut rng = StdRng::seed_from_u64(7);
        for params in [&BLISS_B_0, &BLISS_B_1] {
            let ctx = NttContext::new(params);
            let a: Vec<i32> = (0..params.n).map(|_| rng.gen_range(0..params.q)).collect();
            assert_eq!(ctx.inverse(&ctx.forward(&a)), a);
        }
    }

    #[test]
    fn test_multiply_matches_schoolbook() {
        let mut rng = StdRng::seed_from_u64(11);
        for params in [&BLISS_B_0, &BLISS_B_1] {
            let ctx = NttContext::new(params);
            let a: Vec<i32> = (0..params.n).map(|_| rng.gen_range(-300..300)).collect();
            let b: Vec<i32> = (0..params.n).map(|_| rng.gen_range(0..params.q)).collect();
            assert_eq!(ctx.multiply(&a, &b), poly_mul_schoolbook(&a, &b, params.q));
        }
    }

    #[test]
    fn test_x_to_the_n_is_minus_one() {
        // X^(n-1) * X = X^n = -1 in the negacyclic ring.
        let ctx = NttContext::new(&BLISS_B_0);
        let n = ctx.n();
        let mut a = vec![0i32; n];
        let mut b = vec![0i32; n];
        a[n - 1] = 1;
        b[1] = 1;
        let mut expected = vec![0i32; n];
        expected[0] = ctx.q() - 1;
        assert_eq!(ctx.multiply(&a, &b), expected);
    }

    #[test]
    fn test_pointwise_invert() {
        let ctx = NttContext::new(&BLISS_B_1);
        let mut one = vec![0i32; ctx.n()];
        one[0] = 1;
        let one_ntt = ctx.forward(&one);
        assert!(one_ntt.iter().all(|&x| x == 1));
        assert_eq!(ctx.pointwise_invert(&one_ntt), Some(one_ntt.clone()));

        let zero_ntt = vec![0i32; ctx.n()];
        assert_eq!(ctx.pointwise_invert(&zero_ntt), None);
        assert_eq!(ctx.n_inv() as i64 * ctx.n() as i64 % ctx.q() as i64, 1);
    }
}
