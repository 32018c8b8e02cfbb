//! Signing for BLISS-B.
//!
//! Implements the BLISS-B signer: Gaussian masking vectors, the challenge
//! oracle, the GreedySC sign-selection for `S * c`, and the two rejection
//! steps (`BerExp` on the norm of `S * c`, `BerCosh` on `<z, S * c>`),
//! followed by compression of z2 to its high bits.

use log::debug;
use zeroize::Zeroize;

use crate::entropy::Entropy;
use crate::error::{BlissError, Result};
use crate::hash::{compute_c, hash_message};
use crate::keygen::PrivateKey;
use crate::ntt::NttContext;
use crate::params::Params;
use crate::poly::{add, bound_by_p, dropped, inner_product, max_norm, mod_positive, mul_2d, norm2, sub};
use crate::sampler::Sampler;

/// A BLISS-B signature `(z1, z2, c)`.
///
/// `z1` and `z2` have n coefficients, `c` holds kappa challenge indices.
/// All components are zeroized on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature {
    /// Parameter set the signature was produced under.
    pub params: &'static Params,
    /// First response polynomial.
    pub z1: Vec<i32>,
    /// Second response polynomial with its low d bits dropped.
    pub z2: Vec<i32>,
    /// Challenge indices.
    pub c: Vec<u32>,
}

impl Drop for Signature {
    fn drop(&mut self) {
        self.z1.zeroize();
        self.z2.zeroize();
        self.c.zeroize();
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signature")
            .field("kind", &self.params.kind)
            .field("z1", &self.z1)
            .field("z2", &self.z2)
            .field("c", &self.c)
            .finish()
    }
}

impl Signature {
    /// Assembles a signature from externally supplied components.
    ///
    /// Only the lengths are checked here; coefficient bounds and index
    /// ranges are the verifier's business.
    pub fn from_components(
        params: &'static Params,
        z1: Vec<i32>,
        z2: Vec<i32>,
        c: Vec<u32>,
    ) -> Result<Self> {
        if z1.len() != params.n {
            return Err(BlissError::MalformedSignature { reason: "z1 length differs from n" });
        }
        if z2.len() != params.n {
            return Err(BlissError::MalformedSignature { reason: "z2 length differs from n" });
        }
        if c.len() != params.kappa {
            return Err(BlissError::MalformedSignature { reason: "c length differs from kappa" });
        }
        Ok(Signature { params, z1, z2, c })
    }

    /// Squared norm `|z1|^2 + |z2 * 2^d|^2` checked against `B_2^2`.
    pub fn norm_sq(&self) -> i64 {
        norm2(&self.z1) + norm2(&mul_2d(&self.z2, self.params.d))
    }
}

/// GreedySC: computes `(v1, v2) = (s1, s2) * c'` where `c'` agrees with
/// the challenge on its support but each sign is chosen to keep the
/// running norm small.
///
/// For each index, the shifted secret `x^i * S` is subtracted when its
/// inner product with the accumulator is positive and added otherwise.
/// Multiplication by `x^i` is negacyclic.
pub fn greedy_sc(c: &[u32], s1: &[i32], s2: &[i32]) -> (Vec<i32>, Vec<i32>) {
    let n = s1.len();
    let mut v1 = vec![0i32; n];
    let mut v2 = vec![0i32; n];

    for &index in c {
        let index = index as usize;
        debug_assert!(index < n);
        let wrap = n - index;

        let mut sign = 0i64;
        for i in 0..wrap {
            sign += s1[i] as i64 * v1[index + i] as i64 + s2[i] as i64 * v2[index + i] as i64;
        }
        for i in wrap..n {
            sign -= s1[i] as i64 * v1[index + i - n] as i64 + s2[i] as i64 * v2[index + i - n] as i64;
        }

        let delta = if sign > 0 { -1 } else { 1 };
        for i in 0..wrap {
            v1[index + i] += delta * s1[i];
            v2[index + i] += delta * s2[i];
        }
        for i in wrap..n {
            v1[index + i - n] -= delta * s1[i];
            v2[index + i - n] -= delta * s2[i];
        }
    }

    (v1, v2)
}

/// Computes `v = 2 * one_q2 * (a * y1 mod q) + y2 mod 2q`.
pub(crate) fn commitment(params: &Params, ay1: &[i32], y2: &[i32]) -> Vec<i32> {
    let q2 = params.q2() as i64;
    let scale = 2 * params.one_q2 as i64;
    ay1.iter()
        .zip(y2)
        .map(|(&x, &y)| (x as i64 * scale + y as i64).rem_euclid(q2) as i32)
        .collect()
}

/// Signs `message` with `sk`, drawing all randomness from `entropy`.
///
/// Rejection-sampling restarts are internal; the only failures are a
/// secret key whose `|S c|^2` reaches `M` (impossible for keys from
/// [`crate::keygen::generate_private_key`]) and an exhausted challenge
/// oracle.
pub fn sign(sk: &PrivateKey, message: &[u8], entropy: &mut Entropy) -> Result<Signature> {
    let params = sk.params;
    let n = params.n;
    let d = params.d;
    let ctx = NttContext::new(params);
    let sampler = Sampler::new(params)?;
    let digest = hash_message(message);

    let mut restarts = 0u32;
    loop {
        let mut y1 = sampler.gauss_poly(entropy, n);
        let mut y2 = sampler.gauss_poly(entropy, n);
        let v = commitment(params, &ctx.multiply_by_ntt(&y1, &sk.a), &y2);
        let dv = mod_positive(&dropped(&v, d), params.p);
        let c = compute_c(params.kappa, n, &dv, &digest).ok_or(BlissError::SigningFailed {
            reason: "challenge oracle exhausted",
        })?;

        let (mut v1, mut v2) = greedy_sc(&c, &sk.s1, &sk.s2);
        let norm_v = norm2(&v1) + norm2(&v2);
        if norm_v >= params.m as i64 {
            return Err(BlissError::SigningFailed { reason: "|Sc|^2 is not below M" });
        }

        let accepted = 'attempt: {
            if !sampler.ber_exp(entropy, (params.m as i64 - norm_v) as u64) {
                break 'attempt None;
            }

            let (z1, z2) = if entropy.bit() {
                (sub(&y1, &v1), sub(&y2, &v2))
            } else {
                (add(&y1, &v1), add(&y2, &v2))
            };

            let prod = inner_product(&z1, &v1) + inner_product(&z2, &v2);
            if !sampler.ber_cosh(entropy, prod) {
                break 'attempt None;
            }

            let low = dropped(&mod_positive(&sub(&v, &z2), params.q2()), d);
            let z2_dropped = bound_by_p(&sub(&dropped(&v, d), &low), params.p);

            if max_norm(&z1) > params.b_inf as i64 {
                break 'attempt None;
            }
            let z2_scaled = mul_2d(&z2_dropped, d);
            if max_norm(&z2_scaled) > params.b_inf as i64 {
                break 'attempt None;
            }
            if norm2(&z1) + norm2(&z2_scaled) > params.b_l2_sq {
                break 'attempt None;
            }
            Some(Signature {
                params,
                z1,
                z2: z2_dropped,
                c,
            })
        };

        y1.zeroize();
        y2.zeroize();
        v1.zeroize();
        v2.zeroize();

        match accepted {
            Some(sig) => {
                debug!("kind {}: signature accepted after {} restarts", params.kind, restarts);
                return Ok(sig);
            }
            None => restarts += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keygen::generate_private_key;
    use crate::ntt::poly_mul_schoolbook;
    use crate::params::{BLISS_B_0, BLISS_B_1};

    #[test]
    fn test_greedy_sc_matches_signed_product() {
        // v = S * c' for some c' with +-1 on exactly the challenge support.
        let mut entropy = Entropy::deterministic();
        let sk = generate_private_key(&BLISS_B_0, &mut entropy).unwrap();
        let c = vec![0u32, 5, 100, 255];
        let (v1, _v2) = greedy_sc(&c, &sk.s1, &sk.s2);

        let n = BLISS_B_0.n;
        let big_q = 1 << 20;
        let mut found = false;
        for signs in 0..16u32 {
            let mut cpoly = vec![0i32; n];
            for (k, &idx) in c.iter().enumerate() {
                cpoly[idx as usize] = if signs >> k & 1 == 1 { 1 } else { -1 };
            }
            let prod = poly_mul_schoolbook(&sk.s1, &cpoly, big_q);
            let centered: Vec<i32> =
                prod.iter().map(|&x| if x > big_q / 2 { x - big_q } else { x }).collect();
            if centered == v1 {
                found = true;
                break;
            }
        }
        assert!(found);
    }

    #[test]
    fn test_greedy_sc_norm_bound() {
        let mut entropy = Entropy::deterministic();
        let sk = generate_private_key(&BLISS_B_1, &mut entropy).unwrap();
        let c: Vec<u32> = (0..23).map(|i| i * 22 + 1).collect();
        let (v1, v2) = greedy_sc(&c, &sk.s1, &sk.s2);
        let s_norm = norm2(&sk.s1) + norm2(&sk.s2);
        assert!(norm2(&v1) + norm2(&v2) <= c.len() as i64 * s_norm);
    }

    #[test]
    fn test_sign_produces_bounded_signature() {
        let mut entropy = Entropy::deterministic();
        let sk = generate_private_key(&BLISS_B_0, &mut entropy).unwrap();
        let sig = sign(&sk, b"Hello world", &mut entropy).unwrap();
        assert_eq!(sig.z1.len(), 256);
        assert_eq!(sig.z2.len(), 256);
        assert_eq!(sig.c.len(), 12);
        assert!(max_norm(&sig.z1) <= BLISS_B_0.b_inf as i64);
        assert!(sig.norm_sq() <= BLISS_B_0.b_l2_sq);
        assert!(sig.z2.iter().all(|&x| (-BLISS_B_0.p / 2..BLISS_B_0.p / 2).contains(&x)));
    }

    #[test]
    fn test_from_components_checks_lengths() {
        let p = &BLISS_B_0;
        assert!(Signature::from_components(p, vec![0; 256], vec![0; 256], vec![0; 12]).is_ok());
        assert!(matches!(
            Signature::from_components(p, vec![0; 255], vec![0; 256], vec![0; 12]),
            Err(BlissError::MalformedSignature { .. })
        ));
        assert!(Signature::from_components(p, vec![0; 256], vec![0; 512], vec![0; 12]).is_err());
        assert!(Signature::from_components(p, vec![0; 256], vec![0; 256], vec![0; 11]).is_err());
    }
}
