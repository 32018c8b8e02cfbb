//! Key generation for BLISS-B.
//!
//! The private key is a pair of sparse polynomials `(s1, s2) = (f, 2g - 1)`
//! with `f` invertible in Z_q[X]/(X^n + 1). The public key is
//! `a = -s2 / s1 mod q`, kept in NTT form since every use of it is a
//! product.

use log::debug;
use zeroize::Zeroize;

use crate::entropy::Entropy;
use crate::error::{BlissError, Result};
use crate::field::reduce;
use crate::ntt::NttContext;
use crate::params::Params;
use crate::sampler::uniform_poly;

/// Attempts at sampling an invertible `s1` before giving up.
const MAX_KEYGEN_ATTEMPTS: usize = 4;

/// A BLISS-B private key.
///
/// Holds a copy of the public polynomial so signing needs no extra
/// transform. All three vectors are zeroized on drop.
#[derive(Clone)]
pub struct PrivateKey {
    /// Parameter set the key was generated for.
    pub params: &'static Params,
    /// Secret polynomial s1 = f.
    pub s1: Vec<i32>,
    /// Secret polynomial s2 = 2g - 1.
    pub s2: Vec<i32>,
    /// Public polynomial a in NTT form.
    pub a: Vec<i32>,
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.s1.zeroize();
        self.s2.zeroize();
        self.a.zeroize();
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("kind", &self.params.kind)
            .finish_non_exhaustive()
    }
}

/// A BLISS-B public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    /// Parameter set the key belongs to.
    pub params: &'static Params,
    /// Public polynomial a in NTT form.
    pub a: Vec<i32>,
}

impl PrivateKey {
    /// Extracts the public key. Borrowing `self` guarantees the private
    /// key is still live.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            params: self.params,
            a: self.a.clone(),
        }
    }
}

/// Computes `NTT(-s2 / s1)`, or `None` if `s1` is not invertible.
pub(crate) fn derive_public(ctx: &NttContext, s1: &[i32], s2: &[i32]) -> Option<Vec<i32>> {
    let q = ctx.q();
    let u = ctx.pointwise_invert(&ctx.forward(s1))?;
    let t = ctx.pointwise_mul(&ctx.forward(s2), &u);
    let quotient: Vec<i32> = ctx
        .inverse(&t)
        .into_iter()
        .map(|x| reduce(-(x as i64), q))
        .collect();
    Some(ctx.forward(&quotient))
}

/// Generates a private key for `params` from the given entropy.
///
/// `g` is sampled once; `f` is resampled up to four times until it is
/// invertible. Draws from `entropy` in a fixed order, so the key is a
/// pure function of the entropy state.
pub fn generate_private_key(params: &'static Params, entropy: &mut Entropy) -> Result<PrivateKey> {
    let ctx = NttContext::new(params);

    let mut s2 = uniform_poly(params, entropy);
    for x in s2.iter_mut() {
        *x *= 2;
    }
    s2[0] -= 1;

    for attempt in 1..=MAX_KEYGEN_ATTEMPTS {
        let mut s1 = uniform_poly(params, entropy);
        match derive_public(&ctx, &s1, &s2) {
            Some(a) => {
                debug!("kind {}: key generated on attempt {}", params.kind, attempt);
                return Ok(PrivateKey { params, s1, s2, a });
            }
            None => {
                debug!("kind {}: s1 not invertible on attempt {}", params.kind, attempt);
                s1.zeroize();
            }
        }
    }

    s2.zeroize();
    Err(BlissError::KeygenFailed {
        reason: "no invertible s1 found",
    })
}
