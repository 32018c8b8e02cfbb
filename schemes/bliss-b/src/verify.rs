//! Verification for BLISS-B.
//!
//! This module implements the BLISS-B verification algorithm and its
//! integer result-code form used by the test harness.

use crate::error::{
    BlissError, Result, VerificationFailure, VERIFY_SUCCESS,
};
use crate::hash::{compute_c, hash_message};
use crate::keygen::PublicKey;
use crate::ntt::NttContext;
use crate::poly::{add, dropped, max_norm, mod_positive, mul_2d, norm2};
use crate::sign::{commitment, Signature};

/// Checks the structural validity of a signature against its parameters.
fn check_shape(pk: &PublicKey, sig: &Signature) -> Result<()> {
    let params = pk.params;
    if sig.params.kind != params.kind {
        return Err(BlissError::ParameterMismatch {
            expected: params.kind,
            found: sig.params.kind,
        });
    }
    if sig.z1.len() != params.n || sig.z2.len() != params.n {
        return Err(BlissError::MalformedSignature { reason: "response length differs from n" });
    }
    if sig.c.len() != params.kappa {
        return Err(BlissError::MalformedSignature { reason: "challenge length differs from kappa" });
    }
    let mut seen = vec![false; params.n];
    for &index in &sig.c {
        let index = index as usize;
        if index >= params.n {
            return Err(BlissError::MalformedSignature { reason: "challenge index out of range" });
        }
        if seen[index] {
            return Err(BlissError::MalformedSignature { reason: "repeated challenge index" });
        }
        seen[index] = true;
    }
    Ok(())
}

/// Verifies a BLISS-B signature.
///
/// This function:
/// 1. Checks shape: parameter set, lengths, challenge indices
/// 2. Checks `|z1|_inf`, `|z2 * 2^d|_inf <= B_inf` and the L2 bound
/// 3. Recomputes `u = drop(2 * one_q2 * a * z1 + q * c mod 2q) + z2 mod p`
/// 4. Compares the oracle output on `u` with `c`
///
/// Returns Ok(()) if the signature is valid, Err otherwise.
pub fn verify(pk: &PublicKey, message: &[u8], sig: &Signature) -> Result<()> {
    check_shape(pk, sig)?;
    let params = pk.params;
    let d = params.d;

    if max_norm(&sig.z1) > params.b_inf as i64 {
        return Err(BlissError::VerificationFailed(VerificationFailure::Z1MaxNorm));
    }
    // |z2 * 2^d| <= B_inf, tested before shifting so large inputs cannot wrap.
    if max_norm(&sig.z2) > (params.b_inf >> d) as i64 {
        return Err(BlissError::VerificationFailed(VerificationFailure::Z2MaxNorm));
    }
    let z2_scaled = mul_2d(&sig.z2, d);
    if norm2(&sig.z1) + norm2(&z2_scaled) > params.b_l2_sq {
        return Err(BlissError::VerificationFailed(VerificationFailure::L2Norm));
    }

    let ctx = NttContext::new(params);
    let az1 = ctx.multiply_by_ntt(&sig.z1, &pk.a);
    let zeros = vec![0i32; params.n];
    let mut v = commitment(params, &az1, &zeros);
    let q2 = params.q2() as i64;
    let shift = (params.q as i64 * params.one_q2 as i64).rem_euclid(q2);
    for &index in &sig.c {
        let slot = &mut v[index as usize];
        *slot = (*slot as i64 + shift).rem_euclid(q2) as i32;
    }

    let u = mod_positive(&add(&dropped(&v, d), &sig.z2), params.p);
    let digest = hash_message(message);
    let recomputed = compute_c(params.kappa, params.n, &u, &digest)
        .ok_or(BlissError::VerificationFailed(VerificationFailure::ChallengeMismatch))?;

    if recomputed != sig.c {
        return Err(BlissError::VerificationFailed(VerificationFailure::ChallengeMismatch));
    }
    Ok(())
}

/// Verifies a signature and reports the outcome as an integer code:
/// `0` success, `1` rejected, `-2` malformed data, `-3` parameter mismatch.
pub fn verify_status(pk: &PublicKey, message: &[u8], sig: &Signature) -> i32 {
    match verify(pk, message, sig) {
        Ok(()) => VERIFY_SUCCESS,
        Err(e) => e.verify_code(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::Entropy;
    use crate::error::{VERIFY_BAD_ARGS, VERIFY_BAD_DATA, VERIFY_FAILED};
    use crate::keygen::generate_private_key;
    use crate::params::{BLISS_B_0, BLISS_B_1};
    use crate::sign::sign;

    fn signed(msg: &[u8]) -> (PublicKey, Signature) {
        let mut entropy = Entropy::deterministic();
        let sk = generate_private_key(&BLISS_B_0, &mut entropy).unwrap();
        let sig = sign(&sk, msg, &mut entropy).unwrap();
        (sk.public_key(), sig)
    }

    #[test]
    fn test_verify_valid() {
        let (pk, sig) = signed(b"Hello world");
        assert_eq!(verify(&pk, b"Hello world", &sig), Ok(()));
        assert_eq!(verify_status(&pk, b"Hello world", &sig), VERIFY_SUCCESS);
    }

    #[test]
    fn test_verify_wrong_message() {
        let (pk, sig) = signed(b"Hello world");
        assert_eq!(
            verify(&pk, b"Hello world?", &sig),
            Err(BlissError::VerificationFailed(VerificationFailure::ChallengeMismatch))
        );
    }

    #[test]
    fn test_verify_codes_for_bad_inputs() {
        let (pk, sig) = signed(b"Hello world");

        let mut out_of_range = sig.clone();
        out_of_range.c[0] = 256;
        assert_eq!(verify_status(&pk, b"Hello world", &out_of_range), VERIFY_BAD_DATA);

        let mut repeated = sig.clone();
        repeated.c[1] = repeated.c[0];
        assert_eq!(verify_status(&pk, b"Hello world", &repeated), VERIFY_BAD_DATA);

        let mut huge = sig.clone();
        huge.z1[3] = i32::MIN;
        assert_eq!(verify_status(&pk, b"Hello world", &huge), VERIFY_FAILED);

        let mut huge_z2 = sig.clone();
        huge_z2.z2[0] = 1 << 30;
        assert_eq!(verify_status(&pk, b"Hello world", &huge_z2), VERIFY_FAILED);

        let other = Signature::from_components(
            &BLISS_B_1,
            vec![0; 512],
            vec![0; 512],
            vec![0; 23],
        )
        .unwrap();
        assert_eq!(verify_status(&pk, b"Hello world", &other), VERIFY_BAD_ARGS);
    }
}
