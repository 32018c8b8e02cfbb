//! Sign/verify integration tests across all BLISS-B parameter sets.
//!
//! Every test draws keys and masks from the deterministic entropy source,
//! so failures reproduce exactly.

use pqsigs_bliss_b::{
    decode_private_key, decode_public_key, decode_signature, encode_private_key,
    encode_public_key, encode_signature, generate_private_key, sign, verify, verify_status,
    BlissError, Entropy, PrivateKey, Signature, VerificationFailure, ALL_PARAMS, VERIFY_SUCCESS,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MESSAGE: &[u8] = b"Hello world";

fn key_and_signature(kind: usize) -> (PrivateKey, Signature) {
    let mut entropy = Entropy::deterministic();
    let sk = generate_private_key(ALL_PARAMS[kind], &mut entropy).unwrap();
    let sig = sign(&sk, MESSAGE, &mut entropy).unwrap();
    (sk, sig)
}

#[test]
fn test_sign_verify_all_kinds() {
    for kind in 0..ALL_PARAMS.len() {
        let (sk, sig) = key_and_signature(kind);
        let pk = sk.public_key();
        assert_eq!(verify(&pk, MESSAGE, &sig), Ok(()), "kind {}", kind);
        assert!(sig.norm_sq() <= pk.params.b_l2_sq);
    }
}

#[test]
fn test_wrong_message_rejected() {
    for kind in [0, 1, 4] {
        let (sk, sig) = key_and_signature(kind);
        assert_eq!(
            verify(&sk.public_key(), b"Hello world!", &sig),
            Err(BlissError::VerificationFailed(VerificationFailure::ChallengeMismatch))
        );
    }
}

#[test]
fn test_single_mutations_never_verify() {
    let mut rng = StdRng::seed_from_u64(2014);
    for kind in 0..ALL_PARAMS.len() {
        let (sk, sig) = key_and_signature(kind);
        let pk = sk.public_key();
        let n = pk.params.n;

        for _ in 0..8 {
            let mut z1 = sig.clone();
            let i = rng.gen_range(0..n);
            z1.z1[i] ^= 1 << rng.gen_range(0..4);
            assert_ne!(verify_status(&pk, MESSAGE, &z1), VERIFY_SUCCESS);

            let mut z2 = sig.clone();
            let i = rng.gen_range(0..n);
            z2.z2[i] += if rng.gen::<bool>() { 1 } else { -1 };
            assert_ne!(verify_status(&pk, MESSAGE, &z2), VERIFY_SUCCESS);

            let mut c = sig.clone();
            let i = rng.gen_range(0..c.c.len());
            c.c[i] = (c.c[i] + rng.gen_range(1..n as u32)) % n as u32;
            assert_ne!(verify_status(&pk, MESSAGE, &c), VERIFY_SUCCESS);
        }
    }
}

#[test]
fn test_signature_from_other_key_rejected() {
    let (_, sig) = key_and_signature(1);
    let mut entropy = Entropy::new(&[7u8; 64]).unwrap();
    let other = generate_private_key(ALL_PARAMS[1], &mut entropy).unwrap();
    assert_ne!(verify_status(&other.public_key(), MESSAGE, &sig), VERIFY_SUCCESS);
}

#[test]
fn test_encodings_through_public_api() {
    for kind in [0, 2, 4] {
        let (sk, sig) = key_and_signature(kind);

        let sk2 = decode_private_key(&encode_private_key(&sk)).unwrap();
        assert_eq!(sk2.public_key(), sk.public_key());

        let pk = decode_public_key(&encode_public_key(&sk.public_key())).unwrap();
        let sig2 = decode_signature(&encode_signature(&sig).unwrap()).unwrap();
        assert_eq!(verify_status(&pk, MESSAGE, &sig2), VERIFY_SUCCESS);

        // A signature re-signed with the decoded key verifies too.
        let mut entropy = Entropy::new(&[kind as u8; 64]).unwrap();
        let sig3 = sign(&sk2, b"decoded key", &mut entropy).unwrap();
        assert_eq!(verify(&pk, b"decoded key", &sig3), Ok(()));
    }
}
