//! # pqsigs-bliss-b
//!
//! A Rust implementation of BLISS-B, the lattice-based signature scheme of
//! Ducas (2014), together with a deterministic command-line harness that
//! prints keys and signatures as plain-text vectors.
//!
//! ## Overview
//!
//! BLISS (Bimodal Lattice Signature Scheme) is a Fiat-Shamir-with-aborts
//! signature over the ring Z_q[X]/(X^n + 1). The secret key is a pair of
//! sparse polynomials and signing masks `S * c` with discrete Gaussian
//! noise before rejecting to a bimodal distribution. BLISS-B adds the
//! GreedySC sign selection, which shrinks `|S * c|` and with it the
//! rejection rate.
//!
//! All randomness is drawn from an explicit [`Entropy`] source, so keys and
//! signatures are reproducible from a seed.
//!
//! ## Parameter Sets
//!
//! - [`params::BLISS_B_0`]: toy set, n = 256, q = 7681
//! - [`params::BLISS_B_1`]: ~128-bit security, n = 512
//! - [`params::BLISS_B_2`]: ~128-bit security, smaller signatures
//! - [`params::BLISS_B_3`]: ~160-bit security
//! - [`params::BLISS_B_4`]: ~192-bit security
//!
//! ## Security Warning
//!
//! The samplers and the rejection steps are not constant-time, and the
//! Gaussian sampler of BLISS is known to leak through cache timing. Use
//! only for testing, interoperability work and research.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod entropy;
pub mod error;
pub(crate) mod field;
pub mod hash;
pub mod keygen;
pub mod ntt;
pub mod params;
pub mod poly;
pub mod sampler;
pub mod sign;
pub mod vectors;
pub mod verify;

pub mod packing;

// Re-export main types for convenience
pub use entropy::{deterministic_seed, Entropy};
pub use error::{
    BlissError, Result, VerificationFailure, VERIFY_BAD_ARGS, VERIFY_BAD_DATA, VERIFY_FAILED,
    VERIFY_SUCCESS,
};
pub use keygen::{generate_private_key, PrivateKey, PublicKey};
pub use params::{resolve, Params, ALL_PARAMS, BLISS_B_0, BLISS_B_1, BLISS_B_2, BLISS_B_3, BLISS_B_4};
pub use poly::drop_bits;
pub use sampler::Sampler;
pub use sign::{sign, Signature};
pub use vectors::{render, write_vector, TokenReader, VectorError};
pub use verify::{verify, verify_status};

// Re-export packing functions
pub use packing::{
    decode_private_key, decode_public_key, decode_signature, encode_private_key,
    encode_public_key, encode_signature, to_hex,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_available() {
        assert_eq!(BLISS_B_0.n, 256);
        assert_eq!(BLISS_B_1.n, 512);
        assert_eq!(ALL_PARAMS.len(), 5);
    }

    #[test]
    fn test_sign_verify_through_reexports() {
        let mut entropy = Entropy::new(&deterministic_seed()).unwrap();
        let sk = generate_private_key(resolve(0).unwrap(), &mut entropy).unwrap();
        let sig = sign(&sk, b"Hello world", &mut entropy).unwrap();
        assert_eq!(verify_status(&sk.public_key(), b"Hello world", &sig), VERIFY_SUCCESS);
    }
}
