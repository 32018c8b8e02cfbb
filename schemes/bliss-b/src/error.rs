//! Error types for BLISS-B.

use std::fmt;

/// Verification result code for an accepted signature.
pub const VERIFY_SUCCESS: i32 = 0;

/// Verification result code for a signature that fails a norm bound or
/// whose challenge does not match the recomputed one.
pub const VERIFY_FAILED: i32 = 1;

/// Verification result code for structurally invalid signature data.
pub const VERIFY_BAD_DATA: i32 = -2;

/// Verification result code for a signature produced under another
/// parameter set than the public key.
pub const VERIFY_BAD_ARGS: i32 = -3;

/// Specific reasons why signature verification failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationFailure {
    /// `max |z1[i]|` exceeds `B_inf`.
    Z1MaxNorm,
    /// `max |z2[i] * 2^d|` exceeds `B_inf`.
    Z2MaxNorm,
    /// The combined squared L2 norm exceeds `B_2^2`.
    L2Norm,
    /// The recomputed challenge differs from the one carried by the signature.
    ChallengeMismatch,
}

impl fmt::Display for VerificationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationFailure::Z1MaxNorm => write!(f, "z1 max norm too large"),
            VerificationFailure::Z2MaxNorm => write!(f, "z2 max norm too large"),
            VerificationFailure::L2Norm => write!(f, "(z1, z2) L2 norm too large"),
            VerificationFailure::ChallengeMismatch => write!(f, "challenge mismatch"),
        }
    }
}

/// Errors that can occur during BLISS-B operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlissError {
    /// Signature verification failed with a specific reason.
    VerificationFailed(VerificationFailure),

    /// The signature components are structurally invalid.
    MalformedSignature {
        /// Description of what is wrong with the signature.
        reason: &'static str,
    },

    /// Key and signature belong to different parameter sets.
    ParameterMismatch {
        /// Kind of the key.
        expected: u8,
        /// Kind of the signature.
        found: u8,
    },

    /// The requested parameter-set kind does not exist.
    UnknownKind {
        /// The rejected kind.
        kind: u32,
    },

    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: &'static str,
        /// Description of why the input is invalid.
        reason: &'static str,
    },

    /// Key generation failed.
    KeygenFailed {
        /// Description of why keygen failed.
        reason: &'static str,
    },

    /// Signing failed.
    SigningFailed {
        /// Description of why signing failed.
        reason: &'static str,
    },

    /// The Gaussian sampler could not be built for the parameter set.
    SamplerInit {
        /// Description of the failure.
        reason: &'static str,
    },

    /// Error decoding data.
    DecodingError {
        /// Context about what was being decoded.
        context: &'static str,
    },
}

impl BlissError {
    /// Maps this error onto the integer verification result code.
    ///
    /// Errors that verification never produces map to [`VERIFY_BAD_ARGS`].
    pub fn verify_code(&self) -> i32 {
        match self {
            BlissError::VerificationFailed(_) => VERIFY_FAILED,
            BlissError::MalformedSignature { .. } => VERIFY_BAD_DATA,
            _ => VERIFY_BAD_ARGS,
        }
    }
}

impl fmt::Display for BlissError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlissError::VerificationFailed(reason) => {
                write!(f, "signature verification failed: {}", reason)
            }
            BlissError::MalformedSignature { reason } => {
                write!(f, "malformed signature: {}", reason)
            }
            BlissError::ParameterMismatch { expected, found } => write!(
                f,
                "parameter set mismatch: key is kind {}, signature is kind {}",
                expected, found
            ),
            BlissError::UnknownKind { kind } => {
                write!(f, "unknown parameter set kind {} (expected 0..=4)", kind)
            }
            BlissError::InvalidInput { field, reason } => {
                write!(f, "invalid {}: {}", field, reason)
            }
            BlissError::KeygenFailed { reason } => write!(f, "key generation failed: {}", reason),
            BlissError::SigningFailed { reason } => write!(f, "signing failed: {}", reason),
            BlissError::SamplerInit { reason } => {
                write!(f, "sampler initialization failed: {}", reason)
            }
            BlissError::DecodingError { context } => write!(f, "decoding error: {}", context),
        }
    }
}

impl std::error::Error for BlissError {}

/// Result type alias for BLISS-B operations.
pub type Result<T> = std::result::Result<T, BlissError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            format!("{}", BlissError::UnknownKind { kind: 7 }),
            "unknown parameter set kind 7 (expected 0..=4)"
        );
        assert_eq!(
            format!(
                "{}",
                BlissError::VerificationFailed(VerificationFailure::ChallengeMismatch)
            ),
            "signature verification failed: challenge mismatch"
        );
        assert_eq!(
            format!("{}", BlissError::KeygenFailed { reason: "no invertible s1" }),
            "key generation failed: no invertible s1"
        );
    }

    #[test]
    fn test_verify_codes() {
        let failed = BlissError::VerificationFailed(VerificationFailure::L2Norm);
        assert_eq!(failed.verify_code(), VERIFY_FAILED);
        let bad = BlissError::MalformedSignature { reason: "index out of range" };
        assert_eq!(bad.verify_code(), VERIFY_BAD_DATA);
        let mismatch = BlissError::ParameterMismatch { expected: 0, found: 1 };
        assert_eq!(mismatch.verify_code(), VERIFY_BAD_ARGS);
    }

    #[test]
    fn test_error_is_error_trait() {
        let err: Box<dyn std::error::Error> =
            Box::new(BlissError::SigningFailed { reason: "|v|^2 >= M" });
        assert!(err.to_string().contains("signing failed"));
    }
}
