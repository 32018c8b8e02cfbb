//! Serialization and deserialization for BLISS-B keys and signatures.
//!
//! Every encoding starts with one byte holding the parameter-set kind,
//! followed by bit-packed coefficients (big-endian bit order, the last
//! byte zero-padded on the right):
//! - Private keys: `s1 + 2` and `g + 2` in 3 bits each, where
//!   `s2 = 2g - 1`. The public part is recomputed on decode.
//! - Public keys: `a` (NTT form) in `q_bits` each.
//! - Signatures: `z1` as sign and magnitude, `z2 + p/2`, then `c` in
//!   `n_bits` per index. Widths are fixed by the parameter set.

use zeroize::Zeroize;

use crate::error::{BlissError, Result};
use crate::keygen::{derive_public, PrivateKey, PublicKey};
use crate::ntt::NttContext;
use crate::params::{resolve, Params};
use crate::sign::Signature;

// ============================================================================
// Bit packing
// ============================================================================

/// Accumulates values of arbitrary bit width into a byte vector.
#[derive(Debug, Default)]
pub struct BitPacker {
    data: Vec<u8>,
    bits: usize,
}

impl BitPacker {
    /// Creates an empty packer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the low `nbits` of `code`, most significant bit first.
    pub fn write_bits(&mut self, code: u64, nbits: u32) {
        debug_assert!(nbits <= 64);
        for i in (0..nbits).rev() {
            if self.bits % 8 == 0 {
                self.data.push(0);
            }
            let bit = ((code >> i) & 1) as u8;
            let last = self.data.len() - 1;
            self.data[last] |= bit << (7 - self.bits % 8);
            self.bits += 1;
        }
    }

    /// Number of bits written so far.
    pub fn len_bits(&self) -> usize {
        self.bits
    }

    /// Returns the packed bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Reads values of arbitrary bit width back out of a packed byte slice.
#[derive(Debug)]
pub struct BitUnpacker<'a> {
    data: &'a [u8],
    pos: usize,
    size: usize,
}

impl<'a> BitUnpacker<'a> {
    /// Creates an unpacker over the first `size` bits of `data`.
    pub fn new(data: &'a [u8], size: usize) -> Result<Self> {
        if size > data.len() * 8 {
            return Err(BlissError::DecodingError {
                context: "bit length exceeds buffer",
            });
        }
        Ok(BitUnpacker { data, pos: 0, size })
    }

    /// Bits left to read.
    pub fn remaining(&self) -> usize {
        self.size - self.pos
    }

    /// Reads `nbits` bits as an unsigned integer, first bit most significant.
    pub fn read_bits(&mut self, nbits: u32) -> Result<u64> {
        if self.remaining() < nbits as usize {
            return Err(BlissError::DecodingError {
                context: "not enough bits left",
            });
        }
        let mut ret = 0u64;
        for _ in 0..nbits {
            let byte = self.data[self.pos / 8];
            let bit = (byte >> (7 - self.pos % 8)) & 1;
            ret = (ret << 1) | bit as u64;
            self.pos += 1;
        }
        Ok(ret)
    }
}

/// Number of bits needed to write every value in `0..=max`.
fn bit_len(max: u64) -> u32 {
    (u64::BITS - max.leading_zeros()).max(1)
}

fn z1_width(params: &Params) -> u32 {
    bit_len(params.b_inf as u64) + 1
}

fn z2_width(params: &Params) -> u32 {
    bit_len((params.p - 1) as u64)
}

/// Reads the kind byte and resolves it.
fn read_kind(bytes: &[u8]) -> Result<&'static Params> {
    let kind = *bytes.first().ok_or(BlissError::DecodingError { context: "empty input" })?;
    resolve(kind as u32).map_err(|_| BlissError::DecodingError { context: "unknown kind" })
}

fn expect_len(bytes: &[u8], bits: usize, context: &'static str) -> Result<()> {
    if bytes.len() != 1 + (bits + 7) / 8 {
        return Err(BlissError::DecodingError { context });
    }
    Ok(())
}

// ============================================================================
// Private Key Encoding
// ============================================================================

/// Encodes a private key.
///
/// Format: kind byte, then `s1[i] + 2` for all i, then `g[i] + 2`, 3 bits
/// each.
pub fn encode_private_key(sk: &PrivateKey) -> Vec<u8> {
    let mut packer = BitPacker::new();
    for &x in &sk.s1 {
        packer.write_bits((x + 2) as u64, 3);
    }
    packer.write_bits(((sk.s2[0] + 1) / 2 + 2) as u64, 3);
    for &x in &sk.s2[1..] {
        packer.write_bits((x / 2 + 2) as u64, 3);
    }
    let mut out = vec![sk.params.kind];
    out.extend_from_slice(&packer.into_bytes());
    out
}

/// Decodes a private key and recomputes its public polynomial.
pub fn decode_private_key(bytes: &[u8]) -> Result<PrivateKey> {
    let params = read_kind(bytes)?;
    let n = params.n;
    expect_len(bytes, 6 * n, "private key length")?;
    let mut unpacker = BitUnpacker::new(&bytes[1..], 6 * n)?;

    let mut s1 = Vec::with_capacity(n);
    for _ in 0..n {
        let x = unpacker.read_bits(3)? as i32 - 2;
        if x > 2 {
            return Err(BlissError::DecodingError { context: "s1 coefficient out of range" });
        }
        s1.push(x);
    }
    let mut s2 = Vec::with_capacity(n);
    for i in 0..n {
        let g = unpacker.read_bits(3)? as i32 - 2;
        if g > 2 {
            return Err(BlissError::DecodingError { context: "g coefficient out of range" });
        }
        s2.push(if i == 0 { 2 * g - 1 } else { 2 * g });
    }

    let ctx = NttContext::new(params);
    match derive_public(&ctx, &s1, &s2) {
        Some(a) => Ok(PrivateKey { params, s1, s2, a }),
        None => {
            s1.zeroize();
            s2.zeroize();
            Err(BlissError::DecodingError { context: "s1 is not invertible" })
        }
    }
}

// ============================================================================
// Public Key Encoding
// ============================================================================

/// Encodes a public key: kind byte, then each `a[i]` in `q_bits` bits.
pub fn encode_public_key(pk: &PublicKey) -> Vec<u8> {
    let mut packer = BitPacker::new();
    for &x in &pk.a {
        packer.write_bits(x as u64, pk.params.q_bits);
    }
    let mut out = vec![pk.params.kind];
    out.extend_from_slice(&packer.into_bytes());
    out
}

/// Decodes a public key.
pub fn decode_public_key(bytes: &[u8]) -> Result<PublicKey> {
    let params = read_kind(bytes)?;
    let bits = params.n * params.q_bits as usize;
    expect_len(bytes, bits, "public key length")?;
    let mut unpacker = BitUnpacker::new(&bytes[1..], bits)?;
    let mut a = Vec::with_capacity(params.n);
    for _ in 0..params.n {
        let x = unpacker.read_bits(params.q_bits)? as i32;
        if x >= params.q {
            return Err(BlissError::DecodingError { context: "coefficient not reduced mod q" });
        }
        a.push(x);
    }
    Ok(PublicKey { params, a })
}

// ============================================================================
// Signature Encoding
// ============================================================================

/// Encodes a signature.
///
/// Format: kind byte, then for each i a sign bit and `|z1[i]|`, then
/// `z2[i] + p/2`, then each challenge index in `n_bits` bits.
///
/// Fails if a component lies outside the range a valid signature can
/// take, since the fixed-width fields could not represent it.
pub fn encode_signature(sig: &Signature) -> Result<Vec<u8>> {
    let params = sig.params;
    let z1w = z1_width(params);
    let z2w = z2_width(params);
    let half_p = params.p / 2;

    let mut packer = BitPacker::new();
    for &x in &sig.z1 {
        if x.unsigned_abs() > params.b_inf as u32 {
            return Err(BlissError::InvalidInput { field: "z1", reason: "exceeds B_inf" });
        }
        let sign = (x < 0) as u64;
        packer.write_bits((sign << (z1w - 1)) | x.unsigned_abs() as u64, z1w);
    }
    for &x in &sig.z2 {
        if !(-half_p..params.p - half_p).contains(&x) {
            return Err(BlissError::InvalidInput { field: "z2", reason: "outside [-p/2, p/2)" });
        }
        packer.write_bits((x + half_p) as u64, z2w);
    }
    for &index in &sig.c {
        if index as usize >= params.n {
            return Err(BlissError::InvalidInput { field: "c", reason: "index out of range" });
        }
        packer.write_bits(index as u64, params.n_bits);
    }

    let mut out = vec![params.kind];
    out.extend_from_slice(&packer.into_bytes());
    Ok(out)
}

/// Decodes a signature.
pub fn decode_signature(bytes: &[u8]) -> Result<Signature> {
    let params = read_kind(bytes)?;
    let n = params.n;
    let z1w = z1_width(params);
    let z2w = z2_width(params);
    let bits = n * (z1w + z2w) as usize + params.kappa * params.n_bits as usize;
    expect_len(bytes, bits, "signature length")?;
    let mut unpacker = BitUnpacker::new(&bytes[1..], bits)?;

    let mut z1 = Vec::with_capacity(n);
    for _ in 0..n {
        let raw = unpacker.read_bits(z1w)?;
        let magnitude = (raw & ((1 << (z1w - 1)) - 1)) as i32;
        if magnitude > params.b_inf {
            return Err(BlissError::DecodingError { context: "z1 exceeds B_inf" });
        }
        z1.push(if raw >> (z1w - 1) == 1 { -magnitude } else { magnitude });
    }
    let mut z2 = Vec::with_capacity(n);
    for _ in 0..n {
        let raw = unpacker.read_bits(z2w)? as i32;
        if raw >= params.p {
            return Err(BlissError::DecodingError { context: "z2 out of range" });
        }
        z2.push(raw - params.p / 2);
    }
    let mut c = Vec::with_capacity(params.kappa);
    for _ in 0..params.kappa {
        c.push(unpacker.read_bits(params.n_bits)? as u32);
    }

    Signature::from_components(params, z1, z2, c)
}

/// Encodes bytes to a lowercase hexadecimal string.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::Entropy;
    use crate::keygen::generate_private_key;
    use crate::params::{BLISS_B_0, BLISS_B_3};
    use crate::sign::sign;
    use crate::verify::verify;

    #[test]
    fn test_bit_packer_layout() {
        let mut packer = BitPacker::new();
        packer.write_bits(0b101, 3);
        packer.write_bits(0b1, 1);
        packer.write_bits(0xabc, 12);
        assert_eq!(packer.len_bits(), 16);
        let bytes = packer.into_bytes();
        assert_eq!(bytes, vec![0b1011_1010, 0xbc]);

        let mut unpacker = BitUnpacker::new(&bytes, 16).unwrap();
        assert_eq!(unpacker.read_bits(3).unwrap(), 0b101);
        assert_eq!(unpacker.read_bits(1).unwrap(), 1);
        assert_eq!(unpacker.read_bits(12).unwrap(), 0xabc);
        assert!(unpacker.read_bits(1).is_err());
    }

    #[test]
    fn test_unpacker_rejects_oversized_length() {
        assert!(BitUnpacker::new(&[0u8; 2], 17).is_err());
    }

    #[test]
    fn test_private_key_decode_recovers_public_part() {
        let mut entropy = Entropy::deterministic();
        let sk = generate_private_key(&BLISS_B_3, &mut entropy).unwrap();
        let bytes = encode_private_key(&sk);
        assert_eq!(bytes.len(), 1 + 6 * 512 / 8);
        let decoded = decode_private_key(&bytes).unwrap();
        assert_eq!(decoded.s1, sk.s1);
        assert_eq!(decoded.s2, sk.s2);
        assert_eq!(decoded.a, sk.a);
    }

    #[test]
    fn test_public_key_and_signature_decode_verifies() {
        let mut entropy = Entropy::deterministic();
        let sk = generate_private_key(&BLISS_B_0, &mut entropy).unwrap();
        let sig = sign(&sk, b"packed", &mut entropy).unwrap();

        let pk = decode_public_key(&encode_public_key(&sk.public_key())).unwrap();
        let sig_bytes = encode_signature(&sig).unwrap();
        let decoded = decode_signature(&sig_bytes).unwrap();
        assert_eq!(decoded, sig);
        assert_eq!(verify(&pk, b"packed", &decoded), Ok(()));
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        assert!(decode_public_key(&[]).is_err());
        assert!(decode_public_key(&[9, 0, 0]).is_err());
        assert!(decode_signature(&[0, 1, 2]).is_err());
        let mut entropy = Entropy::deterministic();
        let sk = generate_private_key(&BLISS_B_0, &mut entropy).unwrap();
        let mut bytes = encode_public_key(&sk.public_key());
        bytes.pop();
        assert!(decode_public_key(&bytes).is_err());
    }

    #[test]
    fn test_hex() {
        assert_eq!(to_hex(&[0x00, 0xab, 0x10]), "00ab10");
    }
}
