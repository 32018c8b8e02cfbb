//! Challenge oracle for BLISS-B.
//!
//! Maps a compressed commitment `u` (coefficients in `[0, p)`) and a
//! message digest to `kappa` distinct indices in `[0, n)`.

use sha3::{Digest, Sha3_512};

/// Oracle attempts before giving up; each bumps the final input byte.
const MAX_TRIES: usize = 256;

/// SHA3-512 digest of a message.
pub fn hash_message(message: &[u8]) -> [u8; 64] {
    let mut out = [0u8; 64];
    out.copy_from_slice(&Sha3_512::digest(message));
    out
}

/// Computes the challenge index set from `u` and the message digest.
///
/// The oracle input is `digest || lo(u[0]) || hi(u[0]) || ...`, hashed
/// with SHA3-512. For n = 256 each digest byte is an index. For n = 512
/// every eighth byte supplies the low bits for the next seven bytes, which
/// give the high eight bits of a 9-bit index. Repeated indices are
/// skipped. If a digest runs dry the last input byte is incremented and
/// the oracle retried.
///
/// Returns `None` if no attempt produced `kappa` distinct indices.
pub fn compute_c(kappa: usize, n: usize, u: &[i32], digest: &[u8; 64]) -> Option<Vec<u32>> {
    let mut data = Vec::with_capacity(digest.len() + 2 * u.len());
    data.extend_from_slice(digest);
    for &x in u {
        data.push((x & 0xff) as u8);
        data.push(((x >> 8) & 0xff) as u8);
    }
    let last = data.len() - 1;

    for _ in 0..MAX_TRIES {
        data[last] = data[last].wrapping_add(1);
        let whash = Sha3_512::digest(&data);
        let mut seen = vec![false; n];
        let mut indices = Vec::with_capacity(kappa);

        let mut take = |index: usize, indices: &mut Vec<u32>| {
            if index < n && !seen[index] {
                seen[index] = true;
                indices.push(index as u32);
            }
            indices.len() >= kappa
        };

        if n <= 256 {
            for &b in whash.iter() {
                if take(b as usize, &mut indices) {
                    return Some(indices);
                }
            }
        } else {
            let mut extra_bits = 0u8;
            let mut j = 0;
            while j < whash.len() {
                if j & 7 == 0 {
                    extra_bits = whash[j];
                    j += 1;
                }
                let index = ((whash[j] as usize) << 1) | (extra_bits & 1) as usize;
                extra_bits >>= 1;
                j += 1;
                if take(index, &mut indices) {
                    return Some(indices);
                }
            }
        }
    }
    None
}
