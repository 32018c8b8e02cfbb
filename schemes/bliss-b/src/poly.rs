//! Integer polynomial helpers for BLISS-B.
//!
//! Polynomials are plain `[i32]` slices of length n. Everything here is
//! coefficient-wise except the norms and inner product; ring products
//! live in [`crate::ntt`].

/// Squared L2 norm.
pub fn norm2(a: &[i32]) -> i64 {
    a.iter().map(|&x| x as i64 * x as i64).sum()
}

/// Infinity norm (max absolute coefficient).
///
/// Total over `i32`, including `i32::MIN`.
pub fn max_norm(a: &[i32]) -> i64 {
    a.iter().map(|&x| x.unsigned_abs() as i64).max().unwrap_or(0)
}

/// Inner product of two coefficient vectors.
pub fn inner_product(a: &[i32], b: &[i32]) -> i64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(&x, &y)| x as i64 * y as i64).sum()
}

/// Coefficient-wise sum.
pub fn add(a: &[i32], b: &[i32]) -> Vec<i32> {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(&x, &y)| x + y).collect()
}

/// Coefficient-wise difference.
pub fn sub(a: &[i32], b: &[i32]) -> Vec<i32> {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(&x, &y)| x - y).collect()
}

/// Reduces every coefficient into `[0, m)`.
pub fn mod_positive(a: &[i32], m: i32) -> Vec<i32> {
    a.iter().map(|&x| x.rem_euclid(m)).collect()
}

/// Drops the low `d` bits of every coefficient, rounding half up.
///
/// `output[i] = (input[i] + 2^(d-1)) / 2^d` with the quotient truncated
/// toward zero. The map is monotone. For non-negative sums
/// `|output[i] * 2^d - input[i]| <= 2^(d-1)`, and for negative inputs
/// `|output[i]| <= |input[i]| / 2^d`. Only the first
/// `min(output.len(), input.len())` coefficients are written.
pub fn drop_bits(output: &mut [i32], input: &[i32], d: u32) {
    if d == 0 {
        for (o, &x) in output.iter_mut().zip(input) {
            *o = x;
        }
        return;
    }
    let delta = 1i64 << d;
    let half = delta >> 1;
    for (o, &x) in output.iter_mut().zip(input) {
        *o = ((x as i64 + half) / delta) as i32;
    }
}

/// Allocating form of [`drop_bits`].
pub fn dropped(input: &[i32], d: u32) -> Vec<i32> {
    let mut out = vec![0i32; input.len()];
    drop_bits(&mut out, input, d);
    out
}

/// Multiplies every coefficient by `2^d`, the approximate inverse of
/// [`drop_bits`].
pub fn mul_2d(a: &[i32], d: u32) -> Vec<i32> {
    a.iter().map(|&x| x << d).collect()
}

/// Maps every coefficient to its representative modulo `p` in
/// `[-p/2, p/2)`.
///
/// Inputs are assumed to lie in `(-p - p/2, p + p/2)`, which holds for
/// the difference of two reduced dropped values.
pub fn bound_by_p(a: &[i32], p: i32) -> Vec<i32> {
    a.iter()
        .map(|&x| {
            if x < -p / 2 {
                x + p
            } else if x >= p / 2 {
                x - p
            } else {
                x
            }
        })
        .collect()
}
