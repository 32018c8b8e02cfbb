//! Modular arithmetic in Z_q for a runtime prime q.
//!
//! The BLISS-B parameter sets use two different primes (7681 and 12289),
//! so the modulus is passed explicitly instead of being a crate constant.
//! Products of two reduced values fit in i64 without overflow.

/// Reduces `x` into `[0, q)`.
#[inline]
pub fn reduce(x: i64, q: i32) -> i32 {
    let r = (x % q as i64) as i32;
    if r < 0 {
        r + q
    } else {
        r
    }
}

/// Computes `a * b mod q`, result in `[0, q)`.
#[inline]
pub fn mul_mod(a: i32, b: i32, q: i32) -> i32 {
    reduce(a as i64 * b as i64, q)
}

/// Computes `base^exp mod q` using square-and-multiply.
///
/// Not constant-time with respect to `exp`; every exponent used in this
/// crate is public.
pub fn pow_mod(base: i32, mut exp: u64, q: i32) -> i32 {
    let q64 = q as i64;
    let mut result = 1i64;
    let mut b = reduce(base as i64, q) as i64;

    while exp > 0 {
        if exp & 1 == 1 {
            result = result * b % q64;
        }
        b = b * b % q64;
        exp >>= 1;
    }

    result as i32
}

/// Computes the inverse of `a` modulo the prime `q` (Fermat).
///
/// Returns `None` when `a ≡ 0 (mod q)`.
pub fn inv_mod(a: i32, q: i32) -> Option<i32> {
    let a = reduce(a as i64, q);
    if a == 0 {
        return None;
    }
    Some(pow_mod(a, (q - 2) as u64, q))
}

/// Distinct prime factors of `m`, by trial division.
fn prime_factors(mut m: u64) -> Vec<u64> {
    let mut factors = Vec::new();
    let mut f = 2u64;
    while f * f <= m {
        if m % f == 0 {
            factors.push(f);
            while m % f == 0 {
                m /= f;
            }
        }
        f += 1;
    }
    if m > 1 {
        factors.push(m);
    }
    factors
}

/// Finds the smallest generator of the multiplicative group Z_q*.
///
/// `g` generates the group iff `g^((q-1)/f) != 1` for every prime
/// factor `f` of `q - 1`.
pub fn find_generator(q: i32) -> i32 {
    let order = (q - 1) as u64;
    let factors = prime_factors(order);
    (2..q)
        .find(|&g| factors.iter().all(|&f| pow_mod(g, order / f, q) != 1))
        .unwrap_or(1)
}

/// Returns a primitive `2n`-th root of unity `psi` in Z_q.
///
/// Requires `2n | q - 1`, which every parameter set satisfies.
pub fn primitive_root_2n(q: i32, n: usize) -> i32 {
    debug_assert_eq!((q - 1) as usize % (2 * n), 0);
    let g = find_generator(q);
    pow_mod(g, ((q - 1) as usize / (2 * n)) as u64, q)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_negative() {
        assert_eq!(reduce(-1, 12289), 12288);
        assert_eq!(reduce(-12289, 12289), 0);
        assert_eq!(reduce(7681 * 3 + 5, 7681), 5);
    }

    #[test]
    fn test_inverse() {
        for q in [7681, 12289] {
            for a in [1, 2, 3, 100, q - 1] {
                let inv = inv_mod(a, q).unwrap();
                assert_eq!(mul_mod(a, inv, q), 1);
            }
            assert_eq!(inv_mod(0, q), None);
            assert_eq!(inv_mod(q, q), None);
        }
    }

    #[test]
    fn test_known_generators() {
        // 11 is the smallest primitive root of 12289, 17 of 7681.
        assert_eq!(find_generator(12289), 11);
        assert_eq!(find_generator(7681), 17);
    }

    #[test]
    fn test_root_of_unity_order() {
        for (q, n) in [(7681, 256usize), (12289, 512usize)] {
            let psi = primitive_root_2n(q, n);
            assert_eq!(pow_mod(psi, 2 * n as u64, q), 1);
            // psi^n = -1 makes it a primitive 2n-th root
            assert_eq!(pow_mod(psi, n as u64, q), q - 1);
        }
    }
}
