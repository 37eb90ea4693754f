//! Integer powers of complex numbers by direct binomial expansion.
//!
//! `(a + bi)^d` expands to the sum over `i` of `C(d,i)·a^(d-i)·b^i·i^i`,
//! and the powers of the imaginary unit cycle through `1, i, -1, -i`,
//! so each term's magnitude lands in either the real or the imaginary
//! accumulator with a sign given by `i mod 4`.  This evaluates the
//! power in one pass over the expansion instead of `d` successive
//! complex multiplications.

use num::Complex;

/// The largest exponent `z_pow` accepts.  The binomial coefficient is
/// accumulated as the partial product `d!/(d-k)!` in a `u64`, and that
/// product first exceeds `u64::MAX` at `d = 30`.  Callers are expected
/// to reject larger exponents up front; see `RenderJob`.
pub const MAX_EXPONENT: u32 = 29;

/// n!
fn fact(n: u64) -> u64 {
    (2..=n).product()
}

/// C(n,k).  C(n,k) = C(n,n-k), so work with the smaller of the two.
fn choose(n: u64, k: u64) -> u64 {
    let k = if k > n / 2 { n - k } else { k };
    let numerator: u64 = ((n - k + 1)..=n).product();
    numerator / fact(k)
}

/// Raises `z` to the non-negative integer power `d`.
///
/// The `d == 0` case needs no special handling: the expansion's only
/// term is `C(0,0)·a^0·b^0 = 1`, landing in the real accumulator, so
/// the result is `(1, 0)` by construction.
pub fn z_pow(z: Complex<f64>, d: u32) -> Complex<f64> {
    let mut res = Complex::new(0.0, 0.0);

    for i in 0..=d {
        let delta = choose(u64::from(d), u64::from(i)) as f64
            * z.re.powi((d - i) as i32)
            * z.im.powi(i as i32);
        match i % 4 {
            0 => res.re += delta,
            1 => res.im += delta,
            2 => res.re -= delta,
            _ => res.im -= delta,
        }
    }

    res
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Complex<f64>, b: Complex<f64>) -> bool {
        (a.re - b.re).abs() < 1e-9 && (a.im - b.im).abs() < 1e-9
    }

    #[test]
    fn zeroth_power_is_one() {
        assert_eq!(z_pow(Complex::new(3.7, -2.2), 0), Complex::new(1.0, 0.0));
        assert_eq!(z_pow(Complex::new(0.0, 0.0), 0), Complex::new(1.0, 0.0));
    }

    #[test]
    fn first_power_is_identity() {
        let z = Complex::new(-1.25, 0.75);
        assert_eq!(z_pow(z, 1), z);
    }

    #[test]
    fn one_is_a_fixed_point_of_every_power() {
        let one = Complex::new(1.0, 0.0);
        for d in 0..=MAX_EXPONENT {
            assert_eq!(z_pow(one, d), one);
        }
    }

    #[test]
    fn i_squared_is_minus_one() {
        assert_eq!(z_pow(Complex::new(0.0, 1.0), 2), Complex::new(-1.0, 0.0));
    }

    #[test]
    fn expansion_matches_repeated_multiplication() {
        let z = Complex::new(0.6, -1.1);
        let mut expected = Complex::new(1.0, 0.0);
        for d in 0..8 {
            assert!(
                close(z_pow(z, d), expected),
                "disagreement at d = {}: {:?} vs {:?}",
                d,
                z_pow(z, d),
                expected
            );
            expected = expected * z;
        }
    }

    #[test]
    fn choose_small_values() {
        assert_eq!(choose(0, 0), 1);
        assert_eq!(choose(5, 0), 1);
        assert_eq!(choose(5, 2), 10);
        assert_eq!(choose(5, 3), 10);
        assert_eq!(choose(10, 5), 252);
    }

    #[test]
    fn choose_at_the_supported_ceiling() {
        // The central coefficients are the worst case for the partial
        // product; both of these stay inside u64.
        assert_eq!(choose(28, 14), 40_116_600);
        assert_eq!(choose(u64::from(MAX_EXPONENT), 14), 77_558_760);
    }
}
