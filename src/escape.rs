//! Escape-time membership tests.
//!
//! Every map here answers the same question: fed through the
//! iteration, does this point's orbit stay inside a fixed radius for
//! the whole iteration bound, or does it escape, and if so, when?
//! A count of 0 means "never escaped" and classifies the point as a
//! member of the set; any positive count is the iteration at which
//! escape was detected.

use std::f64::consts::PI;

use num::Complex;
use zpow::z_pow;

/// Squared escape radius shared by the power maps.  An orbit whose
/// magnitude exceeds 2 can never return to the Mandelbrot set, so the
/// squared test against 4 avoids the square root.
pub const ESCAPE_RADIUS_SQR: f64 = 4.0;

/// Squared escape radius for the Collatz map, whose orbits wander much
/// further than the power maps before diverging.
pub const COLLATZ_RADIUS_SQR: f64 = 16384.0;

/// The outcome of iterating one point: the iteration at which the
/// orbit escaped (0 when it never did and the point is in the set),
/// and the orbit's value when iteration stopped.  The final value
/// feeds the smooth-coloring correction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Escape {
    /// Iterations until escape; 0 when the point never escaped.
    pub count: u32,
    /// The orbit's value when iteration stopped.
    pub z: Complex<f64>,
}

/// Selects which iterated map classifies a point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Fractal {
    /// `z ← z^d + c`, with `c` fixed at the starting point.
    Multibrot,
    /// `z ← z^d + K` for a constant independent of the starting point.
    Julia(Complex<f64>),
    /// Real and imaginary parts are folded positive before each power.
    BurningShip,
    /// The multibrot of the inverted plane: the starting point is
    /// replaced by its reciprocal once, before iteration begins, so
    /// the orbit runs `z ← z^d + 1/c`.
    InversionMultibrot,
    /// A continuous extension of the Collatz map; ignores the
    /// exponent.
    Collatz,
}

impl Fractal {
    /// Classifies `z` under the selected map with power `d`, giving up
    /// after `max_iterations` passes.
    pub fn escape_time(&self, z: Complex<f64>, d: u32, max_iterations: u32) -> Escape {
        match *self {
            Fractal::Multibrot => multibrot(z, d, max_iterations),
            Fractal::Julia(k) => julia(z, k, d, max_iterations),
            Fractal::BurningShip => ship(z, d, max_iterations),
            Fractal::InversionMultibrot => multibrot(invert(z), d, max_iterations),
            Fractal::Collatz => collatz(z, max_iterations),
        }
    }
}

/// The reciprocal of `z`: conj(z) / |z|².
pub fn invert(z: Complex<f64>) -> Complex<f64> {
    let d = z.norm_sqr();
    Complex::new(z.re / d, -z.im / d)
}

/// Shared loop for the maps that test escape after each step: check
/// the starting point once, then step and re-check until the orbit
/// leaves the radius or the bound is spent.  The counter starts at 1,
/// so a starting point already outside the radius reports count 1
/// without stepping at all.
fn iterate<F>(z0: Complex<f64>, radius_sqr: f64, max_iterations: u32, mut step: F) -> Escape
where
    F: FnMut(Complex<f64>) -> Complex<f64>,
{
    let mut z = z0;
    let mut iteration = 1;
    let mut in_set = z.norm_sqr() <= radius_sqr;

    while in_set && iteration < max_iterations {
        z = step(z);
        iteration += 1;
        in_set = z.norm_sqr() <= radius_sqr;
    }

    Escape {
        count: if in_set { 0 } else { iteration },
        z,
    }
}

/// Membership in the degree-`d` multibrot set.
///
/// Unlike the other maps, this loop records the magnitude of the
/// previous iterate and then unconditionally transforms, so the escape
/// check always lags the orbit by one step and even a starting point
/// far outside the radius is transformed once before being reported.
/// The off-by-one is part of the map's contract; do not "fix" it to
/// match the test-after loops.
pub fn multibrot(z0: Complex<f64>, d: u32, max_iterations: u32) -> Escape {
    let c = z0;
    let mut z = z0;
    let mut iteration = 0;
    let mut result = 0.0;

    while result <= ESCAPE_RADIUS_SQR && iteration < max_iterations {
        result = z.norm_sqr();
        z = z_pow(z, d) + c;
        iteration += 1;
    }

    Escape {
        count: if result <= ESCAPE_RADIUS_SQR { 0 } else { iteration },
        z,
    }
}

/// Membership in the degree-`d` Julia set for the constant `k`.
pub fn julia(z0: Complex<f64>, k: Complex<f64>, d: u32, max_iterations: u32) -> Escape {
    iterate(z0, ESCAPE_RADIUS_SQR, max_iterations, |z| z_pow(z, d) + k)
}

/// Membership in the degree-`d` burning ship fractal.  The fold into
/// the positive quadrant happens before every power, including the
/// first.
pub fn ship(z0: Complex<f64>, d: u32, max_iterations: u32) -> Escape {
    let c = z0;
    iterate(z0, ESCAPE_RADIUS_SQR, max_iterations, |z| {
        z_pow(Complex::new(z.re.abs(), z.im.abs()), d) + c
    })
}

/// Membership in the Collatz fractal.
///
/// `cos(πz)` interpolates the even/odd branch choice of the integer
/// Collatz map, giving the recurrence `(2 + 7z - 2cos(πz) - 5z·cos(πz)) / 4`.
/// The constants 2, 7, 2, 5 and 4 are what make this the Collatz map;
/// they are not tunable.
pub fn collatz(z0: Complex<f64>, max_iterations: u32) -> Escape {
    iterate(z0, COLLATZ_RADIUS_SQR, max_iterations, |z| {
        let cosz = (z * PI).cos();
        (Complex::new(2.0, 0.0) + z * 7.0 - cosz * 2.0 - z * cosz * 5.0) / 4.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_never_leaves_the_mandelbrot_set() {
        assert_eq!(multibrot(Complex::new(0.0, 0.0), 2, 1).count, 0);
        assert_eq!(multibrot(Complex::new(0.0, 0.0), 2, 1000).count, 0);
    }

    #[test]
    fn divergent_point_escapes_immediately() {
        // (2,2) starts outside the radius; the check-before loop still
        // performs one transform and reports the first iteration.
        let escape = multibrot(Complex::new(2.0, 2.0), 2, 50);
        assert_eq!(escape.count, 1);
        assert!(escape.z.norm_sqr() > ESCAPE_RADIUS_SQR);
    }

    #[test]
    fn multibrot_counts_lag_the_orbit_by_one() {
        // c = 0.5+0.5i leaves the radius on the fourth transform but
        // the check-before ordering reports it on the fifth pass.
        assert_eq!(multibrot(Complex::new(0.5, 0.5), 2, 100).count, 5);
    }

    #[test]
    fn julia_with_zero_constant_is_not_the_multibrot() {
        // Under z ← z² the starting point 0.5+0.5i decays to the
        // origin, but the same point escapes under z ← z² + c.
        let z = Complex::new(0.5, 0.5);
        assert_eq!(julia(z, Complex::new(0.0, 0.0), 2, 100).count, 0);
        assert!(multibrot(z, 2, 100).count > 0);
    }

    #[test]
    fn julia_reports_preescaped_points_without_stepping() {
        let z = Complex::new(3.0, 0.0);
        let escape = julia(z, Complex::new(0.25, 0.25), 2, 100);
        assert_eq!(escape.count, 1);
        assert_eq!(escape.z, z);
    }

    #[test]
    fn ship_fold_changes_membership_for_odd_powers() {
        // Odd powers preserve sign, so folding matters: under z³ - 0.5
        // the point -0.5 runs off to infinity, while the folded orbit
        // settles near a fixed point and never escapes.
        let z = Complex::new(-0.5, 0.0);
        assert_eq!(ship(z, 3, 50).count, 0);
        assert_eq!(multibrot(z, 3, 50).count, 6);
    }

    #[test]
    fn collatz_origin_is_a_fixed_point() {
        assert_eq!(collatz(Complex::new(0.0, 0.0), 10_000).count, 0);
    }

    #[test]
    fn collatz_integers_follow_the_integer_map() {
        // 100 → 50 → 25 → 76 → ... → the 4, 2, 1 cycle; integer
        // starting points never escape.
        assert_eq!(collatz(Complex::new(100.0, 0.0), 1000).count, 0);
    }

    #[test]
    fn collatz_escapes_off_the_real_axis() {
        // cosh(3π) is ~6000, so the first step throws the orbit far
        // outside the radius.
        assert_eq!(collatz(Complex::new(0.0, 3.0), 100).count, 2);
    }

    #[test]
    fn inversion_runs_the_multibrot_of_the_reciprocal() {
        let z = Complex::new(0.25, 0.0);
        let inverted = invert(z);
        assert_eq!(inverted, Complex::new(4.0, 0.0));
        assert_eq!(
            Fractal::InversionMultibrot.escape_time(z, 2, 50),
            multibrot(inverted, 2, 50)
        );
    }

    #[test]
    fn invert_conjugates() {
        let inverted = invert(Complex::new(0.0, 2.0));
        assert_eq!(inverted, Complex::new(0.0, -0.5));
    }

    #[test]
    fn counts_never_reach_the_bound_for_in_set_points() {
        for &fractal in &[
            Fractal::Multibrot,
            Fractal::Julia(Complex::new(0.0, 0.0)),
            Fractal::BurningShip,
            Fractal::Collatz,
        ] {
            assert_eq!(fractal.escape_time(Complex::new(0.0, 0.0), 2, 25).count, 0);
        }
    }
}
