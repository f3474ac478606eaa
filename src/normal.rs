//! Standard-normal primitives
//!
//! Thin wrappers over `statrs` so the rest of the crate never constructs a
//! distribution inline. These are the only transcendental-function
//! dependencies of the engine; `statrs` is numerically stable in the tails,
//! which matters for confidence levels of 99.9%+ and p-values near 1e-6.

use statrs::distribution::{ContinuousCDF, Normal};

fn standard() -> Normal {
    // Parameters are compile-time constants, construction cannot fail.
    Normal::new(0.0, 1.0).expect("standard normal parameters are valid")
}

/// Φ(z): standard-normal cumulative distribution function
pub fn cdf(z: f64) -> f64 {
    if z.is_nan() {
        return f64::NAN;
    }
    standard().cdf(z)
}

/// Φ⁻¹(p): standard-normal quantile for p in (0, 1)
///
/// Out-of-domain p yields NaN (or ±∞ at the endpoints), matching the
/// engine-wide convention of non-finite sentinels over panics.
pub fn inv_cdf(p: f64) -> f64 {
    if p.is_nan() || p < 0.0 || p > 1.0 {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }
    standard().inverse_cdf(p)
}

/// Two-tailed critical value for a confidence level given in percent
///
/// `z_critical(95.0)` ≈ 1.96: the z such that the central
/// `confidence_percent`% of the standard normal lies within ±z.
pub fn z_critical(confidence_percent: f64) -> f64 {
    inv_cdf(1.0 - (1.0 - confidence_percent / 100.0) / 2.0)
}

/// Two-tailed p-value for a z-score: 2·(1 − Φ(|z|))
pub fn two_tailed_p(z: f64) -> f64 {
    if z.is_nan() {
        return f64::NAN;
    }
    2.0 * (1.0 - cdf(z.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn cdf_reference_values() {
        assert!(close(cdf(0.0), 0.5, 1e-12));
        assert!(close(cdf(1.96), 0.975, 1e-4));
        assert!(close(cdf(-1.96), 0.025, 1e-4));
        assert_eq!(cdf(f64::INFINITY), 1.0);
    }

    #[test]
    fn inv_cdf_reference_values() {
        assert!(close(inv_cdf(0.975), 1.959964, 1e-5));
        assert!(close(inv_cdf(0.5), 0.0, 1e-12));
        assert!(close(inv_cdf(0.8), 0.841621, 1e-5));
    }

    #[test]
    fn inv_cdf_round_trips_through_cdf() {
        for &p in &[0.001, 0.025, 0.5, 0.9, 0.999] {
            assert!(close(cdf(inv_cdf(p)), p, 1e-9));
        }
    }

    #[test]
    fn z_critical_matches_textbook() {
        assert!(close(z_critical(95.0), 1.959964, 1e-5));
        assert!(close(z_critical(99.0), 2.575829, 1e-5));
        assert!(close(z_critical(90.0), 1.644854, 1e-5));
    }

    #[test]
    fn tail_stability() {
        // 99.99% confidence and a tiny p-value must stay finite and ordered
        let z = z_critical(99.99);
        assert!(z.is_finite() && z > 3.8);
        let p = two_tailed_p(4.8);
        assert!(p > 0.0 && p < 1e-5);
    }

    #[test]
    fn non_finite_inputs_yield_sentinels() {
        assert!(cdf(f64::NAN).is_nan());
        assert!(inv_cdf(f64::NAN).is_nan());
        assert!(inv_cdf(1.5).is_nan());
        assert!(two_tailed_p(f64::NAN).is_nan());
    }
}
