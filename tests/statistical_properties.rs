//! Property-based checks of the statistical algebra
//!
//! Randomized counterparts to the documented properties: null results for
//! equal rates, swap symmetry, Bonferroni ordering, interval bracketing,
//! and sample-size monotonicity.

use proptest::prelude::*;
use testwise::{correction, poisson, ztest};

/// Arms with visitors and a conversion count no larger than visitors
fn binary_arm() -> impl Strategy<Value = (u64, u64)> {
    (10u64..50_000).prop_flat_map(|n| (0..=n).prop_map(move |x| (x, n)))
}

proptest! {
    #[test]
    fn equal_proportions_are_null((x, n) in binary_arm()) {
        let result = ztest::pairwise(x as f64, n as f64, x as f64, n as f64);
        if result.is_defined() {
            prop_assert_eq!(result.z_score, 0.0);
            prop_assert!((result.p_value - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn equal_rates_are_null_under_poisson(
        (x, n) in binary_arm(),
        phi in 1.0f64..10.0,
    ) {
        let result = poisson::pairwise(x as f64, n as f64, x as f64, n as f64, phi);
        if result.is_defined() {
            prop_assert_eq!(result.z_score, 0.0);
            prop_assert!((result.p_value - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn swapping_arms_preserves_p_and_flips_z(
        (x1, n1) in binary_arm(),
        (x2, n2) in binary_arm(),
    ) {
        let a = ztest::pairwise(x1 as f64, n1 as f64, x2 as f64, n2 as f64);
        let b = ztest::pairwise(x2 as f64, n2 as f64, x1 as f64, n1 as f64);
        if a.is_defined() && b.is_defined() {
            prop_assert!((a.z_score + b.z_score).abs() < 1e-9);
            prop_assert!((a.p_value - b.p_value).abs() < 1e-9);
        }
    }

    #[test]
    fn bonferroni_orders_and_caps(raw in 0.0f64..=1.0, k in 1usize..=4) {
        let adjusted = correction::adjust_p_value(raw, k, true);
        prop_assert!(adjusted >= raw);
        prop_assert!(adjusted <= 1.0);
        prop_assert!((adjusted - (raw * k as f64).min(1.0)).abs() < 1e-12);
    }

    #[test]
    fn proportion_interval_brackets_the_estimate(
        (x1, n1) in binary_arm(),
        (x2, n2) in binary_arm(),
        confidence in 80.0f64..99.9,
    ) {
        let p1 = x1 as f64 / n1 as f64;
        let p2 = x2 as f64 / n2 as f64;
        let ci = ztest::confidence_interval(p1, n1 as f64, p2, n2 as f64, confidence);
        let diff = p2 - p1;
        prop_assert!(ci.lower <= diff + 1e-12);
        prop_assert!(diff <= ci.upper + 1e-12);
    }

    #[test]
    fn sample_size_monotone_in_confidence(
        confidence_lo in 80.0f64..95.0,
        bump in 0.5f64..4.9,
    ) {
        let alpha_lo = 1.0 - confidence_lo / 100.0;
        let alpha_hi = 1.0 - (confidence_lo + bump) / 100.0;
        let n_lo = ztest::sample_size(0.05, 0.06, alpha_lo, 0.2).unwrap();
        let n_hi = ztest::sample_size(0.05, 0.06, alpha_hi, 0.2).unwrap();
        prop_assert!(n_hi >= n_lo);
    }

    #[test]
    fn sample_size_monotone_in_power(
        power_lo in 50.0f64..90.0,
        bump in 0.5f64..9.9,
    ) {
        let beta_lo = 1.0 - power_lo / 100.0;
        let beta_hi = 1.0 - (power_lo + bump) / 100.0;
        let n_lo = ztest::sample_size(0.05, 0.06, 0.05, beta_lo).unwrap();
        let n_hi = ztest::sample_size(0.05, 0.06, 0.05, beta_hi).unwrap();
        prop_assert!(n_hi >= n_lo);
    }

    #[test]
    fn poisson_sample_size_monotone_in_dispersion(
        phi_lo in 1.0f64..5.0,
        bump in 0.5f64..5.0,
    ) {
        let n_lo = poisson::sample_size(0.2, 0.26, phi_lo, 0.05, 0.2).unwrap();
        let n_hi = poisson::sample_size(0.2, 0.26, phi_lo + bump, 0.05, 0.2).unwrap();
        prop_assert!(n_hi >= n_lo);
    }

    #[test]
    fn corrected_p_stays_in_unit_interval_through_the_test(
        (x1, n1) in binary_arm(),
        (x2, n2) in binary_arm(),
        k in 1usize..=4,
    ) {
        let result = ztest::pairwise(x1 as f64, n1 as f64, x2 as f64, n2 as f64);
        if result.is_defined() {
            let adjusted = correction::adjust_p_value(result.p_value, k, true);
            prop_assert!((0.0..=1.0).contains(&adjusted));
        }
    }
}
