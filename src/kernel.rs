//! Test kernel: the tagged variant both families plug into
//!
//! The two test families share one structural pipeline — pairwise test,
//! correction, confidence interval, sample size — and differ only in the
//! effect-size, variance, and link-function computations. [`TestKind`]
//! carries that difference; `analysis` drives the pipeline once, whichever
//! kind is active.

use serde::{Deserialize, Serialize};

use crate::observation::VariantObservation;
use crate::{poisson, ztest};

/// Result of one pairwise hypothesis test (control vs one test arm)
///
/// Degenerate inputs (zero standard error, zero control rate under the
/// rate-ratio family) make `z_score` and `p_value` non-finite; callers
/// render a placeholder in that case. Nothing here ever panics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairwiseTestResult {
    pub z_score: f64,
    /// Two-tailed, uncorrected
    pub p_value: f64,
    pub rate_control: f64,
    pub rate_test: f64,
}

impl PairwiseTestResult {
    pub fn is_defined(&self) -> bool {
        self.p_value.is_finite()
    }
}

/// Confidence interval on the difference between two arms
///
/// Fractional units: the proportion family reports the absolute difference
/// in proportions, the rate-ratio family the relative change in rate
/// (`exp(log-bound) − 1`). Formatting multiplies by 100 for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    pub fn is_defined(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite()
    }
}

/// Which statistical family a computation runs under
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TestKind {
    /// Two-proportion Z-test for binary outcomes
    Proportion,
    /// Quasi-Poisson rate-ratio test for count outcomes,
    /// variance = mean × dispersion
    PoissonRate { dispersion: f64 },
}

impl TestKind {
    /// Hypothesis test: control vs test arm, two-tailed
    pub fn pairwise(
        &self,
        control: &VariantObservation,
        test: &VariantObservation,
    ) -> PairwiseTestResult {
        match *self {
            TestKind::Proportion => ztest::pairwise(
                control.conversions,
                control.visitors as f64,
                test.conversions,
                test.visitors as f64,
            ),
            TestKind::PoissonRate { dispersion } => poisson::pairwise(
                control.conversions,
                control.visitors as f64,
                test.conversions,
                test.visitors as f64,
                dispersion,
            ),
        }
    }

    /// Interval estimate for the test-arm effect at the given confidence
    pub fn confidence_interval(
        &self,
        control: &VariantObservation,
        test: &VariantObservation,
        confidence_percent: f64,
    ) -> ConfidenceInterval {
        let n1 = control.visitors as f64;
        let n2 = test.visitors as f64;
        let r1 = control.conversions / n1;
        let r2 = test.conversions / n2;
        match *self {
            TestKind::Proportion => ztest::confidence_interval(r1, n1, r2, n2, confidence_percent),
            TestKind::PoissonRate { dispersion } => {
                poisson::confidence_interval(r1, n1, r2, n2, dispersion, confidence_percent)
            }
        }
    }

    /// Required per-variant sample size for the given effect, or `None`
    /// when the effect size is zero or degenerate (nothing to detect)
    pub fn sample_size(
        &self,
        rate_control: f64,
        rate_test: f64,
        alpha: f64,
        beta: f64,
    ) -> Option<u64> {
        match *self {
            TestKind::Proportion => ztest::sample_size(rate_control, rate_test, alpha, beta),
            TestKind::PoissonRate { dispersion } => {
                poisson::sample_size(rate_control, rate_test, dispersion, alpha, beta)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::VariantLabel;

    fn obs(label: VariantLabel, visitors: u64, conversions: f64) -> VariantObservation {
        VariantObservation::new(label, visitors, conversions)
    }

    #[test]
    fn kinds_dispatch_to_their_family() {
        let control = obs(VariantLabel::A, 1000, 50.0);
        let test = obs(VariantLabel::B, 1000, 65.0);

        let z = TestKind::Proportion.pairwise(&control, &test);
        let p = TestKind::PoissonRate { dispersion: 1.0 }.pairwise(&control, &test);

        // Same data, different statistics
        assert!(z.is_defined() && p.is_defined());
        assert!((z.z_score - p.z_score).abs() > 1e-6);
        assert_eq!(z.rate_control, p.rate_control);
    }

    #[test]
    fn equal_rates_are_null_under_both_kinds() {
        let control = obs(VariantLabel::A, 200, 20.0);
        let test = obs(VariantLabel::B, 200, 20.0);
        for kind in [TestKind::Proportion, TestKind::PoissonRate { dispersion: 2.0 }] {
            let result = kind.pairwise(&control, &test);
            assert_eq!(result.z_score, 0.0);
            assert!((result.p_value - 1.0).abs() < 1e-12);
            assert_eq!(kind.sample_size(0.1, 0.1, 0.05, 0.2), None);
        }
    }

    #[test]
    fn serde_tagging_names_the_kind() {
        let json = serde_json::to_string(&TestKind::PoissonRate { dispersion: 2.0 }).unwrap();
        assert!(json.contains("poisson_rate"));
        let back: TestKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TestKind::PoissonRate { dispersion: 2.0 });
    }
}
