//! Two-proportion Z-test
//!
//! Binary-outcome significance test: does the conversion proportion of a
//! test arm differ from control? Always two-tailed.
//!
//! Standard-error convention, deliberately asymmetric and load-bearing:
//! - The hypothesis test uses the **pooled** proportion (valid under H0,
//!   where both arms share one rate).
//! - The confidence interval uses **unpooled** per-arm variances (valid for
//!   estimation, where the true difference is what's being bracketed).
//!
//! Do not unify the two; they answer different questions and both
//! conventions are asserted by tests.

use tracing::debug;

use crate::kernel::{ConfidenceInterval, PairwiseTestResult};
use crate::normal;

/// Two-tailed two-proportion Z-test of H0: p1 = p2
///
/// `x` are conversion counts, `n` visitor counts. A zero pooled variance
/// (both arms all-failures or all-successes) yields a non-finite z-score
/// and a NaN p-value; the caller renders a placeholder.
pub fn pairwise(x1: f64, n1: f64, x2: f64, n2: f64) -> PairwiseTestResult {
    let p1 = x1 / n1;
    let p2 = x2 / n2;

    let p_pooled = (x1 + x2) / (n1 + n2);
    let se = (p_pooled * (1.0 - p_pooled) * (1.0 / n1 + 1.0 / n2)).sqrt();

    let z_score = (p2 - p1) / se;
    let p_value = normal::two_tailed_p(z_score);

    if !p_value.is_finite() {
        debug!(x1, n1, x2, n2, "degenerate z-test: zero pooled standard error");
    }

    PairwiseTestResult {
        z_score,
        p_value,
        rate_control: p1,
        rate_test: p2,
    }
}

/// Confidence interval for the difference in proportions (p2 − p1)
///
/// Unpooled standard error; bounds are fractional differences
/// (0.01 = one percentage point).
pub fn confidence_interval(
    p1: f64,
    n1: f64,
    p2: f64,
    n2: f64,
    confidence_percent: f64,
) -> ConfidenceInterval {
    let diff = p2 - p1;
    let se_unpooled = (p1 * (1.0 - p1) / n1 + p2 * (1.0 - p2) / n2).sqrt();
    let margin = normal::z_critical(confidence_percent) * se_unpooled;
    ConfidenceInterval {
        lower: diff - margin,
        upper: diff + margin,
    }
}

/// Required sample size per variant to detect p2 vs p1
///
/// Power analysis: `n = ceil((z_α + z_β)² (p1(1−p1) + p2(1−p2)) / (p2−p1)²)`.
/// `alpha` is the (possibly Bonferroni-adjusted) two-tailed significance
/// level, `beta` the type-II error rate. `None` when the rates are equal or
/// degenerate — no detectable effect is distinct from a huge one.
pub fn sample_size(p1: f64, p2: f64, alpha: f64, beta: f64) -> Option<u64> {
    let diff = p2 - p1;
    if diff == 0.0 || !diff.is_finite() {
        debug!(p1, p2, "sample size undefined: no effect to detect");
        return None;
    }

    let z_alpha = normal::inv_cdf(1.0 - alpha / 2.0);
    let z_beta = normal::inv_cdf(1.0 - beta);

    let numerator = (z_alpha + z_beta).powi(2) * (p1 * (1.0 - p1) + p2 * (1.0 - p2));
    let n = (numerator / diff.powi(2)).ceil();
    if n.is_finite() && n >= 0.0 {
        Some(n as u64)
    } else {
        None
    }
}
