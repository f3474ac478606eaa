//! Quasi-Poisson rate-ratio test
//!
//! Count-outcome significance test: does the event rate (events per
//! subject, may exceed 1) of a test arm differ from control? The
//! quasi-Poisson model permits overdispersion through a caller-supplied
//! factor φ ≥ 1: variance = mean × φ, so φ = 1 is the true Poisson model.
//! φ is configuration, never estimated from the data here.
//!
//! The effect size lives on the log scale: the test statistic is the log
//! rate ratio ln(λ2/λ1) over its standard error, and the confidence
//! interval is built on the log scale, exponentiated, and reported as a
//! relative change (`exp(bound) − 1`).

use tracing::debug;

use crate::kernel::{ConfidenceInterval, PairwiseTestResult};
use crate::normal;

/// Two-tailed quasi-Poisson test of H0: λ1 = λ2
///
/// `x` are event totals, `n` subject counts. A zero control rate makes the
/// log rate ratio undefined; the result carries non-finite values rather
/// than a fault.
pub fn pairwise(x1: f64, n1: f64, x2: f64, n2: f64, dispersion: f64) -> PairwiseTestResult {
    let lambda1 = x1 / n1;
    let lambda2 = x2 / n2;

    let var1 = lambda1 * dispersion;
    let var2 = lambda2 * dispersion;
    let se1 = (var1 / n1).sqrt();
    let se2 = (var2 / n2).sqrt();

    let log_rr = (lambda2 / lambda1).ln();
    let se_log_rr = ((se1 / lambda1).powi(2) + (se2 / lambda2).powi(2)).sqrt();

    let z_score = log_rr / se_log_rr;
    let p_value = normal::two_tailed_p(z_score);

    if !p_value.is_finite() {
        debug!(x1, n1, x2, n2, "degenerate rate-ratio test: undefined log rate ratio");
    }

    PairwiseTestResult {
        z_score,
        p_value,
        rate_control: lambda1,
        rate_test: lambda2,
    }
}

/// Confidence interval for the rate ratio λ2/λ1, reported as relative change
///
/// Built on the log scale then exponentiated and re-centered: bounds are
/// `exp(logRR ± z_crit · se_logRR) − 1`, i.e. fractional change in rate
/// (0.10 = rate up 10%).
pub fn confidence_interval(
    lambda1: f64,
    n1: f64,
    lambda2: f64,
    n2: f64,
    dispersion: f64,
    confidence_percent: f64,
) -> ConfidenceInterval {
    let var1 = lambda1 * dispersion;
    let var2 = lambda2 * dispersion;
    let se1 = (var1 / n1).sqrt();
    let se2 = (var2 / n2).sqrt();

    let log_rr = (lambda2 / lambda1).ln();
    let se_log_rr = ((se1 / lambda1).powi(2) + (se2 / lambda2).powi(2)).sqrt();

    let z_crit = normal::z_critical(confidence_percent);
    ConfidenceInterval {
        lower: (log_rr - z_crit * se_log_rr).exp() - 1.0,
        upper: (log_rr + z_crit * se_log_rr).exp() - 1.0,
    }
}

/// Required sample size per variant to detect λ2 vs λ1
///
/// Same structural formula as the proportion family but with the log-scale
/// effect: `n = ceil((z_α + z_β)² (var1/λ1² + var2/λ2²) / ln(λ2/λ1)²)`.
/// Higher φ inflates the numerator linearly, so heavily overdispersed data
/// needs proportionally more subjects. `None` for a zero or degenerate
/// effect.
pub fn sample_size(lambda1: f64, lambda2: f64, dispersion: f64, alpha: f64, beta: f64) -> Option<u64> {
    if lambda1 <= 0.0 || lambda2 <= 0.0 || !lambda1.is_finite() || !lambda2.is_finite() {
        debug!(lambda1, lambda2, "sample size undefined: degenerate rates");
        return None;
    }
    let log_rr = (lambda2 / lambda1).ln();
    if log_rr == 0.0 {
        debug!(lambda1, lambda2, "sample size undefined: no effect to detect");
        return None;
    }

    let z_alpha = normal::inv_cdf(1.0 - alpha / 2.0);
    let z_beta = normal::inv_cdf(1.0 - beta);

    let var1 = lambda1 * dispersion;
    let var2 = lambda2 * dispersion;
    let numerator =
        (z_alpha + z_beta).powi(2) * (var1 / (lambda1 * lambda1) + var2 / (lambda2 * lambda2));
    let n = (numerator / log_rr.powi(2)).ceil();
    if n.is_finite() && n >= 0.0 {
        Some(n as u64)
    } else {
        None
    }
}
