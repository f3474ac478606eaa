//! Display-boundary formatting
//!
//! All clamping to display-friendly bounds happens here and only here: the
//! engine's raw numbers are never clamped. Non-finite values — the
//! degenerate-statistics sentinels — render as a placeholder dash instead
//! of leaking `NaN` into a report.

use crate::constants::{
    CONFIDENCE_DISPLAY_CEILING, P_VALUE_DISPLAY_FLOOR, SUMMARY_NEAR_BAND, SUMMARY_WEAK_BAND,
};
use crate::kernel::ConfidenceInterval;
use crate::observation::VariantLabel;

/// Rendered in place of any undefined or non-finite statistic
pub const PLACEHOLDER: &str = "-";

/// P-value with four decimals, floored at the display precision
pub fn p_value(p: f64) -> String {
    if !p.is_finite() {
        return PLACEHOLDER.to_string();
    }
    if p < P_VALUE_DISPLAY_FLOOR {
        return format!("<{P_VALUE_DISPLAY_FLOOR}");
    }
    format!("{p:.4}")
}

/// Confidence percentage with two decimals, capped at the display ceiling
pub fn confidence(percent: f64) -> String {
    if !percent.is_finite() {
        return PLACEHOLDER.to_string();
    }
    if percent > CONFIDENCE_DISPLAY_CEILING {
        return format!(">{CONFIDENCE_DISPLAY_CEILING}%");
    }
    format!("{percent:.2}%")
}

/// Fraction as a percentage, two decimals: 0.065 → "6.50%"
pub fn percentage(fraction: f64) -> String {
    if !fraction.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{:.2}%", fraction * 100.0)
}

/// Fraction as a signed percentage: 0.015 → "+1.50%", -0.01 → "-1.00%"
pub fn signed_percent(fraction: f64) -> String {
    if !fraction.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let percent = fraction * 100.0;
    if percent >= 0.0 {
        format!("+{percent:.2}%")
    } else {
        format!("{percent:.2}%")
    }
}

/// Confidence interval as a signed percent range: "+0.12% to +2.88%"
pub fn interval(ci: &ConfidenceInterval) -> String {
    if !ci.is_defined() {
        return PLACEHOLDER.to_string();
    }
    format!("{} to {}", signed_percent(ci.lower), signed_percent(ci.upper))
}

/// Four-band plain-language verdict for the leading-variant comparison
///
/// Bands relative to the target confidence level: meets it; within 5
/// points below; within 15 points below; further below. The p-value is
/// phrased as the percent chance the observed difference is random.
pub fn confidence_summary(
    leader: VariantLabel,
    comparison: VariantLabel,
    confidence_percent: f64,
    p_value: f64,
    target_percent: f64,
) -> String {
    let chance_of_randomness = format!("{:.1}", p_value * 100.0);
    let pair = format!("Variant {leader} vs {comparison}");

    if confidence_percent >= target_percent {
        format!(
            "{pair}: The observed difference has only a {chance_of_randomness}% likelihood of \
             being due to random chance. This meets your {target_percent}% confidence threshold."
        )
    } else if confidence_percent >= target_percent - SUMMARY_NEAR_BAND {
        format!(
            "{pair}: There's a {chance_of_randomness}% likelihood this difference is due to \
             random chance. Very close to your {target_percent}% threshold - consider collecting \
             more data."
        )
    } else if confidence_percent >= target_percent - SUMMARY_WEAK_BAND {
        format!(
            "{pair}: There's a {chance_of_randomness}% likelihood this difference is due to \
             random chance. Some evidence of a difference, but not yet conclusive at your \
             {target_percent}% threshold."
        )
    } else {
        format!(
            "{pair}: There's a {chance_of_randomness}% likelihood this difference is due to \
             random chance. Insufficient evidence of a meaningful difference at your \
             {target_percent}% confidence level."
        )
    }
}
