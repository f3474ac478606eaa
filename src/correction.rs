//! Bonferroni multiple-comparison correction
//!
//! One shared implementation for both test families: when k test arms are
//! each compared against control, the family-wise error rate is controlled
//! by multiplying each raw p-value by k (capped at 1) and, inside the
//! sample-size calculation, dividing alpha by k. Which raw value is passed
//! in is the only thing that varies by family.

/// Adjust a raw p-value for `comparisons` simultaneous tests
///
/// Identity when correction is disabled or there is at most one comparison.
/// The result is always in [0, 1] for a raw p-value in [0, 1].
pub fn adjust_p_value(raw: f64, comparisons: usize, enabled: bool) -> f64 {
    if !enabled || comparisons <= 1 {
        return raw;
    }
    let scaled = raw * comparisons as f64;
    // Explicit comparison rather than f64::min so NaN propagates
    if scaled > 1.0 {
        1.0
    } else {
        scaled
    }
}

/// Adjust a raw alpha for `comparisons` simultaneous tests
///
/// Used only inside the sample-size calculation; identity when correction
/// is disabled or there is at most one comparison.
pub fn adjust_alpha(raw: f64, comparisons: usize, enabled: bool) -> f64 {
    if !enabled || comparisons <= 1 {
        return raw;
    }
    raw / comparisons as f64
}
