//! Documented constants for the significance engine
//!
//! All tunable parameters live here with justification for their values.
//! Centralizing constants prevents magic numbers and makes tuning easier.

// =============================================================================
// VARIANT BOUNDS
// =============================================================================

/// Minimum number of variants in a test (control plus one test arm)
///
/// A single-arm "test" has nothing to compare against; every statistic in
/// this crate is pairwise.
pub const MIN_VARIANTS: usize = 2;

/// Maximum number of variants in a test (control A plus test arms B–E)
///
/// Five arms is the practical ceiling for the Bonferroni-corrected designs
/// this engine supports: with k = 4 comparisons a 95% target already
/// requires per-comparison p < 0.0125, and sample-size requirements grow
/// roughly linearly in k.
pub const MAX_VARIANTS: usize = 5;

// =============================================================================
// DISPERSION (QUASI-POISSON)
// =============================================================================

/// Minimum dispersion factor φ
///
/// φ = 1.0 is the true Poisson model (variance = mean). Values below 1
/// (underdispersion) are out of scope; the quasi-Poisson family here only
/// inflates variance.
pub const MIN_DISPERSION: f64 = 1.0;

/// Maximum dispersion factor φ
///
/// φ = 10.0 models extreme overdispersion where a small fraction of
/// subjects drives most activity. Beyond that the aggregate-count model
/// stops being informative and the data set should be segmented instead.
pub const MAX_DISPERSION: f64 = 10.0;

// =============================================================================
// DISPLAY CLAMPS
// =============================================================================
// Applied only at the formatting boundary; raw values inside the engine are
// never clamped.

/// P-values below this render as "<0.0001"
pub const P_VALUE_DISPLAY_FLOOR: f64 = 0.0001;

/// Confidence percentages above this render as ">99.99%"
pub const CONFIDENCE_DISPLAY_CEILING: f64 = 99.99;

// =============================================================================
// SUMMARY BANDS
// =============================================================================

/// Width (in confidence points below target) of the "very close" band
///
/// Within 5 points of the target the difference is usually one more batch
/// of traffic away from significance, so the summary recommends collecting
/// more data rather than calling the test.
pub const SUMMARY_NEAR_BAND: f64 = 5.0;

/// Width (in confidence points below target) of the "some evidence" band
///
/// Between 5 and 15 points below target there is directional evidence but
/// nothing conclusive.
pub const SUMMARY_WEAK_BAND: f64 = 15.0;

// =============================================================================
// PROJECTIONS
// =============================================================================

/// Days in the monthly extra-conversions projection window
pub const MONTHLY_PROJECTION_DAYS: f64 = 30.0;
