//! Testwise — A/B-test statistical significance engine
//!
//! Pure-computation inference engine for split tests: given observation
//! counts for a control variant (A) and up to four test variants (B–E),
//! compute p-values, informal confidence scores, confidence intervals,
//! required sample size, and test-duration projections.
//!
//! # Test families
//! - Two-proportion Z-test for binary outcomes (converted / didn't)
//! - Quasi-Poisson rate-ratio test for count outcomes, with a
//!   caller-supplied dispersion factor φ ≥ 1
//!
//! # Design
//! - Synchronous, deterministic, no shared state: every call is a pure
//!   function of its input record
//! - Degenerate statistics (zero standard error, zero effect) surface as
//!   `None` or non-finite floats, never as panics
//! - Display concerns (placeholder dashes, `<0.0001`, `>99.99%`) live at
//!   the formatting boundary, not inside the math

pub mod analysis;
pub mod config;
pub mod constants;
pub mod correction;
pub mod errors;
pub mod format;
pub mod kernel;
pub mod normal;
pub mod observation;
pub mod poisson;
pub mod ztest;

pub use analysis::{
    analyze, AnalysisReport, DurationProjection, LeadingVariantReport, TestInput,
    VariantSignificance,
};
pub use config::TestConfiguration;
pub use errors::ConfigError;
pub use kernel::{ConfidenceInterval, PairwiseTestResult, TestKind};
pub use observation::{VariantLabel, VariantObservation};
