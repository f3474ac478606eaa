//! Structured configuration errors
//!
//! The engine itself is total: degenerate statistics surface as `None` or
//! non-finite floats rather than errors, because inputs arrive from live
//! editing and are transiently invalid. `ConfigError` exists for callers
//! that want to validate a configuration up front and report the offending
//! field.

use crate::constants::{MAX_DISPERSION, MAX_VARIANTS, MIN_DISPERSION, MIN_VARIANTS};

/// Validation failure for a [`TestConfiguration`](crate::TestConfiguration)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("number_of_variants must be in [{MIN_VARIANTS}, {MAX_VARIANTS}], got {0}")]
    VariantCountOutOfRange(usize),

    #[error("confidence_level must be in (0, 100), got {0}")]
    ConfidenceOutOfRange(f64),

    #[error("power_level must be in (0, 100), got {0}")]
    PowerOutOfRange(f64),

    #[error("dispersion_factor must be in [{MIN_DISPERSION}, {MAX_DISPERSION}], got {0}")]
    DispersionOutOfRange(f64),

    #[error("days_of_data must be positive and finite, got {0}")]
    InvalidDaysOfData(f64),
}
