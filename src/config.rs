//! Test configuration

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_DISPERSION, MAX_VARIANTS, MIN_DISPERSION, MIN_VARIANTS};
use crate::errors::ConfigError;

/// Configuration for one computation, immutable once built
///
/// The engine assumes these preconditions hold but stays total if they
/// don't; [`TestConfiguration::validate`] is for callers that want to
/// reject bad input before invoking it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestConfiguration {
    /// Variants in use, control included (2–5)
    pub number_of_variants: usize,
    /// Target confidence level in percent, e.g. 95.0
    pub confidence_level: f64,
    /// Target statistical power in percent, e.g. 80.0
    pub power_level: f64,
    /// Apply Bonferroni correction to p-values and to the sample-size alpha
    pub correction_enabled: bool,
    /// Quasi-Poisson dispersion factor φ (1.0 = true Poisson); ignored by
    /// the proportion family
    pub dispersion_factor: f64,
    /// Days of data collected so far, used for duration projection
    pub days_of_data: f64,
}

impl Default for TestConfiguration {
    fn default() -> Self {
        Self {
            number_of_variants: 2,
            confidence_level: 95.0,
            power_level: 80.0,
            correction_enabled: false,
            dispersion_factor: 1.0,
            days_of_data: 7.0,
        }
    }
}

impl TestConfiguration {
    pub fn builder() -> TestConfigurationBuilder {
        TestConfigurationBuilder::default()
    }

    /// Number of test arms compared against control (the Bonferroni k)
    pub fn comparisons(&self) -> usize {
        self.number_of_variants.saturating_sub(1)
    }

    /// Significance level implied by the target confidence
    pub fn alpha(&self) -> f64 {
        1.0 - self.confidence_level / 100.0
    }

    /// Type-II error rate implied by the target power
    pub fn beta(&self) -> f64 {
        1.0 - self.power_level / 100.0
    }

    /// Check every field against its documented range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_VARIANTS..=MAX_VARIANTS).contains(&self.number_of_variants) {
            return Err(ConfigError::VariantCountOutOfRange(self.number_of_variants));
        }
        if !self.confidence_level.is_finite()
            || self.confidence_level <= 0.0
            || self.confidence_level >= 100.0
        {
            return Err(ConfigError::ConfidenceOutOfRange(self.confidence_level));
        }
        if !self.power_level.is_finite() || self.power_level <= 0.0 || self.power_level >= 100.0 {
            return Err(ConfigError::PowerOutOfRange(self.power_level));
        }
        if !self.dispersion_factor.is_finite()
            || !(MIN_DISPERSION..=MAX_DISPERSION).contains(&self.dispersion_factor)
        {
            return Err(ConfigError::DispersionOutOfRange(self.dispersion_factor));
        }
        if !self.days_of_data.is_finite() || self.days_of_data <= 0.0 {
            return Err(ConfigError::InvalidDaysOfData(self.days_of_data));
        }
        Ok(())
    }
}

/// Builder for [`TestConfiguration`]
#[derive(Debug, Default)]
pub struct TestConfigurationBuilder {
    config: Option<TestConfiguration>,
}

impl TestConfigurationBuilder {
    fn config(&mut self) -> &mut TestConfiguration {
        self.config.get_or_insert_with(TestConfiguration::default)
    }

    pub fn number_of_variants(mut self, n: usize) -> Self {
        self.config().number_of_variants = n;
        self
    }

    pub fn confidence_level(mut self, percent: f64) -> Self {
        self.config().confidence_level = percent;
        self
    }

    pub fn power_level(mut self, percent: f64) -> Self {
        self.config().power_level = percent;
        self
    }

    pub fn correction_enabled(mut self, enabled: bool) -> Self {
        self.config().correction_enabled = enabled;
        self
    }

    pub fn dispersion_factor(mut self, phi: f64) -> Self {
        self.config().dispersion_factor = phi;
        self
    }

    pub fn days_of_data(mut self, days: f64) -> Self {
        self.config().days_of_data = days;
        self
    }

    pub fn build(mut self) -> Result<TestConfiguration, ConfigError> {
        let config = self.config().clone();
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_valid() {
        assert!(TestConfiguration::default().validate().is_ok());
    }

    #[test]
    fn builder_rejects_out_of_range_fields() {
        let err = TestConfiguration::builder()
            .number_of_variants(6)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::VariantCountOutOfRange(6));

        let err = TestConfiguration::builder()
            .confidence_level(100.0)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::ConfidenceOutOfRange(100.0));

        let err = TestConfiguration::builder()
            .dispersion_factor(0.5)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::DispersionOutOfRange(0.5));

        let err = TestConfiguration::builder()
            .days_of_data(0.0)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidDaysOfData(0.0));
    }

    #[test]
    fn derived_quantities() {
        let config = TestConfiguration::builder()
            .number_of_variants(4)
            .confidence_level(95.0)
            .power_level(80.0)
            .build()
            .unwrap();
        assert_eq!(config.comparisons(), 3);
        assert!((config.alpha() - 0.05).abs() < 1e-12);
        assert!((config.beta() - 0.20).abs() < 1e-12);
    }

    #[test]
    fn serde_round_trip() {
        let config = TestConfiguration::builder()
            .number_of_variants(3)
            .correction_enabled(true)
            .dispersion_factor(2.5)
            .build()
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let back: TestConfiguration = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
