//! Variant labels and per-variant observations

use serde::{Deserialize, Serialize};

/// Variant identity within one test: control A plus test arms B–E
///
/// The declaration order is the canonical iteration order; every
/// "first-encountered wins" rule in the engine (leading-variant ties in
/// particular) is defined in terms of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VariantLabel {
    A,
    B,
    C,
    D,
    E,
}

impl VariantLabel {
    /// All labels in canonical order
    pub const ALL: [VariantLabel; 5] = [
        VariantLabel::A,
        VariantLabel::B,
        VariantLabel::C,
        VariantLabel::D,
        VariantLabel::E,
    ];

    /// The control arm
    pub const CONTROL: VariantLabel = VariantLabel::A;

    pub fn is_control(self) -> bool {
        self == Self::CONTROL
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VariantLabel::A => "A",
            VariantLabel::B => "B",
            VariantLabel::C => "C",
            VariantLabel::D => "D",
            VariantLabel::E => "E",
        }
    }
}

impl std::fmt::Display for VariantLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw counts observed for one variant
///
/// `conversions` is an integer for binary outcomes and an event total for
/// count outcomes (it may exceed `visitors` under the Poisson family).
/// `conversions <= visitors` for the Z-test is the caller's precondition;
/// the engine does not enforce it and degrades to non-finite statistics if
/// it is violated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariantObservation {
    pub label: VariantLabel,
    pub visitors: u64,
    pub conversions: f64,
}

impl VariantObservation {
    pub fn new(label: VariantLabel, visitors: u64, conversions: f64) -> Self {
        Self {
            label,
            visitors,
            conversions,
        }
    }

    /// Observed rate (proportion or events-per-subject)
    ///
    /// `None` when there are no visitors; no division happens in that case.
    pub fn rate(&self) -> Option<f64> {
        if self.visitors == 0 {
            None
        } else {
            Some(self.conversions / self.visitors as f64)
        }
    }

    /// Relative lift of this variant's rate over a baseline rate
    ///
    /// A zero baseline yields +∞ for any positive rate and 0 when this
    /// variant's rate is also zero.
    pub fn lift_over(&self, baseline_rate: f64) -> Option<f64> {
        let rate = self.rate()?;
        if baseline_rate <= 0.0 {
            if rate > 0.0 {
                return Some(f64::INFINITY);
            }
            return Some(0.0);
        }
        Some((rate - baseline_rate) / baseline_rate)
    }

    /// Conversions gained (or lost) over the observed window relative to a
    /// baseline rate, at this variant's own traffic
    pub fn extra_conversions_over(&self, baseline_rate: f64) -> Option<f64> {
        let rate = self.rate()?;
        Some((rate - baseline_rate) * self.visitors as f64)
    }
}
