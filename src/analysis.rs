//! Analysis engine
//!
//! The one entry point callers use: [`analyze`] takes an input record
//! (configuration plus per-variant observations) and an active
//! [`TestKind`], and returns the full report — per-variant significance,
//! variant ranking, sample-size/duration projection, and the
//! leading-variant comparison.
//!
//! Every invocation is an independent, deterministic computation over its
//! arguments; nothing is cached or shared between calls.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TestConfiguration;
use crate::constants::MONTHLY_PROJECTION_DAYS;
use crate::correction;
use crate::format;
use crate::kernel::{ConfidenceInterval, TestKind};
use crate::observation::{VariantLabel, VariantObservation};

/// Input record for one computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestInput {
    pub config: TestConfiguration,
    /// Variants in use, control (A) included
    pub variants: Vec<VariantObservation>,
}

impl TestInput {
    /// Build an input record; observations are sorted into canonical label
    /// order so downstream tie-breaks are deterministic regardless of how
    /// the caller assembled the vector
    pub fn new(config: TestConfiguration, mut variants: Vec<VariantObservation>) -> Self {
        variants.sort_by_key(|v| v.label);
        Self { config, variants }
    }

    pub fn control(&self) -> Option<&VariantObservation> {
        self.variants.iter().find(|v| v.label.is_control())
    }

    pub fn test_variants(&self) -> impl Iterator<Item = &VariantObservation> {
        self.variants.iter().filter(|v| !v.label.is_control())
    }

    fn get(&self, label: VariantLabel) -> Option<&VariantObservation> {
        self.variants.iter().find(|v| v.label == label)
    }
}

/// Per-variant significance against control
///
/// Control itself carries `None` in every comparison field: it is never
/// tested against itself, and renders as a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantSignificance {
    pub label: VariantLabel,
    /// Observed rate; `None` when the variant has no visitors
    pub rate: Option<f64>,
    pub z_score: Option<f64>,
    /// Two-tailed p-value, Bonferroni-corrected when enabled (may be
    /// non-finite for degenerate inputs)
    pub p_value: Option<f64>,
    /// Informal confidence score, `(1 − p) × 100`
    pub confidence_percent: Option<f64>,
    /// Relative lift over the control rate
    pub lift_vs_control: Option<f64>,
    /// Conversions gained over control at this variant's observed traffic
    pub extra_conversions: Option<f64>,
}

/// Sample-size and duration projection from the best test variant vs control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationProjection {
    /// Best-performing test variant (highest rate, control excluded)
    pub best_variant: VariantLabel,
    /// Required visitors per variant from power analysis
    pub sample_size_per_variant: u64,
    /// Whole days of enrollment needed at the observed traffic rate
    pub days_needed: f64,
    /// Days still to collect, floored at zero
    pub days_remaining: f64,
}

/// Comparison statistics for the leading variant
///
/// The leader is compared against control, or against the runner-up test
/// variant when control itself leads. The pairwise test is oriented
/// comparison → leader in both families, so a positive z-score and
/// interval favor the leader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadingVariantReport {
    pub label: VariantLabel,
    pub comparison_label: VariantLabel,
    pub z_score: f64,
    /// Corrected when enabled, like the per-variant p-values
    pub p_value: f64,
    pub confidence_percent: f64,
    pub interval: ConfidenceInterval,
    /// Relative lift over the overall runner-up (second in the ranking)
    pub lift_vs_runner_up: Option<f64>,
    /// Relative lift over control; `None` when the leader is control
    pub lift_vs_control: Option<f64>,
    /// Extra conversions projected over a 30-day full rollout at the
    /// observed combined traffic rate
    pub projected_monthly_extra: Option<f64>,
    /// Four-band natural-language verdict relative to the target confidence
    pub summary: String,
}

/// Everything one computation produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub kind: TestKind,
    /// One entry per variant in use, canonical order, control included
    pub per_variant: Vec<VariantSignificance>,
    /// Variants ordered by descending rate (undefined rates excluded);
    /// exact ties keep canonical A–E order
    pub ranking: Vec<VariantLabel>,
    pub duration: Option<DurationProjection>,
    pub leading: Option<LeadingVariantReport>,
}

/// Run the full analysis pipeline
///
/// `kind` selects the statistical family; for the quasi-Poisson family the
/// caller passes the configured dispersion:
/// `TestKind::PoissonRate { dispersion: input.config.dispersion_factor }`.
///
/// Total over all inputs: degenerate statistics come back as `None` or
/// non-finite floats, never as a panic.
pub fn analyze(input: &TestInput, kind: TestKind) -> AnalysisReport {
    debug!(
        variants = input.variants.len(),
        ?kind,
        correction = input.config.correction_enabled,
        "running analysis"
    );

    let per_variant = per_variant_significance(input, kind);
    let ranking = rank_by_rate(input);
    let duration = duration_projection(input, kind);
    let leading = leading_report(input, kind, &ranking);

    AnalysisReport {
        kind,
        per_variant,
        ranking,
        duration,
        leading,
    }
}

fn per_variant_significance(input: &TestInput, kind: TestKind) -> Vec<VariantSignificance> {
    let config = &input.config;
    let k = config.comparisons();
    let control = input.control();
    let control_rate = control.and_then(|c| c.rate());

    input
        .variants
        .iter()
        .map(|variant| {
            if variant.label.is_control() {
                return VariantSignificance {
                    label: variant.label,
                    rate: variant.rate(),
                    z_score: None,
                    p_value: None,
                    confidence_percent: None,
                    lift_vs_control: None,
                    extra_conversions: None,
                };
            }

            let result = control.map(|c| kind.pairwise(c, variant));
            let p_value = result.map(|r| {
                correction::adjust_p_value(r.p_value, k, config.correction_enabled)
            });

            VariantSignificance {
                label: variant.label,
                rate: variant.rate(),
                z_score: result.map(|r| r.z_score),
                p_value,
                confidence_percent: p_value.map(|p| (1.0 - p) * 100.0),
                lift_vs_control: control_rate.and_then(|cr| variant.lift_over(cr)),
                extra_conversions: control_rate.and_then(|cr| variant.extra_conversions_over(cr)),
            }
        })
        .collect()
}

/// Rank variants by descending rate; strict comparison so exact ties keep
/// the canonical first-encountered order
fn rank_by_rate(input: &TestInput) -> Vec<VariantLabel> {
    let mut rated: Vec<(VariantLabel, f64)> = input
        .variants
        .iter()
        .filter_map(|v| v.rate().map(|r| (v.label, r)))
        .collect();
    // Stable sort on an already canonically ordered vector
    rated.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    rated.into_iter().map(|(label, _)| label).collect()
}

fn duration_projection(input: &TestInput, kind: TestKind) -> Option<DurationProjection> {
    let config = &input.config;
    let control_rate = input.control().and_then(|c| c.rate())?;

    // Best test variant: highest defined rate, control excluded,
    // first-encountered wins exact ties
    let best = input
        .test_variants()
        .filter_map(|v| v.rate().map(|r| (v, r)))
        .fold(None::<(&VariantObservation, f64)>, |acc, (v, r)| match acc {
            Some((_, best_rate)) if best_rate >= r => acc,
            _ => Some((v, r)),
        })?;
    let (best_variant, best_rate) = best;

    let alpha = correction::adjust_alpha(
        config.alpha(),
        config.comparisons(),
        config.correction_enabled,
    );
    let sample_size = kind.sample_size(control_rate, best_rate, alpha, config.beta())?;

    let total_visitors: u64 = input.variants.iter().map(|v| v.visitors).sum();
    let avg_visitors_per_variant = total_visitors as f64 / config.number_of_variants as f64;
    let traffic_per_variant_per_day = avg_visitors_per_variant / config.days_of_data;
    if !(traffic_per_variant_per_day > 0.0) || !traffic_per_variant_per_day.is_finite() {
        debug!("duration undefined: no observed traffic");
        return None;
    }

    let days_needed = (sample_size as f64 / traffic_per_variant_per_day).ceil();
    let days_remaining = (days_needed - config.days_of_data).max(0.0);

    Some(DurationProjection {
        best_variant: best_variant.label,
        sample_size_per_variant: sample_size,
        days_needed,
        days_remaining,
    })
}

fn leading_report(
    input: &TestInput,
    kind: TestKind,
    ranking: &[VariantLabel],
) -> Option<LeadingVariantReport> {
    let config = &input.config;
    let leader_label = *ranking.first()?;
    let leader = input.get(leader_label)?;

    // Compare against control, or against the best test variant when
    // control itself leads
    let comparison_label = if leader_label.is_control() {
        *ranking.iter().find(|l| !l.is_control())?
    } else {
        VariantLabel::CONTROL
    };
    let comparison = input.get(comparison_label)?;

    let result = kind.pairwise(comparison, leader);
    let k = config.comparisons();
    let p_value = correction::adjust_p_value(result.p_value, k, config.correction_enabled);
    let confidence_percent = (1.0 - p_value) * 100.0;

    let interval = kind.confidence_interval(comparison, leader, config.confidence_level);

    let runner_up_rate = ranking
        .get(1)
        .and_then(|l| input.get(*l))
        .and_then(|v| v.rate());
    let lift_vs_runner_up = runner_up_rate.and_then(|r| leader.lift_over(r));

    let control_rate = input.control().and_then(|c| c.rate());
    let lift_vs_control = if leader_label.is_control() {
        None
    } else {
        control_rate.and_then(|cr| leader.lift_over(cr))
    };

    let projected_monthly_extra = monthly_extra(input, leader, comparison);

    let summary = format::confidence_summary(
        leader_label,
        comparison_label,
        confidence_percent,
        p_value,
        config.confidence_level,
    );

    Some(LeadingVariantReport {
        label: leader_label,
        comparison_label,
        z_score: result.z_score,
        p_value,
        confidence_percent,
        interval,
        lift_vs_runner_up,
        lift_vs_control,
        projected_monthly_extra,
        summary,
    })
}

/// Extra conversions over a 30-day window if the leader rolled out to the
/// combined observed traffic of all arms
fn monthly_extra(
    input: &TestInput,
    leader: &VariantObservation,
    comparison: &VariantObservation,
) -> Option<f64> {
    let leader_rate = leader.rate()?;
    let comparison_rate = comparison.rate()?;
    let total_visitors: u64 = input.variants.iter().map(|v| v.visitors).sum();
    let traffic_per_day = total_visitors as f64 / input.config.days_of_data;
    let monthly_traffic = traffic_per_day * MONTHLY_PROJECTION_DAYS;
    let extra = (leader_rate - comparison_rate) * monthly_traffic;
    extra.is_finite().then_some(extra)
}
