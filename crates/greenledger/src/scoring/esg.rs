use serde::{Deserialize, Serialize};

use super::weights::ScoringWeights;
use super::{clamp_score, round_dp};

/// Raw ESG survey submission. Numeric fields that were never reported are
/// `None`; an explicit zero means the reporter claims zero, and the two are
/// deliberately not conflated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EsgInputs {
    #[serde(default)]
    pub scope1_emissions_t: f64,
    #[serde(default)]
    pub scope2_emissions_t: f64,
    #[serde(default)]
    pub scope3_emissions_t: f64,
    #[serde(default)]
    pub waste_generated_t: f64,
    #[serde(default)]
    pub waste_recycled_t: f64,
    #[serde(default)]
    pub renewable_energy_percent: Option<f64>,
    #[serde(default)]
    pub employee_count: u32,
    #[serde(default)]
    pub safety_incidents: u32,
    #[serde(default)]
    pub diversity_score: Option<f64>,
    #[serde(default)]
    pub report_name: String,
    #[serde(default)]
    pub reporting_period: String,
}

impl EsgInputs {
    /// Whether the submission carries any signal at all. Callers that want
    /// to suppress scoring of empty submissions check this before invoking
    /// the calculator; the calculator itself stays total.
    pub fn has_data(&self) -> bool {
        self.scope1_emissions_t > 0.0
            || self.scope2_emissions_t > 0.0
            || self.scope3_emissions_t > 0.0
            || self.waste_generated_t > 0.0
            || self.waste_recycled_t > 0.0
            || self.renewable_energy_percent.is_some()
            || self.employee_count > 0
            || self.safety_incidents > 0
            || self.diversity_score.is_some()
            || !self.report_name.trim().is_empty()
            || !self.reporting_period.trim().is_empty()
    }

    pub fn total_emissions_t(&self) -> f64 {
        self.scope1_emissions_t + self.scope2_emissions_t + self.scope3_emissions_t
    }

    pub fn recycle_ratio(&self) -> f64 {
        self.waste_recycled_t / self.waste_generated_t.max(1.0)
    }

    /// Renewable percentage with the neutral stand-in for unset/zero input.
    pub fn renewable_or_neutral(&self, weights: &ScoringWeights) -> f64 {
        match self.renewable_energy_percent {
            Some(percent) if percent > 0.0 => clamp_score(percent),
            _ => weights.renewable_neutral_percent,
        }
    }

    fn diversity_or_neutral(&self, weights: &ScoringWeights) -> f64 {
        match self.diversity_score {
            Some(score) => clamp_score(score),
            None => weights.diversity_neutral_score,
        }
    }

    fn reporting_complete(&self) -> bool {
        !self.report_name.trim().is_empty() && !self.reporting_period.trim().is_empty()
    }
}

/// The three ESG sub-scores and their mean, all bounded to [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EsgScoreResult {
    pub environmental: f64,
    pub social: f64,
    pub governance: f64,
    pub overall: f64,
}

/// The inputs together with the scores they produced. The green score
/// composer needs both: factor derivation reads the raw inputs, not the
/// sub-scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EsgAssessment {
    pub inputs: EsgInputs,
    pub scores: EsgScoreResult,
}

impl EsgAssessment {
    pub fn new(inputs: EsgInputs, weights: &ScoringWeights) -> Self {
        let scores = score_esg(&inputs, weights);
        Self { inputs, scores }
    }
}

/// Compute the three ESG sub-scores.
///
/// Total over its domain: out-of-range numerics are clamped, missing
/// optionals fall back to their neutral defaults, and no input combination
/// raises an error.
pub fn score_esg(inputs: &EsgInputs, weights: &ScoringWeights) -> EsgScoreResult {
    let emission_base = clamp_score(
        100.0 - inputs.scope1_emissions_t * weights.scope1_penalty_per_tonne,
    );
    let renewable_share = inputs.renewable_or_neutral(weights) / 100.0;
    let recycle_bonus = inputs.recycle_ratio() * weights.recycle_ratio_bonus;
    let environmental = clamp_score(emission_base * renewable_share + recycle_bonus);

    let social = clamp_score(
        weights.social_baseline - f64::from(inputs.safety_incidents) * weights.incident_penalty
            + inputs.diversity_or_neutral(weights) * weights.diversity_weight,
    );

    // Binary completeness signal: reporting quality is not graded yet.
    let governance = if inputs.reporting_complete() {
        weights.governance_complete
    } else {
        weights.governance_incomplete
    };

    let overall = round_dp((environmental + social + governance) / 3.0, 2);

    EsgScoreResult {
        environmental,
        social,
        governance,
        overall,
    }
}
