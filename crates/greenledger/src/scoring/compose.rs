use serde::{Deserialize, Serialize};

use super::clamp_score;
use super::esg::EsgAssessment;
use super::weights::ScoringWeights;

/// Carbon credit position aggregated by the external ledger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreditsBalance {
    pub earned: f64,
    pub redeemed: f64,
}

impl CreditsBalance {
    pub fn balance(&self) -> f64 {
        (self.earned - self.redeemed).max(0.0)
    }
}

/// Ambient weather/air-quality reading from the external provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextReading {
    pub temperature_c: f64,
    pub humidity_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_quality_index: Option<f64>,
}

/// The four factor scores feeding the composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreenScoreFactors {
    pub carbon_efficiency: f64,
    pub waste_management: f64,
    pub energy_usage: f64,
    pub compliance: f64,
}

impl GreenScoreFactors {
    fn mean(&self) -> f64 {
        (self.carbon_efficiency + self.waste_management + self.energy_usage + self.compliance)
            / 4.0
    }
}

/// Final output of the scoring pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreenScoreResult {
    pub overall: u8,
    pub factors: GreenScoreFactors,
    pub recommendations: Vec<String>,
}

const START_TRACKING_RECOMMENDATION: &str =
    "Start tracking ESG data to build an accurate sustainability score.";
const CARBON_RECOMMENDATION: &str =
    "Reduce scope emissions to improve carbon efficiency.";
const WASTE_RECOMMENDATION: &str =
    "Increase recycling rates to strengthen waste management.";
const ENERGY_RECOMMENDATION: &str =
    "Shift more consumption to renewable energy sources.";
const COMPLIANCE_RECOMMENDATION: &str =
    "Review safety practices and complete ESG reporting.";
const AIR_QUALITY_RECOMMENDATION: &str =
    "Local air quality is poor; consider filtration or adjusted operations to reduce exposure.";

/// Compose the overall green score from the ESG assessment, the credit
/// balance, and the ambient context reading.
///
/// Recommendations accumulate in a fixed evaluation order (environmental,
/// waste, energy, compliance, weather) so output ordering is deterministic.
pub fn compose_green_score(
    esg: Option<&EsgAssessment>,
    credits: Option<&CreditsBalance>,
    context: &ContextReading,
    weights: &ScoringWeights,
) -> GreenScoreResult {
    let mut recommendations = Vec::new();

    let factors = match esg {
        Some(assessment) => {
            let inputs = &assessment.inputs;

            let carbon_efficiency = clamp_score(
                100.0 - inputs.total_emissions_t() * weights.carbon_efficiency_decay,
            );
            let waste_management = clamp_score(inputs.recycle_ratio() * 100.0);
            let energy_usage = clamp_score(inputs.renewable_or_neutral(weights));
            let incident_rate =
                f64::from(inputs.safety_incidents) / f64::from(inputs.employee_count.max(1));
            let compliance =
                clamp_score(100.0 - incident_rate * weights.compliance_incident_weight);

            if carbon_efficiency < weights.carbon_efficiency_floor {
                recommendations.push(CARBON_RECOMMENDATION.to_string());
            }
            if waste_management < weights.waste_management_floor {
                recommendations.push(WASTE_RECOMMENDATION.to_string());
            }
            if energy_usage < weights.energy_usage_floor {
                recommendations.push(ENERGY_RECOMMENDATION.to_string());
            }
            if compliance < weights.compliance_floor {
                recommendations.push(COMPLIANCE_RECOMMENDATION.to_string());
            }

            GreenScoreFactors {
                carbon_efficiency,
                waste_management,
                energy_usage,
                compliance,
            }
        }
        None => {
            // The only branch allowed to substitute hardcoded factors.
            recommendations.push(START_TRACKING_RECOMMENDATION.to_string());
            GreenScoreFactors {
                carbon_efficiency: weights.default_carbon_efficiency,
                waste_management: weights.default_waste_management,
                energy_usage: weights.default_energy_usage,
                compliance: weights.default_compliance,
            }
        }
    };

    let credits_bonus = credits
        .map(|position| {
            (position.balance() / weights.credits_per_bonus_point).min(weights.credits_bonus_cap)
        })
        .unwrap_or(0.0);

    let weather_adjustment = match context.air_quality_index {
        Some(aqi) if aqi > weights.aqi_poor_threshold => {
            recommendations.push(AIR_QUALITY_RECOMMENDATION.to_string());
            -weights.poor_air_penalty
        }
        Some(aqi) if aqi < weights.aqi_good_threshold => weights.clean_air_bonus,
        _ => 0.0,
    };

    let overall =
        clamp_score((factors.mean() + credits_bonus + weather_adjustment).round()) as u8;

    GreenScoreResult {
        overall,
        factors,
        recommendations,
    }
}
