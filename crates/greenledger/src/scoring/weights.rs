use serde::{Deserialize, Serialize};

/// Every coefficient, neutral default, and threshold used by the scoring
/// formulas, as named configuration rather than literals buried in
/// arithmetic. `Default` carries the documented production values; a
/// deployment can deserialize an alternative table without a code change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Environmental penalty per tonne of Scope 1 emissions.
    pub scope1_penalty_per_tonne: f64,
    /// Environmental bonus multiplier applied to the recycle ratio.
    pub recycle_ratio_bonus: f64,
    /// Stand-in renewable percentage for submissions that left the field
    /// unset or zero. Partial data should degrade gracefully, not zero out
    /// the environmental score.
    pub renewable_neutral_percent: f64,
    /// Social sub-score starting point.
    pub social_baseline: f64,
    /// Social penalty per recorded safety incident.
    pub incident_penalty: f64,
    /// Weight of the diversity score in the social sub-score.
    pub diversity_weight: f64,
    /// Neutral midpoint used when no diversity score was reported.
    pub diversity_neutral_score: f64,
    /// Governance score when both report name and reporting period are
    /// present. The governance signal is deliberately binary for now: it
    /// measures reporting completeness, not reporting quality.
    pub governance_complete: f64,
    /// Governance score when either reporting field is missing.
    pub governance_incomplete: f64,
    /// Carbon-efficiency decay per tonne of total (scope 1+2+3) emissions.
    pub carbon_efficiency_decay: f64,
    /// Compliance penalty weight applied to the incident-per-employee rate.
    pub compliance_incident_weight: f64,
    /// Factor values substituted when no ESG assessment exists yet. This is
    /// the only path allowed to use hardcoded factors.
    pub default_carbon_efficiency: f64,
    pub default_waste_management: f64,
    pub default_energy_usage: f64,
    pub default_compliance: f64,
    /// Factor floors below which a targeted recommendation is emitted.
    pub carbon_efficiency_floor: f64,
    pub waste_management_floor: f64,
    pub energy_usage_floor: f64,
    pub compliance_floor: f64,
    /// Cap on the carbon-credit bonus added to the composite score.
    pub credits_bonus_cap: f64,
    /// Credits of balance required per bonus point.
    pub credits_per_bonus_point: f64,
    /// AQI above which the composite score is penalized.
    pub aqi_poor_threshold: f64,
    /// AQI below which the composite score receives a small bonus.
    pub aqi_good_threshold: f64,
    pub poor_air_penalty: f64,
    pub clean_air_bonus: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            scope1_penalty_per_tonne: 0.1,
            recycle_ratio_bonus: 20.0,
            renewable_neutral_percent: 10.0,
            social_baseline: 75.0,
            incident_penalty: 5.0,
            diversity_weight: 0.3,
            diversity_neutral_score: 50.0,
            governance_complete: 85.0,
            governance_incomplete: 65.0,
            carbon_efficiency_decay: 0.1,
            compliance_incident_weight: 200.0,
            default_carbon_efficiency: 50.0,
            default_waste_management: 40.0,
            default_energy_usage: 30.0,
            default_compliance: 60.0,
            carbon_efficiency_floor: 70.0,
            waste_management_floor: 80.0,
            energy_usage_floor: 60.0,
            compliance_floor: 90.0,
            credits_bonus_cap: 20.0,
            credits_per_bonus_point: 10.0,
            aqi_poor_threshold: 200.0,
            aqi_good_threshold: 100.0,
            poor_air_penalty: 5.0,
            clean_air_bonus: 2.0,
        }
    }
}
