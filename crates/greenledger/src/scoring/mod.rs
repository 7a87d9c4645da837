//! Carbon accounting and sustainability scoring pipeline.
//!
//! Four pure stages: line-item classification against the emission factor
//! catalog, carbon impact aggregation, ESG sub-score calculation, and the
//! composite green score. The service facade and HTTP router deliver the
//! pipeline behind collaborator traits so storage, extraction, and weather
//! lookups stay out of the engine.

pub mod carbon;
pub mod catalog;
pub mod compose;
pub mod esg;
pub mod repository;
pub mod router;
pub mod service;
pub mod weights;

#[cfg(test)]
mod tests;

pub use carbon::{compute_impact, CarbonImpactResult, ImpactLine, LineItem, ValidationError};
pub use catalog::{CatalogError, EmissionRule, FactorCatalog};
pub use compose::{
    compose_green_score, ContextReading, CreditsBalance, GreenScoreFactors, GreenScoreResult,
};
pub use esg::{score_esg, EsgAssessment, EsgInputs, EsgScoreResult};
pub use repository::{EsgRepository, RepositoryError, WeatherError, WeatherProvider};
pub use router::scoring_router;
pub use service::{
    GreenScoreReport, InvoiceScanReport, ScanSource, ScoringServiceError, SustainabilityService,
};
pub use weights::ScoringWeights;

/// Clamp a raw score into the closed interval `[0, 100]`.
///
/// NaN collapses to 0 so that no arithmetic accident can leak an unordered
/// value out of the engine.
pub(crate) fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// Round to a fixed number of decimal places.
pub(crate) fn round_dp(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    (value * scale).round() / scale
}
