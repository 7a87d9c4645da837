use super::compose::CreditsBalance;
use super::esg::{EsgAssessment, EsgInputs};

/// Storage abstraction over the externally-owned ESG report and carbon
/// credit ledger tables, so the service can be exercised in isolation.
pub trait EsgRepository: Send + Sync {
    /// Latest submitted ESG inputs for a user, if any.
    fn latest_esg(&self, user_id: &str) -> Result<Option<EsgInputs>, RepositoryError>;
    /// Aggregated carbon credit position for a user, if any ledger rows exist.
    fn credits(&self, user_id: &str) -> Result<Option<CreditsBalance>, RepositoryError>;
    /// Persist a scored assessment.
    fn record_assessment(
        &self,
        user_id: &str,
        assessment: EsgAssessment,
    ) -> Result<(), RepositoryError>;
    /// Append earned credits to the ledger.
    fn record_credits(&self, user_id: &str, earned: f64) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Ambient weather/AQI collaborator.
pub trait WeatherProvider: Send + Sync {
    fn current(&self, location: &str) -> Result<super::compose::ContextReading, WeatherError>;
}

/// Weather lookup failure. Retry and timeout policy belongs to the caller
/// that owns the network dependency, not to the engine.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("weather provider unavailable: {0}")]
    Unavailable(String),
}
