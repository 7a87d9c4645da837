use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::invoice::{sample_invoice, InvoiceDocument, InvoiceExtractor, InvoiceScanRequest};

use super::carbon::{compute_impact, CarbonImpactResult, ValidationError};
use super::catalog::FactorCatalog;
use super::compose::{compose_green_score, ContextReading, GreenScoreResult};
use super::esg::{EsgAssessment, EsgInputs, EsgScoreResult};
use super::repository::{EsgRepository, RepositoryError, WeatherError, WeatherProvider};
use super::weights::ScoringWeights;

/// Service composing the factor catalog, scoring weights, and the three
/// collaborator seams (storage, extraction, weather).
pub struct SustainabilityService<R, X, W> {
    repository: Arc<R>,
    extractor: Arc<X>,
    weather: Arc<W>,
    catalog: Arc<FactorCatalog>,
    weights: ScoringWeights,
}

/// Where the scanned invoice data came from. `Fallback` makes degraded
/// responses observable to monitoring and tests instead of reporting an
/// unconditional success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanSource {
    Extracted,
    Fallback,
}

/// Outcome of one invoice scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceScanReport {
    pub source: ScanSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded_reason: Option<String>,
    pub document: InvoiceDocument,
    pub impact: CarbonImpactResult,
}

/// Composed green score plus the context it was scored against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GreenScoreReport {
    pub user_id: String,
    pub score: GreenScoreResult,
    pub weather_context: ContextReading,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub esg: Option<EsgScoreResult>,
}

impl<R, X, W> SustainabilityService<R, X, W>
where
    R: EsgRepository + 'static,
    X: InvoiceExtractor + 'static,
    W: WeatherProvider + 'static,
{
    pub fn new(
        repository: Arc<R>,
        extractor: Arc<X>,
        weather: Arc<W>,
        catalog: Arc<FactorCatalog>,
        weights: ScoringWeights,
    ) -> Self {
        Self {
            repository,
            extractor,
            weather,
            catalog,
            weights,
        }
    }

    pub fn catalog(&self) -> &FactorCatalog {
        &self.catalog
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Scan an invoice payload and compute its carbon impact.
    ///
    /// Extraction or validation failure degrades to the documented sample
    /// invoice, tagged as `Fallback` with the reason; the engine itself only
    /// ever computes on the items it is handed. Earned credits are appended
    /// to the ledger when a user is supplied.
    pub fn scan_invoice(
        &self,
        user_id: Option<&str>,
        request: &InvoiceScanRequest,
    ) -> Result<InvoiceScanReport, ScoringServiceError> {
        let (document, impact, source, degraded_reason) = match self.extract_and_compute(request)
        {
            Ok((document, impact)) => (document, impact, ScanSource::Extracted, None),
            Err(reason) => {
                warn!(%reason, "invoice extraction degraded to sample data");
                let document = sample_invoice();
                let impact = compute_impact(&self.catalog, &document.items)?;
                (document, impact, ScanSource::Fallback, Some(reason))
            }
        };

        if let Some(user_id) = user_id {
            if impact.credits_earned > 0.0 {
                self.repository
                    .record_credits(user_id, impact.credits_earned)?;
            }
        }

        Ok(InvoiceScanReport {
            source,
            degraded_reason,
            document,
            impact,
        })
    }

    fn extract_and_compute(
        &self,
        request: &InvoiceScanRequest,
    ) -> Result<(InvoiceDocument, CarbonImpactResult), String> {
        let document = self
            .extractor
            .extract(request)
            .map_err(|err| err.to_string())?;
        let impact =
            compute_impact(&self.catalog, &document.items).map_err(|err| err.to_string())?;
        Ok((document, impact))
    }

    /// Score an ESG survey submission and persist the assessment.
    pub fn submit_esg(
        &self,
        user_id: &str,
        inputs: EsgInputs,
    ) -> Result<EsgScoreResult, ScoringServiceError> {
        let assessment = EsgAssessment::new(inputs, &self.weights);
        let scores = assessment.scores.clone();
        self.repository.record_assessment(user_id, assessment)?;
        Ok(scores)
    }

    /// Compose the green score for a user from their latest assessment,
    /// credit balance, and a fresh context reading.
    pub fn green_score(
        &self,
        user_id: &str,
        location: &str,
    ) -> Result<GreenScoreReport, ScoringServiceError> {
        let assessment = self
            .repository
            .latest_esg(user_id)?
            .filter(EsgInputs::has_data)
            .map(|inputs| EsgAssessment::new(inputs, &self.weights));
        let credits = self.repository.credits(user_id)?;
        let context = self.weather.current(location)?;

        let score = compose_green_score(
            assessment.as_ref(),
            credits.as_ref(),
            &context,
            &self.weights,
        );

        Ok(GreenScoreReport {
            user_id: user_id.to_string(),
            score,
            weather_context: context,
            esg: assessment.map(|assessment| assessment.scores),
        })
    }
}

/// Error raised by the sustainability service.
#[derive(Debug, thiserror::Error)]
pub enum ScoringServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Weather(#[from] WeatherError),
}
