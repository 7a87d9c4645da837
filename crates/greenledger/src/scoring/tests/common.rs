use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::invoice::{
    ExtractionError, InvoiceDocument, InvoiceExtractor, InvoiceScanRequest, TextInvoiceExtractor,
};
use crate::scoring::catalog::FactorCatalog;
use crate::scoring::compose::{ContextReading, CreditsBalance};
use crate::scoring::esg::{EsgAssessment, EsgInputs};
use crate::scoring::repository::{EsgRepository, RepositoryError, WeatherError, WeatherProvider};
use crate::scoring::service::SustainabilityService;
use crate::scoring::weights::ScoringWeights;
use crate::scoring::LineItem;

pub(super) fn weights() -> ScoringWeights {
    ScoringWeights::default()
}

pub(super) fn catalog() -> FactorCatalog {
    FactorCatalog::standard()
}

pub(super) fn item(name: &str, quantity: f64, unit: &str) -> LineItem {
    LineItem {
        name: name.to_string(),
        quantity,
        unit: unit.to_string(),
        unit_price: 0.0,
        category: None,
    }
}

/// Scenario inputs: everything empty except the reporting fields.
pub(super) fn reporting_only_inputs() -> EsgInputs {
    EsgInputs {
        scope1_emissions_t: 0.0,
        scope2_emissions_t: 0.0,
        scope3_emissions_t: 0.0,
        waste_generated_t: 0.0,
        waste_recycled_t: 0.0,
        renewable_energy_percent: None,
        employee_count: 0,
        safety_incidents: 0,
        diversity_score: None,
        report_name: "FY25 Baseline".to_string(),
        reporting_period: "2025-H1".to_string(),
    }
}

pub(super) fn full_inputs() -> EsgInputs {
    EsgInputs {
        scope1_emissions_t: 120.0,
        scope2_emissions_t: 80.0,
        scope3_emissions_t: 300.0,
        waste_generated_t: 40.0,
        waste_recycled_t: 30.0,
        renewable_energy_percent: Some(45.0),
        employee_count: 250,
        safety_incidents: 2,
        diversity_score: Some(62.0),
        report_name: "FY25 Baseline".to_string(),
        reporting_period: "2025-H1".to_string(),
    }
}

pub(super) fn mild_context() -> ContextReading {
    ContextReading {
        temperature_c: 21.0,
        humidity_percent: 55.0,
        air_quality_index: Some(150.0),
    }
}

pub(super) fn assessment(inputs: EsgInputs) -> EsgAssessment {
    EsgAssessment::new(inputs, &weights())
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) esg: Arc<Mutex<HashMap<String, EsgAssessment>>>,
    pub(super) ledger: Arc<Mutex<HashMap<String, f64>>>,
}

impl EsgRepository for MemoryRepository {
    fn latest_esg(&self, user_id: &str) -> Result<Option<EsgInputs>, RepositoryError> {
        let guard = self.esg.lock().expect("esg mutex poisoned");
        Ok(guard
            .get(user_id)
            .map(|assessment| assessment.inputs.clone()))
    }

    fn credits(&self, user_id: &str) -> Result<Option<CreditsBalance>, RepositoryError> {
        let guard = self.ledger.lock().expect("ledger mutex poisoned");
        Ok(guard.get(user_id).map(|earned| CreditsBalance {
            earned: *earned,
            redeemed: 0.0,
        }))
    }

    fn record_assessment(
        &self,
        user_id: &str,
        assessment: EsgAssessment,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.esg.lock().expect("esg mutex poisoned");
        guard.insert(user_id.to_string(), assessment);
        Ok(())
    }

    fn record_credits(&self, user_id: &str, earned: f64) -> Result<(), RepositoryError> {
        let mut guard = self.ledger.lock().expect("ledger mutex poisoned");
        *guard.entry(user_id.to_string()).or_insert(0.0) += earned;
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl EsgRepository for UnavailableRepository {
    fn latest_esg(&self, _user_id: &str) -> Result<Option<EsgInputs>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn credits(&self, _user_id: &str) -> Result<Option<CreditsBalance>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn record_assessment(
        &self,
        _user_id: &str,
        _assessment: EsgAssessment,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn record_credits(&self, _user_id: &str, _earned: f64) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Clone)]
pub(super) struct StaticWeather {
    reading: ContextReading,
}

impl Default for StaticWeather {
    fn default() -> Self {
        Self {
            reading: mild_context(),
        }
    }
}

impl WeatherProvider for StaticWeather {
    fn current(&self, _location: &str) -> Result<ContextReading, WeatherError> {
        Ok(self.reading.clone())
    }
}

pub(super) struct BrokenExtractor;

impl InvoiceExtractor for BrokenExtractor {
    fn extract(&self, _request: &InvoiceScanRequest) -> Result<InvoiceDocument, ExtractionError> {
        Err(ExtractionError::Unavailable(
            "extraction backend offline".to_string(),
        ))
    }
}

pub(super) type TestService =
    SustainabilityService<MemoryRepository, TextInvoiceExtractor, StaticWeather>;

pub(super) fn build_service() -> (Arc<TestService>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = Arc::new(SustainabilityService::new(
        repository.clone(),
        Arc::new(TextInvoiceExtractor),
        Arc::new(StaticWeather::default()),
        Arc::new(catalog()),
        weights(),
    ));
    (service, repository)
}
