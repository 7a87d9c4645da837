use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use greenledger::scoring::{
    ContextReading, CreditsBalance, EsgAssessment, EsgInputs, EsgRepository, RepositoryError,
    WeatherError, WeatherProvider,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory stand-in for the externally-owned ESG report and carbon
/// credit ledger tables.
#[derive(Default, Clone)]
pub(crate) struct InMemoryEsgRepository {
    assessments: Arc<Mutex<HashMap<String, Vec<EsgAssessment>>>>,
    ledger: Arc<Mutex<HashMap<String, CreditsBalance>>>,
}

impl EsgRepository for InMemoryEsgRepository {
    fn latest_esg(&self, user_id: &str) -> Result<Option<EsgInputs>, RepositoryError> {
        let guard = self.assessments.lock().expect("assessment mutex poisoned");
        Ok(guard
            .get(user_id)
            .and_then(|history| history.last())
            .map(|assessment| assessment.inputs.clone()))
    }

    fn credits(&self, user_id: &str) -> Result<Option<CreditsBalance>, RepositoryError> {
        let guard = self.ledger.lock().expect("ledger mutex poisoned");
        Ok(guard.get(user_id).copied())
    }

    fn record_assessment(
        &self,
        user_id: &str,
        assessment: EsgAssessment,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.assessments.lock().expect("assessment mutex poisoned");
        guard
            .entry(user_id.to_string())
            .or_default()
            .push(assessment);
        Ok(())
    }

    fn record_credits(&self, user_id: &str, earned: f64) -> Result<(), RepositoryError> {
        let mut guard = self.ledger.lock().expect("ledger mutex poisoned");
        let position = guard
            .entry(user_id.to_string())
            .or_insert(CreditsBalance {
                earned: 0.0,
                redeemed: 0.0,
            });
        position.earned += earned;
        Ok(())
    }
}

/// Fixed-reading weather provider standing in for the external AQI
/// collaborator. Real deployments swap in an HTTP-backed implementation.
#[derive(Clone)]
pub(crate) struct StaticWeatherProvider {
    reading: ContextReading,
}

impl Default for StaticWeatherProvider {
    fn default() -> Self {
        Self {
            reading: ContextReading {
                temperature_c: 22.0,
                humidity_percent: 48.0,
                air_quality_index: Some(85.0),
            },
        }
    }
}

impl WeatherProvider for StaticWeatherProvider {
    fn current(&self, _location: &str) -> Result<ContextReading, WeatherError> {
        Ok(self.reading.clone())
    }
}
