//! Integration specifications for the invoice-to-green-score pipeline.
//!
//! Scenarios exercise the public service facade and HTTP router end to end
//! so extraction fallback, credit accrual, and score composition are
//! validated without reaching into private modules.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use greenledger::invoice::TextInvoiceExtractor;
    use greenledger::scoring::{
        ContextReading, CreditsBalance, EsgAssessment, EsgInputs, EsgRepository, FactorCatalog,
        RepositoryError, ScoringWeights, SustainabilityService, WeatherError, WeatherProvider,
    };

    #[derive(Default, Clone)]
    pub(super) struct MemoryRepository {
        esg: Arc<Mutex<HashMap<String, EsgAssessment>>>,
        ledger: Arc<Mutex<HashMap<String, f64>>>,
    }

    impl EsgRepository for MemoryRepository {
        fn latest_esg(&self, user_id: &str) -> Result<Option<EsgInputs>, RepositoryError> {
            let guard = self.esg.lock().expect("lock");
            Ok(guard
                .get(user_id)
                .map(|assessment| assessment.inputs.clone()))
        }

        fn credits(&self, user_id: &str) -> Result<Option<CreditsBalance>, RepositoryError> {
            let guard = self.ledger.lock().expect("lock");
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
            self.esg
                .lock()
                .expect("lock")
                .insert(user_id.to_string(), assessment);
            Ok(())
        }

        fn record_credits(&self, user_id: &str, earned: f64) -> Result<(), RepositoryError> {
            let mut guard = self.ledger.lock().expect("lock");
            *guard.entry(user_id.to_string()).or_insert(0.0) += earned;
            Ok(())
        }
    }

    #[derive(Clone)]
    pub(super) struct FixedWeather(pub(super) ContextReading);

    impl WeatherProvider for FixedWeather {
        fn current(&self, _location: &str) -> Result<ContextReading, WeatherError> {
            Ok(self.0.clone())
        }
    }

    pub(super) type Service =
        SustainabilityService<MemoryRepository, TextInvoiceExtractor, FixedWeather>;

    pub(super) fn build_service(aqi: Option<f64>) -> Arc<Service> {
        let weather = FixedWeather(ContextReading {
            temperature_c: 20.0,
            humidity_percent: 50.0,
            air_quality_index: aqi,
        });
        Arc::new(SustainabilityService::new(
            Arc::new(MemoryRepository::default()),
            Arc::new(TextInvoiceExtractor),
            Arc::new(weather),
            Arc::new(FactorCatalog::standard()),
            ScoringWeights::default(),
        ))
    }

    pub(super) fn survey() -> EsgInputs {
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
}

mod pipeline {
    use super::common::*;
    use greenledger::invoice::InvoiceScanRequest;
    use greenledger::scoring::ScanSource;

    #[test]
    fn scan_then_score_accrues_credit_bonus() {
        let service = build_service(Some(150.0));

        let request = InvoiceScanRequest {
            image_data: None,
            invoice_text: Some(
                "Item,Quantity,Unit,Unit Price\nDiesel Fuel,100000,liters,1.45\n".to_string(),
            ),
        };
        let report = service
            .scan_invoice(Some("acme"), &request)
            .expect("scan succeeds");
        assert_eq!(report.source, ScanSource::Extracted);
        // 100000 L * 2.31 kg/L = 231000 kg -> 231 credits.
        assert_eq!(report.impact.credits_earned, 231.0);

        service
            .submit_esg("acme", survey())
            .expect("survey scores");

        let green = service
            .green_score("acme", "Des Moines")
            .expect("score composes");
        // Factor mean 67.1 plus the capped +20 credit bonus.
        assert_eq!(green.score.overall, 87);
    }

    #[test]
    fn degraded_scan_is_tagged_not_hidden() {
        let service = build_service(None);

        let report = service
            .scan_invoice(None, &InvoiceScanRequest::default())
            .expect("degraded scan succeeds");

        assert_eq!(report.source, ScanSource::Fallback);
        assert!(report.degraded_reason.is_some());
        assert!(report.impact.total_emissions_kg > 0.0);
    }

    #[test]
    fn poor_air_quality_lowers_new_user_score() {
        let service = build_service(Some(250.0));

        let green = service
            .green_score("fresh", "Delhi")
            .expect("score composes");

        assert_eq!(green.score.overall, 40);
        assert_eq!(green.score.recommendations.len(), 2);
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use greenledger::scoring::scoring_router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    #[tokio::test]
    async fn scan_endpoint_reports_fallback_source() {
        let router = scoring_router(build_service(None));

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/invoices/scan")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .expect("request");

        let response = router.oneshot(request).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(payload.get("success"), Some(&json!(true)));
        assert_eq!(payload.get("source"), Some(&json!("fallback")));
    }

    #[tokio::test]
    async fn submitted_survey_flows_into_green_score() {
        let service = build_service(Some(50.0));
        let router = scoring_router(service);

        let submit = Request::builder()
            .method("POST")
            .uri("/api/v1/esg/reports")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&json!({
                    "user_id": "acme",
                    "scope1_emissions_t": 120.0,
                    "scope2_emissions_t": 80.0,
                    "scope3_emissions_t": 300.0,
                    "waste_generated_t": 40.0,
                    "waste_recycled_t": 30.0,
                    "renewable_energy_percent": 45.0,
                    "employee_count": 250,
                    "safety_incidents": 2,
                    "diversity_score": 62.0,
                    "report_name": "FY25 Baseline",
                    "reporting_period": "2025-H1",
                }))
                .expect("serialize survey"),
            ))
            .expect("request");

        let response = router
            .clone()
            .oneshot(submit)
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::CREATED);

        let score = Request::builder()
            .method("POST")
            .uri("/api/v1/green-score")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({ "user_id": "acme", "location": "Des Moines" }).to_string(),
            ))
            .expect("request");

        let response = router.oneshot(score).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        // Factor mean 67.1, no credits, AQI 50 -> +2.
        assert_eq!(
            payload.pointer("/score/overall").and_then(Value::as_u64),
            Some(69)
        );
    }
}
