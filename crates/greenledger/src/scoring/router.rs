use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::invoice::{InvoiceDocument, InvoiceExtractor, InvoiceScanRequest};

use super::carbon::CarbonImpactResult;
use super::esg::EsgInputs;
use super::repository::{EsgRepository, RepositoryError, WeatherProvider};
use super::service::{InvoiceScanReport, ScanSource, ScoringServiceError, SustainabilityService};

/// Router builder exposing HTTP endpoints for the scoring pipeline.
pub fn scoring_router<R, X, W>(service: Arc<SustainabilityService<R, X, W>>) -> Router
where
    R: EsgRepository + 'static,
    X: InvoiceExtractor + 'static,
    W: WeatherProvider + 'static,
{
    Router::new()
        .route("/api/v1/invoices/scan", post(scan_handler::<R, X, W>))
        .route("/api/v1/esg/reports", post(esg_report_handler::<R, X, W>))
        .route("/api/v1/green-score", post(green_score_handler::<R, X, W>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScanInvoiceBody {
    #[serde(default)]
    pub(crate) user_id: Option<String>,
    #[serde(default)]
    pub(crate) image_data: Option<String>,
    #[serde(default)]
    pub(crate) invoice_text: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScanInvoiceResponse {
    pub(crate) success: bool,
    pub(crate) source: ScanSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) degraded_reason: Option<String>,
    pub(crate) data: ScanInvoiceData,
    pub(crate) message: String,
}

/// Scan payload: the invoice fields at the top level with the computed
/// carbon impact alongside them.
#[derive(Debug, Serialize)]
pub(crate) struct ScanInvoiceData {
    #[serde(flatten)]
    pub(crate) document: InvoiceDocument,
    pub(crate) carbon_impact: CarbonImpactResult,
}

pub(crate) async fn scan_handler<R, X, W>(
    State(service): State<Arc<SustainabilityService<R, X, W>>>,
    axum::Json(body): axum::Json<ScanInvoiceBody>,
) -> Response
where
    R: EsgRepository + 'static,
    X: InvoiceExtractor + 'static,
    W: WeatherProvider + 'static,
{
    let request = InvoiceScanRequest {
        image_data: body.image_data,
        invoice_text: body.invoice_text,
    };

    match service.scan_invoice(body.user_id.as_deref(), &request) {
        Ok(InvoiceScanReport {
            source,
            degraded_reason,
            document,
            impact,
        }) => {
            let message = match source {
                ScanSource::Extracted => "invoice processed".to_string(),
                ScanSource::Fallback => "invoice processed with fallback sample data".to_string(),
            };
            let response = ScanInvoiceResponse {
                success: true,
                source,
                degraded_reason,
                data: ScanInvoiceData {
                    document,
                    carbon_impact: impact,
                },
                message,
            };
            (StatusCode::OK, axum::Json(response)).into_response()
        }
        Err(err) => service_error_response(err),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct EsgReportBody {
    pub(crate) user_id: String,
    #[serde(flatten)]
    pub(crate) inputs: EsgInputs,
}

pub(crate) async fn esg_report_handler<R, X, W>(
    State(service): State<Arc<SustainabilityService<R, X, W>>>,
    axum::Json(body): axum::Json<EsgReportBody>,
) -> Response
where
    R: EsgRepository + 'static,
    X: InvoiceExtractor + 'static,
    W: WeatherProvider + 'static,
{
    match service.submit_esg(&body.user_id, body.inputs) {
        Ok(scores) => (StatusCode::CREATED, axum::Json(scores)).into_response(),
        Err(err) => service_error_response(err),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GreenScoreBody {
    pub(crate) user_id: String,
    pub(crate) location: String,
}

pub(crate) async fn green_score_handler<R, X, W>(
    State(service): State<Arc<SustainabilityService<R, X, W>>>,
    axum::Json(body): axum::Json<GreenScoreBody>,
) -> Response
where
    R: EsgRepository + 'static,
    X: InvoiceExtractor + 'static,
    W: WeatherProvider + 'static,
{
    match service.green_score(&body.user_id, &body.location) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(err) => service_error_response(err),
    }
}

fn service_error_response(err: ScoringServiceError) -> Response {
    let status = match &err {
        ScoringServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ScoringServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ScoringServiceError::Repository(_) | ScoringServiceError::Weather(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
