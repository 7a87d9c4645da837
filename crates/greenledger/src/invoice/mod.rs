//! Invoice intake: turning a raw scan payload into line items.
//!
//! Real optical extraction is an external collaborator; this module ships
//! the text-based extractor used for CSV payloads plus the documented
//! fallback sample used whenever extraction is unavailable or fails.

mod parser;
mod sample;

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::scoring::LineItem;

pub use sample::sample_invoice;

/// Raw payload accepted by the scan endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceScanRequest {
    /// Base64 image payload for an external vision collaborator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    /// CSV invoice body (`Item,Quantity,Unit,Unit Price[,Category]`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_text: Option<String>,
}

/// Structured invoice produced by extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDocument {
    pub vendor_name: String,
    pub invoice_number: String,
    pub date: NaiveDate,
    pub items: Vec<LineItem>,
    pub total_amount: f64,
}

/// Extraction seam. Implementations may call out to vision or AI services;
/// the in-tree implementation only understands CSV text.
pub trait InvoiceExtractor: Send + Sync {
    fn extract(&self, request: &InvoiceScanRequest) -> Result<InvoiceDocument, ExtractionError>;
}

/// Extraction failure. Never reaches the engine: the service degrades to
/// the fallback sample and tags the result instead.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("scan request carried no payload")]
    NoPayload,
    #[error("invoice text could not be parsed: {0}")]
    Malformed(String),
    #[error("extraction backend unavailable: {0}")]
    Unavailable(String),
}

static INVOICE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_invoice_number() -> String {
    let id = INVOICE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("INV-{id:06}")
}

/// CSV text extractor. Image payloads require an external vision
/// collaborator and are reported as unavailable here.
#[derive(Debug, Default, Clone)]
pub struct TextInvoiceExtractor;

impl InvoiceExtractor for TextInvoiceExtractor {
    fn extract(&self, request: &InvoiceScanRequest) -> Result<InvoiceDocument, ExtractionError> {
        match (&request.invoice_text, &request.image_data) {
            (Some(text), _) => document_from_text(text),
            (None, Some(_)) => Err(ExtractionError::Unavailable(
                "vision extraction is not configured".to_string(),
            )),
            (None, None) => Err(ExtractionError::NoPayload),
        }
    }
}

fn document_from_text(text: &str) -> Result<InvoiceDocument, ExtractionError> {
    let items = parser::parse_line_items(text.as_bytes())
        .map_err(|err| ExtractionError::Malformed(err.to_string()))?;

    if items.is_empty() {
        return Err(ExtractionError::Malformed(
            "no line items in invoice text".to_string(),
        ));
    }

    let total_amount = items
        .iter()
        .map(|item| item.quantity * item.unit_price)
        .sum();

    Ok(InvoiceDocument {
        vendor_name: "Text submission".to_string(),
        invoice_number: next_invoice_number(),
        date: Local::now().date_naive(),
        items,
        total_amount,
    })
}
