use serde::{Deserialize, Serialize};

use super::catalog::FactorCatalog;
use super::round_dp;

/// Kilograms of CO2e represented by one carbon credit (one tonne).
pub const KG_PER_CREDIT: f64 = 1000.0;

const CREDIT_DECIMAL_PLACES: u32 = 4;

/// A single invoice line as supplied by the extraction layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(default)]
    pub unit_price: f64,
    /// Optional category hint consulted only when the item name matches no
    /// catalog rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Per-item contribution to the invoice's carbon footprint, kept in input
/// order so reports and tests are reproducible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactLine {
    pub item: String,
    pub category: String,
    pub factor_kg: f64,
    pub emissions_kg: f64,
}

/// Aggregate carbon impact of one invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonImpactResult {
    pub total_emissions_kg: f64,
    pub credits_earned: f64,
    pub breakdown: Vec<ImpactLine>,
}

impl CarbonImpactResult {
    pub fn empty() -> Self {
        Self {
            total_emissions_kg: 0.0,
            credits_earned: 0.0,
            breakdown: Vec::new(),
        }
    }
}

/// Rejection of malformed line items; the only fatal condition in the
/// carbon pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("line item '{name}' has non-positive quantity {quantity}")]
    NonPositiveQuantity { name: String, quantity: f64 },
}

/// Classify every line item and aggregate emissions and earned credits.
///
/// An empty item list is a valid invoice with a zero footprint, not an
/// error. One credit per tonne of CO2e, retained to four decimal places.
pub fn compute_impact(
    catalog: &FactorCatalog,
    items: &[LineItem],
) -> Result<CarbonImpactResult, ValidationError> {
    let mut breakdown = Vec::with_capacity(items.len());
    let mut total_emissions_kg = 0.0;

    for item in items {
        if item.quantity <= 0.0 || !item.quantity.is_finite() {
            return Err(ValidationError::NonPositiveQuantity {
                name: item.name.clone(),
                quantity: item.quantity,
            });
        }

        let rule = catalog.classify(item);
        let emissions_kg = item.quantity * rule.factor_kg;
        total_emissions_kg += emissions_kg;

        breakdown.push(ImpactLine {
            item: item.name.clone(),
            category: rule.label.clone(),
            factor_kg: rule.factor_kg,
            emissions_kg,
        });
    }

    let credits_earned = round_dp(
        (total_emissions_kg / KG_PER_CREDIT).max(0.0),
        CREDIT_DECIMAL_PLACES,
    );

    Ok(CarbonImpactResult {
        total_emissions_kg,
        credits_earned,
        breakdown,
    })
}
