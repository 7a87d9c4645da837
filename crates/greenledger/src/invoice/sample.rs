use chrono::NaiveDate;

use super::InvoiceDocument;
use crate::scoring::LineItem;

/// The documented fallback invoice returned whenever extraction is
/// unavailable or fails. Deterministic so degraded responses stay
/// reproducible in tests and demos.
pub fn sample_invoice() -> InvoiceDocument {
    let item = |name: &str, quantity: f64, unit: &str, unit_price: f64| LineItem {
        name: name.to_string(),
        quantity,
        unit: unit.to_string(),
        unit_price,
        category: None,
    };

    let items = vec![
        item("Electricity Supply", 1000.0, "kWh", 0.12),
        item("Diesel Fuel", 100.0, "liters", 1.45),
        item("Office Paper", 50.0, "reams", 4.20),
        item("Steel Brackets", 200.0, "kg", 2.10),
    ];

    let total_amount = items
        .iter()
        .map(|line| line.quantity * line.unit_price)
        .sum();

    InvoiceDocument {
        vendor_name: "Acme Industrial Supplies".to_string(),
        invoice_number: "INV-SAMPLE-001".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid sample date"),
        items,
        total_amount,
    }
}
