use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::scoring::LineItem;

pub(crate) fn parse_line_items<R: Read>(reader: R) -> Result<Vec<LineItem>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut items = Vec::new();
    for record in csv_reader.deserialize::<InvoiceRow>() {
        let row = record?;
        items.push(LineItem {
            name: row.item,
            quantity: row.quantity,
            unit: row.unit.unwrap_or_else(|| "unit".to_string()),
            unit_price: row.unit_price.unwrap_or(0.0),
            category: row.category,
        });
    }

    Ok(items)
}

#[derive(Debug, Deserialize)]
struct InvoiceRow {
    #[serde(rename = "Item")]
    item: String,
    #[serde(rename = "Quantity")]
    quantity: f64,
    #[serde(rename = "Unit", default, deserialize_with = "empty_string_as_none")]
    unit: Option<String>,
    #[serde(rename = "Unit Price", default)]
    unit_price: Option<f64>,
    #[serde(rename = "Category", default, deserialize_with = "empty_string_as_none")]
    category: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
