use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::carbon::LineItem;

/// One entry in the emission factor taxonomy: a labeled category, the
/// keywords that select it, and its emission factor in kg CO2e per unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionRule {
    pub label: String,
    pub keywords: Vec<String>,
    pub factor_kg: f64,
}

impl EmissionRule {
    fn matches(&self, normalized: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| normalized.contains(keyword.as_str()))
    }
}

/// Versioned, ordered emission factor catalog.
///
/// Classification is first-match-wins over the rule list in declaration
/// order; priority is the position in the table, never a best-match
/// heuristic, so adding a category is a data change rather than a new code
/// branch. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorCatalog {
    pub version: u32,
    rules: Vec<EmissionRule>,
    default_rule: EmissionRule,
}

impl FactorCatalog {
    pub fn new(version: u32, rules: Vec<EmissionRule>, default_rule: EmissionRule) -> Self {
        Self {
            version,
            rules,
            default_rule,
        }
    }

    /// The built-in catalog shipped with the engine.
    pub fn standard() -> Self {
        let rule = |label: &str, keywords: &[&str], factor_kg: f64| EmissionRule {
            label: label.to_string(),
            keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
            factor_kg,
        };

        Self::new(
            1,
            vec![
                rule("Grid Electricity", &["electricity", "power", "kwh"], 0.82),
                rule("Diesel Fuel", &["diesel", "fuel", "petrol"], 2.31),
                rule("Steel & Metals", &["steel", "metal", "iron"], 1.85),
                rule("Plastics", &["plastic", "polymer", "resin"], 3.50),
                rule(
                    "Paper & Packaging",
                    &["paper", "cardboard", "packaging"],
                    1.20,
                ),
                rule(
                    "Electronics",
                    &["electronics", "computer", "laptop", "server"],
                    45.0,
                ),
                rule(
                    "Freight & Transport",
                    &["freight", "shipping", "transport"],
                    0.25,
                ),
            ],
            rule("General Procurement", &[], 0.50),
        )
    }

    /// Classify a line item into its emission rule.
    ///
    /// Total and deterministic: the normalized item name is tested against
    /// the ordered rules, then the optional category hint, and the default
    /// rule backstops everything else.
    pub fn classify(&self, item: &LineItem) -> &EmissionRule {
        if let Some(rule) = self.first_match(&item.name) {
            return rule;
        }

        if let Some(hint) = item.category.as_deref() {
            if let Some(rule) = self.first_match(hint) {
                return rule;
            }
        }

        &self.default_rule
    }

    pub fn default_rule(&self) -> &EmissionRule {
        &self.default_rule
    }

    pub fn rules(&self) -> &[EmissionRule] {
        &self.rules
    }

    fn first_match(&self, name: &str) -> Option<&EmissionRule> {
        let normalized = name.trim().to_lowercase();
        self.rules.iter().find(|rule| rule.matches(&normalized))
    }

    /// Load a catalog from CSV with columns `label,keywords,factor_kg`
    /// (keywords pipe-separated). Row order becomes rule priority; the
    /// built-in default rule still backstops unmatched items.
    pub fn from_csv_reader<R: Read>(version: u32, reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rules = Vec::new();
        for record in csv_reader.deserialize::<CatalogRow>() {
            let row = record?;
            if !row.factor_kg.is_finite() || row.factor_kg < 0.0 {
                return Err(CatalogError::InvalidFactor {
                    label: row.label,
                    factor: row.factor_kg,
                });
            }
            rules.push(EmissionRule {
                label: row.label,
                keywords: row
                    .keywords
                    .split('|')
                    .map(|keyword| keyword.trim().to_lowercase())
                    .filter(|keyword| !keyword.is_empty())
                    .collect(),
                factor_kg: row.factor_kg,
            });
        }

        if rules.is_empty() {
            return Err(CatalogError::Empty);
        }

        Ok(Self::new(
            version,
            rules,
            Self::standard().default_rule.clone(),
        ))
    }

    pub fn from_csv_path<P: AsRef<Path>>(version: u32, path: P) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        Self::from_csv_reader(version, file)
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    label: String,
    keywords: String,
    factor_kg: f64,
}

/// Error raised while loading an external factor catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("rule '{label}' has invalid emission factor {factor}")]
    InvalidFactor { label: String, factor: f64 },
    #[error("catalog contains no rules")]
    Empty,
}
