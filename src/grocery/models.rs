//! Data models for grocery price comparison.

use crate::reply::Status;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supermarket chains that can be searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Retailer {
    Coles,
    Woolworths,
}

impl Retailer {
    /// Returns the display name of the retailer.
    pub fn name(&self) -> &'static str {
        match self {
            Retailer::Coles => "Coles",
            Retailer::Woolworths => "Woolworths",
        }
    }
}

impl fmt::Display for Retailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unit of a requested weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightUnit {
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "kg")]
    Kilogram,
}

impl WeightUnit {
    /// Returns the short unit symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            WeightUnit::Gram => "g",
            WeightUnit::Kilogram => "kg",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A free-text item request split into a search term and an optional weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedItem {
    /// Input exactly as given
    pub raw_text: String,
    /// Search term with any trailing weight token removed
    pub canonical_name: String,
    /// Requested weight, always paired with `requested_unit`
    pub requested_weight: Option<f64>,
    pub requested_unit: Option<WeightUnit>,
}

impl ParsedItem {
    /// Creates an item without a requested weight.
    pub fn plain(raw_text: impl Into<String>, canonical_name: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            canonical_name: canonical_name.into(),
            requested_weight: None,
            requested_unit: None,
        }
    }

    /// Creates an item with a requested weight.
    pub fn weighed(
        raw_text: impl Into<String>,
        canonical_name: impl Into<String>,
        weight: f64,
        unit: WeightUnit,
    ) -> Self {
        Self {
            raw_text: raw_text.into(),
            canonical_name: canonical_name.into(),
            requested_weight: Some(weight),
            requested_unit: Some(unit),
        }
    }

    /// Returns a short label such as "garlic (100g)".
    pub fn label(&self) -> String {
        match (self.requested_weight, self.requested_unit) {
            (Some(weight), Some(unit)) => format!("{} ({}{})", self.canonical_name, weight, unit),
            _ => self.canonical_name.clone(),
        }
    }
}

/// A retailer's best match for a search term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductQuote {
    /// Product description as shown by the retailer
    pub description: String,
    /// Package price, or per-kg reference price for weighted products
    pub unit_price: f64,
    /// Comparable/cup price string, e.g. "$11.50 / 1KG"
    pub unit_label: String,
    /// Whether the product is sold by weight
    pub is_weighted: bool,
}

/// A quote scaled to the requested weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedQuote {
    #[serde(flatten)]
    pub quote: ProductQuote,
    /// Price for the requested quantity
    pub price_for_request: f64,
    /// Explains why the package price was kept
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculation_note: Option<String>,
}

/// Both retailers' quotes for one input item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub item: ParsedItem,
    pub coles: Option<NormalizedQuote>,
    pub woolworths: Option<NormalizedQuote>,
}

/// Totals and verdict across all rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub coles_total: f64,
    pub woolworths_total: f64,
    /// Only set when both totals are strictly positive
    pub cheaper_store: Option<Retailer>,
    pub savings: f64,
}

impl ComparisonSummary {
    /// Builds the summary from raw running totals.
    ///
    /// A verdict is only given when both totals are strictly positive, so a
    /// retailer that matched nothing never "wins".
    pub fn from_totals(coles_total: f64, woolworths_total: f64) -> Self {
        let mut summary = Self {
            coles_total: round2(coles_total),
            woolworths_total: round2(woolworths_total),
            cheaper_store: None,
            savings: 0.0,
        };

        if coles_total > 0.0 && woolworths_total > 0.0 {
            summary.cheaper_store = Some(if coles_total < woolworths_total {
                Retailer::Coles
            } else {
                Retailer::Woolworths
            });
            summary.savings = round2((coles_total - woolworths_total).abs());
        }

        summary
    }
}

/// Top-level output of a price comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub status: Status,
    pub items_compared: usize,
    pub rows: Vec<ComparisonRow>,
    pub summary: ComparisonSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComparisonResult {
    /// Creates a successful result from completed rows.
    pub fn success(rows: Vec<ComparisonRow>, summary: ComparisonSummary) -> Self {
        Self { status: Status::Success, items_compared: rows.len(), rows, summary, message: None }
    }

    /// Creates a failed result. Never carries partial rows.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: Status::Failed,
            items_compared: 0,
            rows: Vec::new(),
            summary: ComparisonSummary::default(),
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
