//! Scales per-kilogram reference prices to a requested weight.

use super::models::{round2, NormalizedQuote, ProductQuote, Retailer, WeightUnit};
use regex_lite::Regex;
use std::sync::LazyLock;

pub const NOTE_PACKAGE_PRICE: &str = "Fixed package price used";
pub const NOTE_UNPARSEABLE: &str = "Unable to normalize: no per-kg price in unit label";

/// Coles comparable price, e.g. "$24.00 per 1kg".
static COLES_PER_KG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\$\s*(\d+(?:\.\d+)?)\s*per\s*1\s*kg").unwrap());

/// Woolworths cup string, e.g. "$11.50 / 1KG".
static WOOLWORTHS_PER_KG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\$\s*(\d+(?:\.\d+)?)\s*/\s*1\s*kg").unwrap());

/// Extracts the per-kilogram reference price from a retailer unit label.
pub fn per_kg_price(retailer: Retailer, unit_label: &str) -> Option<f64> {
    let re = match retailer {
        Retailer::Coles => &*COLES_PER_KG,
        Retailer::Woolworths => &*WOOLWORTHS_PER_KG,
    };

    re.captures(unit_label).and_then(|c| c[1].parse().ok())
}

/// Converts a weight to kilograms. A missing unit is treated as grams.
pub fn to_kilograms(weight: f64, unit: Option<WeightUnit>) -> f64 {
    match unit {
        Some(WeightUnit::Kilogram) => weight,
        Some(WeightUnit::Gram) | None => weight / 1000.0,
    }
}

/// Prices a quote for the requested weight.
///
/// Packaged products and requests without a weight keep their package price.
/// Weighted products are scaled from the per-kg price in `unit_label`; when
/// that cannot be found the original price is kept with a note.
pub fn normalize(
    quote: ProductQuote,
    retailer: Retailer,
    requested_weight: Option<f64>,
    requested_unit: Option<WeightUnit>,
) -> NormalizedQuote {
    let weight = match requested_weight {
        Some(w) if quote.is_weighted => w,
        _ => return unchanged(quote, NOTE_PACKAGE_PRICE),
    };

    let Some(per_kg) = per_kg_price(retailer, &quote.unit_label) else {
        return unchanged(quote, NOTE_UNPARSEABLE);
    };

    let price = round2(per_kg * to_kilograms(weight, requested_unit));
    NormalizedQuote { quote, price_for_request: price, calculation_note: None }
}

fn unchanged(quote: ProductQuote, note: &str) -> NormalizedQuote {
    NormalizedQuote {
        price_for_request: quote.unit_price,
        quote,
        calculation_note: Some(note.to_string()),
    }
}
