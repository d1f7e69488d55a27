//! Splits free-text item requests into a search term and a requested weight.

use super::models::{ParsedItem, WeightUnit};
use regex_lite::Regex;
use std::sync::LazyLock;

/// `<name> <number><g|kg>` with the weight as the trailing token.
static WEIGHT_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.+?)\s+(\d+(?:\.\d+)?)(kg|g)$").unwrap());

/// Parses an item request such as "garlic 100g".
///
/// Never fails: anything without a trailing gram/kilogram token (including
/// volume tokens like "3L") is used verbatim as the search term.
pub fn parse(raw: &str) -> ParsedItem {
    let trimmed = raw.trim();

    let Some(caps) = WEIGHT_SUFFIX.captures(trimmed) else {
        return ParsedItem::plain(raw, trimmed);
    };

    let name = caps[1].trim();
    let Ok(weight) = caps[2].parse::<f64>() else {
        return ParsedItem::plain(raw, trimmed);
    };

    let unit = if caps[3].eq_ignore_ascii_case("kg") {
        WeightUnit::Kilogram
    } else {
        WeightUnit::Gram
    };

    ParsedItem::weighed(raw, name, weight, unit)
}
