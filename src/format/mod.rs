//! Output formatting for price comparisons (table, JSON, markdown).

use crate::config::OutputFormat;
use crate::grocery::{ComparisonResult, ComparisonRow, NormalizedQuote};

/// Formats comparison results for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a whole comparison.
    pub fn format_comparison(&self, result: &ComparisonResult) -> String {
        if let OutputFormat::Json = self.format {
            return serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string());
        }

        if !result.is_success() {
            let message = result.message.as_deref().unwrap_or("Comparison failed");
            return format!("Error: {}", message);
        }

        if result.rows.is_empty() {
            return "No items to compare.".to_string();
        }

        match self.format {
            OutputFormat::Markdown => self.markdown(result),
            _ => self.table(result),
        }
    }

    // Table formatting

    fn table(&self, result: &ComparisonResult) -> String {
        let item_width = 24;
        let price_width = 10;
        let product_width = 36;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<item_width$}  {:>price_width$}  {:>price_width$}  {}",
            "Item", "Coles", "Woolworths", "Best match"
        ));
        lines.push(format!(
            "{:-<item_width$}  {:-<price_width$}  {:-<price_width$}  {:-<product_width$}",
            "", "", "", ""
        ));

        for row in &result.rows {
            lines.push(format!(
                "{:<item_width$}  {:>price_width$}  {:>price_width$}  {}",
                truncate(&row.item.label(), item_width),
                price_cell(row.coles.as_ref()),
                price_cell(row.woolworths.as_ref()),
                truncate(&best_match(row), product_width)
            ));
        }

        lines.push(String::new());
        lines.extend(self.summary_lines(result));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown(&self, result: &ComparisonResult) -> String {
        let mut lines = Vec::new();

        lines.push("| Item | Coles | Woolworths | Best match |".to_string());
        lines.push("|------|-------|------------|------------|".to_string());

        for row in &result.rows {
            lines.push(format!(
                "| {} | {} | {} | {} |",
                row.item.label(),
                price_cell(row.coles.as_ref()),
                price_cell(row.woolworths.as_ref()),
                best_match(row)
            ));
        }

        lines.push(String::new());
        for line in self.summary_lines(result) {
            lines.push(format!("*{}*", line));
        }

        lines.join("\n")
    }

    fn summary_lines(&self, result: &ComparisonResult) -> Vec<String> {
        let summary = &result.summary;
        let mut lines = vec![format!(
            "Totals: Coles ${:.2}, Woolworths ${:.2}",
            summary.coles_total, summary.woolworths_total
        )];

        match summary.cheaper_store {
            Some(store) => {
                lines.push(format!("{} is cheaper by ${:.2}", store, summary.savings));
            }
            None => lines.push("Not enough matches to pick a cheaper store".to_string()),
        }

        lines
    }
}

fn price_cell(quote: Option<&NormalizedQuote>) -> String {
    match quote {
        Some(q) => format!("${:.2}", q.price_for_request),
        None => "N/A".to_string(),
    }
}

/// Description of the cheaper matched product, or whichever one exists.
fn best_match(row: &ComparisonRow) -> String {
    let best = match (&row.coles, &row.woolworths) {
        (Some(c), Some(w)) if c.price_for_request < w.price_for_request => Some(c),
        (_, Some(w)) => Some(w),
        (Some(c), None) => Some(c),
        (None, None) => None,
    };

    best.map(|q| q.quote.description.clone()).unwrap_or_else(|| "-".to_string())
}

/// Truncates on character boundaries.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grocery::{ComparisonSummary, ParsedItem, ProductQuote, WeightUnit};

    fn quote(description: &str, price: f64) -> NormalizedQuote {
        NormalizedQuote {
            quote: ProductQuote {
                description: description.to_string(),
                unit_price: price,
                unit_label: String::new(),
                is_weighted: false,
            },
            price_for_request: price,
            calculation_note: None,
        }
    }

    fn make_result() -> ComparisonResult {
        let rows = vec![
            ComparisonRow {
                item: ParsedItem::weighed("garlic 100g", "garlic", 100.0, WeightUnit::Gram),
                coles: Some(quote("Coles Garlic Loose", 3.2)),
                woolworths: Some(quote("Woolworths Garlic Loose", 2.8)),
            },
            ComparisonRow {
                item: ParsedItem::plain("milk", "milk"),
                coles: Some(quote("Coles Full Cream Milk 2L", 3.1)),
                woolworths: None,
            },
        ];

        ComparisonResult::success(rows, ComparisonSummary::from_totals(6.3, 2.8))
    }

    #[test]
    fn test_json_format() {
        let output = Formatter::new(OutputFormat::Json).format_comparison(&make_result());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["status"], "success");
        assert_eq!(value["items_compared"], 2);
        assert_eq!(value["summary"]["cheaper_store"], "Woolworths");
    }

    #[test]
    fn test_table_format() {
        let output = Formatter::new(OutputFormat::Table).format_comparison(&make_result());

        assert!(output.contains("garlic (100g)"));
        assert!(output.contains("$3.20"));
        assert!(output.contains("$2.80"));
        assert!(output.contains("N/A"));
        assert!(output.contains("Woolworths Garlic Loose"));
        assert!(output.contains("Woolworths is cheaper by $3.50"));
    }

    #[test]
    fn test_markdown_format() {
        let output = Formatter::new(OutputFormat::Markdown).format_comparison(&make_result());

        assert!(output.contains("| Item | Coles | Woolworths | Best match |"));
        assert!(output.contains("| milk | $3.10 | N/A | Coles Full Cream Milk 2L |"));
        assert!(output.contains("*Totals: Coles $6.30, Woolworths $2.80*"));
    }

    #[test]
    fn test_failed_result() {
        let result = ComparisonResult::failed("Error comparing prices: boom");

        let table = Formatter::new(OutputFormat::Table).format_comparison(&result);
        assert_eq!(table, "Error: Error comparing prices: boom");

        let json = Formatter::new(OutputFormat::Json).format_comparison(&result);
        assert!(json.contains("\"failed\""));
    }

    #[test]
    fn test_no_verdict() {
        let result = ComparisonResult::success(
            vec![ComparisonRow {
                item: ParsedItem::plain("saffron", "saffron"),
                coles: None,
                woolworths: None,
            }],
            ComparisonSummary::from_totals(0.0, 0.0),
        );

        let output = Formatter::new(OutputFormat::Table).format_comparison(&result);
        assert!(output.contains("Not enough matches"));
        assert!(output.contains("-"));
    }

    #[test]
    fn test_empty_rows() {
        let result = ComparisonResult::success(Vec::new(), ComparisonSummary::default());
        let output = Formatter::new(OutputFormat::Table).format_comparison(&result);
        assert_eq!(output, "No items to compare.");
    }

    #[test]
    fn test_truncate_multibyte() {
        let long = "crème fraîche extra épaisse biologique 200ml";
        let out = truncate(long, 20);
        assert_eq!(out.chars().count(), 20);
        assert!(out.ends_with("..."));
        assert_eq!(truncate("short", 20), "short");
    }
}
