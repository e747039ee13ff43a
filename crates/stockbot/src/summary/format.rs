//! Text rendering of a quote summary
//!
//! The rendered block is what end users see, so labels, their order and the
//! two-decimal money format are fixed.

use super::metrics::{DerivedMetrics, ReconciledQuote};
use std::fmt;

pub const LABEL_COMPANY: &str = "Company";
pub const LABEL_SYMBOL: &str = "Symbol";
pub const LABEL_CURRENT_PRICE: &str = "Current Price";
pub const LABEL_PREVIOUS_CLOSE: &str = "Previous Close";
pub const LABEL_CHANGE: &str = "Change";
pub const LABEL_DAY_RANGE: &str = "Day's Range";

/// Labels in display order
pub const LABELS: [&str; 6] = [
    LABEL_COMPANY,
    LABEL_SYMBOL,
    LABEL_CURRENT_PRICE,
    LABEL_PREVIOUS_CLOSE,
    LABEL_CHANGE,
    LABEL_DAY_RANGE,
];

const NOT_AVAILABLE: &str = "N/A";

/// Two decimal places, no currency sign
fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

/// Two decimal places with a leading `$`
pub fn format_money(value: f64) -> String {
    format!("${}", format_amount(value))
}

/// `+` for strictly positive changes; zero and negatives get nothing extra
pub fn change_sign(change: f64) -> &'static str {
    if change > 0.0 { "+" } else { "" }
}

/// Signed dollar change, e.g. `+$1.00`
pub fn format_signed_money(change: f64) -> String {
    format!("{}{}", change_sign(change), format_money(change))
}

/// Percentage carrying the sign of `change`, e.g. `+1.00%`
pub fn format_signed_percent(change: f64, percent_change: f64) -> String {
    format!("{}{}%", change_sign(change), format_amount(percent_change))
}

/// Change column: marker, signed amount and percentage, or `N/A`
pub fn format_change(metrics: &DerivedMetrics) -> String {
    let marker = metrics.trend.marker();
    match metrics.percent_change {
        Some(pct) => format!(
            "{marker} {} ({})",
            format_signed_money(metrics.change),
            format_signed_percent(metrics.change, pct)
        ),
        None => format!("{marker} {NOT_AVAILABLE}"),
    }
}

/// Labeled snapshot for one query
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    fields: Vec<(&'static str, String)>,
}

impl Summary {
    pub fn new(
        query: &str,
        symbol: &str,
        quote: &ReconciledQuote,
        metrics: &DerivedMetrics,
    ) -> Self {
        let fields = vec![
            (LABEL_COMPANY, query.to_string()),
            (LABEL_SYMBOL, symbol.to_string()),
            (LABEL_CURRENT_PRICE, format_money(metrics.current_price)),
            (LABEL_PREVIOUS_CLOSE, format_money(metrics.previous_close)),
            (LABEL_CHANGE, format_change(metrics)),
            (
                LABEL_DAY_RANGE,
                format!("{} - {}", format_money(quote.day_low), format_money(quote.day_high)),
            ),
        ];
        Self { fields }
    }

    /// (label, value) pairs in display order
    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    pub fn value(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
    }

    /// One `label: value` line per field
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in &self.fields {
            writeln!(f, "{label}: {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::metrics::Trend;

    fn summary(current: f64, previous: f64) -> Summary {
        let quote = ReconciledQuote {
            current_price: current,
            previous_close: previous,
            day_low: 98.5,
            day_high: 102.25,
        };
        Summary::new("apple", "AAPL", &quote, &DerivedMetrics::from(&quote))
    }

    #[test]
    fn test_money_has_two_decimals() {
        assert_eq!(format_amount(101.0), "101.00");
        assert_eq!(format_money(101.0), "$101.00");
        assert_eq!(format_money(0.1), "$0.10");
        assert_eq!(format_money(1234.5678), "$1234.57");
    }

    #[test]
    fn test_half_cent_rounding() {
        // 101.005 is stored as 101.00499999..., so it rounds down
        assert_eq!(format_amount(101.005), "101.00");
        assert_eq!(format_amount(0.375), "0.38");
    }

    #[test]
    fn test_signed_figures() {
        assert_eq!(format_signed_money(1.0), "+$1.00");
        assert_eq!(format_signed_percent(1.0, 1.0), "+1.00%");
        assert_eq!(format_signed_money(0.0), "$0.00");
        assert_eq!(format_signed_money(-2.5), "$-2.50");
        assert_eq!(format_signed_percent(-2.5, -2.5), "-2.50%");
    }

    #[test]
    fn test_change_up() {
        let metrics = DerivedMetrics::compute(101.0, 100.0);
        assert_eq!(format_change(&metrics), "🔺 +$1.00 (+1.00%)");
    }

    #[test]
    fn test_change_flat_uses_flat_marker() {
        let metrics = DerivedMetrics::compute(99.995, 100.0);
        let change = format_change(&metrics);
        assert!(change.starts_with(Trend::Flat.marker()));
        assert!(!change.contains(Trend::Up.marker()));
        assert!(!change.contains(Trend::Down.marker()));
    }

    #[test]
    fn test_change_zero_has_no_plus() {
        let metrics = DerivedMetrics::compute(50.0, 50.0);
        assert_eq!(format_change(&metrics), "➖ $0.00 (0.00%)");
    }

    #[test]
    fn test_change_not_available() {
        let metrics = DerivedMetrics::compute(5.0, 0.0);
        assert_eq!(format_change(&metrics), "❓ N/A");
    }

    #[test]
    fn test_change_down() {
        let metrics = DerivedMetrics::compute(95.0, 100.0);
        assert_eq!(format_change(&metrics), "🔻 $-5.00 (-5.00%)");
    }

    #[test]
    fn test_labels_in_order() {
        let up = summary(101.0, 100.0);
        let labels: Vec<_> = up.fields().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, LABELS);

        let na = summary(3.0, 0.0);
        let labels: Vec<_> = na.fields().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, LABELS);
    }

    #[test]
    fn test_render() {
        let text = summary(101.0, 100.0).render();
        assert_eq!(
            text,
            "Company: apple\n\
             Symbol: AAPL\n\
             Current Price: $101.00\n\
             Previous Close: $100.00\n\
             Change: 🔺 +$1.00 (+1.00%)\n\
             Day's Range: $98.50 - $102.25\n"
        );
    }

    #[test]
    fn test_value_lookup() {
        let summary = summary(101.0, 100.0);
        assert_eq!(summary.value(LABEL_SYMBOL), Some("AAPL"));
        assert_eq!(summary.value("Volume"), None);
    }
}
