//! Invoice totals calculator

use serde::{Deserialize, Serialize};

/// Quantity and unit price of one line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineInput {
    pub quantity: f64,
    pub unit_price: f64,
}

/// Derived amounts for a set of lines
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub line_amounts: Vec<f64>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

/// Compute line amounts, subtotal, tax and total
///
/// No rounding happens here; values are rounded only when formatted.
/// The tax rate is not range-checked.
pub fn compute_totals(items: &[LineInput], tax_rate_percent: f64) -> Totals {
    let line_amounts: Vec<f64> = items
        .iter()
        .map(|item| item.quantity * item.unit_price)
        .collect();
    let subtotal: f64 = line_amounts.iter().sum();
    let tax = subtotal * tax_rate_percent / 100.0;

    Totals {
        line_amounts,
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn line(quantity: f64, unit_price: f64) -> LineInput {
        LineInput {
            quantity,
            unit_price,
        }
    }

    #[test]
    fn test_two_items_ten_percent() {
        let totals = compute_totals(&[line(1.0, 1000.0), line(2.0, 500.0)], 10.0);
        assert_eq!(totals.line_amounts, vec![1000.0, 1000.0]);
        assert_eq!(totals.subtotal, 2000.0);
        assert_eq!(totals.tax, 200.0);
        assert_eq!(totals.total, 2200.0);
    }

    #[test]
    fn test_empty_items() {
        let totals = compute_totals(&[], 10.0);
        assert_eq!(totals, Totals::default());
    }

    #[test]
    fn test_zero_rate() {
        let totals = compute_totals(&[line(3.0, 33.33)], 0.0);
        assert_eq!(totals.tax, 0.0);
        assert_eq!(totals.total, totals.subtotal);
    }

    #[test]
    fn test_no_intermediate_rounding() {
        let totals = compute_totals(&[line(1.0, 0.005), line(1.0, 0.005)], 0.0);
        assert!((totals.subtotal - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_invariants_hold_across_rates() {
        let items: Vec<LineInput> = (1..=25)
            .map(|i| line(i as f64, 1234.5 / i as f64 + 0.37))
            .collect();
        for rate in [0.0, 0.5, 7.25, 10.0, 33.3, 100.0] {
            let totals = compute_totals(&items, rate);
            let expected: f64 = items.iter().map(|i| i.quantity * i.unit_price).sum();
            assert!((totals.subtotal - expected).abs() < 1e-9);
            assert!((totals.tax - totals.subtotal * rate / 100.0).abs() < 1e-9);
            assert!((totals.total - (totals.subtotal + totals.tax)).abs() < 1e-9);
        }
    }
}
