//! Money and number formatting

use crate::Currency;

/// Format an amount with its currency symbol
///
/// Won (`₩`) and Yen (`¥`) are rounded to whole units; every other symbol
/// gets exactly two decimal places. Digits are grouped in thousands and a
/// negative sign follows the symbol (`₩-1,000`).
///
/// # Arguments
/// * `value` - Amount to format
/// * `symbol` - Currency symbol placed before the number
pub fn format_money(value: f64, symbol: &str) -> String {
    let precision = if matches!(symbol, "₩" | "¥") { 0 } else { 2 };
    format!("{symbol}{}", render_grouped(value, precision))
}

/// Format an amount in the given currency
pub fn format_money_in(value: f64, currency: Currency) -> String {
    format_money(value, currency.symbol())
}

/// Format a quantity: whole numbers without decimals, others as written
pub fn format_quantity(value: f64) -> String {
    render_shortest(value)
}

/// Format a percentage rate for interpolation into "Tax (10%)"
///
/// Whole rates drop the fraction, so a rate of `10.0` reads "10", not "10.0".
pub fn format_rate(value: f64) -> String {
    render_shortest(value)
}

/// Format integer with thousand separators
pub fn format_with_thousands(n: i64, sep: &str) -> String {
    let s = n.to_string();
    match s.strip_prefix('-') {
        Some(digits) => format!("-{}", group_digits(digits, sep)),
        None => group_digits(&s, sep),
    }
}

fn render_shortest(value: f64) -> String {
    if value == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    value.to_string()
}

/// Render with fixed precision and "," thousands grouping
///
/// Rounding is done by the float formatter (ties to even on the decimal value).
fn render_grouped(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{value:.precision$}");
    // a negative that rounds to zero keeps its sign ("₩-0")
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let grouped = group_digits(int_part, ",");
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

fn group_digits(digits: &str, sep: &str) -> String {
    if sep.is_empty() {
        return digits.to_string();
    }

    let len = digits.len();
    let mut result = String::with_capacity(len + len / 3 * sep.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push_str(sep);
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_money_zero_decimal() {
        assert_eq!(format_money(1234567.0, "₩"), "₩1,234,567");
        assert_eq!(format_money(0.0, "₩"), "₩0");
        assert_eq!(format_money(999.0, "¥"), "¥999");
        assert_eq!(format_money(1000.4, "¥"), "¥1,000");
        assert_eq!(format_money(1000.6, "₩"), "₩1,001");
    }

    #[test]
    fn test_format_money_two_decimals() {
        assert_eq!(format_money(1234.5, "$"), "$1,234.50");
        assert_eq!(format_money(0.0, "€"), "€0.00");
        assert_eq!(format_money(1000000.0, "€"), "€1,000,000.00");
        assert_eq!(format_money(12.345678, "$"), "$12.35");
    }

    #[test]
    fn test_format_money_negative() {
        assert_eq!(format_money(-1000.0, "₩"), "₩-1,000");
        assert_eq!(format_money(-1234.5, "$"), "$-1,234.50");
        // rounds to zero, sign kept
        assert_eq!(format_money(-0.001, "$"), "$-0.00");
        assert_eq!(format_money(-0.4, "₩"), "₩-0");
        assert_eq!(format_money(0.4, "₩"), "₩0");
    }

    #[test]
    fn test_format_money_unknown_symbol_uses_two_decimals() {
        assert_eq!(format_money(5.0, "CHF "), "CHF 5.00");
    }

    #[test]
    fn test_format_money_in() {
        assert_eq!(format_money_in(2200.0, Currency::KRW), "₩2,200");
        assert_eq!(format_money_in(2200.0, Currency::USD), "$2,200.00");
        assert_eq!(format_money_in(2200.0, Currency::EUR), "€2,200.00");
        assert_eq!(format_money_in(2200.0, Currency::JPY), "¥2,200");
    }

    #[test]
    fn test_format_quantity_and_rate() {
        assert_eq!(format_quantity(2.0), "2");
        assert_eq!(format_quantity(1.5), "1.5");
        assert_eq!(format_rate(10.0), "10");
        assert_eq!(format_rate(10.5), "10.5");
        assert_eq!(format_rate(-0.0), "0");
    }

    #[test]
    fn test_format_with_thousands() {
        assert_eq!(format_with_thousands(0, ","), "0");
        assert_eq!(format_with_thousands(123, ","), "123");
        assert_eq!(format_with_thousands(1234, ","), "1,234");
        assert_eq!(format_with_thousands(1234567, ","), "1,234,567");
        assert_eq!(format_with_thousands(-1234567, ","), "-1,234,567");
        assert_eq!(format_with_thousands(1234567, ""), "1234567");
    }
}
