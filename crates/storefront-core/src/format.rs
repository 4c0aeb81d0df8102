//! # Presentation Formatting
//!
//! Renders resolved amounts for display. Resolution never depends on this
//! module; it sits on top of the `(amount, currency, symbol)` results.
//!
//! ```text
//!   format_amount(1234567.5, "INR")  → "12,34,567.50"   (lakh/crore)
//!   format_amount(1234567.5, "USD")  → "1,234,567.50"
//!   format_amount(1234.4,    "JPY")  → "1,234"
//!   format_price(…, "INR", "₹")      → "₹12,34,567.50"
//! ```

use crate::money::Money;
use crate::registry::normalize_code;

/// Currencies displayed without minor units.
const ZERO_DECIMAL_CURRENCIES: &[&str] = &["JPY", "KRW"];

/// Decimal places shown for a currency.
pub fn decimal_places(currency: &str) -> u32 {
    let code = normalize_code(currency);
    if ZERO_DECIMAL_CURRENCIES.contains(&code.as_str()) {
        0
    } else {
        2
    }
}

/// Formats an amount with the currency's decimal places and grouping.
///
/// ## Example
/// ```rust
/// use storefront_core::format::format_amount;
/// use storefront_core::Money;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_amount(Money::new(dec!(2499)), "INR"), "2,499.00");
/// assert_eq!(format_amount(Money::new(dec!(-1500.5)), "usd"), "-1,500.50");
/// ```
pub fn format_amount(amount: Money, currency: &str) -> String {
    let dp = decimal_places(currency);
    let rounded = amount.round_dp(dp).amount();

    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.*}", dp as usize, rounded.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let grouped = if normalize_code(currency) == "INR" {
        group_indian(int_part)
    } else {
        group_thousands(int_part)
    };

    let mut out = String::with_capacity(grouped.len() + 4);
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Symbol followed by the formatted amount, sign first for negatives.
pub fn format_price(amount: Money, currency: &str, symbol: &str) -> String {
    let formatted = format_amount(amount, currency);
    match formatted.strip_prefix('-') {
        Some(rest) => format!("-{symbol}{rest}"),
        None => format!("{symbol}{formatted}"),
    }
}

fn group_thousands(digits: &str) -> String {
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*b as char);
    }
    out
}

// Last three digits, then groups of two: 1,23,45,678.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let bytes = head.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(*b as char);
    }
    out.push(',');
    out.push_str(tail);
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_decimal_places() {
        assert_eq!(decimal_places("JPY"), 0);
        assert_eq!(decimal_places("krw"), 0);
        assert_eq!(decimal_places("USD"), 2);
        assert_eq!(decimal_places("XYZ"), 2);
    }

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(format_amount(Money::new(dec!(0)), "USD"), "0.00");
        assert_eq!(format_amount(Money::new(dec!(999.999)), "USD"), "1,000.00");
        assert_eq!(format_amount(Money::new(dec!(1234567.5)), "EUR"), "1,234,567.50");
        assert_eq!(format_amount(Money::new(dec!(100000)), "GBP"), "100,000.00");
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_amount(Money::new(dec!(999)), "INR"), "999.00");
        assert_eq!(format_amount(Money::new(dec!(1000)), "INR"), "1,000.00");
        assert_eq!(format_amount(Money::new(dec!(123456)), "INR"), "1,23,456.00");
        assert_eq!(format_amount(Money::new(dec!(12345678.9)), "INR"), "1,23,45,678.90");
    }

    #[test]
    fn test_zero_decimal_currency_rounds() {
        assert_eq!(format_amount(Money::new(dec!(1234.5)), "JPY"), "1,235");
        assert_eq!(format_amount(Money::new(dec!(999)), "KRW"), "999");
    }

    #[test]
    fn test_format_price_places_sign_before_symbol() {
        assert_eq!(format_price(Money::new(dec!(44.991)), "USD", "$"), "$44.99");
        assert_eq!(format_price(Money::new(dec!(-5)), "GBP", "\u{00a3}"), "-\u{00a3}5.00");
        assert_eq!(format_price(Money::new(dec!(2499)), "INR", "\u{20b9}"), "\u{20b9}2,499.00");
    }
}
