//! Price calculations
//!
//! Money is `rust_decimal::Decimal` end to end; results are rounded to two
//! decimal places, midpoint away from zero.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::ProductAttribute;

/// Monetary precision
const DECIMAL_PLACES: u32 = 2;

/// Round a monetary value to cents
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Displayed price: base price plus the modifiers of active attributes.
pub fn compute_total_price<'a>(
    base_price: Decimal,
    attributes: impl IntoIterator<Item = &'a ProductAttribute>,
) -> Decimal {
    let modifiers: Decimal = attributes
        .into_iter()
        .filter(|a| a.is_active)
        .map(|a| a.price_modifier)
        .sum();
    round_money(base_price + modifiers)
}

/// Whole-number discount of `price` against `original_price`.
///
/// `None` unless the original price is greater than the current price.
pub fn discount_percent(original_price: Option<Decimal>, price: Decimal) -> Option<u32> {
    let original = original_price?;
    if original <= price || original <= Decimal::ZERO {
        return None;
    }
    ((original - price) / original * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
}

/// Total of one order line
#[inline]
pub fn line_total(unit_price: Decimal, quantity: i32) -> Decimal {
    round_money(unit_price * Decimal::from(quantity))
}

/// `(subtotal, total)` of an order from its line totals and the delivery fee
pub fn order_totals(
    line_totals: impl IntoIterator<Item = Decimal>,
    delivery_fee: Decimal,
) -> (Decimal, Decimal) {
    let subtotal = round_money(line_totals.into_iter().sum());
    (subtotal, round_money(subtotal + delivery_fee))
}

/// Currency display format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub decimal_separator: char,
    pub thousands_separator: char,
}

impl Default for CurrencyFormat {
    /// Brazilian real: `R$ 1.234,56`
    fn default() -> Self {
        Self {
            symbol: "R$".to_string(),
            decimal_separator: ',',
            thousands_separator: '.',
        }
    }
}

impl CurrencyFormat {
    pub fn format(&self, value: Decimal) -> String {
        let rounded = round_money(value);
        let digits = format!("{:.2}", rounded.abs());
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(self.thousands_separator);
            }
            grouped.push(ch);
        }

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        format!(
            "{}{} {}{}{}",
            sign, self.symbol, grouped, self.decimal_separator, frac_part
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(modifier: Decimal, is_active: bool) -> ProductAttribute {
        ProductAttribute {
            id: 1,
            product_id: 1,
            attribute_name: "Memória".into(),
            attribute_value: "16GB".into(),
            price_modifier: modifier,
            is_active,
            created_at: 0,
        }
    }

    #[test]
    fn test_total_adds_active_modifiers() {
        let attrs = vec![
            attr(Decimal::new(1000, 2), true),
            attr(Decimal::new(-500, 2), true),
        ];
        let total = compute_total_price(Decimal::new(10000, 2), &attrs);
        assert_eq!(total, Decimal::new(10500, 2));
    }

    #[test]
    fn test_inactive_modifiers_ignored() {
        let attrs = vec![
            attr(Decimal::new(1000, 2), true),
            attr(Decimal::new(9999, 2), false),
        ];
        let total = compute_total_price(Decimal::new(10000, 2), &attrs);
        assert_eq!(total, Decimal::new(11000, 2));
    }

    #[test]
    fn test_total_without_attributes_is_base() {
        let total = compute_total_price(Decimal::new(899900, 2), std::iter::empty());
        assert_eq!(total, Decimal::new(899900, 2));
    }

    #[test]
    fn test_round_money_midpoint_away_from_zero() {
        assert_eq!(round_money(Decimal::new(1005, 3)), Decimal::new(101, 2));
        assert_eq!(round_money(Decimal::new(-1005, 3)), Decimal::new(-101, 2));
        assert_eq!(round_money(Decimal::new(1004, 3)), Decimal::new(100, 2));
    }

    #[test]
    fn test_discount_percent() {
        assert_eq!(
            discount_percent(Some(Decimal::new(20000, 2)), Decimal::new(15000, 2)),
            Some(25)
        );
        assert_eq!(
            discount_percent(Some(Decimal::new(300, 0)), Decimal::new(200, 0)),
            Some(33)
        );
        assert_eq!(discount_percent(Some(Decimal::new(100, 0)), Decimal::new(100, 0)), None);
        assert_eq!(discount_percent(None, Decimal::new(100, 0)), None);
    }

    #[test]
    fn test_order_totals() {
        let lines = vec![
            line_total(Decimal::new(1890, 2), 2),
            line_total(Decimal::new(550, 2), 1),
        ];
        let (subtotal, total) = order_totals(lines, Decimal::new(700, 2));
        assert_eq!(subtotal, Decimal::new(4330, 2));
        assert_eq!(total, Decimal::new(5030, 2));
    }

    #[test]
    fn test_brl_format() {
        let fmt = CurrencyFormat::default();
        assert_eq!(fmt.format(Decimal::new(123456, 2)), "R$ 1.234,56");
        assert_eq!(fmt.format(Decimal::new(10500, 2)), "R$ 105,00");
        assert_eq!(fmt.format(Decimal::new(5, 1)), "R$ 0,50");
        assert_eq!(fmt.format(Decimal::new(123456789, 0)), "R$ 123.456.789,00");
        assert_eq!(fmt.format(Decimal::new(-250, 2)), "-R$ 2,50");
    }

    #[test]
    fn test_custom_format() {
        let fmt = CurrencyFormat {
            symbol: "US$".into(),
            decimal_separator: '.',
            thousands_separator: ',',
        };
        assert_eq!(fmt.format(Decimal::new(100000, 2)), "US$ 1,000.00");
    }
}
