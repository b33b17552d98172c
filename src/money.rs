//! Money

use rust_decimal::Decimal;
use rusty_money::{Money, iso};

/// Currency every storefront price is quoted in.
pub const CURRENCY: &iso::Currency = iso::GHS;

/// Wraps an amount in the storefront currency.
pub fn money(amount: Decimal) -> Money<'static, iso::Currency> {
    Money::from_decimal(amount, CURRENCY)
}

/// Formats an amount for display, with currency symbol and separators.
pub fn format_amount(amount: Decimal) -> String {
    money(amount).to_string()
}
