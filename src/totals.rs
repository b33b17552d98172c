//! Totals
//!
//! Display-only aggregates over the selected lines. Nothing here touches
//! persisted state, and delivery fees are never computed on the client.

use rust_decimal::Decimal;

use crate::{cart::Cart, items::CartItem, selection::SelectionSet};

/// Delivery line of the order summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Fee quoted by the server cart and added to the total.
    Charged(Decimal),

    /// Server cart with nothing selected; no fee is added.
    NotApplicable,

    /// Guest cart; the fee is calculated at checkout.
    AtCheckout,
}

impl Delivery {
    /// Fee added to the total, if any.
    pub fn fee(self) -> Option<Decimal> {
        match self {
            Self::Charged(fee) => Some(fee),
            Self::NotApplicable | Self::AtCheckout => None,
        }
    }
}

/// Order summary for the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    /// Sum of `total_price` over selected lines
    pub subtotal: Decimal,

    /// Delivery line
    pub delivery: Delivery,

    /// `subtotal` plus any charged delivery fee
    pub total: Decimal,

    /// Number of selected lines
    pub selected_count: usize,

    /// Whether the collection is non-empty and every line is selected
    pub all_selected: bool,
}

impl Totals {
    /// Totals with no lines at all.
    pub fn empty() -> Self {
        Self {
            subtotal: Decimal::ZERO,
            delivery: Delivery::NotApplicable,
            total: Decimal::ZERO,
            selected_count: 0,
            all_selected: false,
        }
    }

    /// Totals for guest lines; delivery is deferred to checkout.
    pub fn for_guest(items: &[CartItem], selection: &SelectionSet) -> Self {
        let mut totals = Self::over(items, selection);
        totals.delivery = Delivery::AtCheckout;

        totals
    }

    /// Totals for a server cart, using its authoritative delivery fee.
    pub fn for_cart(cart: &Cart, selection: &SelectionSet) -> Self {
        let mut totals = Self::over(&cart.items, selection);

        if totals.selected_count > 0 {
            totals.delivery = Delivery::Charged(cart.delivery_fee);
            totals.total = totals.subtotal.saturating_add(cart.delivery_fee);
        }

        totals
    }

    fn over(items: &[CartItem], selection: &SelectionSet) -> Self {
        let selected = selection.filter(items);
        let subtotal = selected
            .iter()
            .fold(Decimal::ZERO, |sum, item| sum.saturating_add(item.total_price()));

        Self {
            subtotal,
            delivery: Delivery::NotApplicable,
            total: subtotal,
            selected_count: selected.len(),
            all_selected: !items.is_empty() && selected.len() == items.len(),
        }
    }
}
