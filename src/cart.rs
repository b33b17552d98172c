//! Cart

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::items::{CartItem, CartItemId, item_count};

/// Server cart: the draft order the backend keeps for a signed-in customer.
///
/// Every field is authoritative from the server. The client replaces the
/// whole value after each call and never patches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Draft order id
    pub id: String,

    /// Draft order number
    pub order_number: String,

    /// Lines, in display order
    pub items: Vec<CartItem>,

    /// Server computed subtotal over all lines
    pub subtotal: Decimal,

    /// Server computed delivery fee
    pub delivery_fee: Decimal,

    /// Server computed total
    pub total: Decimal,
}

impl Cart {
    /// Sum of line quantities.
    pub fn item_count(&self) -> u32 {
        item_count(&self.items)
    }

    /// Finds a line by its server id.
    pub fn get(&self, id: &CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
