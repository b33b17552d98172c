//! Imports prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::Cart,
    guest::{GuestItems, GuestItemsError},
    items::{CartItem, CartItemError, CartItemId, Variant, item_count},
    money::{CURRENCY, format_amount, money},
    products::{Product, ProductError, ProductId, ProductSnapshot},
    selection::SelectionSet,
    totals::{Delivery, Totals},
};
