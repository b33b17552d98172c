//! Cart Items

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::products::{ProductId, ProductSnapshot};

/// Prefix of line ids minted on the client for guest carts.
pub const GUEST_ITEM_ID_PREFIX: &str = "guest_";

/// Errors raised while pricing a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartItemError {
    /// `unit_price * quantity` does not fit in a decimal.
    #[error("line total overflows: {unit_price} x {quantity}")]
    TotalOverflow {
        /// Unit price of the line
        unit_price: Decimal,

        /// Requested quantity
        quantity: u32,
    },
}

/// Cart line identifier.
///
/// Guest ids are minted locally and server ids are assigned by the backend.
/// The two spaces are never compared with each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartItemId(String);

impl CartItemId {
    /// Wraps an existing id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mints a fresh, time-ordered id for a guest line.
    pub fn new_guest() -> Self {
        Self(format!("{GUEST_ITEM_ID_PREFIX}{}", Uuid::now_v7().simple()))
    }

    /// Whether the id was minted for a guest line.
    pub fn is_guest(&self) -> bool {
        self.0.starts_with(GUEST_ITEM_ID_PREFIX)
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CartItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for CartItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CartItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Size and color picked for a line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variant {
    /// Selected size
    #[serde(
        rename = "selected_size",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub size: Option<String>,

    /// Selected color
    #[serde(
        rename = "selected_color",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<String>,
}

impl Variant {
    /// A line without size or color.
    pub fn none() -> Self {
        Self::default()
    }

    /// Builds a variant from optional size and color.
    pub fn new(size: Option<String>, color: Option<String>) -> Self {
        Self { size, color }
    }
}

/// A single cart line.
///
/// `total_price` is derived from `unit_price` and `quantity` whenever either
/// changes, so `total_price == unit_price * quantity` holds for every value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CartItemRecord", into = "CartItemRecord")]
pub struct CartItem {
    id: CartItemId,
    product: ProductSnapshot,
    quantity: u32,
    unit_price: Decimal,
    total_price: Decimal,
    variant: Variant,
}

impl CartItem {
    /// Creates a line from its parts; the total is derived.
    ///
    /// # Errors
    ///
    /// Returns [`CartItemError::TotalOverflow`] if the total cannot be
    /// represented.
    pub fn new(
        id: CartItemId,
        product: ProductSnapshot,
        quantity: u32,
        unit_price: Decimal,
        variant: Variant,
    ) -> Result<Self, CartItemError> {
        Ok(Self {
            id,
            product,
            quantity,
            unit_price,
            total_price: line_total(unit_price, quantity)?,
            variant,
        })
    }

    /// Creates a guest line, priced at the snapshot's current price.
    ///
    /// # Errors
    ///
    /// Returns [`CartItemError::TotalOverflow`] if the total cannot be
    /// represented.
    pub fn guest(
        product: ProductSnapshot,
        quantity: u32,
        variant: Variant,
    ) -> Result<Self, CartItemError> {
        let unit_price = product.price;

        Self::new(CartItemId::new_guest(), product, quantity, unit_price, variant)
    }

    /// Line id
    pub fn id(&self) -> &CartItemId {
        &self.id
    }

    /// Product snapshot
    pub fn product(&self) -> &ProductSnapshot {
        &self.product
    }

    /// Product id of the snapshot
    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Quantity
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price captured for this line
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// `unit_price * quantity`
    pub fn total_price(&self) -> Decimal {
        self.total_price
    }

    /// Selected size and color
    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    /// Whether this line holds the given product in the given variant.
    pub fn matches(&self, product: &ProductId, variant: &Variant) -> bool {
        &self.product.id == product && &self.variant == variant
    }

    /// Sets an absolute quantity and re-derives the total.
    ///
    /// # Errors
    ///
    /// Returns [`CartItemError::TotalOverflow`] if the new total cannot be
    /// represented; the line is left unchanged.
    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), CartItemError> {
        self.total_price = line_total(self.unit_price, quantity)?;
        self.quantity = quantity;

        Ok(())
    }

    /// Adds to the quantity and re-derives the total.
    ///
    /// # Errors
    ///
    /// Returns [`CartItemError::TotalOverflow`] if the new total cannot be
    /// represented; the line is left unchanged.
    pub fn add_quantity(&mut self, quantity: u32) -> Result<(), CartItemError> {
        self.set_quantity(self.quantity.saturating_add(quantity))
    }
}

/// Sums the quantities of the given lines.
pub fn item_count<'a>(items: impl IntoIterator<Item = &'a CartItem>) -> u32 {
    items
        .into_iter()
        .fold(0_u32, |count, item| count.saturating_add(item.quantity()))
}

fn line_total(unit_price: Decimal, quantity: u32) -> Result<Decimal, CartItemError> {
    unit_price
        .checked_mul(Decimal::from(quantity))
        .ok_or(CartItemError::TotalOverflow {
            unit_price,
            quantity,
        })
}

/// Serialized shape of a cart line.
///
/// A stored `total_price` is accepted but never trusted; it is re-derived.
#[derive(Debug, Serialize, Deserialize)]
struct CartItemRecord {
    id: CartItemId,
    product: ProductSnapshot,
    quantity: u32,
    unit_price: Decimal,
    #[serde(default)]
    total_price: Decimal,
    #[serde(flatten)]
    variant: Variant,
}

impl TryFrom<CartItemRecord> for CartItem {
    type Error = CartItemError;

    fn try_from(record: CartItemRecord) -> Result<Self, Self::Error> {
        Self::new(
            record.id,
            record.product,
            record.quantity,
            record.unit_price,
            record.variant,
        )
    }
}

impl From<CartItem> for CartItemRecord {
    fn from(item: CartItem) -> Self {
        Self {
            id: item.id,
            product: item.product,
            quantity: item.quantity,
            unit_price: item.unit_price,
            total_price: item.total_price,
            variant: item.variant,
        }
    }
}
