//! Guest Items
//!
//! Cart lines held by an unauthenticated visitor. The collection has no
//! server cart around it and knows nothing about delivery; it only keeps its
//! lines consolidated and serializes to the persisted guest slot format (a
//! JSON array of cart lines).

use thiserror::Error;

use crate::{
    items::{CartItem, CartItemError, CartItemId, Variant, item_count},
    products::ProductSnapshot,
};

/// Errors raised while reading or writing the persisted guest format.
#[derive(Debug, Error)]
pub enum GuestItemsError {
    /// The stored payload is not a valid array of cart lines.
    #[error("guest cart payload is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    /// The collection could not be encoded.
    #[error("failed to encode guest cart: {0}")]
    Encode(#[source] serde_json::Error),

    /// A line could not be priced.
    #[error(transparent)]
    Item(#[from] CartItemError),
}

/// Ordered guest cart lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuestItems {
    items: Vec<CartItem>,
}

impl GuestItems {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a persisted payload.
    ///
    /// Lines stored with a zero quantity are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`GuestItemsError::Corrupt`] if the payload cannot be parsed.
    pub fn from_json(payload: &str) -> Result<Self, GuestItemsError> {
        let items: Vec<CartItem> =
            serde_json::from_str(payload).map_err(GuestItemsError::Corrupt)?;

        Ok(Self::from(items))
    }

    /// Encodes the collection to the persisted payload.
    ///
    /// # Errors
    ///
    /// Returns [`GuestItemsError::Encode`] if serialization fails.
    pub fn to_json(&self) -> Result<String, GuestItemsError> {
        serde_json::to_string(&self.items).map_err(GuestItemsError::Encode)
    }

    /// Adds `quantity` of a product in the given variant.
    ///
    /// A line for the same product and variant absorbs the quantity;
    /// otherwise a new line with a fresh guest id is appended. Returns the id
    /// of the affected line.
    ///
    /// # Errors
    ///
    /// Returns [`GuestItemsError::Item`] if the line total would overflow;
    /// the collection is left unchanged.
    pub fn add(
        &mut self,
        product: ProductSnapshot,
        quantity: u32,
        variant: Variant,
    ) -> Result<CartItemId, GuestItemsError> {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.matches(&product.id, &variant))
        {
            existing.add_quantity(quantity)?;

            return Ok(existing.id().clone());
        }

        let item = CartItem::guest(product, quantity, variant)?;
        let id = item.id().clone();

        self.items.push(item);

        Ok(id)
    }

    /// Removes the line with the given id. Returns whether a line was removed.
    pub fn remove(&mut self, id: &CartItemId) -> bool {
        let before = self.items.len();

        self.items.retain(|item| item.id() != id);

        self.items.len() != before
    }

    /// Sets an absolute quantity. Zero or below removes the line.
    ///
    /// Returns whether a line with the given id existed.
    ///
    /// # Errors
    ///
    /// Returns [`GuestItemsError::Item`] if the line total would overflow;
    /// the line is left unchanged.
    pub fn set_quantity(
        &mut self,
        id: &CartItemId,
        quantity: i64,
    ) -> Result<bool, GuestItemsError> {
        if quantity <= 0 {
            return Ok(self.remove(id));
        }

        let Some(item) = self.items.iter_mut().find(|item| item.id() == id) else {
            return Ok(false);
        };

        item.set_quantity(u32::try_from(quantity).unwrap_or(u32::MAX))?;

        Ok(true)
    }

    /// Finds a line by id.
    pub fn get(&self, id: &CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Sum of line quantities.
    pub fn item_count(&self) -> u32 {
        item_count(&self.items)
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drops every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl From<Vec<CartItem>> for GuestItems {
    fn from(mut items: Vec<CartItem>) -> Self {
        items.retain(|item| item.quantity() > 0);

        Self { items }
    }
}

impl IntoIterator for GuestItems {
    type Item = CartItem;
    type IntoIter = std::vec::IntoIter<CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a GuestItems {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::products::Product;

    use super::*;

    fn snapshot(id: &str, price: i64) -> TestResult<ProductSnapshot> {
        Ok(Product::new(id, "Sneaker", "sneaker", Decimal::from(price)).snapshot()?)
    }

    #[test]
    fn adding_same_product_consolidates() -> TestResult {
        let mut guest = GuestItems::new();

        let first = guest.add(snapshot("p1", 100)?, 1, Variant::none())?;
        let count_before = guest.item_count();
        let second = guest.add(snapshot("p1", 100)?, 2, Variant::none())?;

        assert_eq!(first, second);
        assert_eq!(guest.len(), 1);
        assert_eq!(guest.item_count(), count_before + 2);

        let item = guest.get(&first).ok_or("line should exist")?;

        assert_eq!(item.quantity(), 3);
        assert_eq!(item.total_price(), Decimal::from(300));

        Ok(())
    }

    #[test]
    fn different_variants_are_separate_lines() -> TestResult {
        let mut guest = GuestItems::new();

        guest.add(
            snapshot("p1", 100)?,
            1,
            Variant::new(Some("M".to_string()), None),
        )?;
        guest.add(
            snapshot("p1", 100)?,
            1,
            Variant::new(Some("L".to_string()), None),
        )?;

        assert_eq!(guest.len(), 2);
        assert_eq!(guest.item_count(), 2);

        Ok(())
    }

    #[test]
    fn removing_twice_is_a_no_op() -> TestResult {
        let mut guest = GuestItems::new();
        let id = guest.add(snapshot("p1", 10)?, 1, Variant::none())?;
        guest.add(snapshot("p2", 10)?, 1, Variant::none())?;

        assert!(guest.remove(&id), "first removal removes the line");

        let after_first = guest.clone();

        assert!(!guest.remove(&id), "second removal finds nothing");
        assert!(!guest.remove(&CartItemId::from("never-existed")));
        assert_eq!(guest, after_first);

        Ok(())
    }

    #[test]
    fn zero_or_negative_quantity_removes() -> TestResult {
        let mut guest = GuestItems::new();
        let zero = guest.add(snapshot("p1", 10)?, 2, Variant::none())?;
        let negative = guest.add(snapshot("p2", 10)?, 2, Variant::none())?;

        assert!(guest.set_quantity(&zero, 0)?);
        assert!(guest.set_quantity(&negative, -3)?);
        assert!(guest.is_empty(), "both lines should be gone");

        Ok(())
    }

    #[test]
    fn set_quantity_is_absolute() -> TestResult {
        let mut guest = GuestItems::new();
        let id = guest.add(snapshot("p1", 15)?, 2, Variant::none())?;

        assert!(guest.set_quantity(&id, 7)?);

        let item = guest.get(&id).ok_or("line should exist")?;

        assert_eq!(item.quantity(), 7);
        assert_eq!(item.total_price(), Decimal::from(105));
        assert!(!guest.set_quantity(&CartItemId::from("missing"), 4)?);

        Ok(())
    }

    #[test]
    fn json_payload_survives_a_reload() -> TestResult {
        let mut guest = GuestItems::new();
        guest.add(
            snapshot("p1", 100)?,
            3,
            Variant::new(None, Some("Black".to_string())),
        )?;

        let reloaded = GuestItems::from_json(&guest.to_json()?)?;

        assert_eq!(reloaded, guest);

        Ok(())
    }

    #[test]
    fn corrupt_payload_is_an_error() {
        let result = GuestItems::from_json("{not json");

        assert!(
            matches!(result, Err(GuestItemsError::Corrupt(_))),
            "expected Corrupt, got {result:?}"
        );
    }

    #[test]
    fn overflowing_stored_total_is_corrupt() {
        let payload = format!(
            r#"[{{"id": "guest_a", "product": {{"id": "p1", "name": "A", "slug": "a", "price": 5}},
                 "quantity": 2, "unit_price": "{}"}}]"#,
            Decimal::MAX
        );

        let result = GuestItems::from_json(&payload);

        assert!(
            matches!(result, Err(GuestItemsError::Corrupt(_))),
            "expected Corrupt, got {result:?}"
        );
    }

    #[test]
    fn overflowing_add_is_refused() -> TestResult {
        let price = Decimal::from_i128_with_scale(10_i128.pow(25), 0);
        let mut guest = GuestItems::new();
        guest.add(snapshot("p0", 10)?, 1, Variant::none())?;

        let pricey = Product::new("p1", "Watch", "watch", price).snapshot()?;
        let result = guest.add(pricey, 10_000, Variant::none());

        assert!(
            matches!(result, Err(GuestItemsError::Item(_))),
            "expected Item, got {result:?}"
        );
        assert_eq!(guest.len(), 1);

        let id = guest.add(
            Product::new("p2", "Ring", "ring", price).snapshot()?,
            1,
            Variant::none(),
        )?;
        let before = guest.clone();

        assert!(guest.set_quantity(&id, 10_000).is_err(), "total would overflow");
        assert_eq!(guest, before);

        Ok(())
    }

    #[test]
    fn stored_zero_quantity_lines_are_dropped() -> TestResult {
        let guest = GuestItems::from_json(
            r#"[
                {"id": "guest_a", "product": {"id": "p1", "name": "A", "slug": "a", "price": 5},
                 "quantity": 0, "unit_price": 5, "total_price": 0},
                {"id": "guest_b", "product": {"id": "p2", "name": "B", "slug": "b", "price": 5},
                 "quantity": 1, "unit_price": 5, "total_price": 5}
            ]"#,
        )?;

        assert_eq!(guest.len(), 1);
        assert_eq!(guest.item_count(), 1);

        Ok(())
    }
}
