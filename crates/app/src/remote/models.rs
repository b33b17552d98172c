//! Cart service request and response documents.

use imports::{
    prelude::{Cart, CartItem, CartItemId, Product, ProductId, ProductSnapshot, Variant},
    products::DEFAULT_PREORDER_STATUS,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::RemoteCartError;

/// Add-item request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddCartItem {
    /// Catalog id of the product
    pub product_id: ProductId,

    /// Units to add
    pub quantity: u32,

    /// Size and color, sent as `selected_size` / `selected_color`
    #[serde(flatten)]
    pub variant: Variant,
}

impl From<&CartItem> for AddCartItem {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id().clone(),
            quantity: item.quantity(),
            variant: item.variant().clone(),
        }
    }
}

/// Ids arrive as strings (UUIDs) or integers depending on the backend model.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum DocumentId {
    Text(String),
    Number(u64),
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        match id {
            DocumentId::Text(text) => text,
            DocumentId::Number(number) => number.to_string(),
        }
    }
}

/// Order detail document returned by every cart endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct CartDocument {
    id: DocumentId,
    #[serde(default)]
    order_number: String,
    #[serde(default)]
    items: Vec<CartItemDocument>,
    #[serde(default)]
    subtotal: Decimal,
    #[serde(default)]
    delivery_fee: Decimal,
    #[serde(default)]
    total: Decimal,
}

/// Line of an order detail document.
///
/// `total_price` is ignored; the line total is derived from `unit_price`.
/// Server products are captured as they come, without catalog validation.
#[derive(Debug, Deserialize)]
struct CartItemDocument {
    id: DocumentId,
    #[serde(default)]
    product: Option<DocumentId>,
    #[serde(default)]
    product_data: Option<Product>,
    #[serde(default)]
    product_name: Option<String>,
    quantity: u32,
    unit_price: Decimal,
    #[serde(flatten)]
    variant: Variant,
}

impl CartItemDocument {
    fn into_item(self) -> Result<CartItem, RemoteCartError> {
        let id = CartItemId::new(String::from(self.id));

        let product = match (self.product_data, self.product) {
            (Some(product), _) => ProductSnapshot::from(product),
            (None, Some(product_id)) => ProductSnapshot {
                id: ProductId::new(String::from(product_id)),
                name: self.product_name.unwrap_or_default(),
                slug: String::new(),
                image: String::new(),
                price: self.unit_price,
                preorder_status: DEFAULT_PREORDER_STATUS.to_string(),
                delivery_window_text: String::new(),
            },
            (None, None) => {
                return Err(RemoteCartError::InvalidDocument(format!(
                    "line {id} has no product"
                )));
            }
        };

        CartItem::new(id, product, self.quantity, self.unit_price, self.variant)
            .map_err(|error| RemoteCartError::InvalidDocument(error.to_string()))
    }
}

impl TryFrom<CartDocument> for Cart {
    type Error = RemoteCartError;

    fn try_from(document: CartDocument) -> Result<Self, Self::Error> {
        let items = document
            .items
            .into_iter()
            .filter(|item| item.quantity > 0)
            .map(CartItemDocument::into_item)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: document.id.into(),
            order_number: document.order_number,
            items,
            subtotal: document.subtotal,
            delivery_fee: document.delivery_fee,
            total: document.total,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn decode(json: &str) -> TestResult<Cart> {
        let document: CartDocument = serde_json::from_str(json)?;

        Ok(Cart::try_from(document)?)
    }

    #[test]
    fn decodes_order_detail_with_string_decimals() -> TestResult {
        let cart = decode(
            r#"{
                "id": "7d1c3a52-0e55-4c1e-9a0f-2b1b53f0e001",
                "order_number": "LI-2026-0042",
                "state": "DRAFT",
                "items": [{
                    "id": "a1",
                    "product": "p1",
                    "product_data": {
                        "id": "p1",
                        "name": "Jordan 4",
                        "slug": "jordan-4",
                        "image": "https://cdn.example/j4.jpg",
                        "price": "1250.00",
                        "preorder_status": "active",
                        "delivery_window_text": "Ships in 3 weeks",
                        "is_featured": true
                    },
                    "product_name": "Jordan 4",
                    "product_sku": "J4-001",
                    "quantity": 2,
                    "unit_price": "1250.00",
                    "total_price": "2500.00"
                }],
                "subtotal": "2500.00",
                "delivery_fee": "15.00",
                "platform_fee": "0.00",
                "total": "2515.00"
            }"#,
        )?;

        assert_eq!(cart.order_number, "LI-2026-0042");
        assert_eq!(cart.delivery_fee, Decimal::new(1500, 2));
        assert_eq!(cart.item_count(), 2);

        let line = cart.items.first().ok_or("cart should have a line")?;

        assert_eq!(line.id().as_str(), "a1");
        assert_eq!(line.product().slug, "jordan-4");
        assert_eq!(line.product().delivery_window_text, "Ships in 3 weeks");
        assert_eq!(line.total_price(), Decimal::new(250_000, 2));

        Ok(())
    }

    #[test]
    fn falls_back_to_line_fields_without_product_data() -> TestResult {
        let cart = decode(
            r#"{
                "id": 17,
                "order_number": "LI-17",
                "items": [{
                    "id": 3,
                    "product": "p9",
                    "product_name": "Tote Bag",
                    "quantity": 1,
                    "unit_price": 45.5
                }],
                "subtotal": 45.5,
                "delivery_fee": 15,
                "total": 60.5
            }"#,
        )?;

        assert_eq!(cart.id, "17");

        let line = cart.items.first().ok_or("cart should have a line")?;

        assert_eq!(line.id().as_str(), "3");
        assert_eq!(line.product_id(), &ProductId::from("p9"));
        assert_eq!(line.product().name, "Tote Bag");
        assert_eq!(line.unit_price(), Decimal::new(455, 1));

        Ok(())
    }

    #[test]
    fn line_without_product_is_rejected() -> TestResult {
        let document: CartDocument = serde_json::from_str(
            r#"{"id": "c1", "items": [{"id": "a1", "quantity": 1, "unit_price": "10.00"}]}"#,
        )?;

        let result = Cart::try_from(document);

        assert!(
            matches!(result, Err(RemoteCartError::InvalidDocument(_))),
            "expected InvalidDocument, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn overflowing_line_total_is_rejected() -> TestResult {
        let document: CartDocument = serde_json::from_str(&format!(
            r#"{{"id": "c1", "items": [{{"id": "a1", "product": "p1", "quantity": 3, "unit_price": "{}"}}]}}"#,
            Decimal::MAX
        ))?;

        let result = Cart::try_from(document);

        assert!(
            matches!(result, Err(RemoteCartError::InvalidDocument(_))),
            "expected InvalidDocument, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn empty_cart_document_defaults_totals() -> TestResult {
        let cart = decode(r#"{"id": "c1", "order_number": "LI-1", "items": []}"#)?;

        assert!(cart.is_empty());
        assert_eq!(cart.total, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn add_item_body_flattens_variant() -> TestResult {
        let body = serde_json::to_value(AddCartItem {
            product_id: ProductId::from("p1"),
            quantity: 2,
            variant: Variant::new(Some("M".to_string()), Some("Red".to_string())),
        })?;

        assert_eq!(
            body,
            serde_json::json!({
                "product_id": "p1",
                "quantity": 2,
                "selected_size": "M",
                "selected_color": "Red"
            })
        );

        Ok(())
    }
}
