//! Products

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pre-order status assumed for products that do not carry one.
pub const DEFAULT_PREORDER_STATUS: &str = "active";

/// Product identifier, as assigned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a product id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Errors raised when a catalog product cannot be captured into a cart.
#[derive(Debug, Error, PartialEq)]
pub enum ProductError {
    /// The product has no id.
    #[error("product id is required")]
    MissingId,

    /// The product has no display name.
    #[error("product {0} has no name")]
    MissingName(ProductId),

    /// The product has no slug.
    #[error("product {0} has no slug")]
    MissingSlug(ProductId),

    /// The product price is below zero.
    #[error("product {0} has a negative price ({1})")]
    NegativePrice(ProductId, Decimal),
}

/// Catalog product, as presented by listing and detail pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog id
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// URL slug
    pub slug: String,

    /// Unit price
    pub price: Decimal,

    /// Primary image URL
    #[serde(default)]
    pub image: Option<String>,

    /// Pre-order status (e.g. `active`, `closing_soon`)
    #[serde(default)]
    pub preorder_status: Option<String>,

    /// Human readable delivery window
    #[serde(default)]
    pub delivery_window_text: Option<String>,

    /// Number of reservations placed against the product
    #[serde(default)]
    pub reservations_count: Option<u32>,

    /// Deposit required to reserve one unit
    #[serde(default)]
    pub deposit_amount: Option<Decimal>,

    /// Vendor business name
    #[serde(default)]
    pub vendor_name: Option<String>,

    /// Pre-order cutoff date
    #[serde(default, alias = "cutoff_datetime")]
    pub cutoff_date: Option<String>,

    /// Sizes a buyer may pick from
    #[serde(default)]
    pub available_sizes: Vec<String>,

    /// Colors a buyer may pick from
    #[serde(default)]
    pub available_colors: Vec<String>,
}

impl Product {
    /// Creates a product with only the required fields set.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        slug: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
            price,
            image: None,
            preorder_status: None,
            delivery_window_text: None,
            reservations_count: None,
            deposit_amount: None,
            vendor_name: None,
            cutoff_date: None,
            available_sizes: Vec::new(),
            available_colors: Vec::new(),
        }
    }

    /// Captures the fields a cart line needs for display.
    ///
    /// # Errors
    ///
    /// Returns a [`ProductError`] when a required field is blank or the price
    /// is negative.
    pub fn snapshot(&self) -> Result<ProductSnapshot, ProductError> {
        if self.id.as_str().trim().is_empty() {
            return Err(ProductError::MissingId);
        }

        if self.name.trim().is_empty() {
            return Err(ProductError::MissingName(self.id.clone()));
        }

        if self.slug.trim().is_empty() {
            return Err(ProductError::MissingSlug(self.id.clone()));
        }

        if self.price < Decimal::ZERO {
            return Err(ProductError::NegativePrice(self.id.clone(), self.price));
        }

        Ok(ProductSnapshot::from(self.clone()))
    }
}

/// Copy of a product held by a cart line.
///
/// Snapshots are not refreshed from the catalog and can go stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Catalog id
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// URL slug
    pub slug: String,

    /// Primary image URL, empty when the product has none
    #[serde(default)]
    pub image: String,

    /// Unit price at capture time
    pub price: Decimal,

    /// Pre-order status
    #[serde(default = "default_preorder_status")]
    pub preorder_status: String,

    /// Human readable delivery window, empty when unknown
    #[serde(default)]
    pub delivery_window_text: String,
}

impl From<Product> for ProductSnapshot {
    /// Captures a product without validating it. Use [`Product::snapshot`]
    /// for products entering the cart from the catalog.
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            slug: product.slug,
            image: product.image.unwrap_or_default(),
            price: product.price,
            preorder_status: product
                .preorder_status
                .unwrap_or_else(default_preorder_status),
            delivery_window_text: product.delivery_window_text.unwrap_or_default(),
        }
    }
}

fn default_preorder_status() -> String {
    DEFAULT_PREORDER_STATUS.to_string()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn snapshot_fills_display_defaults() -> TestResult {
        let product = Product::new("p1", "Air Max 90", "air-max-90", Decimal::from(100));

        let snapshot = product.snapshot()?;

        assert_eq!(snapshot.id, ProductId::from("p1"));
        assert_eq!(snapshot.image, "");
        assert_eq!(snapshot.preorder_status, DEFAULT_PREORDER_STATUS);
        assert_eq!(snapshot.delivery_window_text, "");
        assert_eq!(snapshot.price, Decimal::from(100));

        Ok(())
    }

    #[test]
    fn snapshot_keeps_optional_fields() -> TestResult {
        let mut product = Product::new("p2", "Tote", "tote", Decimal::new(4550, 2));
        product.image = Some("https://cdn.example/tote.jpg".to_string());
        product.preorder_status = Some("closing_soon".to_string());
        product.delivery_window_text = Some("2-3 weeks".to_string());

        let snapshot = product.snapshot()?;

        assert_eq!(snapshot.image, "https://cdn.example/tote.jpg");
        assert_eq!(snapshot.preorder_status, "closing_soon");
        assert_eq!(snapshot.delivery_window_text, "2-3 weeks");

        Ok(())
    }

    #[test]
    fn snapshot_rejects_blank_fields() {
        let missing_id = Product::new(" ", "Name", "slug", Decimal::ONE);
        let missing_name = Product::new("p1", "", "slug", Decimal::ONE);
        let missing_slug = Product::new("p1", "Name", "", Decimal::ONE);

        assert_eq!(missing_id.snapshot(), Err(ProductError::MissingId));
        assert_eq!(
            missing_name.snapshot(),
            Err(ProductError::MissingName(ProductId::from("p1")))
        );
        assert_eq!(
            missing_slug.snapshot(),
            Err(ProductError::MissingSlug(ProductId::from("p1")))
        );
    }

    #[test]
    fn snapshot_rejects_negative_price() {
        let product = Product::new("p1", "Name", "slug", Decimal::from(-5));

        assert!(
            matches!(product.snapshot(), Err(ProductError::NegativePrice(_, _))),
            "negative prices must be rejected"
        );
    }

    #[test]
    fn product_deserializes_catalog_payload() -> TestResult {
        let product: Product = serde_json::from_str(
            r#"{
                "id": "8f4f6a8e-1c1b-4c55-9c61-1f1f0a3f1b2c",
                "name": "Jordan 4",
                "slug": "jordan-4",
                "price": "1250.00",
                "cutoff_datetime": "2026-11-01T00:00:00Z",
                "available_sizes": ["42", "43"]
            }"#,
        )?;

        assert_eq!(product.price, Decimal::new(125_000, 2));
        assert_eq!(product.cutoff_date.as_deref(), Some("2026-11-01T00:00:00Z"));
        assert_eq!(product.available_sizes, vec!["42", "43"]);
        assert!(product.available_colors.is_empty());

        Ok(())
    }
}
