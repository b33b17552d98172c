//! Test Helpers

use imports::prelude::{
    Cart, CartItem, CartItemError, CartItemId, GuestItems, GuestItemsError, Product,
    ProductSnapshot, Variant,
};
use rust_decimal::Decimal;

/// A catalog product named after its id.
pub(crate) fn product(id: &str, price: i64) -> Product {
    Product::new(
        id,
        format!("Product {id}"),
        format!("product-{id}"),
        Decimal::from(price),
    )
}

/// A server cart line.
pub(crate) fn server_line(
    id: &str,
    product_id: &str,
    price: i64,
    quantity: u32,
) -> Result<CartItem, CartItemError> {
    CartItem::new(
        CartItemId::from(id),
        ProductSnapshot::from(product(product_id, price)),
        quantity,
        Decimal::from(price),
        Variant::none(),
    )
}

/// A server cart with the standard 15.00 delivery fee.
pub(crate) fn server_cart(items: Vec<CartItem>) -> Cart {
    let subtotal = items.iter().map(CartItem::total_price).sum::<Decimal>();
    let delivery_fee = Decimal::new(1500, 2);

    Cart {
        id: "cart-1".to_string(),
        order_number: "LI-0001".to_string(),
        items,
        subtotal,
        delivery_fee,
        total: subtotal + delivery_fee,
    }
}

/// A persisted guest slot holding `(product id, price, quantity)` lines.
pub(crate) fn guest_payload(lines: &[(&str, i64, u32)]) -> Result<String, GuestItemsError> {
    let mut items = GuestItems::new();

    for &(id, price, quantity) in lines {
        items.add(
            ProductSnapshot::from(product(id, price)),
            quantity,
            Variant::none(),
        )?;
    }

    items.to_json()
}
