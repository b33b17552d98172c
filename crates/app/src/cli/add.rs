use clap::Args;
use imports::prelude::{Product, Variant};
use imports_app::context::AppContext;
use rust_decimal::Decimal;

use super::show::print_cart;

#[derive(Debug, Args)]
pub(crate) struct AddArgs {
    /// Catalog product id
    #[arg(long)]
    product_id: String,

    /// Product display name
    #[arg(long)]
    name: String,

    /// Product URL slug
    #[arg(long)]
    slug: String,

    /// Unit price in cedi
    #[arg(long)]
    price: Decimal,

    /// Primary image URL
    #[arg(long)]
    image: Option<String>,

    /// Selected size
    #[arg(long)]
    size: Option<String>,

    /// Selected color
    #[arg(long)]
    color: Option<String>,

    /// Units to add; values below one add one
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    quantity: i64,
}

pub(crate) async fn run(context: &AppContext, args: AddArgs) -> Result<(), String> {
    let mut product = Product::new(args.product_id, args.name, args.slug, args.price);
    product.image = args.image;

    context
        .cart
        .add_to_cart(&product, args.quantity, Variant::new(args.size, args.color))
        .await
        .map_err(|error| format!("failed to add to cart: {error}"))?;

    print_cart(context);

    Ok(())
}
