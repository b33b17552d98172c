use clap::Args;
use imports::prelude::CartItemId;
use imports_app::context::AppContext;

use super::show::print_cart;

#[derive(Debug, Args)]
pub(crate) struct UpdateArgs {
    /// Id of the line to change
    item_id: String,

    /// New quantity; zero or below removes the line
    #[arg(allow_negative_numbers = true)]
    quantity: i64,
}

pub(crate) async fn run(context: &AppContext, args: UpdateArgs) -> Result<(), String> {
    context
        .cart
        .update_quantity(&CartItemId::from(args.item_id), args.quantity)
        .await
        .map_err(|error| format!("failed to update cart: {error}"))?;

    print_cart(context);

    Ok(())
}
