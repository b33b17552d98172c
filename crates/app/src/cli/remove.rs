use clap::Args;
use imports::prelude::CartItemId;
use imports_app::context::AppContext;

use super::show::print_cart;

#[derive(Debug, Args)]
pub(crate) struct RemoveArgs {
    /// Id of the line to remove
    item_id: String,
}

pub(crate) async fn run(context: &AppContext, args: RemoveArgs) -> Result<(), String> {
    context
        .cart
        .remove_from_cart(&CartItemId::from(args.item_id))
        .await
        .map_err(|error| format!("failed to remove from cart: {error}"))?;

    print_cart(context);

    Ok(())
}
