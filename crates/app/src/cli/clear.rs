use imports_app::context::AppContext;

pub(crate) fn run(context: &AppContext) -> Result<(), String> {
    context
        .cart
        .clear_cart()
        .map_err(|error| format!("failed to clear cart: {error}"))?;

    println!("cart cleared");

    Ok(())
}
