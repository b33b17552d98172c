use clap::Args;
use imports::prelude::{CartItemId, Delivery, format_amount};
use imports_app::{auth::AuthState, context::AppContext};

#[derive(Debug, Args)]
pub(crate) struct ShowArgs {
    /// Only select these lines for the totals; repeat for several
    #[arg(long = "select", value_name = "ITEM_ID")]
    select: Vec<String>,
}

pub(crate) fn run(context: &AppContext, args: ShowArgs) -> Result<(), String> {
    if !args.select.is_empty() {
        context.cart.select_all(false);

        for id in args.select {
            context.cart.toggle_selection(&CartItemId::from(id));
        }
    }

    print_cart(context);

    Ok(())
}

pub(crate) fn print_cart(context: &AppContext) {
    let cart = &context.cart;
    let state = cart.snapshot();
    let items = cart.items();

    match (&state.cart, context.session.is_authenticated()) {
        (Some(server), _) => println!("cart: {}", server.order_number),
        (None, true) => println!("cart: unavailable"),
        (None, false) => println!("cart: guest"),
    }

    if items.is_empty() {
        println!("no items in cart");
        return;
    }

    for item in &items {
        let marker = if state.selection.contains(item.id()) {
            "x"
        } else {
            " "
        };

        let variant = [item.variant().size.as_deref(), item.variant().color.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" / ");

        println!(
            "[{marker}] {id}  {name}{variant}  {quantity} x {unit} = {total}",
            id = item.id(),
            name = item.product().name,
            variant = if variant.is_empty() {
                String::new()
            } else {
                format!(" ({variant})")
            },
            quantity = item.quantity(),
            unit = format_amount(item.unit_price()),
            total = format_amount(item.total_price()),
        );
    }

    let totals = cart.totals();

    println!();
    println!("items: {}", state.item_count);
    println!("selected: {}", totals.selected_count);
    println!("subtotal: {}", format_amount(totals.subtotal));

    match totals.delivery {
        Delivery::Charged(fee) => println!("delivery: {}", format_amount(fee)),
        Delivery::AtCheckout => println!("delivery: calculated at checkout"),
        Delivery::NotApplicable => println!("delivery: -"),
    }

    println!("total: {}", format_amount(totals.total));
}
