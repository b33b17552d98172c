use clap::{Parser, Subcommand};
use imports_app::{config::AppConfig, context::AppContext, observability};

mod add;
mod clear;
mod remove;
mod show;
mod update;

#[derive(Debug, Parser)]
#[command(name = "imports-cart", about = "London's Imports cart client", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List cart lines, selection and totals
    Show(show::ShowArgs),

    /// Add a product to the cart
    Add(add::AddArgs),

    /// Remove a line from the cart
    Remove(remove::RemoveArgs),

    /// Set the quantity of a line
    Update(update::UpdateArgs),

    /// Forget the local cart and erase the guest slot
    Clear,
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init_logging(&self.config.logging)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        let context = AppContext::from_config(&self.config)
            .map_err(|error| format!("failed to start cart client: {error}"))?;

        context.cart.fetch_cart().await;

        match self.command {
            Commands::Show(args) => show::run(&context, args),
            Commands::Add(args) => add::run(&context, args).await,
            Commands::Remove(args) => remove::run(&context, args).await,
            Commands::Update(args) => update::run(&context, args).await,
            Commands::Clear => clear::run(&context),
        }
    }
}
