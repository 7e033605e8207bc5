use clap::{Parser, Subcommand};
use storefront_app::{config::AppConfig, context::AppContext, observability};

mod cart;
mod checkout;
mod wishlist;

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Cart(cart::CartCommand),
    Wishlist(wishlist::WishlistCommand),
    Checkout(checkout::CheckoutArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init(&self.config.logging)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        let mut ctx = AppContext::from_config(&self.config)
            .map_err(|error| format!("invalid configuration: {error}"))?;

        match self.command {
            Commands::Cart(command) => cart::run(&mut ctx, command),
            Commands::Wishlist(command) => wishlist::run(&mut ctx, command).await,
            Commands::Checkout(args) => checkout::run(&mut ctx, args).await,
        }?;

        if let Some(error) = ctx
            .cart
            .last_persist_error()
            .or_else(|| ctx.wishlist.last_persist_error())
        {
            return Err(format!("changes were applied but could not be saved: {error}"));
        }

        Ok(())
    }
}
