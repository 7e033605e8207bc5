use clap::{Args, Subcommand};
use storefront::products::ProductId;
use storefront_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct WishlistCommand {
    #[command(subcommand)]
    command: WishlistSubcommand,
}

#[derive(Debug, Subcommand)]
enum WishlistSubcommand {
    /// Wishlist a product on the server and locally
    Add(ProductArgs),
    /// Remove a product from the server and local wishlist
    Remove(ProductArgs),
    /// Flip whether a product is wishlisted
    Toggle(ProductArgs),
    /// Replace the local wishlist with the server's
    Sync,
    /// Forget the local wishlist
    Clear,
    /// Show the local wishlist
    List,
}

#[derive(Debug, Args)]
struct ProductArgs {
    /// Catalog product id
    #[arg(long)]
    product: u64,
}

pub(crate) async fn run(ctx: &mut AppContext, command: WishlistCommand) -> Result<(), String> {
    let AppContext {
        wishlist,
        wishlists,
        ..
    } = ctx;

    match command.command {
        WishlistSubcommand::Add(args) => wishlists
            .add(wishlist, ProductId::new(args.product))
            .await
            .map_err(|error| format!("failed to add to wishlist: {error}"))?,
        WishlistSubcommand::Remove(args) => wishlists
            .remove(wishlist, ProductId::new(args.product))
            .await
            .map_err(|error| format!("failed to remove from wishlist: {error}"))?,
        WishlistSubcommand::Toggle(args) => {
            let wishlisted = wishlists
                .toggle(wishlist, ProductId::new(args.product))
                .await
                .map_err(|error| format!("failed to update wishlist: {error}"))?;

            println!("product {} wishlisted: {wishlisted}", args.product);
        }
        WishlistSubcommand::Sync => {
            let count = wishlists
                .sync(wishlist)
                .await
                .map_err(|error| format!("failed to sync wishlist: {error}"))?;

            println!("synced {count} products");
        }
        WishlistSubcommand::Clear => wishlists.logout(wishlist),
        WishlistSubcommand::List => {}
    }

    if wishlist.is_empty() {
        println!("wishlist is empty");
    }

    for product_id in wishlist.product_ids() {
        println!("{product_id}");
    }

    Ok(())
}
