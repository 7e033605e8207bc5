use clap::Args;
use storefront_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Id of the saved shipping address
    #[arg(long)]
    address_id: u64,

    /// Payment method code
    #[arg(long, default_value = "cod")]
    payment_method: String,
}

pub(crate) async fn run(ctx: &mut AppContext, args: CheckoutArgs) -> Result<(), String> {
    let AppContext { cart, orders, .. } = ctx;

    let placed = orders
        .checkout(cart, args.address_id, &args.payment_method)
        .await
        .map_err(|error| format!("checkout failed: {error}"))?;

    println!("order_id: {}", placed.id);
    println!("status: {}", placed.status);
    println!("total_amount: {}", placed.total_amount);

    Ok(())
}
