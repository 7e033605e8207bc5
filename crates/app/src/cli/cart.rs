use clap::{Args, Subcommand};
use rusty_money::Money;
use storefront::{cart::CartItem, products::ProductId};
use storefront_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Add a product variant, merging with an existing line
    Add(AddArgs),
    /// Remove a product variant
    Remove(VariantArgs),
    /// Set the quantity of a product variant; zero or less removes it
    Update(UpdateArgs),
    /// Remove every line
    Clear,
    /// Show the cart
    List,
}

#[derive(Debug, Args)]
struct VariantArgs {
    /// Catalog product id
    #[arg(long)]
    product: u64,

    /// Size of the variant
    #[arg(long)]
    size: Option<String>,

    /// Colour of the variant
    #[arg(long)]
    color: Option<String>,
}

#[derive(Debug, Args)]
struct AddArgs {
    #[command(flatten)]
    variant: VariantArgs,

    /// Units to add
    #[arg(long, default_value_t = 1)]
    quantity: u32,

    /// Product name to display
    #[arg(long)]
    name: Option<String>,

    /// Unit price in minor currency units
    #[arg(long)]
    price: Option<u64>,

    /// Product image URL
    #[arg(long)]
    image: Option<String>,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    #[command(flatten)]
    variant: VariantArgs,

    /// New quantity
    #[arg(long, allow_negative_numbers = true)]
    quantity: i64,
}

pub(crate) fn run(ctx: &mut AppContext, command: CartCommand) -> Result<(), String> {
    match command.command {
        CartSubcommand::Add(args) => add(ctx, args),
        CartSubcommand::Remove(args) => {
            let removed = ctx.cart.remove_from_cart(
                ProductId::new(args.product),
                args.size.as_deref(),
                args.color.as_deref(),
            );

            if removed.is_none() {
                println!("product {} is not in the cart", args.product);
            }

            list(ctx)
        }
        CartSubcommand::Update(args) => {
            let matched = ctx.cart.update_quantity(
                ProductId::new(args.variant.product),
                args.quantity,
                args.variant.size.as_deref(),
                args.variant.color.as_deref(),
            );

            if !matched {
                println!("product {} is not in the cart", args.variant.product);
            }

            list(ctx)
        }
        CartSubcommand::Clear => {
            ctx.cart.clear_cart();
            list(ctx)
        }
        CartSubcommand::List => list(ctx),
    }
}

fn add(ctx: &mut AppContext, args: AddArgs) -> Result<(), String> {
    let VariantArgs {
        product,
        size,
        color,
    } = args.variant;

    let item = CartItem {
        product_id: ProductId::new(product),
        quantity: args.quantity,
        size,
        color,
        name: args.name,
        price: args.price,
        image: args.image,
    };

    ctx.cart
        .add_to_cart(item)
        .map_err(|error| format!("failed to add to cart: {error}"))?;

    list(ctx)
}

fn list(ctx: &AppContext) -> Result<(), String> {
    if ctx.cart.is_empty() {
        println!("cart is empty");
        return Ok(());
    }

    for item in ctx.cart.items() {
        println!("{}", describe(item, ctx));
    }

    let subtotal = ctx
        .cart
        .subtotal(ctx.currency)
        .map_err(|error| format!("failed to total cart: {error}"))?;

    println!("items: {}", ctx.cart.total_items());
    println!("subtotal: {subtotal}");

    Ok(())
}

fn describe(item: &CartItem, ctx: &AppContext) -> String {
    let mut line = format!("{} x {}", item.quantity, item.variant());

    if let Some(name) = &item.name {
        line.push_str(&format!(" ({name})"));
    }

    if let Some(price) = item.price.and_then(|price| i64::try_from(price).ok()) {
        line.push_str(&format!(" @ {} each", Money::from_minor(price, ctx.currency)));
    }

    line
}
