//! Cart commands.

use anyhow::{anyhow, Result};
use atelier_app::App;
use atelier_cache::FileStore;
use atelier_commerce::cart::Cart;
use atelier_commerce::ids::ProductId;
use dialoguer::Confirm;
use serde_json::json;

use super::{settle, CartArgs, CartCommand};
use crate::context::Context;
use crate::output::truncate;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let app = ctx.open_app()?;
    app.navigate("/cart");

    let result = match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {
            print_cart(app.cart().cart(), ctx);
            Ok(())
        }
        CartCommand::Add {
            id,
            quantity,
            size,
            color,
        } => add(&app, &ProductId::from(id), quantity, size.as_deref(), color.as_deref(), ctx).await,
        CartCommand::Remove { id } => {
            remove(&app, &ProductId::from(id), ctx);
            Ok(())
        }
        CartCommand::Update { id, quantity } => {
            update(&app, &ProductId::from(id), quantity, ctx);
            Ok(())
        }
        CartCommand::Clear { yes } => clear(&app, yes, ctx),
    };

    app.shutdown()?;
    result
}

async fn add(
    app: &App<FileStore>,
    id: &ProductId,
    quantity: u32,
    size: Option<&str>,
    color: Option<&str>,
    ctx: &Context,
) -> Result<()> {
    let spinner = ctx.output.spinner("Looking up product...");
    let outcome = app.catalog().load_product(id).await;
    spinner.finish_and_clear();
    settle(outcome)?;

    let product = app
        .catalog()
        .with_store(|store| store.selected().cloned())
        .ok_or_else(|| anyhow!("Product not found"))?;
    product.validate_selection(size, color)?;

    let mut cart = app.cart();
    cart.add_to_cart(&product, quantity, size, color);
    ctx.output.success(&format!(
        "Added {} x {} to your cart ({} items, {})",
        quantity,
        product.title,
        cart.item_count(),
        cart.total()
    ));
    Ok(())
}

fn remove(app: &App<FileStore>, id: &ProductId, ctx: &Context) {
    let mut cart = app.cart();
    if !cart.cart().contains(id) {
        ctx.output.warn(&format!("Product {} is not in your cart", id));
        return;
    }
    cart.remove_from_cart(id);
    ctx.output.success(&format!("Removed {} from your cart", id));
}

fn update(app: &App<FileStore>, id: &ProductId, quantity: i64, ctx: &Context) {
    let mut cart = app.cart();
    if !cart.cart().contains(id) {
        ctx.output.warn(&format!("Product {} is not in your cart", id));
        return;
    }
    cart.update_quantity(id, quantity);
    if quantity <= 0 {
        ctx.output.success(&format!("Removed {} from your cart", id));
    } else {
        ctx.output.success(&format!("Set {} to {} (total {})", id, quantity, cart.total()));
    }
}

fn clear(app: &App<FileStore>, yes: bool, ctx: &Context) -> Result<()> {
    if app.cart().cart().is_empty() {
        ctx.output.info("Your cart is already empty.");
        return Ok(());
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Remove every item from your cart?")
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Cart left unchanged");
            return Ok(());
        }
    }

    app.cart().clear_cart();
    ctx.output.success("Cart cleared");
    Ok(())
}

pub(crate) fn print_cart(cart: &Cart, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "items": cart.items(),
            "itemCount": cart.item_count(),
            "total": cart.total(),
        }));
        return;
    }

    ctx.output.header("Your Cart");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return;
    }

    let widths = [26, 30, 14, 4, 10];
    ctx.output.table_header(&["ID", "PRODUCT", "VARIANT", "QTY", "SUBTOTAL"], &widths);
    for item in cart.items() {
        let variant = item.variant_label().unwrap_or_else(|| "-".to_string());
        ctx.output.table_row(
            &[
                item.product.id.as_str(),
                &truncate(&item.product.title, 30),
                &variant,
                &item.quantity.to_string(),
                &item.line_total().to_string(),
            ],
            &widths,
        );
    }

    ctx.output.blank();
    ctx.output.kv("Items", &cart.item_count().to_string());
    ctx.output.kv("Total", &cart.total().to_string());
}
