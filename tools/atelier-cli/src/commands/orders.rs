//! Order history commands.

use anyhow::{anyhow, Result};
use atelier_app::App;
use atelier_cache::FileStore;
use atelier_commerce::ids::OrderId;
use atelier_commerce::order::{Order, OrderSort, StatusFilter, StatusTrack};
use chrono::Local;
use dialoguer::Confirm;
use serde_json::json;

use super::{settle, user_error, OrdersArgs, OrdersCommand};
use crate::context::Context;
use crate::output::status_badge;

/// Run the orders command.
pub async fn run(args: OrdersArgs, ctx: &Context) -> Result<()> {
    let app = ctx.open_app()?;
    if !app.session().is_authenticated() {
        app.shutdown()?;
        return Err(user_error(atelier_app::AppError::NotAuthenticated));
    }

    let command = args.command.unwrap_or(OrdersCommand::List {
        status: "all".to_string(),
        sort: "newest".to_string(),
    });
    let result = match command {
        OrdersCommand::List { status, sort } => list_orders(&app, &status, &sort, ctx).await,
        OrdersCommand::Show { id } => show_order(&app, &OrderId::from(id), ctx).await,
        OrdersCommand::Cancel { id, yes } => cancel_order(&app, &OrderId::from(id), yes, ctx).await,
    };
    app.shutdown()?;
    result
}

async fn list_orders(app: &App<FileStore>, status: &str, sort: &str, ctx: &Context) -> Result<()> {
    app.navigate("/orders");
    let filter: StatusFilter = status.parse()?;
    let sort: OrderSort = sort.parse()?;

    let spinner = ctx.output.spinner("Loading orders...");
    let outcome = app.orders().load().await;
    spinner.finish_and_clear();
    settle(outcome)?;

    app.orders().set_filter(filter);
    app.orders().set_sort(sort);

    app.orders().view(|projection| {
        let counts = projection.counts;
        if ctx.output.is_json() {
            ctx.output.json(&json!({
                "orders": projection.orders,
                "counts": projection.counts,
            }));
            return;
        }

        ctx.output.header(&format!("My Orders ({}, {})", filter.display_name(), sort.display_name()));
        let tabs: Vec<String> = StatusFilter::ALL
            .iter()
            .map(|f| format!("{} {}", f.display_name(), counts.get(*f)))
            .collect();
        ctx.output.info(&tabs.join("  |  "));
        ctx.output.blank();

        if projection.is_empty() {
            ctx.output.info("No orders to show.");
            return;
        }

        let widths = [16, 18, 12, 6, 10];
        ctx.output.table_header(&["ORDER", "PLACED", "STATUS", "ITEMS", "TOTAL"], &widths);
        for order in &projection.orders {
            ctx.output.table_row(
                &[
                    &order.order_number,
                    &placed_at(order),
                    &status_badge(order.status),
                    &order.item_count().to_string(),
                    &order.total_amount.to_string(),
                ],
                &widths,
            );
        }
    });
    Ok(())
}

async fn show_order(app: &App<FileStore>, id: &OrderId, ctx: &Context) -> Result<()> {
    app.navigate(&format!("/orders/{}", id));

    let spinner = ctx.output.spinner("Loading order...");
    let outcome = app.orders().load_order(id).await;
    spinner.finish_and_clear();
    settle(outcome)?;

    let order = app
        .orders()
        .selected()
        .ok_or_else(|| anyhow!("Order not found"))?;
    print_order(&order, ctx);
    Ok(())
}

async fn cancel_order(app: &App<FileStore>, id: &OrderId, yes: bool, ctx: &Context) -> Result<()> {
    app.navigate(&format!("/orders/{}", id));

    // Fresh status, so a non-pending order is refused before any request
    settle(app.orders().load_order(id).await)?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Cancel this order?")
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Order left unchanged");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Cancelling order...");
    let result = app.orders().cancel(id).await;
    spinner.finish_and_clear();

    let order = result.map_err(user_error)?;
    if ctx.output.is_json() {
        ctx.output.json(&order);
    } else {
        ctx.output.success(&format!(
            "Order {} is now {}",
            order.order_number,
            status_badge(order.status)
        ));
    }
    Ok(())
}

fn print_order(order: &Order, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(order);
        return;
    }

    ctx.output.header(&format!("Order {}", order.order_number));
    ctx.output.track(&StatusTrack::for_status(order.status));
    ctx.output.blank();

    ctx.output.kv("Status", &status_badge(order.status));
    ctx.output.kv("Placed", &placed_at(order));
    ctx.output.kv("Payment", &order.payment_method);
    ctx.output.kv("Ship to", &order.shipping_address.name);
    ctx.output.kv("Address", &order.shipping_address.one_line());
    ctx.output.kv("Phone", &order.shipping_address.phone);
    if let Some(notes) = order.notes.as_deref().filter(|n| !n.is_empty()) {
        ctx.output.kv("Notes", notes);
    }

    ctx.output.blank();
    for item in &order.items {
        let variant: Vec<&str> = [item.size.as_deref(), item.color.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        let variant = if variant.is_empty() {
            String::new()
        } else {
            format!(" ({})", variant.join(" / "))
        };
        ctx.output.list_item(&format!(
            "{} x {}{} @ {} = {}",
            item.quantity,
            item.title,
            variant,
            item.price,
            item.line_total()
        ));
    }
    ctx.output.blank();
    ctx.output.kv("Total", &order.total_amount.to_string());
    if order.can_cancel() {
        ctx.output.info(&format!("Cancel with `atelier orders cancel {}`", order.id));
    }
}

fn placed_at(order: &Order) -> String {
    order
        .created_at
        .with_timezone(&Local)
        .format("%b %-d, %Y %H:%M")
        .to_string()
}
