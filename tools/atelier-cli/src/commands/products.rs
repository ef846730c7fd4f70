//! Catalog browsing commands.

use anyhow::Result;
use atelier_app::App;
use atelier_cache::FileStore;
use atelier_commerce::catalog::{Product, ProductSort};
use atelier_commerce::ids::ProductId;
use atelier_commerce::money::Money;
use serde_json::json;

use super::{settle, ListProductsArgs, ProductsArgs, ProductsCommand};
use crate::context::Context;
use crate::output::truncate;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let app = ctx.open_app()?;
    let result = match args.command {
        ProductsCommand::List(list) => list_products(&app, list, ctx).await,
        ProductsCommand::Show { id } => show_product(&app, &ProductId::from(id), ctx).await,
        ProductsCommand::Categories => list_categories(&app, ctx).await,
    };
    app.shutdown()?;
    result
}

async fn list_products(app: &App<FileStore>, args: ListProductsArgs, ctx: &Context) -> Result<()> {
    app.navigate("/products");

    let sort: ProductSort = args.sort.parse()?;
    let min_price = args.min_price.as_deref().map(str::parse::<Money>).transpose()?;
    let max_price = args.max_price.as_deref().map(str::parse::<Money>).transpose()?;

    let query = app.catalog().query();
    let limit = query.limit;
    let query = query
        .with_search(args.search.unwrap_or_default())
        .with_category(args.category.unwrap_or_default())
        .with_sort(sort)
        .with_price_range(min_price, max_price)
        .with_pagination(args.page, limit);

    let spinner = ctx.output.spinner("Loading products...");
    let outcome = app.catalog().load_products(query).await;
    spinner.finish_and_clear();
    settle(outcome)?;

    app.catalog().with_store(|store| {
        if ctx.output.is_json() {
            ctx.output.json(&json!({
                "products": store.products(),
                "pagination": store.pagination(),
            }));
            return;
        }

        ctx.output.header(&format!("Products ({})", sort.display_name()));
        if store.products().is_empty() {
            ctx.output.info("No products match these filters.");
            return;
        }

        let widths = [26, 34, 12, 10, 6];
        ctx.output.table_header(&["ID", "TITLE", "CATEGORY", "PRICE", "STOCK"], &widths);
        for product in store.products() {
            let stock = if product.is_in_stock() {
                product.stock.to_string()
            } else {
                "sold out".to_string()
            };
            ctx.output.table_row(
                &[
                    product.id.as_str(),
                    &truncate(&product.title, 34),
                    &truncate(&product.category, 12),
                    &product.price.to_string(),
                    &stock,
                ],
                &widths,
            );
        }

        if let Some(page) = store.pagination() {
            ctx.output.blank();
            ctx.output.info(&format!(
                "Showing {}-{} of {} (page {} of {})",
                page.start_item(),
                page.end_item(),
                page.total,
                page.page,
                page.total_pages
            ));
            if page.has_next() {
                ctx.output.info(&format!("Next page: --page {}", page.page + 1));
            }
        }
    });

    Ok(())
}

async fn show_product(app: &App<FileStore>, id: &ProductId, ctx: &Context) -> Result<()> {
    app.navigate(&format!("/products/{}", id));

    let spinner = ctx.output.spinner("Loading product...");
    let outcome = app.catalog().load_product(id).await;
    spinner.finish_and_clear();
    settle(outcome)?;

    let product = app.catalog().with_store(|store| store.selected().cloned());
    if let Some(product) = product {
        print_product(&product, ctx);
    }
    Ok(())
}

fn print_product(product: &Product, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(product);
        return;
    }

    ctx.output.header(&product.title);
    ctx.output.kv("ID", product.id.as_str());
    ctx.output.kv("Price", &product.price.to_string());
    if !product.category.is_empty() {
        ctx.output.kv("Category", &product.category);
    }
    ctx.output.kv(
        "Stock",
        &if product.is_in_stock() {
            format!("{} available", product.stock)
        } else {
            "Out of stock".to_string()
        },
    );
    if !product.size_options.is_empty() {
        ctx.output.kv("Sizes", &product.size_options.join(", "));
    }
    if !product.color_options.is_empty() {
        ctx.output.kv("Colors", &product.color_options.join(", "));
    }
    if !product.description.is_empty() {
        ctx.output.blank();
        ctx.output.info(&product.description);
    }
    if !product.images.is_empty() {
        ctx.output.blank();
        for image in &product.images {
            ctx.output.list_item(image);
        }
    }
}

async fn list_categories(app: &App<FileStore>, ctx: &Context) -> Result<()> {
    let outcome = app.catalog().load_categories().await;
    settle(outcome)?;

    app.catalog().with_store(|store| {
        if ctx.output.is_json() {
            ctx.output.json(&store.categories());
            return;
        }
        ctx.output.header("Categories");
        for category in store.categories() {
            ctx.output.list_item(category);
        }
    });
    Ok(())
}
