//! Admin product management commands.

use anyhow::{anyhow, Result};
use atelier_app::App;
use atelier_cache::FileStore;
use atelier_commerce::catalog::Product;
use atelier_commerce::forms::{ProductForm, ProductUpdate};
use atelier_commerce::ids::ProductId;
use dialoguer::Confirm;

use super::{settle, user_error, AdminArgs, AdminCommand, ProductFields};
use crate::context::Context;

/// Run the admin command.
pub async fn run(args: AdminArgs, ctx: &Context) -> Result<()> {
    let app = ctx.open_app()?;
    app.navigate("/admin/products");

    let result = match args.command {
        AdminCommand::Create(fields) => create(&app, fields, ctx).await,
        AdminCommand::Update {
            id,
            fields,
            remove_image,
        } => update(&app, &ProductId::from(id), fields, remove_image, ctx).await,
        AdminCommand::Delete { id, yes } => delete(&app, &ProductId::from(id), yes, ctx).await,
    };
    app.shutdown()?;
    result
}

async fn create(app: &App<FileStore>, fields: ProductFields, ctx: &Context) -> Result<()> {
    let mut form = ProductForm::new();
    apply_fields(&mut form, fields, ctx);
    form.validate()?;

    let spinner = ctx.output.spinner("Creating product...");
    let result = app.admin().create_product(&form).await;
    spinner.finish_and_clear();

    let product = result.map_err(user_error)?;
    report(&product, "Created", ctx);
    Ok(())
}

async fn update(
    app: &App<FileStore>,
    id: &ProductId,
    fields: ProductFields,
    remove_image: Vec<String>,
    ctx: &Context,
) -> Result<()> {
    settle(app.catalog().load_product(id).await)?;
    let current = app
        .catalog()
        .with_store(|store| store.selected().cloned())
        .ok_or_else(|| anyhow!("Product not found"))?;

    let mut form = ProductForm::from_product(&current);
    apply_fields(&mut form, fields, ctx);
    for url in remove_image {
        if !form.existing_images.contains(&url) {
            ctx.output.warn(&format!("{} is not one of this product's images", url));
        }
        form.apply(ProductUpdate::RemoveExistingImage(url));
    }
    form.validate()?;

    let spinner = ctx.output.spinner("Saving product...");
    let result = app.admin().update_product(id, &form).await;
    spinner.finish_and_clear();

    let product = result.map_err(user_error)?;
    report(&product, "Updated", ctx);
    Ok(())
}

async fn delete(app: &App<FileStore>, id: &ProductId, yes: bool, ctx: &Context) -> Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete product {}? This cannot be undone.", id))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Product left unchanged");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Deleting product...");
    let result = app.admin().delete_product(id).await;
    spinner.finish_and_clear();

    result.map_err(user_error)?;
    ctx.output.success(&format!("Deleted product {}", id));
    Ok(())
}

/// Apply the flags that were given. Image paths resolve against the
/// working directory.
fn apply_fields(form: &mut ProductForm, fields: ProductFields, ctx: &Context) {
    let updates = [
        fields.title.map(ProductUpdate::Title),
        fields.description.map(ProductUpdate::Description),
        fields.price.map(ProductUpdate::Price),
        fields.stock.map(ProductUpdate::Stock),
        fields.category.map(ProductUpdate::Category),
        fields.sizes.map(ProductUpdate::Sizes),
        fields.colors.map(ProductUpdate::Colors),
    ];
    for update in updates.into_iter().flatten() {
        form.apply(update);
    }
    for path in fields.image {
        form.apply(ProductUpdate::AddImage(ctx.resolve_path(&path)));
    }
}

fn report(product: &Product, verb: &str, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(product);
        return;
    }
    ctx.output.success(&format!(
        "{} {} ({}, {})",
        verb, product.title, product.id, product.price
    ));
}
