//! Checkout command.

use anyhow::Result;
use atelier_commerce::forms::{CheckoutForm, CheckoutUpdate};
use dialoguer::{Confirm, Input};

use super::cart::print_cart;
use super::{user_error, CheckoutArgs};
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let app = ctx.open_app()?;
    app.navigate("/checkout");

    if app.cart().cart().is_empty() {
        ctx.output.info("Your cart is empty. Add something with `atelier cart add`.");
        return Ok(app.shutdown()?);
    }
    if !app.session().is_authenticated() {
        app.shutdown()?;
        return Err(user_error(atelier_app::AppError::NotAuthenticated));
    }

    let form = fill_form(&args, ctx)?;
    form.validate()?;

    print_cart(app.cart().cart(), ctx);
    if !args.yes && !ctx.output.is_json() {
        ctx.output.blank();
        ctx.output.kv("Ship to", &form.shipping.one_line());
        ctx.output.kv("Payment", &form.payment_method);
        let confirmed = Confirm::new()
            .with_prompt("Place this order?")
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(app.shutdown()?);
        }
    }

    let spinner = ctx.output.spinner("Placing order...");
    let result = app.checkout().submit(&form).await;
    spinner.finish_and_clear();
    app.shutdown()?;

    let order = result.map_err(user_error)?;
    if ctx.output.is_json() {
        ctx.output.json(&order);
    } else {
        ctx.output.success(&format!(
            "Order {} placed ({})",
            order.order_number, order.total_amount
        ));
        ctx.output.info(&format!("Track it with `atelier orders show {}`", order.id));
    }
    Ok(())
}

/// Build the form from flags, prompting for missing shipping fields.
fn fill_form(args: &CheckoutArgs, ctx: &Context) -> Result<CheckoutForm> {
    let prompt = |label: &str, value: &Option<String>| -> Result<String> {
        match value {
            Some(v) => Ok(v.clone()),
            // No prompts in JSON mode; validation reports the gap
            None if ctx.output.is_json() => Ok(String::new()),
            None => Ok(Input::<String>::new()
                .with_prompt(label)
                .allow_empty(true)
                .interact_text()?),
        }
    };

    let mut form = CheckoutForm::new();
    form.apply(CheckoutUpdate::Name(prompt("Full name", &args.name)?));
    form.apply(CheckoutUpdate::Phone(prompt("Phone", &args.phone)?));
    form.apply(CheckoutUpdate::Address(prompt("Street address", &args.address)?));
    form.apply(CheckoutUpdate::City(prompt("City", &args.city)?));
    form.apply(CheckoutUpdate::State(prompt("State", &args.state)?));
    form.apply(CheckoutUpdate::PostalCode(prompt("Postal code", &args.postal_code)?));
    form.apply(CheckoutUpdate::PaymentMethod(args.payment.clone()));
    if let Some(notes) = &args.notes {
        form.apply(CheckoutUpdate::Notes(notes.clone()));
    }
    Ok(form)
}
