//! Sign-in, registration and session commands.

use anyhow::Result;
use atelier_auth::{CredentialUpdate, LoginForm, RegisterForm, User};
use atelier_data::{ADMIN_LOGIN_PATH, CUSTOMER_LOGIN_PATH};
use dialoguer::{Input, Password};

use super::{user_error, LoginArgs, RegisterArgs};
use crate::context::Context;

/// Run the login command.
pub async fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let app = ctx.open_app()?;
    app.navigate(if args.admin {
        ADMIN_LOGIN_PATH
    } else {
        CUSTOMER_LOGIN_PATH
    });

    let mut form = LoginForm::new();
    form.apply(CredentialUpdate::Email(prompt_or("Email", args.email)?));
    form.apply(CredentialUpdate::Password(
        Password::new().with_prompt("Password").interact()?,
    ));

    let spinner = ctx.output.spinner("Signing in...");
    let result = if args.admin {
        app.session().admin_login(&form).await
    } else {
        app.session().login(&form).await
    };
    spinner.finish_and_clear();

    let result = result.map_err(user_error).map(|user| print_welcome(&user, ctx));
    app.shutdown()?;
    result
}

/// Run the register command.
pub async fn register(args: RegisterArgs, ctx: &Context) -> Result<()> {
    let app = ctx.open_app()?;
    app.navigate("/register");

    let mut form = RegisterForm::new();
    form.apply(CredentialUpdate::Name(prompt_or("Full name", args.name)?));
    form.apply(CredentialUpdate::Email(prompt_or("Email", args.email)?));
    form.apply(CredentialUpdate::Password(
        Password::new().with_prompt("Password").interact()?,
    ));
    form.apply(CredentialUpdate::ConfirmPassword(
        Password::new().with_prompt("Confirm password").interact()?,
    ));

    let spinner = ctx.output.spinner("Creating account...");
    let result = app.session().register(&form).await;
    spinner.finish_and_clear();

    let result = result.map_err(user_error).map(|user| print_welcome(&user, ctx));
    app.shutdown()?;
    result
}

/// Run the logout command.
pub async fn logout(ctx: &Context) -> Result<()> {
    let app = ctx.open_app()?;
    if !app.session().is_authenticated() {
        ctx.output.info("You are not signed in.");
        return Ok(app.shutdown()?);
    }

    app.session().logout().await;
    app.shutdown()?;
    ctx.output.success("Signed out");
    Ok(())
}

/// Run the whoami command.
pub async fn whoami(ctx: &Context) -> Result<()> {
    let app = ctx.open_app()?;
    let user = app.session().restore().await;
    app.shutdown()?;

    match user {
        Some(user) if ctx.output.is_json() => ctx.output.json(&user),
        Some(user) => {
            ctx.output.header("Signed in");
            ctx.output.kv("Name", user.display_name());
            ctx.output.kv("Email", &user.email);
            ctx.output.kv("Role", user.role.as_str());
        }
        None if ctx.output.is_json() => ctx.output.json(&serde_json::Value::Null),
        None => ctx.output.info("You are not signed in. Run `atelier login` to sign in."),
    }
    Ok(())
}

fn print_welcome(user: &User, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(user);
        return;
    }
    let role = if user.is_admin() { " (admin)" } else { "" };
    ctx.output.success(&format!("Signed in as {}{}", user.display_name(), role));
}

/// Use the flag value or ask for it.
fn prompt_or(prompt: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::<String>::new().with_prompt(prompt).interact_text()?),
    }
}
