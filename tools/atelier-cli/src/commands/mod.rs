//! CLI command implementations.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod orders;
pub mod products;

use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use atelier_app::{AppError, LoadOutcome};
use atelier_data::ADMIN_LOGIN_PATH;
use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List a page of products.
    List(ListProductsArgs),
    /// Show one product.
    Show {
        /// Product ID.
        id: String,
    },
    /// List product categories.
    Categories,
}

#[derive(Args)]
pub struct ListProductsArgs {
    /// Free-text search.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Category name ("all" for every category).
    #[arg(short, long)]
    pub category: Option<String>,

    /// Sort: newest, oldest, price-low, price-high, name.
    #[arg(long, default_value = "newest")]
    pub sort: String,

    /// Page number.
    #[arg(short, long, default_value_t = 1)]
    pub page: u32,

    /// Minimum price (e.g., 19.99).
    #[arg(long)]
    pub min_price: Option<String>,

    /// Maximum price.
    #[arg(long)]
    pub max_price: Option<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,
    /// Add a product variant.
    Add {
        /// Product ID.
        id: String,

        /// Quantity to add.
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,

        /// Size option.
        #[arg(short, long)]
        size: Option<String>,

        /// Color option.
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Remove a product, every size and color of it.
    Remove {
        /// Product ID.
        id: String,
    },
    /// Set the quantity of a product. Zero or less removes it.
    Update {
        /// Product ID.
        id: String,

        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Account email (prompted if omitted).
    #[arg(short, long)]
    pub email: Option<String>,

    /// Sign in to the admin console.
    #[arg(long)]
    pub admin: bool,
}

/// Arguments for the register command.
#[derive(Args)]
pub struct RegisterArgs {
    /// Full name (prompted if omitted).
    #[arg(short, long)]
    pub name: Option<String>,

    /// Account email (prompted if omitted).
    #[arg(short, long)]
    pub email: Option<String>,
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: Option<OrdersCommand>,
}

#[derive(Subcommand)]
pub enum OrdersCommand {
    /// List your orders.
    List {
        /// Status filter: all, pending, accepted, rejected, completed, cancelled.
        #[arg(short, long, default_value = "all")]
        status: String,

        /// Sort: newest, oldest, amount-high, amount-low.
        #[arg(long, default_value = "newest")]
        sort: String,
    },
    /// Show one order and its progress.
    Show {
        /// Order ID.
        id: String,
    },
    /// Cancel a pending order.
    Cancel {
        /// Order ID.
        id: String,

        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the checkout command. Missing shipping fields are
/// prompted for.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Recipient name.
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    /// Street address.
    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    /// State or province.
    #[arg(long)]
    pub state: Option<String>,

    #[arg(long)]
    pub postal_code: Option<String>,

    /// Payment method.
    #[arg(long, default_value = "cod", value_parser = ["cod", "card"])]
    pub payment: String,

    /// Order notes.
    #[arg(long)]
    pub notes: Option<String>,

    /// Skip confirmation.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the admin command.
#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Create a product.
    Create(ProductFields),
    /// Edit a product.
    Update {
        /// Product ID.
        id: String,

        #[command(flatten)]
        fields: ProductFields,

        /// Drop an uploaded image by URL.
        #[arg(long)]
        remove_image: Vec<String>,
    },
    /// Delete a product.
    Delete {
        /// Product ID.
        id: String,

        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Product form fields. On update, omitted fields keep their current value.
#[derive(Args)]
pub struct ProductFields {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Unit price (e.g., 49.99).
    #[arg(long)]
    pub price: Option<String>,

    /// Units in stock.
    #[arg(long)]
    pub stock: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// Comma-separated sizes (e.g., "S, M, L").
    #[arg(long)]
    pub sizes: Option<String>,

    /// Comma-separated colors.
    #[arg(long)]
    pub colors: Option<String>,

    /// Image file to upload (repeatable).
    #[arg(long)]
    pub image: Vec<PathBuf>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

/// Turn a controller error into a CLI error carrying the user message.
pub(crate) fn user_error(err: AppError) -> anyhow::Error {
    tracing::debug!(error = ?err, "command failed");
    match err.login_path() {
        Some(path) => anyhow!("{} Run `{}` to sign in.", err.user_message(), login_command(path)),
        None => anyhow!(err.user_message()),
    }
}

/// Fail unless a load was applied.
pub(crate) fn settle(outcome: LoadOutcome) -> Result<()> {
    match outcome {
        LoadOutcome::Applied | LoadOutcome::Stale => Ok(()),
        LoadOutcome::Failed(message) => bail!(message),
        LoadOutcome::LoginRequired(path) => bail!(
            "{} Run `{}` to sign in.",
            atelier_data::SESSION_EXPIRED,
            login_command(&path)
        ),
    }
}

fn login_command(path: &str) -> &'static str {
    if path == ADMIN_LOGIN_PATH {
        "atelier login --admin"
    } else {
        "atelier login"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_commerce::ids::OrderId;
    use atelier_commerce::order::OrderStatus;
    use atelier_data::ApiError;

    #[test]
    fn test_settle() {
        assert!(settle(LoadOutcome::Applied).is_ok());
        assert!(settle(LoadOutcome::Stale).is_ok());

        let err = settle(LoadOutcome::Failed("Product not found".into())).unwrap_err();
        assert_eq!(err.to_string(), "Product not found");

        let err = settle(LoadOutcome::LoginRequired("/admin/login".into())).unwrap_err();
        assert!(err.to_string().ends_with("Run `atelier login --admin` to sign in."));
    }

    #[test]
    fn test_user_error_names_login_command() {
        let err = user_error(AppError::Api(ApiError::Unauthorized {
            login_path: "/login".into(),
            message: String::new(),
        }));
        assert!(err.to_string().ends_with("Run `atelier login` to sign in."));

        let err = user_error(AppError::CannotCancel(OrderStatus::Completed));
        assert_eq!(err.to_string(), "Completed orders can no longer be cancelled.");

        let err = user_error(AppError::CancelInFlight(OrderId::from("o1")));
        assert!(!err.to_string().contains("atelier login"));
    }
}
