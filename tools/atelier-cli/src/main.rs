//! Atelier CLI - terminal storefront and admin console.
//!
//! Commands:
//! - `atelier products` - Browse the catalog
//! - `atelier cart` - Manage the persisted cart
//! - `atelier login` / `register` / `logout` / `whoami` - Account session
//! - `atelier orders` - Order history, tracking and cancellation
//! - `atelier checkout` - Place an order from the cart
//! - `atelier admin` - Create, edit and delete products
//! - `atelier config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    AdminArgs, CartArgs, CheckoutArgs, ConfigArgs, LoginArgs, OrdersArgs, ProductsArgs,
    RegisterArgs,
};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "ATELIER_LOG";

/// Atelier CLI - shop the Atelier storefront from the terminal
#[derive(Parser)]
#[command(name = "atelier")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<String>,

    /// Environment overrides to apply from the config file
    #[arg(long, global = true)]
    env: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse products and categories
    Products(ProductsArgs),

    /// Show and change the cart
    Cart(CartArgs),

    /// Sign in
    Login(LoginArgs),

    /// Create an account
    Register(RegisterArgs),

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Order history and tracking
    Orders(OrdersArgs),

    /// Place an order from the cart
    Checkout(CheckoutArgs),

    /// Manage products (admin only)
    Admin(AdminArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = match context::Context::load(cli.config.as_deref(), cli.env.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };
    if ctx.output.is_verbose() {
        ctx.output.info(&format!("Using API at {}", ctx.config.api_url));
    }

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Login(args) => commands::auth::login(args, &ctx).await,
        Commands::Register(args) => commands::auth::register(args, &ctx).await,
        Commands::Logout => commands::auth::logout(&ctx).await,
        Commands::Whoami => commands::auth::whoami(&ctx).await,
        Commands::Orders(args) => commands::orders::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Admin(args) => commands::admin::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cart_update_negative_quantity() {
        let cli = Cli::try_parse_from(["atelier", "cart", "update", "p1", "-2"]).unwrap();
        match cli.command {
            Commands::Cart(CartArgs {
                command: Some(commands::CartCommand::Update { id, quantity }),
            }) => {
                assert_eq!(id, "p1");
                assert_eq!(quantity, -2);
            }
            _ => panic!("expected cart update"),
        }
    }

    #[test]
    fn test_parse_rejects_zero_add_quantity() {
        assert!(Cli::try_parse_from(["atelier", "cart", "add", "p1", "-q", "0"]).is_err());
        assert!(Cli::try_parse_from(["atelier", "checkout", "--payment", "bitcoin"]).is_err());
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["atelier", "orders", "list", "--status", "pending", "--json"])
                .unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Orders(_)));
    }
}
