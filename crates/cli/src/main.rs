//! Shopfront CLI - A storefront in the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! shopfront catalog
//!
//! # Inspect a product
//! shopfront show 2
//!
//! # Add two units of product 1, then look at the cart
//! shopfront add 1 -q 2
//! shopfront cart
//!
//! # Adjust or remove lines
//! shopfront set 1 5
//! shopfront remove 1
//!
//! # Place the (simulated) order
//! shopfront checkout
//!
//! # Interactive session with catalog, product and cart views
//! shopfront shell
//! ```
//!
//! The cart is saved to `SHOPFRONT_STORAGE_PATH` (or `--storage`) after every
//! change, so it survives between invocations.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shopfront_core::ProductId;
use shopfront_storefront::{AppError, Storefront, StorefrontConfig, telemetry};

mod commands;

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Shopfront terminal storefront")]
struct Cli {
    /// File holding the saved cart (overrides `SHOPFRONT_STORAGE_PATH`)
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    /// JSON catalog file (overrides `SHOPFRONT_CATALOG_PATH`)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Currency symbol for prices (overrides `SHOPFRONT_CURRENCY_SYMBOL`)
    #[arg(long, global = true)]
    currency_symbol: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all products
    Catalog,
    /// Show one product's details
    Show {
        /// Product ID
        id: ProductId,
    },
    /// Add a product to the cart
    Add {
        /// Product ID
        id: ProductId,

        /// Units to add (1-99)
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Set a cart line's quantity (0 or less removes it)
    Set {
        /// Product ID
        id: ProductId,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Add one unit to a cart line
    Inc {
        /// Product ID
        id: ProductId,
    },
    /// Remove one unit from a cart line
    Dec {
        /// Product ID
        id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Show the cart
    Cart,
    /// Place the order and empty the cart
    Checkout,
    /// Start an interactive session
    Shell,
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = telemetry::init_sentry(&config);
    telemetry::init_tracing(cli.log_json);

    if let Err(e) = run(cli.command, &config) {
        fail(&e);
    }
}

/// Environment configuration with command-line overrides applied.
fn load_config(cli: &Cli) -> Result<StorefrontConfig, AppError> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(path) = &cli.storage {
        config.storage_path.clone_from(path);
    }
    if let Some(path) = &cli.catalog {
        config.catalog_path = Some(path.clone());
    }
    if let Some(symbol) = &cli.currency_symbol {
        config.currency_symbol = Some(symbol.clone());
    }
    Ok(config)
}

fn run(command: Commands, config: &StorefrontConfig) -> Result<(), AppError> {
    let mut shop = Storefront::from_config(config)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::Catalog => commands::cart::catalog(&shop, &mut out),
        Commands::Show { id } => commands::cart::show(&mut shop, id, &mut out),
        Commands::Add { id, quantity } => commands::cart::add(&mut shop, id, quantity, &mut out),
        Commands::Set { id, quantity } => {
            commands::cart::set_quantity(&mut shop, id, quantity, &mut out)
        }
        Commands::Inc { id } => commands::cart::increase(&mut shop, id, &mut out),
        Commands::Dec { id } => commands::cart::decrease(&mut shop, id, &mut out),
        Commands::Remove { id } => commands::cart::remove(&mut shop, id, &mut out),
        Commands::Cart => commands::cart::show_cart(&mut shop, &mut out),
        Commands::Checkout => commands::cart::checkout(&mut shop, &mut out),
        Commands::Shell => {
            let stdin = std::io::stdin();
            commands::shell::run(&mut shop, stdin.lock(), &mut out)
        }
    }
}

/// Report an error, show the shopper-facing message and exit.
fn fail(err: &AppError) -> ! {
    err.report();
    let _ = writeln!(std::io::stderr(), "{}", err.user_message());
    std::process::exit(1);
}
