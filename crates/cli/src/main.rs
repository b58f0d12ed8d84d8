//! Cartwheel CLI - cart management from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Add one unit of a product to the cart
//! cw-cli add --id prod-1 -n "Widget" -p 9.99 -s 5
//!
//! # Set a line's quantity outright
//! cw-cli set --id prod-1 -q 3 -s 5
//!
//! # Show lines and totals
//! cw-cli list
//!
//! # Reconcile against a stock snapshot file
//! cw-cli reconcile -s stock.json
//! ```
//!
//! # Commands
//!
//! - `add` / `set` / `remove` / `decrement` / `clear` - cart mutations
//! - `list` / `count` - cart display
//! - `reconcile` - merge the cart against a stock snapshot, printing warnings
//! - `checkout` - verify stock; refuses while discrepancies exist
//!
//! # Environment Variables
//!
//! - `CARTWHEEL_CART_PATH` - Path of the cart slot file (default: cart.json)
//! - `CARTWHEEL_TAX_RATE` - Flat tax rate applied to totals (default: 0.02)
//! - `RUST_LOG` - Tracing filter (default: cartwheel_cart=info,cartwheel_cli=info)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "cw-cli")]
#[command(author, version, about = "Cartwheel cart management")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a product to the cart
    Add {
        /// Product id
        #[arg(long)]
        id: String,

        /// Product display name
        #[arg(short, long)]
        name: String,

        /// Unit price (e.g. 9.99)
        #[arg(short, long)]
        price: String,

        /// Currency code (`USD`, `EUR`, `GBP`, `CAD`, `AUD`)
        #[arg(short, long, default_value = "USD")]
        currency: String,

        /// Available stock for the product
        #[arg(short, long)]
        stock: u32,
    },

    /// Set a line's quantity outright (0 removes the line)
    Set {
        /// Product id
        #[arg(long)]
        id: String,

        /// New quantity
        #[arg(short, long)]
        quantity: u32,

        /// Available stock for the product
        #[arg(short, long)]
        stock: u32,
    },

    /// Remove a line from the cart
    Remove {
        /// Product id
        #[arg(long)]
        id: String,
    },

    /// Decrease a line's quantity by one
    Decrement {
        /// Product id
        #[arg(long)]
        id: String,
    },

    /// Delete the entire cart
    Clear,

    /// Show cart lines and totals
    List,

    /// Show the total item count
    Count,

    /// Reconcile the cart against a stock snapshot file
    Reconcile {
        /// Path to a JSON file mapping product id to available stock
        #[arg(short, long)]
        snapshot: String,
    },

    /// Verify stock ahead of checkout and show totals
    Checkout {
        /// Path to a JSON file mapping product id to available stock
        #[arg(short, long)]
        snapshot: String,
    },
}

fn main() {
    // Initialize tracing with EnvFilter, defaulting to info for our crates
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cartwheel_cart=info,cartwheel_cli=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::from_env()?;

    match cli.command {
        Commands::Add {
            id,
            name,
            price,
            currency,
            stock,
        } => commands::item::add(&config, &id, &name, &price, &currency, stock)?,
        Commands::Set {
            id,
            quantity,
            stock,
        } => commands::item::set(&config, &id, quantity, stock)?,
        Commands::Remove { id } => commands::item::remove(&config, &id)?,
        Commands::Decrement { id } => commands::item::decrement(&config, &id)?,
        Commands::Clear => commands::item::clear(&config)?,
        Commands::List => commands::show::list(&config)?,
        Commands::Count => commands::show::count(&config)?,
        Commands::Reconcile { snapshot } => commands::reconcile::reconcile(&config, &snapshot)?,
        Commands::Checkout { snapshot } => commands::reconcile::checkout(&config, &snapshot)?,
    }
    Ok(())
}
