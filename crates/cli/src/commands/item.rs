//! Cart mutation commands.
//!
//! # Usage
//!
//! ```bash
//! # Add one unit of a product
//! cw-cli add --id prod-1 -n "Widget" -p 9.99 -s 5
//!
//! # Set a line's quantity (0 removes the line)
//! cw-cli set --id prod-1 -q 3 -s 5
//! ```

use cartwheel_cart::{CartError, CartStore, JsonFileStorage};
use cartwheel_core::{CurrencyCode, Price, ProductId};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

use crate::config::CliConfig;

/// Errors that can occur during cart mutations.
#[derive(Debug, Error)]
pub enum ItemError {
    /// Unparseable price argument.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Unparseable currency argument.
    #[error("Invalid currency: {0}. Valid codes: USD, EUR, GBP, CAD, AUD")]
    InvalidCurrency(String),

    /// Cart operation failed (including stock-limit rejections).
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),
}

fn open_store(config: &CliConfig) -> CartStore<JsonFileStorage> {
    CartStore::new(JsonFileStorage::new(&config.cart_path))
}

/// Add one unit of a product to the cart.
pub fn add(
    config: &CliConfig,
    id: &str,
    name: &str,
    price: &str,
    currency: &str,
    stock: u32,
) -> Result<(), ItemError> {
    let amount: Decimal = price
        .parse()
        .map_err(|_| ItemError::InvalidPrice(price.to_owned()))?;
    let currency: CurrencyCode = currency
        .parse()
        .map_err(|_| ItemError::InvalidCurrency(currency.to_owned()))?;

    let mut store = open_store(config);
    store.add(&ProductId::new(id), name, Price::new(amount, currency), stock)?;
    info!(id, "added to cart");
    Ok(())
}

/// Set a line's quantity outright; 0 removes the line.
pub fn set(config: &CliConfig, id: &str, quantity: u32, stock: u32) -> Result<(), ItemError> {
    let mut store = open_store(config);
    store.set_quantity(&ProductId::new(id), quantity, stock)?;
    info!(id, quantity, "quantity updated");
    Ok(())
}

/// Remove a line from the cart.
pub fn remove(config: &CliConfig, id: &str) -> Result<(), ItemError> {
    let mut store = open_store(config);
    store.remove(&ProductId::new(id))?;
    info!(id, "removed from cart");
    Ok(())
}

/// Decrease a line's quantity by one.
pub fn decrement(config: &CliConfig, id: &str) -> Result<(), ItemError> {
    let mut store = open_store(config);
    store.decrement(&ProductId::new(id))?;
    info!(id, "quantity decreased");
    Ok(())
}

/// Delete the entire cart.
pub fn clear(config: &CliConfig) -> Result<(), ItemError> {
    let mut store = open_store(config);
    store.clear()?;
    info!("cart cleared");
    Ok(())
}
