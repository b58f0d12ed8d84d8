//! Cart display commands.

// Display commands exist to write to stdout.
#![allow(clippy::print_stdout)]

use cartwheel_cart::{CartError, CartStore, JsonFileStorage};
use rust_decimal::Decimal;

use crate::config::CliConfig;

fn money(symbol: &str, amount: Decimal) -> String {
    format!("{symbol}{amount:.2}")
}

/// Show cart lines and totals.
pub fn list(config: &CliConfig) -> Result<(), CartError> {
    let store = CartStore::new(JsonFileStorage::new(&config.cart_path));
    let cart = store.cart()?;

    if cart.is_empty() {
        println!("Cart is empty.");
        return Ok(());
    }

    for (id, line) in cart.lines() {
        let symbol = line.price.currency_code.symbol();
        println!(
            "{id}  {} x{} @ {} = {}",
            line.name,
            line.quantity,
            line.price,
            money(symbol, line.subtotal()),
        );
    }

    let totals = cart.totals(config.tax_rate);
    println!();
    println!("Items:       {}", cart.item_count());
    println!("Subtotal:    {:.2}", totals.subtotal);
    println!("Tax:         {:.2}", totals.tax);
    println!("Grand total: {:.2}", totals.grand_total);
    Ok(())
}

/// Show the total item count.
pub fn count(config: &CliConfig) -> Result<(), CartError> {
    let store = CartStore::new(JsonFileStorage::new(&config.cart_path));
    println!("{}", store.item_count()?);
    Ok(())
}
