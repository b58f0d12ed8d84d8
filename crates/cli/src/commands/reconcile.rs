//! Stock reconciliation commands.
//!
//! The snapshot file is a JSON object mapping product id to available
//! stock, e.g. `{"prod-1": 3, "prod-2": 0}`. Fetching it from wherever
//! stock lives is the caller's concern; these commands only compose
//! "read snapshot" with the reconciliation step.

// Warnings and totals are the command output.
#![allow(clippy::print_stdout)]

use std::fs;

use cartwheel_cart::{CartError, CartStore, JsonFileStorage, StockSnapshot};
use thiserror::Error;
use tracing::info;

use crate::config::CliConfig;

/// Errors that can occur during reconciliation commands.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The snapshot file could not be read.
    #[error("Cannot read snapshot file {0}: {1}")]
    SnapshotRead(String, std::io::Error),

    /// The snapshot file is not a valid product-to-stock mapping.
    #[error("Invalid snapshot file {0}: {1}")]
    SnapshotParse(String, serde_json::Error),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Checkout refused while stock discrepancies exist.
    #[error("Checkout blocked: {0} line(s) have stock discrepancies")]
    CheckoutBlocked(usize),
}

fn load_snapshot(path: &str) -> Result<StockSnapshot, ReconcileError> {
    let payload =
        fs::read_to_string(path).map_err(|e| ReconcileError::SnapshotRead(path.to_owned(), e))?;
    serde_json::from_str(&payload).map_err(|e| ReconcileError::SnapshotParse(path.to_owned(), e))
}

/// Reconcile the cart against a stock snapshot file, printing warnings.
pub fn reconcile(config: &CliConfig, snapshot_path: &str) -> Result<(), ReconcileError> {
    let snapshot = load_snapshot(snapshot_path)?;
    let mut store = CartStore::new(JsonFileStorage::new(&config.cart_path));

    let warnings = store.reconcile(&snapshot)?;
    if warnings.is_empty() {
        println!("Cart is in sync with available stock.");
        return Ok(());
    }
    for (id, warning) in &warnings {
        println!("{id}: {}", warning.message);
    }
    info!(adjusted = warnings.len(), "cart adjusted to stock");
    Ok(())
}

/// Verify stock ahead of checkout; refuses while discrepancies exist.
pub fn checkout(config: &CliConfig, snapshot_path: &str) -> Result<(), ReconcileError> {
    let snapshot = load_snapshot(snapshot_path)?;
    let store = CartStore::new(JsonFileStorage::new(&config.cart_path));

    let warnings = store.verify_stock(&snapshot)?;
    if !warnings.is_empty() {
        for (id, warning) in &warnings {
            println!("{id}: {}", warning.message);
        }
        return Err(ReconcileError::CheckoutBlocked(warnings.len()));
    }

    let totals = store.totals(config.tax_rate)?;
    println!("Subtotal:    {:.2}", totals.subtotal);
    println!("Tax:         {:.2}", totals.tax);
    println!("Grand total: {:.2}", totals.grand_total);
    Ok(())
}
