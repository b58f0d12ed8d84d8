//! Stock reconciliation: merge the persisted cart against a fresh snapshot.
//!
//! Reconciliation walks every cart line and compares its quantity with the
//! server-reported stock. Lines with no stock left are dropped, lines
//! requesting more than is available are clamped, everything else silently
//! refreshes its known stock. Each dropped or clamped line produces a
//! [`StockWarning`] for the caller to render; the cart itself stays usable
//! throughout.

use std::collections::BTreeMap;

use cartwheel_core::{ProductId, StockStatus};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::storage::CartStorage;
use crate::store::CartStore;

/// Server-reported stock levels, keyed by product.
///
/// A product missing from the snapshot has zero available stock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockSnapshot {
    levels: BTreeMap<ProductId, u32>,
}

impl StockSnapshot {
    /// Create an empty snapshot (every product out of stock).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Record the available stock for a product.
    pub fn set(&mut self, product_id: ProductId, stock: u32) {
        self.levels.insert(product_id, stock);
    }

    /// Available stock for a product; 0 if the product is not listed.
    #[must_use]
    pub fn available(&self, product_id: &ProductId) -> u32 {
        self.levels.get(product_id).copied().unwrap_or(0)
    }
}

impl FromIterator<(ProductId, u32)> for StockSnapshot {
    fn from_iter<I: IntoIterator<Item = (ProductId, u32)>>(iter: I) -> Self {
        Self {
            levels: iter.into_iter().collect(),
        }
    }
}

/// Per-line discrepancy reported by reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockWarning {
    /// What went wrong for this line.
    pub kind: StockStatus,
    /// User-facing message, ready for display.
    pub message: String,
    /// Stock that was actually available.
    pub stock: u32,
}

impl StockWarning {
    fn new(kind: StockStatus, stock: u32) -> Self {
        Self {
            message: kind.message(stock),
            kind,
            stock,
        }
    }
}

impl<S: CartStorage> CartStore<S> {
    /// Reconcile the cart against `snapshot`.
    ///
    /// Per line: zero available stock deletes the line, a quantity above the
    /// available stock clamps quantity and known stock down to it, and
    /// anything else refreshes the known stock silently. The cart is
    /// rewritten only when a line was clamped or deleted. Returns one
    /// warning per changed line; an empty map means no discrepancies.
    ///
    /// Running reconciliation twice with the same snapshot yields the same
    /// cart and no warnings on the second pass.
    pub fn reconcile(
        &mut self,
        snapshot: &StockSnapshot,
    ) -> Result<BTreeMap<ProductId, StockWarning>> {
        let mut cart = self.cart()?;
        let mut warnings = BTreeMap::new();
        let mut changed = false;

        for product_id in cart.product_ids() {
            let stock = snapshot.available(&product_id);
            let Some(quantity) = cart.get(&product_id).map(|line| line.quantity) else {
                continue;
            };
            match StockStatus::classify(quantity, stock) {
                StockStatus::OutOfStock => {
                    cart.remove(&product_id);
                    warn!(%product_id, "line removed: out of stock");
                    warnings.insert(product_id, StockWarning::new(StockStatus::OutOfStock, 0));
                    changed = true;
                }
                StockStatus::InsufficientStock => {
                    if let Some(line) = cart.line_mut(&product_id) {
                        line.quantity = stock;
                        line.max_stock = stock;
                        line.touch();
                    }
                    warn!(%product_id, stock, "line clamped to available stock");
                    warnings.insert(
                        product_id,
                        StockWarning::new(StockStatus::InsufficientStock, stock),
                    );
                    changed = true;
                }
                StockStatus::Available => {
                    if let Some(line) = cart.line_mut(&product_id) {
                        line.max_stock = stock;
                    }
                }
            }
        }

        if changed {
            self.persist(&cart)?;
        }
        info!(
            lines = cart.len(),
            warnings = warnings.len(),
            "stock reconciliation complete"
        );
        Ok(warnings)
    }

    /// Classify every line against `snapshot` without mutating the cart.
    ///
    /// The checkout surface uses this to refuse checkout while any
    /// discrepancy exists. An empty map means every line can be fulfilled.
    pub fn verify_stock(
        &self,
        snapshot: &StockSnapshot,
    ) -> Result<BTreeMap<ProductId, StockWarning>> {
        let cart = self.cart()?;
        let mut warnings = BTreeMap::new();
        for (product_id, line) in cart.lines() {
            let stock = snapshot.available(product_id);
            let status = StockStatus::classify(line.quantity, stock);
            if status != StockStatus::Available {
                warnings.insert(product_id.clone(), StockWarning::new(status, stock));
            }
        }
        Ok(warnings)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_defaults_to_zero() {
        let mut snapshot = StockSnapshot::new();
        snapshot.set(ProductId::new("a"), 3);
        assert_eq!(snapshot.available(&ProductId::new("a")), 3);
        assert_eq!(snapshot.available(&ProductId::new("missing")), 0);
    }

    #[test]
    fn test_snapshot_deserializes_from_plain_map() {
        let snapshot: StockSnapshot = serde_json::from_str(r#"{"a":2,"b":0}"#).unwrap();
        assert_eq!(snapshot.available(&ProductId::new("a")), 2);
        assert_eq!(snapshot.available(&ProductId::new("b")), 0);
    }

    #[test]
    fn test_warning_carries_canonical_message() {
        let warning = StockWarning::new(StockStatus::InsufficientStock, 2);
        assert_eq!(warning.message, "Not enough in stock. Only 2 available.");
        assert_eq!(warning.stock, 2);
    }
}
