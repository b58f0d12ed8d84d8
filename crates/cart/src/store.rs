//! The cart store: load, mutate, persist.
//!
//! Every operation reloads the full cart from storage, applies its change,
//! and rewrites the full cart before returning. Rejected mutations persist
//! nothing, so the stored cart only ever reflects accepted operations.

use cartwheel_core::{Cart, CartLine, CartTotals, Price, ProductId};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{CartError, Result};
use crate::storage::{CartStorage, StorageError};

/// Cart store over an injectable storage slot.
#[derive(Debug)]
pub struct CartStore<S: CartStorage> {
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    /// Create a store over `storage`.
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Load the current cart; an absent slot is an empty cart.
    pub fn cart(&self) -> Result<Cart> {
        let Some(payload) = self.storage.read()? else {
            return Ok(Cart::new());
        };
        let cart = serde_json::from_str(&payload).map_err(StorageError::from)?;
        Ok(cart)
    }

    pub(crate) fn persist(&mut self, cart: &Cart) -> Result<()> {
        let payload = serde_json::to_string(cart).map_err(StorageError::from)?;
        self.storage.write(&payload)?;
        debug!(lines = cart.len(), items = cart.item_count(), "cart persisted");
        Ok(())
    }

    /// Add one unit of a product to the cart.
    ///
    /// Creates the line with quantity 1 if absent, increments it otherwise,
    /// refreshing the known stock either way. Rejects with
    /// [`CartError::StockLimit`] - without touching storage - when the line
    /// already sits at the stock limit, or when the product has no stock at
    /// all.
    pub fn add(
        &mut self,
        product_id: &ProductId,
        name: &str,
        price: Price,
        max_stock: u32,
    ) -> Result<()> {
        let mut cart = self.cart()?;
        match cart.line_mut(product_id) {
            None => {
                if max_stock == 0 {
                    warn!(%product_id, "add rejected: product out of stock");
                    return Err(CartError::StockLimit {
                        product_id: product_id.clone(),
                        max_stock,
                    });
                }
                cart.insert(product_id.clone(), CartLine::new(name, price, max_stock));
            }
            Some(line) => {
                if line.quantity >= max_stock {
                    warn!(%product_id, max_stock, "add rejected: stock limit reached");
                    return Err(CartError::StockLimit {
                        product_id: product_id.clone(),
                        max_stock,
                    });
                }
                line.quantity += 1;
                line.max_stock = max_stock;
                line.touch();
            }
        }
        self.persist(&cart)
    }

    /// Set a line's quantity outright.
    ///
    /// No-op if the line is absent. Quantity 0 deletes the line. Rejects
    /// with [`CartError::StockLimit`] - without touching storage - when the
    /// requested quantity exceeds the available stock.
    pub fn set_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: u32,
        max_stock: u32,
    ) -> Result<()> {
        let mut cart = self.cart()?;
        if cart.get(product_id).is_none() {
            return Ok(());
        }
        if quantity == 0 {
            cart.remove(product_id);
            return self.persist(&cart);
        }
        if quantity > max_stock {
            warn!(%product_id, quantity, max_stock, "quantity set rejected: stock limit reached");
            return Err(CartError::StockLimit {
                product_id: product_id.clone(),
                max_stock,
            });
        }
        if let Some(line) = cart.line_mut(product_id) {
            line.quantity = quantity;
            line.max_stock = max_stock;
            line.touch();
        }
        self.persist(&cart)
    }

    /// Delete a line; no-op if absent.
    pub fn remove(&mut self, product_id: &ProductId) -> Result<()> {
        let mut cart = self.cart()?;
        if cart.remove(product_id).is_some() {
            self.persist(&cart)?;
        }
        Ok(())
    }

    /// Decrease a line's quantity by one; quantity 1 deletes the line.
    /// No-op if absent.
    pub fn decrement(&mut self, product_id: &ProductId) -> Result<()> {
        let mut cart = self.cart()?;
        let Some(quantity) = cart.get(product_id).map(|line| line.quantity) else {
            return Ok(());
        };
        if quantity > 1 {
            if let Some(line) = cart.line_mut(product_id) {
                line.quantity -= 1;
                line.touch();
            }
        } else {
            cart.remove(product_id);
        }
        self.persist(&cart)
    }

    /// Delete the entire cart slot from storage.
    pub fn clear(&mut self) -> Result<()> {
        self.storage.clear()?;
        debug!("cart cleared");
        Ok(())
    }

    /// Sum of quantities across all lines; 0 for an absent cart.
    pub fn item_count(&self) -> Result<u32> {
        Ok(self.cart()?.item_count())
    }

    /// Cart totals at the given flat tax rate.
    pub fn totals(&self, tax_rate: Decimal) -> Result<CartTotals> {
        Ok(self.cart()?.totals(tax_rate))
    }

    /// Fold another cart into this one and persist the result.
    ///
    /// Duplicate products sum their quantities, clamped to the larger known
    /// stock; missing products are inserted as-is.
    pub fn merge(&mut self, other: Cart) -> Result<()> {
        let mut cart = self.cart()?;
        cart.merge(other);
        self.persist(&cart)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cartwheel_core::CurrencyCode;

    use super::*;
    use crate::storage::MemoryStorage;

    fn usd(amount: &str) -> Price {
        Price::new(amount.parse().unwrap(), CurrencyCode::USD)
    }

    fn store() -> CartStore<MemoryStorage> {
        CartStore::new(MemoryStorage::new())
    }

    #[test]
    fn test_add_creates_line_with_quantity_one() {
        let mut store = store();
        let id = ProductId::new("prod-1");
        store.add(&id, "Widget", usd("9.99"), 5).unwrap();

        let cart = store.cart().unwrap();
        let line = cart.get(&id).unwrap();
        assert_eq!(line.quantity, 1);
        assert_eq!(line.max_stock, 5);
        assert_eq!(line.name, "Widget");
    }

    #[test]
    fn test_add_rejects_zero_stock_product() {
        let mut store = store();
        let id = ProductId::new("prod-1");
        let err = store.add(&id, "Widget", usd("9.99"), 0).unwrap_err();
        assert!(matches!(err, CartError::StockLimit { max_stock: 0, .. }));
        assert!(store.cart().unwrap().is_empty());
    }

    #[test]
    fn test_add_refreshes_known_stock() {
        let mut store = store();
        let id = ProductId::new("prod-1");
        store.add(&id, "Widget", usd("9.99"), 5).unwrap();
        store.add(&id, "Widget", usd("9.99"), 8).unwrap();

        let cart = store.cart().unwrap();
        assert_eq!(cart.get(&id).unwrap().max_stock, 8);
    }

    #[test]
    fn test_rejection_persists_nothing() {
        let mut store = store();
        let id = ProductId::new("prod-1");
        store.add(&id, "Widget", usd("9.99"), 1).unwrap();

        let before = store.cart().unwrap();
        let err = store.add(&id, "Widget", usd("9.99"), 1).unwrap_err();
        assert!(matches!(err, CartError::StockLimit { .. }));
        assert_eq!(store.cart().unwrap(), before);
    }

    #[test]
    fn test_set_quantity_zero_deletes_line() {
        let mut store = store();
        let id = ProductId::new("prod-1");
        store.add(&id, "Widget", usd("9.99"), 5).unwrap();
        store.set_quantity(&id, 0, 5).unwrap();
        assert!(store.cart().unwrap().get(&id).is_none());
    }

    #[test]
    fn test_set_quantity_absent_is_noop() {
        let mut store = store();
        store
            .set_quantity(&ProductId::new("ghost"), 3, 5)
            .unwrap();
        assert!(store.cart().unwrap().is_empty());
    }

    #[test]
    fn test_decrement_to_zero_removes_line() {
        let mut store = store();
        let id = ProductId::new("prod-1");
        store.add(&id, "Widget", usd("9.99"), 5).unwrap();
        store.add(&id, "Widget", usd("9.99"), 5).unwrap();

        store.decrement(&id).unwrap();
        assert_eq!(store.cart().unwrap().get(&id).unwrap().quantity, 1);
        store.decrement(&id).unwrap();
        assert!(store.cart().unwrap().get(&id).is_none());
    }

    #[test]
    fn test_clear_deletes_the_slot() {
        let mut store = store();
        let id = ProductId::new("prod-1");
        store.add(&id, "Widget", usd("9.99"), 5).unwrap();
        store.clear().unwrap();
        assert_eq!(store.item_count().unwrap(), 0);
        assert!(store.cart().unwrap().is_empty());
    }
}
