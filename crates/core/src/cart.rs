//! The cart data model: lines keyed by product, counts, and totals.
//!
//! A [`Cart`] is a plain mapping from [`ProductId`] to [`CartLine`]. It holds
//! no storage handle and performs no I/O; the `cartwheel-cart` crate owns
//! loading, mutating, and persisting it.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// One entry per distinct product currently in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Display name, captured when the product is first added.
    pub name: String,
    /// Unit price captured at add-time; reconciliation does not re-price.
    pub price: Price,
    /// Always >= 1; a line that would drop to 0 is deleted instead.
    pub quantity: u32,
    /// Last known available stock for this product.
    pub max_stock: u32,
    /// When the line was first added.
    pub added_at: DateTime<Utc>,
    /// Refreshed on every mutation of this line.
    pub updated_at: DateTime<Utc>,
}

impl CartLine {
    /// Create a fresh line with quantity 1.
    #[must_use]
    pub fn new(name: impl Into<String>, price: Price, max_stock: u32) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            price,
            quantity: 1,
            max_stock,
            added_at: now,
            updated_at: now,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price.amount * Decimal::from(self.quantity)
    }

    /// Record a mutation timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Mapping from product id to cart line.
///
/// Absence of a key means "not in cart". Insertion order is irrelevant; a
/// `BTreeMap` keeps serialization deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: BTreeMap<ProductId, CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: BTreeMap::new(),
        }
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.get(product_id)
    }

    /// Mutable access to a line by product id.
    pub fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLine> {
        self.lines.get_mut(product_id)
    }

    /// Insert or replace a line.
    pub fn insert(&mut self, product_id: ProductId, line: CartLine) {
        self.lines.insert(product_id, line);
    }

    /// Delete a line, returning it if it was present.
    pub fn remove(&mut self, product_id: &ProductId) -> Option<CartLine> {
        self.lines.remove(product_id)
    }

    /// Iterate over all lines.
    pub fn lines(&self) -> impl Iterator<Item = (&ProductId, &CartLine)> {
        self.lines.iter()
    }

    /// Product ids of all lines, in key order.
    #[must_use]
    pub fn product_ids(&self) -> Vec<ProductId> {
        self.lines.keys().cloned().collect()
    }

    /// True if the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.values().map(|line| line.quantity).sum()
    }

    /// Sum of line subtotals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.values().map(CartLine::subtotal).sum()
    }

    /// Totals for display and checkout at the given flat tax rate.
    #[must_use]
    pub fn totals(&self, tax_rate: Decimal) -> CartTotals {
        let subtotal = self.subtotal();
        let tax = subtotal * tax_rate;
        CartTotals {
            subtotal,
            tax,
            grand_total: subtotal + tax,
        }
    }

    /// Fold another cart's lines into this one.
    ///
    /// Duplicate products sum their quantities, clamped to the larger known
    /// stock so the quantity invariant survives; missing products are
    /// inserted as-is.
    pub fn merge(&mut self, other: Self) {
        for (product_id, incoming) in other.lines {
            match self.lines.entry(product_id) {
                Entry::Occupied(mut occupied) => {
                    let line = occupied.get_mut();
                    line.max_stock = line.max_stock.max(incoming.max_stock);
                    line.quantity = line
                        .quantity
                        .saturating_add(incoming.quantity)
                        .min(line.max_stock);
                    line.touch();
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(incoming);
                }
            }
        }
    }
}

/// Totals for display and checkout: subtotal, flat tax, grand total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of line subtotals.
    pub subtotal: Decimal,
    /// Subtotal times the configured tax rate.
    pub tax: Decimal,
    /// Subtotal plus tax.
    pub grand_total: Decimal,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::CurrencyCode;

    fn usd(amount: &str) -> Price {
        Price::new(amount.parse().unwrap(), CurrencyCode::USD)
    }

    fn line(amount: &str, quantity: u32, max_stock: u32) -> CartLine {
        let mut line = CartLine::new("Widget", usd(amount), max_stock);
        line.quantity = quantity;
        line
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let mut cart = Cart::new();
        assert_eq!(cart.item_count(), 0);

        cart.insert(ProductId::new("a"), line("1.00", 2, 5));
        cart.insert(ProductId::new("b"), line("2.00", 3, 5));
        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_line_subtotal() {
        let line = line("9.99", 3, 5);
        assert_eq!(line.subtotal(), "29.97".parse().unwrap());
    }

    #[test]
    fn test_totals_with_flat_tax() {
        let mut cart = Cart::new();
        cart.insert(ProductId::new("a"), line("50.00", 2, 5));

        let totals = cart.totals("0.02".parse().unwrap());
        assert_eq!(totals.subtotal, "100.00".parse().unwrap());
        assert_eq!(totals.tax, "2.0000".parse().unwrap());
        assert_eq!(totals.grand_total, "102.0000".parse().unwrap());
    }

    #[test]
    fn test_merge_sums_duplicates_and_unions_rest() {
        let mut cart = Cart::new();
        cart.insert(ProductId::new("a"), line("1.00", 2, 10));

        let mut other = Cart::new();
        other.insert(ProductId::new("a"), line("1.00", 3, 10));
        other.insert(ProductId::new("b"), line("2.00", 1, 4));

        cart.merge(other);
        assert_eq!(cart.get(&ProductId::new("a")).unwrap().quantity, 5);
        assert_eq!(cart.get(&ProductId::new("b")).unwrap().quantity, 1);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_merge_clamps_to_known_stock() {
        let mut cart = Cart::new();
        cart.insert(ProductId::new("a"), line("1.00", 3, 4));

        let mut other = Cart::new();
        other.insert(ProductId::new("a"), line("1.00", 3, 3));

        cart.merge(other);
        let merged = cart.get(&ProductId::new("a")).unwrap();
        assert_eq!(merged.quantity, 4);
        assert_eq!(merged.max_stock, 4);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut cart = Cart::new();
        cart.insert(ProductId::new("a"), line("9.99", 2, 5));

        let json = serde_json::to_string(&cart).unwrap();
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }
}
