//! Stock availability status for cart lines.

use serde::{Deserialize, Serialize};

/// Classification of a requested quantity against available stock.
///
/// Serialized in snake case (`out_of_stock`, `insufficient_stock`), which is
/// the wire form consumed by notification renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// The requested quantity can be fulfilled.
    #[default]
    Available,
    /// Some stock remains, but less than the requested quantity.
    InsufficientStock,
    /// No stock remains at all.
    OutOfStock,
}

impl StockStatus {
    /// Classify `quantity` against the `stock` units currently available.
    #[must_use]
    pub const fn classify(quantity: u32, stock: u32) -> Self {
        if stock == 0 {
            Self::OutOfStock
        } else if quantity > stock {
            Self::InsufficientStock
        } else {
            Self::Available
        }
    }

    /// User-facing message for this status, given the available stock.
    #[must_use]
    pub fn message(self, stock: u32) -> String {
        match self {
            Self::Available => "In Stock".to_owned(),
            Self::InsufficientStock => {
                format!("Not enough in stock. Only {stock} available.")
            }
            Self::OutOfStock => "Out of Stock".to_owned(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(StockStatus::classify(1, 0), StockStatus::OutOfStock);
        assert_eq!(StockStatus::classify(3, 2), StockStatus::InsufficientStock);
        assert_eq!(StockStatus::classify(2, 2), StockStatus::Available);
        assert_eq!(StockStatus::classify(1, 5), StockStatus::Available);
    }

    #[test]
    fn test_messages() {
        assert_eq!(StockStatus::OutOfStock.message(0), "Out of Stock");
        assert_eq!(
            StockStatus::InsufficientStock.message(2),
            "Not enough in stock. Only 2 available."
        );
    }

    #[test]
    fn test_snake_case_wire_form() {
        let json = serde_json::to_string(&StockStatus::OutOfStock).unwrap();
        assert_eq!(json, "\"out_of_stock\"");
        let json = serde_json::to_string(&StockStatus::InsufficientStock).unwrap();
        assert_eq!(json, "\"insufficient_stock\"");
    }
}
