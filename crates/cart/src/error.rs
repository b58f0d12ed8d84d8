//! Unified error handling for cart operations.
//!
//! All store operations return `Result<T, CartError>`. A stock-limit
//! rejection is recoverable: the cart is left untouched and the caller
//! renders the rejection however it likes. Storage failures propagate
//! unmodified.

use cartwheel_core::ProductId;
use thiserror::Error;

use crate::storage::StorageError;

/// Cart-level error type.
#[derive(Debug, Error)]
pub enum CartError {
    /// An add or quantity-set would exceed the available stock.
    #[error("stock limit reached for {product_id}: {max_stock} available")]
    StockLimit {
        /// Product whose stock the request exceeded.
        product_id: ProductId,
        /// The stock level known at rejection time.
        max_stock: u32,
    },

    /// Storage read or write failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
