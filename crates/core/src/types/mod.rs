//! Core types for Cartwheel.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod status;

pub use id::ProductId;
pub use price::{CurrencyCode, Price};
pub use status::StockStatus;
