//! Core domain types for the solgrid market-making bot.
//!
//! This crate provides the fundamental types shared by the strategy crates:
//! - `Price`, `Size`: precision-safe decimal newtypes
//! - `OrderSide`, `OrderStatus`, `OrderTicket`: order lifecycle types
//! - `GridLevel`: a single resting-order level of the grid ladder
//! - `AssetPosition`, `Trade`, `PricePoint`: portfolio and market history

pub mod decimal;
pub mod error;
pub mod market;
pub mod order;

pub use decimal::{Price, Size};
pub use error::{CoreError, CoreResult};
pub use market::{total_notional, AssetPosition, GridLevel, PricePoint, Trade};
pub use order::{ClientOrderId, OrderSide, OrderStatus, OrderTicket};
