//! Grid ladder construction.
//!
//! Turns the pivot price into an ordered ladder of buy/sell levels.
//! Two grid shapes exist historically and both are supported, selected
//! by `GridMode` in configuration.

pub mod builder;
pub mod config;
pub mod error;

pub use builder::GridBuilder;
pub use config::{ChannelWidthConfig, FixedSpacingConfig, GridConfig, GridMode};
pub use error::{GridError, GridResult};
