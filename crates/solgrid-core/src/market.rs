//! Portfolio and market-history types.

use crate::{CoreError, CoreResult, OrderSide, Price, Size};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single point of trade history used for VWAP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub price: Price,
    pub volume: Size,
}

impl PricePoint {
    pub fn new(price: Price, volume: Size) -> Self {
        Self { price, volume }
    }
}

/// An executed trade. The fee/cost model is applied at read time,
/// never written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub price: Price,
    pub size: Size,
}

impl Trade {
    pub fn new(price: Price, size: Size) -> Self {
        Self { price, size }
    }
}

/// A position held in one asset, refreshed each cycle from the
/// balance collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPosition {
    pub symbol: String,
    pub quantity: Size,
    pub notional_usd: Decimal,
}

impl AssetPosition {
    pub fn new(symbol: impl Into<String>, quantity: Size, notional_usd: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            quantity,
            notional_usd,
        }
    }
}

/// Sum of notional across a portfolio snapshot.
pub fn total_notional(positions: &[AssetPosition]) -> Decimal {
    positions.iter().map(|p| p.notional_usd).sum()
}

/// One level of the order grid. Produced fresh on each rebuild and
/// never mutated afterwards, only superseded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLevel {
    pub price: Price,
    pub size: Size,
    pub side: OrderSide,
    /// 1-based distance from the pivot on this side.
    pub level_index: u32,
}

impl GridLevel {
    pub fn new(price: Price, size: Size, side: OrderSide, level_index: u32) -> Self {
        Self {
            price,
            size,
            side,
            level_index,
        }
    }

    /// Reject non-positive price or size.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.price.is_positive() {
            return Err(CoreError::InvalidPrice(format!(
                "grid level {} has non-positive price {}",
                self.level_index, self.price
            )));
        }
        if !self.size.is_positive() {
            return Err(CoreError::InvalidSize(format!(
                "grid level {} has non-positive size {}",
                self.level_index, self.size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_total_notional() {
        let positions = vec![
            AssetPosition::new("SOL", Size::new(dec!(2)), dec!(300)),
            AssetPosition::new("BMV", Size::new(dec!(1000)), dec!(120)),
        ];
        assert_eq!(total_notional(&positions), dec!(420));
        assert_eq!(total_notional(&[]), dec!(0));
    }

    #[test]
    fn test_grid_level_validate() {
        let good = GridLevel::new(
            Price::new(dec!(95)),
            Size::new(dec!(0.5)),
            OrderSide::Buy,
            1,
        );
        assert!(good.validate().is_ok());

        let bad_price = GridLevel::new(Price::ZERO, Size::new(dec!(0.5)), OrderSide::Buy, 2);
        assert!(matches!(
            bad_price.validate(),
            Err(CoreError::InvalidPrice(_))
        ));

        let bad_size = GridLevel::new(
            Price::new(dec!(95)),
            Size::new(dec!(-1)),
            OrderSide::Sell,
            1,
        );
        assert!(matches!(bad_size.validate(), Err(CoreError::InvalidSize(_))));
    }
}
