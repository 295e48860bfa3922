//! Order lifecycle types.
//!
//! An `OrderTicket` is created `Pending` on submission, moves to `Open`
//! on acknowledgment, and ends in one of the terminal states
//! `Filled`, `Canceled`, `Failed`.

use crate::{CoreError, CoreResult, Price, Size};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Open,
    Filled,
    Canceled,
    Failed,
}

impl OrderStatus {
    /// Whether this status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Filled | Self::Canceled | Self::Failed)
    }

    /// Whether a transition to `next` is legal.
    ///
    /// Pending -> Open | Canceled | Failed
    /// Open -> Filled | Canceled | Failed
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        match self {
            Self::Pending => matches!(next, Self::Open | Self::Canceled | Self::Failed),
            Self::Open => matches!(next, Self::Filled | Self::Canceled | Self::Failed),
            _ => false,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Open => write!(f, "open"),
            Self::Filled => write!(f, "filled"),
            Self::Canceled => write!(f, "canceled"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Client-assigned order identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientOrderId(String);

impl ClientOrderId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ClientOrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ClientOrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resting order tracked by the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderTicket {
    pub id: ClientOrderId,
    pub status: OrderStatus,
    pub side: OrderSide,
    pub price: Price,
    pub size: Size,
}

impl OrderTicket {
    /// Create a new pending ticket.
    pub fn new(side: OrderSide, price: Price, size: Size) -> Self {
        Self {
            id: ClientOrderId::generate(),
            status: OrderStatus::Pending,
            side,
            price,
            size,
        }
    }

    /// Apply a status transition, rejecting illegal ones.
    pub fn transition(&mut self, next: OrderStatus) -> CoreResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        Ok(())
    }
}
