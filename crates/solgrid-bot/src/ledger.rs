//! Live-order ledger.
//!
//! Single shared map of resting orders keyed by client order id.
//! Mutation happens only while the cycle guard is held, so the ledger
//! itself needs no ordering guarantees beyond its own lock.

use std::collections::HashMap;

use parking_lot::Mutex;
use solgrid_core::{ClientOrderId, GridLevel, OrderStatus, OrderTicket};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

/// Tracks every order the strategy has placed and not yet retired.
#[derive(Debug, Default)]
pub struct OrderLedger {
    orders: Mutex<HashMap<ClientOrderId, OrderTicket>>,
}

impl OrderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pending ticket per grid level and register them all.
    pub fn place_grid(&self, levels: &[GridLevel]) -> Vec<OrderTicket> {
        let mut orders = self.orders.lock();
        let mut tickets = Vec::with_capacity(levels.len());
        for level in levels {
            let ticket = OrderTicket::new(level.side, level.price, level.size);
            orders.insert(ticket.id.clone(), ticket.clone());
            tickets.push(ticket);
        }
        info!(count = tickets.len(), "grid placed");
        tickets
    }

    /// Mark a pending order as resting on the book.
    pub fn acknowledge(&self, id: &ClientOrderId) -> AppResult<()> {
        self.transition(id, OrderStatus::Open)
    }

    /// Mark an order filled.
    pub fn record_fill(&self, id: &ClientOrderId) -> AppResult<()> {
        self.transition(id, OrderStatus::Filled)
    }

    /// Cancel every non-terminal order and drop terminal ones from the
    /// live map. Returns the number of orders canceled.
    pub fn cancel_all(&self) -> usize {
        let mut orders = self.orders.lock();
        let mut canceled = 0;
        for ticket in orders.values_mut() {
            if !ticket.status.is_terminal() && ticket.transition(OrderStatus::Canceled).is_ok() {
                canceled += 1;
            }
        }
        orders.clear();
        info!(canceled, "all orders canceled");
        canceled
    }

    /// Orders currently resting on the book.
    pub fn open_orders(&self) -> Vec<OrderTicket> {
        self.orders
            .lock()
            .values()
            .filter(|t| t.status == OrderStatus::Open)
            .cloned()
            .collect()
    }

    /// Number of live (non-terminal) orders.
    pub fn live_count(&self) -> usize {
        self.orders
            .lock()
            .values()
            .filter(|t| !t.status.is_terminal())
            .count()
    }

    fn transition(&self, id: &ClientOrderId, next: OrderStatus) -> AppResult<()> {
        let mut orders = self.orders.lock();
        let ticket = orders
            .get_mut(id)
            .ok_or_else(|| AppError::UnknownOrder(id.to_string()))?;
        ticket.transition(next)?;
        debug!(%id, status = %next, "order transitioned");
        Ok(())
    }
}
