//! Orders and the append-only order book.

use chrono::{DateTime, Utc};
use common::{Money, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::cart::CartLine;

/// The state of an order in its lifecycle.
///
/// State transitions:
/// ```text
/// Pending ──► Processing ──► Shipped ──► Delivered
///    │            │             │
///    └────────────┴─────────────┴──► Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order has been placed, awaiting fulfilment.
    #[default]
    Pending,

    /// Order is being prepared.
    Processing,

    /// Order has left the warehouse.
    Shipped,

    /// Order reached the customer (terminal state).
    Delivered,

    /// Order was cancelled (terminal state).
    Cancelled,
}

impl OrderStatus {
    /// The next status in the linear progression, `None` from a terminal
    /// state.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Processing),
            OrderStatus::Processing => Some(OrderStatus::Shipped),
            OrderStatus::Shipped => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    /// Returns true if the order can be cancelled from this state.
    pub fn can_cancel(&self) -> bool {
        !self.is_terminal()
    }

    /// Returns true if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur on order operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// The status does not allow the attempted transition.
    #[error("invalid status transition: cannot {action} from {status} status")]
    InvalidStatusTransition {
        status: OrderStatus,
        action: &'static str,
    },

    /// No order with the given number exists.
    #[error("order not found: {0}")]
    NotFound(String),
}

/// A snapshot of one cart line at order time.
///
/// Copies the product's price and name so later catalog changes never
/// rewrite order history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    /// Unit price at order time.
    pub price: Money,
    pub quantity: u32,
    pub image_name: Option<String>,
}

impl OrderItem {
    /// Snapshots a cart line.
    pub fn from_line(line: &CartLine) -> Self {
        Self {
            product_id: line.product.id.clone(),
            product_name: line.product.name.clone(),
            price: line.product.price,
            quantity: line.quantity,
            image_name: if line.product.image_name.is_empty() {
                None
            } else {
                Some(line.product.image_name.clone())
            },
        }
    }

    /// Returns the total price for this item (price * quantity).
    pub fn total_price(&self) -> Money {
        self.price.multiply(self.quantity)
    }
}

/// A placed order.
///
/// Immutable after creation except for its status, which moves through
/// the [`OrderStatus`] machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    /// Human-readable number, unique within the order book.
    pub order_number: String,
    pub placed_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub total_amount: Money,
    pub items: Vec<OrderItem>,
    pub shipping_address: String,
    /// Masked display string for the payment method used.
    pub payment_method: String,
}

impl Order {
    /// Advances the status one step along the linear progression.
    pub fn advance(&mut self) -> Result<(), OrderError> {
        match self.status.next() {
            Some(next) => {
                self.status = next;
                Ok(())
            }
            None => Err(OrderError::InvalidStatusTransition {
                status: self.status,
                action: "advance",
            }),
        }
    }

    /// Cancels the order; allowed from any non-terminal state.
    pub fn cancel(&mut self) -> Result<(), OrderError> {
        if !self.status.can_cancel() {
            return Err(OrderError::InvalidStatusTransition {
                status: self.status,
                action: "cancel",
            });
        }
        self.status = OrderStatus::Cancelled;
        Ok(())
    }

    /// Recomputes the item total, which must equal `total_amount`.
    pub fn items_total(&self) -> Money {
        self.items.iter().map(OrderItem::total_price).sum()
    }
}

/// Append-only log of placed orders.
///
/// Orders are never removed; order numbers come from a monotonic counter
/// so they cannot collide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    orders: Vec<Order>,
    next_seq: u64,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self {
            orders: Vec::new(),
            next_seq: 1,
        }
    }
}

impl OrderBook {
    /// Creates an empty order book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next order number, e.g. `ORD-0001`.
    pub fn next_order_number(&mut self) -> String {
        let number = format!("ORD-{:04}", self.next_seq);
        self.next_seq += 1;
        number
    }

    /// Appends an order.
    pub fn record(&mut self, order: Order) {
        self.orders.push(order);
    }

    /// Returns all orders, oldest first.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Returns the order with the given number.
    pub fn get(&self, order_number: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.order_number == order_number)
    }

    /// Returns orders in the given status.
    pub fn by_status(&self, status: OrderStatus) -> Vec<&Order> {
        self.orders.iter().filter(|o| o.status == status).collect()
    }

    /// Advances the status of the order with the given number.
    pub fn advance(&mut self, order_number: &str) -> Result<&Order, OrderError> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.order_number == order_number)
            .ok_or_else(|| OrderError::NotFound(order_number.to_string()))?;
        order.advance()?;
        Ok(order)
    }

    /// Cancels the order with the given number.
    pub fn cancel(&mut self, order_number: &str) -> Result<&Order, OrderError> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.order_number == order_number)
            .ok_or_else(|| OrderError::NotFound(order_number.to_string()))?;
        order.cancel()?;
        Ok(order)
    }

    /// Returns the number of orders.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Returns true if no orders have been placed.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
