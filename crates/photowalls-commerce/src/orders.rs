//! Order history.
//!
//! Orders are read-only records shown on the account page. Nothing in a
//! session creates one; checkout is display-only.

use crate::cart::{pricing, LineItem};
use crate::error::CommerceError;
use crate::ids::OrderId;
use crate::money::{Currency, Money};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Order status, in progression order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order received.
    #[default]
    Processing,
    /// Wallpaper is being printed.
    Printing,
    /// On its way.
    Shipping,
    /// Handed to the customer.
    Delivered,
}

impl OrderStatus {
    /// Every status in progression order.
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Processing,
        OrderStatus::Printing,
        OrderStatus::Shipping,
        OrderStatus::Delivered,
    ];

    /// Zero-based position in the progression.
    pub fn ordinal(&self) -> usize {
        match self {
            OrderStatus::Processing => 0,
            OrderStatus::Printing => 1,
            OrderStatus::Shipping => 2,
            OrderStatus::Delivered => 3,
        }
    }

    /// The following status, or `None` once delivered.
    pub fn next(&self) -> Option<OrderStatus> {
        Self::ALL.get(self.ordinal() + 1).copied()
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "processing",
            OrderStatus::Printing => "printing",
            OrderStatus::Shipping => "shipping",
            OrderStatus::Delivered => "delivered",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "Processing",
            OrderStatus::Printing => "Printing",
            OrderStatus::Shipping => "Shipping",
            OrderStatus::Delivered => "Delivered",
        }
    }

    /// Parse a status from its `as_str` form.
    pub fn from_str_opt(s: &str) -> Option<OrderStatus> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

/// A past order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub date: NaiveDate,
    pub status: OrderStatus,
    pub items: Vec<LineItem>,
    /// Sum of line totals at the time of ordering.
    pub total: Money,
}

impl Order {
    /// Create an order; the total is computed from the items.
    pub fn new(
        id: impl Into<OrderId>,
        date: NaiveDate,
        status: OrderStatus,
        items: Vec<LineItem>,
        currency: Currency,
    ) -> Result<Self, CommerceError> {
        let total = pricing::subtotal(&items, currency)?;
        Ok(Self {
            id: id.into(),
            date,
            status,
            items,
            total,
        })
    }

    /// Total number of units ordered.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// Orders, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct OrderHistory {
    orders: Vec<Order>,
}

impl OrderHistory {
    /// Build a history. Orders are sorted by date, newest first; orders on
    /// the same date keep their given order.
    pub fn new(mut orders: Vec<Order>) -> Self {
        orders.sort_by(|a, b| b.date.cmp(&a.date));
        Self { orders }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Look up an order by ID.
    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.id == id)
    }

    /// Orders that have not been delivered yet.
    pub fn in_progress(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter().filter(|o| !o.status.is_terminal())
    }
}
