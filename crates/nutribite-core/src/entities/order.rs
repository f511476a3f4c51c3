//! Order entity - a customer's meal order and its lifecycle

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Allowed forward moves:
    /// pending -> confirmed -> preparing -> out_for_delivery -> delivered,
    /// and cancellation from pending or confirmed.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::{Cancelled, Confirmed, Delivered, OutForDelivery, Pending, Preparing};
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Confirmed, Preparing)
                | (Preparing, OutForDelivery)
                | (OutForDelivery, Delivered)
                | (Pending | Confirmed, Cancelled)
        )
    }

    /// Next step along the fulfilment chain, if any
    pub fn next_forward(self) -> Option<OrderStatus> {
        match self {
            Self::Pending => Some(Self::Confirmed),
            Self::Confirmed => Some(Self::Preparing),
            Self::Preparing => Some(Self::OutForDelivery),
            Self::OutForDelivery => Some(Self::Delivered),
            Self::Delivered | Self::Cancelled => None,
        }
    }

    /// Statuses to walk through, in order, to reach `target`; empty when
    /// already there, `None` when `target` is not ahead on the chain
    pub fn forward_path_to(self, target: OrderStatus) -> Option<Vec<OrderStatus>> {
        let mut path = Vec::new();
        let mut at = self;
        while at != target {
            at = at.next_forward()?;
            path.push(at);
        }
        Some(path)
    }

    /// Courier may be assigned in these states
    #[inline]
    pub fn accepts_courier(self) -> bool {
        matches!(self, Self::Confirmed | Self::Preparing)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "preparing" => Ok(Self::Preparing),
            "out_for_delivery" => Ok(Self::OutForDelivery),
            "delivered" => Ok(Self::Delivered),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(format!("Invalid order status: {s}")),
        }
    }
}

/// Line item of an order; price is captured at order time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub recipe_id: i64,
    pub quantity: i32,
    pub unit_price_cents: i64,
}

impl OrderItem {
    #[inline]
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * i64::from(self.quantity)
    }
}

/// Order aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub total_cents: i64,
    pub delivery_address: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Values needed to insert an order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer_id: i64,
    pub items: Vec<OrderItem>,
    pub delivery_address: String,
    pub notes: Option<String>,
}

impl NewOrder {
    /// Sum of all line totals
    pub fn total_cents(&self) -> i64 {
        self.items.iter().map(OrderItem::line_total_cents).sum()
    }
}
