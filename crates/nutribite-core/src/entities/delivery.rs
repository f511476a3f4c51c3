//! Delivery entity - a courier assignment for an order

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::order::OrderStatus;

/// Delivery lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Pending,
    Assigned,
    PickedUp,
    Delivered,
    Failed,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Assigned => "assigned",
            Self::PickedUp => "picked_up",
            Self::Delivered => "delivered",
            Self::Failed => "failed",
        }
    }

    pub fn can_transition_to(self, next: DeliveryStatus) -> bool {
        use DeliveryStatus::{Assigned, Delivered, Failed, Pending, PickedUp};
        matches!(
            (self, next),
            (Pending, Assigned)
                | (Assigned, PickedUp)
                | (PickedUp, Delivered)
                | (Assigned | PickedUp, Failed)
        )
    }

    /// Still in the courier's hands
    #[inline]
    pub fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::Assigned | Self::PickedUp)
    }

    /// Order status implied by reaching this delivery status, if any
    pub fn implied_order_status(self) -> Option<OrderStatus> {
        match self {
            Self::PickedUp => Some(OrderStatus::OutForDelivery),
            Self::Delivered => Some(OrderStatus::Delivered),
            _ => None,
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "assigned" => Ok(Self::Assigned),
            "picked_up" => Ok(Self::PickedUp),
            "delivered" => Ok(Self::Delivered),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("Invalid delivery status: {s}")),
        }
    }
}

/// Delivery record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub id: i64,
    pub order_id: i64,
    /// `None` once the courier was removed and the delivery went back to the pool
    pub courier_id: Option<i64>,
    pub status: DeliveryStatus,
    pub assigned_at: Option<DateTime<Utc>>,
    pub picked_up_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
