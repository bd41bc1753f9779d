use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::product::ProductId;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
    Canceled,
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Canceled => "Canceled",
        }
    }
}

/// A placed order. Items are a snapshot of the cart at purchase time;
/// identifiers referencing products that have left the catalog are skipped
/// at render time rather than invalidating the order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub items: Vec<ProductId>,
    pub placed_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub tracking: String,
}

impl Order {
    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.placed_at).num_days()
    }

    pub fn age_hours(&self, now: DateTime<Utc>) -> i64 {
        (now - self.placed_at).num_hours()
    }
}
