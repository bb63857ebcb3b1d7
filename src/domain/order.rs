use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CarCategory;

/// Lifecycle state of an order as stored by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Processing,
    #[serde(rename = "In Transit")]
    InTransit,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::InTransit,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::InTransit => "In Transit",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Exact label lookup, ignoring case and surrounding whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|s| s.as_str().eq_ignore_ascii_case(raw))
    }

    /// Delivered and cancelled orders accept no further status changes.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One car on an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: String,
    #[serde(default)]
    pub category: Option<CarCategory>,
    pub quantity: u32,
    pub price: Decimal,
}

impl LineItem {
    pub fn new(product_id: impl Into<String>, category: Option<CarCategory>, quantity: u32, price: Decimal) -> Self {
        Self {
            product_id: product_id.into(),
            category,
            quantity,
            price,
        }
    }

    /// Price times quantity, or `None` when the product does not fit a `Decimal`.
    pub fn subtotal(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerContact {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// A timestamped tracking event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingStage {
    pub status: OrderStatus,
    pub at: DateTime<Utc>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tracking {
    pub tracking_number: String,
    #[serde(default)]
    pub estimated_delivery: Option<NaiveDate>,
    #[serde(default)]
    pub history: Vec<TrackingStage>,
}

/// Represents a customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub status: OrderStatus,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub items: Vec<LineItem>,
    pub customer: CustomerContact,
    pub tracking: Tracking,
}

/// Payload for creating a new order. The total is derived from the items.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: String,
    pub items: Vec<LineItem>,
    pub customer: CustomerContact,
    pub created_at: DateTime<Utc>,
}

/// Admin edits. Only these two fields are mutable after an order is stored.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub status: Option<OrderStatus>,
    pub estimated_delivery: Option<NaiveDate>,
}

impl Order {
    pub fn total_from_items(items: &[LineItem]) -> Option<Decimal> {
        items
            .iter()
            .try_fold(Decimal::ZERO, |total, item| total.checked_add(item.subtotal()?))
    }

    pub fn tracking_number_for(id: &str) -> String {
        format!("TRK-{}", id.to_ascii_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels_round_trip_through_parse() {
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("in transit"), Some(OrderStatus::InTransit));
        assert_eq!(OrderStatus::parse("lost"), None);
    }

    #[test]
    fn test_status_serializes_with_display_label() {
        let json = serde_json::to_string(&OrderStatus::InTransit).unwrap();
        assert_eq!(json, "\"In Transit\"");
    }

    #[test]
    fn test_total_from_items() {
        let items = vec![
            LineItem::new("car_1", Some(CarCategory::Sedan), 2, Decimal::new(2500050, 2)),
            LineItem::new("car_2", None, 1, Decimal::from(10000)),
        ];
        assert_eq!(Order::total_from_items(&items), Some(Decimal::new(6000100, 2)));
    }

    #[test]
    fn test_total_from_items_overflow_is_none() {
        let doubled = vec![LineItem::new("car_1", None, 2, Decimal::MAX)];
        assert_eq!(doubled[0].subtotal(), None);
        assert_eq!(Order::total_from_items(&doubled), None);

        let two_lines = vec![
            LineItem::new("car_1", None, 1, Decimal::MAX),
            LineItem::new("car_2", None, 1, Decimal::MAX),
        ];
        assert_eq!(Order::total_from_items(&two_lines), None);
    }
}
