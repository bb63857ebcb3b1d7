use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::{Car, LineItem, Order};

/// Accepts a string, a number or null; anything else is a decode error.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!("expected text or number, got {}", other))),
    }
}

/// Accepts a non-negative integer either as a number or as numeric text.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let invalid = |v: &dyn std::fmt::Display| -> D::Error {
        serde::de::Error::custom(format!("expected a count, got {}", v))
    };
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| invalid(&n)),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s.trim().parse::<u32>().map(Some).map_err(|_| invalid(&s)),
        other => Err(invalid(&other)),
    }
}

/// Line item as it appears on an order in the API payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItemRecord {
    pub product_id: Option<String>,
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    pub quantity: Option<u32>,
    #[serde(deserialize_with = "lenient_text")]
    pub price: Option<String>,
}

/// Order as the API returns it. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderRecord {
    pub id: Option<String>,
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub total: Option<String>,
    #[serde(alias = "date", alias = "orderDate")]
    pub created_at: Option<String>,
    pub category: Option<String>,
    pub items: Vec<LineItemRecord>,
}

/// Car as the API returns it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CarRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
}

/// Records that can be counted by category.
pub trait Categorized {
    fn category_label(&self) -> Option<&str>;
}

impl Categorized for CarRecord {
    fn category_label(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

impl Categorized for OrderRecord {
    /// The order's own category, else the first line item that has one.
    fn category_label(&self) -> Option<&str> {
        self.category
            .as_deref()
            .or_else(|| self.items.iter().find_map(|item| item.category.as_deref()))
    }
}

impl From<&LineItem> for LineItemRecord {
    fn from(item: &LineItem) -> Self {
        Self {
            product_id: Some(item.product_id.clone()),
            category: item.category.map(|c| c.as_str().to_string()),
            quantity: Some(item.quantity),
            price: Some(item.price.to_string()),
        }
    }
}

impl From<&Order> for OrderRecord {
    fn from(order: &Order) -> Self {
        Self {
            id: Some(order.id.clone()),
            status: Some(order.status.as_str().to_string()),
            total: Some(format!("${}", order.total)),
            created_at: Some(order.created_at.to_rfc3339()),
            category: None,
            items: order.items.iter().map(LineItemRecord::from).collect(),
        }
    }
}

impl From<&Car> for CarRecord {
    fn from(car: &Car) -> Self {
        Self {
            id: Some(car.id.clone()),
            name: Some(car.name.clone()),
            brand: Some(car.brand.clone()),
            category: Some(car.category.as_str().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::decode_records;

    #[test]
    fn test_order_record_accepts_text_or_numeric_totals() {
        let payload = r#"[
            {"id": "1", "status": "shipped", "total": "$1,200.50", "createdAt": "2024-01-05"},
            {"id": "2", "total": 980.25, "date": "02/14/2024", "customer": {"name": "Ari"}},
            {"id": "3", "total": null}
        ]"#;
        let records: Vec<OrderRecord> = decode_records(payload).unwrap();

        assert_eq!(records[0].total.as_deref(), Some("$1,200.50"));
        assert_eq!(records[1].total.as_deref(), Some("980.25"));
        assert_eq!(records[1].created_at.as_deref(), Some("02/14/2024"));
        assert_eq!(records[2].total, None);
        assert_eq!(records[2].status, None);
    }

    #[test]
    fn test_order_record_rejects_structured_total() {
        let payload = r#"[{"total": {"amount": 5}}]"#;
        assert!(decode_records::<OrderRecord>(payload).is_err());
    }

    #[test]
    fn test_line_item_quantity_accepts_text_or_number() {
        let payload = r#"[{"items": [
            {"productId": "car_1", "quantity": "2", "price": "$28,000"},
            {"productId": "car_2", "quantity": 3},
            {"productId": "car_3", "quantity": null},
            {"productId": "car_4"}
        ]}]"#;
        let records: Vec<OrderRecord> = decode_records(payload).unwrap();
        let quantities: Vec<Option<u32>> = records[0].items.iter().map(|item| item.quantity).collect();
        assert_eq!(quantities, vec![Some(2), Some(3), None, None]);

        assert!(decode_records::<OrderRecord>(r#"[{"items": [{"quantity": "two"}]}]"#).is_err());
        assert!(decode_records::<OrderRecord>(r#"[{"items": [{"quantity": -1}]}]"#).is_err());
    }

    #[test]
    fn test_order_category_falls_back_to_line_items() {
        let record = OrderRecord {
            items: vec![
                LineItemRecord::default(),
                LineItemRecord { category: Some("Truck".into()), ..Default::default() },
            ],
            ..Default::default()
        };
        assert_eq!(record.category_label(), Some("Truck"));
    }
}
