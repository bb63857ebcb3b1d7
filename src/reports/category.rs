use std::collections::HashMap;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::CarCategory;
use super::{decode_records, Categorized, ChartPoint, DisplayPolicy, ReportError};

pub const UNCATEGORIZED: &str = "Uncategorized";

/// Shown when there is nothing to count or counting failed.
pub fn fallback_categories() -> Vec<ChartPoint> {
    vec![
        ChartPoint::new("Sedan", 12),
        ChartPoint::new("SUV", 9),
        ChartPoint::new("Truck", 6),
        ChartPoint::new("Coupe", 4),
        ChartPoint::new("Convertible", 2),
    ]
}

/// Canonical spelling for known categories; missing, blank or unknown names collapse to [`UNCATEGORIZED`].
fn canonical_label(raw: Option<&str>) -> &'static str {
    raw.and_then(CarCategory::parse)
        .map(|c| c.as_str())
        .unwrap_or(UNCATEGORIZED)
}

/// Forced labels keep their configured spelling unless they name a known category.
fn forced_label(raw: &str) -> String {
    CarCategory::parse(raw)
        .map(|c| c.as_str().to_string())
        .unwrap_or_else(|| raw.trim().to_string())
}

/// Counts records per category, sorted by descending count (ties by label).
pub fn try_category_counts<R: Categorized>(
    records: &[R],
    policy: &DisplayPolicy,
) -> Result<Vec<ChartPoint>, ReportError> {
    if records.is_empty() {
        return Err(ReportError::EmptyInput);
    }

    let mut counts: HashMap<String, u64> = HashMap::new();
    for record in records {
        *counts.entry(canonical_label(record.category_label()).to_string()).or_default() += 1;
    }

    for raw in &policy.forced_categories {
        let label = forced_label(raw);
        if label.is_empty() {
            continue;
        }
        let count = counts.entry(label).or_default();
        if *count == 0 {
            *count = 1;
        }
    }

    let mut points: Vec<ChartPoint> = counts
        .into_iter()
        .map(|(label, value)| ChartPoint { label, value })
        .collect();
    points.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.label.cmp(&b.label)));
    Ok(points)
}

fn or_fallback(result: Result<Vec<ChartPoint>, ReportError>) -> Vec<ChartPoint> {
    match result {
        Ok(points) => points,
        Err(ReportError::EmptyInput) => {
            debug!("No records for category chart, using fallback data");
            fallback_categories()
        }
        Err(e) => {
            warn!(error = %e, "Category aggregation failed, using fallback data");
            fallback_categories()
        }
    }
}

/// Category chart for car or order records. Never fails.
pub fn category_chart<R: Categorized>(records: &[R], policy: &DisplayPolicy) -> Vec<ChartPoint> {
    or_fallback(try_category_counts(records, policy))
}

/// Category chart straight from an API payload. Undecodable payloads get the fallback data.
pub fn category_chart_from_json<R>(payload: &str, policy: &DisplayPolicy) -> Vec<ChartPoint>
where
    R: Categorized + DeserializeOwned,
{
    or_fallback(decode_records::<R>(payload).and_then(|records| try_category_counts(&records, policy)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{CarRecord, OrderRecord};

    fn cars(categories: &[Option<&str>]) -> Vec<CarRecord> {
        categories
            .iter()
            .map(|c| CarRecord { category: c.map(str::to_string), ..Default::default() })
            .collect()
    }

    fn value_of(points: &[ChartPoint], label: &str) -> Option<u64> {
        points.iter().find(|p| p.label == label).map(|p| p.value)
    }

    #[test]
    fn test_counts_sum_to_input_length_and_sort_descending() {
        let records = cars(&[
            Some("SUV"), Some("sedan"), Some("suv"), None, Some("Hovercraft"),
            Some("Truck"), Some("SUV"), Some("  "),
        ]);
        let points = try_category_counts(&records, &DisplayPolicy::plain()).unwrap();

        assert_eq!(points.iter().map(|p| p.value).sum::<u64>(), records.len() as u64);
        assert!(points.windows(2).all(|w| w[0].value >= w[1].value));
        assert_eq!(points[0], ChartPoint::new("SUV", 3));
        assert_eq!(value_of(&points, UNCATEGORIZED), Some(3));
    }

    #[test]
    fn test_forced_category_appears_when_absent() {
        let records = cars(&[Some("Sedan"), Some("Sedan"), Some("Truck")]);
        let points = category_chart(&records, &DisplayPolicy::default());

        assert_eq!(value_of(&points, "Coupe"), Some(1));
        let padded = 1;
        assert_eq!(points.iter().map(|p| p.value).sum::<u64>(), records.len() as u64 + padded);
        assert!(points.windows(2).all(|w| w[0].value >= w[1].value));
    }

    #[test]
    fn test_forced_category_keeps_real_count() {
        let records = cars(&[Some("coupe"), Some("Coupe"), Some("Sedan")]);
        let points = category_chart(&records, &DisplayPolicy::default());
        assert_eq!(points[0], ChartPoint::new("Coupe", 2));
    }

    #[test]
    fn test_ties_are_ordered_by_label() {
        let records = cars(&[Some("Truck"), Some("Sedan")]);
        let points = category_chart(&records, &DisplayPolicy::plain());
        assert_eq!(points, vec![ChartPoint::new("Sedan", 1), ChartPoint::new("Truck", 1)]);
    }

    #[test]
    fn test_empty_input_yields_fallback() {
        let points = category_chart::<CarRecord>(&[], &DisplayPolicy::default());
        assert_eq!(points, fallback_categories());
    }

    #[test]
    fn test_malformed_payload_yields_fallback() {
        let policy = DisplayPolicy::default();
        assert_eq!(category_chart_from_json::<CarRecord>("not json", &policy), fallback_categories());
        assert_eq!(category_chart_from_json::<CarRecord>(r#"[{"category": 7}]"#, &policy), fallback_categories());
        assert_eq!(category_chart_from_json::<CarRecord>("[]", &policy), fallback_categories());
    }

    #[test]
    fn test_orders_are_counted_by_item_category() {
        let payload = r#"[
            {"id": "1", "items": [{"productId": "car_1", "category": "Convertible"}]},
            {"id": "2", "category": "SUV"},
            {"id": "3"}
        ]"#;
        let points = category_chart_from_json::<OrderRecord>(payload, &DisplayPolicy::plain());
        assert_eq!(points.len(), 3);
        assert_eq!(value_of(&points, "Convertible"), Some(1));
        assert_eq!(value_of(&points, UNCATEGORIZED), Some(1));
    }
}
