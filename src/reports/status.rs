use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::OrderStatus;
use super::{decode_records, ChartPoint, DisplayPolicy, OrderRecord, ReportError};

/// Display bucket a raw order status is normalised into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatusBucket {
    Cancelled,
    Pending,
    Processed,
    Delivered,
}

impl StatusBucket {
    /// Chart order.
    pub const ALL: [StatusBucket; 4] = [
        StatusBucket::Cancelled,
        StatusBucket::Pending,
        StatusBucket::Processed,
        StatusBucket::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusBucket::Cancelled => "Cancelled",
            StatusBucket::Pending => "Pending",
            StatusBucket::Processed => "Processed",
            StatusBucket::Delivered => "Delivered",
        }
    }

    fn index(&self) -> usize {
        match self {
            StatusBucket::Cancelled => 0,
            StatusBucket::Pending => 1,
            StatusBucket::Processed => 2,
            StatusBucket::Delivered => 3,
        }
    }
}

impl fmt::Display for StatusBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checked top to bottom; the first fragment contained in the lowercased status wins.
const STATUS_TABLE: &[(&str, StatusBucket)] = &[
    ("cancel", StatusBucket::Cancelled),
    ("deliver", StatusBucket::Delivered),
    ("process", StatusBucket::Processed),
    ("transit", StatusBucket::Processed),
    ("ship", StatusBucket::Processed),
    ("pending", StatusBucket::Pending),
];

/// Maps any status string to a bucket. Unmatched strings are Pending.
pub fn map_status(raw: &str) -> StatusBucket {
    let status = raw.trim().to_lowercase();
    STATUS_TABLE
        .iter()
        .find(|(fragment, _)| status.contains(fragment))
        .map(|(_, bucket)| *bucket)
        .unwrap_or(StatusBucket::Pending)
}

impl From<OrderStatus> for StatusBucket {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Pending => StatusBucket::Pending,
            OrderStatus::Processing | OrderStatus::InTransit | OrderStatus::Shipped => StatusBucket::Processed,
            OrderStatus::Delivered => StatusBucket::Delivered,
            OrderStatus::Cancelled => StatusBucket::Cancelled,
        }
    }
}

pub fn fallback_statuses() -> Vec<ChartPoint> {
    vec![
        ChartPoint::new("Cancelled", 2),
        ChartPoint::new("Pending", 5),
        ChartPoint::new("Processed", 8),
        ChartPoint::new("Delivered", 15),
    ]
}

/// Counts orders per bucket, in [`StatusBucket::ALL`] order. Orders without a status count as Pending.
pub fn try_status_counts(records: &[OrderRecord], policy: &DisplayPolicy) -> Result<Vec<ChartPoint>, ReportError> {
    if records.is_empty() {
        return Err(ReportError::EmptyInput);
    }

    let mut counts = [0u64; 4];
    for record in records {
        counts[map_status(record.status.as_deref().unwrap_or_default()).index()] += 1;
    }
    if let Some(pinned) = policy.pinned_processed {
        counts[StatusBucket::Processed.index()] = pinned;
    }

    Ok(StatusBucket::ALL
        .iter()
        .map(|bucket| ChartPoint::new(bucket.as_str(), counts[bucket.index()]))
        .collect())
}

fn or_fallback(result: Result<Vec<ChartPoint>, ReportError>) -> Vec<ChartPoint> {
    match result {
        Ok(points) => points,
        Err(ReportError::EmptyInput) => {
            debug!("No orders for status chart, using fallback data");
            fallback_statuses()
        }
        Err(e) => {
            warn!(error = %e, "Status aggregation failed, using fallback data");
            fallback_statuses()
        }
    }
}

/// Status chart for order records. Never fails.
pub fn status_chart(records: &[OrderRecord], policy: &DisplayPolicy) -> Vec<ChartPoint> {
    or_fallback(try_status_counts(records, policy))
}

pub fn status_chart_from_json(payload: &str, policy: &DisplayPolicy) -> Vec<ChartPoint> {
    or_fallback(decode_records::<OrderRecord>(payload).and_then(|records| try_status_counts(&records, policy)))
}
