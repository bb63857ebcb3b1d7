use chrono::{DateTime, Utc};
use crate::domain::{LineItem, OrderStatus};

/// Custom actions for Order entities.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Appends a tracking stage and moves the order to that status.
    ///
    /// # Errors
    /// Fails on delivered or cancelled orders, and when `status` is `Cancelled`
    /// (cancellation goes through [`OrderAction::Cancel`]).
    RecordStage {
        status: OrderStatus,
        note: Option<String>,
        at: DateTime<Utc>,
    },
    /// Cancels the order. Fails once the order is delivered or already cancelled.
    Cancel { at: DateTime<Utc> },
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone)]
pub enum OrderActionResult {
    /// Length of the tracking history after the stage was appended
    StageRecorded(usize),
    /// The cancelled line items, so reserved stock can be released
    Cancelled(Vec<LineItem>),
}
