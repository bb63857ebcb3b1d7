//! Chart aggregations over order and car records.
//!
//! Each chart has a fallible `try_*` core and an infallible public wrapper.
//! The wrapper logs the failure and substitutes a static dataset, so callers
//! always get something to draw.

pub mod records;
pub mod category;
pub mod status;
pub mod sales;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use records::*;
pub use category::*;
pub use status::*;
pub use sales::*;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no records to aggregate")]
    EmptyInput,
    #[error("could not decode records: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid total: {0:?}")]
    InvalidTotal(String),
    #[error("unrecognised date: {0:?}")]
    InvalidDate(String),
}

/// One bar or slice of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: u64,
}

impl ChartPoint {
    pub fn new(label: impl Into<String>, value: u64) -> Self {
        Self { label: label.into(), value }
    }
}

/// Presentation tweaks applied after aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayPolicy {
    /// Categories that always show up in the category chart, with a count of at least one.
    pub forced_categories: Vec<String>,
    /// Replaces the computed Processed count in the status chart.
    pub pinned_processed: Option<u64>,
}

impl Default for DisplayPolicy {
    fn default() -> Self {
        Self {
            forced_categories: vec!["Coupe".to_string()],
            pinned_processed: None,
        }
    }
}

impl DisplayPolicy {
    /// No forced categories, nothing pinned.
    pub fn plain() -> Self {
        Self {
            forced_categories: Vec::new(),
            pinned_processed: None,
        }
    }
}

/// Decodes a JSON array payload from the storefront API.
pub fn decode_records<T: serde::de::DeserializeOwned>(payload: &str) -> Result<Vec<T>, ReportError> {
    Ok(serde_json::from_str(payload)?)
}
