//! Admin dashboard: summary cards plus the three charts.
//!
//! Composition only. Every number comes from the aggregations in
//! [`crate::reports`] or from a plain count over the snapshot.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::config::ShowroomConfig;
use crate::domain::{Car, Order, OrderStatus, User};
use crate::reports::{
    category_chart, monthly_sales, status_chart, CarRecord, ChartPoint, MonthlySales, OrderRecord, StatusBucket,
};

const BAR_WIDTH: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub title: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub cards: Vec<Card>,
    pub category_chart: Vec<ChartPoint>,
    pub status_chart: Vec<ChartPoint>,
    pub monthly_sales: Vec<MonthlySales>,
    /// `"name (stock)"` for every listing at or below the low-stock threshold
    pub low_stock: Vec<String>,
}

/// Formats an amount as `$12,345.67`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}${}.{}", sign, grouped, cents)
}

/// Revenue from every order that was not cancelled.
///
/// An order whose total would overflow the running sum is logged and left out.
pub fn revenue(orders: &[Order]) -> Decimal {
    orders
        .iter()
        .filter(|order| order.status != OrderStatus::Cancelled)
        .fold(Decimal::ZERO, |sum, order| match sum.checked_add(order.total) {
            Some(next) => next,
            None => {
                warn!(order_id = %order.id, total = %order.total, "Revenue overflows, skipping order");
                sum
            }
        })
}

impl Dashboard {
    pub fn compose(orders: &[Order], cars: &[Car], users: &[User], config: &ShowroomConfig) -> Self {
        let order_records: Vec<OrderRecord> = orders.iter().map(OrderRecord::from).collect();
        let car_records: Vec<CarRecord> = cars.iter().map(CarRecord::from).collect();

        let in_bucket = |bucket: StatusBucket| {
            orders.iter().filter(|order| StatusBucket::from(order.status) == bucket).count()
        };

        let mut low: Vec<&Car> = cars.iter().filter(|car| car.stock <= config.low_stock_threshold).collect();
        low.sort_by(|a, b| a.stock.cmp(&b.stock).then_with(|| a.name.cmp(&b.name)));
        let low_stock: Vec<String> = low.iter().map(|car| format!("{} ({})", car.name, car.stock)).collect();

        let units: u64 = cars.iter().map(|car| u64::from(car.stock)).sum();
        let models = cars.iter().filter(|car| car.in_stock()).count();
        let customers = users.iter().filter(|user| !user.is_admin()).count();

        let cards = vec![
            Card { title: "Total Orders", value: orders.len().to_string() },
            Card { title: "Revenue", value: format_currency(revenue(orders)) },
            Card { title: "Pending Orders", value: in_bucket(StatusBucket::Pending).to_string() },
            Card { title: "Delivered Orders", value: in_bucket(StatusBucket::Delivered).to_string() },
            Card { title: "Cars in Stock", value: units.to_string() },
            Card { title: "Models Available", value: models.to_string() },
            Card { title: "Low Stock", value: low_stock.len().to_string() },
            Card { title: "Customers", value: customers.to_string() },
        ];

        Self {
            cards,
            category_chart: category_chart(&car_records, &config.display),
            status_chart: status_chart(&order_records, &config.display),
            monthly_sales: monthly_sales(&order_records, config.sales_year),
            low_stock,
        }
    }

    pub fn card(&self, title: &str) -> Option<&str> {
        self.cards.iter().find(|card| card.title == title).map(|card| card.value.as_str())
    }
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(len.min(BAR_WIDTH))
}

fn write_chart(f: &mut fmt::Formatter<'_>, title: &str, points: &[ChartPoint]) -> fmt::Result {
    writeln!(f, "{}", title)?;
    let max = points.iter().map(|p| p.value).max().unwrap_or(0) as f64;
    for point in points {
        writeln!(f, "  {:<14} {:>5} {}", point.label, point.value, bar(point.value as f64, max))?;
    }
    writeln!(f)
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Showroom Dashboard")?;
        writeln!(f, "{}", "=".repeat(18))?;
        for card in &self.cards {
            writeln!(f, "  {:<18} {:>14}", card.title, card.value)?;
        }
        if !self.low_stock.is_empty() {
            writeln!(f, "  Restock: {}", self.low_stock.join(", "))?;
        }
        writeln!(f)?;

        write_chart(f, "Inventory by Category", &self.category_chart)?;
        write_chart(f, "Orders by Status", &self.status_chart)?;

        writeln!(f, "Monthly Sales")?;
        let max = self
            .monthly_sales
            .iter()
            .filter_map(|m| m.total.to_f64())
            .fold(0.0, f64::max);
        for month in &self.monthly_sales {
            writeln!(
                f,
                "  {:<4} {:>14} {}",
                month.month,
                format_currency(month.total),
                bar(month.total.to_f64().unwrap_or(0.0), max)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_system::fixtures::showroom_seed;
    use crate::reports::{fallback_categories, fallback_statuses, demo_monthly_sales};

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(Decimal::ZERO), "$0.00");
        assert_eq!(format_currency(Decimal::new(99, 2)), "$0.99");
        assert_eq!(format_currency(Decimal::from(1000)), "$1,000.00");
        assert_eq!(format_currency(Decimal::new(123456789, 2)), "$1,234,567.89");
        assert_eq!(format_currency(Decimal::new(-250005, 2)), "-$2,500.05");
        assert_eq!(format_currency(Decimal::new(100, 0)), "$100.00");
    }

    #[test]
    fn test_compose_from_seed() {
        let seed = showroom_seed();
        let dashboard = Dashboard::compose(&seed.orders, &seed.cars, &seed.users, &ShowroomConfig::default());

        assert_eq!(dashboard.card("Total Orders"), Some("8"));
        assert_eq!(dashboard.card("Revenue"), Some("$269,500.00"));
        assert_eq!(dashboard.card("Pending Orders"), Some("2"));
        assert_eq!(dashboard.card("Delivered Orders"), Some("2"));
        assert_eq!(dashboard.card("Cars in Stock"), Some("21"));
        assert_eq!(dashboard.card("Models Available"), Some("6"));
        assert_eq!(dashboard.card("Customers"), Some("2"));
        assert_eq!(dashboard.low_stock, vec!["MX-5 Miata (0)", "Mustang (1)", "Explorer (2)"]);

        assert_eq!(
            dashboard.status_chart,
            vec![
                ChartPoint::new("Cancelled", 1),
                ChartPoint::new("Pending", 2),
                ChartPoint::new("Processed", 3),
                ChartPoint::new("Delivered", 2),
            ]
        );
        assert_eq!(dashboard.category_chart[0].value, 2);
        assert_eq!(dashboard.monthly_sales[6].total, Decimal::from(56000));
        assert_eq!(dashboard.monthly_sales[5].total, Decimal::from(41000));
    }

    #[test]
    fn test_revenue_skips_order_that_overflows() {
        let mut huge = showroom_seed().orders[0].clone();
        huge.status = OrderStatus::Delivered;
        huge.total = Decimal::MAX;
        let orders = vec![huge.clone(), huge];

        assert_eq!(revenue(&orders), Decimal::MAX);
    }

    #[test]
    fn test_empty_snapshot_shows_fallback_charts() {
        let dashboard = Dashboard::compose(&[], &[], &[], &ShowroomConfig::default());
        assert_eq!(dashboard.card("Revenue"), Some("$0.00"));
        assert_eq!(dashboard.category_chart, fallback_categories());
        assert_eq!(dashboard.status_chart, fallback_statuses());
        assert_eq!(dashboard.monthly_sales, demo_monthly_sales());
    }

    #[test]
    fn test_text_rendering_lists_cards_and_months() {
        let seed = showroom_seed();
        let text = Dashboard::compose(&seed.orders, &seed.cars, &seed.users, &ShowroomConfig::default()).to_string();
        assert!(text.contains("Revenue"));
        assert!(text.contains("$269,500.00"));
        assert!(text.contains("Orders by Status"));
        assert!(text.contains("Dec"));
    }
}
