//! Seed data the stores start with until a real backend is wired in.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::domain::{
    Car, CarCategory, CustomerContact, LineItem, Order, OrderStatus, Tracking, TrackingStage, User,
};

/// Everything the stores are started with.
#[derive(Debug, Clone, Default)]
pub struct Seed {
    pub users: Vec<User>,
    pub cars: Vec<Car>,
    pub orders: Vec<Order>,
}

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 10, 0, 0).single().unwrap_or_default()
}

fn car(id: &str, name: &str, brand: &str, category: CarCategory, price: i64, stock: u32) -> Car {
    let mut car = Car::new(id, name, brand, category, Decimal::from(price), stock);
    car.description = format!("{} {} {}", brand, name, category);
    car.image = Some(format!("/images/{}.jpg", id));
    car
}

fn order(id: &str, user: &User, car: &Car, quantity: u32, status: OrderStatus, created_at: DateTime<Utc>) -> Order {
    let items = vec![LineItem::new(car.id.clone(), Some(car.category), quantity, car.price)];

    let mut history = vec![TrackingStage {
        status: OrderStatus::Pending,
        at: created_at,
        note: Some("Order placed".to_string()),
    }];
    if status != OrderStatus::Pending {
        history.push(TrackingStage {
            status,
            at: created_at + Duration::days(3),
            note: None,
        });
    }
    let estimated_delivery = (!status.is_terminal()).then(|| (created_at + Duration::days(14)).date_naive());

    Order {
        id: id.to_string(),
        user_id: user.id.clone(),
        status,
        total: Order::total_from_items(&items).unwrap_or_default(),
        created_at,
        items,
        customer: CustomerContact {
            name: user.name.clone(),
            email: user.email.clone(),
            phone: None,
            address: Some("100 Main St".to_string()),
        },
        tracking: Tracking {
            tracking_number: Order::tracking_number_for(id),
            estimated_delivery,
            history,
        },
    }
}

/// The showroom's fixed catalogue, accounts and order history.
pub fn showroom_seed() -> Seed {
    let users = vec![
        User::new("user_1", "Morgan Lee", "admin@showroom.test").admin(),
        User::new("user_2", "Sam Rivera", "sam@example.com"),
        User::new("user_3", "Alex Chen", "alex@example.com"),
    ];

    let cars = vec![
        car("car_1", "Camry", "Toyota", CarCategory::Sedan, 28000, 5),
        car("car_2", "Accord", "Honda", CarCategory::Sedan, 29500, 3),
        car("car_3", "RAV4", "Toyota", CarCategory::Suv, 32000, 4),
        car("car_4", "Explorer", "Ford", CarCategory::Suv, 41000, 2),
        car("car_5", "F-150", "Ford", CarCategory::Truck, 45000, 6),
        car("car_6", "Mustang", "Ford", CarCategory::Coupe, 38000, 1),
        car("car_7", "MX-5 Miata", "Mazda", CarCategory::Convertible, 30000, 0),
    ];

    let (sam, alex) = (&users[1], &users[2]);
    let orders = vec![
        order("order_1", sam, &cars[0], 1, OrderStatus::Delivered, day(2024, 1, 15)),
        order("order_2", alex, &cars[2], 1, OrderStatus::Delivered, day(2024, 2, 20)),
        order("order_3", sam, &cars[4], 1, OrderStatus::Shipped, day(2024, 3, 8)),
        order("order_4", alex, &cars[5], 1, OrderStatus::InTransit, day(2024, 4, 12)),
        order("order_5", sam, &cars[1], 1, OrderStatus::Processing, day(2024, 5, 3)),
        order("order_6", alex, &cars[3], 1, OrderStatus::Pending, day(2024, 6, 21)),
        order("order_7", sam, &cars[6], 1, OrderStatus::Cancelled, day(2024, 6, 25)),
        order("order_8", alex, &cars[0], 2, OrderStatus::Pending, day(2024, 7, 30)),
    ];

    Seed { users, cars, orders }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_orders_reference_seed_users_and_cars() {
        let seed = showroom_seed();
        for order in &seed.orders {
            assert!(seed.users.iter().any(|u| u.id == order.user_id));
            for item in &order.items {
                assert!(seed.cars.iter().any(|c| c.id == item.product_id));
            }
            assert_eq!(Some(order.total), Order::total_from_items(&order.items));
        }
    }
}
