use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Body style a car is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CarCategory {
    Sedan,
    #[serde(rename = "SUV")]
    Suv,
    Truck,
    Coupe,
    Convertible,
}

impl CarCategory {
    pub const ALL: [CarCategory; 5] = [
        CarCategory::Sedan,
        CarCategory::Suv,
        CarCategory::Truck,
        CarCategory::Coupe,
        CarCategory::Convertible,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CarCategory::Sedan => "Sedan",
            CarCategory::Suv => "SUV",
            CarCategory::Truck => "Truck",
            CarCategory::Coupe => "Coupe",
            CarCategory::Convertible => "Convertible",
        }
    }

    /// Case-insensitive lookup of a category name. Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|c| c.as_str().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for CarCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A car listed for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub category: CarCategory,
    pub price: Decimal,
    pub stock: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Payload for listing a new car.
#[derive(Debug, Clone)]
pub struct CarCreate {
    pub name: String,
    pub brand: String,
    pub category: CarCategory,
    pub price: Decimal,
    pub stock: u32,
    pub description: String,
    pub image: Option<String>,
}

/// Admin edits to a listing. Name, brand and category are fixed once listed.
#[derive(Debug, Clone, Default)]
pub struct CarPatch {
    pub price: Option<Decimal>,
    pub stock: Option<u32>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl Car {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        brand: impl Into<String>,
        category: CarCategory,
        price: Decimal,
        stock: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: brand.into(),
            category,
            price,
            stock,
            description: String::new(),
            image: None,
        }
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
