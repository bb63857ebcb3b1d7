use rust_decimal::Decimal;
use crate::actor_framework::Entity;
use crate::domain::{Car, CarCreate, CarPatch};
use super::actions::{CarAction, CarActionResult};

fn check_price(price: Decimal) -> Result<(), String> {
    if price <= Decimal::ZERO {
        return Err(format!("Price must be positive, got {}", price));
    }
    Ok(())
}

impl Entity for Car {
    type Id = String;
    type CreatePayload = CarCreate;
    type Patch = CarPatch;
    type Action = CarAction;
    type ActionResult = CarActionResult;

    fn id(&self) -> &String { &self.id }

    fn from_create(id: String, payload: CarCreate) -> Result<Self, String> {
        if payload.name.trim().is_empty() {
            return Err("Car name required".to_string());
        }
        check_price(payload.price)?;
        Ok(Self {
            id,
            name: payload.name,
            brand: payload.brand,
            category: payload.category,
            price: payload.price,
            stock: payload.stock,
            description: payload.description,
            image: payload.image,
        })
    }

    /// Updates price, stock, description and/or image.
    fn on_update(&mut self, patch: CarPatch) -> Result<(), String> {
        if let Some(price) = patch.price {
            check_price(price)?;
            self.price = price;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(image) = patch.image {
            self.image = Some(image);
        }
        Ok(())
    }

    fn handle_action(&mut self, action: CarAction) -> Result<CarActionResult, String> {
        match action {
            CarAction::CheckStock => Ok(CarActionResult::StockLevel(self.stock)),
            CarAction::ReserveStock(amount) => {
                if self.stock >= amount {
                    self.stock -= amount;
                    Ok(CarActionResult::Reserved)
                } else {
                    Err(format!("Insufficient stock: {} available, {} requested", self.stock, amount))
                }
            }
            CarAction::ReleaseStock(amount) => {
                self.stock = self.stock.saturating_add(amount);
                Ok(CarActionResult::Released(self.stock))
            }
        }
    }
}
