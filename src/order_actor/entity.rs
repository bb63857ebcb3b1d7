use chrono::Utc;
use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderPatch, OrderStatus, Tracking, TrackingStage};
use super::actions::{OrderAction, OrderActionResult};

impl Entity for Order {
    type Id = String;
    type CreatePayload = OrderCreate;
    type Patch = OrderPatch;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;

    fn id(&self) -> &String { &self.id }

    /// Creates a pending order with a tracking number derived from its id.
    ///
    /// # Errors
    /// Rejects orders without items, with a zero-quantity item, or whose total
    /// overflows.
    fn from_create(id: String, payload: OrderCreate) -> Result<Self, String> {
        if payload.items.is_empty() {
            return Err("Order has no items".to_string());
        }
        if let Some(item) = payload.items.iter().find(|item| item.quantity == 0) {
            return Err(format!("Zero quantity for product {}", item.product_id));
        }
        let total = Order::total_from_items(&payload.items).ok_or_else(|| "Order total overflows".to_string())?;

        let tracking = Tracking {
            tracking_number: Order::tracking_number_for(&id),
            estimated_delivery: None,
            history: vec![TrackingStage {
                status: OrderStatus::Pending,
                at: payload.created_at,
                note: Some("Order placed".to_string()),
            }],
        };

        Ok(Self {
            total,
            id,
            user_id: payload.user_id,
            status: OrderStatus::Pending,
            created_at: payload.created_at,
            items: payload.items,
            customer: payload.customer,
            tracking,
        })
    }

    /// Applies an admin edit to status and/or estimated delivery.
    ///
    /// A status change is also appended to the tracking history. Cancelling
    /// goes through [`OrderAction::Cancel`] so the reserved stock is returned.
    fn on_update(&mut self, patch: OrderPatch) -> Result<(), String> {
        if let Some(status) = patch.status {
            if status == OrderStatus::Cancelled && self.status != OrderStatus::Cancelled {
                return Err("Use Cancel to cancel an order".to_string());
            }
            if status != self.status {
                if self.status.is_terminal() {
                    return Err(format!("Order {} is {} and can no longer change status", self.id, self.status));
                }
                self.status = status;
                self.tracking.history.push(TrackingStage {
                    status,
                    at: Utc::now(),
                    note: Some("Updated by admin".to_string()),
                });
            }
        }
        if let Some(date) = patch.estimated_delivery {
            self.tracking.estimated_delivery = Some(date);
        }
        Ok(())
    }

    fn on_delete(&self) -> Result<(), String> {
        if matches!(self.status, OrderStatus::Processing | OrderStatus::InTransit | OrderStatus::Shipped) {
            return Err(format!("Order {} is {}; cancel it before deleting", self.id, self.status));
        }
        Ok(())
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<OrderActionResult, String> {
        match action {
            OrderAction::RecordStage { status, note, at } => {
                if status == OrderStatus::Cancelled {
                    return Err("Use Cancel to cancel an order".to_string());
                }
                if self.status.is_terminal() {
                    return Err(format!("Order {} is already {}", self.id, self.status));
                }
                self.status = status;
                self.tracking.history.push(TrackingStage { status, at, note });
                Ok(OrderActionResult::StageRecorded(self.tracking.history.len()))
            }
            OrderAction::Cancel { at } => {
                if self.status.is_terminal() {
                    return Err(format!("Order {} is already {}", self.id, self.status));
                }
                self.status = OrderStatus::Cancelled;
                self.tracking.history.push(TrackingStage {
                    status: OrderStatus::Cancelled,
                    at,
                    note: None,
                });
                Ok(OrderActionResult::Cancelled(self.items.clone()))
            }
        }
    }
}
