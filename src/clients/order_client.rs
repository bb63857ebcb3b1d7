use chrono::Utc;
use tracing::{debug, error, info, instrument, warn};
use crate::domain::{CustomerContact, LineItem, Order, OrderCreate, OrderPatch, OrderStatus};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use crate::actor_framework::ResourceClient;
use crate::clients::{CarClient, UserClient};

/// One car and how many of it, as submitted at checkout.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub car_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone)]
pub struct Checkout {
    pub user_id: String,
    pub items: Vec<CartLine>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Client for interacting with the Order store.
///
/// Checkout and cancellation are orchestrated here: the user and every car are
/// validated and stock is reserved before the order is stored, and stock is
/// released again when an order is cancelled.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    user_client: UserClient,
    car_client: CarClient,
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        user_client: UserClient,
        car_client: CarClient,
    ) -> Self {
        Self {
            inner,
            user_client,
            car_client,
        }
    }

    #[instrument(skip(self, checkout), fields(user_id = %checkout.user_id, lines = checkout.items.len()))]
    pub async fn place_order(&self, checkout: Checkout) -> Result<String, OrderError> {
        info!("Processing checkout");

        if checkout.items.is_empty() {
            return Err(OrderError::ValidationError("Cart is empty".to_string()));
        }

        // Step 1: Validate user
        let customer = match self.user_client.get_user(checkout.user_id.clone()).await {
            Ok(Some(user)) => {
                info!(user_name = %user.name, "User validation successful");
                CustomerContact {
                    name: user.name,
                    email: user.email,
                    phone: checkout.phone,
                    address: checkout.address,
                }
            }
            Ok(None) => {
                error!("User not found");
                return Err(OrderError::InvalidUser(checkout.user_id));
            }
            Err(e) => {
                error!(error = %e, "User validation failed");
                return Err(OrderError::InvalidUser(format!("User validation failed: {}", e)));
            }
        };

        // Step 2: Validate each car and reserve its stock
        let mut items = Vec::with_capacity(checkout.items.len());
        let mut reserved: Vec<(String, u32)> = Vec::new();
        for line in &checkout.items {
            let car = match self.car_client.get_car(line.car_id.clone()).await {
                Ok(Some(car)) => car,
                Ok(None) => {
                    error!(car_id = %line.car_id, "Car not found");
                    self.release_all(&reserved).await;
                    return Err(OrderError::InvalidProduct(line.car_id.clone()));
                }
                Err(e) => {
                    error!(error = %e, "Car validation failed");
                    self.release_all(&reserved).await;
                    return Err(OrderError::InvalidProduct(format!("Car validation failed: {}", e)));
                }
            };

            if let Err(e) = self.car_client.reserve_stock(car.id.clone(), line.quantity).await {
                error!(error = %e, car_id = %car.id, "Stock reservation failed");
                self.release_all(&reserved).await;
                return Err(OrderError::InsufficientStock(format!("Stock reservation failed: {}", e)));
            }
            reserved.push((car.id.clone(), line.quantity));
            items.push(LineItem::new(car.id, Some(car.category), line.quantity, car.price));
        }

        info!("Stock reserved successfully");

        // Step 3: Store the order
        let payload = OrderCreate {
            user_id: checkout.user_id,
            items,
            customer,
            created_at: Utc::now(),
        };

        match self.inner.create(payload).await {
            Ok(id) => {
                info!(order_id = %id, "Order placed");
                Ok(id)
            }
            Err(e) => {
                self.release_all(&reserved).await;
                Err(e.into())
            }
        }
    }

    async fn release_all(&self, reserved: &[(String, u32)]) {
        for (car_id, quantity) in reserved {
            if let Err(e) = self.car_client.release_stock(car_id.clone(), *quantity).await {
                warn!(error = %e, car_id = %car_id, "Could not release reserved stock");
            }
        }
    }

    /// Admin edit of status and/or estimated delivery.
    #[instrument(skip(self))]
    pub async fn update_order(&self, id: String, patch: OrderPatch) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(OrderError::from)
    }

    /// Orders in a given status, oldest first.
    #[instrument(skip(self))]
    pub async fn orders_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError> {
        let mut orders: Vec<Order> = self
            .list_orders()
            .await?
            .into_iter()
            .filter(|order| order.status == status)
            .collect();
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(orders)
    }

    /// Looks an order up by tracking number, ignoring case.
    #[instrument(skip(self))]
    pub async fn track_order(&self, tracking_number: String) -> Result<Option<Order>, OrderError> {
        let wanted = tracking_number.trim();
        Ok(self
            .list_orders()
            .await?
            .into_iter()
            .find(|order| order.tracking.tracking_number.eq_ignore_ascii_case(wanted)))
    }

    /// Appends a tracking stage, returning the new history length.
    #[instrument(skip(self))]
    pub async fn record_stage(
        &self,
        id: String,
        status: OrderStatus,
        note: Option<String>,
    ) -> Result<usize, OrderError> {
        debug!("Sending request");
        let action = OrderAction::RecordStage { status, note, at: Utc::now() };
        match self.inner.perform_action(id, action).await? {
            OrderActionResult::StageRecorded(len) => Ok(len),
            other => Err(OrderError::ActorCommunicationError(format!("Unexpected result: {:?}", other))),
        }
    }

    /// Cancels an order and returns its cars to stock.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: String) -> Result<(), OrderError> {
        info!("Cancelling order");
        let items = match self.inner.perform_action(id, OrderAction::Cancel { at: Utc::now() }).await? {
            OrderActionResult::Cancelled(items) => items,
            other => {
                return Err(OrderError::ActorCommunicationError(format!("Unexpected result: {:?}", other)))
            }
        };
        let reserved: Vec<(String, u32)> = items
            .into_iter()
            .map(|item| (item.product_id, item.quantity))
            .collect();
        self.release_all(&reserved).await;
        info!("Order cancelled");
        Ok(())
    }
}

impl_client_methods!(OrderClient, Order, OrderError, order);
