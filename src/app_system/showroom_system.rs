use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{error, info, instrument};
use crate::actor_framework::ResourceActor;
use crate::clients::{CarClient, OrderClient, UserClient};
use crate::config::ShowroomConfig;
use crate::dashboard::Dashboard;
use crate::domain::{Car, Order, User};
use super::fixtures::{showroom_seed, Seed};

/// Generates `prefix_N` ids, continuing after the seeded items.
fn id_sequence(prefix: &'static str, seeded: usize) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = AtomicU64::new(seeded as u64 + 1);
    move || format!("{}_{}", prefix, counter.fetch_add(1, Ordering::SeqCst))
}

/// The running showroom: one store actor per record type, wired together.
///
/// Responsible for starting up the stores, seeding them, and shutting them down.
pub struct ShowroomSystem {
    pub order_client: OrderClient,
    pub user_client: UserClient,
    pub car_client: CarClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ShowroomSystem {
    /// Starts the stores with the showroom's fixture data.
    pub fn new(buffer_size: usize) -> Self {
        Self::with_seed(buffer_size, showroom_seed())
    }

    pub fn with_seed(buffer_size: usize, seed: Seed) -> Self {
        info!(
            users = seed.users.len(),
            cars = seed.cars.len(),
            orders = seed.orders.len(),
            "Starting showroom system"
        );

        // 1. Users
        let next_user_id = id_sequence("user", seed.users.len());
        let (user_actor, user_resource_client) = ResourceActor::<User>::with_seed(buffer_size, next_user_id, seed.users);
        let user_client = UserClient::new(user_resource_client);
        let user_handle = tokio::spawn(user_actor.run());

        // 2. Cars
        let next_car_id = id_sequence("car", seed.cars.len());
        let (car_actor, car_resource_client) = ResourceActor::<Car>::with_seed(buffer_size, next_car_id, seed.cars);
        let car_client = CarClient::new(car_resource_client);
        let car_handle = tokio::spawn(car_actor.run());

        // 3. Orders, which orchestrate the other two
        let next_order_id = id_sequence("order", seed.orders.len());
        let (order_actor, order_resource_client) = ResourceActor::<Order>::with_seed(buffer_size, next_order_id, seed.orders);
        let order_client = OrderClient::new(order_resource_client, user_client.clone(), car_client.clone());
        let order_handle = tokio::spawn(order_actor.run());

        Self {
            order_client,
            user_client,
            car_client,
            handles: vec![user_handle, car_handle, order_handle],
        }
    }

    /// Fetches every store and composes the admin dashboard from the snapshot.
    #[instrument(skip_all)]
    pub async fn dashboard(&self, config: &ShowroomConfig) -> anyhow::Result<Dashboard> {
        let (orders, cars, users) = tokio::try_join!(
            async { self.order_client.list_orders().await.map_err(anyhow::Error::from) },
            async { self.car_client.list_cars().await.map_err(anyhow::Error::from) },
            async { self.user_client.list_users().await.map_err(anyhow::Error::from) },
        )?;
        info!(orders = orders.len(), cars = cars.len(), users = users.len(), "Composing dashboard");
        Ok(Dashboard::compose(&orders, &cars, &users, config))
    }

    pub async fn shutdown(self) -> anyhow::Result<()> {
        info!("Shutting down system...");
        // Stores stop once every client for them is dropped.
        drop(self.order_client);
        drop(self.user_client);
        drop(self.car_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                anyhow::bail!("Store task failed: {:?}", e);
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
