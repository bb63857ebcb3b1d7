use tracing::{debug, instrument};
use crate::domain::{Car, CarCategory, CarCreate, CarPatch};
use crate::car_actor::{CarAction, CarActionResult, CarError};
use crate::actor_framework::ResourceClient;

/// Client for interacting with the Car store.
#[derive(Clone)]
pub struct CarClient {
    inner: ResourceClient<Car>,
}

impl_basic_client!(CarClient, Car, CarError, car);

fn unexpected(result: CarActionResult) -> CarError {
    CarError::ActorCommunicationError(format!("Unexpected result: {:?}", result))
}

impl CarClient {
    #[instrument(skip(self), fields(car_name = %payload.name))]
    pub async fn create_car(&self, payload: CarCreate) -> Result<String, CarError> {
        debug!("Sending request");
        self.inner.create(payload).await.map_err(CarError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_car(&self, id: String, patch: CarPatch) -> Result<Car, CarError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(CarError::from)
    }

    /// Listings in one category, cheapest first.
    #[instrument(skip(self))]
    pub async fn cars_by_category(&self, category: CarCategory) -> Result<Vec<Car>, CarError> {
        let mut cars: Vec<Car> = self
            .list_cars()
            .await?
            .into_iter()
            .filter(|car| car.category == category)
            .collect();
        cars.sort_by(|a, b| a.price.cmp(&b.price).then_with(|| a.id.cmp(&b.id)));
        Ok(cars)
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: String) -> Result<u32, CarError> {
        debug!("Sending request");
        match self.inner.perform_action(id, CarAction::CheckStock).await? {
            CarActionResult::StockLevel(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: String, quantity: u32) -> Result<(), CarError> {
        debug!("Sending request");
        match self.inner.perform_action(id, CarAction::ReserveStock(quantity)).await? {
            CarActionResult::Reserved => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Returns stock to the lot, yielding the new level.
    #[instrument(skip(self))]
    pub async fn release_stock(&self, id: String, quantity: u32) -> Result<u32, CarError> {
        debug!("Sending request");
        match self.inner.perform_action(id, CarAction::ReleaseStock(quantity)).await? {
            CarActionResult::Released(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }
}
