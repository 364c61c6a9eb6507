//! Catalog CRUD

use super::not_found;
use crate::core::DataService;
use crate::core::error::{RentalResult, StorageResultExt};
use crate::entities::{Car, CarPatch, NewCar};
use std::sync::Arc;
use uuid::Uuid;

/// Result of a catalog update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Updated(Car),
    /// The patch matched the stored values; nothing was written
    NoChanges(Car),
}

/// Plain field-level persistence of cars
#[derive(Clone)]
pub struct CatalogService {
    cars: Arc<dyn DataService<Car>>,
}

impl CatalogService {
    pub fn new(cars: Arc<dyn DataService<Car>>) -> Self {
        Self { cars }
    }

    pub async fn list(&self) -> RentalResult<Vec<Car>> {
        self.cars.list().await.storage("list cars")
    }

    pub async fn get(&self, id: &Uuid) -> RentalResult<Car> {
        self.cars
            .get(id)
            .await
            .storage("get car")?
            .ok_or_else(|| not_found("car", id).into())
    }

    /// Add a car; new cars are never rented out
    pub async fn create(&self, input: NewCar) -> RentalResult<Car> {
        let car = self.cars.create(Car::new(input)).await.storage("create car")?;
        tracing::info!(car_id = %car.id, model = %car.model, "Car created");
        Ok(car)
    }

    /// Apply the allow-listed fields of `patch`
    pub async fn update(&self, id: &Uuid, patch: CarPatch) -> RentalResult<UpdateOutcome> {
        let mut car = self.get(id).await?;

        if !patch.apply(&mut car) {
            return Ok(UpdateOutcome::NoChanges(car));
        }

        let car = self.cars.update(id, car).await.storage("update car")?;
        tracing::info!(car_id = %id, rented_out = car.rented_out, "Car updated");
        Ok(UpdateOutcome::Updated(car))
    }

    /// Remove a car, returning whether it existed
    ///
    /// Requests and rentals pointing at the car are left alone.
    pub async fn delete(&self, id: &Uuid) -> RentalResult<bool> {
        let deleted = self.cars.delete(id).await.storage("delete car")?;
        if deleted {
            tracing::info!(car_id = %id, "Car deleted");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RentalError;
    use crate::core::error::EntityError;
    use crate::storage::InMemoryDataService;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(InMemoryDataService::<Car>::new()))
    }

    fn new_car(model: &str) -> NewCar {
        NewCar {
            model: model.to_string(),
            specs: vec!["Diesel".to_string()],
            daily_rate: 50.0,
            photo_url: "https://img.example/car.jpg".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_starts_available() {
        let catalog = service();
        let car = catalog.create(new_car("Clio")).await.unwrap();
        assert!(!car.rented_out);
        assert_eq!(catalog.get(&car.id).await.unwrap(), car);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let err = service().get(&Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, RentalError::Entity(EntityError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_outcomes() {
        let catalog = service();
        let car = catalog.create(new_car("Clio")).await.unwrap();

        let outcome = catalog
            .update(&car.id, CarPatch::rented_out(true))
            .await
            .unwrap();
        assert!(matches!(outcome, UpdateOutcome::Updated(ref c) if c.rented_out));

        let outcome = catalog
            .update(&car.id, CarPatch::rented_out(true))
            .await
            .unwrap();
        assert!(matches!(outcome, UpdateOutcome::NoChanges(_)));

        let err = catalog
            .update(&Uuid::new_v4(), CarPatch::rented_out(true))
            .await
            .unwrap_err();
        assert!(matches!(err, RentalError::Entity(EntityError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete() {
        let catalog = service();
        let car = catalog.create(new_car("Clio")).await.unwrap();

        assert!(catalog.delete(&car.id).await.unwrap());
        assert!(!catalog.delete(&car.id).await.unwrap());
        assert!(catalog.list().await.unwrap().is_empty());
    }
}
