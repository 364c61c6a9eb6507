//! Booking lifecycle: submit → accept → return, plus reject

use super::saga::AcceptSaga;
use super::{not_found, parse_id};
use crate::config::{BookingConfig, ReturnPolicy};
use crate::core::Clock;
use crate::core::error::{BookingError, RentalResult, StorageResultExt};
use crate::core::validation::{BookingRange, fields, parse_range};
use crate::entities::{
    ActiveRental, Car, NewRental, RentalRequest, RequestKey, RequestSubmission,
};
use crate::storage::Stores;
use std::sync::Arc;
use uuid::Uuid;

/// Drives requests through their lifecycle
#[derive(Clone)]
pub struct BookingService {
    stores: Stores,
    clock: Arc<dyn Clock>,
    config: BookingConfig,
}

impl BookingService {
    pub fn new(stores: Stores, clock: Arc<dyn Clock>, config: BookingConfig) -> Self {
        Self {
            stores,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &BookingConfig {
        &self.config
    }

    /// Validate and store a new rental request
    ///
    /// Date rules run before any other check, so a body without dates is
    /// always `MISSING_FIELD`. Customer name and phone may be empty.
    pub async fn submit(&self, submission: RequestSubmission) -> RentalResult<RentalRequest> {
        let range = self
            .config
            .policy()
            .validate(&submission.from_date, &submission.to_date, self.clock.today())
            .inspect_err(|e| {
                tracing::warn!(
                    reason = e.error_code(),
                    from = %submission.from_date,
                    to = %submission.to_date,
                    "Rejected request dates"
                )
            })?;

        fields::check(&submission)?;
        let car_id = parse_id("car", &submission.car_id)?;
        let car = self.car(&car_id).await?;

        if self.config.reject_overlaps {
            self.ensure_free(&car, &range).await?;
        }

        let request = RentalRequest {
            id: Uuid::new_v4(),
            car_id,
            customer_name: submission.customer_name,
            customer_phone: submission.customer_phone,
            from_date: range.from,
            to_date: range.to,
            requested_at: self.clock.now(),
        };

        let request = self
            .stores
            .requests
            .create(request)
            .await
            .storage("create request")?;

        tracing::info!(
            request_id = %request.id,
            car_id = %request.car_id,
            from = %request.from_date,
            to = %request.to_date,
            "Rental request submitted"
        );
        Ok(request)
    }

    pub async fn list_requests(&self) -> RentalResult<Vec<RentalRequest>> {
        self.stores.requests.list().await.storage("list requests")
    }

    /// Drop a pending request
    pub async fn reject(&self, request_id: &Uuid) -> RentalResult<()> {
        let deleted = self
            .stores
            .requests
            .delete(request_id)
            .await
            .storage("delete request")?;

        if !deleted {
            return Err(not_found("request", request_id).into());
        }

        tracing::info!(request_id = %request_id, "Rental request rejected");
        Ok(())
    }

    /// Drop the first pending request matching car and customer
    pub async fn reject_by_key(&self, key: RequestKey) -> RentalResult<()> {
        fields::check(&key)?;
        let car_id = parse_id("car", &key.car_id)?;

        let matches = self
            .stores
            .requests
            .find_by(&[
                ("carId", car_id.to_string()),
                ("customerName", key.customer_name.clone()),
                ("customerPhone", key.customer_phone.clone()),
            ])
            .await
            .storage("find request")?;

        let Some(request) = matches.into_iter().next() else {
            return Err(not_found(
                "request",
                format!("{}/{}/{}", car_id, key.customer_name, key.customer_phone),
            )
            .into());
        };

        self.reject(&request.id).await
    }

    /// Turn a pending request into an active rental
    ///
    /// Fails with 404 when the request or its car is gone and with 409 when
    /// the car is already out. Nothing is written in either case.
    pub async fn accept(&self, request_id: &Uuid) -> RentalResult<ActiveRental> {
        let request = self
            .stores
            .requests
            .get(request_id)
            .await
            .storage("get request")?
            .ok_or_else(|| not_found("request", request_id))?;

        let car = self.car(&request.car_id).await?;
        if car.rented_out {
            return Err(BookingError::AlreadyRentedOut {
                car_id: car.id.to_string(),
            }
            .into());
        }

        let rental = AcceptSaga::new(&self.stores)
            .run(request, car, self.clock.now())
            .await?;

        tracing::info!(
            request_id = %request_id,
            rental_id = %rental.id,
            car_id = %rental.car_id,
            "Rental request accepted"
        );
        Ok(rental)
    }

    /// Take a car back and close its active rentals
    pub async fn return_car(&self, car_id: &Uuid) -> RentalResult<Car> {
        let mut car = self.car(car_id).await?;

        if car.rented_out {
            car.rented_out = false;
            car = self
                .stores
                .cars
                .update(car_id, car)
                .await
                .storage("update car")?;
        }

        let now = self.clock.now();
        for mut rental in self.active_rentals_for(car_id).await? {
            match self.config.return_policy {
                ReturnPolicy::Retain => {
                    let id = rental.id;
                    rental.returned_at = Some(now);
                    self.stores
                        .rentals
                        .update(&id, rental)
                        .await
                        .storage("close rental")?;
                }
                ReturnPolicy::Delete => {
                    self.stores
                        .rentals
                        .delete(&rental.id)
                        .await
                        .storage("delete rental")?;
                }
            }
        }

        tracing::info!(car_id = %car_id, policy = ?self.config.return_policy, "Car returned");
        Ok(car)
    }

    /// Insert a rental record directly
    ///
    /// Only presence and date format are checked; the car is not flagged.
    pub async fn record_rental(&self, input: NewRental) -> RentalResult<ActiveRental> {
        fields::check(&input)?;
        let (from_date, to_date) = parse_range(&input.from_date, &input.to_date)?;
        let car_id = parse_id("car", &input.car_id)?;

        let rental = ActiveRental {
            id: Uuid::new_v4(),
            car_id,
            car_model: input.car_model,
            car_photo_url: input.car_photo,
            from_date,
            to_date,
            customer_name: input.customer_name,
            created_at: self.clock.now(),
            returned_at: None,
        };

        let rental = self
            .stores
            .rentals
            .create(rental)
            .await
            .storage("create rental")?;

        tracing::info!(rental_id = %rental.id, car_id = %car_id, "Rental recorded");
        Ok(rental)
    }

    /// Rentals, optionally including returned ones
    pub async fn list_rentals(&self, include_returned: bool) -> RentalResult<Vec<ActiveRental>> {
        let rentals = self.stores.rentals.list().await.storage("list rentals")?;
        Ok(rentals
            .into_iter()
            .filter(|r| include_returned || r.is_active())
            .collect())
    }

    async fn car(&self, id: &Uuid) -> RentalResult<Car> {
        self.stores
            .cars
            .get(id)
            .await
            .storage("get car")?
            .ok_or_else(|| not_found("car", id).into())
    }

    async fn active_rentals_for(&self, car_id: &Uuid) -> RentalResult<Vec<ActiveRental>> {
        let rentals = self
            .stores
            .rentals
            .find_by(&[("carId", car_id.to_string())])
            .await
            .storage("find rentals")?;
        Ok(rentals.into_iter().filter(ActiveRental::is_active).collect())
    }

    async fn ensure_free(&self, car: &Car, range: &BookingRange) -> RentalResult<()> {
        let pending = self
            .stores
            .requests
            .find_by(&[("carId", car.id.to_string())])
            .await
            .storage("find requests")?;

        let clashes = pending.iter().any(|r| r.range().overlaps(range))
            || self
                .active_rentals_for(&car.id)
                .await?
                .iter()
                .any(|r| r.range().overlaps(range));

        if clashes {
            tracing::warn!(car_id = %car.id, from = %range.from, to = %range.to, "Overlapping booking");
            return Err(BookingError::Overlapping {
                car_id: car.id.to_string(),
            }
            .into());
        }
        Ok(())
    }
}
