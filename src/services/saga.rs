//! Accept sequence with compensation
//!
//! Accepting a request touches three collections with no shared
//! transaction. Each completed step pushes its undo action; when a later step
//! fails the undo stack is replayed in reverse before the error is returned.

use super::not_found;
use crate::core::error::{AcceptStep, BookingError, RentalError, RentalResult};
use crate::entities::{ActiveRental, Car, RentalRequest};
use crate::storage::Stores;
use chrono::{DateTime, Utc};

enum Undo {
    RestoreRequest(RentalRequest),
    RestoreCar(Car),
}

pub(crate) struct AcceptSaga<'a> {
    stores: &'a Stores,
    undo: Vec<Undo>,
}

impl<'a> AcceptSaga<'a> {
    pub(crate) fn new(stores: &'a Stores) -> Self {
        Self {
            stores,
            undo: Vec::new(),
        }
    }

    /// Delete the request, flag the car, record the rental
    pub(crate) async fn run(
        mut self,
        request: RentalRequest,
        car: Car,
        now: DateTime<Utc>,
    ) -> RentalResult<ActiveRental> {
        match self.stores.requests.delete(&request.id).await {
            Ok(true) => self.undo.push(Undo::RestoreRequest(request.clone())),
            // Consumed by a concurrent accept or reject
            Ok(false) => return Err(not_found("request", request.id).into()),
            Err(e) => return Err(self.fail(AcceptStep::DeleteRequest, e).await),
        }

        let mut flagged = car.clone();
        flagged.rented_out = true;
        if let Err(e) = self.stores.cars.update(&car.id, flagged).await {
            return Err(self.fail(AcceptStep::FlagCar, e).await);
        }
        self.undo.push(Undo::RestoreCar(car.clone()));

        let rental = ActiveRental::from_accepted(&request, &car, now);
        match self.stores.rentals.create(rental).await {
            Ok(rental) => Ok(rental),
            Err(e) => Err(self.fail(AcceptStep::RecordRental, e).await),
        }
    }

    async fn fail(&mut self, step: AcceptStep, cause: anyhow::Error) -> RentalError {
        tracing::error!(step = %step, error = %cause, "Accept step failed, rolling back");
        let rolled_back = self.compensate().await;

        BookingError::AcceptFailed {
            step,
            message: format!("{:#}", cause),
            rolled_back,
        }
        .into()
    }

    async fn compensate(&mut self) -> bool {
        let mut clean = true;

        while let Some(undo) = self.undo.pop() {
            let result = match undo {
                Undo::RestoreRequest(request) => {
                    let id = request.id;
                    self.stores
                        .requests
                        .create(request)
                        .await
                        .map(|_| ())
                        .map_err(|e| (format!("request {}", id), e))
                }
                Undo::RestoreCar(car) => {
                    let id = car.id;
                    self.stores
                        .cars
                        .update(&id, car)
                        .await
                        .map(|_| ())
                        .map_err(|e| (format!("car {}", id), e))
                }
            };

            if let Err((target, e)) = result {
                tracing::error!(target_record = %target, error = %e, "Compensation failed");
                clean = false;
            }
        }

        clean
    }
}
