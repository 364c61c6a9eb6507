//! Persisted records: catalog cars, pending requests and active rentals

pub mod macros;

pub mod car;
pub mod rental;
pub mod request;

pub use car::{Car, CarPatch, NewCar};
pub use rental::{ActiveRental, NewRental};
pub use request::{RentalRequest, RequestKey, RequestSubmission};
