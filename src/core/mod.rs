//! Core module containing fundamental traits and types of the service

pub mod clock;
pub mod date;
pub mod entity;
pub mod error;
pub mod service;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use date::DateStamp;
pub use entity::Entity;
pub use error::{RentalError, RentalResult};
pub use service::DataService;
