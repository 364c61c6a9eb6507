//! Input validation shared by the HTTP layer and any Rust client
//!
//! - [`range`]: the booking date rules (format, lead time, maximum span)
//! - [`fields`]: presence rules declared with `validator` derives
//! - [`extractor`]: axum JSON extractor reporting errors in the crate format

pub mod extractor;
pub mod fields;
pub mod range;

pub use extractor::{ApiJson, ApiQuery};
pub use range::{BookingPolicy, BookingRange, DateRangeError, parse_range, validate_range};
