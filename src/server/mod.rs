//! HTTP server assembly
//!
//! - [`ServerBuilder`]: fluent configuration and graceful serving
//! - [`ServerHost`]: configuration, stores and clock wired into services
//! - [`router`]: the REST route table

pub mod builder;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use host::ServerHost;
pub use router::build_router;
