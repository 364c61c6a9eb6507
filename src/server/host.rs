//! Server host holding the assembled application state
//!
//! The host owns configuration, stores and clock, and wires them into the
//! services the handlers use.

use crate::config::AppConfig;
use crate::core::Clock;
use crate::handlers::AppState;
use crate::services::{BookingService, CatalogService};
use crate::storage::Stores;
use std::sync::Arc;

/// Everything a running server needs
pub struct ServerHost {
    pub config: Arc<AppConfig>,
    pub stores: Stores,
    pub clock: Arc<dyn Clock>,
}

impl ServerHost {
    pub fn new(config: AppConfig, stores: Stores, clock: Arc<dyn Clock>) -> Self {
        Self {
            config: Arc::new(config),
            stores,
            clock,
        }
    }

    /// Services bound to this host's stores
    pub fn app_state(&self) -> AppState {
        AppState {
            catalog: CatalogService::new(self.stores.cars.clone()),
            booking: BookingService::new(
                self.stores.clone(),
                self.clock.clone(),
                self.config.booking.clone(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReturnPolicy;
    use crate::core::FixedClock;
    use chrono::NaiveDate;

    #[test]
    fn test_app_state_carries_booking_config() {
        let mut config = AppConfig::default();
        config.booking.return_policy = ReturnPolicy::Delete;
        config.booking.max_span_days = 7;

        let clock = FixedClock::at_date(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        let host = ServerHost::new(config, Stores::in_memory(), Arc::new(clock));

        let state = host.app_state();
        assert_eq!(state.booking.config().return_policy, ReturnPolicy::Delete);
        assert_eq!(state.booking.config().max_span_days, 7);
    }
}
