//! Core domain logic for tripbook.
//! This crate owns the trip model, day-range normalization, persistence and
//! routing; shells only read from and write through its public operations.

pub mod cancel;
pub mod config;
pub mod dates;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod router;
pub mod service;

pub use cancel::CancelToken;
pub use config::{load_config_file, ConfigError, ConfigFile, CoreConfig};
pub use dates::{date_range, ensure_days};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::id::{IdProvider, IdStrategy, ShortIdProvider, UuidIdProvider};
pub use model::trip::{DayPlan, Expense, PackingItem, PlanItem, Trip};
pub use repo::kv_store::{KvStore, MemoryKvStore, SqliteKvStore, StoreError, StoreResult};
pub use router::{parse_fragment, FragmentHost, HashRouter, MemoryFragmentHost, Route};
pub use service::print_sheet::render_print_sheet;
pub use service::transfer::{export_trips, import_trips, ImportError};
pub use service::trip_store::{get_trip, TripStore};

/// Minimal health-check API for shell wiring.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
