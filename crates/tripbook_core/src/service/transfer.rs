//! Export and import of the trip collection as portable JSON.
//!
//! # Responsibility
//! - Render the collection as pretty-printed JSON for file download.
//! - Accept the same format back, normalize it, and overwrite the store.
//!
//! # Invariants
//! - Import validates the whole payload before the first write.
//! - A rejected import leaves the backing store untouched.

use crate::dates::ensure_days;
use crate::model::id::IdProvider;
use crate::model::trip::Trip;
use crate::repo::kv_store::{KvStore, StoreError, StoreResult};
use crate::service::trip_store::TripStore;
use log::{info, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reasons an import payload is refused or fails to persist.
#[derive(Debug)]
pub enum ImportError {
    /// Payload is not valid JSON.
    Json(serde_json::Error),
    /// Top-level JSON value is not an array.
    NotAnArray,
    /// An array element does not have the trip shape.
    InvalidTrip {
        index: usize,
        source: serde_json::Error,
    },
    /// Payload was valid but writing it failed.
    Store(StoreError),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "import is not valid JSON: {err}"),
            Self::NotAnArray => write!(f, "import must be a JSON array of trips"),
            Self::InvalidTrip { index, source } => {
                write!(f, "import element {index} is not a trip: {source}")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::NotAnArray => None,
            Self::InvalidTrip { source, .. } => Some(source),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for ImportError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Renders `trips` as a JSON array indented by two spaces.
pub fn export_trips(trips: &[Trip]) -> StoreResult<String> {
    Ok(serde_json::to_string_pretty(trips)?)
}

/// Parses `json`, normalizes every trip, and overwrites the store with it.
///
/// Returns the normalized collection that was written.
pub fn import_trips<S: KvStore, I: IdProvider>(
    store: &TripStore<S, I>,
    json: &str,
) -> Result<Vec<Trip>, ImportError> {
    let trips = match parse_import(json) {
        Ok(trips) => trips,
        Err(err) => {
            warn!("event=trips_import module=transfer status=rejected error={err}");
            return Err(err);
        }
    };

    let normalized: Vec<Trip> = trips.into_iter().map(ensure_days).collect();
    store.save(&normalized)?;
    info!(
        "event=trips_import module=transfer status=ok count={}",
        normalized.len()
    );
    Ok(normalized)
}

fn parse_import(json: &str) -> Result<Vec<Trip>, ImportError> {
    let value: Value = serde_json::from_str(json).map_err(ImportError::Json)?;
    let Value::Array(elements) = value else {
        return Err(ImportError::NotAnArray);
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            serde_json::from_value(element)
                .map_err(|source| ImportError::InvalidTrip { index, source })
        })
        .collect()
}
