//! Trip collection persistence.
//!
//! # Responsibility
//! - Load, save, upsert and delete trips as one JSON document under one key.
//! - Bootstrap the single active trip used by the editor.
//!
//! # Invariants
//! - Reads never fail: a missing or malformed document is an empty collection.
//! - Every mutation rewrites the whole document before returning.
//! - Input slices are never mutated; the returned `Vec` is the new truth.
//! - `get_or_create_single` leaves exactly one trip in the backing store.

use crate::dates::{ensure_days, format_date, parse_date};
use crate::model::id::{IdProvider, ShortIdProvider};
use crate::model::trip::{Trip, DEFAULT_TRIP_TITLE};
use crate::repo::kv_store::{KvStore, StoreResult};
use chrono::{Days, Local, NaiveDate};
use log::{debug, info, warn};
use serde_json::Value;

/// Key the trip collection is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "tripbook.trips";
/// Length of a freshly created trip, in days.
pub const DEFAULT_TRIP_DAYS: u64 = 3;

/// Returns the first trip whose id matches exactly.
pub fn get_trip<'a>(trips: &'a [Trip], id: &str) -> Option<&'a Trip> {
    trips.iter().find(|trip| trip.id == id)
}

/// Write-through store for the trip collection.
pub struct TripStore<S: KvStore, I: IdProvider = ShortIdProvider> {
    backing: S,
    ids: I,
    key: String,
    today: Box<dyn Fn() -> NaiveDate>,
}

impl<S: KvStore> TripStore<S> {
    /// Creates a store on `backing` with short ids, the default key and the
    /// local calendar date as "today".
    pub fn new(backing: S) -> Self {
        Self {
            backing,
            ids: ShortIdProvider,
            key: DEFAULT_STORAGE_KEY.to_string(),
            today: Box::new(|| Local::now().date_naive()),
        }
    }
}

impl<S: KvStore, I: IdProvider> TripStore<S, I> {
    /// Replaces the id provider.
    pub fn with_ids<J: IdProvider>(self, ids: J) -> TripStore<S, J> {
        TripStore {
            backing: self.backing,
            ids,
            key: self.key,
            today: self.today,
        }
    }

    /// Stores the collection under `key` instead of the default.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Replaces the source of "today" used for default trips.
    pub fn with_clock(mut self, today: impl Fn() -> NaiveDate + 'static) -> Self {
        self.today = Box::new(today);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the stored collection.
    ///
    /// Absent, unreadable or malformed content degrades to an empty `Vec`.
    pub fn load(&self) -> Vec<Trip> {
        let raw = match self.backing.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!("event=trips_load module=store status=error error={err}");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Trip>>(&raw) {
            Ok(trips) => {
                debug!("event=trips_load module=store status=ok count={}", trips.len());
                trips
            }
            Err(err) => {
                warn!(
                    "event=trips_load module=store status=malformed bytes={} error={}",
                    raw.len(),
                    err
                );
                Vec::new()
            }
        }
    }

    /// Overwrites the stored collection with `trips`.
    pub fn save(&self, trips: &[Trip]) -> StoreResult<()> {
        let json = serde_json::to_string(trips)?;
        self.backing.set(&self.key, &json)?;
        debug!(
            "event=trips_save module=store status=ok count={} bytes={}",
            trips.len(),
            json.len()
        );
        Ok(())
    }

    /// Replaces the trip with the same id in place, or prepends it.
    pub fn upsert(&self, trips: &[Trip], trip: Trip) -> StoreResult<Vec<Trip>> {
        let mut next = trips.to_vec();
        let position = next.iter().position(|existing| existing.id == trip.id);
        let trip_id = trip.id.clone();
        match position {
            Some(index) => next[index] = trip,
            None => next.insert(0, trip),
        }
        self.save(&next)?;
        info!(
            "event=trip_upsert module=store status=ok trip_id={} replaced={}",
            trip_id,
            position.is_some()
        );
        Ok(next)
    }

    /// Removes every trip with `id`, keeping the others in order.
    pub fn delete(&self, trips: &[Trip], id: &str) -> StoreResult<Vec<Trip>> {
        let next: Vec<Trip> = trips.iter().filter(|trip| trip.id != id).cloned().collect();
        self.save(&next)?;
        info!(
            "event=trip_delete module=store status=ok trip_id={} removed={}",
            id,
            trips.len() - next.len()
        );
        Ok(next)
    }

    /// Fresh id from the configured provider.
    pub fn new_id(&self) -> String {
        self.ids.next_id()
    }

    /// Builds a normalized trip without persisting it.
    ///
    /// A missing start defaults to today; a missing end defaults to two days
    /// after the start, giving a three-day trip. When the start cannot be
    /// parsed the end falls back to the start itself.
    pub fn create_trip(
        &self,
        title: Option<&str>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Trip {
        let start = start.map_or_else(|| format_date((self.today)()), str::to_string);
        let end = end.map_or_else(|| default_end(&start), str::to_string);
        Trip::new(self.new_id(), title.unwrap_or(DEFAULT_TRIP_TITLE), start, end)
    }

    /// Returns the single active trip, creating or compacting as needed.
    ///
    /// When the first stored element decodes as a trip, it is normalized and
    /// written back as the only entry; any others are discarded undecoded.
    /// Otherwise a default trip is created and written as the only entry.
    pub fn get_or_create_single(&self) -> StoreResult<Trip> {
        let (head, stored_count) = self.load_head();
        let discarded = stored_count.saturating_sub(usize::from(head.is_some()));

        let trip = match head {
            Some(first) => ensure_days(first),
            None => {
                let created = self.create_trip(None, None, None);
                info!(
                    "event=trip_bootstrap module=store status=created trip_id={}",
                    created.id
                );
                created
            }
        };

        self.save(std::slice::from_ref(&trip))?;
        if discarded > 0 {
            warn!(
                "event=trip_bootstrap module=store status=compacted trip_id={} discarded={}",
                trip.id, discarded
            );
        }
        Ok(trip)
    }

    /// Decodes only the first stored element, with the stored element count.
    ///
    /// Later elements are never decoded, so a damaged tail cannot hide a
    /// valid first trip.
    fn load_head(&self) -> (Option<Trip>, usize) {
        let raw = match self.backing.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return (None, 0),
            Err(err) => {
                warn!("event=trip_head_load module=store status=error error={err}");
                return (None, 0);
            }
        };

        let entries = match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(
                    "event=trip_head_load module=store status=malformed bytes={} error={}",
                    raw.len(),
                    err
                );
                return (None, 0);
            }
        };

        let count = entries.len();
        let head = entries
            .into_iter()
            .next()
            .and_then(|value| match serde_json::from_value::<Trip>(value) {
                Ok(trip) => Some(trip),
                Err(err) => {
                    warn!("event=trip_head_load module=store status=invalid_head error={err}");
                    None
                }
            });
        (head, count)
    }
}

fn default_end(start: &str) -> String {
    parse_date(start)
        .and_then(|date| date.checked_add_days(Days::new(DEFAULT_TRIP_DAYS - 1)))
        .map_or_else(|| start.to_string(), format_date)
}
