use chrono::NaiveDate;
use std::cell::Cell;
use tripbook_core::db::{open_db, open_db_in_memory};
use tripbook_core::{
    get_trip, IdProvider, KvStore, MemoryKvStore, SqliteKvStore, StoreError, Trip, TripStore,
};

const KEY: &str = "tripbook.trips";

struct SequentialIds {
    next: Cell<u32>,
}

impl SequentialIds {
    fn new() -> Self {
        Self { next: Cell::new(1) }
    }
}

impl IdProvider for SequentialIds {
    fn next_id(&self) -> String {
        let id = self.next.get();
        self.next.set(id + 1);
        format!("id{id}")
    }
}

fn march_20() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()
}

fn trip(id: &str, title: &str) -> Trip {
    Trip::new(id, title, "2025-03-20", "2025-03-21")
}

fn ids(trips: &[Trip]) -> Vec<&str> {
    trips.iter().map(|trip| trip.id.as_str()).collect()
}

#[test]
fn load_degrades_to_empty_for_absent_or_malformed_content() {
    let backing = MemoryKvStore::new();
    let store = TripStore::new(&backing);
    assert!(store.load().is_empty());

    for raw in ["not json", "{\"id\":\"a\"}", "[1, 2]", ""] {
        backing.set(KEY, raw).unwrap();
        assert!(store.load().is_empty(), "raw `{raw}` should load as empty");
    }
}

#[test]
fn save_overwrites_whole_collection() {
    let backing = MemoryKvStore::new();
    let store = TripStore::new(&backing);

    store.save(&[trip("a", "A"), trip("b", "B")]).unwrap();
    store.save(&[trip("c", "C")]).unwrap();

    assert_eq!(ids(&store.load()), ["c"]);
}

#[test]
fn upsert_then_get_returns_equal_trip() {
    let backing = MemoryKvStore::new();
    let store = TripStore::new(&backing);

    let mut edited = trip("a", "Kyoto");
    edited.add_expense("e1", "Hotel", 12000);
    let trips = store.upsert(&[], edited.clone()).unwrap();

    assert_eq!(get_trip(&trips, "a"), Some(&edited));
    assert_eq!(get_trip(&store.load(), "a"), Some(&edited));
}

#[test]
fn upsert_replaces_in_place_and_prepends_new_trips() {
    let backing = MemoryKvStore::new();
    let store = TripStore::new(&backing);
    let original = vec![trip("a", "A"), trip("b", "B"), trip("c", "C")];

    let replaced = store.upsert(&original, trip("b", "B2")).unwrap();
    assert_eq!(ids(&replaced), ["a", "b", "c"]);
    assert_eq!(replaced[1].title, "B2");
    assert_eq!(original[1].title, "B");

    let prepended = store.upsert(&replaced, trip("d", "D")).unwrap();
    assert_eq!(ids(&prepended), ["d", "a", "b", "c"]);
    assert_eq!(store.load(), prepended);
}

#[test]
fn delete_removes_exactly_the_match_and_keeps_order() {
    let backing = MemoryKvStore::new();
    let store = TripStore::new(&backing);
    let trips = vec![trip("a", "A"), trip("b", "B"), trip("c", "C"), trip("d", "D")];

    let remaining = store.delete(&trips, "b").unwrap();
    assert_eq!(ids(&remaining), ["a", "c", "d"]);
    assert_eq!(store.load(), remaining);

    let unchanged = store.delete(&remaining, "missing").unwrap();
    assert_eq!(unchanged, remaining);
}

#[test]
fn get_or_create_single_creates_default_trip_once() {
    let backing = MemoryKvStore::new();
    let store = TripStore::new(&backing)
        .with_ids(SequentialIds::new())
        .with_clock(march_20);

    let first = store.get_or_create_single().unwrap();
    assert_eq!(first.id, "id1");
    assert_eq!(first.start_date, "2025-03-20");
    assert_eq!(first.end_date, "2025-03-22");
    assert_eq!(first.days.len(), 3);

    let second = store.get_or_create_single().unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(store.load(), vec![first]);
}

#[test]
fn get_or_create_single_compacts_to_first_trip_and_normalizes_it() {
    let backing = MemoryKvStore::new();
    let store = TripStore::new(&backing);

    let mut first = trip("keep", "Keep");
    first.end_date = "2025-03-23".to_string();
    store.save(&[first, trip("drop1", "X"), trip("drop2", "Y")]).unwrap();

    let single = store.get_or_create_single().unwrap();
    assert_eq!(single.id, "keep");
    assert_eq!(single.days.len(), 4);

    let again = store.get_or_create_single().unwrap();
    assert_eq!(again.id, "keep");
    assert_eq!(store.load(), vec![single]);
}

#[test]
fn get_or_create_single_keeps_valid_first_trip_despite_broken_tail() {
    let backing = MemoryKvStore::new();
    let store = TripStore::new(&backing).with_ids(SequentialIds::new());
    backing
        .set(
            KEY,
            r#"[{"id":"keep","title":"Keep","startDate":"2025-03-20","endDate":"2025-03-21","notes":"important"},{"id":"old"}]"#,
        )
        .unwrap();

    let single = store.get_or_create_single().unwrap();
    assert_eq!(single.id, "keep");
    assert_eq!(single.notes, "important");
    assert_eq!(single.days.len(), 2);
    assert_eq!(store.load(), vec![single]);
}

#[test]
fn get_or_create_single_replaces_invalid_first_trip() {
    let backing = MemoryKvStore::new();
    let store = TripStore::new(&backing)
        .with_ids(SequentialIds::new())
        .with_clock(march_20);
    let valid = serde_json::to_value(trip("later", "Later")).unwrap();
    backing
        .set(KEY, &format!(r#"[{{"id":"broken"}},{valid}]"#))
        .unwrap();

    let single = store.get_or_create_single().unwrap();
    assert_eq!(single.id, "id1");
    assert_eq!(ids(&store.load()), ["id1"]);
}

#[test]
fn write_failure_propagates_and_keeps_previous_content() {
    let backing = MemoryKvStore::with_quota(600);
    let store = TripStore::new(&backing);
    let saved = store.upsert(&[], trip("a", "A")).unwrap();

    let mut large = trip("b", "B");
    large.set_notes("x".repeat(1000));
    let err = store.upsert(&saved, large).unwrap_err();

    assert!(matches!(err, StoreError::QuotaExceeded { .. }));
    assert_eq!(store.load(), saved);
}

#[test]
fn sqlite_backing_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tripbook.db");

    let created = {
        let conn = open_db(&path).unwrap();
        let store = TripStore::new(SqliteKvStore::new(&conn));
        store.get_or_create_single().unwrap()
    };

    let conn = open_db(&path).unwrap();
    let store = TripStore::new(SqliteKvStore::new(&conn));
    assert_eq!(store.load(), vec![created.clone()]);
    assert_eq!(store.get_or_create_single().unwrap().id, created.id);
}

#[test]
fn custom_key_isolates_collections() {
    let conn = open_db_in_memory().unwrap();
    let backing = SqliteKvStore::new(&conn);
    let default_store = TripStore::new(&backing);
    let other_store = TripStore::new(&backing).with_key("other.trips");

    default_store.upsert(&[], trip("a", "A")).unwrap();

    assert_eq!(ids(&default_store.load()), ["a"]);
    assert!(other_store.load().is_empty());
    assert_eq!(other_store.key(), "other.trips");
}
