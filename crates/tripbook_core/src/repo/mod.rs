//! Persistence abstractions for the trip collection.
//!
//! # Responsibility
//! - Define the key-value contract the trip store writes through.
//! - Isolate SQLite details from service orchestration.
//!
//! # Invariants
//! - Every write is synchronous and complete before the call returns.

pub mod kv_store;
