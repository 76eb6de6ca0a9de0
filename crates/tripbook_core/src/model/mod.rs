//! Trip domain model.
//!
//! # Responsibility
//! - Define the trip aggregate persisted by the store.
//! - Isolate identifier generation behind a provider trait.
//!
//! # Invariants
//! - Every entity id is unique within its containing collection.
//! - Ids are never reused after deletion.

pub mod id;
pub mod trip;
