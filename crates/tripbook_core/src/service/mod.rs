//! Trip use-case services.
//!
//! # Responsibility
//! - Orchestrate the key-value store into trip collection operations.
//! - Keep shell/CLI layers decoupled from storage details.

pub mod print_sheet;
pub mod transfer;
pub mod trip_store;
