//! Fragment-based view routing.
//!
//! # Responsibility
//! - Map navigation fragments to view routes and back.
//! - Keep route state derived only from fragment-change notifications.
//!
//! # Invariants
//! - Unknown or incomplete fragments fall back to [`Route::List`].
//! - `navigate` writes the fragment and never sets route state itself.
//! - A mounted router holds exactly one host listener.

mod hash_router;
mod host;
mod route;

pub use hash_router::HashRouter;
pub use host::{FragmentHost, FragmentListener, ListenerId, MemoryFragmentHost};
pub use route::{parse_fragment, Route};
