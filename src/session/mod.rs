//! Session management: the cache, the core, and the idle watchdog.
//!
//! DESIGN
//! ======
//! `state` holds the data model and pure transitions, `cache` the single-key
//! reactive store, `core` the operations that drive it, and `idle` the
//! inactivity sign-out. Everything UI-facing consumes these through the
//! [`AccountSession`] alias provided via context.

pub mod cache;
pub mod core;
pub mod idle;
pub mod state;

/// The production session core, wired to the HTTP user directory.
pub type AccountSession = core::SessionCore<crate::net::api::HttpDirectory>;
