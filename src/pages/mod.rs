//! Route components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages consume the session core through context and never talk to the
//! network directly; every side effect goes through `AccountSession` so
//! the cache invariants hold no matter which page triggered the change.

pub mod dashboard;
pub mod home;
pub mod settings;
pub mod sign_in;
pub mod sign_up;
pub mod verify_email;
