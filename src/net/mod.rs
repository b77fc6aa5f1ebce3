//! Networking modules for the account REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` implements the HTTP user directory, `types` defines the wire
//! schema, and `error` the failure taxonomy shared with the session core.

pub mod api;
pub mod error;
pub mod types;
