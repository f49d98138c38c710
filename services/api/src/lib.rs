//! Board Tutor API Library Crate
//!
//! This library contains the HTTP layer of the tutor service: configuration,
//! application state, API models, handlers and routing. The `api` binary is a
//! thin wrapper around this library.

pub mod config;
pub mod handlers;
pub mod models;
pub mod router;
pub mod state;
