//! # Vet Relay Server
//!
//! The HTTP surface of the emergency notification relay.
//!
//! The library half exposes the router, handlers and shared state so
//! integration tests can drive the full surface in-process; the `vet-relay`
//! binary adds CLI parsing, logging setup and lifecycle handling on top.

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
