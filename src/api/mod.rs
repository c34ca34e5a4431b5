//! HealthBot HTTP API.
//!
//! Serves the browser front-end: chat, profile and list management,
//! appointments, uploads and the static assets. Every request passes the
//! session middleware, which ties the browser to its language preference.
//!
//! The router is composable: `api_router()` returns a `Router` that can be
//! mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{serve, start_api_server_on, ApiServer};
pub use types::ApiContext;
