//! Blog API server library.
//!
//! Exposes the building blocks (config, state, services, handlers, routes,
//! error handling) so integration tests and the binary entrypoint can both
//! access them.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod headers;
pub mod query;
pub mod router;
pub mod routes;
pub mod services;
pub mod state;
