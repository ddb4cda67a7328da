//! # club-api
//!
//! HTTP layer: extractors, handlers, routing, middleware, and server
//! bootstrap on top of `club-service`.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run};
pub use state::AppState;
