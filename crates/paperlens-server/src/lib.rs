//! paperlens-server
//!
//! HTTP surface: axum router, middleware, routes, and environment
//! configuration. `main` serves it on AWS Lambda or a local listener.

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use crate::app::build_router;
pub use crate::config::AppConfig;
pub use crate::error::ApiError;
pub use crate::state::AppState;
