//! jbin HTTP server
//!
//! `bootstrap` turns the environment into a running service; `http` holds
//! the axum router, handlers and middleware.

pub mod bootstrap;
pub mod http;
