//! HTTP surface: router, handlers, error mapping and middleware.

mod client;
pub mod error;
mod handlers;
mod rate_limit;
pub mod router;
mod security_headers;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
