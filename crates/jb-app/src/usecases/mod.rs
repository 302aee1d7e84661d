//! Business logic use cases
//!
//! Every request is a single independent transaction:
//!
//! ```text
//! POST /api/blobs     → EnforceRateLimit (api, create) → CreateBlob
//! GET  /api/blobs/:id → EnforceRateLimit (api)         → GetBlob
//! GET  /api/health    → CheckHealth
//! GET  /api/config    → GetPublicConfig
//! ```

pub mod check_health;
pub mod create_blob;
pub mod enforce_rate_limit;
pub mod get_blob;
pub mod get_public_config;

#[cfg(test)]
pub(crate) mod test_support;

pub use check_health::CheckHealth;
pub use create_blob::{CreateBlob, CreateBlobInput, MAX_ID_ATTEMPTS};
pub use enforce_rate_limit::{
    EnforceRateLimit, RateLimitQuota, API_RATE_LIMIT_MESSAGE, CREATE_RATE_LIMIT_MESSAGE,
};
pub use get_blob::{GetBlob, INVALID_BLOB_ID};
pub use get_public_config::GetPublicConfig;
