//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases and the infrastructure
//! implementations, so the create/retrieve logic stays independent of the
//! storage engine, the clock, the rate-limit counters and the bot-verification
//! oracle.

mod blob_id_generator;
mod blob_repository;
mod bot_verifier;
mod clock;
pub mod errors;
mod rate_limiter;

pub use blob_id_generator::BlobIdGeneratorPort;
pub use blob_repository::BlobRepositoryPort;
pub use bot_verifier::{BotVerdict, BotVerifierPort};
pub use clock::ClockPort;
pub use errors::{BlobRepositoryError, BotVerificationError};
pub use rate_limiter::{RateLimitDecision, RateLimiterPort};
