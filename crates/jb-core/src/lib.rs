//! # jb-core
//!
//! Core domain models and port definitions for jbin.
//!
//! This crate contains pure domain types without any infrastructure dependencies.

pub mod blob;
pub mod config;
pub mod ids;
pub mod ports;

// Re-export commonly used types at the crate root
pub use blob::{Blob, BlobMetadata, DocumentError, JsonDocument};
pub use config::ServerConfig;
pub use ids::{BlobId, BlobIdError};
