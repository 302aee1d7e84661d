//! jbin Application Layer
//!
//! Use cases for creating and retrieving blobs, plus the thin health and
//! public-config operations. Everything here talks to infrastructure through
//! the ports defined in `jb-core`.

pub mod app;
pub mod deps;
pub mod error;
pub mod models;
pub mod usecases;

pub use app::{App, AppSettings};
pub use deps::{AppDeps, BotVerification};
pub use error::BlobServiceError;
