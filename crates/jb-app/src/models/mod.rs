//! Response models produced by the use cases.

mod blob_view;
mod public_config;

pub use blob_view::{BlobView, CreatedBlob, RequestOrigin};
pub use public_config::{AnalyticsInfo, HealthStatus, PublicConfig, RecaptchaInfo, UmamiInfo};
