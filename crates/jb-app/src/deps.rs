//! # Application Dependencies / 应用依赖
//!
//! Dependency grouping for [`crate::App`] construction. This is not a
//! builder: no defaults, no hidden logic, just parameter grouping.

use std::sync::Arc;
use jb_core::ports::*;

/// Whether blob creation requires a bot-verification token
/// 创建 blob 时是否需要人机验证
#[derive(Clone)]
pub enum BotVerification {
    Disabled,
    Required {
        verifier: Arc<dyn BotVerifierPort>,
        min_score: f64,
    },
}

/// Application dependency grouping (non-Builder, just parameter grouping)
/// 应用依赖分组（非 Builder，仅参数打包）
pub struct AppDeps {
    // Storage dependencies / 存储依赖
    pub blob_repo: Arc<dyn BlobRepositoryPort>,
    pub id_generator: Arc<dyn BlobIdGeneratorPort>,

    // Abuse prevention / 防滥用
    pub bot_verification: BotVerification,
    pub api_rate_limiter: Arc<dyn RateLimiterPort>,
    pub create_rate_limiter: Arc<dyn RateLimiterPort>,
}
