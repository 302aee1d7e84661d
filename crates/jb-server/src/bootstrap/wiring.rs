//! # Dependency Wiring / 依赖注入
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Create infrastructure implementations / 创建基础设施实现
//! - ✅ Inject them into the [`App`] / 将它们注入 [`App`]
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic / 禁止业务逻辑**
//! ❌ **No config validation / 禁止配置验证** (the loader does that)

use std::path::Path;
use std::sync::Arc;

use jb_app::models::PublicConfig;
use jb_app::{App, AppDeps, AppSettings, BotVerification};
use jb_core::ports::{BlobIdGeneratorPort, BlobRepositoryPort, ClockPort, RateLimiterPort};
use jb_core::ServerConfig;
use jb_infra::db::executor::DieselSqliteExecutor;
use jb_infra::db::mappers::BlobRowMapper;
use jb_infra::db::pool::{init_db_pool, DbPool};
use jb_infra::db::repositories::DieselBlobRepository;
use jb_infra::{FixedWindowRateLimiter, RandomBlobIdGenerator, RecaptchaVerifier, SystemClock};
use tracing::{info, warn};

pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（基础设施初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Database initialization failed: {0}")]
    DatabaseInit(String),

    #[error("Bot verifier initialization failed: {0}")]
    VerifierInit(String),
}

/// Fully wired application plus the handles needed at shutdown
pub struct WiredApp {
    pub app: Arc<App>,
    /// Kept for the WAL checkpoint on shutdown
    pub executor: DieselSqliteExecutor,
}

/// Create the data directory, the connection pool and run migrations
/// 创建数据目录、连接池并运行迁移
fn create_db_pool(db_path: &Path) -> WiringResult<DbPool> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            WiringError::DatabaseInit(format!("Failed to create DB directory: {}", e))
        })?;
    }

    let db_url = db_path
        .to_str()
        .ok_or_else(|| WiringError::DatabaseInit("Invalid database path".to_string()))?;

    init_db_pool(db_url)
        .map_err(|e| WiringError::DatabaseInit(format!("Failed to initialize DB: {:#}", e)))
}

fn create_bot_verification(config: &ServerConfig) -> WiringResult<BotVerification> {
    let Some(secret) = config.recaptcha.secret_key.as_deref() else {
        warn!("RECAPTCHA_SECRET_KEY not set, blob creation is not bot-protected");
        return Ok(BotVerification::Disabled);
    };

    let verifier = RecaptchaVerifier::new(
        secret,
        config.recaptcha.verify_url.as_str(),
        config.recaptcha.timeout,
    )
    .map_err(|e| WiringError::VerifierInit(format!("{:#}", e)))?;

    info!(min_score = config.recaptcha.min_score, "reCAPTCHA verification enabled");

    Ok(BotVerification::Required {
        verifier: Arc::new(verifier),
        min_score: config.recaptcha.min_score,
    })
}

/// Wire every port implementation and build the [`App`]
/// 连接所有端口实现并构建 [`App`]
///
/// # Errors / 错误
///
/// Returns `WiringError` if any infrastructure component fails to initialize.
/// 如果任何基础设施组件初始化失败，返回 `WiringError`。
pub fn wire_dependencies(config: &ServerConfig) -> WiringResult<WiredApp> {
    let db_pool = create_db_pool(&config.storage.database_path)?;
    info!(path = %config.storage.database_path.display(), "Database ready");

    let executor = DieselSqliteExecutor::new(db_pool);
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());

    let blob_repo: Arc<dyn BlobRepositoryPort> = Arc::new(DieselBlobRepository::new(
        executor.clone(),
        BlobRowMapper,
        clock,
    ));
    let id_generator: Arc<dyn BlobIdGeneratorPort> = Arc::new(RandomBlobIdGenerator);

    let api_rate_limiter: Arc<dyn RateLimiterPort> =
        Arc::new(FixedWindowRateLimiter::new(config.rate_limits.api));
    let create_rate_limiter: Arc<dyn RateLimiterPort> =
        Arc::new(FixedWindowRateLimiter::new(config.rate_limits.create));

    let deps = AppDeps {
        blob_repo,
        id_generator,
        bot_verification: create_bot_verification(config)?,
        api_rate_limiter,
        create_rate_limiter,
    };

    let settings = AppSettings {
        blob_id_length: config.blob.id_length,
        public_config: PublicConfig::from_server_config(config),
    };

    Ok(WiredApp {
        app: Arc::new(App::new(deps, settings)),
        executor,
    })
}
