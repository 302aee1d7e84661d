//! # Pure Data Module / 纯数据模块
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Define configuration data structures / 定义配置数据结构
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No environment access / 禁止读取环境变量**
//! ❌ **No validation logic / 禁止验证逻辑**
//!
//! Loading and validating lives in `jb-server::bootstrap::config`.

use std::path::PathBuf;
use std::time::Duration;

use crate::ids::DEFAULT_BLOB_ID_LENGTH;

pub const DATABASE_FILE_NAME: &str = "jbin.db";

pub const DEFAULT_RECAPTCHA_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Server configuration DTO (pure data, no logic)
/// 服务配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub http: HttpConfig,
    pub storage: StorageConfig,
    pub blob: BlobConfig,
    pub recaptcha: RecaptchaConfig,
    pub rate_limits: RateLimitsConfig,
    pub csp: CspConfig,
    pub analytics: AnalyticsConfig,
    /// Optional directory for a log file in addition to stdout
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    /// Raw request body cap in bytes
    pub json_size_limit: usize,
    /// Number of reverse proxies in front of the service whose
    /// `X-Forwarded-*` headers are trusted
    pub trust_proxy_hops: usize,
    /// `None` allows every origin
    pub cors_origins: Option<Vec<String>>,
    pub frontend_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub database_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlobConfig {
    pub id_length: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecaptchaConfig {
    /// Presence of the secret turns bot verification on
    pub secret_key: Option<String>,
    pub site_key: Option<String>,
    pub min_score: f64,
    pub verify_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub window: Duration,
    pub max_requests: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitsConfig {
    /// Applies to every `/api/*` request
    pub api: RateLimitConfig,
    /// Applies on top of `api` to blob creation
    pub create: RateLimitConfig,
}

/// Extra content-security-policy sources appended to the built-in lists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CspConfig {
    pub extra_script_src: Vec<String>,
    pub extra_style_src: Vec<String>,
    pub extra_worker_src: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyticsConfig {
    pub umami_url: Option<String>,
    pub umami_website_id: Option<String>,
}

impl ServerConfig {
    /// Create a ServerConfig rooted at `data_dir` with the stock limits
    /// 以 `data_dir` 为根目录创建默认配置
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            http: HttpConfig {
                host: "0.0.0.0".to_string(),
                port: 3001,
                json_size_limit: 10 * 1024 * 1024,
                trust_proxy_hops: 1,
                cors_origins: None,
                frontend_dir: PathBuf::from("public"),
            },
            storage: StorageConfig {
                database_path: data_dir.join(DATABASE_FILE_NAME),
                data_dir,
            },
            blob: BlobConfig {
                id_length: DEFAULT_BLOB_ID_LENGTH,
            },
            recaptcha: RecaptchaConfig {
                secret_key: None,
                site_key: None,
                min_score: 0.5,
                verify_url: DEFAULT_RECAPTCHA_VERIFY_URL.to_string(),
                timeout: Duration::from_secs(5),
            },
            rate_limits: RateLimitsConfig {
                api: RateLimitConfig {
                    window: Duration::from_secs(15 * 60),
                    max_requests: 100,
                },
                create: RateLimitConfig {
                    window: Duration::from_secs(60 * 60),
                    max_requests: 30,
                },
            },
            csp: CspConfig::default(),
            analytics: AnalyticsConfig::default(),
            log_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_system_defaults_creates_valid_paths() {
        let config = ServerConfig::with_system_defaults(PathBuf::from("/tmp/jbin"));

        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/jbin"));
        assert_eq!(
            config.storage.database_path,
            PathBuf::from("/tmp/jbin/jbin.db")
        );
        assert_eq!(config.blob.id_length, 10);
        assert_eq!(config.rate_limits.create.max_requests, 30);
        assert_eq!(config.rate_limits.api.window, Duration::from_secs(900));
        assert!(config.recaptcha.secret_key.is_none());
    }
}
