//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Read environment variables / 读取环境变量
//! - ✅ Parse them into the `ServerConfig` DTO / 解析为 `ServerConfig` DTO
//! - ✅ Reject malformed values with context / 拒绝格式错误的值并附带上下文
//!
//! Unset or empty variables keep the defaults of
//! [`ServerConfig::with_system_defaults`].

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use jb_core::config::RateLimitConfig;
use jb_core::ids::MAX_BLOB_ID_LENGTH;
use jb_core::ServerConfig;

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_FRONTEND_DIR: &str = "./public";

/// Load configuration from the process environment
/// 从进程环境变量加载配置
pub fn load_config() -> Result<ServerConfig> {
    load_config_from(|name| std::env::var(name).ok())
}

/// Load configuration through an arbitrary variable lookup.
///
/// # Errors / 错误
///
/// Returns error if any set variable fails to parse or is out of range.
/// 任一已设置变量解析失败或超出范围时返回错误。
pub fn load_config_from<F>(lookup: F) -> Result<ServerConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let env = Env { lookup };

    let data_dir = env
        .string("DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    let mut config = ServerConfig::with_system_defaults(data_dir);

    // HTTP
    if let Some(host) = env.string("HOST") {
        config.http.host = host;
    }
    if let Some(port) = env.parse::<u16>("PORT")? {
        config.http.port = port;
    }
    if let Some(raw) = env.string("JSON_SIZE_LIMIT") {
        config.http.json_size_limit =
            parse_size(&raw).with_context(|| format!("Invalid JSON_SIZE_LIMIT: {raw:?}"))?;
    }
    if let Some(hops) = env.parse::<usize>("TRUST_PROXY_HOPS")? {
        config.http.trust_proxy_hops = hops;
    }
    config.http.cors_origins = env.list("CORS_ORIGINS");
    config.http.frontend_dir = env
        .string("FRONTEND_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FRONTEND_DIR));

    // Blob ids
    if let Some(length) = env.parse::<usize>("BLOB_ID_LENGTH")? {
        if !(1..=MAX_BLOB_ID_LENGTH).contains(&length) {
            bail!("BLOB_ID_LENGTH must be between 1 and {MAX_BLOB_ID_LENGTH}, got {length}");
        }
        config.blob.id_length = length;
    }

    // Bot verification
    config.recaptcha.secret_key = env.string("RECAPTCHA_SECRET_KEY");
    config.recaptcha.site_key = env.string("RECAPTCHA_SITE_KEY");
    if let Some(score) = env.parse::<f64>("RECAPTCHA_MIN_SCORE")? {
        if !(0.0..=1.0).contains(&score) {
            bail!("RECAPTCHA_MIN_SCORE must be between 0.0 and 1.0, got {score}");
        }
        config.recaptcha.min_score = score;
    }
    if let Some(url) = env.string("RECAPTCHA_VERIFY_URL") {
        config.recaptcha.verify_url = url;
    }
    if let Some(timeout) = env.millis("RECAPTCHA_TIMEOUT_MS")? {
        config.recaptcha.timeout = timeout;
    }

    // Rate limits
    config.rate_limits.api = env.rate_limit(
        "RATE_LIMIT_WINDOW_MS",
        "RATE_LIMIT_MAX",
        config.rate_limits.api,
    )?;
    config.rate_limits.create = env.rate_limit(
        "CREATE_LIMIT_WINDOW_MS",
        "CREATE_LIMIT_MAX",
        config.rate_limits.create,
    )?;

    // Content security policy
    config.csp.extra_script_src = env.list("CSP_EXTRA_SCRIPT_SRC").unwrap_or_default();
    config.csp.extra_style_src = env.list("CSP_EXTRA_STYLE_SRC").unwrap_or_default();
    config.csp.extra_worker_src = env.list("CSP_EXTRA_WORKER_SRC").unwrap_or_default();

    // Analytics
    config.analytics.umami_url = env.string("UMAMI_URL");
    config.analytics.umami_website_id = env.string("UMAMI_WEBSITE_ID");

    config.log_dir = env.string("LOG_DIR").map(PathBuf::from);

    Ok(config)
}

struct Env<F> {
    lookup: F,
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Trimmed value; empty counts as unset
    fn string(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse<T>(&self, name: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.string(name)
            .map(|raw| {
                raw.parse::<T>()
                    .with_context(|| format!("Invalid {name}: {raw:?}"))
            })
            .transpose()
    }

    fn millis(&self, name: &str) -> Result<Option<Duration>> {
        match self.parse::<u64>(name)? {
            Some(0) => bail!("{name} must be greater than zero"),
            Some(ms) => Ok(Some(Duration::from_millis(ms))),
            None => Ok(None),
        }
    }

    /// Comma-separated list, blank entries dropped. `None` when unset or
    /// when nothing survives.
    fn list(&self, name: &str) -> Option<Vec<String>> {
        let items: Vec<String> = self
            .string(name)?
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        (!items.is_empty()).then_some(items)
    }

    fn rate_limit(
        &self,
        window_var: &str,
        max_var: &str,
        defaults: RateLimitConfig,
    ) -> Result<RateLimitConfig> {
        Ok(RateLimitConfig {
            window: self.millis(window_var)?.unwrap_or(defaults.window),
            max_requests: self.parse::<u32>(max_var)?.unwrap_or(defaults.max_requests),
        })
    }
}

/// Parse a human byte size such as `10mb`, `512kb` or `1048576`.
///
/// Units are binary (`1kb = 1024`), case-insensitive, and the number may be
/// fractional.
pub fn parse_size(raw: &str) -> Result<usize> {
    let normalized = raw.trim().to_ascii_lowercase();
    let split = normalized
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(normalized.len());
    let (number, unit) = normalized.split_at(split);

    let multiplier: f64 = match unit.trim() {
        "" | "b" => 1.0,
        "kb" => 1024.0,
        "mb" => 1024.0 * 1024.0,
        "gb" => 1024.0 * 1024.0 * 1024.0,
        other => bail!("unknown size unit {other:?}"),
    };

    let value: f64 = number
        .parse()
        .with_context(|| format!("invalid size number {number:?}"))?;
    let bytes = (value * multiplier).floor();

    if !bytes.is_finite() || bytes < 1.0 || bytes > usize::MAX as f64 {
        bail!("size out of range");
    }

    Ok(bytes as usize)
}
