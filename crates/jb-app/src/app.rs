use crate::deps::AppDeps;
use crate::models::PublicConfig;
use crate::usecases::{
    CheckHealth, CreateBlob, EnforceRateLimit, GetBlob, GetPublicConfig,
    API_RATE_LIMIT_MESSAGE, CREATE_RATE_LIMIT_MESSAGE,
};

/// Plain settings the use cases need besides their ports.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub blob_id_length: usize,
    pub public_config: PublicConfig,
}

/// Long-lived application context, constructed once at startup and shared
/// by every request handler.
pub struct App {
    deps: AppDeps,
    settings: AppSettings,
}

impl App {
    pub fn new(deps: AppDeps, settings: AppSettings) -> Self {
        Self { deps, settings }
    }

    pub fn create_blob(&self) -> CreateBlob {
        CreateBlob::from_ports(
            self.deps.blob_repo.clone(),
            self.deps.id_generator.clone(),
            self.deps.bot_verification.clone(),
            self.settings.blob_id_length,
        )
    }

    pub fn get_blob(&self) -> GetBlob {
        GetBlob::from_ports(self.deps.blob_repo.clone(), self.settings.blob_id_length)
    }

    pub fn get_public_config(&self) -> GetPublicConfig {
        GetPublicConfig::new(self.settings.public_config.clone())
    }

    pub fn check_health(&self) -> CheckHealth {
        CheckHealth
    }

    /// Quota shared by every API request
    pub fn enforce_api_rate_limit(&self) -> EnforceRateLimit {
        EnforceRateLimit::from_port(self.deps.api_rate_limiter.clone(), API_RATE_LIMIT_MESSAGE)
    }

    /// Stricter quota for blob creation
    pub fn enforce_create_rate_limit(&self) -> EnforceRateLimit {
        EnforceRateLimit::from_port(
            self.deps.create_rate_limiter.clone(),
            CREATE_RATE_LIMIT_MESSAGE,
        )
    }
}
