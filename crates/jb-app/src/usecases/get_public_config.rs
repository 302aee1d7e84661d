use crate::models::PublicConfig;

pub struct GetPublicConfig {
    config: PublicConfig,
}

impl GetPublicConfig {
    pub fn new(config: PublicConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> PublicConfig {
        self.config.clone()
    }
}
