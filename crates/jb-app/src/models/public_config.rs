use jb_core::ServerConfig;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

/// Public configuration echoed to the frontend so it can decide which
/// optional third-party scripts to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicConfig {
    pub analytics: AnalyticsInfo,
    pub recaptcha: Option<RecaptchaInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsInfo {
    pub umami: Option<UmamiInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UmamiInfo {
    pub url: String,
    pub website_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecaptchaInfo {
    pub site_key: String,
}

impl PublicConfig {
    /// Umami is only advertised when both the URL and the website id are set.
    pub fn from_server_config(config: &ServerConfig) -> Self {
        let umami = match (&config.analytics.umami_url, &config.analytics.umami_website_id) {
            (Some(url), Some(website_id)) => Some(UmamiInfo {
                url: url.clone(),
                website_id: website_id.clone(),
            }),
            _ => None,
        };

        Self {
            analytics: AnalyticsInfo { umami },
            recaptcha: config
                .recaptcha
                .site_key
                .clone()
                .map(|site_key| RecaptchaInfo { site_key }),
        }
    }
}
