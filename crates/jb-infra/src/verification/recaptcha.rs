use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use jb_core::ports::{BotVerdict, BotVerificationError, BotVerifierPort};
use serde::Deserialize;
use tracing::debug;

/// reCAPTCHA v3 `siteverify` client.
pub struct RecaptchaVerifier {
    client: reqwest::Client,
    secret_key: String,
    verify_url: String,
}

#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    success: bool,
    #[serde(default)]
    score: Option<f64>,
    #[serde(rename = "error-codes", default)]
    error_codes: Vec<String>,
}

impl RecaptchaVerifier {
    /// `timeout` bounds the whole request, connect included.
    pub fn new(
        secret_key: impl Into<String>,
        verify_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build reCAPTCHA HTTP client")?;

        Ok(Self {
            client,
            secret_key: secret_key.into(),
            verify_url: verify_url.into(),
        })
    }
}

#[async_trait]
impl BotVerifierPort for RecaptchaVerifier {
    async fn verify(&self, token: &str) -> Result<BotVerdict, BotVerificationError> {
        let response = self
            .client
            .post(&self.verify_url)
            .form(&[("secret", self.secret_key.as_str()), ("response", token)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BotVerificationError::Timeout
                } else {
                    BotVerificationError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BotVerificationError::InvalidResponse(format!(
                "unexpected status {status}"
            )));
        }

        let body: SiteVerifyResponse = response
            .json()
            .await
            .map_err(|e| BotVerificationError::InvalidResponse(e.to_string()))?;

        if !body.error_codes.is_empty() {
            debug!(error_codes = ?body.error_codes, "reCAPTCHA reported errors");
        }

        Ok(BotVerdict {
            success: body.success,
            score: body.score,
        })
    }
}
