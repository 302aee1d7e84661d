use std::sync::Arc;

use jb_core::ports::{BlobIdGeneratorPort, BlobRepositoryError, BlobRepositoryPort};
use jb_core::{Blob, JsonDocument};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::deps::BotVerification;
use crate::error::BlobServiceError;
use crate::models::{CreatedBlob, RequestOrigin};

/// Upper bound on id regenerations after a key collision
pub const MAX_ID_ATTEMPTS: usize = 5;

const CREATE_FAILED: &str = "Failed to create blob";
const VERIFICATION_REQUIRED: &str = "reCAPTCHA verification required";
const VERIFICATION_FAILED: &str = "reCAPTCHA verification failed";
const CONTENT_REQUIRED: &str = "JSON content is required";
const INVALID_FORMAT: &str = "Invalid JSON format";

#[derive(Debug, Clone)]
pub struct CreateBlobInput {
    /// `None` when the field was absent or `null`
    pub document: Option<Value>,
    pub verification_token: Option<String>,
    pub origin: RequestOrigin,
}

/// Use case for storing a new JSON document under a fresh id.
/// 保存新的 JSON 文档并分配 id 的用例。
pub struct CreateBlob {
    blob_repo: Arc<dyn BlobRepositoryPort>,
    id_generator: Arc<dyn BlobIdGeneratorPort>,
    bot_verification: BotVerification,
    id_length: usize,
}

impl CreateBlob {
    pub fn from_ports(
        blob_repo: Arc<dyn BlobRepositoryPort>,
        id_generator: Arc<dyn BlobIdGeneratorPort>,
        bot_verification: BotVerification,
        id_length: usize,
    ) -> Self {
        Self {
            blob_repo,
            id_generator,
            bot_verification,
            id_length,
        }
    }

    /// Validate, verify and persist a document.
    ///
    /// Order of checks:
    /// 1. Token presence when verification is enabled
    /// 2. Document presence
    /// 3. JSON round trip
    /// 4. Oracle call
    /// 5. Insert, regenerating the id on collision
    ///
    /// Every check that needs no I/O runs before the oracle and the store are
    /// touched.
    #[tracing::instrument(name = "usecase.create_blob.execute", skip(self, input))]
    pub async fn execute(&self, input: CreateBlobInput) -> Result<CreatedBlob, BlobServiceError> {
        let token = self.required_token(input.verification_token.as_deref())?;

        let document = match input.document {
            None | Some(Value::Null) => {
                return Err(BlobServiceError::bad_request(CONTENT_REQUIRED));
            }
            Some(value) => JsonDocument::new(value),
        };

        if let Err(e) = document.verify_round_trip() {
            debug!(error = %e, "Rejected document");
            return Err(BlobServiceError::bad_request(INVALID_FORMAT));
        }

        if let Some(token) = token {
            self.verify_token(token).await?;
        }

        let blob = self.persist(&document).await?;
        info!(blob_id = %blob.id, "Blob created");

        Ok(CreatedBlob {
            url: input.origin.blob_url(blob.id.as_str()),
            id: blob.id.into_inner(),
        })
    }

    /// `Some(token)` when the oracle must be consulted.
    fn required_token<'a>(&self, token: Option<&'a str>) -> Result<Option<&'a str>, BlobServiceError> {
        match (&self.bot_verification, token) {
            (BotVerification::Disabled, _) => Ok(None),
            (BotVerification::Required { .. }, Some(token)) if !token.is_empty() => Ok(Some(token)),
            (BotVerification::Required { .. }, _) => {
                Err(BlobServiceError::bad_request(VERIFICATION_REQUIRED))
            }
        }
    }

    async fn verify_token(&self, token: &str) -> Result<(), BlobServiceError> {
        let BotVerification::Required {
            verifier,
            min_score,
        } = &self.bot_verification
        else {
            return Ok(());
        };

        // Fail closed: transport errors and timeouts count as failures
        match verifier.verify(token).await {
            Ok(verdict) if verdict.passes(*min_score) => Ok(()),
            Ok(verdict) => {
                warn!(
                    success = verdict.success,
                    score = ?verdict.score,
                    min_score = *min_score,
                    "Bot verification rejected"
                );
                Err(BlobServiceError::Forbidden(VERIFICATION_FAILED.to_string()))
            }
            Err(e) => {
                warn!(error = %e, "Bot verification unavailable");
                Err(BlobServiceError::Forbidden(VERIFICATION_FAILED.to_string()))
            }
        }
    }

    async fn persist(&self, document: &JsonDocument) -> Result<Blob, BlobServiceError> {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let id = self.id_generator.generate(self.id_length);

            match self.blob_repo.put(&id, document).await {
                Ok(blob) => return Ok(blob),
                Err(BlobRepositoryError::DuplicateKey(_)) => {
                    warn!(attempt, blob_id = %id, "Generated blob id collided, retrying");
                }
                Err(e) => return Err(BlobServiceError::internal(CREATE_FAILED, e)),
            }
        }

        Err(BlobServiceError::internal(
            CREATE_FAILED,
            format!("no unique blob id after {MAX_ID_ATTEMPTS} attempts"),
        ))
    }
}
