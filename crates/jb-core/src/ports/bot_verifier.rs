use async_trait::async_trait;

use crate::ports::errors::BotVerificationError;

/// Raw answer of the bot-verification oracle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotVerdict {
    pub success: bool,
    /// Confidence score, absent for challenge types that do not report one
    pub score: Option<f64>,
}

impl BotVerdict {
    /// A verdict passes only when the oracle reports success and a score at
    /// or above `min_score`. A missing score never passes.
    pub fn passes(&self, min_score: f64) -> bool {
        self.success && self.score.is_some_and(|score| score >= min_score)
    }
}

/// Remote boolean-decision oracle for challenge tokens.
#[async_trait]
pub trait BotVerifierPort: Send + Sync {
    async fn verify(&self, token: &str) -> Result<BotVerdict, BotVerificationError>;
}
