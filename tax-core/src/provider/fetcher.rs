use async_trait::async_trait;
use thiserror::Error;

use crate::models::BracketSchedule;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("provider configuration error: {0}")]
    Configuration(String),

    #[error("error making request: {0}")]
    Transport(String),

    #[error("tax bracket provider failed with status {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("error parsing provider response: {0}")]
    Parse(String),

    #[error("no tax brackets defined for tax year {0}")]
    NoBrackets(i32),
}

/// Source of bracket schedules, one call per calculation.
///
/// Implementations must return an error, never an empty schedule, when the
/// year is unknown or the data cannot be read.
#[async_trait]
pub trait TaxBracketFetcher: Send + Sync {
    async fn fetch_tax_brackets(
        &self,
        year: i32,
    ) -> Result<BracketSchedule, FetchError>;
}
