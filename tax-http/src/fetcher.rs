use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tax_core::{BracketSchedule, FetchError, TaxBracket, TaxBracketFetcher};
use tracing::debug;

/// Body returned by the bracket provider.
#[derive(Debug, Deserialize)]
struct TaxBracketsResponse {
    #[serde(default)]
    tax_brackets: Vec<TaxBracket>,
}

/// Fetches bracket schedules from a remote provider over HTTP.
///
/// The underlying client is reused across calls; cloning the fetcher is cheap.
#[derive(Debug, Clone)]
pub struct HttpTaxBracketFetcher {
    client: Client,
    provider_url: String,
}

impl HttpTaxBracketFetcher {
    /// Build a fetcher for `provider_url`, bounding each request by `timeout`.
    ///
    /// # Errors
    /// [`FetchError::Configuration`] if the URL is blank or the client cannot
    /// be built.
    pub fn new(
        provider_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let provider_url = provider_url.into();
        let provider_url = provider_url.trim().trim_end_matches('/');
        if provider_url.is_empty() {
            return Err(FetchError::Configuration(
                "provider url is not provided".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Configuration(format!("cannot build http client: {e}")))?;

        Ok(Self {
            client,
            provider_url: provider_url.to_string(),
        })
    }

    pub fn provider_url(&self) -> &str {
        &self.provider_url
    }

    fn year_url(
        &self,
        year: i32,
    ) -> String {
        format!("{}/tax-year/{}", self.provider_url, year)
    }
}

#[async_trait]
impl TaxBracketFetcher for HttpTaxBracketFetcher {
    async fn fetch_tax_brackets(
        &self,
        year: i32,
    ) -> Result<BracketSchedule, FetchError> {
        let url = self.year_url(year);
        debug!(%url, "requesting tax brackets");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let body: TaxBracketsResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                FetchError::Parse(e.to_string())
            } else {
                FetchError::Transport(e.to_string())
            }
        })?;

        if body.tax_brackets.is_empty() {
            return Err(FetchError::NoBrackets(year));
        }

        Ok(BracketSchedule::new(body.tax_brackets))
    }
}
