use std::sync::Arc;

use tax_core::provider::{FetchError, FetcherRegistry, ProviderConfig, TaxBracketFetcher};
use tax_core::IncomeTaxCalculator;
use tax_data::CsvFetcherFactory;
use tax_http::HttpFetcherFactory;
use tracing::info;

/// Shared by every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub calculator: IncomeTaxCalculator,
}

impl AppState {
    pub fn new(fetcher: Arc<dyn TaxBracketFetcher>) -> Self {
        Self {
            calculator: IncomeTaxCalculator::new(fetcher),
        }
    }
}

/// Registry with every provider backend this service ships.
pub fn build_registry() -> FetcherRegistry {
    let mut registry = FetcherRegistry::new();
    registry.register(Box::new(HttpFetcherFactory));
    registry.register(Box::new(CsvFetcherFactory));
    registry
}

/// Builds the configured fetcher and wraps it in a calculator.
pub async fn build_state(config: &ProviderConfig) -> Result<AppState, FetchError> {
    let fetcher = build_registry().create(config).await?;
    info!(provider = %config.backend, source = %config.source, "bracket provider ready");

    Ok(AppState::new(Arc::from(fetcher)))
}
