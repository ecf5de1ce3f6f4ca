use async_trait::async_trait;
use tax_core::provider::{FetcherFactory, ProviderConfig};
use tax_core::{FetchError, TaxBracketFetcher};

use crate::fetcher::HttpTaxBracketFetcher;

/// [`FetcherFactory`] for remote HTTP providers.
///
/// Register this with a [`tax_core::provider::FetcherRegistry`] to make the
/// `"http"` backend available:
///
/// ```rust,no_run
/// use tax_core::provider::FetcherRegistry;
/// use tax_http::HttpFetcherFactory;
///
/// let mut registry = FetcherRegistry::new();
/// registry.register(Box::new(HttpFetcherFactory));
/// ```
pub struct HttpFetcherFactory;

#[async_trait]
impl FetcherFactory for HttpFetcherFactory {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    /// `config.source` is the provider base URL; `/tax-year/{year}` is
    /// appended per request.
    async fn create(
        &self,
        config: &ProviderConfig,
    ) -> Result<Box<dyn TaxBracketFetcher>, FetchError> {
        let fetcher = HttpTaxBracketFetcher::new(config.source.as_str(), config.request_timeout)?;
        Ok(Box::new(fetcher))
    }
}
