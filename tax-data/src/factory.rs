use std::path::Path;

use async_trait::async_trait;
use tax_core::provider::{FetcherFactory, ProviderConfig};
use tax_core::{FetchError, TaxBracketFetcher};
use tracing::info;

use crate::fetcher::CsvTaxBracketFetcher;

/// [`FetcherFactory`] for brackets kept in a local CSV file.
///
/// `config.source` is the file path. The file is read once, when the fetcher
/// is created.
pub struct CsvFetcherFactory;

#[async_trait]
impl FetcherFactory for CsvFetcherFactory {
    fn backend_name(&self) -> &'static str {
        "csv"
    }

    async fn create(
        &self,
        config: &ProviderConfig,
    ) -> Result<Box<dyn TaxBracketFetcher>, FetchError> {
        let fetcher = CsvTaxBracketFetcher::from_path(Path::new(&config.source))
            .map_err(|e| FetchError::Configuration(e.to_string()))?;
        info!(
            source = %config.source,
            years = ?fetcher.tax_years(),
            "loaded csv tax brackets"
        );
        Ok(Box::new(fetcher))
    }
}

#[cfg(test)]
mod tests {
    use tax_core::provider::{FetcherFactory, ProviderConfig};

    use super::CsvFetcherFactory;

    fn config(source: String) -> ProviderConfig {
        ProviderConfig {
            backend: "csv".to_string(),
            source,
            ..ProviderConfig::default()
        }
    }

    #[test]
    fn backend_name_is_csv() {
        assert_eq!(CsvFetcherFactory.backend_name(), "csv");
    }

    /// Reads the bundled test data from the crate manifest dir.
    #[tokio::test]
    async fn creates_fetcher_from_bundled_csv() {
        let path = format!("{}/test-data/tax_brackets.csv", env!("CARGO_MANIFEST_DIR"));

        let result = CsvFetcherFactory.create(&config(path)).await;

        assert!(
            result.is_ok(),
            "failed to create csv fetcher: {:#?}",
            result.err()
        );
    }

    #[tokio::test]
    async fn missing_file_is_a_configuration_error() {
        let result = CsvFetcherFactory
            .create(&config("missing.csv".to_string()))
            .await;

        assert!(matches!(
            result,
            Err(tax_core::FetchError::Configuration(_))
        ));
    }
}
