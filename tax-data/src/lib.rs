//! Offline bracket data: CSV parsing and a file-backed fetcher.

mod factory;
mod fetcher;
mod loader;

pub use factory::CsvFetcherFactory;
pub use fetcher::CsvTaxBracketFetcher;
pub use loader::{TaxBracketLoader, TaxBracketLoaderError, TaxBracketRecord};
