pub mod factory;
pub mod fetcher;

pub use factory::{FetcherFactory, FetcherRegistry, ProviderConfig};
pub use fetcher::{FetchError, TaxBracketFetcher};
