//! HTTP-backed tax bracket provider.
//!
//! Fetches `GET {provider_url}/tax-year/{year}` and expects a body of the form
//! `{"tax_brackets": [{"min": 0, "max": 50197, "rate": 0.15}, ...]}`.

mod factory;
mod fetcher;

pub use factory::HttpFetcherFactory;
pub use fetcher::HttpTaxBracketFetcher;
